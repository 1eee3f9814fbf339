use ppe_portal_core::{AppError, AppResult};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Line-oriented prompt over any async reader and writer.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Writes one line.
    pub async fn say(&mut self, text: impl AsRef<str>) -> AppResult<()> {
        self.write(text.as_ref()).await?;
        self.write("\n").await
    }

    /// Prompts for one line. Returns `None` once input is exhausted.
    pub async fn ask(&mut self, label: &str) -> AppResult<Option<String>> {
        self.write(&format!("{label}: ")).await?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|error| AppError::Internal(format!("failed to read input: {error}")))?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    /// Prompts with the current value shown. A blank answer keeps it and
    /// `-` clears it.
    pub async fn ask_keeping(&mut self, label: &str, current: &str) -> AppResult<Option<String>> {
        let prompt = if current.is_empty() {
            label.to_owned()
        } else {
            format!("{label} [{current}]")
        };

        Ok(self.ask(&prompt).await?.map(|answer| match answer.trim() {
            "" => current.to_owned(),
            "-" => String::new(),
            value => value.to_owned(),
        }))
    }

    /// Like [`Console::ask_keeping`] but never echoes the current value.
    pub async fn ask_secret(&mut self, label: &str, current: &str) -> AppResult<Option<String>> {
        let prompt = if current.is_empty() {
            label.to_owned()
        } else {
            format!("{label} [unchanged]")
        };

        Ok(self.ask(&prompt).await?.map(|answer| match answer.trim() {
            "" => current.to_owned(),
            "-" => String::new(),
            value => value.to_owned(),
        }))
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }

    async fn write(&mut self, text: &str) -> AppResult<()> {
        self.writer
            .write_all(text.as_bytes())
            .await
            .map_err(|error| AppError::Internal(format!("failed to write output: {error}")))?;
        self.writer
            .flush()
            .await
            .map_err(|error| AppError::Internal(format!("failed to flush output: {error}")))
    }
}

#[cfg(test)]
mod tests {
    use super::Console;

    #[tokio::test]
    async fn ask_returns_lines_then_none() {
        let mut console = Console::new(&b"first\r\nsecond\n"[..], Vec::new());

        assert_eq!(console.ask("A").await.ok().flatten().as_deref(), Some("first"));
        assert_eq!(console.ask("B").await.ok().flatten().as_deref(), Some("second"));
        assert_eq!(console.ask("C").await.ok().flatten(), None);

        let output = String::from_utf8(console.into_writer()).unwrap_or_default();
        assert_eq!(output, "A: B: C: ");
    }

    #[tokio::test]
    async fn ask_keeping_keeps_replaces_or_clears() {
        let mut console = Console::new(&b"\nNew Name\n-\n"[..], Vec::new());

        let kept = console.ask_keeping("Name", "Ana").await.ok().flatten();
        let replaced = console.ask_keeping("Name", "Ana").await.ok().flatten();
        let cleared = console.ask_keeping("Name", "Ana").await.ok().flatten();

        assert_eq!(kept.as_deref(), Some("Ana"));
        assert_eq!(replaced.as_deref(), Some("New Name"));
        assert_eq!(cleared.as_deref(), Some(""));
        let output = String::from_utf8(console.into_writer()).unwrap_or_default();
        assert!(output.starts_with("Name [Ana]: "));
    }

    #[tokio::test]
    async fn ask_secret_hides_current_value() {
        let mut console = Console::new(&b"
"[..], Vec::new());

        let kept = console.ask_secret("Password", "hunter2").await.ok().flatten();

        assert_eq!(kept.as_deref(), Some("hunter2"));
        let output = String::from_utf8(console.into_writer()).unwrap_or_default();
        assert_eq!(output, "Password [unchanged]: ");
    }
}
