use ppe_portal_core::AppResult;
use ppe_portal_domain::{View, parse_form_date};
use tokio::io::{AsyncBufRead, AsyncWrite};

use super::{Flow, Portal, outcome_line};

impl<R, W> Portal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub(super) async fn storeman_screen(&mut self) -> AppResult<Flow> {
        self.heading(View::StoremanIssuance).await?;
        if let Some(line) = self
            .storeman
            .outcome()
            .map(|outcome| outcome_line(outcome, "Issuance updated."))
        {
            self.console.say(line).await?;
        }
        self.list_issuance_lines().await?;

        let Some(choice) = self
            .choose(&[
                "1. Request ID",
                "2. Load items",
                "3. Issued quantities",
                "4. Storeman details",
                "5. Submit issuance",
            ])
            .await?
        else {
            return Ok(Flow::Quit);
        };

        match choice.as_str() {
            "1" => {
                let Some(request_id) = self
                    .console
                    .ask_keeping("Request ID", &self.storeman.request_id)
                    .await?
                else {
                    return Ok(Flow::Quit);
                };
                self.storeman.request_id = request_id;
                Ok(Flow::Continue)
            }
            "2" => {
                let blank = self.storeman.request_id.trim().is_empty();
                if !blank {
                    self.console.say("Loading...").await?;
                }
                let loaded = self.storeman.load_items(&self.client).await;
                if blank {
                    self.console.say("Enter a Request ID first.").await?;
                } else if loaded > 0 {
                    self.console.say(format!("Loaded {loaded} item(s).")).await?;
                }
                Ok(Flow::Continue)
            }
            "3" => self.edit_issued_quantities().await,
            "4" => self.edit_storeman_details().await,
            "5" => {
                self.console.say("Submitting...").await?;
                self.storeman.submit(&self.client).await;
                Ok(Flow::Continue)
            }
            "b" => {
                self.shell.back();
                Ok(Flow::Continue)
            }
            other => {
                self.console.say(format!("Unknown choice '{other}'.")).await?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn list_issuance_lines(&mut self) -> AppResult<()> {
        if self.storeman.lines().is_empty() {
            return Ok(());
        }

        let lines: Vec<String> = self
            .storeman
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| {
                format!(
                    "  {}. {} (requested {}, issuing {})",
                    index + 1,
                    line.ppe,
                    line.requested_qty,
                    line.issued_qty
                )
            })
            .collect();
        self.console.say("Loaded items:").await?;
        for line in lines {
            self.console.say(line).await?;
        }

        Ok(())
    }

    async fn edit_issued_quantities(&mut self) -> AppResult<Flow> {
        if self.storeman.lines().is_empty() {
            self.console
                .say("No items loaded. Load items first.")
                .await?;
            return Ok(Flow::Continue);
        }

        let prompts: Vec<(String, String)> = self
            .storeman
            .lines()
            .iter()
            .map(|line| {
                (
                    format!("Issued quantity for {} (requested {})", line.ppe, line.requested_qty),
                    line.issued_qty.clone(),
                )
            })
            .collect();
        for (index, (label, current)) in prompts.into_iter().enumerate() {
            let Some(qty) = self.console.ask_keeping(&label, &current).await? else {
                return Ok(Flow::Quit);
            };
            self.storeman.set_issued_qty(index, qty);
        }

        Ok(Flow::Continue)
    }

    async fn edit_storeman_details(&mut self) -> AppResult<Flow> {
        let Some(name) = self
            .console
            .ask_keeping("Storeman Name", &self.storeman.storeman_name)
            .await?
        else {
            return Ok(Flow::Quit);
        };
        self.storeman.storeman_name = name;

        let Some(password) = self
            .console
            .ask_secret("Storeman Access Password", &self.storeman.storeman_password)
            .await?
        else {
            return Ok(Flow::Quit);
        };
        self.storeman.storeman_password = password;

        let current_date = self
            .storeman
            .issued_date
            .map(|date| date.to_string())
            .unwrap_or_default();
        let Some(date) = self
            .console
            .ask_keeping("Issued Date (YYYY-MM-DD, blank for now)", &current_date)
            .await?
        else {
            return Ok(Flow::Quit);
        };
        match parse_form_date(&date) {
            Ok(date) => self.storeman.issued_date = date,
            Err(error) => self.console.say(error.detail()).await?,
        }

        Ok(Flow::Continue)
    }
}
