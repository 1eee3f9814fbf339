//! Terminal rendition of the navigation shell and its three workflow forms.

mod acknowledge_screen;
mod new_request_screen;
mod storeman_screen;

use std::str::FromStr;

use ppe_portal_application::{
    AcknowledgeForm, FormOutcome, NavigationShell, NewRequestForm, PpeRequestClient,
    StoremanIssuanceForm,
};
use ppe_portal_core::AppResult;
use ppe_portal_domain::View;
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::console::Console;

/// Whether the portal keeps running after a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive portal session.
pub struct Portal<R, W> {
    console: Console<R, W>,
    client: PpeRequestClient,
    shell: NavigationShell,
    new_request: NewRequestForm,
    storeman: StoremanIssuanceForm,
    acknowledge: AcknowledgeForm,
}

impl<R, W> Portal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(console: Console<R, W>, client: PpeRequestClient) -> Self {
        Self {
            console,
            client,
            shell: NavigationShell::new(),
            new_request: NewRequestForm::new(),
            storeman: StoremanIssuanceForm::new(),
            acknowledge: AcknowledgeForm::new(),
        }
    }

    /// Runs screens until the user quits or input ends.
    pub async fn run(&mut self) -> AppResult<()> {
        loop {
            let flow = match self.shell.current() {
                View::Home => self.home_screen().await?,
                View::NewRequest => self.new_request_screen().await?,
                View::StoremanIssuance => self.storeman_screen().await?,
                View::Acknowledge => self.acknowledge_screen().await?,
            };

            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    #[cfg(test)]
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    async fn home_screen(&mut self) -> AppResult<Flow> {
        self.heading(View::Home).await?;
        self.console.say("Select what you want to do:").await?;
        for (position, view) in self.shell.menu().iter().enumerate() {
            self.console
                .say(format!("  {}. {}", position + 1, view.title()))
                .await?;
        }
        self.console.say("  q. Quit").await?;

        let Some(choice) = self.console.ask("Choice").await? else {
            return Ok(Flow::Quit);
        };
        let choice = choice.trim();
        if choice.eq_ignore_ascii_case("q") {
            return Ok(Flow::Quit);
        }

        let picked = choice
            .parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .and_then(|index| self.shell.menu().get(index).copied())
            .or_else(|| View::from_str(choice).ok());
        match picked {
            Some(view) => self.shell.navigate(view),
            None => self.console.say(format!("Unknown choice '{choice}'.")).await?,
        }

        Ok(Flow::Continue)
    }

    async fn heading(&mut self, view: View) -> AppResult<()> {
        self.console.say("").await?;
        self.console.say(format!("== {} ==", view.title())).await
    }

    /// Asks for the next screen action; `None` means input ended.
    async fn choose(&mut self, actions: &[&str]) -> AppResult<Option<String>> {
        for action in actions {
            self.console.say(format!("  {action}")).await?;
        }
        self.console.say("  b. Back to home").await?;

        Ok(self
            .console
            .ask("Choice")
            .await?
            .map(|choice| choice.trim().to_ascii_lowercase()))
    }
}

/// Renders a storeman or acknowledgement outcome.
fn outcome_line(outcome: &FormOutcome, saved: &str) -> String {
    match outcome {
        FormOutcome::Saved { .. } => saved.to_owned(),
        FormOutcome::Failed { message } => format!("Error: {message}"),
    }
}
