use std::str::FromStr;

use ppe_portal_application::FormOutcome;
use ppe_portal_core::AppResult;
use ppe_portal_domain::{COMMON_PPE_ITEMS, RequestorDetails, SafetyDecision, View};
use tokio::io::{AsyncBufRead, AsyncWrite};

use super::{Flow, Portal};

type TextField<T> = (&'static str, fn(&mut T) -> &mut String);

fn requestor_fields() -> [TextField<RequestorDetails>; 7] {
    [
        ("Name", |details| &mut details.requestor_name),
        ("NRIC / FIN No", |details| &mut details.nric),
        ("Department", |details| &mut details.department),
        ("Designation", |details| &mut details.designation),
        ("Contact No.", |details| &mut details.contact),
        ("Email", |details| &mut details.email),
        ("Reason for Request", |details| &mut details.reason),
    ]
}

impl<R, W> Portal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub(super) async fn new_request_screen(&mut self) -> AppResult<Flow> {
        self.heading(View::NewRequest).await?;
        if let Some(line) = self.new_request.outcome().map(new_request_outcome_line) {
            self.console.say(line).await?;
        }
        self.list_item_rows().await?;

        let Some(choice) = self
            .choose(&[
                "1. Requestor details",
                "2. Safety approval",
                "3. PPE items",
                "4. Submit request",
            ])
            .await?
        else {
            return Ok(Flow::Quit);
        };

        match choice.as_str() {
            "1" => self.edit_requestor().await,
            "2" => self.edit_approval().await,
            "3" => self.edit_item_rows().await,
            "4" => {
                self.console.say("Submitting...").await?;
                self.new_request.submit(&self.client).await;
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

    async fn edit_requestor(&mut self) -> AppResult<Flow> {
        self.console
            .say("Blank keeps the value in brackets, '-' clears it.")
            .await?;
        for (label, field) in requestor_fields() {
            let current = field(&mut self.new_request.requestor).clone();
            let Some(value) = self.console.ask_keeping(label, &current).await? else {
                return Ok(Flow::Quit);
            };
            *field(&mut self.new_request.requestor) = value;
        }

        Ok(Flow::Continue)
    }

    async fn edit_approval(&mut self) -> AppResult<Flow> {
        let approval = &mut self.new_request.approval;

        let Some(name) = self
            .console
            .ask_keeping("Safety Name", &approval.safety_name)
            .await?
        else {
            return Ok(Flow::Quit);
        };
        approval.safety_name = name;

        let Some(password) = self
            .console
            .ask_secret("Safety Access Password", &approval.safety_password)
            .await?
        else {
            return Ok(Flow::Quit);
        };
        approval.safety_password = password;

        let Some(decision) = self
            .console
            .ask_keeping(
                "Safety Decision (Approved/Rejected)",
                approval.safety_decision.as_str(),
            )
            .await?
        else {
            return Ok(Flow::Quit);
        };
        match SafetyDecision::from_str(&decision) {
            Ok(decision) => approval.safety_decision = decision,
            Err(error) => self.console.say(error.detail()).await?,
        }

        let Some(comments) = self
            .console
            .ask_keeping("Safety Comments", &approval.safety_comments)
            .await?
        else {
            return Ok(Flow::Quit);
        };
        approval.safety_comments = comments;

        Ok(Flow::Continue)
    }

    async fn list_item_rows(&mut self) -> AppResult<()> {
        self.console.say("PPE items:").await?;
        let lines: Vec<String> = self
            .new_request
            .item_rows()
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let name = if row.name.trim().is_empty() {
                    "(blank)"
                } else {
                    row.name.as_str()
                };
                format!("  {}. {name} x {}", index + 1, row.qty)
            })
            .collect();
        for line in lines {
            self.console.say(line).await?;
        }

        Ok(())
    }

    async fn edit_item_rows(&mut self) -> AppResult<Flow> {
        loop {
            self.list_item_rows().await?;
            self.console
                .say("  a. Add row | e N. Edit row N | r N. Remove row N | d. Done")
                .await?;
            let Some(command) = self.console.ask("Items").await? else {
                return Ok(Flow::Quit);
            };
            let command = command.trim().to_ascii_lowercase();
            let (verb, argument) = command.split_once(' ').unwrap_or((command.as_str(), ""));
            let row = argument
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|position| position.checked_sub(1))
                .filter(|index| *index < self.new_request.item_rows().len());

            match (verb, row) {
                ("d", _) | ("", _) => return Ok(Flow::Continue),
                ("a", _) => {
                    let index = self.new_request.add_item_row();
                    if self.edit_item_row(index).await? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                }
                ("e", Some(index)) => {
                    if self.edit_item_row(index).await? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                }
                ("r", Some(index)) => {
                    if !self.new_request.remove_item_row(index) {
                        self.console
                            .say("At least one item row must remain.")
                            .await?;
                    }
                }
                ("e" | "r", None) => self.console.say("No such row.").await?,
                _ => self.console.say(format!("Unknown command '{command}'.")).await?,
            }
        }
    }

    async fn edit_item_row(&mut self, index: usize) -> AppResult<Flow> {
        let Some(row) = self.new_request.item_rows().get(index).cloned() else {
            return Ok(Flow::Continue);
        };

        let hints: Vec<String> = COMMON_PPE_ITEMS
            .iter()
            .enumerate()
            .map(|(position, item)| format!("{}) {item}", position + 1))
            .collect();
        self.console
            .say(format!("Common items: {}", hints.join(", ")))
            .await?;

        let Some(name) = self
            .console
            .ask_keeping("PPE item (name or list number)", &row.name)
            .await?
        else {
            return Ok(Flow::Quit);
        };
        let name = name
            .parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .and_then(|index| COMMON_PPE_ITEMS.get(index))
            .map_or(name.clone(), |item| (*item).to_owned());
        self.new_request.set_item_name(index, name);

        let Some(qty) = self.console.ask_keeping("Quantity", &row.qty).await? else {
            return Ok(Flow::Quit);
        };
        self.new_request.set_item_qty(index, qty);

        Ok(Flow::Continue)
    }
}

fn new_request_outcome_line(outcome: &FormOutcome) -> String {
    match outcome {
        FormOutcome::Saved {
            request_id: Some(request_id),
            ..
        } => format!("Saved. Request ID: {request_id}"),
        FormOutcome::Saved {
            status: Some(status),
            ..
        } => format!("Saved. Status: {status}"),
        FormOutcome::Saved { .. } => "Saved.".to_owned(),
        FormOutcome::Failed { message } => format!("Error: {message}"),
    }
}
