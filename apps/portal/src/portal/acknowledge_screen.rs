use ppe_portal_core::AppResult;
use ppe_portal_domain::{SIGNATURE_CANVAS_HEIGHT, SIGNATURE_CANVAS_WIDTH, View, parse_form_date};
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::signature_input::parse_stroke;

use super::{Flow, Portal, outcome_line};

impl<R, W> Portal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub(super) async fn acknowledge_screen(&mut self) -> AppResult<Flow> {
        self.heading(View::Acknowledge).await?;
        if let Some(line) = self
            .acknowledge
            .outcome()
            .map(|outcome| outcome_line(outcome, "Acknowledged. Thank you."))
        {
            self.console.say(line).await?;
        }
        let strokes = self.acknowledge.signature.stroke_count();
        self.console
            .say(format!("Signature: {strokes} stroke(s)"))
            .await?;

        let Some(choice) = self
            .choose(&[
                "1. Request details",
                "2. Draw signature",
                "3. Clear signature",
                "4. Confirm receipt",
            ])
            .await?
        else {
            return Ok(Flow::Quit);
        };

        match choice.as_str() {
            "1" => self.edit_acknowledgement_details().await,
            "2" => self.draw_signature().await,
            "3" => {
                self.acknowledge.signature.clear();
                Ok(Flow::Continue)
            }
            "4" => {
                if self.acknowledge.can_submit() {
                    self.console.say("Submitting...").await?;
                }
                self.acknowledge.submit(&self.client).await;
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

    async fn edit_acknowledgement_details(&mut self) -> AppResult<Flow> {
        let Some(request_id) = self
            .console
            .ask_keeping("Request ID", &self.acknowledge.request_id)
            .await?
        else {
            return Ok(Flow::Quit);
        };
        self.acknowledge.request_id = request_id;

        let Some(signature_name) = self
            .console
            .ask_keeping("Full Name", &self.acknowledge.signature_name)
            .await?
        else {
            return Ok(Flow::Quit);
        };
        self.acknowledge.signature_name = signature_name;

        let current_date = self
            .acknowledge
            .ack_date
            .map(|date| date.to_string())
            .unwrap_or_default();
        let Some(date) = self
            .console
            .ask_keeping("Date (YYYY-MM-DD, blank for now)", &current_date)
            .await?
        else {
            return Ok(Flow::Quit);
        };
        match parse_form_date(&date) {
            Ok(date) => self.acknowledge.ack_date = date,
            Err(error) => self.console.say(error.detail()).await?,
        }

        Ok(Flow::Continue)
    }

    async fn draw_signature(&mut self) -> AppResult<Flow> {
        self.console
            .say(format!(
                "Canvas is {SIGNATURE_CANVAS_WIDTH}x{SIGNATURE_CANVAS_HEIGHT}. \
                 Enter one stroke per line as x,y pairs; a blank line finishes."
            ))
            .await?;

        loop {
            let Some(line) = self.console.ask("Stroke").await? else {
                return Ok(Flow::Quit);
            };
            if line.trim().is_empty() {
                return Ok(Flow::Continue);
            }

            match parse_stroke(&line) {
                Ok(points) => self.acknowledge.signature.draw_stroke(points),
                Err(error) => self.console.say(error.detail()).await?,
            }
        }
    }
}
