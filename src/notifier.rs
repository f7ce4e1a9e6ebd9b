use tracing::debug;

use crate::discord::{build_discord_payload, send_to_discord};
use crate::error::NotifyError;
use crate::report::Report;

/// What a dispatch attempt did with the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The report was rendered and delivered to the webhook.
    Sent,
    /// The rendered report matched the previous delivery, so nothing was sent.
    Suppressed,
    /// The report contained no problems, so nothing was sent.
    Empty,
}

/// Delivers reports to a Discord webhook, suppressing repeats.
///
/// The last successfully delivered message is kept verbatim and compared
/// against the full rendered report, so the monitor can run on a tight
/// interval without spamming the channel while nothing changes.
pub struct Notifier {
    webhook_url: String,
    client: reqwest::Client,
    last_message_sent: String,
}

impl Notifier {
    pub fn new(webhook_url: String) -> Self {
        Notifier {
            webhook_url,
            client: reqwest::Client::new(),
            last_message_sent: String::new(),
        }
    }

    /// Seed the dedup state, as if `message` had already been delivered.
    pub fn with_last_message(mut self, message: String) -> Self {
        self.last_message_sent = message;
        self
    }

    pub fn last_message_sent(&self) -> &str {
        &self.last_message_sent
    }

    /// Render the report and deliver it unless it repeats the last delivery.
    ///
    /// The dedup state only advances after the webhook accepts the message;
    /// a failed send leaves it untouched so the next cycle retries.
    pub async fn dispatch(&mut self, report: &Report) -> Result<DispatchOutcome, NotifyError> {
        if report.is_empty() {
            return Ok(DispatchOutcome::Empty);
        }

        let message = report.render();
        if message == self.last_message_sent {
            debug!("Report unchanged since last notification, skipping send");
            return Ok(DispatchOutcome::Suppressed);
        }

        let payload = build_discord_payload(&message);
        send_to_discord(&self.client, &self.webhook_url, &payload).await?;
        self.last_message_sent = message;

        Ok(DispatchOutcome::Sent)
    }
}
