use tracing::error;

use crate::error::NotifyError;
use crate::types::DiscordPayload;

/// Discord rejects message contents longer than this many characters.
pub const MAX_CONTENT_LENGTH: usize = 2000;

/// Build a webhook payload, truncating the content to Discord's limit.
///
/// Truncation happens here, at the transport edge, so callers can keep
/// comparing full-length messages.
pub fn build_discord_payload(message: &str) -> DiscordPayload {
    DiscordPayload {
        content: truncate_content(message),
    }
}

pub async fn send_to_discord(
    client: &reqwest::Client,
    webhook_url: &str,
    payload: &DiscordPayload,
) -> Result<(), NotifyError> {
    let response = client.post(webhook_url).json(payload).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("Discord webhook failed: {} - {}", status, body);
        return Err(NotifyError::Status { status, body });
    }

    Ok(())
}

fn truncate_content(message: &str) -> String {
    match message.char_indices().nth(MAX_CONTENT_LENGTH) {
        Some((index, _)) => message[..index].to_string(),
        None => message.to_string(),
    }
}
