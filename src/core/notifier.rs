//! Report delivery.

use std::time::Duration;

use serde::Serialize;

use crate::error::{HostwatchError, Result};

const TELEGRAM_API: &str = "https://api.telegram.org";

/// Delivers a finished report somewhere outside the process.
pub trait Notifier {
    fn send(&self, text: &str) -> Result<()>;
}

/// Telegram bot destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
    /// Forum topic; `None` posts to the main thread.
    pub message_thread_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_thread_id: Option<i64>,
}

pub struct TelegramNotifier {
    settings: TelegramSettings,
    client: reqwest::blocking::Client,
    api_base: String,
}

impl TelegramNotifier {
    pub fn new(settings: TelegramSettings) -> Result<Self> {
        Self::with_api_base(settings, TELEGRAM_API)
    }

    /// Point the notifier at a different Bot API host.
    pub fn with_api_base(settings: TelegramSettings, api_base: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("hostwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            settings,
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.settings.bot_token)
    }
}

impl Notifier for TelegramNotifier {
    fn send(&self, text: &str) -> Result<()> {
        let payload = SendMessage {
            chat_id: &self.settings.chat_id,
            text,
            parse_mode: "Markdown",
            message_thread_id: self.settings.message_thread_id,
        };

        let response = self.client.post(self.endpoint()).json(&payload).send()?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(HostwatchError::delivery(format!(
                "Telegram API returned status {}: {}",
                status,
                response.text().unwrap_or_default()
            )));
        }

        log::debug!("Report delivered to chat {}", self.settings.chat_id);
        Ok(())
    }
}
