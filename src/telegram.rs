use anyhow::{Context, Result};
use reqwest::{StatusCode, Url, blocking::Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validate;

const API_BASE_URL: &str = "https://api.telegram.org/";

#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The URL is stripped from the source since it contains the bot token.
    #[error("could not reach the Telegram Bot API")]
    Transport(#[source] reqwest::Error),

    #[error("Telegram rejected the message with status {status}: {description}")]
    Rejected {
        status: StatusCode,
        description: String,
    },
}

#[derive(Debug, Clone)]
pub struct TelegramClient {
    http_client: Client,
    url: Url,
}

#[derive(Debug, Clone, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramClient {
    pub fn new(bot_token: &str) -> Result<Self> {
        validate::telegram_token(bot_token)?;
        let url = Url::parse(&format!("{API_BASE_URL}bot{bot_token}/sendMessage"))
            .context("Invalid Bot API URL")?;
        Ok(Self::with_url(url))
    }

    fn with_url(url: Url) -> Self {
        let http_client = Client::new();
        Self { http_client, url }
    }

    /// Deliver `text` to the given chat.
    ///
    /// # Errors
    /// * Error sending HTTPS request
    /// * The Bot API answered with a non-success status or `"ok": false`
    pub fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        log::debug!("Sending message to chat {chat_id}");

        let body = SendMessageRequest { chat_id, text };
        let transport = |e: reqwest::Error| DeliveryError::Transport(e.without_url());
        let resp = self
            .http_client
            .post(self.url.clone())
            .json(&body)
            .send()
            .map_err(transport)?;
        let status = resp.status();
        let reply = resp.text().map_err(transport)?;
        check_delivery(status, &reply)?;

        log::debug!("Message sent successfully");
        Ok(())
    }
}

fn check_delivery(status: StatusCode, text: &str) -> Result<(), DeliveryError> {
    let reply = serde_json::from_str::<ApiResponse>(text);
    if status.is_success()
        && let Ok(ApiResponse { ok: true, .. }) = reply
    {
        return Ok(());
    }

    let description = match reply {
        Ok(ApiResponse {
            description: Some(desc),
            ..
        }) if !desc.is_empty() => desc,
        Ok(_) => String::from("<unknown>"),
        Err(_) => text.to_owned(),
    };
    Err(DeliveryError::Rejected {
        status,
        description,
    })
}
