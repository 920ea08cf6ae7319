use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::json_util::error_snippet;

pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not send GET request to {url}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("request failed with status {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("could not parse JSON from success response near `{snippet}`")]
    Decode {
        snippet: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct PracticumClient {
    http_client: Client,
    token: String,
    endpoint: Url,
}

impl PracticumClient {
    #[must_use]
    pub fn new(token: String, endpoint: Url) -> Self {
        Self {
            http_client: Client::new(),
            token,
            endpoint,
        }
    }

    /// Fetch the statuses of all homeworks that changed since `from_date` (Unix seconds).
    ///
    /// The decoded body is returned as-is; see [`crate::response`] for validation.
    ///
    /// # Errors
    /// * Error sending HTTPS request
    /// * Response body is not valid UTF-8
    /// * Server responded with anything but 200 OK
    /// * Response body is not JSON
    pub fn fetch_statuses(&self, from_date: i64) -> Result<JsonValue, FetchError> {
        let transport = |source| FetchError::Transport {
            url: self.endpoint.clone(),
            source,
        };

        log::debug!("Requesting homework statuses from {from_date}");
        let resp: Response = self.request(from_date).send().map_err(transport)?;
        let status: StatusCode = resp.status();
        let text: String = resp.text().map_err(transport)?;
        check_response(status, &text)
    }

    fn request(&self, from_date: i64) -> RequestBuilder {
        self.http_client
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date.to_string())])
    }
}

fn check_response(status: StatusCode, text: &str) -> Result<JsonValue, FetchError> {
    if status != StatusCode::OK {
        return Err(FetchError::Status {
            status,
            message: extract_error(text),
        });
    }

    serde_json::from_str(text).map_err(|source| FetchError::Decode {
        snippet: error_snippet(&source, text),
        source,
    })
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    code: Option<String>,
}

fn extract_error(text: &str) -> String {
    let err = match serde_json::from_str::<ErrorResponse>(text) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("Could not parse error json response: {err}");
            return text.to_owned();
        }
    };

    if let Some(msg) = err.message
        && !msg.is_empty()
    {
        return msg;
    }

    if let Some(code) = err.code
        && !code.is_empty()
    {
        return code;
    }

    String::from("<unknown>")
}
