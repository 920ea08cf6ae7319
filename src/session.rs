use chrono::Utc;
use serde_json::Value as JsonValue;

use crate::{
    Error, response,
    status::{self, RecordError, Report},
};

/// Sent when the API has no changed homework for the polled period.
pub const NOTHING_NEW: &str = "Ничего нового не произошло";

/// Per-process polling state, threaded through every cycle by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    timestamp: i64,
    previous_message: Option<String>,
}

impl Session {
    #[must_use]
    pub const fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            previous_message: None,
        }
    }

    /// The `from_date` to use for the next poll.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    #[must_use]
    pub fn previous_message(&self) -> Option<&str> {
        self.previous_message.as_deref()
    }

    /// Digest one decoded API response.
    ///
    /// Moves the polling cursor forward and returns the message to send,
    /// or `None` if there is nothing new compared to the last delivered message.
    /// Call [`Self::mark_sent`] once the message has actually been delivered.
    ///
    /// # Errors
    /// * The response has an unexpected shape
    /// * The newest homework record has no name or an unknown status
    pub fn advance(&mut self, response: &JsonValue) -> Result<Option<String>, Error> {
        let homeworks = response::homeworks(response)?;
        self.timestamp = response::current_date(response).unwrap_or_else(|| Utc::now().timestamp());

        let message = match homeworks.first() {
            None => NOTHING_NEW.to_owned(),
            Some(record) => match status::parse(record) {
                Ok(Report::Notification(text)) => text,
                Ok(Report::StatusAbsent) => {
                    log::debug!("No new status in the API response");
                    return Ok(None);
                }
                Err(err @ RecordError::InvalidShape { .. }) => {
                    log::warn!("Skipping homework record: {err}");
                    return Ok(None);
                }
                Err(err) => return Err(err.into()),
            },
        };

        if self.previous_message.as_deref() == Some(message.as_str()) {
            log::info!("{message}");
            return Ok(None);
        }
        Ok(Some(message))
    }

    pub fn mark_sent(&mut self, message: String) {
        self.previous_message = Some(message);
    }
}
