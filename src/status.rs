use std::fmt;

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::json_util::type_name;

/// Review outcome reported by the homework API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    #[must_use]
    pub fn from_status(status: &str) -> Option<Self> {
        match status {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Text to forward to the chat.
    Notification(String),
    /// The record carries no status, so there is no verdict to report.
    StatusAbsent,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected a homework mapping, got {found}")]
    InvalidShape { found: &'static str },

    /// Absent, null, or not a string.
    #[error("homework record has no usable `homework_name`")]
    MissingHomeworkName,

    #[error("unexpected homework status {0}")]
    UnknownStatus(String),
}

/// Turns a single homework record into the notification text.
///
/// # Errors
/// * The record is not a JSON object
/// * `homework_name` is missing or not a string
/// * `status` is not one of the known review states
pub fn parse(record: &JsonValue) -> Result<Report, RecordError> {
    let JsonValue::Object(fields) = record else {
        return Err(RecordError::InvalidShape {
            found: type_name(record),
        });
    };

    let Some(JsonValue::String(name)) = fields.get("homework_name") else {
        return Err(RecordError::MissingHomeworkName);
    };

    let status = match fields.get("status") {
        None | Some(JsonValue::Null) => return Ok(Report::StatusAbsent),
        Some(JsonValue::String(status)) => status,
        Some(other) => return Err(RecordError::UnknownStatus(other.to_string())),
    };

    let verdict =
        Verdict::from_status(status).ok_or_else(|| RecordError::UnknownStatus(status.clone()))?;
    Ok(Report::Notification(format!(
        "Изменился статус проверки работы \"{name}\". {verdict}"
    )))
}
