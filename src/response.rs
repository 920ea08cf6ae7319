use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::json_util::type_name;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    #[error("expected a mapping, got {found}")]
    InvalidShape { found: &'static str },

    #[error("`homeworks` field is missing or not a list (got {found})")]
    MissingOrInvalidHomeworks { found: &'static str },
}

/// Some malformed responses wrap the whole payload in an extra list.
/// Only that single layer is removed; nested lists are left alone.
fn effective(response: &JsonValue) -> &JsonValue {
    match response {
        JsonValue::Array(items) => items.first().unwrap_or(response),
        _ => response,
    }
}

/// Extracts the homework records from a decoded API response.
///
/// An empty list is valid and means that nothing changed since the last poll.
///
/// # Errors
/// * The (unwrapped) response is not a JSON object
/// * The `homeworks` field is missing or is not a list
pub fn homeworks(response: &JsonValue) -> Result<&[JsonValue], ResponseError> {
    let record = effective(response);
    let JsonValue::Object(fields) = record else {
        return Err(ResponseError::InvalidShape {
            found: type_name(record),
        });
    };

    match fields.get("homeworks") {
        Some(JsonValue::Array(records)) => Ok(records),
        Some(other) => Err(ResponseError::MissingOrInvalidHomeworks {
            found: type_name(other),
        }),
        None => Err(ResponseError::MissingOrInvalidHomeworks { found: "nothing" }),
    }
}

/// The server time of the response, to be used as `from_date` in the next poll.
#[must_use]
pub fn current_date(response: &JsonValue) -> Option<i64> {
    effective(response)
        .get("current_date")
        .and_then(JsonValue::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_homeworks_is_valid() {
        let response = json!({"homeworks": [], "current_date": 1_700_000_000});
        assert_eq!(homeworks(&response), Ok(&[][..]));
    }

    #[test]
    fn returns_records_in_order() {
        let response = json!({"homeworks": [
            {"homework_name": "hw2", "status": "reviewing"},
            {"homework_name": "hw1", "status": "approved"},
        ]});
        let records = homeworks(&response).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["homework_name"], "hw2");
        assert_eq!(records[1]["homework_name"], "hw1");
    }

    #[test]
    fn homeworks_must_be_a_list() {
        let response = json!({"homeworks": "not-a-list"});
        assert_eq!(
            homeworks(&response),
            Err(ResponseError::MissingOrInvalidHomeworks { found: "string" })
        );
    }

    #[test]
    fn homeworks_must_be_present() {
        let response = json!({"current_date": 1});
        assert_eq!(
            homeworks(&response),
            Err(ResponseError::MissingOrInvalidHomeworks { found: "nothing" })
        );
    }

    #[test]
    fn response_must_be_a_mapping() {
        let err = homeworks(&json!("oops")).unwrap_err();
        assert_eq!(err, ResponseError::InvalidShape { found: "string" });
        assert_eq!(err.to_string(), "expected a mapping, got string");
        assert_eq!(
            homeworks(&json!([])),
            Err(ResponseError::InvalidShape { found: "list" })
        );
    }

    #[test]
    fn wrapping_list_is_flattened_once() {
        let inner = json!({"homeworks": [{"homework_name": "hw1"}], "current_date": 42});
        let wrapped = json!([inner.clone(), {"homeworks": []}]);
        assert_eq!(homeworks(&wrapped), homeworks(&inner));
        assert_eq!(current_date(&wrapped), Some(42));

        let twice = json!([[inner]]);
        assert_eq!(
            homeworks(&twice),
            Err(ResponseError::InvalidShape { found: "list" })
        );
    }

    #[test]
    fn current_date_needs_an_integer() {
        assert_eq!(current_date(&json!({"current_date": 1_700_000_000})), Some(1_700_000_000));
        assert_eq!(current_date(&json!({"current_date": "soon"})), None);
        assert_eq!(current_date(&json!({"homeworks": []})), None);
    }
}
