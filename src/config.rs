use std::fmt;

use thiserror::Error;

use crate::validate::{self, ValidationError};

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("environment variable {name} is invalid")]
    Invalid {
        name: &'static str,
        #[source]
        source: ValidationError,
    },
}

/// Secrets needed to talk to both APIs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

// Keep tokens out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Credentials {
    /// Read the credentials from the process environment.
    ///
    /// # Errors
    /// See [`Self::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the credentials through `lookup`. Empty values count as missing.
    ///
    /// # Errors
    /// * One or more values are missing (all of them are listed)
    /// * A value does not look like the credential it should be
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut get = |name: &'static str| {
            let value = lookup(name).filter(|v| !v.is_empty());
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let credentials = Self {
            practicum_token: get(PRACTICUM_TOKEN),
            telegram_token: get(TELEGRAM_TOKEN),
            telegram_chat_id: get(TELEGRAM_CHAT_ID),
        };

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }
        credentials.validate()?;
        Ok(credentials)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, &str, fn(&str) -> Result<(), ValidationError>); 3] = [
            (PRACTICUM_TOKEN, self.practicum_token.as_str(), validate::practicum_token),
            (TELEGRAM_TOKEN, self.telegram_token.as_str(), validate::telegram_token),
            (TELEGRAM_CHAT_ID, self.telegram_chat_id.as_str(), validate::chat_id),
        ];
        for (name, value, check) in checks {
            check(value).map_err(|source| ConfigError::Invalid { name, source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn reads_all_three_values() {
        let credentials = Credentials::from_lookup(lookup_in(&[
            (PRACTICUM_TOKEN, "y0_AgAAAAA"),
            (TELEGRAM_TOKEN, "123:abc"),
            (TELEGRAM_CHAT_ID, "42"),
        ]))
        .unwrap();
        assert_eq!(credentials.practicum_token, "y0_AgAAAAA");
        assert_eq!(credentials.telegram_token, "123:abc");
        assert_eq!(credentials.telegram_chat_id, "42");
    }

    #[test]
    fn lists_every_missing_value() {
        let err = Credentials::from_lookup(lookup_in(&[
            (TELEGRAM_TOKEN, "123:abc"),
            (TELEGRAM_CHAT_ID, ""),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing(vec![PRACTICUM_TOKEN, TELEGRAM_CHAT_ID])
        );
        assert_eq!(
            err.to_string(),
            "missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }

    #[test]
    fn invalid_value_names_the_variable() {
        let err = Credentials::from_lookup(lookup_in(&[
            (PRACTICUM_TOKEN, "y0_AgAAAAA"),
            (TELEGRAM_TOKEN, "123:abc"),
            (TELEGRAM_CHAT_ID, "my chat"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: TELEGRAM_CHAT_ID,
                ..
            }
        ));
    }

    #[test]
    fn debug_output_hides_tokens() {
        let credentials = Credentials {
            practicum_token: "secret-a".to_owned(),
            telegram_token: "1:secret-b".to_owned(),
            telegram_chat_id: "42".to_owned(),
        };
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("42"));
    }
}
