use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is empty")]
    Empty(&'static str),

    #[error("{description} contains invalid characters: {chars:?}")]
    InvalidCharacters {
        description: &'static str,
        chars: BTreeSet<char>,
    },

    #[error("{description} is malformed: {reason}")]
    Malformed {
        description: &'static str,
        reason: &'static str,
    },
}

/// OAuth tokens issued by Yandex.
pub fn practicum_token(token: &str) -> Result<(), ValidationError> {
    const CHARS: &[u8; 65] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_.";
    validate_charset("Practicum Token", token, CHARS)
}

/// Bot tokens look like `123456789:AAE...`.
pub fn telegram_token(token: &str) -> Result<(), ValidationError> {
    const DESCRIPTION: &str = "Telegram Token";
    const CHARS: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

    let Some((bot_id, secret)) = token.split_once(':') else {
        return Err(ValidationError::Malformed {
            description: DESCRIPTION,
            reason: "expected `<bot id>:<secret>`",
        });
    };
    validate_charset(DESCRIPTION, bot_id, b"0123456789")?;
    validate_charset(DESCRIPTION, secret, CHARS)
}

/// Either a numeric chat id (negative for groups) or a public `@channel` name.
pub fn chat_id(chat_id: &str) -> Result<(), ValidationError> {
    const DESCRIPTION: &str = "Telegram Chat ID";

    if let Some(channel) = chat_id.strip_prefix('@') {
        const CHARS: &[u8; 63] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_";
        return validate_charset(DESCRIPTION, channel, CHARS);
    }

    let digits = chat_id.strip_prefix('-').unwrap_or(chat_id);
    validate_charset(DESCRIPTION, digits, b"0123456789")
}

fn validate_charset(
    description: &'static str,
    string: &str,
    charset: &'static [u8],
) -> Result<(), ValidationError> {
    if string.is_empty() {
        return Err(ValidationError::Empty(description));
    }
    if string.bytes().all(|b| charset.contains(&b)) {
        return Ok(());
    }

    let chars = string
        .chars()
        .filter(|&c| u8::try_from(c).map_or(true, |b| !charset.contains(&b)))
        .collect::<BTreeSet<char>>();
    Err(ValidationError::InvalidCharacters { description, chars })
}
