use thiserror::Error;

use crate::{
    config::ConfigError, practicum::FetchError, response::ResponseError, status::RecordError,
    telegram::DeliveryError,
};

/// Everything that can go wrong; only [`Error::Config`] is fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not fetch homework statuses")]
    Fetch(#[from] FetchError),

    #[error("malformed API response")]
    Response(#[from] ResponseError),

    #[error("malformed homework record")]
    Record(#[from] RecordError),

    #[error("could not send notification")]
    Delivery(#[from] DeliveryError),
}
