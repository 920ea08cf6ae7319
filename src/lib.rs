#![deny(unexpected_cfgs)]
//
#![warn(clippy::cargo)]
#![warn(clippy::nursery)]
//
// https://github.com/rust-lang/rust-clippy/issues/16440
#![allow(clippy::multiple_crate_versions)]

mod error;
mod json_util;
mod validate;

pub mod config;
pub mod practicum;
pub mod response;
pub mod session;
pub mod status;
pub mod telegram;

pub use config::Credentials;
pub use error::Error;
pub use session::Session;
pub use validate::ValidationError;
