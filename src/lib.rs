pub mod api;
pub mod application;
pub mod config;
pub mod error;
pub mod mail;
pub mod serve;

pub use config::Config;
pub use error::{Error, Result};
