pub mod config;
pub mod domain;
pub mod usecase;
pub mod yaml_util;

pub use crate::config::Config;
pub use crate::domain::{EscapeReport, InputMode, QuoteReason};
pub use crate::yaml_util::escape_yaml_value;
