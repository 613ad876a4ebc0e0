//! Common utilities shared between the library and the fixture CLI

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use config::{update_mode, Config};
pub use error::{Error, Result};
