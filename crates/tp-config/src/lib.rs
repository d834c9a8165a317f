//! # tp-config
//!
//! Model-configuration ingestion for TunePilot.
//!
//! Provides the nested config value tree, a recursive-descent parser for the
//! simplified message-text grammar used by model config files, a matching
//! serializer, and the [`ModelConfig`] typed accessor layer.

mod model;
mod parser;
mod value;

pub use model::{ModelConfig, CONFIG_FILE_NAME};
pub use parser::{parse, to_text};
pub use value::{ConfigValue, Message};
