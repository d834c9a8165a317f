//! Typed accessors over one model's parsed configuration.

use std::fs;
use std::path::{Path, PathBuf};

use tp_types::{ConfigError, TpResult};

use crate::parser;
use crate::value::{ConfigValue, Message};

/// File name of the config resource inside a model directory.
pub const CONFIG_FILE_NAME: &str = "config.pbtxt";

/// All the metadata about one served model.
///
/// Wraps the root [`Message`] of a parsed config file. Accessors for the
/// required fields fail with [`ConfigError::FieldMissing`] when the key is
/// absent; they never substitute a default. The source path is kept for
/// diagnostics only.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    model_path: PathBuf,
    root: Message,
}

impl ModelConfig {
    /// Load and parse `config.pbtxt` from a model directory.
    pub fn from_directory(model_dir: impl AsRef<Path>) -> TpResult<Self> {
        let path = model_dir.as_ref().join(CONFIG_FILE_NAME);
        let text = fs::read_to_string(&path).map_err(|e| ConfigError::ResourceNotFound {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!("loaded model config from {}", path.display());
        Self::from_text(&text, path)
    }

    /// Parse a config from text already in memory; `path` is kept for
    /// diagnostics.
    pub fn from_text(text: &str, path: impl Into<PathBuf>) -> TpResult<Self> {
        Ok(Self {
            model_path: path.into(),
            root: parser::parse(text)?,
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn root(&self) -> &Message {
        &self.root
    }

    /// The model's name.
    pub fn name(&self) -> TpResult<&str> {
        self.scalar_field("name")
    }

    /// The model's serving platform (e.g. "tensorrt").
    pub fn platform(&self) -> TpResult<&str> {
        self.scalar_field("platform")
    }

    /// The model's maximum batch size.
    pub fn max_batch_size(&self) -> TpResult<u32> {
        let raw = self.scalar_field("max_batch_size")?;
        raw.parse().map_err(|_| {
            ConfigError::MalformedText {
                message: format!("max_batch_size is not an integer: '{raw}'"),
            }
            .into()
        })
    }

    /// The instance_group section, in whatever shape the config declares it
    /// (a list of messages in the common case).
    pub fn instance_group(&self) -> TpResult<&ConfigValue> {
        self.field("instance_group")
    }

    /// The dynamic_batching section.
    pub fn dynamic_batching(&self) -> TpResult<&ConfigValue> {
        self.field("dynamic_batching")
    }

    /// Overwrite the instance_group section, regardless of prior content.
    pub fn set_instance_group(&mut self, instance_group: Message) {
        self.root
            .insert("instance_group", ConfigValue::Message(instance_group));
    }

    /// Overwrite the dynamic_batching section, regardless of prior content.
    pub fn set_dynamic_batching(&mut self, dynamic_batching: Message) {
        self.root
            .insert("dynamic_batching", ConfigValue::Message(dynamic_batching));
    }

    fn field(&self, name: &str) -> TpResult<&ConfigValue> {
        self.root.get(name).ok_or_else(|| {
            ConfigError::FieldMissing {
                field: name.to_string(),
                path: self.model_path.display().to_string(),
            }
            .into()
        })
    }

    fn scalar_field(&self, name: &str) -> TpResult<&str> {
        self.field(name)?.as_scalar().ok_or_else(|| {
            ConfigError::MalformedText {
                message: format!("field '{name}' is not a scalar"),
            }
            .into()
        })
    }
}
