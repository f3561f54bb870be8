//! Node configuration and the polled parameter surface
//!
//! The two source topics are runtime-mutable: they live in an external
//! parameter store that the service polls, not in the config struct alone.
//! The config carries the node name and the default topic values, and knows
//! how to derive the parameter keys and metadata entries for them.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::Result;

/// Default image stream topic
pub const DEFAULT_IMAGE_SOURCE: &str = "image";

/// Default feature stream topic
pub const DEFAULT_FEATURE_SOURCE: &str = "features";

/// Feature highlighter configuration
///
/// Uses `#[serde(default)]` to allow partial config.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct HighlighterConfig {
    /// Node name, used to namespace parameters and the output topic
    pub node_name: String,
    /// Default topic for the incoming image stream
    pub image_source: String,
    /// Default topic for the incoming feature stream
    pub feature_source: String,
}

impl Default for HighlighterConfig {
    fn default() -> Self {
        Self {
            node_name: "feature_highlighter".to_string(),
            image_source: DEFAULT_IMAGE_SOURCE.to_string(),
            feature_source: DEFAULT_FEATURE_SOURCE.to_string(),
        }
    }
}

impl HighlighterConfig {
    /// Parameter key holding the image source topic
    pub fn image_source_key(&self) -> String {
        format!("{}/image_source", self.node_name)
    }

    /// Parameter key holding the feature source topic
    pub fn feature_source_key(&self) -> String {
        format!("{}/feature_source", self.node_name)
    }

    /// Topic the annotated image stream is published on
    pub fn output_topic(&self) -> String {
        format!("{}/highlighted", self.node_name)
    }

    /// Type/topic metadata advertised alongside each source parameter
    ///
    /// Each source parameter carries three metadata entries: its value type,
    /// what it defines, and the message type of the topic it names.
    pub fn parameter_metadata(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        for (param, topic_type) in [("image_source", "VideoFrame"), ("feature_source", "Feature")]
        {
            let prefix = format!("{}/{}__meta", self.node_name, param);
            entries.push((format!("{prefix}/type"), "string".to_string()));
            entries.push((format!("{prefix}/defines"), "topic".to_string()));
            entries.push((format!("{prefix}/topic_type"), topic_type.to_string()));
        }
        entries
    }
}

/// Polled configuration surface
///
/// Owned by the surrounding infrastructure in real deployments; the service
/// only reads desired topics from it and seeds defaults/metadata at startup.
#[async_trait]
pub trait ParameterSource: Send + Sync {
    /// Read a string parameter, `None` when unset
    async fn get_string(&self, key: &str) -> Result<Option<String>>;

    /// Write a string parameter
    async fn set_string(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory parameter store for tests and single-process runs
#[derive(Default)]
pub struct InMemoryParameterSource {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryParameterSource {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParameterSource for InMemoryParameterSource {
    async fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
