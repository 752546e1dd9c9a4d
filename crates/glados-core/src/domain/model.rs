//! Model catalog types.

use serde::{Deserialize, Serialize};

/// Length of the digest prefix shown as a model's short id.
pub const SHORT_ID_LEN: usize = 12;

/// Models offered when the backend catalog cannot be fetched.
const FALLBACK_MODEL_NAMES: [&str; 4] = [
    "llama3.2:3b",
    "mapler/gpt2:latest",
    "qwen3:0.6b",
    "deepseek-r1:1.5b",
];

/// An entry in the backend's model catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Model name as the backend knows it (e.g. `llama3.2:3b`).
    pub name: String,
    /// Size on disk in bytes; 0 when unknown.
    pub size_bytes: u64,
    /// Abbreviated content digest; empty when unknown.
    pub short_id: String,
}

impl ModelDescriptor {
    /// Build a descriptor from a full digest, keeping only its prefix.
    pub fn new(name: impl Into<String>, size_bytes: u64, digest: &str) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            short_id: digest.chars().take(SHORT_ID_LEN).collect(),
        }
    }

    /// Human-readable size (see [`format_size`]).
    #[must_use]
    pub fn size_display(&self) -> String {
        format_size(self.size_bytes)
    }
}

/// Catalog used when the backend cannot list its models.
#[must_use]
pub fn fallback_catalog() -> Vec<ModelDescriptor> {
    FALLBACK_MODEL_NAMES
        .iter()
        .map(|name| ModelDescriptor::new(*name, 0, ""))
        .collect()
}

/// Convert a byte count to a short human-readable string.
///
/// `0` means the size is unknown and renders as `"Unknown"`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(size_bytes: u64) -> String {
    if size_bytes == 0 {
        return "Unknown".to_string();
    }

    let mut size = size_bytes as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} PB")
}
