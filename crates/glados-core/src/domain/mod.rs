//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (HTTP backends, audio devices, terminals).
//!
//! # Structure
//!
//! - `chat` - Conversation turns and history
//! - `model` - Model catalog entries
//! - `audio` - PCM waveforms

pub mod audio;
pub mod chat;
pub mod model;

pub use audio::Waveform;
pub use chat::{ChatMessage, ConversationHistory, MessageRole};
pub use model::{ModelDescriptor, SHORT_ID_LEN, fallback_catalog, format_size};
