//! Chat-completion integration: the HTTP client and the JSON recovery
//! applied to everything the model returns.
//!
//! # Modules
//!
//! - [`client`]: conversation types, the [`ChatCompleter`] seam, the
//!   blocking [`ChatClient`], and the always-failing [`OfflineClient`]
//! - [`extract`]: two-tier JSON extraction from raw model text

pub mod client;
pub mod extract;

pub use client::{ChatClient, ChatCompleter, ChatMessage, OfflineClient, Role};
pub use extract::{extract_json, truncate_preview, PREVIEW_LIMIT};
