//! Common types used throughout the crate
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Prefetch Policy
// ============================================================================

/// When a resource stream requests the page after the one it just received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prefetch {
    /// Start fetching the following page as soon as a page arrives,
    /// regardless of how many items are still buffered
    #[default]
    Eager,
    /// Fetch the following page only once the buffer has been drained
    OnDemand,
}

impl Prefetch {
    /// Check if pages are chained without waiting for the consumer
    pub fn is_eager(self) -> bool {
        matches!(self, Self::Eager)
    }
}

impl std::fmt::Display for Prefetch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eager => write!(f, "eager"),
            Self::OnDemand => write!(f, "on_demand"),
        }
    }
}
