// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # tap-yandex-direct
//!
//! A data-extraction connector ("tap") for the Yandex Direct advertising
//! API. Pulls campaigns, ad groups, ads, and daily performance reports and
//! emits them as schema-announced JSON records for a downstream pipeline.
//!
//! ## Stream hierarchy
//!
//! ```text
//! campaigns ──→ ad_groups ──→ ads        (entity endpoints, JSON)
//! ad_performance                          (report endpoint, TSV)
//! ```
//!
//! Child streams are scoped to one parent record each: the engine walks the
//! hierarchy depth-first, deriving an extraction context (`campaign_id`,
//! `adgroup_id`) from every parent record before fetching its children.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use tap_yandex_direct::config::TapConfig;
//! use tap_yandex_direct::engine::TapEngine;
//!
//! #[tokio::main]
//! async fn main() -> tap_yandex_direct::Result<()> {
//!     let config = TapConfig::from_file("config.json")?;
//!     let mut engine = TapEngine::new(config);
//!
//!     for message in engine.sync_all().await? {
//!         println!("{}", message.to_json());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Bearer-token authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Pagination types
pub mod pagination;

/// Response decoders (JSON, TSV)
pub mod decode;

/// Stream schema types
pub mod schema;

/// Stream definitions and registry
pub mod streams;

/// Main execution engine
pub mod engine;

/// Tap configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::TapConfig;
pub use engine::{Message, TapEngine};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
