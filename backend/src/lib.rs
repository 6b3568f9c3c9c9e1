//! # ddexgen - DDEX ERN 3.8.2 NewReleaseMessage generator
//!
//! Turns a release record and its tracks into one ERN 3.8.2 XML document,
//! ready to be delivered to a digital service provider.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Bundle JSON │────▶│    Input    │────▶│ ErnCompiler │────▶│  ERN 3.8.2  │
//! │ (release +  │     │  (serde)    │     │ (resources, │     │     XML     │
//! │   tracks)   │     │             │     │  release,   │     │             │
//! └─────────────┘     └─────────────┘     │  deals...)  │     └─────────────┘
//!                                         └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ddexgen::{parse_bundle_str, ErnCompiler, ErnConfig};
//!
//! let bundle = parse_bundle_str(&std::fs::read_to_string("release.json")?)?;
//! let xml = ErnCompiler::new(ErnConfig::from_env()).compile(&bundle)?;
//! println!("{}", xml);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Release bundle models (Release, Track, ArtistCredit)
//! - [`config`] - Party identifiers and deal profile
//! - [`input`] - Bundle loading
//! - [`ern`] - Document compilation
//! - [`pipeline`] - Logged end-to-end generation
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Loading
pub mod input;

// Compilation
pub mod ern;

// Orchestration
pub mod pipeline;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ErnError, ErnResult, InputError, InputResult, PipelineError, PipelineResult, ServerError,
    ServerResult,
};

// =============================================================================
// Re-exports - Models and configuration
// =============================================================================

pub use config::{DealProfile, ErnConfig};
pub use models::{ArtistCredit, Label, Release, ReleaseBundle, Track};

// =============================================================================
// Re-exports - Compilation
// =============================================================================

pub use ern::duration::normalize_duration;
pub use ern::ids::{Clock, FixedClock, FixedRandom, MessageStamp, RandomSource};
pub use ern::{CompiledDocument, ErnCompiler};
pub use input::{load_bundle_file, parse_bundle, parse_bundle_str};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{
    generate, generate_from_bytes, generate_from_file, GenerateOptions, GenerationResult,
};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, GenerateQuery, GenerateResponse};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
