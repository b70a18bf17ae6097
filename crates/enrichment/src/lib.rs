//! Outbound enrichment adapters and the validation orchestrator.
//!
//! Two external services are consumed here, never implemented:
//!
//! - a chat-completion endpoint ([`extraction::ExtractionClient`]) used
//!   for field extraction and alternative suggestions, and
//! - a web-search endpoint ([`lookup::LookupClient`]) used for
//!   best-effort business-hours lookup.
//!
//! [`validator::TodoValidator`] sequences the two and applies the local
//! date and hours heuristics.

pub mod config;
pub mod extraction;
pub mod lookup;
pub mod validator;

pub use config::EnrichmentConfig;
pub use extraction::{ExtractionClient, ExtractionError};
pub use lookup::LookupClient;
pub use validator::TodoValidator;
