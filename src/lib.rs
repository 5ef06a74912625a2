//! ion-init - one-shot MongoDB bootstrap for the Ion patient records service
//!
//! Provisions the application user and the patients collection against a
//! fresh deployment, applies the collection's schema indexes, and can seed
//! the development fixture dataset. Designed to run once from a container
//! init hook and exit; rerunning is a no-op unless strict mode is enabled.

pub mod config;
pub mod db;
pub mod fixtures;
pub mod provision;
pub mod types;

pub use config::Args;
pub use types::{BootstrapError, Result};
