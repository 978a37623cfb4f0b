//! Provider module for ACME Bot
//!
//! This module contains the provider abstraction the relay endpoints are
//! written against and the Moonshot (Kimi) implementation.

pub mod base;
pub mod moonshot;

pub use base::{FileUpload, Message, Provider};
pub use moonshot::MoonshotProvider;

use crate::config::ProviderConfig;
use crate::error::Result;
use std::sync::Arc;

/// Create the provider instance described by configuration
///
/// # Errors
///
/// Returns error if provider initialization fails
///
/// # Examples
///
/// ```
/// use acme_bot::config::ProviderConfig;
/// use acme_bot::providers::create_provider;
///
/// let provider = create_provider(&ProviderConfig::default());
/// assert!(provider.is_ok());
/// ```
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn Provider>> {
    Ok(Arc::new(MoonshotProvider::new(config.clone())?))
}
