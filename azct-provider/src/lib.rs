//! # azct-provider
//!
//! The resource-provider contract used by the azct cloud inventory browser,
//! together with the inventory record types it exchanges.
//!
//! The browser core never talks to a cloud API directly. Everything it shows
//! comes through a [`ResourceProvider`], whose implementation owns
//! authentication, pagination, retries and wire formats.
//!
//! ## Record Types
//!
//! | Area | Types |
//! |------|-------|
//! | Management plane | [`Subscription`], [`ResourceGroup`], [`Resource`], [`ResourceTypeSummary`], [`UserInfo`] |
//! | Object storage | [`Container`], [`KeyEntry`], [`BlobDetail`] |
//! | Secrets vault | [`Secret`], [`VaultKey`], [`Certificate`], [`VaultItemAttributes`] |
//!
//! Resource properties are kept as a recursive [`PropertyValue`] so arbitrary
//! nesting survives without an untyped map.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use azct_provider::{InMemoryProvider, Inventory, ResourceProvider, ResourceScope};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = InMemoryProvider::new(Inventory::new());
//!
//!     for sub in provider.list_subscriptions().await? {
//!         let scope = ResourceScope::subscription(&sub.id);
//!         for summary in provider.resource_type_summary(&scope).await? {
//!             println!("{} {}", summary.resource_type, summary.count);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//!
//! - [`ProviderError::Unauthenticated`] — no usable identity
//! - [`ProviderError::ResourceNotFound`] — the addressed object does not exist
//! - [`ProviderError::RateLimited`] — API throttling (transient)
//! - [`ProviderError::NetworkError`] — network connectivity issue (transient)
//!
//! See [`ProviderError::is_expected`] for log-level classification.

mod error;
mod memory;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export the in-memory backend
pub use memory::{InMemoryProvider, Inventory, Operation};

// Re-export core trait
pub use traits::{ResourceProvider, ResourceScope, StorageAccountRef};

// Re-export types
pub use types::{
    BlobDetail, Certificate, Container, KeyEntry, PropertyValue, PublicAccess, Resource,
    ResourceGroup, ResourceTypeSummary, Secret, Subscription, UserInfo, VaultItemAttributes,
    VaultKey,
};

// Re-export utils
pub use utils::datetime;
pub use utils::log_sanitizer;
pub use utils::resource_id::{resource_group_from_id, strip_provider_prefix, subscription_from_id};
