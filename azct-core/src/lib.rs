//! azct Core Library
//!
//! Platform-independent browser logic for a terminal cloud inventory browser:
//! - Navigation state machine with context-aware back transitions
//! - Virtual directory projection over flat object-storage keys
//! - Resource handler registry with a default fallback
//! - Live case-insensitive filtering of tabular lists
//!
//! Data comes from an [`azct_provider::ResourceProvider`]; rendering is left to
//! the caller, which reads a [`ViewSnapshot`] after each [`BrowserMessage`].

pub mod browser;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod hierarchy;
pub mod navigation;
pub mod registry;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use browser::{Browser, BrowserMessage};
pub use error::{CoreError, CoreResult};
pub use filter::{FilterableList, RowFormatter};
pub use hierarchy::DirectoryNode;
pub use navigation::{NavigationState, SelectionContext, ViewKind};
pub use registry::HandlerRegistry;
pub use traits::{BrowserConfig, ConfigService, ResourceHandler};
pub use types::{StatusSummary, ViewSnapshot};
