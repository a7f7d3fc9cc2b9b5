//! Navigation: view tags, selection context and the back-transition table.

mod context;
mod state;
mod view;

pub use context::SelectionContext;
pub use state::NavigationState;
pub use view::ViewKind;
