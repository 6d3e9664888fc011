//! UI Components
//!
//! Shared chrome and widgets for the pages.

pub mod layout;
pub mod loading;
pub mod navbar;
pub mod sidebar;
pub mod toast;

pub use layout::{AuthLayout, DashboardLayout};
pub use loading::{InlineLoading, Loading};
pub use navbar::Navbar;
pub use sidebar::Sidebar;
pub use toast::{alert, Toast};
