//! Pages
//!
//! Top-level page components for each route.

pub mod enquiry;
pub mod login;
pub mod profile;
pub mod register;
pub mod result;

pub use enquiry::EnquiryPage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
pub use result::ResultPage;
