//! # Campus Records
//!
//! Client core for a college student-records service: the session store,
//! route guard, record screens and form validation shared by the browser
//! front end (`campus-ui`) and the `campus-cli` terminal front end.
//!
//! ## Modules
//!
//! - [`session`]: login/register/logout and token persistence
//! - [`guard`]: protected and public-only route decisions
//! - [`screens`]: Student Profile, Result Sheet and Enquiry screens
//! - [`api`]: the API traits every transport implements
//! - [`client`]: reqwest transport (`native` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use campus_records::client::HttpClient;
//! use campus_records::config::Config;
//! use campus_records::screens::ResultScreen;
//! use campus_records::session::{FileStorage, SessionStore};
//! use campus_records::models::Credentials;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let api = HttpClient::new(&config.api)?;
//!     let mut store = SessionStore::new(FileStorage::new(&config.session.token_file));
//!
//!     let session = store
//!         .login(&api, &Credentials::email("admin@college.edu", "secret"))
//!         .await?;
//!
//!     let api = api.with_token(Some(session.token.clone()));
//!     let mut screen = ResultScreen::new(&session);
//!     screen.set_search_roll("STU123");
//!     screen.search(&api).await;
//!     println!("{}", screen.percentage_label());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod guard;
pub mod models;
pub mod screens;
pub mod session;
pub mod summary;
pub mod validation;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;

#[cfg(test)]
mod testing;

pub use api::{AuthApi, Envelope, RecordsApi};
pub use error::{ApiError, ApiResult, SessionError, StorageError};
pub use guard::GuardDecision;
pub use models::{
    AuthResponse, Credentials, Enquiry, EnquiryStatus, Registration, ResultRecord, ResultStatus,
    Role, Session, StudentField, StudentInfo, StudentRecord, Subject, UserProfile,
};
pub use screens::{EnquiryScreen, Notice, NoticeKind, ProfileScreen, ResultScreen};
pub use session::{MemoryStorage, SessionState, SessionStore, TokenStorage};
pub use summary::MarksSummary;
pub use validation::{FieldErrors, LoginMethod};

#[cfg(feature = "native")]
pub use client::HttpClient;
#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
