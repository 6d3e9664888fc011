//! HTTP access to the records API

pub mod client;

pub use client::{get_api_base, set_api_base, BrowserApi, DEFAULT_API_BASE};
