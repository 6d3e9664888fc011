//! Campus Records
//!
//! Browser front end for the college student-records service, built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - Email or phone sign-in, student self-registration
//! - Student profile view and admin editing
//! - Result sheets with create/edit for admins
//! - Admission enquiry review
//!
//! # Architecture
//!
//! A client-side rendered (CSR) Leptos application. Session handling, screen
//! state and validation live in `campus-records`; this crate renders them and
//! talks to the records API over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
