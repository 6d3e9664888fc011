//! Route Guard
//!
//! Decides whether a route subtree renders for the current session. The check
//! is presence-only: a held token is enough, its freshness is the API's concern.

/// Where unauthenticated visitors are sent
pub const LOGIN_PATH: &str = "/login";

/// Where signed-in visitors of the public pages are sent
pub const HOME_PATH: &str = "/";

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(&'static str),
}

/// Gate for the protected screens
pub fn protected(has_token: bool) -> GuardDecision {
    if has_token {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(LOGIN_PATH)
    }
}

/// Gate for login/register: nothing to do there once signed in
pub fn public_only(has_token: bool) -> GuardDecision {
    if has_token {
        GuardDecision::Redirect(HOME_PATH)
    } else {
        GuardDecision::Render
    }
}
