//! App Root Component
//!
//! Routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{AuthLayout, DashboardLayout, Toast};
use crate::pages::{EnquiryPage, LoginPage, ProfilePage, RegisterPage, ResultPage};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_global_state();

    // Re-validate a token left over from a previous visit
    if state.has_token.get_untracked() {
        spawn_local(state.load_session());
    }

    view! {
        <Router>
            <Routes>
                <Route path="" view=AuthLayout>
                    <Route path="login" view=LoginPage />
                    <Route path="register" view=RegisterPage />
                </Route>
                <Route path="" view=DashboardLayout>
                    <Route path="" view=ProfilePage />
                    <Route path="result" view=ResultPage />
                    <Route path="enquiry" view=EnquiryPage />
                </Route>
                <Route path="/*any" view=NotFound />
            </Routes>
            <Toast />
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-screen text-center bg-gray-900 text-white">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium transition-colors"
            >
                "Go Home"
            </A>
        </div>
    }
}
