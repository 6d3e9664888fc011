//! Route Layouts
//!
//! Both layouts run the route guard before rendering their child route.

use leptos::*;
use leptos_router::*;

use campus_records::guard::{self, GuardDecision};

use crate::components::{Loading, Navbar, Sidebar};
use crate::state::use_global_state;

/// Centered card around the login and register pages
#[component]
pub fn AuthLayout() -> impl IntoView {
    let state = use_global_state();

    move || match guard::public_only(state.has_token.get()) {
        GuardDecision::Redirect(path) => view! { <Redirect path=path /> }.into_view(),
        GuardDecision::Render => view! {
            <div class="min-h-screen flex items-center justify-center bg-gray-900 px-4">
                <div class="w-full max-w-md bg-gray-800 rounded-xl p-8 shadow-lg">
                    <h1 class="text-2xl font-bold text-center mb-6">"Campus Records"</h1>
                    <Outlet />
                </div>
            </div>
        }
        .into_view(),
    }
}

/// Navbar and sidebar around the record screens
#[component]
pub fn DashboardLayout() -> impl IntoView {
    let state = use_global_state();

    move || match guard::protected(state.has_token.get()) {
        GuardDecision::Redirect(path) => view! { <Redirect path=path /> }.into_view(),
        GuardDecision::Render => view! {
            <div class="min-h-screen flex flex-col bg-gray-900 text-white">
                <Navbar />
                <div class="flex flex-1">
                    <Sidebar />
                    <main class="flex-1 p-8">
                        {move || {
                            // Token held but the profile reload has not landed yet
                            if state.session.get().is_some() {
                                view! { <Outlet /> }.into_view()
                            } else {
                                view! { <Loading /> }.into_view()
                            }
                        }}
                    </main>
                </div>
            </div>
        }
        .into_view(),
    }
}
