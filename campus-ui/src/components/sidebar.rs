//! Sidebar Navigation
//!
//! Links to the record screens, filtered by role, and the logout button.

use leptos::*;
use leptos_router::*;

use campus_records::models::Role;

use crate::state::use_global_state;

/// One sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
}

/// Entries visible to `role`
pub fn nav_items(role: Role) -> Vec<NavItem> {
    let mut items = vec![
        NavItem {
            href: "/",
            label: if role.is_admin() { "Students" } else { "My Profile" },
        },
        NavItem {
            href: "/result",
            label: if role.is_admin() { "Results" } else { "My Result" },
        },
    ];
    if role.is_admin() {
        items.push(NavItem {
            href: "/enquiry",
            label: "Enquiries",
        });
    }
    items
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_global_state();

    let logout = move |_| {
        state.logout();
        state.show_success("Logged out");
    };

    view! {
        <aside class="w-56 bg-gray-800 border-r border-gray-700 flex flex-col">
            <div class="flex-1 p-4 space-y-1">
                {move || {
                    let role = state.session.get().map(|s| s.role).unwrap_or_default();
                    nav_items(role)
                        .into_iter()
                        .map(|item| view! {
                            <A
                                href=item.href
                                exact=true
                                class="block px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                                active_class="bg-gray-700 text-white"
                            >
                                {item.label}
                            </A>
                        })
                        .collect_view()
                }}
            </div>
            <button
                on:click=logout
                class="m-4 px-4 py-2 bg-red-600 hover:bg-red-700 rounded-lg font-medium transition-colors"
            >
                "Logout"
            </button>
        </aside>
    }
}
