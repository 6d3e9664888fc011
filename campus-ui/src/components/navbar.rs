//! Top bar with the signed-in user

use leptos::*;

use crate::state::use_global_state;

#[component]
pub fn Navbar() -> impl IntoView {
    let state = use_global_state();

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="px-6 flex items-center justify-between h-16">
                <span class="text-xl font-bold text-white">"Campus Records"</span>

                {move || {
                    state.session.get().map(|session| view! {
                        <div class="flex items-center space-x-3 text-sm">
                            <span class="text-gray-300">{session.email.clone()}</span>
                            <span class="px-2 py-1 rounded bg-gray-700 text-gray-200 uppercase text-xs">
                                {session.role.as_str()}
                            </span>
                        </div>
                    })
                }}
            </div>
        </nav>
    }
}
