//! Student Profile Page
//!
//! Admins search by email or phone and edit; students see their own record.

use leptos::*;

use campus_records::api::RecordsApi;
use campus_records::models::StudentField;
use campus_records::screens::ProfileScreen;

use crate::components::{alert, Loading};
use crate::state::use_global_state;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let state = use_global_state();
    let Some(session) = state.session.get_untracked() else {
        return view! { <Loading /> }.into_view();
    };
    let screen = create_rw_signal(ProfileScreen::new(&session));

    if let Some(email) = screen.try_update(|s| s.begin_mount()).flatten() {
        let api = state.api();
        spawn_local(async move {
            let outcome = api.search_student(&email).await;
            screen.update(|s| s.finish_mount(outcome));
        });
    }

    let search = move || {
        let Some(query) = screen.try_update(|s| s.begin_search()).flatten() else {
            return;
        };
        let api = state.api();
        spawn_local(async move {
            let outcome = api.search_student(&query).await;
            screen.update(|s| s.finish_search(outcome));
        });
    };

    let save = move |_| match screen.with_untracked(|s| s.prepare_submit()) {
        Err(notice) => alert(&notice),
        Ok((email, record)) => {
            let api = state.api();
            spawn_local(async move {
                let outcome = api.update_student(&email, &record).await;
                if let Some(notice) = screen.try_update(|s| s.finish_submit(record, outcome)) {
                    alert(&notice);
                }
            });
        }
    };

    let is_admin = session.is_admin();

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">{move || screen.with(|s| s.title())}</h1>

            <Show when=move || is_admin>
                <form
                    class="flex space-x-2"
                    on:submit=move |ev: ev::SubmitEvent| {
                        ev.prevent_default();
                        search();
                    }
                >
                    <input
                        type="text"
                        placeholder="Email or phone number"
                        prop:value=move || screen.with(|s| s.search_query().to_string())
                        on:input=move |ev| screen.update(|s| s.set_search_query(event_target_value(&ev)))
                        class="flex-1 bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-blue-500 focus:outline-none"
                    />
                    <button
                        type="submit"
                        disabled=move || screen.with(|s| s.is_busy())
                        class="px-6 py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-gray-600 rounded-lg font-medium"
                    >
                        "Search"
                    </button>
                </form>
            </Show>

            {move || screen.with(|s| s.error().map(str::to_string)).map(|msg| view! {
                <p class="text-red-400">{msg}</p>
            })}

            {move || if screen.with(|s| s.is_busy()) {
                view! { <Loading /> }.into_view()
            } else {
                view! {}.into_view()
            }}

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4 bg-gray-800 rounded-xl p-6">
                {StudentField::ALL.into_iter().map(|field| view! {
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">{field.label()}</label>
                        <input
                            type="text"
                            placeholder=field.placeholder().unwrap_or("")
                            readonly=move || screen.with(|s| !s.is_editable(field))
                            prop:value=move || screen.with(|s| if s.role().is_admin() {
                                s.form().get(field).to_string()
                            } else {
                                s.display_value(field).to_string()
                            })
                            on:input=move |ev| screen.update(|s| {
                                s.set_field(field, event_target_value(&ev));
                            })
                            class="w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 read-only:opacity-70"
                        />
                    </div>
                }).collect_view()}
            </div>

            <Show when=move || is_admin>
                <button
                    on:click=save
                    disabled=move || screen.with(|s| !s.is_loaded() || s.is_busy())
                    class="px-6 py-3 bg-green-600 hover:bg-green-700 disabled:bg-gray-600 rounded-lg font-medium"
                >
                    "Save Changes"
                </button>
            </Show>
        </div>
    }
    .into_view()
}
