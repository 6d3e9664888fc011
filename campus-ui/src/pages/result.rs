//! Result Sheet Page
//!
//! Admins look a sheet up by roll number and create or edit it; students see
//! their own sheet read-only.

use leptos::*;

use campus_records::api::RecordsApi;
use campus_records::screens::{InfoField, ResultMode, ResultScreen, SubjectColumn};

use crate::components::{alert, Loading};
use crate::state::use_global_state;

/// Heading suffix for the current mode
fn mode_badge(mode: &ResultMode) -> Option<&'static str> {
    match mode {
        ResultMode::Editing { .. } => Some("Editing"),
        ResultMode::Creating { .. } => Some("New result"),
        ResultMode::Idle | ResultMode::ReadOnly => None,
    }
}

#[component]
pub fn ResultPage() -> impl IntoView {
    let state = use_global_state();
    let Some(session) = state.session.get_untracked() else {
        return view! { <Loading /> }.into_view();
    };
    let screen = create_rw_signal(ResultScreen::new(&session));

    if let Some(email) = screen.try_update(|s| s.begin_mount()).flatten() {
        let api = state.api();
        spawn_local(async move {
            let profile = api.search_student(&email).await;
            let roll_number = screen.try_update(|s| s.finish_mount_profile(profile)).flatten();
            if let Some(roll_number) = roll_number {
                let outcome = api.fetch_result(&roll_number).await;
                screen.update(|s| s.finish_mount(outcome));
            }
        });
    }

    let search = move || {
        let Some(roll_number) = screen.try_update(|s| s.begin_search()).flatten() else {
            return;
        };
        let api = state.api();
        spawn_local(async move {
            let outcome = api.fetch_result(&roll_number).await;
            screen.update(|s| s.finish_search(&roll_number, outcome));
        });
    };

    let save = move |_| match screen.try_update(|s| s.prepare_submit()) {
        None => {}
        Some(Err(notice)) => alert(&notice),
        Some(Ok(submission)) => {
            let api = state.api();
            spawn_local(async move {
                let outcome = submission.send(&api).await;
                if let Some(notice) = screen.try_update(|s| s.finish_submit(&submission, outcome)) {
                    alert(&notice);
                }
            });
        }
    };

    let is_admin = session.is_admin();
    let editable = move || screen.with(|s| s.is_editable());

    view! {
        <div class="space-y-6">
            <div class="flex items-center space-x-3">
                <h1 class="text-3xl font-bold">{move || screen.with(|s| s.title())}</h1>
                {move || screen.with(|s| mode_badge(s.mode())).map(|badge| view! {
                    <span class="px-2 py-1 rounded bg-gray-700 text-sm">{badge}</span>
                })}
            </div>

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
                        placeholder="Roll number"
                        prop:value=move || screen.with(|s| s.search_roll().to_string())
                        on:input=move |ev| screen.update(|s| s.set_search_roll(event_target_value(&ev)))
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
            {move || screen.with(|s| s.info().map(str::to_string)).map(|msg| view! {
                <p class="text-blue-300">{msg}</p>
            })}
            {move || screen.with(|s| s.field_errors().first().map(str::to_string)).map(|msg| view! {
                <p class="text-red-400 text-sm">{msg}</p>
            })}

            {move || if screen.with(|s| s.is_busy()) {
                view! { <Loading /> }.into_view()
            } else {
                view! {}.into_view()
            }}

            <section class="grid grid-cols-1 md:grid-cols-3 gap-4 bg-gray-800 rounded-xl p-6">
                {InfoField::ALL.into_iter().map(|field| view! {
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">{field.label()}</label>
                        <input
                            type="text"
                            readonly=move || !editable() || field == InfoField::RollNumber
                            prop:value=move || screen.with(|s| if s.is_editable() {
                                field.get(&s.form().student_info).to_string()
                            } else {
                                s.display_info(field).to_string()
                            })
                            on:input=move |ev| screen.update(|s| {
                                s.set_info(field, event_target_value(&ev));
                            })
                            class="w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 read-only:opacity-70"
                        />
                    </div>
                }).collect_view()}
            </section>

            <section class="bg-gray-800 rounded-xl p-6 overflow-x-auto">
                <table class="w-full text-left">
                    <thead>
                        <tr class="text-gray-400 text-sm">
                            {SubjectColumn::ALL.into_iter().map(|column| view! {
                                <th class="pb-2 pr-2">{column.label()}</th>
                            }).collect_view()}
                            <th />
                        </tr>
                    </thead>
                    <tbody>
                        // Rows rebuild on every change, so cells commit on `change`
                        // rather than `input` to keep focus while typing
                        {move || {
                            let rows = screen.with(|s| s.form().subjects.clone());
                            rows.into_iter().enumerate().map(|(index, row)| view! {
                                <tr>
                                    {SubjectColumn::ALL.into_iter().map(|column| {
                                        let value = row.get(column).to_string();
                                        view! {
                                            <td class="pr-2 py-1">
                                                <input
                                                    type="text"
                                                    prop:value=value
                                                    readonly=move || !editable()
                                                    on:change=move |ev| screen.update(|s| {
                                                        s.set_subject(index, column, event_target_value(&ev));
                                                    })
                                                    class="w-full bg-gray-700 rounded px-2 py-1 border border-gray-600 read-only:opacity-70"
                                                />
                                            </td>
                                        }
                                    }).collect_view()}
                                    <td>
                                        <Show when=editable>
                                            <button
                                                on:click=move |_| screen.update(|s| {
                                                    s.remove_subject(index);
                                                })
                                                class="px-2 py-1 text-red-400 hover:text-red-300"
                                            >
                                                "Remove"
                                            </button>
                                        </Show>
                                    </td>
                                </tr>
                            }).collect_view()
                        }}
                    </tbody>
                </table>

                <Show when=editable>
                    <button
                        on:click=move |_| screen.update(|s| {
                            s.add_subject();
                        })
                        class="mt-3 px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg"
                    >
                        "Add Subject"
                    </button>
                </Show>
            </section>

            <section class="flex items-center space-x-8 bg-gray-800 rounded-xl p-6">
                <div>
                    <span class="text-sm text-gray-400 mr-2">"Percentage"</span>
                    <span class="text-2xl font-bold">{move || screen.with(|s| s.percentage_label())}</span>
                </div>
                <div>
                    <span class="text-sm text-gray-400 mr-2">"Status"</span>
                    {move || if editable() {
                        view! {
                            <select
                                prop:value=move || screen.with(|s| s.form().status.clone())
                                on:change=move |ev| screen.update(|s| {
                                    s.set_status(event_target_value(&ev));
                                })
                                class="bg-gray-700 rounded-lg px-3 py-2 border border-gray-600"
                            >
                                <option value="">"Select"</option>
                                <option value="Pass">"Pass"</option>
                                <option value="Fail">"Fail"</option>
                            </select>
                        }.into_view()
                    } else {
                        view! {
                            <span class="text-xl">{move || screen.with(|s| s.display_status().to_string())}</span>
                        }.into_view()
                    }}
                </div>
            </section>

            <Show when=move || is_admin>
                <button
                    on:click=save
                    disabled=move || !editable() || screen.with(|s| s.is_busy())
                    class="px-6 py-3 bg-green-600 hover:bg-green-700 disabled:bg-gray-600 rounded-lg font-medium"
                >
                    "Save Result"
                </button>
            </Show>
        </div>
    }
    .into_view()
}
