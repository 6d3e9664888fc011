//! Enquiry Page
//!
//! Admission enquiries, filterable, with resolve/reopen per row.

use leptos::*;

use campus_records::api::RecordsApi;
use campus_records::models::{Enquiry, EnquiryStatus};
use campus_records::screens::EnquiryScreen;

use crate::components::{alert, Loading};
use crate::state::use_global_state;

fn received(enquiry: &Enquiry) -> String {
    enquiry
        .created_at
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Status a row's action button switches to
fn toggled(status: EnquiryStatus) -> (EnquiryStatus, &'static str) {
    match status {
        EnquiryStatus::Open => (EnquiryStatus::Resolved, "Mark resolved"),
        EnquiryStatus::Resolved => (EnquiryStatus::Open, "Reopen"),
    }
}

#[component]
pub fn EnquiryPage() -> impl IntoView {
    let state = use_global_state();
    let Some(session) = state.session.get_untracked() else {
        return view! { <Loading /> }.into_view();
    };
    let screen = create_rw_signal(EnquiryScreen::new(&session));

    if screen.try_update(|s| s.begin_load()).unwrap_or(false) {
        let api = state.api();
        spawn_local(async move {
            let outcome = api.list_enquiries().await;
            screen.update(|s| s.finish_load(outcome));
        });
    }

    let set_status = move |id: String, status: EnquiryStatus| {
        if let Err(notice) = screen.with_untracked(|s| s.prepare_status(&id)) {
            alert(&notice);
            return;
        }
        let api = state.api();
        spawn_local(async move {
            let outcome = api.set_enquiry_status(&id, status).await;
            if let Some(notice) = screen.try_update(|s| s.finish_status(&id, status, outcome)) {
                if notice.is_success() {
                    state.show_success(&notice.message);
                } else {
                    alert(&notice);
                }
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Enquiries"</h1>
                <span class="text-gray-400">
                    {move || screen.with(|s| format!("{} open", s.open_count()))}
                </span>
            </div>

            {move || screen.with(|s| s.error().map(str::to_string)).map(|msg| view! {
                <p class="text-red-400">{msg}</p>
            })}

            <input
                type="text"
                placeholder="Filter by name, email, phone or course"
                prop:value=move || screen.with(|s| s.filter().to_string())
                on:input=move |ev| screen.update(|s| s.set_filter(event_target_value(&ev)))
                class="w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-blue-500 focus:outline-none"
            />

            {move || if screen.with(|s| s.is_busy()) {
                view! { <Loading /> }.into_view()
            } else {
                view! {}.into_view()
            }}

            <div class="bg-gray-800 rounded-xl p-6 overflow-x-auto">
                <table class="w-full text-left text-sm">
                    <thead>
                        <tr class="text-gray-400">
                            <th class="pb-2">"Name"</th>
                            <th class="pb-2">"Email"</th>
                            <th class="pb-2">"Phone"</th>
                            <th class="pb-2">"Course"</th>
                            <th class="pb-2">"Message"</th>
                            <th class="pb-2">"Received"</th>
                            <th class="pb-2">"Status"</th>
                            <th />
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows: Vec<Enquiry> = screen.with(|s| s.visible().into_iter().cloned().collect());
                            rows.into_iter().map(|enquiry| {
                                let (next, action) = toggled(enquiry.status);
                                let id = enquiry.id.clone();
                                view! {
                                    <tr class="border-t border-gray-700">
                                        <td class="py-2">{enquiry.name.clone()}</td>
                                        <td>{enquiry.email.clone()}</td>
                                        <td>{enquiry.phone.clone()}</td>
                                        <td>{enquiry.course.clone()}</td>
                                        <td class="max-w-xs truncate">{enquiry.message.clone()}</td>
                                        <td>{received(&enquiry)}</td>
                                        <td>{enquiry.status.as_str()}</td>
                                        <td>
                                            <button
                                                on:click=move |_| set_status(id.clone(), next)
                                                class="px-3 py-1 bg-gray-600 hover:bg-gray-500 rounded"
                                            >
                                                {action}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                </table>
            </div>
        </div>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled() {
        assert_eq!(toggled(EnquiryStatus::Open).0, EnquiryStatus::Resolved);
        assert_eq!(toggled(EnquiryStatus::Resolved), (EnquiryStatus::Open, "Reopen"));
    }
}
