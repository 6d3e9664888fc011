//! Student self-registration

use leptos::*;
use leptos_router::*;

use campus_records::validation::{registration, FieldErrors};

use crate::components::InlineLoading;
use crate::state::use_global_state;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let state = use_global_state();

    let name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = match registration(&email.get(), &password.get(), &name.get()) {
            Ok(form) => form,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::new());

        spawn_local(async move {
            match state.register(form).await {
                Ok(_) => state.show_success("Registration successful"),
                Err(e) => state.show_error(&format!("Registration failed: {}", e)),
            }
        });
    };

    let input = move |label: &'static str, input_type: &'static str, field: &'static str, value: RwSignal<String>| {
        view! {
            <div>
                <label class="block text-sm text-gray-400 mb-2">{label}</label>
                <input
                    type=input_type
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-blue-500 focus:outline-none"
                />
                {move || errors.with(|e| e.get(field).map(str::to_string)).map(|msg| view! {
                    <p class="text-red-400 text-sm mt-1">{msg}</p>
                })}
            </div>
        }
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            {input("Name", "text", "name", name)}
            {input("Email", "email", "email", email)}
            {input("Password", "password", "password", password)}

            <button
                type="submit"
                disabled=move || state.auth_loading.get()
                class="w-full py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-gray-600 rounded-lg font-medium transition-colors"
            >
                {move || if state.auth_loading.get() {
                    view! { <InlineLoading /> }.into_view()
                } else {
                    "Register".into_view()
                }}
            </button>

            <p class="text-sm text-center text-gray-400">
                "Already registered? "
                <A href="/login" class="text-blue-400 hover:underline">"Login"</A>
            </p>
        </form>
    }
}
