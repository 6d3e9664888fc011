//! Login Page
//!
//! Email or phone sign-in, plus the API server setting.

use leptos::*;
use leptos_router::*;

use campus_records::validation::{login_credentials, FieldErrors, LoginMethod};
use campus_records::SessionError;

use crate::api;
use crate::components::InlineLoading;
use crate::state::use_global_state;

/// Input label and type for a login method
fn identifier_input(method: LoginMethod) -> (&'static str, &'static str, &'static str) {
    match method {
        LoginMethod::Email => ("Email", "email", "email"),
        LoginMethod::Phone => ("Phone Number", "tel", "phone"),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = use_global_state();

    let method = create_rw_signal(LoginMethod::Email);
    let identifier = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::new());
    let api_url = create_rw_signal(api::get_api_base());

    let switch_method = move |next: LoginMethod| {
        method.set(next);
        identifier.set(String::new());
        errors.set(FieldErrors::new());
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let credentials = match login_credentials(method.get(), &identifier.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::new());

        spawn_local(async move {
            match state.login(credentials).await {
                Ok(session) => state.show_success(&format!("Welcome, {}", session.email)),
                Err(SessionError::InvalidCredentials) => state.show_error("Invalid credentials"),
                Err(e) => state.show_error(&format!("Login failed: {}", e)),
            }
        });
    };

    let field_error = move |field: &'static str| {
        move || {
            errors.with(|e| e.get(field).map(str::to_string)).map(|msg| view! {
                <p class="text-red-400 text-sm mt-1">{msg}</p>
            })
        }
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <div class="flex rounded-lg bg-gray-700 p-1">
                <button
                    type="button"
                    on:click=move |_| switch_method(LoginMethod::Email)
                    class=move || tab_class(method.get() == LoginMethod::Email)
                >
                    "Email"
                </button>
                <button
                    type="button"
                    on:click=move |_| switch_method(LoginMethod::Phone)
                    class=move || tab_class(method.get() == LoginMethod::Phone)
                >
                    "Phone"
                </button>
            </div>

            {move || {
                let (label, input_type, field) = identifier_input(method.get());
                view! {
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">{label}</label>
                        <input
                            type=input_type
                            prop:value=move || identifier.get()
                            on:input=move |ev| identifier.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-blue-500 focus:outline-none"
                        />
                        {field_error(field)}
                    </div>
                }
            }}

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                <input
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-blue-500 focus:outline-none"
                />
                {field_error("password")}
            </div>

            <button
                type="submit"
                disabled=move || state.auth_loading.get()
                class="w-full py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-gray-600 rounded-lg font-medium transition-colors"
            >
                {move || if state.auth_loading.get() {
                    view! { <InlineLoading /> }.into_view()
                } else {
                    "Login".into_view()
                }}
            </button>

            <p class="text-sm text-center text-gray-400">
                "No account? "
                <A href="/register" class="text-blue-400 hover:underline">"Register"</A>
            </p>

            <details class="text-sm text-gray-400">
                <summary class="cursor-pointer">"Server"</summary>
                <div class="flex space-x-2 mt-2">
                    <input
                        type="text"
                        prop:value=move || api_url.get()
                        on:input=move |ev| api_url.set(event_target_value(&ev))
                        class="flex-1 bg-gray-700 rounded-lg px-3 py-2 border border-gray-600"
                    />
                    <button
                        type="button"
                        on:click=move |_| {
                            match api::set_api_base(&api_url.get()) {
                                Ok(()) => state.show_success("API URL saved"),
                                Err(e) => state.show_error(&format!("API URL not saved: {}", e)),
                            }
                            api_url.set(api::get_api_base());
                        }
                        class="px-3 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg"
                    >
                        "Save"
                    </button>
                </div>
            </details>
        </form>
    }
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "flex-1 py-2 rounded-md bg-blue-600 text-white"
    } else {
        "flex-1 py-2 rounded-md text-gray-300"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_input_follows_method() {
        assert_eq!(identifier_input(LoginMethod::Email).2, "email");
        assert_eq!(identifier_input(LoginMethod::Phone), ("Phone Number", "tel", "phone"));
    }
}
