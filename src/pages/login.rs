use gloo::console;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::pages::GENERIC_ERROR;
use crate::session::use_session;

/// Route to land on after sign-in: admins review, non-admins create.
fn landing_route(is_admin: bool) -> &'static str {
    if is_admin {
        "/stories"
    } else {
        "/story-create"
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (as_admin, set_as_admin) = signal(false);
    let (error_message, set_error_message) = signal::<Option<String>>(None);
    let (is_loading, set_is_loading) = signal(false);

    // Guest-only view: an existing session goes straight to the list. The
    // read is untracked so a sign-in from this page keeps its own role-based
    // landing route instead of re-triggering this redirect.
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if session.user.get_untracked().is_some() {
                navigate("/stories", Default::default());
            }
        });
    }

    let submit = move |_| {
        let navigate = navigate.clone();
        let email = email.get();
        let password = password.get();
        let as_admin = as_admin.get();

        set_is_loading.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match api::sign_in(&session.store(), &email, &password, as_admin).await {
                Ok(user) => {
                    let admin = user.is_admin();
                    session.login(user);
                    navigate(landing_route(admin), Default::default());
                }
                Err(err) => {
                    console::error!(format!("sign-in failed: {err}"));
                    set_error_message.set(Some(GENERIC_ERROR.to_string()));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="page login-page">
            <section class="login-card">
                <h2>"Sign In"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <div class="form-group">
                    <label for="login-email">"Email"</label>
                    <input
                        id="login-email"
                        type="email"
                        class="input"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        disabled=move || is_loading.get()
                    />
                </div>

                <div class="form-group">
                    <label for="login-password">"Password"</label>
                    <input
                        id="login-password"
                        type="password"
                        class="input"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        disabled=move || is_loading.get()
                    />
                </div>

                <label class="checkbox-row">
                    <input
                        type="checkbox"
                        prop:checked=move || as_admin.get()
                        on:change=move |ev| set_as_admin.set(event_target_checked(&ev))
                        disabled=move || is_loading.get()
                    />
                    "Login as Admin"
                </label>

                <button
                    class="btn btn-primary"
                    on:click=submit
                    disabled=move || {
                        is_loading.get() || email.get().is_empty() || password.get().is_empty()
                    }
                >
                    {move || if is_loading.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::landing_route;

    #[test]
    fn admin_lands_on_the_story_list() {
        assert_eq!(landing_route(true), "/stories");
    }

    #[test]
    fn non_admin_lands_on_the_create_form() {
        assert_eq!(landing_route(false), "/story-create");
    }
}
