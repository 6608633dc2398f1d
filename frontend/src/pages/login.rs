use crate::{
    api::{LoginRequest, Role},
    components::layout::ErrorMessage,
    router::{use_navigator, ORGANIZATION_HOME_PATH},
    state::auth,
};
use leptos::*;
use web_sys::HtmlInputElement;

const INPUT_CLASS: &str = "appearance-none relative block w-full px-3 py-2 border border-green-900/40 bg-gray-900/60 placeholder-emerald-200/40 text-emerald-50 focus:outline-none focus:ring-emerald-500 focus:border-emerald-500 sm:text-sm";

#[component]
pub fn LoginPage() -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let login_action = auth::use_login_action();
    let pending = login_action.pending();
    let navigator = use_navigator();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(user) => match landing_path(user.role) {
                    Ok(path) => {
                        set_error.set(None);
                        navigator.push(path);
                    }
                    Err(msg) => set_error.set(Some(msg)),
                },
                Err(err) => set_error.set(Some(err.error)),
            }
        }
    });

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if let Err(msg) = validate_credentials(&email_value, &password_value) {
            set_error.set(Some(msg));
            return;
        }
        set_error.set(None);
        login_action.dispatch(LoginRequest {
            email: email_value.trim().to_string(),
            password: password_value,
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-black py-12 px-4">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-white">"Sign in to Ushuari"</h2>
                    <p class="mt-2 text-center text-sm text-emerald-300">"Organization portal"</p>
                </div>
                <form class="mt-8 space-y-6" on:submit=handle_submit>
                    <div class="rounded-md shadow-sm -space-y-px">
                        <div>
                            <label for="email" class="sr-only">"Email"</label>
                            <input
                                id="email"
                                name="email"
                                type="email"
                                autocomplete="email"
                                required
                                class=INPUT_CLASS
                                placeholder="Email"
                                prop:value=email
                                on:input=move |ev| {
                                    let target = event_target::<HtmlInputElement>(&ev);
                                    set_email.set(target.value());
                                }
                            />
                        </div>
                        <div>
                            <label for="password" class="sr-only">"Password"</label>
                            <input
                                id="password"
                                name="password"
                                type="password"
                                autocomplete="current-password"
                                required
                                class=INPUT_CLASS
                                placeholder="Password"
                                prop:value=password
                                on:input=move |ev| {
                                    let target = event_target::<HtmlInputElement>(&ev);
                                    set_password.set(target.value());
                                }
                            />
                        </div>
                    </div>

                    {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full flex justify-center py-2 px-4 rounded-md text-sm font-medium text-black bg-emerald-500 hover:bg-emerald-400 disabled:opacity-50"
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Please enter your email address".into());
    }
    if !email.contains('@') {
        return Err("Please enter a valid email address".into());
    }
    if password.is_empty() {
        return Err("Please enter your password".into());
    }
    Ok(())
}

/// Where a freshly signed-in user goes; only organization accounts have a home here.
pub fn landing_path(role: Role) -> Result<&'static str, String> {
    match role {
        Role::Organization => Ok(ORGANIZATION_HOME_PATH),
        other => Err(format!(
            "This portal is for organization accounts (signed in as {}).",
            other
        )),
    }
}
