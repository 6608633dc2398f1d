use crate::{
    router::ORGANIZATION_NAV,
    state::auth::{self, use_auth},
};
use leptos::*;

const NAV_LINK_CLASS: &str = "block py-2.5 px-4 rounded transition duration-200 hover:bg-emerald-900/50 text-emerald-100 hover:text-white";
const LOGOUT_BUTTON_CLASS: &str = "w-full text-left py-2.5 px-4 rounded transition duration-200 hover:bg-emerald-900/50 text-emerald-100 hover:text-white disabled:opacity-50";

#[component]
pub fn OrganizationShell(children: Children) -> impl IntoView {
    let (sidebar_open, set_sidebar_open) = create_signal(true);
    let toggle_sidebar = Callback::new(move |_: ()| set_sidebar_open.update(|open| *open = !*open));

    view! {
        <div class="min-h-screen bg-black flex relative overflow-hidden">
            <Sidebar open=sidebar_open />
            <div class=move || {
                format!(
                    "transition-all duration-300 relative flex-1 {}",
                    if sidebar_open.get() { "ml-64" } else { "ml-0" },
                )
            }>
                <Header on_toggle=toggle_sidebar sidebar_open=sidebar_open />
                <main class="p-6 relative">
                    <div class="bg-gray-900/40 backdrop-blur-sm border border-green-900/20 rounded-2xl p-6 shadow-lg shadow-green-900/10">
                        {children()}
                    </div>
                </main>
            </div>
        </div>
    }
}

#[component]
pub fn Sidebar(#[prop(into)] open: Signal<bool>) -> impl IntoView {
    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();
    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        logout_action.dispatch(());
    };

    view! {
        <aside class=move || {
            format!(
                "bg-gradient-to-b from-emerald-950/90 to-green-950/90 backdrop-blur-sm border-r border-green-900/20 text-white w-64 fixed h-full transition-all duration-300 {}",
                if open.get() { "left-0" } else { "-left-64" },
            )
        }>
            <div class="p-4 border-b border-green-900/20 bg-green-950/50">
                <h2 class="text-xl font-semibold text-white">"Ushuari"</h2>
                <p class="text-emerald-300 text-sm">"Organization Dashboard"</p>
            </div>
            <nav class="mt-6">
                <ul>
                    {ORGANIZATION_NAV
                        .iter()
                        .map(|item| {
                            view! {
                                <li>
                                    <a href=item.href class=NAV_LINK_CLASS>
                                        {item.label}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </nav>
            <div class="absolute bottom-0 w-full p-4 border-t border-green-900/20 bg-green-950/50">
                <button
                    on:click=on_logout
                    class=LOGOUT_BUTTON_CLASS
                    disabled=move || logout_pending.get()
                >
                    "Logout"
                </button>
            </div>
        </aside>
    }
}

#[component]
pub fn Header(on_toggle: Callback<()>, #[prop(into)] sidebar_open: Signal<bool>) -> impl IntoView {
    let (auth, _) = use_auth();
    let user_name = move || {
        auth.with(|state| {
            state
                .user
                .as_ref()
                .map(|u| u.name.clone())
                .unwrap_or_default()
        })
    };
    let user_initial =
        move || auth.with(|state| state.user.as_ref().map(|u| u.initial()).unwrap_or_default());

    view! {
        <header class="bg-gray-900/80 backdrop-blur-md border-b border-green-900/20 h-16 flex items-center justify-between px-6">
            <button
                type="button"
                class="text-emerald-300 hover:text-white focus:outline-none"
                aria-label="Toggle sidebar"
                aria-expanded=move || sidebar_open.get().to_string()
                on:click=move |_| on_toggle.call(())
            >
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    class="h-6 w-6"
                    fill="none"
                    viewBox="0 0 24 24"
                    stroke="currentColor"
                >
                    <path
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        stroke-width="2"
                        d="M4 6h16M4 12h16M4 18h16"
                    />
                </svg>
            </button>
            <div class="flex items-center">
                <span class="text-emerald-100 mr-2">{user_name}</span>
                <div class="h-8 w-8 rounded-full bg-emerald-500/20 border border-emerald-500/30 flex items-center justify-center text-emerald-400 font-medium">
                    {user_initial}
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-black" role="status" aria-label="Loading">
            <div class="animate-spin rounded-full h-12 w-12 border-t-2 border-b-2 border-green-500"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-red-950/60 border border-red-800 text-red-200 px-4 py-3 rounded mb-4" role="alert">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{organization_user, provide_auth, FakeAuthApi};
    use crate::test_support::ssr::{render_to_string, render_with_fakes};

    #[test]
    fn shell_renders_sidebar_links_and_children() {
        let (html, nav) = render_with_fakes(FakeAuthApi::with_user(None), || {
            provide_auth(Some(organization_user()));
            view! { <OrganizationShell><div>"page-body"</div></OrganizationShell> }
        });
        assert!(html.contains("href=\"/organization/dashboard\""));
        assert!(html.contains("href=\"/organization/cases\""));
        assert!(html.contains("href=\"/organization/profile\""));
        assert!(html.contains("Organization Profile"));
        assert!(html.contains("page-body"));
        assert!(html.contains("Logout"));
        assert!(nav.pushes().is_empty());
    }

    #[test]
    fn header_shows_user_name() {
        let (html, _nav) = render_with_fakes(FakeAuthApi::with_user(None), || {
            provide_auth(Some(organization_user()));
            view! { <OrganizationShell><div>"page-body"</div></OrganizationShell> }
        });
        assert!(html.contains("Amani Legal Aid"));
    }

    #[test]
    fn sidebar_starts_open() {
        let (html, _nav) = render_with_fakes(FakeAuthApi::with_user(None), || {
            provide_auth(Some(organization_user()));
            view! { <OrganizationShell><div>"page-body"</div></OrganizationShell> }
        });
        assert!(html.contains("left-0"));
        assert!(html.contains("ml-64"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="Invalid credentials" />
                </div>
            }
        });
        assert!(html.contains("animate-spin"));
        assert!(html.contains("Invalid credentials"));
    }
}
