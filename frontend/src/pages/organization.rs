use crate::{
    api::Role,
    components::{guard::RequireRole, layout::OrganizationShell},
    state::{access::AllowedRoles, auth::use_auth},
};
use leptos::*;
use leptos_meta::Title;
use leptos_router::Outlet;

/// Parent route for everything under `/organization`.
#[component]
pub fn OrganizationLayout() -> impl IntoView {
    view! {
        <Title text="Ushuari | Organization" />
        <RequireRole allowed=AllowedRoles::only(Role::Organization)>
            {|| view! { <OrganizationShell><Outlet /></OrganizationShell> }}
        </RequireRole>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let (auth, _) = use_auth();
    let greeting = move || {
        auth.with(|state| match &state.user {
            Some(user) => format!("Welcome back, {}", user.name),
            None => "Welcome back".to_string(),
        })
    };
    view! {
        <Title text="Ushuari | Dashboard" />
        <section>
            <h1 class="text-2xl font-semibold text-white">"Dashboard"</h1>
            <p class="mt-2 text-emerald-200">{greeting}</p>
        </section>
    }
}

#[component]
pub fn CasesPage() -> impl IntoView {
    view! {
        <Title text="Ushuari | Cases" />
        <section>
            <h1 class="text-2xl font-semibold text-white">"Cases"</h1>
            <p class="mt-2 text-emerald-200">"No cases have been assigned to your organization yet."</p>
        </section>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let (auth, _) = use_auth();
    let field = move |pick: fn(&crate::api::UserResponse) -> String| {
        move || {
            auth.with(|state| state.user.as_ref().map(pick).unwrap_or_else(|| "-".into()))
        }
    };
    view! {
        <Title text="Ushuari | Organization Profile" />
        <section>
            <h1 class="text-2xl font-semibold text-white">"Organization Profile"</h1>
            <dl class="mt-4 grid grid-cols-1 gap-4 sm:grid-cols-2 text-emerald-100">
                <div>
                    <dt class="text-sm text-emerald-300">"Name"</dt>
                    <dd>{field(|u| u.name.clone())}</dd>
                </div>
                <div>
                    <dt class="text-sm text-emerald-300">"Email"</dt>
                    <dd>{field(|u| u.email.clone().unwrap_or_else(|| "-".into()))}</dd>
                </div>
                <div>
                    <dt class="text-sm text-emerald-300">"Role"</dt>
                    <dd>{field(|u| u.role.to_string())}</dd>
                </div>
            </dl>
        </section>
    }
}
