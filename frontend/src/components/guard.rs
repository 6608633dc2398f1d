use crate::{
    api::UserResponse,
    components::layout::LoadingSpinner,
    router::{use_navigator, Navigator},
    state::{
        access::{AccessState, AllowedRoles, CheckTicket, MountLiveness},
        auth::{ensure_role_access, use_auth, use_auth_api, AuthApiHandle, AuthState},
    },
};
use leptos::*;

/// Checks the session against `allowed` once per mount (and again after a
/// new login) and only then lets `children` render.
#[component]
pub fn RequireRole(allowed: AllowedRoles, children: ChildrenFn) -> impl IntoView {
    let (auth, set_auth) = use_auth();
    let api = use_auth_api();
    let navigator = use_navigator();
    let (access, set_access) = create_signal(AccessState::Loading);

    let liveness = MountLiveness::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || liveness.unmount()
    });

    let epoch = create_memo(move |_| auth.with(|state| state.epoch));
    let allowed_for_check = allowed.clone();
    create_effect(move |_| {
        let _ = epoch.get();
        let ticket = liveness.begin();
        set_access.set(AccessState::Loading);
        spawn_local(run_check(
            api.clone(),
            navigator.clone(),
            allowed_for_check.clone(),
            ticket,
            set_auth,
            set_access,
        ));
    });

    view! {
        <AccessGate state=access allowed=allowed>
            {children()}
        </AccessGate>
    }
}

/// One guard run: resolves the session and publishes the outcome to
/// `set_access`. A stale `ticket` leaves `set_access` untouched.
pub(crate) async fn run_check(
    api: AuthApiHandle,
    navigator: Navigator,
    allowed: AllowedRoles,
    ticket: CheckTicket,
    set_auth: WriteSignal<AuthState>,
    set_access: WriteSignal<AccessState>,
) {
    if let Some(outcome) =
        ensure_role_access(api.api(), &navigator, &allowed, &ticket, set_auth).await
    {
        set_access.set(outcome.into());
    }
}

/// Renders `children` only while the store still holds the granted,
/// permitted user.
#[component]
pub fn AccessGate(
    #[prop(into)] state: Signal<AccessState>,
    allowed: AllowedRoles,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth, _) = use_auth();
    let allowed = store_value(allowed);
    let visible = create_memo(move |_| {
        state.with(|access| {
            auth.with(|session| {
                allowed.with_value(|roles| {
                    should_render_protected(access, session.user.as_ref(), roles)
                })
            })
        })
    });
    let show_spinner =
        create_memo(move |_| state.with(|access| !matches!(access, AccessState::Denied(_))));

    view! {
        <Show
            when=move || visible.get()
            fallback=move || {
                if show_spinner.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_protected(
    access: &AccessState,
    session_user: Option<&UserResponse>,
    allowed: &AllowedRoles,
) -> bool {
    match access {
        AccessState::Granted(granted) => session_user
            .is_some_and(|user| user.id == granted.id && allowed.permits(user.role)),
        _ => false,
    }
}
