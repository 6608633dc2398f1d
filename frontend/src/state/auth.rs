use crate::{
    api::{ApiClient, ApiError, AuthApi, LoginRequest, UserResponse},
    router::{use_navigator, Navigator, LOGIN_PATH},
    state::access::{decide, AccessError, AccessOutcome, AllowedRoles, CheckTicket},
};
use leptos::*;
use std::rc::Rc;

pub type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserResponse>,
    /// Bumped every time a login establishes a new principal.
    pub epoch: u64,
}

#[derive(Clone)]
pub struct AuthApiHandle(Rc<dyn AuthApi>);

impl AuthApiHandle {
    pub fn new(api: impl AuthApi + 'static) -> Self {
        Self(Rc::new(api))
    }

    pub fn api(&self) -> &dyn AuthApi {
        self.0.as_ref()
    }
}

fn create_auth_context() -> AuthContext {
    create_signal(AuthState {
        user: ApiClient::stored_user(),
        epoch: 0,
    })
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub fn use_auth_api() -> AuthApiHandle {
    use_context::<AuthApiHandle>().unwrap_or_else(|| {
        AuthApiHandle::new(use_context::<ApiClient>().unwrap_or_else(ApiClient::new))
    })
}

/// Resolves the current principal and checks it against `allowed`.
///
/// Every denial (no session, wrong role, failed check) navigates to the
/// login route exactly once; a grant never navigates. Returns `None`, with no
/// store update and no navigation, when `ticket` went stale while the check
/// was in flight.
pub async fn ensure_role_access(
    api: &dyn AuthApi,
    navigator: &Navigator,
    allowed: &AllowedRoles,
    ticket: &CheckTicket,
    set_auth_state: WriteSignal<AuthState>,
) -> Option<AccessOutcome> {
    let principal = api.current_user().await;

    if !ticket.is_current() {
        log::debug!("session check outlived its view; dropping the result");
        return None;
    }

    match &principal {
        Ok(user) => {
            let user = user.clone();
            set_auth_state.update(|state| state.user = user);
        }
        Err(err) => log::warn!("session check failed: {}", err),
    }

    let outcome = decide(principal, allowed);
    if let AccessOutcome::Denied(reason) = &outcome {
        log::info!("access denied ({}), redirecting to {}", reason, LOGIN_PATH);
        navigator.push(LOGIN_PATH);
    }
    Some(outcome)
}

pub async fn login_request(
    request: LoginRequest,
    api: &dyn AuthApi,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<UserResponse, ApiError> {
    let user = api.login(request).await?.user;
    log::info!("signed in as {} ({})", user.name, user.role);
    set_auth_state.update(|state| {
        state.user = Some(user.clone());
        state.epoch += 1;
    });
    Ok(user)
}

/// Ends the session and lands on the login route, whatever the server said.
pub async fn logout(
    api: &dyn AuthApi,
    navigator: &Navigator,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), AccessError> {
    let result = api.logout().await;

    set_auth_state.update(|state| state.user = None);
    navigator.push(LOGIN_PATH);

    result.map_err(|err| {
        log::error!("logout request failed: {}", err);
        AccessError::LogoutFailed(err.error)
    })
}

pub fn use_login_action() -> Action<LoginRequest, Result<UserResponse, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_auth_api();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { login_request(payload, api.api(), set_auth).await }
    })
}

pub fn use_logout_action() -> Action<(), Result<(), AccessError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_auth_api();
    let navigator = use_navigator();

    create_action(move |_: &()| {
        let api = api.clone();
        let navigator = navigator.clone();
        async move { logout(api.api(), &navigator, set_auth).await }
    })
}
