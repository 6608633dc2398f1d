#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{ApiError, AuthApi, LoginRequest, LoginResponse, Role, UserResponse};
    use crate::router::Navigator;
    use crate::state::auth::{AuthApiHandle, AuthState};
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use leptos::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    pub fn organization_user() -> UserResponse {
        UserResponse {
            id: "u-org".into(),
            name: "Amani Legal Aid".into(),
            email: Some("ops@amani.org".into()),
            role: Role::Organization,
        }
    }

    pub fn client_user() -> UserResponse {
        UserResponse {
            id: "u-client".into(),
            name: "Baraka".into(),
            email: None,
            role: Role::Client,
        }
    }

    pub fn provide_auth(
        user: Option<UserResponse>,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(AuthState {
            user,
            epoch: 0,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }

    /// Provides a recording navigator and a fake session API as context.
    pub fn provide_fakes(api: FakeAuthApi) -> RecordingNavigator {
        let nav = RecordingNavigator::default();
        provide_context(nav.navigator());
        provide_context(AuthApiHandle::new(api));
        nav
    }

    type Principal = Result<Option<UserResponse>, ApiError>;

    pub struct FakeAuthApi {
        current: Principal,
        pending: RefCell<Option<oneshot::Receiver<Principal>>>,
        login: Option<Result<LoginResponse, ApiError>>,
        logout: Result<(), ApiError>,
        current_calls: Cell<usize>,
        logout_calls: Cell<usize>,
    }

    impl FakeAuthApi {
        pub fn with_user(user: Option<UserResponse>) -> Self {
            Self {
                current: Ok(user),
                pending: RefCell::new(None),
                login: None,
                logout: Ok(()),
                current_calls: Cell::new(0),
                logout_calls: Cell::new(0),
            }
        }

        pub fn failing(error: ApiError) -> Self {
            Self {
                current: Err(error),
                ..Self::with_user(None)
            }
        }

        /// The first `current_user` call waits until the sender fires.
        pub fn pending() -> (Self, oneshot::Sender<Principal>) {
            let (tx, rx) = oneshot::channel();
            let api = Self::with_user(None);
            *api.pending.borrow_mut() = Some(rx);
            (api, tx)
        }

        pub fn login_returns(mut self, result: Result<LoginResponse, ApiError>) -> Self {
            self.login = Some(result);
            self
        }

        pub fn logout_fails(mut self, error: ApiError) -> Self {
            self.logout = Err(error);
            self
        }

        pub fn current_calls(&self) -> usize {
            self.current_calls.get()
        }

        pub fn logout_calls(&self) -> usize {
            self.logout_calls.get()
        }
    }

    #[async_trait(?Send)]
    impl AuthApi for FakeAuthApi {
        async fn current_user(&self) -> Result<Option<UserResponse>, ApiError> {
            self.current_calls.set(self.current_calls.get() + 1);
            let pending = self.pending.borrow_mut().take();
            match pending {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApiError::unknown("check cancelled"))),
                None => self.current.clone(),
            }
        }

        async fn login(&self, _request: LoginRequest) -> Result<LoginResponse, ApiError> {
            self.login
                .clone()
                .unwrap_or_else(|| Err(ApiError::unknown("login not scripted")))
        }

        async fn logout(&self) -> Result<(), ApiError> {
            self.logout_calls.set(self.logout_calls.get() + 1);
            self.logout.clone()
        }
    }

    #[derive(Clone, Default)]
    pub struct RecordingNavigator(Rc<RefCell<Vec<String>>>);

    impl RecordingNavigator {
        pub fn navigator(&self) -> Navigator {
            let log = self.0.clone();
            Navigator::new(move |path: &str| log.borrow_mut().push(path.to_string()))
        }

        pub fn pushes(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }
}
