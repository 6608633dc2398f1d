use leptos::*;
use leptos_meta::provide_meta_context;
use leptos_router::*;
use std::rc::Rc;

use crate::{
    pages::{
        login::LoginPage,
        organization::{CasesPage, DashboardPage, OrganizationLayout, ProfilePage},
    },
    state::auth::AuthProvider,
};

pub const LOGIN_PATH: &str = "/auth/login";
pub const ORGANIZATION_HOME_PATH: &str = "/organization/dashboard";

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    LOGIN_PATH,
    "/organization/dashboard",
    "/organization/cases",
    "/organization/profile",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    "/organization/dashboard",
    "/organization/cases",
    "/organization/profile",
];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", LOGIN_PATH];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

pub const ORGANIZATION_NAV: &[NavItem] = &[
    NavItem {
        label: "Dashboard",
        href: "/organization/dashboard",
    },
    NavItem {
        label: "Cases",
        href: "/organization/cases",
    },
    NavItem {
        label: "Organization Profile",
        href: "/organization/profile",
    },
];

/// Client-side navigation sink.
pub trait Navigate {
    fn push(&self, path: &str);
}

impl<F: Fn(&str)> Navigate for F {
    fn push(&self, path: &str) {
        self(path)
    }
}

#[derive(Clone)]
pub struct Navigator(Rc<dyn Navigate>);

impl Navigator {
    pub fn new(inner: impl Navigate + 'static) -> Self {
        Self(Rc::new(inner))
    }

    pub fn push(&self, path: &str) {
        log::debug!("navigating to {}", path);
        self.0.push(path);
    }
}

/// A navigator from context when one was provided, else the router's own.
pub fn use_navigator() -> Navigator {
    use_context::<Navigator>().unwrap_or_else(|| {
        let navigate = use_navigate();
        Navigator::new(move |path: &str| navigate(path, NavigateOptions::default()))
    })
}

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(crate::api::ApiClient::new());
    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=|| view! { <Redirect path=ORGANIZATION_HOME_PATH/> }/>
                    <Route path=LOGIN_PATH view=LoginPage/>
                    <Route path="/organization" view=OrganizationLayout>
                        <Route path="dashboard" view=DashboardPage/>
                        <Route path="cases" view=CasesPage/>
                        <Route path="profile" view=ProfilePage/>
                        <Route path="" view=|| view! { <Redirect path=ORGANIZATION_HOME_PATH/> }/>
                    </Route>
                </Routes>
            </Router>
        </AuthProvider>
    }
}
