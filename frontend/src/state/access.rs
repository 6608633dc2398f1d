//! Role-gate vocabulary shared by the auth store and the route guard.

use crate::api::{ApiError, Role, UserResponse};
use std::{cell::Cell, rc::Rc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("at least one role must be allowed")]
    EmptyRoleSet,
    #[error("no authenticated session")]
    Unauthenticated,
    #[error("role `{role}` may not access this area")]
    WrongRole { role: Role },
    #[error("session check failed: {0}")]
    SessionCheckFailed(String),
    #[error("logout failed: {0}")]
    LogoutFailed(String),
}

/// Non-empty set of roles permitted to view a guarded subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedRoles(Vec<Role>);

impl AllowedRoles {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Result<Self, AccessError> {
        let mut unique: Vec<Role> = Vec::new();
        for role in roles {
            if role != Role::Unknown && !unique.contains(&role) {
                unique.push(role);
            }
        }
        if unique.is_empty() {
            return Err(AccessError::EmptyRoleSet);
        }
        Ok(Self(unique))
    }

    pub fn only(role: Role) -> Self {
        Self(vec![role])
    }

    pub fn permits(&self, role: Role) -> bool {
        role != Role::Unknown && self.0.contains(&role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessOutcome {
    Granted(UserResponse),
    Denied(AccessError),
}

/// What a guarded view shows: a spinner until the check resolves, then
/// either the protected content or nothing while the redirect happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AccessState {
    #[default]
    Loading,
    Granted(UserResponse),
    Denied(AccessError),
}

impl From<AccessOutcome> for AccessState {
    fn from(outcome: AccessOutcome) -> Self {
        match outcome {
            AccessOutcome::Granted(user) => AccessState::Granted(user),
            AccessOutcome::Denied(reason) => AccessState::Denied(reason),
        }
    }
}

pub fn decide(
    principal: Result<Option<UserResponse>, ApiError>,
    allowed: &AllowedRoles,
) -> AccessOutcome {
    match principal {
        Err(err) => AccessOutcome::Denied(AccessError::SessionCheckFailed(err.error)),
        Ok(None) => AccessOutcome::Denied(AccessError::Unauthenticated),
        Ok(Some(user)) if allowed.permits(user.role) => AccessOutcome::Granted(user),
        Ok(Some(user)) => AccessOutcome::Denied(AccessError::WrongRole { role: user.role }),
    }
}

#[derive(Debug, Default)]
struct Liveness {
    unmounted: Cell<bool>,
    generation: Cell<u64>,
}

/// Tracks whether the view that started a session check is still mounted.
#[derive(Debug, Clone, Default)]
pub struct MountLiveness(Rc<Liveness>);

impl MountLiveness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new check; any ticket handed out earlier becomes stale.
    pub fn begin(&self) -> CheckTicket {
        let next = self.0.generation.get() + 1;
        self.0.generation.set(next);
        CheckTicket {
            liveness: self.clone(),
            generation: next,
        }
    }

    pub fn unmount(&self) {
        self.0.unmounted.set(true);
    }

    pub fn is_mounted(&self) -> bool {
        !self.0.unmounted.get()
    }
}

#[derive(Debug, Clone)]
pub struct CheckTicket {
    liveness: MountLiveness,
    generation: u64,
}

impl CheckTicket {
    pub fn is_current(&self) -> bool {
        self.liveness.is_mounted() && self.liveness.0.generation.get() == self.generation
    }
}
