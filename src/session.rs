use std::sync::{Arc, PoisonError, RwLock};

use crate::models::{LoginResponse, User};

pub const DEFAULT_TAB: &str = "course-management";

/// Explicit session object passed to every component that needs it, created at
/// login and cleared at logout. Replaces ambient key-value storage so the
/// token's lifecycle is visible at the call sites.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    active_tab: Option<String>,
}

pub type SharedSession = Arc<RwLock<Session>>;

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSession {
        Arc::new(RwLock::new(Self::new()))
    }

    pub fn login(&mut self, response: LoginResponse) {
        self.token = Some(response.access_token);
        self.user = Some(response.user);
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
        self.active_tab = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_active_tab(&mut self, tab: impl Into<String>) {
        self.active_tab = Some(tab.into());
    }

    pub fn active_tab(&self) -> &str {
        self.active_tab.as_deref().unwrap_or(DEFAULT_TAB)
    }
}

/// Read a shared session without panicking on a poisoned lock; a writer that
/// panicked mid-update leaves last-write-wins data, which is all this store
/// promises.
pub fn read(session: &SharedSession) -> std::sync::RwLockReadGuard<'_, Session> {
    session.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write(session: &SharedSession) -> std::sync::RwLockWriteGuard<'_, Session> {
    session.write().unwrap_or_else(PoisonError::into_inner)
}
