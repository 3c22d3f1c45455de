use std::sync::Arc;

use tracing::info;

use crate::api::AuthApi;
use crate::error::ApiError;
use crate::session::{self, SharedSession};
use crate::validate;

use super::SubmitOutcome;

/// Login flow: validate credentials locally, call the auth endpoint, and
/// populate the session on success.
pub struct LoginFlow<A: AuthApi + ?Sized> {
    api: Arc<A>,
    session: SharedSession,
    submitting: bool,
}

impl<A: AuthApi + ?Sized> LoginFlow<A> {
    pub fn new(api: Arc<A>, session: SharedSession) -> Self {
        Self {
            api,
            session,
            submitting: false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<SubmitOutcome, ApiError> {
        if self.submitting {
            return Ok(SubmitOutcome::Blocked);
        }
        let errors = validate::validate_login(username, password);
        if !errors.is_empty() {
            return Ok(SubmitOutcome::Invalid(errors));
        }

        self.submitting = true;
        let result = self.api.login(username, password).await;
        self.submitting = false;

        match result {
            Ok(response) => {
                info!(username, role = ?response.user.role, "login succeeded");
                session::write(&self.session).login(response);
                Ok(SubmitOutcome::Saved)
            }
            Err(ApiError::Status { message, .. }) => Ok(SubmitOutcome::Rejected(message)),
            Err(err) => Err(err),
        }
    }

    pub fn logout(&self) {
        session::write(&self.session).logout();
    }
}
