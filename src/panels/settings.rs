use std::sync::Arc;

use crate::api::SettingsApi;
use crate::error::ApiError;
use crate::models::UnitConfig;
use crate::validate;

use super::SubmitOutcome;

/// Unit-configuration panel: the singleton min/max units policy.
pub struct SettingsPanel<A: SettingsApi + ?Sized> {
    api: Arc<A>,
    config: UnitConfig,
    submitting: bool,
}

impl<A: SettingsApi + ?Sized> SettingsPanel<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            config: UnitConfig::default(),
            submitting: false,
        }
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.config = self.api.unit_config().await?;
        Ok(())
    }

    pub fn config(&self) -> UnitConfig {
        self.config
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and save a candidate policy; the saved value returned by the
    /// backend becomes the new state.
    pub async fn save(&mut self, candidate: UnitConfig) -> Result<SubmitOutcome, ApiError> {
        if self.submitting {
            return Ok(SubmitOutcome::Blocked);
        }
        let errors = validate::validate_unit_config(&candidate);
        if !errors.is_empty() {
            return Ok(SubmitOutcome::Invalid(errors));
        }

        self.submitting = true;
        let result = self.api.save_unit_config(&candidate).await;
        self.submitting = false;

        match result {
            Ok(saved) => {
                self.config = saved;
                Ok(SubmitOutcome::Saved)
            }
            Err(err) => Err(err),
        }
    }
}
