//! Application configuration and the root-owned context.

use crate::navigation::RoutingGuard;
use crate::store::ModeFacilityStore;
use crate::views::{AccessView, EntitlementsView, OnboardingInput, OnboardingView};
use serde::{Deserialize, Serialize};
use verdant_core::config::LOG_LEVELS;
use verdant_core::{AccountMode, Result, User, VerdantConfig, VerdantError};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Mode the store starts in
    pub default_mode: AccountMode,
    /// Log filter used by hosts that install a subscriber
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_mode: AccountMode::Commercial,
            log_level: "info".to_string(),
        }
    }
}

impl VerdantConfig for AppConfig {
    const ENV_PREFIX: &'static str = "VERDANT_";

    fn set_from_string(&mut self, key: &str, value: &str) -> Result<bool> {
        match key {
            "default_mode" => self.default_mode = value.parse()?,
            "log_level" => self.log_level = value.trim().to_ascii_lowercase(),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(VerdantError::config(format!(
                "log_level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }
        Ok(())
    }
}

/// Application context owned by the host's root.
///
/// Holds the configuration and the mode/facility store. Pass it by
/// reference to consumers; separate contexts never share state.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: AppConfig,
    store: ModeFacilityStore,
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppContext {
    /// Create a context whose store starts in `config.default_mode`.
    pub fn new(config: AppConfig) -> Self {
        let store = ModeFacilityStore::new(config.default_mode);
        Self { config, store }
    }

    /// Configuration this context was built from.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Mode and facility store.
    pub fn store(&self) -> &ModeFacilityStore {
        &self.store
    }

    /// Access for `user` in the store's current mode.
    pub fn access_view(&self, user: &User) -> AccessView {
        let user = user.clone().in_mode(self.store.mode());
        AccessView::for_user(&user)
    }

    /// Entitlements for `user`'s plan.
    pub fn entitlements_view(&self, user: &User) -> EntitlementsView {
        EntitlementsView::for_plan(user.plan)
    }

    /// Onboarding stage for the given counts.
    pub fn onboarding_view(&self, input: &OnboardingInput) -> OnboardingView {
        OnboardingView::from_input(input)
    }

    /// Fresh guard for a section requiring `required`.
    pub fn guard(&self, required: AccountMode) -> RoutingGuard {
        RoutingGuard::new(required)
    }
}
