//! Application state for the Statutory Entitlement Engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::models::StatutoryLimitEntry;

/// Shared application state.
///
/// Holds the statutory limit table, loaded once and shared read-only by
/// every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The loaded statutory limit configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the statutory limit entries handed to the calculators.
    pub fn limits(&self) -> &[StatutoryLimitEntry] {
        self.config.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_same_table() {
        let state = AppState::new(ConfigLoader::load("./config/rps").unwrap());
        let cloned = state.clone();
        assert!(std::ptr::eq(state.limits(), cloned.limits()));
    }
}
