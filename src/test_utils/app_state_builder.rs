//! Test app state builder for HTTP-level testing.

use std::sync::Arc;

use axum::http::HeaderValue;
use url::Url;

use crate::{
    adapters::{http::app_state::AppState, persistence::waitlist::KeyValuePersistence},
    application::ports::key_value_store::KeyValueStore,
    domain::entities::waitlist_user::WaitlistUser,
    infra::config::{AppConfig, StorageBackend},
    test_utils::{FailingKeyValueStore, FixedReferralCodeGenerator, seeded_store_with_current},
    use_cases::waitlist::WaitlistUseCases,
};

/// Builder for creating `AppState` over an in-memory store.
///
/// # Example
///
/// ```ignore
/// let app_state = TestAppStateBuilder::new()
///     .with_user(create_test_user(|u| u.referral_code = "AAAAAAAA".into()))
///     .with_codes(&["NEWCODE1"])
///     .build();
/// ```
#[derive(Default)]
pub struct TestAppStateBuilder {
    users: Vec<WaitlistUser>,
    current_email: Option<String>,
    codes: Vec<String>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: WaitlistUser) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_current_email(mut self, email: &str) -> Self {
        self.current_email = Some(email.to_string());
        self
    }

    /// Referral codes handed to new registrants, in order.
    pub fn with_codes(mut self, codes: &[&str]) -> Self {
        self.codes.extend(codes.iter().map(|c| c.to_string()));
        self
    }

    pub fn build(self) -> AppState {
        let store = seeded_store_with_current(&self.users, self.current_email.as_deref());
        self.build_over(Arc::new(store))
    }

    /// State whose storage backend fails every call.
    pub fn build_with_failing_store(self) -> AppState {
        self.build_over(Arc::new(FailingKeyValueStore))
    }

    fn build_over(self, store: Arc<dyn KeyValueStore>) -> AppState {
        let config = test_config();
        let codes: Vec<&str> = self.codes.iter().map(String::as_str).collect();
        let waitlist_use_cases = WaitlistUseCases::new(
            Arc::new(KeyValuePersistence::new(store, &config.key_prefix)),
            Arc::new(FixedReferralCodeGenerator::new(&codes)),
            config.app_origin.clone(),
        );

        AppState {
            config: Arc::new(config),
            waitlist_use_cases: Arc::new(waitlist_use_cases),
        }
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        app_origin: Url::parse("http://localhost:3000").unwrap(),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        storage_backend: StorageBackend::Memory,
        redis_url: "redis://127.0.0.1:6379".to_string(),
        key_prefix: String::new(),
        log_file: None,
    }
}
