//! Fake port implementations for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    app_error::{AppError, AppResult},
    adapters::persistence::memory::InMemoryKeyValueStore,
    application::ports::{key_value_store::KeyValueStore, referral_code::ReferralCodeGenerator},
};

/// Hands out a scripted sequence of codes, then `FAKE0000`, `FAKE0001`, ...
#[derive(Default)]
pub struct FixedReferralCodeGenerator {
    queued: Mutex<VecDeque<String>>,
    fallback_counter: Mutex<u32>,
}

impl FixedReferralCodeGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            queued: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            fallback_counter: Mutex::new(0),
        }
    }
}

impl ReferralCodeGenerator for FixedReferralCodeGenerator {
    fn generate(&self) -> String {
        if let Some(code) = self.queued.lock().unwrap().pop_front() {
            return code;
        }
        let mut counter = self.fallback_counter.lock().unwrap();
        let code = format!("FAKE{:04}", *counter);
        *counter += 1;
        code
    }
}

/// Key-value store whose backend is always down.
#[derive(Default)]
pub struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::Storage("backend unavailable".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::Storage("backend unavailable".into()))
    }
}

/// In-memory store whose writes fail for keys ending in `failing_suffix`.
/// Reads and all other writes go through.
pub struct KeyValueStoreFailingOn {
    inner: InMemoryKeyValueStore,
    failing_suffix: String,
}

impl KeyValueStoreFailingOn {
    pub fn new(inner: InMemoryKeyValueStore, failing_suffix: &str) -> Self {
        Self {
            inner,
            failing_suffix: failing_suffix.to_string(),
        }
    }
}

#[async_trait]
impl KeyValueStore for KeyValueStoreFailingOn {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        if key.ends_with(&self.failing_suffix) {
            return Err(AppError::Storage("down".into()));
        }
        self.inner.set(key, value).await
    }
}
