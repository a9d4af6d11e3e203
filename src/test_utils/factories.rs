//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    adapters::persistence::{
        memory::InMemoryKeyValueStore,
        waitlist::{CURRENT_EMAIL_KEY, USERS_KEY},
    },
    domain::entities::waitlist_user::WaitlistUser,
};

/// Create a test waitlist user with sensible defaults.
pub fn create_test_user(overrides: impl FnOnce(&mut WaitlistUser)) -> WaitlistUser {
    let mut user = WaitlistUser::new("test@example.com", 1, "TESTCODE", None, test_datetime());
    overrides(&mut user);
    user
}

/// Standard test datetime (2024-01-01 12:00:00 UTC).
pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// In-memory store holding `users` under the unprefixed collection key.
pub fn seeded_store(users: &[WaitlistUser]) -> InMemoryKeyValueStore {
    seeded_store_with_current(users, None)
}

/// Like [`seeded_store`], optionally also setting the current-user pointer.
pub fn seeded_store_with_current(
    users: &[WaitlistUser],
    current_email: Option<&str>,
) -> InMemoryKeyValueStore {
    let mut entries = Vec::new();
    if !users.is_empty() {
        entries.push((
            USERS_KEY.to_string(),
            serde_json::to_string(users).unwrap(),
        ));
    }
    if let Some(email) = current_email {
        entries.push((CURRENT_EMAIL_KEY.to_string(), email.to_string()));
    }
    InMemoryKeyValueStore::with_entries(entries)
}
