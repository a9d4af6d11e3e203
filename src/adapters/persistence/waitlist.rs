use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::key_value_store::KeyValueStore,
    domain::entities::waitlist_user::WaitlistUser,
    use_cases::waitlist::WaitlistRepo,
};

pub const USERS_KEY: &str = "waitlist_data";
pub const CURRENT_EMAIL_KEY: &str = "waitlist_email";

const MAX_JSON_LOG_LEN: usize = 200;

/// Waitlist persisted as two keys of a [`KeyValueStore`]: the whole user
/// collection as one JSON array, and the current user's email as plain text.
#[derive(Clone)]
pub struct KeyValuePersistence {
    store: Arc<dyn KeyValueStore>,
    users_key: String,
    current_email_key: String,
}

impl KeyValuePersistence {
    /// `prefix` is prepended to both keys so several waitlists can share a store.
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: &str) -> Self {
        Self {
            store,
            users_key: format!("{prefix}{USERS_KEY}"),
            current_email_key: format!("{prefix}{CURRENT_EMAIL_KEY}"),
        }
    }

    pub fn users_key(&self) -> &str {
        &self.users_key
    }

    pub fn current_email_key(&self) -> &str {
        &self.current_email_key
    }
}

/// Decode the stored collection, falling back to empty on corrupt data.
fn parse_users(raw: &str, key: &str) -> Vec<WaitlistUser> {
    serde_json::from_str(raw).unwrap_or_else(|err| {
        // Truncate raw JSON to prevent log bloat from large collections
        let truncated: String = if raw.chars().count() > MAX_JSON_LOG_LEN {
            format!("{}...", raw.chars().take(MAX_JSON_LOG_LEN).collect::<String>())
        } else {
            raw.to_owned()
        };

        tracing::warn!(
            key = key,
            raw_json = %truncated,
            error = %err,
            "Failed to parse waitlist data, treating as empty"
        );
        Vec::new()
    })
}

#[async_trait]
impl WaitlistRepo for KeyValuePersistence {
    async fn load_all(&self) -> AppResult<Vec<WaitlistUser>> {
        Ok(self
            .store
            .get(&self.users_key)
            .await?
            .map(|raw| parse_users(&raw, &self.users_key))
            .unwrap_or_default())
    }

    async fn save_all(&self, users: &[WaitlistUser]) -> AppResult<()> {
        let json = serde_json::to_string(users)
            .map_err(|e| AppError::Internal(format!("Failed to serialize waitlist: {e}")))?;
        self.store.set(&self.users_key, &json).await
    }

    async fn current_email(&self) -> AppResult<Option<String>> {
        Ok(self
            .store
            .get(&self.current_email_key)
            .await?
            .filter(|email| !email.is_empty()))
    }

    async fn set_current_email(&self, email: &str) -> AppResult<()> {
        self.store.set(&self.current_email_key, email).await
    }
}
