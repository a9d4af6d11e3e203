use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    application::{ports::referral_code::ReferralCodeGenerator, validators::is_valid_email},
    domain::entities::waitlist_user::{WaitlistUser, credit_referral},
};

const MAX_REFERRAL_CODE_ATTEMPTS: usize = 32;

#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    /// All users in insertion order. Absent or unreadable data loads as empty.
    async fn load_all(&self) -> AppResult<Vec<WaitlistUser>>;
    /// Replaces the stored collection wholesale.
    async fn save_all(&self, users: &[WaitlistUser]) -> AppResult<()>;
    async fn current_email(&self) -> AppResult<Option<String>>;
    async fn set_current_email(&self, email: &str) -> AppResult<()>;
}

pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
    codes: Arc<dyn ReferralCodeGenerator>,
    app_origin: Url,
    // Held across every read-modify-write of the stored collection.
    // Only serializes callers within this process.
    write_lock: Mutex<()>,
}

impl WaitlistUseCases {
    pub fn new(
        repo: Arc<dyn WaitlistRepo>,
        codes: Arc<dyn ReferralCodeGenerator>,
        app_origin: Url,
    ) -> Self {
        Self {
            repo,
            codes,
            app_origin,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn load_all(&self) -> AppResult<Vec<WaitlistUser>> {
        self.repo.load_all().await
    }

    pub async fn save_all(&self, users: &[WaitlistUser]) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        self.repo.save_all(users).await
    }

    /// The user recorded by the most recent successful registration, if it
    /// still exists in the collection.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> AppResult<Option<WaitlistUser>> {
        let Some(email) = self.repo.current_email().await? else {
            return Ok(None);
        };
        let users = self.repo.load_all().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    #[instrument(skip(self))]
    pub async fn find_by_referral_code(&self, code: &str) -> AppResult<Option<WaitlistUser>> {
        let users = self.repo.load_all().await?;
        Ok(users.into_iter().find(|u| u.referral_code == code))
    }

    /// Adds `email` to the end of the waitlist.
    ///
    /// A referral code that matches an existing user credits that user and
    /// moves them up one slot. A code that matches nobody is not an error: the
    /// registrant is placed last as usual and the code is still recorded in
    /// `referred_by`.
    #[instrument(skip(self))]
    pub async fn register(
        &self,
        email: &str,
        referral_code: Option<&str>,
    ) -> AppResult<WaitlistUser> {
        if !is_valid_email(email) {
            return Err(AppError::InvalidEmail);
        }
        let referral_code = referral_code.filter(|code| !code.is_empty());

        let _guard = self.write_lock.lock().await;
        let mut users = self.repo.load_all().await?;

        if users.iter().any(|u| u.email == email) {
            return Err(AppError::DuplicateEmail);
        }

        let position = u32::try_from(users.len() + 1)
            .map_err(|_| AppError::Internal("Waitlist position overflow".into()))?;

        if let Some(code) = referral_code {
            match users.iter().position(|u| u.referral_code == code) {
                Some(idx) => {
                    if let Some(credit) = credit_referral(&mut users, idx) {
                        info!(
                            referrer = %users[idx].email,
                            old_position = credit.old_position,
                            new_position = credit.new_position,
                            referral_count = credit.referral_count,
                            "Referral credited"
                        );
                    }
                }
                None => debug!(referral_code = code, "Referral code matched no user"),
            }
        }

        let new_code = self.fresh_referral_code(&users)?;
        let user = WaitlistUser::new(
            email,
            position,
            new_code,
            referral_code.map(str::to_owned),
            Utc::now(),
        );

        users.push(user.clone());
        self.repo.save_all(&users).await?;
        // The collection is committed at this point; a pointer failure is
        // logged, not returned.
        if let Err(err) = self.repo.set_current_email(email).await {
            warn!(email = %email, error = %err, "Failed to record current waitlist user");
        }

        info!(
            email = %user.email,
            position = user.position,
            referred_by = ?user.referred_by,
            "Joined waitlist"
        );

        Ok(user)
    }

    /// Shareable link that pre-fills `code` on the landing page.
    pub fn referral_link(&self, code: &str) -> String {
        let mut url = self.app_origin.clone();
        url.set_query(None);
        url.query_pairs_mut().append_pair("ref", code);
        url.to_string()
    }

    fn fresh_referral_code(&self, users: &[WaitlistUser]) -> AppResult<String> {
        for _ in 0..MAX_REFERRAL_CODE_ATTEMPTS {
            let code = self.codes.generate();
            if !users.iter().any(|u| u.referral_code == code) {
                return Ok(code);
            }
            debug!(code = %code, "Referral code collision, regenerating");
        }
        Err(AppError::Internal(
            "Could not generate a unique referral code".into(),
        ))
    }
}
