use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single waitlist registration.
///
/// Serialized with camelCase field names and `joinedAt` in epoch milliseconds,
/// which is the shape of the blob the landing page keeps in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistUser {
    pub email: String,
    /// 1-based queue rank, smaller is earlier.
    pub position: u32,
    pub referral_code: String,
    /// Raw code supplied at signup, kept even when it matched nobody.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    pub referral_count: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub joined_at: DateTime<Utc>,
}

impl WaitlistUser {
    pub fn new(
        email: impl Into<String>,
        position: u32,
        referral_code: impl Into<String>,
        referred_by: Option<String>,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            email: email.into(),
            position,
            referral_code: referral_code.into(),
            referred_by,
            referral_count: 0,
            joined_at,
        }
    }
}

/// Position change applied to a referrer after a successful referral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferralCredit {
    pub old_position: u32,
    pub new_position: u32,
    pub referral_count: u32,
}

/// Credits the user at `referrer_index` with one referral.
///
/// The referrer moves up one slot (never above 1). Any other user sitting
/// directly ahead of the referrer's old slot is pushed back into that slot.
/// Only that one slot is corrected; the rest of the ranking is left alone, so
/// positions may collide or leave gaps after interleaved referrals.
///
/// Returns `None` if `referrer_index` is out of bounds.
pub fn credit_referral(users: &mut [WaitlistUser], referrer_index: usize) -> Option<ReferralCredit> {
    let referrer = users.get_mut(referrer_index)?;
    let old_position = referrer.position;
    let new_position = old_position.saturating_sub(1).max(1);

    referrer.referral_count = referrer.referral_count.saturating_add(1);
    referrer.position = new_position;
    let referral_count = referrer.referral_count;

    if old_position > 1 {
        let ahead = old_position - 1;
        for (idx, user) in users.iter_mut().enumerate() {
            if idx != referrer_index && user.position == ahead {
                user.position = old_position;
            }
        }
    }

    Some(ReferralCredit {
        old_position,
        new_position,
        referral_count,
    })
}
