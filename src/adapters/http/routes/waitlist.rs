//! Waitlist routes consumed by the landing page.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    domain::entities::waitlist_user::WaitlistUser,
    use_cases::waitlist::WaitlistUseCases,
};

#[derive(Deserialize)]
struct JoinWaitlistPayload {
    email: String,
    #[serde(default)]
    referral_code: Option<String>,
}

/// Query string of the landing page URL a referral link points at.
#[derive(Deserialize)]
struct ReferralQuery {
    #[serde(rename = "ref")]
    referral_code: Option<String>,
}

#[derive(Serialize)]
struct WaitlistEntryResponse {
    email: String,
    position: u32,
    referral_code: String,
    referred_by: Option<String>,
    referral_count: u32,
    joined_at: DateTime<Utc>,
    referral_link: String,
}

impl WaitlistEntryResponse {
    fn from_user(user: WaitlistUser, waitlist: &WaitlistUseCases) -> Self {
        let referral_link = waitlist.referral_link(&user.referral_code);
        Self {
            email: user.email,
            position: user.position,
            referral_code: user.referral_code,
            referred_by: user.referred_by,
            referral_count: user.referral_count,
            joined_at: user.joined_at,
            referral_link,
        }
    }
}

#[derive(Serialize)]
struct WaitlistListResponse {
    total: usize,
    users: Vec<WaitlistEntryResponse>,
}

/// POST /api/waitlist
/// Registers an email. The referral code comes from the body, or from `?ref=`.
async fn join_waitlist(
    State(waitlist): State<Arc<WaitlistUseCases>>,
    Query(query): Query<ReferralQuery>,
    Json(payload): Json<JoinWaitlistPayload>,
) -> AppResult<impl IntoResponse> {
    let email = payload.email.trim();
    let referral_code = payload.referral_code.or(query.referral_code);

    let user = waitlist.register(email, referral_code.as_deref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(WaitlistEntryResponse::from_user(user, &waitlist)),
    ))
}

/// GET /api/waitlist
async fn list_waitlist(
    State(waitlist): State<Arc<WaitlistUseCases>>,
) -> AppResult<impl IntoResponse> {
    let users = waitlist.load_all().await?;

    Ok(Json(WaitlistListResponse {
        total: users.len(),
        users: users
            .into_iter()
            .map(|u| WaitlistEntryResponse::from_user(u, &waitlist))
            .collect(),
    }))
}

/// GET /api/waitlist/me
async fn get_current_user(
    State(waitlist): State<Arc<WaitlistUseCases>>,
) -> AppResult<impl IntoResponse> {
    let user = waitlist.current_user().await?.ok_or(AppError::NotFound)?;
    Ok(Json(WaitlistEntryResponse::from_user(user, &waitlist)))
}

/// GET /api/waitlist/referrals/{code}
async fn get_by_referral_code(
    State(waitlist): State<Arc<WaitlistUseCases>>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user = waitlist
        .find_by_referral_code(&code)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(WaitlistEntryResponse::from_user(user, &waitlist)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_waitlist).post(join_waitlist))
        .route("/me", get(get_current_user))
        .route("/referrals/{code}", get(get_by_referral_code))
}
