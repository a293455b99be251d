use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use super::dto::UserProfile;
use crate::{error::AppError, state::AppState};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validated(mut profile: UserProfile) -> Result<UserProfile, AppError> {
    profile.email = normalize_email(&profile.email);
    if !is_valid_email(&profile.email) {
        warn!(email = %profile.email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    Ok(profile)
}

fn not_found() -> AppError {
    AppError::NotFound("User not found".into())
}

/// The email check is a read before the insert, so two concurrent creates
/// with the same email can both succeed.
pub async fn create_profile(st: &AppState, profile: UserProfile) -> Result<(), AppError> {
    let profile = validated(profile)?;
    let store = st.store.as_ref();

    if UserProfile::find_by_email(store, &profile.email).await?.is_some() {
        warn!(email = %profile.email, "email already registered");
        return Err(AppError::Conflict(
            "User with this email already exists".into(),
        ));
    }

    let id = profile.create(store).await?;
    info!(%id, email = %profile.email, "profile created");
    Ok(())
}

pub async fn get_profile(st: &AppState, email: &str) -> Result<UserProfile, AppError> {
    UserProfile::find_by_email(st.store.as_ref(), &normalize_email(email))
        .await?
        .map(|(_, profile)| profile)
        .ok_or_else(not_found)
}

pub async fn update_profile(
    st: &AppState,
    email: &str,
    updated: UserProfile,
) -> Result<(), AppError> {
    let updated = validated(updated)?;
    let store = st.store.as_ref();
    let (id, _) = UserProfile::find_by_email(store, &normalize_email(email))
        .await?
        .ok_or_else(not_found)?;

    // Same read-then-write check as create; not atomic.
    if let Some((other, _)) = UserProfile::find_by_email(store, &updated.email).await? {
        if other != id {
            warn!(email = %updated.email, "email already registered");
            return Err(AppError::Conflict(
                "User with this email already exists".into(),
            ));
        }
    }

    updated.replace(store, &id).await?;
    info!(%id, "profile updated");
    Ok(())
}

pub async fn delete_profile(st: &AppState, email: &str) -> Result<(), AppError> {
    let store = st.store.as_ref();
    let (id, _) = UserProfile::find_by_email(store, &normalize_email(email))
        .await?
        .ok_or_else(not_found)?;
    if !UserProfile::delete(store, &id).await? {
        return Err(not_found());
    }
    info!(%id, "profile deleted");
    Ok(())
}
