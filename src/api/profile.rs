//! Profile Endpoints
//!
//! A 401 here means a wrong current password, not an expired session.

use crate::error::ApiResult;
use crate::models::{PasswordUpdate, ProfileUpdate, ProfileUpdateResponse, User};

use super::{ApiClient, Verb};

/// The saved user, or `None` when the backend only confirms with a message
pub async fn update_profile(client: &ApiClient, update: &ProfileUpdate) -> ApiResult<Option<User>> {
    match client.send(Verb::Put, "/profile/update", update).await? {
        ProfileUpdateResponse::User(user) => Ok(Some(user)),
        ProfileUpdateResponse::Message { message } => {
            tracing::debug!("profile saved: {}", message);
            Ok(None)
        }
    }
}

pub async fn update_password(client: &ApiClient, update: &PasswordUpdate) -> ApiResult<()> {
    client.send_unit(Verb::Put, "/profile/password/update", Some(update)).await
}
