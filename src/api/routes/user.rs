//! Current-user endpoint

use axum::{extract::State, Extension, Json};

use crate::api::dto::UserProfile;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::auth::Principal;

/// Profile of the authenticated caller
pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<UserProfile>> {
    let user = state.users().get(principal.id)?;
    Ok(Json(UserProfile::from(&user)))
}
