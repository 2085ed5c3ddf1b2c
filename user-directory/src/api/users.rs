//! User lookup endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use user_directory_common::UserRecord;

use crate::codec::ApiJson;
use crate::error::Result;
use crate::state::AppState;

/// Build the users router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bo", get(list_users).options(list_users))
        .route("/bo/:user_id", get(get_user).options(get_user))
}

/// GET /bo - Every user in the collection.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<ApiJson<Vec<UserRecord>>> {
    let users = state.query.list_all().await?;
    tracing::debug!("Listed {} users", users.len());
    Ok(ApiJson(users))
}

/// GET /bo/{user_id} - First user whose `user_id` matches.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<ApiJson<UserRecord>> {
    let user = state.query.get_by_external_id(&user_id).await?;
    Ok(ApiJson(user))
}
