//! User lookup handler.

use actix_web::{web, HttpResponse};

use crate::error::{AppError, AppResult};
use crate::handlers::checkout::AppState;

/// Fetch a user by id
///
/// GET /users/{id}
///
/// Served through the read-only repository variant: this endpoint is a pure
/// read and can never create or modify a record.
pub async fn get_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();

    let user = state
        .user_reader
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with id {}", id)))?;

    Ok(HttpResponse::Ok().json(user))
}
