//! User directory handlers.
//!
//! ```text
//! GET    /
//! POST   /users       {"name":"Ada","email":"ada@example.com"}
//! GET    /users
//! GET    /users/{id}
//! PUT    /users/{id}  {"name":"Ada","email":"ada@example.com"}
//! DELETE /users/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{User, UserDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_user_draft, parse_user_id};

pub const WELCOME_MESSAGE: &str = "Welcome to the CRUD API";
pub const USER_CREATED_MESSAGE: &str = "User created successfully";
pub const USER_UPDATED_MESSAGE: &str = "User updated successfully";
pub const USER_DELETED_MESSAGE: &str = "User deleted successfully";

/// Request body for create and update.
///
/// Example JSON:
/// `{"name":"Ada Lovelace","email":"ada@example.com"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl TryFrom<UserRequest> for UserDraft {
    type Error = crate::domain::Error;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        parse_user_draft(value.name, value.email)
    }
}

/// Confirmation body returned by home, update and delete.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> web::Json<Self> {
        web::Json(Self {
            message: message.to_owned(),
        })
    }
}

/// Body returned by `POST /users`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserResponse {
    #[schema(example = "User created successfully")]
    pub message: String,
    /// Store-assigned identifier of the new user.
    #[schema(example = 1)]
    pub user_id: i64,
}

/// Liveness greeting.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = MessageResponse)),
    tags = ["users"],
    operation_id = "home"
)]
#[get("/")]
pub async fn home() -> web::Json<MessageResponse> {
    MessageResponse::new(WELCOME_MESSAGE)
}

/// Create a user.
///
/// Validation runs before the store is touched; an email already held by
/// another user yields 400.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Email already exists", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<CreateUserResponse>> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let id = state.users_command.create_user(draft).await?;
    Ok(web::Json(CreateUserResponse {
        message: USER_CREATED_MESSAGE.to_owned(),
        user_id: id.get(),
    }))
}

/// List every user ordered by id.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_backend::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    debug!(count = users.len(), "listed users");
    Ok(web::Json(users))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 422, description = "Identifier is not an integer", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(path.into_inner())?;
    let user = state.users_query.get_user(id).await?;
    Ok(web::Json(user))
}

/// Replace a user's name and email.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Email already exists", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let id = parse_user_id(path.into_inner())?;
    state.users_command.update_user(id, draft).await?;
    Ok(MessageResponse::new(USER_UPDATED_MESSAGE))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 422, description = "Identifier is not an integer", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_user_id(path.into_inner())?;
    state.users_command.delete_user(id).await?;
    Ok(MessageResponse::new(USER_DELETED_MESSAGE))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
