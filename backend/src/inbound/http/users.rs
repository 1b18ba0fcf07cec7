//! User registration, listing and login handlers.
//!
//! ```text
//! POST /api/users {"username":"root","name":"Superuser","password":"salainen"}
//! GET  /api/users
//! POST /api/login {"username":"root","password":"salainen"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{LoginCredentials, LoginSuccess, LoginValidationError, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{login_validation_error, registration_validation_error};

/// Sign-up body for `POST /api/users`.
#[derive(Debug, Default, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "root")]
    pub username: Option<String>,
    #[schema(example = "Superuser")]
    pub name: Option<String>,
    #[schema(example = "salainen", min_length = 3)]
    pub password: Option<String>,
}

/// User as returned to clients. Password hashes never leave the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    /// Ids of the blogs this user added.
    pub blogs: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().as_str().to_owned(),
            name: user.name().map(str::to_owned),
            blogs: user.blogs().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Login request body for `POST /api/login`.
///
/// Missing fields are treated as empty and rejected by validation.
#[derive(Debug, Default, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

impl From<LoginSuccess> for LoginResponse {
    fn from(value: LoginSuccess) -> Self {
        let LoginSuccess { token, user } = value;
        Self {
            token: token.into_inner(),
            username: user.username().as_str().to_owned(),
            name: user.name().map(str::to_owned),
        }
    }
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid or duplicate username, or short password", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let CreateUserRequest {
        username,
        name,
        password,
    } = payload.into_inner();
    let registration =
        Registration::try_from_parts(username.as_deref(), name.as_deref(), password.as_deref())
            .map_err(registration_validation_error)?;
    let user = state.registration.register(registration).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// List every user with the ids of their blogs.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bloglist::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Exchange a username and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid username or password", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(login_validation_error)?;
    let success = state.login.login(&credentials).await?;
    Ok(web::Json(success.into()))
}
