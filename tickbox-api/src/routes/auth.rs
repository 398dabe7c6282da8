/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/signup` - Register and receive an OTP by email
/// - `POST /api/auth/verify-otp` - Verify the emailed code
/// - `POST /api/auth/signin` - Sign in and get an access token
/// - `POST /api/auth/token` - Get a full access/refresh token pair
///
/// Signup creates an unverified account; sign-in is refused until the OTP
/// check has flipped the account to verified. Credential failures are
/// reported identically regardless of cause so that accounts cannot be
/// enumerated.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tickbox_shared::{
    auth::{jwt, otp, password},
    models::{
        otp::Otp,
        user::{CreateUser, User},
    },
};
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Username
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (policy is not enforced here)
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Signup response
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    /// Confirmation message
    pub message: String,
}

/// OTP verification request
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    /// Email address the code was sent to
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// The 6-digit code
    #[validate(length(min = 1, message = "OTP code must not be empty"))]
    pub otp_code: String,
}

/// OTP verification response
#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    /// Confirmation message
    pub message: String,

    /// Access token for the now-verified user
    pub access_token: String,
}

/// Sign-in request
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Sign-in response
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    /// Confirmation message
    pub message: String,

    /// Access token (24h)
    pub access_token: String,
}

/// Token pair response
#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    /// Access token (24h)
    pub access: String,

    /// Refresh token (30d)
    pub refresh: String,
}

/// Register a new user
///
/// Creates an unverified account, issues a 6-digit OTP, and emails it to
/// the given address. A failed email send is reported, not swallowed.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/signup
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "secret"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed, or email/username already taken
/// - `500 Internal Server Error`: email dispatch or store failure
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    let code = otp::generate_code();
    Otp::create(&state.db, user.id, &code).await?;

    state.mailer.send_otp(&user.email, &code).await?;

    tracing::info!(user_id = %user.id, "New signup, OTP dispatched");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "OTP sent to your email".to_string(),
        }),
    ))
}

/// Verify an emailed OTP code
///
/// Matching is by exact code equality with no expiry window: any code ever
/// issued to the user stays valid until consumed. On success the user
/// becomes verified, the code row is deleted, and an access token is
/// returned.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/verify-otp
/// Content-Type: application/json
///
/// {
///   "email": "alice@example.com",
///   "otp_code": "123456"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: no such code outstanding for this user
/// - `404 Not Found`: no user with this email
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> ApiResult<Json<VerifyOtpResponse>> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let otp_record = Otp::find_by_user_and_code(&state.db, user.id, &req.otp_code)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Invalid OTP".to_string()))?;

    // Not transactional: a crash after mark_verified leaves the code row
    // behind, and re-verifying with it still succeeds until it is deleted.
    User::mark_verified(&state.db, user.id).await?;
    Otp::delete(&state.db, otp_record.id).await?;

    let (access_token, _refresh_token) = jwt::issue_token_pair(user.id, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User verified");

    Ok(Json(VerifyOtpResponse {
        message: "OTP verified successfully".to_string(),
        access_token,
    }))
}

/// Sign in with email and password
///
/// Succeeds only when the credentials match and the account is verified.
/// Wrong email, wrong password, and an unverified account all produce the
/// same 401 response.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/signin
/// Content-Type: application/json
///
/// {
///   "email": "alice@example.com",
///   "password": "secret"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: invalid credentials
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> ApiResult<Json<SigninResponse>> {
    req.validate()?;

    let user = authenticate(&state, &req.email, &req.password).await?;

    let (access_token, _refresh_token) = jwt::issue_token_pair(user.id, state.jwt_secret())?;

    Ok(Json(SigninResponse {
        message: "Login successful".to_string(),
        access_token,
    }))
}

/// Obtain a full access/refresh token pair
///
/// Same credential policy as sign-in, but both tokens are returned.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/token
/// Content-Type: application/json
///
/// {
///   "email": "alice@example.com",
///   "password": "secret"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: invalid credentials
pub async fn token_pair(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> ApiResult<Json<TokenPairResponse>> {
    req.validate()?;

    let user = authenticate(&state, &req.email, &req.password).await?;

    let (access, refresh) = jwt::issue_token_pair(user.id, state.jwt_secret())?;

    Ok(Json(TokenPairResponse { access, refresh }))
}

/// Checks email+password and the verified flag, with a single
/// indistinguishable failure mode
async fn authenticate(state: &AppState, email: &str, pass: &str) -> Result<User, ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());

    let user = User::find_by_email(&state.db, email)
        .await?
        .ok_or_else(invalid)?;

    if !password::verify_password(pass, &user.password_hash)? {
        return Err(invalid());
    }

    if !user.is_verified {
        return Err(invalid());
    }

    Ok(user)
}
