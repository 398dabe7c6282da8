/// API route handlers
///
/// Route handlers organized by resource:
///
/// - `health`: health check endpoint
/// - `auth`: authentication endpoints (signup, verify-otp, signin, token)
/// - `todos`: per-user todo CRUD

pub mod auth;
pub mod health;
pub mod todos;
