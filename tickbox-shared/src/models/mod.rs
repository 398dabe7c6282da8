/// Database models for Tickbox
///
/// Each model owns its CRUD operations as associated async functions over a
/// `PgPool`.
///
/// # Models
///
/// - `user`: user accounts and verification state
/// - `otp`: one-time verification codes
/// - `todo`: per-user to-do items
///
/// # Example
///
/// ```no_run
/// use tickbox_shared::models::user::{CreateUser, User};
/// use tickbox_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "alice".to_string(),
///         email: "alice@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod otp;
pub mod todo;
pub mod user;
