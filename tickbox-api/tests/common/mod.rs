/// Common test utilities for integration tests
///
/// Shared infrastructure for the API integration tests:
/// - Test database setup and cleanup
/// - Test user creation (verified and unverified)
/// - JWT token generation
/// - Captured outbound mail for OTP assertions

use sqlx::PgPool;
use std::sync::Arc;
use tickbox_api::app::{build_router, AppState};
use tickbox_api::config::Config;
use tickbox_shared::auth::jwt::{create_token, Claims, TokenType};
use tickbox_shared::auth::password;
use tickbox_shared::models::todo::{CreateTodo, Todo, TodoStatus};
use tickbox_shared::models::user::{CreateUser, User};
use tickbox_shared::mail::InMemoryMailer;
use uuid::Uuid;

/// Password used for every user created by the test harness
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub mailer: Arc<InMemoryMailer>,
    pub user: User,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a new test context with a verified user and a valid token
    pub async fn new() -> anyhow::Result<Self> {
        // Load test configuration
        let config = Config::from_env()?;

        // Connect to database
        let db = PgPool::connect(&config.database.url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../migrations").run(&db).await?;

        // Outbound mail is captured, never delivered
        let mailer = Arc::new(InMemoryMailer::new());

        // Create a verified user to act as the authenticated caller
        let user = create_user(&db, true).await?;

        // Generate JWT token
        let claims = Claims::new(user.id, TokenType::Access);
        let jwt_token = create_token(&claims, &config.jwt.secret)?;

        // Build app
        let state = AppState::new(db.clone(), config.clone(), mailer.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            mailer,
            user,
            jwt_token,
        })
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Mints an access token for an arbitrary user
    pub fn token_for(&self, user_id: Uuid) -> anyhow::Result<String> {
        let claims = Claims::new(user_id, TokenType::Access);
        Ok(create_token(&claims, &self.config.jwt.secret)?)
    }

    /// Cleans up test data
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        // Delete the test user (cascades to OTP codes and todos)
        User::delete(&self.db, self.user.id).await?;
        Ok(())
    }
}

/// Creates a user with a unique email and username
///
/// The password is always [`TEST_PASSWORD`]. Callers are responsible for
/// deleting the user when done.
pub async fn create_user(db: &PgPool, verified: bool) -> anyhow::Result<User> {
    let suffix = Uuid::new_v4();
    let password_hash = password::hash_password(TEST_PASSWORD)?;

    let user = User::create(
        db,
        CreateUser {
            username: format!("test-user-{}", suffix),
            email: format!("test-{}@example.com", suffix),
            password_hash,
        },
    )
    .await?;

    if verified {
        User::mark_verified(db, user.id).await?;
        return Ok(User::find_by_id(db, user.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("test user disappeared"))?);
    }

    Ok(user)
}

/// Returns a unique email address for signup tests
pub fn unique_email() -> String {
    format!("signup-{}@example.com", Uuid::new_v4())
}

/// Helper to create a todo owned by the context user
pub async fn create_test_todo(
    ctx: &TestContext,
    title: &str,
    due_date: chrono::NaiveDate,
) -> anyhow::Result<Todo> {
    let todo = Todo::create(
        &ctx.db,
        CreateTodo {
            user_id: ctx.user.id,
            title: title.to_string(),
            description: String::new(),
            status: TodoStatus::Pending,
            due_date,
        },
    )
    .await?;

    Ok(todo)
}
