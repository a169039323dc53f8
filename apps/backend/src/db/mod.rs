//! PostgreSQL database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::{ApiError, Result};
use crate::models::*;

/// Persistence accessors used by the services.
///
/// Lookups return `Ok(None)` for missing rows; callers decide whether that
/// is an error.
#[async_trait]
pub trait Store: Send + Sync {
    // === Accounts ===
    async fn create_account(&self, account: &NewAccount) -> Result<Account>;
    async fn get_account(&self, id: i64) -> Result<Option<Account>>;
    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>>;
    async fn username_exists(&self, username: &str) -> Result<bool>;
    async fn email_exists(&self, email: &str) -> Result<bool>;
    /// Overwrite every column of an existing account.
    /// A username or email held by another account is a `Conflict`.
    async fn update_account(&self, account: &Account) -> Result<Option<Account>>;

    // === Essays ===
    async fn create_essay(&self, essay: &NewEssay) -> Result<Essay>;
    async fn get_essay(&self, id: i64) -> Result<Option<Essay>>;
    /// Newest first
    async fn get_essays_by_user(&self, user_id: i64) -> Result<Vec<Essay>>;
    /// Newest first, case-sensitive substring match on the title
    async fn search_essays_by_title(&self, user_id: i64, fragment: &str) -> Result<Vec<Essay>>;
    async fn update_essay(
        &self,
        id: i64,
        title: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Essay>>;
    async fn essay_exists(&self, id: i64) -> Result<bool>;
    async fn delete_essay(&self, id: i64) -> Result<()>;

    // === Grading Results ===
    /// First stored result for the essay, if any
    async fn get_result_by_essay(&self, essay_id: i64) -> Result<Option<DbGradingResult>>;
    async fn get_results_by_essays(&self, essay_ids: &[i64]) -> Result<Vec<DbGradingResult>>;
    async fn insert_result(&self, result: &NewGradingResult) -> Result<DbGradingResult>;
}

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Turn a UNIQUE violation on `users` into the matching conflict.
///
/// Also covers two registrations racing past the existence checks.
fn account_conflict(err: sqlx::Error) -> ApiError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            let message = match db_err.constraint() {
                Some("users_email_key") => "Email already registered",
                _ => "Username already exists",
            };
            return ApiError::Conflict(message.to_string());
        }
    }
    ApiError::Database(err)
}

#[async_trait]
impl Store for Database {
    // === Account Repository ===

    async fn create_account(&self, account: &NewAccount) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO users (username, password, email, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password, email, created_at
            "#,
        )
        .bind(&account.username)
        .bind(&account.password)
        .bind(&account.email)
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(account_conflict)?;

        Ok(account)
    }

    async fn get_account(&self, id: i64) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, password, email, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, password, email, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn update_account(&self, account: &Account) -> Result<Option<Account>> {
        let updated = sqlx::query_as::<_, Account>(
            r#"
            UPDATE users
            SET username = $2, password = $3, email = $4
            WHERE id = $1
            RETURNING id, username, password, email, created_at
            "#,
        )
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.password)
        .bind(&account.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(account_conflict)?;

        Ok(updated)
    }

    // === Essay Repository ===

    async fn create_essay(&self, essay: &NewEssay) -> Result<Essay> {
        let essay = sqlx::query_as::<_, Essay>(
            r#"
            INSERT INTO essays (user_id, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, user_id, title, content, created_at, updated_at
            "#,
        )
        .bind(essay.user_id)
        .bind(&essay.title)
        .bind(&essay.content)
        .bind(essay.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(essay)
    }

    async fn get_essay(&self, id: i64) -> Result<Option<Essay>> {
        let essay = sqlx::query_as::<_, Essay>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at
            FROM essays
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(essay)
    }

    async fn get_essays_by_user(&self, user_id: i64) -> Result<Vec<Essay>> {
        let essays = sqlx::query_as::<_, Essay>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at
            FROM essays
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(essays)
    }

    async fn search_essays_by_title(&self, user_id: i64, fragment: &str) -> Result<Vec<Essay>> {
        // strpos keeps % and _ in the fragment literal
        let essays = sqlx::query_as::<_, Essay>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at
            FROM essays
            WHERE user_id = $1 AND strpos(title, $2) > 0
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(fragment)
        .fetch_all(&self.pool)
        .await?;

        Ok(essays)
    }

    async fn update_essay(
        &self,
        id: i64,
        title: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Essay>> {
        let essay = sqlx::query_as::<_, Essay>(
            r#"
            UPDATE essays
            SET title = $2, content = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, user_id, title, content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(essay)
    }

    async fn essay_exists(&self, id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM essays WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn delete_essay(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM essays WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // === Grading Result Repository ===

    async fn get_result_by_essay(&self, essay_id: i64) -> Result<Option<DbGradingResult>> {
        let result = sqlx::query_as::<_, DbGradingResult>(
            r#"
            SELECT id, essay_id, grammar_errors, fluency_analysis, logic_evaluation,
                   writing_suggestions, vocabulary_recommendations, overall_score, created_at
            FROM check_results
            WHERE essay_id = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(essay_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    async fn get_results_by_essays(&self, essay_ids: &[i64]) -> Result<Vec<DbGradingResult>> {
        if essay_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, DbGradingResult>(
            r#"
            SELECT id, essay_id, grammar_errors, fluency_analysis, logic_evaluation,
                   writing_suggestions, vocabulary_recommendations, overall_score, created_at
            FROM check_results
            WHERE essay_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(essay_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    async fn insert_result(&self, result: &NewGradingResult) -> Result<DbGradingResult> {
        let stored = sqlx::query_as::<_, DbGradingResult>(
            r#"
            INSERT INTO check_results (essay_id, grammar_errors, fluency_analysis,
                                       logic_evaluation, writing_suggestions,
                                       vocabulary_recommendations, overall_score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, essay_id, grammar_errors, fluency_analysis, logic_evaluation,
                      writing_suggestions, vocabulary_recommendations, overall_score, created_at
            "#,
        )
        .bind(result.essay_id)
        .bind(&result.grammar_errors)
        .bind(&result.fluency_analysis)
        .bind(&result.logic_evaluation)
        .bind(&result.writing_suggestions)
        .bind(&result.vocabulary_recommendations)
        .bind(result.overall_score)
        .bind(result.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }
}
