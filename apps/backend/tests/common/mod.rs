//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the real router to a store and a stub grader
//! - An in-memory store so API tests run without PostgreSQL
//! - Helper functions for creating test data
//!
//! # Requirements
//! Tests built with `TestContext::with_database` need a PostgreSQL
//! database (set DATABASE_URL env var) and are ignored by default.

#![allow(dead_code)]

pub mod fixtures;
pub mod memory;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use essay_checker_backend::db::{Database, Store};
use essay_checker_backend::models::{Account, Essay};
use essay_checker_backend::services::{accounts, essays};
use essay_checker_backend::{app, AppState};

use memory::{MemoryStore, StubGrader};

/// A grading response with all six fields present.
pub const FULL_REPORT: &str = r#"{
    "grammarErrors": ["第二段“的”“地”混用", "第三句缺少主语"],
    "fluencyAnalysis": "语句基本通顺，个别长句略显拖沓。",
    "logicEvaluation": "结构完整，首尾呼应。",
    "writingSuggestions": ["增加细节描写", "结尾可以升华主题"],
    "vocabularyRecommendations": ["五彩斑斓", "心旷神怡"],
    "overallScore": 85
}"#;

/// Test context containing the store, the stub grader and the router.
pub struct TestContext {
    pub store: Arc<dyn Store>,
    pub grader: Arc<StubGrader>,
    memory: Option<Arc<MemoryStore>>,
    app: Router,
}

impl TestContext {
    /// In-memory store; the grader answers with `FULL_REPORT`.
    pub fn new() -> Self {
        Self::with_grader(StubGrader::returning(FULL_REPORT))
    }

    /// In-memory store with a custom grader.
    pub fn with_grader(grader: StubGrader) -> Self {
        let memory = Arc::new(MemoryStore::new());
        let store: Arc<dyn Store> = memory.clone();
        Self::build(store, Some(memory), grader)
    }

    /// PostgreSQL store from DATABASE_URL.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn with_database(grader: StubGrader) -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations().await.expect("Failed to run migrations");

        Self::build(Arc::new(db), None, grader)
    }

    fn build(store: Arc<dyn Store>, memory: Option<Arc<MemoryStore>>, grader: StubGrader) -> Self {
        let grader = Arc::new(grader);
        let state = AppState {
            store: store.clone(),
            grader: grader.clone(),
        };

        Self {
            store,
            grader,
            memory,
            app: app(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// The in-memory store, for tests that inspect raw rows.
    pub fn memory(&self) -> &MemoryStore {
        self.memory
            .as_deref()
            .expect("context was built with the in-memory store")
    }

    /// Register an account directly through the service layer.
    pub async fn create_account(&self, username: &str) -> Account {
        accounts::register(
            self.store.as_ref(),
            username,
            "password123",
            &format!("{}@example.com", username),
        )
        .await
        .expect("Failed to create test account")
    }

    /// Submit an essay directly through the service layer.
    pub async fn create_essay(&self, user_id: i64, title: &str, content: &str) -> Essay {
        essays::submit(self.store.as_ref(), user_id, title, content)
            .await
            .expect("Failed to create test essay")
    }
}
