//! In-process stand-ins for PostgreSQL and the AI service.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use essay_checker_backend::db::Store;
use essay_checker_backend::error::{ApiError, Result};
use essay_checker_backend::models::*;
use essay_checker_backend::services::grading_client::Grader;

#[derive(Default)]
struct Tables {
    accounts: Vec<Account>,
    essays: Vec<Essay>,
    results: Vec<DbGradingResult>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Same UNIQUE rules as the `users` table, ignoring the account itself.
    fn check_unique(&self, id: Option<i64>, username: &str, email: &str) -> Result<()> {
        let others = || self.accounts.iter().filter(move |a| Some(a.id) != id);
        if others().any(|a| a.username == username) {
            return Err(ApiError::Conflict("Username already exists".to_string()));
        }
        if others().any(|a| a.email == email) {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }
        Ok(())
    }
}

/// `Store` backed by vectors behind a mutex.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_count(&self) -> usize {
        self.tables.lock().unwrap().accounts.len()
    }

    pub fn results_for(&self, essay_id: i64) -> Vec<DbGradingResult> {
        self.tables
            .lock()
            .unwrap()
            .results
            .iter()
            .filter(|r| r.essay_id == essay_id)
            .cloned()
            .collect()
    }

    /// Insert an essay with a chosen creation time.
    pub fn seed_essay(&self, user_id: i64, title: &str, created_at: DateTime<Utc>) -> Essay {
        let mut tables = self.tables.lock().unwrap();
        let essay = Essay {
            id: tables.next_id(),
            user_id,
            title: title.to_string(),
            content: format!("{} content", title),
            created_at,
            updated_at: created_at,
        };
        tables.essays.push(essay.clone());
        essay
    }
}

fn newest_first(mut essays: Vec<Essay>) -> Vec<Essay> {
    essays.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    essays
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_account(&self, account: &NewAccount) -> Result<Account> {
        let mut tables = self.tables.lock().unwrap();
        tables.check_unique(None, &account.username, &account.email)?;
        let account = Account {
            id: tables.next_id(),
            username: account.username.clone(),
            password: account.password.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
        };
        tables.accounts.push(account.clone());
        Ok(account)
    }

    async fn get_account(&self, id: i64) -> Result<Option<Account>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.accounts.iter().find(|a| a.username == username).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.accounts.iter().any(|a| a.username == username))
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.accounts.iter().any(|a| a.email == email))
    }

    async fn update_account(&self, account: &Account) -> Result<Option<Account>> {
        let mut tables = self.tables.lock().unwrap();
        tables.check_unique(Some(account.id), &account.username, &account.email)?;
        Ok(tables
            .accounts
            .iter_mut()
            .find(|a| a.id == account.id)
            .map(|stored| {
                stored.username = account.username.clone();
                stored.password = account.password.clone();
                stored.email = account.email.clone();
                stored.clone()
            }))
    }

    async fn create_essay(&self, essay: &NewEssay) -> Result<Essay> {
        let mut tables = self.tables.lock().unwrap();
        let essay = Essay {
            id: tables.next_id(),
            user_id: essay.user_id,
            title: essay.title.clone(),
            content: essay.content.clone(),
            created_at: essay.created_at,
            updated_at: essay.created_at,
        };
        tables.essays.push(essay.clone());
        Ok(essay)
    }

    async fn get_essay(&self, id: i64) -> Result<Option<Essay>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.essays.iter().find(|e| e.id == id).cloned())
    }

    async fn get_essays_by_user(&self, user_id: i64) -> Result<Vec<Essay>> {
        let tables = self.tables.lock().unwrap();
        Ok(newest_first(
            tables.essays.iter().filter(|e| e.user_id == user_id).cloned().collect(),
        ))
    }

    async fn search_essays_by_title(&self, user_id: i64, fragment: &str) -> Result<Vec<Essay>> {
        let tables = self.tables.lock().unwrap();
        Ok(newest_first(
            tables
                .essays
                .iter()
                .filter(|e| e.user_id == user_id && e.title.contains(fragment))
                .cloned()
                .collect(),
        ))
    }

    async fn update_essay(
        &self,
        id: i64,
        title: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Essay>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.essays.iter_mut().find(|e| e.id == id).map(|essay| {
            essay.title = title.to_string();
            essay.content = content.to_string();
            essay.updated_at = updated_at;
            essay.clone()
        }))
    }

    async fn essay_exists(&self, id: i64) -> Result<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.essays.iter().any(|e| e.id == id))
    }

    async fn delete_essay(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.essays.retain(|e| e.id != id);
        Ok(())
    }

    async fn get_result_by_essay(&self, essay_id: i64) -> Result<Option<DbGradingResult>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.results.iter().find(|r| r.essay_id == essay_id).cloned())
    }

    async fn get_results_by_essays(&self, essay_ids: &[i64]) -> Result<Vec<DbGradingResult>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .results
            .iter()
            .filter(|r| essay_ids.contains(&r.essay_id))
            .cloned()
            .collect())
    }

    async fn insert_result(&self, result: &NewGradingResult) -> Result<DbGradingResult> {
        let mut tables = self.tables.lock().unwrap();
        let stored = DbGradingResult {
            id: tables.next_id(),
            essay_id: result.essay_id,
            grammar_errors: result.grammar_errors.clone(),
            fluency_analysis: result.fluency_analysis.clone(),
            logic_evaluation: result.logic_evaluation.clone(),
            writing_suggestions: result.writing_suggestions.clone(),
            vocabulary_recommendations: result.vocabulary_recommendations.clone(),
            overall_score: result.overall_score,
            created_at: result.created_at,
        };
        tables.results.push(stored.clone());
        Ok(stored)
    }
}

/// `Grader` that replays queued responses and counts calls.
///
/// Once the queue is drained the last response is repeated.
pub struct StubGrader {
    responses: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    calls: AtomicUsize,
    essays: Mutex<Vec<String>>,
}

impl StubGrader {
    pub fn returning(raw: &str) -> Self {
        Self::sequence(&[raw])
    }

    pub fn sequence(raws: &[&str]) -> Self {
        Self {
            responses: Mutex::new(raws.iter().map(|r| r.to_string()).collect()),
            last: Mutex::new(raws.last().map(|r| r.to_string()).unwrap_or_default()),
            calls: AtomicUsize::new(0),
            essays: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn essays(&self) -> Vec<String> {
        self.essays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Grader for StubGrader {
    async fn analyze(&self, essay: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.essays.lock().unwrap().push(essay.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last.lock().unwrap().clone())
    }
}
