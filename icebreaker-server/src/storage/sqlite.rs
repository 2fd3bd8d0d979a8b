use icebreaker_models::{Question, Rating, UpdateQuestionRequest};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{AppError, AppResult};
use crate::storage::{round_to_tenth, QuestionStore};

pub type DbConnection = Arc<Mutex<Connection>>;

/// Durable backend: questions and ratings persist in a SQLite file across
/// restarts. Access is serialized through one connection guarded by a mutex.
pub struct SqliteStore {
    connection: DbConnection,
}

impl SqliteStore {
    pub fn new(db_path: &Path) -> AppResult<Self> {
        // Ensure the database directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;

        let store = SqliteStore {
            connection: Arc::new(Mutex::new(conn)),
        };

        store.run_migrations()?;

        Ok(store)
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))
    }

    fn run_migrations(&self) -> AppResult<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT 'general',
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        // No foreign key to questions: ratings outlive their question and
        // stay retrievable after it is deleted.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS ratings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question_id INTEGER NOT NULL,
                rating INTEGER NOT NULL,
                session_id TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_ratings_question_id ON ratings(question_id)",
            [],
        )?;

        tracing::info!("Database migrations completed");
        Ok(())
    }
}

fn question_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        text: row.get(1)?,
        category: row.get(2)?,
        is_active: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn rating_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Rating> {
    Ok(Rating {
        id: row.get(0)?,
        question_id: row.get(1)?,
        rating: row.get(2)?,
        session_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}

impl QuestionStore for SqliteStore {
    fn all_questions(&self) -> AppResult<Vec<Question>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, text, category, is_active, created_at
             FROM questions ORDER BY id DESC",
        )?;

        let question_iter = stmt.query_map([], question_from_row)?;

        let mut questions = Vec::new();
        for question in question_iter {
            questions.push(question?);
        }

        Ok(questions)
    }

    fn active_questions(&self) -> AppResult<Vec<Question>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, text, category, is_active, created_at
             FROM questions WHERE is_active = 1 ORDER BY id DESC",
        )?;

        let question_iter = stmt.query_map([], question_from_row)?;

        let mut questions = Vec::new();
        for question in question_iter {
            questions.push(question?);
        }

        Ok(questions)
    }

    fn question(&self, id: i64) -> AppResult<Option<Question>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, text, category, is_active, created_at
             FROM questions WHERE id = ?",
        )?;

        match stmt.query_row([id], question_from_row) {
            Ok(question) => Ok(Some(question)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn create_question(&self, mut question: Question) -> AppResult<Question> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO questions (text, category, is_active, created_at)
             VALUES (?, ?, ?, ?)",
            params![
                question.text,
                question.category,
                question.is_active,
                question.created_at,
            ],
        )?;
        question.id = conn.last_insert_rowid();

        tracing::info!("Created question {}: {}", question.id, question.text);
        Ok(question)
    }

    fn update_question(
        &self,
        id: i64,
        patch: &UpdateQuestionRequest,
    ) -> AppResult<Option<Question>> {
        let existing = match self.question(id)? {
            Some(question) => question,
            None => return Ok(None),
        };

        let updated = Question {
            id: existing.id,
            text: patch.text.clone().unwrap_or(existing.text),
            category: patch.category.clone().unwrap_or(existing.category),
            is_active: patch.is_active.unwrap_or(existing.is_active),
            created_at: existing.created_at,
        };

        let conn = self.lock()?;
        conn.execute(
            "UPDATE questions SET text = ?, category = ?, is_active = ? WHERE id = ?",
            params![updated.text, updated.category, updated.is_active, updated.id],
        )?;

        tracing::info!("Updated question {}", id);
        Ok(Some(updated))
    }

    fn delete_question(&self, id: i64) -> AppResult<bool> {
        let conn = self.lock()?;

        let rows_affected = conn.execute("DELETE FROM questions WHERE id = ?", [id])?;
        if rows_affected > 0 {
            tracing::info!("Deleted question {}", id);
        }

        Ok(rows_affected > 0)
    }

    fn create_rating(&self, mut rating: Rating) -> AppResult<Rating> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO ratings (question_id, rating, session_id, created_at)
             VALUES (?, ?, ?, ?)",
            params![
                rating.question_id,
                rating.rating,
                rating.session_id,
                rating.created_at,
            ],
        )?;
        rating.id = conn.last_insert_rowid();

        tracing::info!(
            "Recorded rating {} ({} stars) for question {}",
            rating.id,
            rating.rating,
            rating.question_id
        );
        Ok(rating)
    }

    fn ratings_for_question(&self, question_id: i64) -> AppResult<Vec<Rating>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, question_id, rating, session_id, created_at
             FROM ratings WHERE question_id = ? ORDER BY id ASC",
        )?;

        let rating_iter = stmt.query_map([question_id], rating_from_row)?;

        let mut ratings = Vec::new();
        for rating in rating_iter {
            ratings.push(rating?);
        }

        tracing::debug!(
            "Retrieved {} ratings for question {}",
            ratings.len(),
            question_id
        );
        Ok(ratings)
    }

    fn average_rating(&self, question_id: i64) -> AppResult<f64> {
        let conn = self.lock()?;

        let average: f64 = conn.query_row(
            "SELECT COALESCE(AVG(rating), 0.0) FROM ratings WHERE question_id = ?",
            [question_id],
            |row| row.get(0),
        )?;

        Ok(round_to_tenth(average))
    }
}
