use icebreaker_models::{Question, Rating, UpdateQuestionRequest};
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::storage::{round_to_tenth, QuestionStore};

/// Volatile backend: everything lives in process memory and is gone on
/// restart. Collections are keyed by id; next-id counters never move
/// backwards, so ids are not reused within a process lifetime.
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

struct MemoryInner {
    questions: BTreeMap<i64, Question>,
    ratings: BTreeMap<i64, Rating>,
    next_question_id: i64,
    next_rating_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                questions: BTreeMap::new(),
                ratings: BTreeMap::new(),
                next_question_id: 1,
                next_rating_id: 1,
            }),
        }
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, MemoryInner>> {
        self.inner
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire store lock: {e}")))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionStore for MemoryStore {
    fn all_questions(&self) -> AppResult<Vec<Question>> {
        let inner = self.lock()?;
        // BTreeMap iterates in ascending id order; listings want newest first
        let questions: Vec<Question> = inner.questions.values().rev().cloned().collect();
        Ok(questions)
    }

    fn active_questions(&self) -> AppResult<Vec<Question>> {
        let inner = self.lock()?;
        let questions: Vec<Question> = inner
            .questions
            .values()
            .rev()
            .filter(|q| q.is_active)
            .cloned()
            .collect();
        Ok(questions)
    }

    fn question(&self, id: i64) -> AppResult<Option<Question>> {
        let inner = self.lock()?;
        Ok(inner.questions.get(&id).cloned())
    }

    fn create_question(&self, mut question: Question) -> AppResult<Question> {
        let mut inner = self.lock()?;
        question.id = inner.next_question_id;
        inner.next_question_id += 1;
        inner.questions.insert(question.id, question.clone());

        tracing::info!("Created question {}: {}", question.id, question.text);
        Ok(question)
    }

    fn update_question(
        &self,
        id: i64,
        patch: &UpdateQuestionRequest,
    ) -> AppResult<Option<Question>> {
        let mut inner = self.lock()?;
        let Some(existing) = inner.questions.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(text) = &patch.text {
            existing.text = text.clone();
        }
        if let Some(category) = &patch.category {
            existing.category = category.clone();
        }
        if let Some(is_active) = patch.is_active {
            existing.is_active = is_active;
        }

        tracing::info!("Updated question {}", id);
        Ok(Some(existing.clone()))
    }

    fn delete_question(&self, id: i64) -> AppResult<bool> {
        let mut inner = self.lock()?;
        let removed = inner.questions.remove(&id).is_some();
        if removed {
            tracing::info!("Deleted question {}", id);
        }
        Ok(removed)
    }

    fn create_rating(&self, mut rating: Rating) -> AppResult<Rating> {
        let mut inner = self.lock()?;
        rating.id = inner.next_rating_id;
        inner.next_rating_id += 1;
        inner.ratings.insert(rating.id, rating.clone());

        tracing::info!(
            "Recorded rating {} ({} stars) for question {}",
            rating.id,
            rating.rating,
            rating.question_id
        );
        Ok(rating)
    }

    fn ratings_for_question(&self, question_id: i64) -> AppResult<Vec<Rating>> {
        let inner = self.lock()?;
        let ratings: Vec<Rating> = inner
            .ratings
            .values()
            .filter(|r| r.question_id == question_id)
            .cloned()
            .collect();
        Ok(ratings)
    }

    fn average_rating(&self, question_id: i64) -> AppResult<f64> {
        let inner = self.lock()?;
        let mut sum = 0i64;
        let mut count = 0i64;
        for rating in inner.ratings.values() {
            if rating.question_id == question_id {
                sum += i64::from(rating.rating);
                count += 1;
            }
        }
        if count == 0 {
            return Ok(0.0);
        }
        Ok(round_to_tenth(sum as f64 / count as f64))
    }
}
