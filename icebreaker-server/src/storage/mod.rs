use icebreaker_models::{Question, QuestionWithStats, Rating, UpdateQuestionRequest};
use rand::Rng;

use crate::error::AppResult;
use crate::seed;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// The storage contract shared by both backends. Handlers depend on this
/// trait only; the concrete adapter is chosen once at startup from
/// configuration and injected as `Arc<dyn QuestionStore>`.
pub trait QuestionStore: Send + Sync {
    /// Every question, most recently created first.
    fn all_questions(&self) -> AppResult<Vec<Question>>;

    /// The `is_active` subset, most recently created first.
    fn active_questions(&self) -> AppResult<Vec<Question>>;

    /// A missing id is `None`, never an error.
    fn question(&self, id: i64) -> AppResult<Option<Question>>;

    /// Assigns the next id and returns the stored record.
    fn create_question(&self, question: Question) -> AppResult<Question>;

    /// Merges only the fields present in the patch; `None` when the id is
    /// absent.
    fn update_question(
        &self,
        id: i64,
        patch: &UpdateQuestionRequest,
    ) -> AppResult<Option<Question>>;

    /// Returns whether a record was present. Ratings for the question are
    /// left in place.
    fn delete_question(&self, id: i64) -> AppResult<bool>;

    /// Assigns the next id and returns the stored record. The referenced
    /// question is deliberately not checked for existence.
    fn create_rating(&self, rating: Rating) -> AppResult<Rating>;

    fn ratings_for_question(&self, question_id: i64) -> AppResult<Vec<Rating>>;

    /// Mean of the question's ratings rounded to one decimal, 0.0 when there
    /// are none.
    fn average_rating(&self, question_id: i64) -> AppResult<f64>;

    /// Uniform pick from the active set minus `exclude`. When the exclusion
    /// list covers the whole active set the pick falls back to the full
    /// active set; an empty active set yields `None`.
    fn random_question(&self, exclude: &[i64]) -> AppResult<Option<Question>> {
        let active = self.active_questions()?;
        if active.is_empty() {
            return Ok(None);
        }

        let eligible: Vec<&Question> = active
            .iter()
            .filter(|q| !exclude.contains(&q.id))
            .collect();
        let pool: Vec<&Question> = if eligible.is_empty() {
            active.iter().collect()
        } else {
            eligible
        };

        let mut rng = rand::rng();
        let index = rng.random_range(0..pool.len());
        Ok(Some(pool[index].clone()))
    }

    /// Each question joined with its aggregates, computed independently per
    /// question.
    fn questions_with_stats(&self) -> AppResult<Vec<QuestionWithStats>> {
        let questions = self.all_questions()?;
        let mut stats = Vec::with_capacity(questions.len());
        for question in questions {
            let avg_rating = self.average_rating(question.id)?;
            let total_ratings = self.ratings_for_question(question.id)?.len() as i64;
            stats.push(QuestionWithStats {
                question,
                avg_rating,
                total_ratings,
            });
        }
        Ok(stats)
    }

    /// Bootstraps the sample question set, but only into an empty store.
    /// Returns how many questions were inserted.
    fn seed_if_empty(&self) -> AppResult<usize> {
        if !self.all_questions()?.is_empty() {
            return Ok(0);
        }
        for sample in seed::SAMPLE_QUESTIONS {
            self.create_question(Question::new(
                sample.text.to_string(),
                sample.category.to_string(),
                true,
            ))?;
        }
        Ok(seed::SAMPLE_QUESTIONS.len())
    }
}

/// One-decimal rounding used by both backends for rating averages.
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> Question {
        Question::new(text.to_string(), "general".to_string(), true)
    }

    fn rating(question_id: i64, stars: i32) -> Rating {
        Rating::new(question_id, stars, "session-test".to_string())
    }

    /// The shared contract every backend must satisfy. Exercised below once
    /// per adapter.
    fn exercise_contract(store: &dyn QuestionStore) {
        // Fresh store is empty
        assert!(store.all_questions().unwrap().is_empty());
        assert!(store.random_question(&[]).unwrap().is_none());

        // Ids are assigned monotonically
        let first = store.create_question(question("Q1")).unwrap();
        let second = store.create_question(question("Q2")).unwrap();
        assert!(first.id > 0);
        assert!(second.id > first.id);

        // Listings are most-recently-created first
        let all = store.all_questions().unwrap();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);

        // Unrated questions report zero aggregates
        let stats = store.questions_with_stats().unwrap();
        assert!(stats.iter().all(|s| s.avg_rating == 0.0));
        assert!(stats.iter().all(|s| s.total_ratings == 0));

        // Average is the mean rounded to one decimal
        store.create_rating(rating(first.id, 4)).unwrap();
        store.create_rating(rating(first.id, 2)).unwrap();
        assert_eq!(store.average_rating(first.id).unwrap(), 3.0);
        store.create_rating(rating(second.id, 1)).unwrap();
        store.create_rating(rating(second.id, 2)).unwrap();
        store.create_rating(rating(second.id, 2)).unwrap();
        assert_eq!(store.average_rating(second.id).unwrap(), 1.7);

        // Partial update merges only the provided fields
        let patch = UpdateQuestionRequest {
            is_active: Some(false),
            ..Default::default()
        };
        let updated = store.update_question(first.id, &patch).unwrap().unwrap();
        assert_eq!(updated.text, "Q1");
        assert_eq!(updated.category, "general");
        assert!(!updated.is_active);
        assert_eq!(updated.created_at, first.created_at);

        // Inactive questions leave the active listing but not the full one
        let active = store.active_questions().unwrap();
        assert!(active.iter().all(|q| q.id != first.id));
        assert!(store
            .all_questions()
            .unwrap()
            .iter()
            .any(|q| q.id == first.id));

        // Update of a missing id reports None
        assert!(store.update_question(9999, &patch).unwrap().is_none());

        // Random picks never return an excluded id while alternatives exist
        let third = store.create_question(question("Q3")).unwrap();
        for _ in 0..50 {
            let picked = store.random_question(&[second.id]).unwrap().unwrap();
            assert_eq!(picked.id, third.id);
        }

        // ...but fall back to the active set when everything is excluded
        let picked = store
            .random_question(&[second.id, third.id])
            .unwrap()
            .unwrap();
        assert!(picked.id == second.id || picked.id == third.id);

        // Delete reports presence and leaves ratings behind
        assert!(store.delete_question(first.id).unwrap());
        assert!(store.question(first.id).unwrap().is_none());
        assert_eq!(store.ratings_for_question(first.id).unwrap().len(), 2);

        // Deleting a missing id is false, not an error, and changes nothing
        let before = store.all_questions().unwrap().len();
        assert!(!store.delete_question(first.id).unwrap());
        assert_eq!(store.all_questions().unwrap().len(), before);

        // Ids are never reused, even after a delete
        let fourth = store.create_question(question("Q4")).unwrap();
        assert!(fourth.id > third.id);

        // Orphaned ratings are accepted
        let orphan = store.create_rating(rating(12345, 5)).unwrap();
        assert!(orphan.id > 0);
        assert_eq!(store.average_rating(12345).unwrap(), 5.0);
    }

    fn exercise_seeding(store: &dyn QuestionStore) {
        assert_eq!(store.seed_if_empty().unwrap(), seed::SAMPLE_QUESTIONS.len());
        let seeded = store.all_questions().unwrap();
        assert_eq!(seeded.len(), seed::SAMPLE_QUESTIONS.len());
        assert!(seeded.iter().all(|q| q.is_active));

        // A populated store is never re-seeded
        assert_eq!(store.seed_if_empty().unwrap(), 0);
        assert_eq!(
            store.all_questions().unwrap().len(),
            seed::SAMPLE_QUESTIONS.len()
        );
    }

    #[test]
    fn memory_store_satisfies_contract() {
        let store = MemoryStore::new();
        exercise_contract(&store);
    }

    #[test]
    fn sqlite_store_satisfies_contract() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(&dir.path().join("contract.db")).unwrap();
        exercise_contract(&store);
    }

    #[test]
    fn memory_store_seeds_once() {
        let store = MemoryStore::new();
        exercise_seeding(&store);
    }

    #[test]
    fn sqlite_store_seeds_once_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("seeded.db");

        let store = SqliteStore::new(&db_path).unwrap();
        exercise_seeding(&store);
        drop(store);

        // The seed guard holds across restarts of the durable backend
        let reopened = SqliteStore::new(&db_path).unwrap();
        assert_eq!(reopened.seed_if_empty().unwrap(), 0);
        assert_eq!(
            reopened.all_questions().unwrap().len(),
            seed::SAMPLE_QUESTIONS.len()
        );
    }

    #[test]
    fn round_to_tenth_matches_expected_means() {
        assert_eq!(round_to_tenth(7.0 / 2.0), 3.5);
        assert_eq!(round_to_tenth(5.0 / 3.0), 1.7);
        assert_eq!(round_to_tenth(0.0), 0.0);
    }

    #[test]
    fn random_question_ignores_exclusions_of_inactive_ids() {
        let store = MemoryStore::new();
        let kept = store
            .create_question(Question::new(
                "Only active".to_string(),
                "general".to_string(),
                true,
            ))
            .unwrap();
        store
            .create_question(Question::new(
                "Dormant".to_string(),
                "general".to_string(),
                false,
            ))
            .unwrap();

        let picked = store.random_question(&[]).unwrap().unwrap();
        assert_eq!(picked.id, kept.id);
    }

    #[test]
    fn random_question_none_when_every_question_inactive() {
        let store = MemoryStore::new();
        store
            .create_question(Question::new(
                "Dormant".to_string(),
                "general".to_string(),
                false,
            ))
            .unwrap();
        assert!(store.random_question(&[]).unwrap().is_none());
    }
}
