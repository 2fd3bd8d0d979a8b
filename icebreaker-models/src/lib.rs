use chrono::Utc;
use serde::{Deserialize, Serialize};

// Shared models for the icebreaker server. Wire field names are camelCase to
// match the JSON contract consumed by the game and admin clients.

/// A prompt shown to game participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub category: String,
    pub is_active: bool,
    pub created_at: i64,
}

impl Question {
    pub fn new(text: String, category: String, is_active: bool) -> Self {
        Self {
            id: 0, // Will be set by the store
            text,
            category,
            is_active,
            created_at: Utc::now().timestamp(),
        }
    }
}

/// A participant's 1-5 star feedback on a question, scoped to a client session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: i64,
    pub question_id: i64,
    pub rating: i32,
    pub session_id: String,
    pub created_at: i64,
}

impl Rating {
    pub fn new(question_id: i64, rating: i32, session_id: String) -> Self {
        Self {
            id: 0, // Will be set by the store
            question_id,
            rating,
            session_id,
            created_at: Utc::now().timestamp(),
        }
    }
}

/// A question joined with its rating aggregates. Derived, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionWithStats {
    #[serde(flatten)]
    pub question: Question,
    pub avg_rating: f64,
    pub total_ratings: i64,
}

/// One field-level validation failure, reported in the `errors` array of a
/// 400 response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub text: String,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

impl CreateQuestionRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.text.trim().is_empty() {
            errors.push(FieldError::new("text", "Question text cannot be empty"));
        }
        errors
    }
}

/// Partial update: absent fields leave the stored record untouched.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    pub text: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateQuestionRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(text) = &self.text {
            if text.trim().is_empty() {
                errors.push(FieldError::new("text", "Question text cannot be empty"));
            }
        }
        errors
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingRequest {
    pub question_id: i64,
    pub rating: i32,
    pub session_id: String,
}

impl CreateRatingRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.question_id <= 0 {
            errors.push(FieldError::new(
                "questionId",
                "questionId must be a positive integer",
            ));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            errors.push(FieldError::new(
                "rating",
                "rating must be between 1 and 5 stars",
            ));
        }
        if self.session_id.trim().is_empty() {
            errors.push(FieldError::new("sessionId", "sessionId cannot be empty"));
        }
        errors
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageRatingResponse {
    pub question_id: i64,
    pub average_rating: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerStatus {
    pub status: String,
    pub version: String,
    pub uptime: u64,
}
