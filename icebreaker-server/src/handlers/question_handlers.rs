use super::main_handlers::AppState;
use crate::error::AppError;
use actix_web::{web, HttpResponse, Result};
use icebreaker_models::{CreateQuestionRequest, Question, UpdateQuestionRequest};
use serde::Deserialize;

pub async fn get_questions(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let questions = data.store.all_questions()?;
    Ok(HttpResponse::Ok().json(questions))
}

pub async fn get_active_questions(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let questions = data.store.active_questions()?;
    Ok(HttpResponse::Ok().json(questions))
}

pub async fn get_question_stats(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let stats = data.store.questions_with_stats()?;
    Ok(HttpResponse::Ok().json(stats))
}

#[derive(Debug, Deserialize)]
pub struct RandomQuery {
    pub exclude: Option<String>,
}

/// Comma-separated id list; entries that do not parse as integers are
/// silently dropped, matching the original client contract.
fn parse_exclude_ids(raw: Option<&str>) -> Vec<i64> {
    raw.map(|s| {
        s.split(',')
            .filter_map(|part| part.trim().parse::<i64>().ok())
            .collect()
    })
    .unwrap_or_default()
}

pub async fn get_random_question(
    data: web::Data<AppState>,
    query: web::Query<RandomQuery>,
) -> Result<HttpResponse, AppError> {
    let exclude_ids = parse_exclude_ids(query.exclude.as_deref());

    let question = data
        .store
        .random_question(&exclude_ids)?
        .ok_or_else(|| AppError::NotFound("No active questions available".to_string()))?;

    Ok(HttpResponse::Ok().json(question))
}

pub async fn get_question(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let question_id = path.into_inner();
    let question = data
        .store
        .question(question_id)?
        .ok_or(AppError::QuestionNotFound(question_id))?;

    Ok(HttpResponse::Ok().json(question))
}

pub async fn create_question(
    data: web::Data<AppState>,
    request: web::Json<CreateQuestionRequest>,
) -> Result<HttpResponse, AppError> {
    let req = request.into_inner();

    let errors = req.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let question = data.store.create_question(Question::new(
        req.text,
        req.category.unwrap_or_else(|| "general".to_string()),
        req.is_active.unwrap_or(true),
    ))?;

    Ok(HttpResponse::Created().json(question))
}

pub async fn update_question(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    request: web::Json<UpdateQuestionRequest>,
) -> Result<HttpResponse, AppError> {
    let question_id = path.into_inner();
    let patch = request.into_inner();

    let errors = patch.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let question = data
        .store
        .update_question(question_id, &patch)?
        .ok_or(AppError::QuestionNotFound(question_id))?;

    Ok(HttpResponse::Ok().json(question))
}

pub async fn delete_question(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let question_id = path.into_inner();

    if !data.store.delete_question(question_id)? {
        return Err(AppError::QuestionNotFound(question_id));
    }

    Ok(HttpResponse::NoContent().finish())
}
