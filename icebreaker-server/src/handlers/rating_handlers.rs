use super::main_handlers::AppState;
use crate::error::AppError;
use actix_web::{web, HttpResponse, Result};
use icebreaker_models::{AverageRatingResponse, CreateRatingRequest, Rating};

pub async fn create_rating(
    data: web::Data<AppState>,
    request: web::Json<CreateRatingRequest>,
) -> Result<HttpResponse, AppError> {
    let req = request.into_inner();

    let errors = req.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // The referenced question is not required to exist; a rating submitted
    // against a just-deleted question is recorded as an orphan.
    let rating = data
        .store
        .create_rating(Rating::new(req.question_id, req.rating, req.session_id))?;

    Ok(HttpResponse::Created().json(rating))
}

pub async fn get_question_ratings(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let question_id = path.into_inner();
    let ratings = data.store.ratings_for_question(question_id)?;
    Ok(HttpResponse::Ok().json(ratings))
}

pub async fn get_average_rating(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let question_id = path.into_inner();
    let average_rating = data.store.average_rating(question_id)?;

    Ok(HttpResponse::Ok().json(AverageRatingResponse {
        question_id,
        average_rating,
    }))
}
