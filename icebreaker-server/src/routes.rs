//! Centralized route configuration for the icebreaker API.
//!
//! This module provides a shared function to configure all application
//! routes, allowing both the main server and test servers to use the same
//! routing setup.

use crate::handlers::{main_handlers, question_handlers, rating_handlers};
use actix_web::web;

/// Configures all application routes for the given scope.
///
/// The literal `active`/`stats`/`random` segments are registered before the
/// `{id}` routes so they are matched first.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(main_handlers::health_check))
            // Question listings
            .route("/questions", web::get().to(question_handlers::get_questions))
            .route(
                "/questions",
                web::post().to(question_handlers::create_question),
            )
            .route(
                "/questions/active",
                web::get().to(question_handlers::get_active_questions),
            )
            .route(
                "/questions/stats",
                web::get().to(question_handlers::get_question_stats),
            )
            .route(
                "/questions/random",
                web::get().to(question_handlers::get_random_question),
            )
            // Single-question operations
            .route(
                "/questions/{id}",
                web::get().to(question_handlers::get_question),
            )
            .route(
                "/questions/{id}",
                web::put().to(question_handlers::update_question),
            )
            .route(
                "/questions/{id}",
                web::delete().to(question_handlers::delete_question),
            )
            .route(
                "/questions/{id}/ratings",
                web::get().to(rating_handlers::get_question_ratings),
            )
            .route(
                "/questions/{id}/average-rating",
                web::get().to(rating_handlers::get_average_rating),
            )
            // Ratings
            .route("/ratings", web::post().to(rating_handlers::create_rating)),
    );
}
