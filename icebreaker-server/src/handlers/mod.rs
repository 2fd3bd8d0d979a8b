// Main handlers (system/health handlers)
pub mod main_handlers;
pub use main_handlers::AppState;

// Question handlers module
pub mod question_handlers;

// Rating handlers module
pub mod rating_handlers;
