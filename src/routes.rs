// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{answer, auth, question, report},
    state::AppState,
    utils::jwt::{auth_middleware, lecturer_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, questions, answers, reports).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register/student", post(auth::register_student))
        .route("/register/lecturer", post(auth::register_lecturer))
        .route("/login", post(auth::login));

    let question_routes = Router::new()
        // Creation checks the lecturer role in the handler, so listing and
        // creating can share the method router.
        .route(
            "/",
            get(question::list_questions).post(question::create_question),
        )
        // Lecturer-only question management
        .merge(
            Router::new()
                .route("/{id}", put(question::update_question))
                .route("/{id}/answers", get(answer::question_answers))
                .layer(middleware::from_fn(lecturer_middleware)),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let answer_routes = Router::new()
        .route("/", post(answer::submit_answer))
        .merge(
            Router::new()
                .route("/{id}/score", post(answer::manual_score_answer))
                .layer(middleware::from_fn(lecturer_middleware)),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let student_routes = Router::new()
        .route("/{id}/answers", get(answer::student_answers))
        .route("/{id}/summary", get(report::score_summary))
        .route("/{id}/progress", get(report::progress_report))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let report_routes = Router::new()
        .route("/students", get(report::all_students_summary))
        .layer(middleware::from_fn(lecturer_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/questions", question_routes)
        .nest("/api/answers", answer_routes)
        .nest("/api/students", student_routes)
        .nest("/api/reports", report_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
