use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{http::header, middleware, web, App, HttpServer, Responder};
use sqlx::SqlitePool;
use std::net::TcpListener;
use utoipa::OpenApi;

use crate::error::ApiError;
use crate::models::{
    Category, CategoryListResponse, CategoryQuestionsResponse, CreateQuestionRequest,
    CreateQuestionResponse, DeleteQuestionResponse, ErrorResponse, Question,
    QuestionListResponse, QuestionsRequest, QuizCategory, QuizPlayRequest, QuizPlayResponse,
    SearchQuestionsResponse, SearchRequest,
};

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check,
        handlers::retrieve_categories,
        handlers::retrieve_questions,
        handlers::delete_question,
        handlers::post_questions,
        handlers::retrieve_category_questions,
        handlers::play_quiz,
    ),
    components(
        schemas(
            Question, Category,
            QuestionsRequest, SearchRequest, CreateQuestionRequest,
            QuizPlayRequest, QuizCategory,
            CategoryListResponse, QuestionListResponse, DeleteQuestionResponse,
            CreateQuestionResponse, SearchQuestionsResponse, CategoryQuestionsResponse,
            QuizPlayResponse, ErrorResponse
        )
    ),
    tags(
        (name = "System", description = "System endpoints"),
        (name = "Categories", description = "Category listing and category-scoped questions"),
        (name = "Questions", description = "Question management and search"),
        (name = "Quiz", description = "Quiz play")
    )
)]
pub struct ApiDoc;

async fn serve_openapi() -> impl Responder {
    web::Json(ApiDoc::openapi())
}

pub fn run(listener: TcpListener, db: SqlitePool) -> Result<Server, std::io::Error> {
    let data = web::Data::new(AppState { db });

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "PUT", "PATCH", "POST", "DELETE"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION]);

        App::new()
            .app_data(data.clone())
            // Extractor failures render as the uniform error envelope.
            .app_data(
                web::JsonConfig::default().error_handler(|_, _| ApiError::BadRequest.into()),
            )
            .app_data(web::PathConfig::default().error_handler(|_, _| ApiError::NotFound.into()))
            .app_data(
                web::QueryConfig::default().error_handler(|_, _| ApiError::BadRequest.into()),
            )
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .route("/api-docs/openapi.json", web::get().to(serve_openapi))
            .route("/health", web::get().to(handlers::health_check))
            .service(
                web::scope("/categories")
                    .route("", web::get().to(handlers::retrieve_categories))
                    .route(
                        "/{id}/questions",
                        web::get().to(handlers::retrieve_category_questions),
                    ),
            )
            .service(
                web::scope("/questions")
                    .route("", web::get().to(handlers::retrieve_questions))
                    .route("", web::post().to(handlers::post_questions))
                    .route("/{id}", web::delete().to(handlers::delete_question)),
            )
            .route("/quizzes", web::post().to(handlers::play_quiz))
            .default_service(web::route().to(handlers::fallback_not_found))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
