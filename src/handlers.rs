use actix_web::{web, HttpResponse, Responder};
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::models::{
    Category, CategoryListResponse, CategoryQuestionsResponse, CreateQuestionRequest,
    CreateQuestionResponse, DeleteQuestionResponse, ErrorResponse, PaginationParams, Question,
    QuestionListResponse, QuestionsRequest, QuizPlayRequest, QuizPlayResponse,
    SearchQuestionsResponse, SearchRequest,
};
use crate::state::AppState;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// Slice a full result set down to one fixed-size page. Pages are numbered
/// from 1; a page past the end is simply empty.
fn paginate(questions: &[Question], page: u32) -> &[Question] {
    let start = (page as usize - 1) * QUESTIONS_PER_PAGE;
    if start >= questions.len() {
        return &[];
    }
    let end = (start + QUESTIONS_PER_PAGE).min(questions.len());
    &questions[start..end]
}

async fn fetch_all_questions(db: &SqlitePool) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
    )
    .fetch_all(db)
    .await
}

async fn fetch_category_questions(
    db: &SqlitePool,
    category_id: i64,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        "SELECT id, question, answer, category, difficulty FROM questions \
         WHERE category = ? ORDER BY id",
    )
    .bind(category_id)
    .fetch_all(db)
    .await
}

/// Display names for the given category ids, in category-id order. Ids are
/// interpolated directly; they come from our own rows, not from the client.
async fn category_types(db: &SqlitePool, ids: &[i64]) -> Result<Vec<String>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let id_list = ids
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let sql = format!(
        "SELECT type FROM categories WHERE id IN ({}) ORDER BY id",
        id_list
    );
    sqlx::query_scalar(&sql).fetch_all(db).await
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "Health Check", body = String)
    )
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All category ids", body = CategoryListResponse),
        (status = 404, description = "No categories exist", body = ErrorResponse)
    )
)]
pub async fn retrieve_categories(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&data.db)
            .await?;

    // An empty catalog is an error, not an empty success.
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(HttpResponse::Ok().json(CategoryListResponse {
        success: true,
        categories: categories.into_iter().map(|c| c.id).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/questions",
    tag = "Questions",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of questions", body = QuestionListResponse),
        (status = 404, description = "Page is empty", body = ErrorResponse)
    )
)]
pub async fn retrieve_questions(
    data: web::Data<AppState>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, ApiError> {
    let questions = fetch_all_questions(&data.db).await?;
    let current = paginate(&questions, query.page());
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    // Distinct category ids present on the current page only. The first
    // matching display name is surfaced as current_category even when the
    // page spans several categories.
    let mut page_category_ids: Vec<i64> = Vec::new();
    for question in current {
        if let Some(category) = question.category {
            if !page_category_ids.contains(&category) {
                page_category_ids.push(category);
            }
        }
    }
    let categories = category_types(&data.db, &page_category_ids).await?;
    let current_category = categories.first().cloned();

    Ok(HttpResponse::Ok().json(QuestionListResponse {
        success: true,
        questions: current.to_vec(),
        total_questions: questions.len(),
        current_category,
        categories,
    }))
}

#[utoipa::path(
    delete,
    path = "/questions/{id}",
    tag = "Questions",
    params(
        ("id" = i64, Path, description = "Question id")
    ),
    responses(
        (status = 200, description = "Question deleted", body = DeleteQuestionResponse),
        (status = 404, description = "Question not found", body = ErrorResponse)
    )
)]
pub async fn delete_question(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let question_id = path.into_inner();
    let result = sqlx::query("DELETE FROM questions WHERE id = ?")
        .bind(question_id)
        .execute(&data.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }

    let questions = fetch_all_questions(&data.db).await?;
    let current = paginate(&questions, 1);

    Ok(HttpResponse::Ok().json(DeleteQuestionResponse {
        success: true,
        question: current.to_vec(),
        total_questions: questions.len(),
    }))
}

#[utoipa::path(
    post,
    path = "/questions",
    tag = "Questions",
    params(PaginationParams),
    request_body = QuestionsRequest,
    responses(
        (status = 200, description = "Question created or search results", body = CreateQuestionResponse),
        (status = 404, description = "Search found nothing", body = ErrorResponse),
        (status = 422, description = "Question or answer missing", body = ErrorResponse)
    )
)]
pub async fn post_questions(
    data: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    body: web::Json<QuestionsRequest>,
) -> Result<HttpResponse, ApiError> {
    match body.into_inner() {
        QuestionsRequest::Search(req) => search_questions(&data, &query, req).await,
        QuestionsRequest::Create(req) => create_question(&data, &query, req).await,
    }
}

async fn create_question(
    data: &web::Data<AppState>,
    query: &PaginationParams,
    req: CreateQuestionRequest,
) -> Result<HttpResponse, ApiError> {
    let question = req.question.filter(|q| !q.is_empty());
    let answer = req.answer.filter(|a| !a.is_empty());
    let (Some(question), Some(answer)) = (question, answer) else {
        return Err(ApiError::Unprocessable);
    };

    let result = sqlx::query(
        "INSERT INTO questions (question, answer, category, difficulty) VALUES (?, ?, ?, ?)",
    )
    .bind(&question)
    .bind(&answer)
    .bind(req.category)
    .bind(req.difficulty)
    .execute(&data.db)
    .await
    .map_err(|e| {
        log::error!("failed to insert question: {}", e);
        ApiError::Unprocessable
    })?;
    let created = result.last_insert_rowid();

    let questions = fetch_all_questions(&data.db).await?;
    let current = paginate(&questions, query.page());

    Ok(HttpResponse::Ok().json(CreateQuestionResponse {
        success: true,
        created,
        questions: current.to_vec(),
        total_questions: questions.len(),
    }))
}

async fn search_questions(
    data: &web::Data<AppState>,
    query: &PaginationParams,
    req: SearchRequest,
) -> Result<HttpResponse, ApiError> {
    // Folding happens in Rust on both sides: SQLite's LOWER() only folds
    // ASCII, which would miss matches in non-ASCII text.
    let term = req.search.to_lowercase();
    let questions: Vec<Question> = fetch_all_questions(&data.db)
        .await?
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&term))
        .collect();

    let current = paginate(&questions, query.page());
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(HttpResponse::Ok().json(SearchQuestionsResponse {
        success: true,
        questions: current.to_vec(),
        total_questions: questions.len(),
    }))
}

#[utoipa::path(
    get,
    path = "/categories/{id}/questions",
    tag = "Categories",
    params(
        ("id" = i64, Path, description = "Category id"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "One page of the category's questions", body = CategoryQuestionsResponse),
        (status = 404, description = "Category missing or page empty", body = ErrorResponse)
    )
)]
pub async fn retrieve_category_questions(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, ApiError> {
    let category_id = path.into_inner();

    // Look the category up before touching questions, so an unknown id is a
    // clean 404 rather than a failed display-name lookup.
    let category =
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = ?")
            .bind(category_id)
            .fetch_optional(&data.db)
            .await?
            .ok_or(ApiError::NotFound)?;

    let questions = fetch_category_questions(&data.db, category_id).await?;
    let current = paginate(&questions, query.page());
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(HttpResponse::Ok().json(CategoryQuestionsResponse {
        success: true,
        questions: current.to_vec(),
        total_questions: questions.len(),
        category: category.kind,
    }))
}

#[utoipa::path(
    post,
    path = "/quizzes",
    tag = "Quiz",
    request_body = QuizPlayRequest,
    responses(
        (status = 200, description = "Next unseen question", body = QuizPlayResponse),
        (status = 404, description = "All candidate questions have been seen", body = ErrorResponse)
    )
)]
pub async fn play_quiz(
    data: web::Data<AppState>,
    body: web::Json<QuizPlayRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = body.into_inner();
    let candidates = if req.quiz_category.id != 0 {
        fetch_category_questions(&data.db, req.quiz_category.id).await?
    } else {
        fetch_all_questions(&data.db).await?
    };

    // Deliberately deterministic: the first unseen question in storage order
    // wins. The client carries previous_questions between calls.
    let question = candidates
        .into_iter()
        .find(|q| !req.previous_questions.contains(&q.id))
        .ok_or(ApiError::NotFound)?;

    Ok(HttpResponse::Ok().json(QuizPlayResponse {
        success: true,
        question,
    }))
}

/// Default service: unknown routes get the same 404 envelope as everything
/// else.
pub async fn fallback_not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}
