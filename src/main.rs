use env_logger::Env;
use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::net::TcpListener;
use std::str::FromStr;
use trivia_api::run;
use walkdir::WalkDir;

#[derive(Deserialize)]
struct CategorySeed {
    #[serde(rename = "type")]
    kind: String,
    questions: Vec<QuestionSeed>,
}

#[derive(Deserialize)]
struct QuestionSeed {
    question: String,
    answer: String,
    difficulty: Option<i64>,
}

/// Load the seed catalog from seed/*.json, one category per file. Only runs
/// against an empty database so restarts do not duplicate rows.
async fn seed_if_empty(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let seed_dir = "seed";
    log::info!("Seeding catalog from {}/", seed_dir);

    for entry in WalkDir::new(seed_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.path().extension().map_or(false, |ext| ext == "json") {
            continue;
        }
        let path = entry.path();

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to read seed file {:?}: {}", path, e);
                continue;
            }
        };
        let seed: CategorySeed = match serde_json::from_str(&content) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to parse seed file {:?}: {}", path, e);
                continue;
            }
        };

        let category_id = sqlx::query("INSERT INTO categories (type) VALUES (?)")
            .bind(&seed.kind)
            .execute(pool)
            .await?
            .last_insert_rowid();

        for question in &seed.questions {
            sqlx::query(
                "INSERT INTO questions (question, answer, category, difficulty) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&question.question)
            .bind(&question.answer)
            .bind(category_id)
            .bind(question.difficulty)
            .execute(pool)
            .await?;
        }
        log::info!(
            "Seeded category '{}' with {} questions",
            seed.kind,
            seed.questions.len()
        );
    }

    Ok(())
}

fn to_io_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:trivia.db".to_string());
    let options = SqliteConnectOptions::from_str(&database_url)
        .map_err(to_io_error)?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .map_err(to_io_error)?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(to_io_error)?;
    seed_if_empty(&pool).await.map_err(to_io_error)?;

    log::info!("Starting server at http://0.0.0.0:8080");
    log::info!("OpenAPI document at http://localhost:8080/api-docs/openapi.json");

    let listener = TcpListener::bind("0.0.0.0:8080")?;
    run(listener, pool)?.await
}
