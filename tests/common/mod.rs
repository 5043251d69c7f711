use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::net::TcpListener;
use std::path::PathBuf;
use trivia_api::run;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
    pub api_client: reqwest::Client,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        // Each test gets its own database file; remove it and the WAL side
        // files so runs do not accrete garbage in the temp dir.
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", self.db_path.display(), suffix));
        }
    }
}

pub async fn spawn_app() -> TestApp {
    // Randomize database
    let (pool, db_path) = configure_database().await;

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = run(listener, pool.clone()).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: pool,
        api_client: reqwest::Client::new(),
        db_path,
    }
}

async fn configure_database() -> (SqlitePool, PathBuf) {
    let db_path = std::env::temp_dir().join(format!(
        "trivia_test_{}.db",
        Uuid::new_v4().simple()
    ));

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("Failed to connect to SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    (pool, db_path)
}

#[allow(dead_code)]
pub async fn seed_category(pool: &SqlitePool, kind: &str) -> i64 {
    sqlx::query("INSERT INTO categories (type) VALUES (?)")
        .bind(kind)
        .execute(pool)
        .await
        .expect("Failed to insert category")
        .last_insert_rowid()
}

#[allow(dead_code)]
pub async fn seed_question(
    pool: &SqlitePool,
    question: &str,
    answer: &str,
    category: Option<i64>,
    difficulty: Option<i64>,
) -> i64 {
    sqlx::query("INSERT INTO questions (question, answer, category, difficulty) VALUES (?, ?, ?, ?)")
        .bind(question)
        .bind(answer)
        .bind(category)
        .bind(difficulty)
        .execute(pool)
        .await
        .expect("Failed to insert question")
        .last_insert_rowid()
}

#[allow(dead_code)]
pub async fn question_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
        .expect("Failed to count questions")
}
