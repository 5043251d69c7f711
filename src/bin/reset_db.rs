use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::str::FromStr;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:trivia.db".to_string());

    let options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    println!("Resetting database...");

    // Empty the tables but keep the schema, and restart the id sequences.
    sqlx::query("DELETE FROM questions").execute(&pool).await?;
    sqlx::query("DELETE FROM categories").execute(&pool).await?;
    // sqlite_sequence only exists after the first AUTOINCREMENT insert.
    let _ = sqlx::query("DELETE FROM sqlite_sequence WHERE name IN ('questions', 'categories')")
        .execute(&pool)
        .await;

    println!("Database reset successfully!");
    Ok(())
}
