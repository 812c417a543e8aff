use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use std::str::FromStr;
use thiserror::Error;
use crate::models::*;

#[derive(Debug, Error)]
pub enum DbError {
    /// A unique constraint rejected the write
    #[error("duplicate key")]
    DuplicateKey,
    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let unique = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());

        if unique {
            DbError::DuplicateKey
        } else {
            DbError::Sqlx(err)
        }
    }
}

/// Open a pool for `database_url`, creating the database file if needed.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new().connect_with(options).await
}

/// Single-connection pool over a private in-memory database.
///
/// Every SQLite `:memory:` connection is its own database, so the pool is
/// pinned to one connection that is never recycled.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

/// Create the `users` and `players` tables if they don't exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS users (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               username TEXT NOT NULL UNIQUE,
               password TEXT NOT NULL,
               is_admin INTEGER NOT NULL DEFAULT 0,
               budget REAL NOT NULL DEFAULT 9000000,
               team TEXT NOT NULL DEFAULT '[]'
           )"#
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS players (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               name TEXT NOT NULL,
               university TEXT NOT NULL,
               category TEXT NOT NULL,
               runs REAL NOT NULL DEFAULT 0,
               wickets REAL NOT NULL DEFAULT 0,
               strike_rate REAL NOT NULL DEFAULT 0,
               economy REAL NOT NULL DEFAULT 0,
               value REAL NOT NULL DEFAULT 0,
               points REAL NOT NULL DEFAULT 0
           )"#
    )
    .execute(pool)
    .await?;

    Ok(())
}

// User queries
pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, DbError> {
    let user = sqlx::query_as::<_, User>(
        r#"SELECT * FROM users WHERE username = ?"#
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Insert a user. A taken username comes back as [`DbError::DuplicateKey`].
pub async fn create_user(pool: &SqlitePool, user: &NewUser) -> Result<User, DbError> {
    let created = sqlx::query_as::<_, User>(
        r#"INSERT INTO users (username, password, is_admin, budget, team)
           VALUES (?, ?, ?, ?, ?)
           RETURNING *"#
    )
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(user.is_admin)
    .bind(user.budget)
    .bind(Json(&user.team))
    .fetch_one(pool)
    .await?;

    Ok(created)
}

// Player queries
pub async fn get_all_players(pool: &SqlitePool) -> Result<Vec<Player>, DbError> {
    let rows = sqlx::query_as::<_, PlayerRow>(
        r#"SELECT * FROM players ORDER BY id"#
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Player::from).collect())
}

pub async fn create_player(pool: &SqlitePool, player: &NewPlayer) -> Result<Player, DbError> {
    let row = sqlx::query_as::<_, PlayerRow>(
        r#"INSERT INTO players
               (name, university, category, runs, wickets, strike_rate, economy, value, points)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
           RETURNING *"#
    )
    .bind(&player.name)
    .bind(&player.university)
    .bind(&player.category)
    .bind(player.stats.runs)
    .bind(player.stats.wickets)
    .bind(player.stats.strike_rate)
    .bind(player.stats.economy)
    .bind(player.value)
    .bind(player.points)
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}
