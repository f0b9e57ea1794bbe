use shared::models::{Role, User, UserStatus};
use sqlx::{SqliteExecutor, SqlitePool};

const USER_SELECT: &str = "SELECT id, username, email, role, status, created_at FROM users";

/// Login lookup row, carries the password hash
#[derive(sqlx::FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub status: UserStatus,
}

pub async fn create(
    exec: impl SqliteExecutor<'_>,
    username: &str,
    email: &str,
    password_hash: &str,
    role: Role,
    status: UserStatus,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO users (username, email, password_hash, role, status, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(status)
    .bind(now)
    .execute(exec)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_credentials(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<UserCredentials>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, username, email, password_hash, role, status FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(
    exec: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("{USER_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(exec)
        .await
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("{USER_SELECT} ORDER BY id"))
        .fetch_all(pool)
        .await
}

/// Compare-and-set on status. Returns false unless the user was in `from`.
pub async fn transition_status(
    exec: impl SqliteExecutor<'_>,
    id: i64,
    from: UserStatus,
    to: UserStatus,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("UPDATE users SET status = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(id)
        .bind(from)
        .execute(exec)
        .await?;
    Ok(rows.rows_affected() == 1)
}

/// True when either the username or the email is already registered
pub async fn identity_taken(
    exec: impl SqliteExecutor<'_>,
    username: &str,
    email: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ? OR email = ?")
        .bind(username)
        .bind(email)
        .fetch_one(exec)
        .await?;
    Ok(count > 0)
}

pub async fn admin_exists(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'admin'")
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}
