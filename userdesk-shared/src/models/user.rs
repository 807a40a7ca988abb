/// User model and database operations
///
/// Each operation issues exactly one SQL statement against a connection the
/// caller has already acquired, so the caller controls the acquisition scope
/// and the connection goes back to the pool when the caller's guard drops.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     user_id  BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
///     username VARCHAR(255)    NOT NULL,
///     email    VARCHAR(255)    NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use userdesk_shared::models::user::{CreateUser, User};
/// use sqlx::MySqlPool;
///
/// # async fn example(pool: MySqlPool) -> Result<(), sqlx::Error> {
/// let mut conn = pool.acquire().await?;
///
/// let user_id = User::create(
///     &mut conn,
///     &CreateUser {
///         username: "ada".to_string(),
///         email: "ada@example.com".to_string(),
///     },
/// )
/// .await?;
///
/// let found = User::find_by_id(&mut conn, user_id).await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use sqlx::MySqlConnection;

/// User row as stored in the `users` table
///
/// `user_id` is assigned by the database on insert and never generated here.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Database-assigned identifier
    pub user_id: u64,

    /// Display name, never empty
    pub username: String,

    /// Email address
    pub email: String,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
}

impl User {
    /// Inserts a user and returns the identifier the database assigned
    ///
    /// # Errors
    ///
    /// Returns the driver error on constraint violations or connectivity
    /// loss. A failed insert leaves no row behind.
    pub async fn create(
        conn: &mut MySqlConnection,
        data: &CreateUser,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO users (username, email) VALUES (?, ?)")
            .bind(&data.username)
            .bind(&data.email)
            .execute(conn)
            .await?;

        Ok(result.last_insert_id())
    }

    /// Finds a user by ID
    ///
    /// Returns `None` if no row matches.
    pub async fn find_by_id(
        conn: &mut MySqlConnection,
        user_id: u64,
    ) -> Result<Option<Self>, sqlx::Error> {
        // CAST keeps the decoded type u64 whatever integer width the column uses
        sqlx::query_as::<_, User>(
            r#"
            SELECT CAST(user_id AS UNSIGNED) AS user_id, username, email
            FROM users
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(conn)
        .await
    }
}
