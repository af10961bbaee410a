// src/db/users.rs
use crate::domain::User;
use crate::errors::ServerError;
use rusqlite::{params, Connection};

/// Insert a user if they don't exist (by username), then return the stored row.
pub fn get_or_create_user(
    conn: &Connection,
    username: &str,
    email: &str,
    now: i64,
) -> Result<User, ServerError> {
    conn.execute(
        "insert or ignore into users (username, email, created_at) values (?, ?, ?)",
        params![username, email, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert user failed: {e}")))?;

    conn.query_row(
        "select id, username, email from users where username = ?",
        params![username],
        |r| {
            Ok(User {
                id: r.get(0)?,
                username: r.get(1)?,
                email: r.get(2)?,
            })
        },
    )
    .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_create_user_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(include_str!("../../sql/schema.sql")).unwrap();

        let a = get_or_create_user(&conn, "amy", "amy@example.com", 1000).unwrap();
        let b = get_or_create_user(&conn, "amy", "amy@example.com", 1001).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.username, "amy");
    }
}
