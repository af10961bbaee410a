// src/auth/sessions.rs
#[cfg(test)]
use crate::auth::token::generate_token_default;
use crate::auth::token::hash_token;
use crate::domain::UserId;
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

#[cfg(test)]
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7;

/// The acting user, as resolved from the `session` cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
}

/// Issues a session and returns the raw cookie token. Sessions are issued by
/// the login front-end; here only tests need it.
#[cfg(test)]
pub fn create_session(conn: &Connection, user_id: UserId, now: i64) -> Result<String, ServerError> {
    let raw_token = generate_token_default();
    let hash = hash_token(&raw_token);

    conn.execute(
        r#"
        insert into sessions (user_id, token_hash, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![user_id, hash.as_slice(), now, now + SESSION_TTL_SECS],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

pub fn load_user_from_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<CurrentUser>, ServerError> {
    let hash = hash_token(raw_token);

    conn.query_row(
        r#"
        select u.id, u.username
        from sessions s
        join users u on u.id = s.user_id
        where s.token_hash = ?
          and s.expires_at > ?
          and s.revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| {
            Ok(CurrentUser {
                id: row.get(0)?,
                username: row.get(1)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}
