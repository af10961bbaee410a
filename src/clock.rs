use time::OffsetDateTime;

/// Seconds since the unix epoch (UTC).
pub fn now_unix() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}
