use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::time::Duration;

/// Client-side admin flag. Gates console commands; the backend does not trust it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdminSession {
    /// Creation time in epoch milliseconds.
    pub ts: f64,
}

impl AdminSession {
    pub fn started_at(now: DateTime<Utc>) -> Self {
        Self {
            ts: now.timestamp_millis() as f64,
        }
    }

    /// Parse the stored value; anything without a numeric `ts` is no session.
    pub fn parse(raw: &str) -> Option<Self> {
        let data: Value = serde_json::from_str(raw).ok()?;
        let ts = data.get("ts")?.as_f64()?;
        Some(Self { ts })
    }

    pub fn to_json(&self) -> String {
        json!({ "ts": self.ts as i64 }).to_string()
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age_ms = now.timestamp_millis() as f64 - self.ts;
        age_ms < ttl.as_millis() as f64
    }

    pub fn expires_at(&self, ttl: Duration) -> Option<DateTime<Utc>> {
        (self.ts as i64)
            .checked_add(ttl.as_millis() as i64)
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}

/// Return target after login, restricted to relative console pages.
pub fn sanitize_return_target(value: Option<&str>, default: &str) -> String {
    let target = value.filter(|v| !v.is_empty()).unwrap_or(default);
    if target.contains("..") || target.contains("://") || target.starts_with('/') {
        return default.to_string();
    }
    target.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    const TTL: Duration = Duration::from_secs(12 * 60 * 60);

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).single().unwrap()
    }

    #[test]
    fn test_validity_window_edges() {
        let created = at(1_700_000_000_000);
        let session = AdminSession::started_at(created);
        let twelve_hours = ChronoDuration::hours(12);
        let one_ms = ChronoDuration::milliseconds(1);

        assert!(session.is_valid_at(created, TTL));
        assert!(session.is_valid_at(created + twelve_hours - one_ms, TTL));
        assert!(!session.is_valid_at(created + twelve_hours, TTL));
        assert!(!session.is_valid_at(created + twelve_hours + one_ms, TTL));
    }

    #[test]
    fn test_parse_requires_numeric_ts() {
        assert_eq!(AdminSession::parse("{\"ts\": 1234}"), Some(AdminSession { ts: 1234.0 }));
        assert_eq!(AdminSession::parse("{\"ts\": \"1234\"}"), None);
        assert_eq!(AdminSession::parse("{}"), None);
        assert_eq!(AdminSession::parse("null"), None);
        assert_eq!(AdminSession::parse("garbage"), None);
    }

    #[test]
    fn test_json_round_trip_keeps_millis() {
        let session = AdminSession::started_at(at(1_700_000_000_123));
        assert_eq!(session.to_json(), "{\"ts\":1700000000123}");
        assert_eq!(AdminSession::parse(&session.to_json()), Some(session));
        assert_eq!(session.expires_at(TTL), Some(at(1_700_043_200_123)));
    }

    #[test]
    fn test_return_target_sanitization() {
        let default = "admin.html";
        assert_eq!(sanitize_return_target(Some("admin.html"), default), "admin.html");
        assert_eq!(sanitize_return_target(Some("scoreboard.html"), default), "scoreboard.html");
        assert_eq!(sanitize_return_target(Some("../x"), default), default);
        assert_eq!(sanitize_return_target(Some("http://evil/x"), default), default);
        assert_eq!(sanitize_return_target(Some("/x"), default), default);
        assert_eq!(sanitize_return_target(Some(""), default), default);
        assert_eq!(sanitize_return_target(None, default), default);
    }
}
