use chrono::{DateTime, Utc};
use log::info;

use crate::config::settings::GateSettings;
use crate::errors::{ConsoleError, ConsoleResult, ValidationError};

use super::session::{sanitize_return_target, AdminSession};
use super::storage::LocalStorage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A valid session already existed; nothing was written.
    AlreadyAuthenticated { return_to: String },
    LoggedIn { return_to: String },
}

impl LoginOutcome {
    pub fn return_to(&self) -> &str {
        match self {
            LoginOutcome::AlreadyAuthenticated { return_to } | LoginOutcome::LoggedIn { return_to } => {
                return_to
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Active { expires_at: Option<DateTime<Utc>> },
    Missing,
}

/// Route gate in front of the admin commands.
pub struct AdminGate {
    storage: LocalStorage,
    settings: GateSettings,
}

impl AdminGate {
    pub fn new(storage: LocalStorage, settings: GateSettings) -> Self {
        Self { storage, settings }
    }

    pub fn status(&self, now: DateTime<Utc>) -> ConsoleResult<SessionStatus> {
        Ok(match self.valid_session(now)? {
            Some(session) => SessionStatus::Active {
                expires_at: session.expires_at(self.settings.session_ttl),
            },
            None => SessionStatus::Missing,
        })
    }

    pub fn is_authenticated(&self, now: DateTime<Utc>) -> ConsoleResult<bool> {
        Ok(self.valid_session(now)?.is_some())
    }

    /// Fail with `LoginRequired` unless a valid session exists.
    pub fn require(&self, now: DateTime<Utc>) -> ConsoleResult<()> {
        if self.is_authenticated(now)? {
            return Ok(());
        }
        Err(ConsoleError::LoginRequired {
            return_to: self.settings.default_return.to_string(),
        })
    }

    pub fn login(
        &self,
        password: &str,
        return_target: Option<&str>,
        now: DateTime<Utc>,
    ) -> ConsoleResult<LoginOutcome> {
        let return_to = sanitize_return_target(return_target, self.settings.default_return);

        if self.is_authenticated(now)? {
            return Ok(LoginOutcome::AlreadyAuthenticated { return_to });
        }

        let password = password.trim();
        if password.is_empty() {
            return Err(ValidationError::EmptyPassword.into());
        }
        if password != self.settings.password {
            return Err(ValidationError::IncorrectPassword.into());
        }

        let session = AdminSession::started_at(now);
        self.storage
            .set_item(self.settings.storage_key, &session.to_json())
            .map_err(storage_error)?;
        info!("Admin session started");

        Ok(LoginOutcome::LoggedIn { return_to })
    }

    pub fn logout(&self) -> ConsoleResult<()> {
        self.storage
            .remove_item(self.settings.storage_key)
            .map_err(storage_error)
    }

    fn valid_session(&self, now: DateTime<Utc>) -> ConsoleResult<Option<AdminSession>> {
        let raw = self
            .storage
            .get_item(self.settings.storage_key)
            .map_err(storage_error)?;

        Ok(raw
            .as_deref()
            .and_then(AdminSession::parse)
            .filter(|session| session.is_valid_at(now, self.settings.session_ttl)))
    }
}

fn storage_error(e: anyhow::Error) -> ConsoleError {
    ConsoleError::Storage(format!("{e:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn gate() -> (TempDir, AdminGate) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).unwrap();
        (dir, AdminGate::new(storage, GateSettings::default()))
    }

    #[test]
    fn test_login_rejects_empty_and_wrong_password() {
        let (_dir, gate) = gate();
        let now = Utc::now();

        assert!(matches!(
            gate.login("   ", None, now),
            Err(ConsoleError::Validation(ValidationError::EmptyPassword))
        ));
        assert!(matches!(
            gate.login("hunter2", None, now),
            Err(ConsoleError::Validation(ValidationError::IncorrectPassword))
        ));
        assert!(!gate.is_authenticated(now).unwrap());
    }

    #[test]
    fn test_login_sets_session_and_sanitizes_target() {
        let (_dir, gate) = gate();
        let now = Utc::now();

        let outcome = gate.login(" change-me ", Some("http://evil/x"), now).unwrap();
        assert_eq!(
            outcome,
            LoginOutcome::LoggedIn { return_to: "admin.html".to_string() }
        );
        assert!(gate.is_authenticated(now).unwrap());
        gate.require(now).unwrap();

        let again = gate.login("", Some("scores.html"), now).unwrap();
        assert_eq!(again.return_to(), "scores.html");
        assert!(matches!(again, LoginOutcome::AlreadyAuthenticated { .. }));
    }

    #[test]
    fn test_session_expires_after_twelve_hours() {
        let (_dir, gate) = gate();
        let now = Utc::now();
        gate.login("change-me", None, now).unwrap();

        let later = now + Duration::hours(12) + Duration::milliseconds(1);
        assert!(matches!(
            gate.require(later),
            Err(ConsoleError::LoginRequired { return_to }) if return_to == "admin.html"
        ));
        assert_eq!(gate.status(later).unwrap(), SessionStatus::Missing);
    }

    #[test]
    fn test_far_future_session_has_no_expiry() {
        let (_dir, gate) = gate();
        gate.storage
            .set_item(gate.settings.storage_key, r#"{"ts": 1e300}"#)
            .unwrap();

        assert_eq!(
            gate.status(Utc::now()).unwrap(),
            SessionStatus::Active { expires_at: None }
        );
    }

    #[test]
    fn test_logout_clears_flag() {
        let (_dir, gate) = gate();
        let now = Utc::now();
        gate.login("change-me", None, now).unwrap();
        assert!(matches!(gate.status(now).unwrap(), SessionStatus::Active { .. }));

        gate.logout().unwrap();
        assert!(!gate.is_authenticated(now).unwrap());
        gate.logout().unwrap();
    }
}
