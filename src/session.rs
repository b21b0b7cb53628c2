//! Mock session flow.
//!
//! Holds at most one authenticated identity. No real credential
//! verification happens here: login succeeds for any plausible email and
//! non-empty password, deriving a display name and avatar from the email.
//! Each login/signup takes a monotonically increasing request token and
//! only the settlement carrying the latest token may touch session state,
//! so a stale response can never clobber a newer request's outcome.
//!
//! The workspace store never reads anything from this module.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;

/// Logical key of the session document; also its file name stem.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

/// The authenticated identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Only the `user` field persists across runs.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionDoc {
    user: Option<User>,
}

/// Token identifying one login/signup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// The session store.
#[derive(Debug)]
pub struct Session {
    user: Option<User>,
    is_loading: bool,
    error: Option<String>,
    request_seq: u64,
    path: PathBuf,
}

impl Session {
    /// Open the session persisted under `dir`; an absent or unreadable
    /// document simply starts logged out.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(format!("{AUTH_STORAGE_KEY}.json"));
        let user = if path.exists() {
            let mut buf = String::new();
            File::open(&path)
                .and_then(|mut f| f.read_to_string(&mut buf))
                .ok()
                .and_then(|_| serde_json::from_str::<SessionDoc>(&buf).ok())
                .and_then(|doc| doc.user)
        } else {
            None
        };
        Session {
            user,
            is_loading: false,
            error: None,
            request_seq: 0,
            path,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Start a login/signup request: marks the session loading, clears any
    /// previous error, and invalidates every earlier in-flight request.
    pub fn begin_request(&mut self) -> RequestToken {
        self.request_seq += 1;
        self.is_loading = true;
        self.error = None;
        RequestToken(self.request_seq)
    }

    /// Apply a settled auth outcome. Outcomes from superseded requests are
    /// discarded; only the latest token may update state.
    pub fn settle(&mut self, token: RequestToken, outcome: Result<User, AuthError>) {
        if token.0 != self.request_seq {
            debug!("discarding stale auth response (token {} < {})", token.0, self.request_seq);
            return;
        }
        self.is_loading = false;
        match outcome {
            Ok(user) => {
                info!("session user set: {}", user.email);
                self.user = Some(user);
                self.persist();
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }

    /// Mock login: any plausible email plus a non-empty password succeeds.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let token = self.begin_request();
        let outcome = mock_login(email, password);
        let result = match &outcome {
            Ok(user) => Ok(user.clone()),
            Err(_) => Err(AuthError::InvalidCredentials),
        };
        self.settle(token, outcome);
        result
    }

    /// Mock signup: all three fields must be present and the email plausible.
    pub fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let token = self.begin_request();
        let outcome = mock_signup(name, email, password);
        let result = match &outcome {
            Ok(user) => Ok(user.clone()),
            Err(_) => Err(AuthError::SignupRejected("missing or malformed fields".into())),
        };
        self.settle(token, outcome);
        result
    }

    /// Clear the identity and any pending error.
    pub fn logout(&mut self) {
        self.user = None;
        self.error = None;
        self.persist();
    }

    // Persistence mirrors the workspace document: atomic replace, but a
    // failure here only logs; a broken session file must not block the UI.
    fn persist(&self) {
        let doc = SessionDoc { user: self.user.clone() };
        let result = (|| -> std::io::Result<()> {
            let tmp = self.path.with_extension("json.tmp");
            let data = serde_json::to_string_pretty(&doc)?;
            let mut f = File::create(&tmp)?;
            f.write_all(data.as_bytes())?;
            f.flush()?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        })();
        if let Err(e) = result {
            log::warn!("failed to persist session: {e}");
        }
    }
}

fn plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

fn mock_login(email: &str, password: &str) -> Result<User, AuthError> {
    if !plausible_email(email) || password.is_empty() {
        return Err(AuthError::InvalidCredentials);
    }
    let name = email.split('@').next().unwrap_or(email).to_string();
    Ok(mock_user(email, name))
}

fn mock_signup(name: &str, email: &str, password: &str) -> Result<User, AuthError> {
    if name.trim().is_empty() || !plausible_email(email) || password.is_empty() {
        return Err(AuthError::SignupRejected("missing or malformed fields".into()));
    }
    Ok(mock_user(email, name.to_string()))
}

fn mock_user(email: &str, name: String) -> User {
    User {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        name,
        avatar: Some(format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={email}"
        )),
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn login_installs_derived_identity() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::open(dir.path());
        let user = session.login("ada@example.com", "hunter2").unwrap();
        assert_eq!(user.name, "ada");
        assert_eq!(user.email, "ada@example.com");
        assert!(user.avatar.unwrap().contains("ada@example.com"));
        assert!(!session.is_loading());
        assert!(session.error().is_none());
    }

    #[test]
    fn bad_credentials_set_error_slot() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::open(dir.path());
        assert!(session.login("not-an-email", "pw").is_err());
        assert!(session.user().is_none());
        assert!(!session.is_loading());
        assert_eq!(session.error(), Some("invalid email or password"));
        session.clear_error();
        assert!(session.error().is_none());
    }

    #[test]
    fn stale_response_cannot_clobber_newer_request() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::open(dir.path());
        let first = session.begin_request();
        let second = session.begin_request();
        // The slow first response settles after the second request started.
        session.settle(first, mock_login("old@example.com", "pw"));
        assert!(session.user().is_none());
        assert!(session.is_loading());
        session.settle(second, mock_login("new@example.com", "pw"));
        assert_eq!(session.user().unwrap().email, "new@example.com");
        assert!(!session.is_loading());
    }

    #[test]
    fn only_the_user_field_persists() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::open(dir.path());
        session.login("ada@example.com", "pw").unwrap();
        let doc: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("auth-storage.json")).unwrap(),
        )
        .unwrap();
        assert!(doc.get("user").is_some());
        assert!(doc.get("is_loading").is_none());
        assert!(doc.get("error").is_none());

        let reopened = Session::open(dir.path());
        assert_eq!(reopened.user().unwrap().email, "ada@example.com");
    }

    #[test]
    fn failed_login_keeps_existing_user() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::open(dir.path());
        session.login("ada@example.com", "pw").unwrap();
        assert!(session.login("broken", "").is_err());
        assert_eq!(session.user().unwrap().email, "ada@example.com");
        assert!(session.error().is_some());
    }

    #[test]
    fn logout_clears_user_and_error() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::open(dir.path());
        session.login("ada@example.com", "pw").unwrap();
        session.logout();
        assert!(session.user().is_none());
        assert!(session.error().is_none());
        let reopened = Session::open(dir.path());
        assert!(reopened.user().is_none());
    }

    #[test]
    fn signup_requires_all_fields() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::open(dir.path());
        assert!(session.signup("", "ada@example.com", "pw").is_err());
        assert!(session.signup("Ada", "ada@example", "pw").is_err());
        let user = session.signup("Ada", "ada@example.com", "pw").unwrap();
        assert_eq!(user.name, "Ada");
    }
}
