//! Shared-secret gate in front of the organizer link panel
//!
//! This is a UX deterrent, not an authorization boundary: the secret ships
//! with the client and the comparison is a plain string match. Anything
//! that must stay private has to be protected by the data store itself.

use shared::error::{AppError, AppResult};
use std::time::Duration;
use tokio::time::Instant;

pub const MAX_ATTEMPTS: u32 = 3;
pub const LOCKOUT: Duration = Duration::from_secs(5 * 60);
pub const SESSION_TTL: Duration = Duration::from_secs(30 * 60);
/// Remaining session time below which the panel shows a warning
pub const SESSION_WARNING: Duration = Duration::from_secs(5 * 60);

fn ceil_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}

pub struct AccessGate {
    secret: String,
    failed_attempts: u32,
    locked_until: Option<Instant>,
    session_until: Option<Instant>,
}

impl AccessGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            failed_attempts: 0,
            locked_until: None,
            session_until: None,
        }
    }

    /// Expire the lockout and the session if their deadlines passed
    ///
    /// Returns the expiry notice once, when a session has just run out.
    pub fn poll(&mut self) -> Option<AppError> {
        let now = Instant::now();
        if self.locked_until.is_some_and(|t| now >= t) {
            self.locked_until = None;
            self.failed_attempts = 0;
            tracing::info!("Access gate lockout ended");
        }
        if self.session_until.is_some_and(|t| now >= t) {
            self.session_until = None;
            tracing::info!("Organizer session expired");
            return Some(AppError::session_expired());
        }
        None
    }

    /// Check a typed secret
    pub fn submit(&mut self, input: &str) -> AppResult<()> {
        self.poll();
        if let Some(remaining) = self.lock_remaining() {
            return Err(AppError::access_locked(ceil_secs(remaining)));
        }
        if input == self.secret {
            self.failed_attempts = 0;
            self.session_until = Some(Instant::now() + SESSION_TTL);
            tracing::info!("Organizer session started");
            return Ok(());
        }

        self.failed_attempts += 1;
        if self.failed_attempts >= MAX_ATTEMPTS {
            self.locked_until = Some(Instant::now() + LOCKOUT);
            tracing::warn!(attempts = self.failed_attempts, "Access gate locked");
            return Err(AppError::access_locked(LOCKOUT.as_secs()));
        }
        tracing::warn!(attempts = self.failed_attempts, "Wrong access secret");
        Err(AppError::invalid_secret(self.attempts_remaining()))
    }

    pub fn attempts_remaining(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.failed_attempts)
    }

    pub fn lock_remaining(&self) -> Option<Duration> {
        let until = self.locked_until?;
        let left = until.saturating_duration_since(Instant::now());
        (!left.is_zero()).then_some(left)
    }

    pub fn is_locked(&self) -> bool {
        self.lock_remaining().is_some()
    }

    pub fn session_remaining(&self) -> Option<Duration> {
        let until = self.session_until?;
        let left = until.saturating_duration_since(Instant::now());
        (!left.is_zero()).then_some(left)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session_remaining().is_some()
    }

    pub fn session_warning(&self) -> bool {
        self.session_remaining().is_some_and(|left| left <= SESSION_WARNING)
    }

    /// Restart the session timer
    pub fn extend(&mut self) -> AppResult<()> {
        if !self.is_authenticated() {
            return Err(AppError::not_authenticated());
        }
        self.session_until = Some(Instant::now() + SESSION_TTL);
        tracing::debug!("Organizer session extended");
        Ok(())
    }

    pub fn logout(&mut self) {
        self.session_until = None;
    }

    /// Gate an organizer-only action
    pub fn require(&self) -> AppResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::not_authenticated())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    const SECRET: &str = "s3cret";

    #[tokio::test(start_paused = true)]
    async fn test_three_failures_lock() {
        let mut gate = AccessGate::new(SECRET);
        let err = gate.submit("a").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSecret);
        assert_eq!(err.message, "Clave incorrecta. Intentos restantes: 2");
        gate.submit("b").unwrap_err();
        let err = gate.submit("c").unwrap_err();
        assert_eq!(err.code, ErrorCode::AccessLocked);
        assert!(gate.is_locked());

        // the right secret is still refused while locked
        tokio::time::advance(Duration::from_secs(60)).await;
        let err = gate.submit(SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::AccessLocked);
        assert_eq!(err.detail("remaining_secs"), Some(&serde_json::json!(240)));
        assert!(!gate.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lockout_expiry_resets_attempts() {
        let mut gate = AccessGate::new(SECRET);
        for _ in 0..3 {
            gate.submit("x").unwrap_err();
        }
        tokio::time::advance(LOCKOUT).await;
        assert!(!gate.is_locked());

        let err = gate.submit("x").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSecret);
        assert_eq!(gate.attempts_remaining(), 2);
        gate.submit(SECRET).unwrap();
        assert!(gate.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_lifecycle() {
        let mut gate = AccessGate::new(SECRET);
        assert_eq!(gate.require().unwrap_err().code, ErrorCode::NotAuthenticated);
        gate.submit(SECRET).unwrap();
        assert!(!gate.session_warning());

        tokio::time::advance(Duration::from_secs(26 * 60)).await;
        assert!(gate.session_warning());
        gate.extend().unwrap();
        assert!(!gate.session_warning());

        tokio::time::advance(SESSION_TTL).await;
        assert!(!gate.is_authenticated());
        let notice = gate.poll().unwrap();
        assert_eq!(notice.message, "Sesión expirada. Ingresa la clave nuevamente.");
        assert!(gate.poll().is_none());
        assert!(gate.extend().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_resets_failures() {
        let mut gate = AccessGate::new(SECRET);
        gate.submit("x").unwrap_err();
        gate.submit("y").unwrap_err();
        gate.submit(SECRET).unwrap();
        assert_eq!(gate.attempts_remaining(), 3);
        gate.logout();
        assert!(!gate.is_authenticated());
    }
}
