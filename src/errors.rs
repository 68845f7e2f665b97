//! Application error taxonomy.
//!
//! Backend failures arrive as loosely structured message strings; `classify`
//! maps the known ones onto typed variants with messages fit for the
//! terminal, and everything else passes through as [`AppError::Unknown`].

use thiserror::Error;
use tracing::{error, info, warn};

/// How loudly an error should be reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// Every failure the application surfaces to the user.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Permission(String),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Unknown(String),
}

impl AppError {
    /// Stable machine-readable code, one per variant.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Authentication(_) => "AUTH_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Permission(_) => "PERMISSION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            AppError::Network(_)
            | AppError::Authentication(_)
            | AppError::Permission(_)
            | AppError::Database(_) => Severity::High,
            AppError::Validation(_) | AppError::Unknown(_) => Severity::Medium,
        }
    }

    /// Map a raw backend message onto the taxonomy.
    ///
    /// The match is ordered: the first matching rule wins, and messages no
    /// rule recognises are carried through verbatim as `Unknown`.
    pub fn classify(raw: &str) -> AppError {
        if raw.contains("Invalid login credentials") {
            AppError::Authentication("Incorrect email or password".to_string())
        } else if raw.contains("Email not confirmed") {
            AppError::Authentication("Confirm your email address before signing in".to_string())
        } else if raw.contains("JWT") {
            AppError::Authentication("Your session has expired, sign in again".to_string())
        } else if raw.contains("permission denied") {
            AppError::Permission("You do not have permission to perform this action".to_string())
        } else if raw.contains("duplicate key") {
            AppError::Validation("An item with this data already exists".to_string())
        } else if raw.contains("network") || raw.contains("fetch") {
            AppError::Network("Connection error".to_string())
        } else {
            AppError::Unknown(raw.to_string())
        }
    }

    /// Emit the error through the tracing subscriber, level chosen by
    /// severity.
    pub fn log(&self) {
        let severity = self.severity();
        match severity {
            Severity::High => {
                error!(code = self.code(), severity = severity.as_str(), "{self}")
            }
            Severity::Medium => {
                warn!(code = self.code(), severity = severity.as_str(), "{self}")
            }
            Severity::Low => {
                info!(code = self.code(), severity = severity.as_str(), "{self}")
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> AppError {
        if err.is_decode() {
            AppError::Unknown(err.to_string())
        } else if err.is_connect() || err.is_timeout() || err.is_request() {
            AppError::Network("Connection error".to_string())
        } else {
            AppError::Unknown(err.to_string())
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> AppError {
        AppError::Unknown(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_recognises_backend_messages() {
        assert_eq!(
            AppError::classify("AuthApiError: Invalid login credentials"),
            AppError::Authentication("Incorrect email or password".to_string())
        );
        assert_eq!(
            AppError::classify("Email not confirmed"),
            AppError::Authentication("Confirm your email address before signing in".to_string())
        );
        assert_eq!(
            AppError::classify("invalid JWT: token is expired"),
            AppError::Authentication("Your session has expired, sign in again".to_string())
        );
        assert_eq!(
            AppError::classify("permission denied for table tasks"),
            AppError::Permission("You do not have permission to perform this action".to_string())
        );
        assert_eq!(
            AppError::classify("duplicate key value violates unique constraint"),
            AppError::Validation("An item with this data already exists".to_string())
        );
        assert_eq!(
            AppError::classify("TypeError: fetch failed"),
            AppError::Network("Connection error".to_string())
        );
    }

    #[test]
    fn classify_applies_rules_in_order() {
        // Credentials outrank the JWT rule when both substrings appear.
        let err = AppError::classify("Invalid login credentials (JWT rejected)");
        assert_eq!(err.code(), "AUTH_ERROR");
        assert_eq!(
            err,
            AppError::Authentication("Incorrect email or password".to_string())
        );
    }

    #[test]
    fn classify_passes_unrecognised_messages_through() {
        let err = AppError::classify("relation \"taskz\" does not exist");
        assert_eq!(
            err,
            AppError::Unknown("relation \"taskz\" does not exist".to_string())
        );
    }

    #[test]
    fn codes_and_severities_line_up() {
        let cases = [
            (AppError::Network("x".into()), "NETWORK_ERROR", Severity::High),
            (
                AppError::Authentication("x".into()),
                "AUTH_ERROR",
                Severity::High,
            ),
            (
                AppError::Validation("x".into()),
                "VALIDATION_ERROR",
                Severity::Medium,
            ),
            (
                AppError::Permission("x".into()),
                "PERMISSION_ERROR",
                Severity::High,
            ),
            (
                AppError::Database("x".into()),
                "DATABASE_ERROR",
                Severity::High,
            ),
            (
                AppError::Unknown("x".into()),
                "UNKNOWN_ERROR",
                Severity::Medium,
            ),
        ];
        for (err, code, severity) in cases {
            assert_eq!(err.code(), code);
            assert_eq!(err.severity(), severity);
        }
    }

    #[test]
    fn io_errors_become_unknown() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "session file missing");
        let err = AppError::from(io_err);
        assert_eq!(err.code(), "UNKNOWN_ERROR");
        assert!(err.to_string().contains("session file missing"));
    }

    #[tokio::test]
    async fn refused_connections_become_network_errors() {
        // Port 9 (discard) is not listening anywhere we run tests.
        let refused = reqwest::Client::new()
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .unwrap_err();
        assert_eq!(
            AppError::from(refused),
            AppError::Network("Connection error".to_string())
        );
    }
}
