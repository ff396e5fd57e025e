use indexmap::IndexMap;
use reqwest::StatusCode;
use thiserror::Error;

use crate::types::envelope::{EnvelopeMessages, ResponseEnvelope};

/// Status code conventionally reported for a request that ran out of time
pub const TIMEOUT_STATUS: u16 = 408;
/// Message carried by every [`ApiError::Timeout`]
pub const TIMEOUT_MESSAGE: &str = "request timed out";
/// Message carried by an [`ApiError::Network`] raised through cancellation
pub const ABORTED_MESSAGE: &str = "request aborted";
/// Used when an error envelope carries no text at all
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "request failed with no error message";

/// Per-field validation errors reported by the upstream, in upstream order
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// Errors that can occur when talking to the RescueGroups API
///
/// Minted only by the transport; every other layer passes them through.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a usable response (connection failure,
    /// cancellation, unreadable body)
    #[error("network error: {message}")]
    Network {
        /// Underlying cause
        message: String,
    },

    /// The configured time budget elapsed before a response was classified
    #[error("{message}")]
    Timeout {
        /// Always [`TIMEOUT_MESSAGE`]
        message: String,
        /// Always [`TIMEOUT_STATUS`]
        status: u16,
    },

    /// The server answered outside the 2xx range
    #[error("HTTP {status}: {reason}")]
    HttpStatus {
        /// Numeric HTTP status
        status: u16,
        /// Reason phrase for the status
        reason: String,
    },

    /// HTTP succeeded but the envelope reported `status: "error"`
    #[error("{message}")]
    Upstream {
        /// All upstream messages joined with `"; "`
        message: String,
        /// Raw per-field error lists, when present
        field_errors: Option<FieldErrors>,
    },
}

impl ApiError {
    pub(crate) fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub(crate) fn timeout() -> Self {
        Self::Timeout {
            message: TIMEOUT_MESSAGE.into(),
            status: TIMEOUT_STATUS,
        }
    }

    pub(crate) fn aborted() -> Self {
        Self::network(ABORTED_MESSAGE)
    }

    /// Numeric status associated with the error, if any
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Timeout { status, .. } | Self::HttpStatus { status, .. } => Some(*status),
            Self::Network { .. } | Self::Upstream { .. } => None,
        }
    }

    /// Per-field errors carried by an upstream failure
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Upstream { field_errors, .. } => field_errors.as_ref(),
            _ => None,
        }
    }

    /// Whether re-issuing the same call may succeed
    ///
    /// Advisory only; the client never retries on its own.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => true,
            Self::HttpStatus { status, .. } => matches!(*status, 408 | 429 | 500..=599),
            Self::Upstream { .. } => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::network(e.to_string())
    }
}

/// Maps a non-2xx status to an [`ApiError::HttpStatus`]
#[must_use]
pub fn http_status_error(status: StatusCode) -> ApiError {
    ApiError::HttpStatus {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
    }
}

/// Maps a serde deserialization error to an `ApiError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> ApiError {
    let snippet = String::from_utf8_lossy(&body[..body.len().min(400)]).to_string();
    ApiError::network(format!("invalid response body: {e}: {snippet}"))
}

/// Builds the [`ApiError::Upstream`] for an envelope whose status is `error`
#[must_use]
pub fn upstream_error(envelope: &ResponseEnvelope) -> ApiError {
    let messages = envelope.messages.as_ref();
    let text = messages.map(collect_messages).unwrap_or_default();
    let field_errors = messages
        .and_then(|m| m.errors.clone())
        .filter(|errors| !errors.is_empty());

    ApiError::Upstream {
        message: if text.is_empty() {
            UPSTREAM_FALLBACK_MESSAGE.into()
        } else {
            text.join("; ")
        },
        field_errors,
    }
}

fn collect_messages(messages: &EnvelopeMessages) -> Vec<String> {
    let general = messages.general_messages.iter().map(|m| m.text.clone());
    let record = messages.record_messages.iter().map(|m| m.text.clone());
    let fields = messages.errors.iter().flatten().flat_map(|(field, errs)| {
        errs.iter().map(move |err| format!("{field}: {err}"))
    });

    general
        .chain(record)
        .chain(fields)
        .filter(|text| !text.trim().is_empty())
        .collect()
}

/// Renders any error as a message fit for display
///
/// Field-level errors win over the top-level message; HTTP and timeout
/// failures are annotated with their status code.
#[must_use]
pub fn describe_error(err: &(dyn std::error::Error + 'static)) -> String {
    let Some(api) = err.downcast_ref::<ApiError>() else {
        let text = err.to_string();
        return if text.trim().is_empty() {
            "An unexpected error occurred".into()
        } else {
            text
        };
    };

    match api {
        ApiError::Upstream {
            field_errors: Some(fields),
            message,
        } => {
            let lines: Vec<String> = fields
                .iter()
                .flat_map(|(field, errs)| errs.iter().map(move |e| format!("{field}: {e}")))
                .collect();
            if lines.is_empty() {
                message.clone()
            } else {
                lines.join("\n")
            }
        }
        ApiError::Upstream { message, .. } | ApiError::Network { message } => message.clone(),
        ApiError::Timeout { message, status } => format!("{message} (status {status})"),
        ApiError::HttpStatus { status, reason } if reason.is_empty() => {
            format!("request failed (status {status})")
        }
        ApiError::HttpStatus { status, reason } => format!("{reason} (status {status})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::envelope::{EnvelopeStatus, Message};

    fn error_envelope(messages: Option<EnvelopeMessages>) -> ResponseEnvelope {
        ResponseEnvelope {
            status: EnvelopeStatus::Error,
            messages,
            found_rows: None,
            data: None,
        }
    }

    fn message(text: &str) -> Message {
        Message {
            id: None,
            criticality: None,
            text: text.into(),
        }
    }

    #[test]
    fn upstream_error_joins_all_sources() {
        let mut errors = FieldErrors::new();
        errors.insert("animalSpecies".into(), vec!["Invalid species".into()]);
        let env = error_envelope(Some(EnvelopeMessages {
            general_messages: vec![message("Bad request")],
            record_messages: vec![message("Record 5 rejected")],
            errors: Some(errors.clone()),
        }));

        let err = upstream_error(&env);
        assert_eq!(
            err.to_string(),
            "Bad request; Record 5 rejected; animalSpecies: Invalid species"
        );
        assert_eq!(err.field_errors(), Some(&errors));
    }

    #[test]
    fn upstream_error_keeps_field_order() {
        let env: ResponseEnvelope = serde_json::from_value(serde_json::json!({
            "status": "error",
            "messages": {"errors": {"zip": ["Required"], "age": ["Unknown"]}}
        }))
        .unwrap();

        assert_eq!(upstream_error(&env).to_string(), "zip: Required; age: Unknown");
    }

    #[test]
    fn upstream_error_falls_back_when_silent() {
        let err = upstream_error(&error_envelope(None));
        assert_eq!(
            err,
            ApiError::Upstream {
                message: UPSTREAM_FALLBACK_MESSAGE.into(),
                field_errors: None,
            }
        );

        let err = upstream_error(&error_envelope(Some(EnvelopeMessages::default())));
        assert_eq!(err.to_string(), UPSTREAM_FALLBACK_MESSAGE);
    }

    #[test]
    fn http_status_error_uses_reason_phrase() {
        let err = http_status_error(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err,
            ApiError::HttpStatus {
                status: 500,
                reason: "Internal Server Error".into(),
            }
        );
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn timeout_carries_408() {
        let err = ApiError::timeout();
        assert_eq!(err.status_code(), Some(TIMEOUT_STATUS));
        assert_eq!(err.to_string(), TIMEOUT_MESSAGE);
    }

    #[test]
    fn retryable_matrix() {
        assert!(ApiError::timeout().is_retryable());
        assert!(ApiError::aborted().is_retryable());
        assert!(http_status_error(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(http_status_error(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(!http_status_error(StatusCode::NOT_FOUND).is_retryable());
        assert!(!upstream_error(&error_envelope(None)).is_retryable());
    }

    #[test]
    fn describe_prefers_field_errors() {
        let mut errors = FieldErrors::new();
        errors.insert("animalSpecies".into(), vec!["Invalid species".into()]);
        errors.insert("animalSex".into(), vec!["Unknown".into()]);
        let err = ApiError::Upstream {
            message: "ignored".into(),
            field_errors: Some(errors),
        };
        assert_eq!(
            describe_error(&err),
            "animalSpecies: Invalid species\nanimalSex: Unknown"
        );
    }

    #[test]
    fn describe_annotates_status() {
        assert_eq!(
            describe_error(&http_status_error(StatusCode::SERVICE_UNAVAILABLE)),
            "Service Unavailable (status 503)"
        );
        assert_eq!(
            describe_error(&ApiError::timeout()),
            "request timed out (status 408)"
        );
        assert_eq!(
            describe_error(&ApiError::network("connection refused")),
            "connection refused"
        );
    }

    #[test]
    fn describe_handles_foreign_errors() {
        let io = std::io::Error::other("disk on fire");
        assert_eq!(describe_error(&io), "disk on fire");

        let silent = std::io::Error::other("");
        assert_eq!(describe_error(&silent), "An unexpected error occurred");
    }

    #[test]
    fn map_deser_caps_snippet() {
        let body = vec![b'x'; 1000];
        let e = serde_json::from_slice::<serde_json::Value>(&body).unwrap_err();
        let ApiError::Network { message } = map_deser(&e, &body) else {
            panic!("expected network error");
        };
        assert!(message.starts_with("invalid response body"));
        assert!(message.len() < 500);
    }
}
