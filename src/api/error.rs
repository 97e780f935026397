//! Failure taxonomy for API calls.

use thiserror::Error;

const CONNECTIVITY_MESSAGE: &str = "Unable to reach the server. Check your connection.";
const SERVER_MESSAGE: &str = "Server error, please try again later.";

/// Why an API call failed. None of these are fatal to the application.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
	/// The request never produced an HTTP response.
	#[error("transport failure: {0}")]
	Transport(String),
	/// HTTP 4xx. Terminal for this request.
	#[error("request rejected with status {status}")]
	Client {
		status: u16,
		message: Option<String>,
	},
	/// HTTP 5xx. Eligible for retry.
	#[error("server error with status {status}")]
	Server { status: u16 },
	/// A well-formed `success: false` envelope.
	#[error("server reported failure: {}", .message.as_deref().unwrap_or("<no message>"))]
	Rejected { message: Option<String> },
	/// The response body did not match the expected shape.
	#[error("unexpected response body: {0}")]
	Decode(String),
	/// The owning view went away before the response arrived.
	#[error("request cancelled")]
	Cancelled,
}

impl ApiError {
	/// Classify an HTTP status with an optional server-provided message.
	pub fn from_status(status: u16, message: Option<String>) -> Self {
		if status >= 500 {
			ApiError::Server { status }
		} else {
			ApiError::Client { status, message }
		}
	}

	pub fn is_retryable(&self) -> bool {
		matches!(self, ApiError::Transport(_) | ApiError::Server { .. })
	}

	pub fn is_cancelled(&self) -> bool {
		matches!(self, ApiError::Cancelled)
	}

	/// Text for the user-facing notice. `fallback` is used when the server
	/// gave no message of its own.
	pub fn user_message(&self, fallback: &str) -> String {
		match self {
			ApiError::Transport(_) => CONNECTIVITY_MESSAGE.to_string(),
			ApiError::Server { .. } => SERVER_MESSAGE.to_string(),
			ApiError::Client { message, .. } | ApiError::Rejected { message } => message
				.as_deref()
				.filter(|m| !m.trim().is_empty())
				.unwrap_or(fallback)
				.to_string(),
			ApiError::Decode(_) | ApiError::Cancelled => fallback.to_string(),
		}
	}
}

impl From<reqwest::Error> for ApiError {
	fn from(err: reqwest::Error) -> Self {
		if err.is_decode() {
			ApiError::Decode(err.to_string())
		} else if let Some(status) = err.status() {
			ApiError::from_status(status.as_u16(), None)
		} else {
			ApiError::Transport(err.to_string())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_classification() {
		assert_eq!(
			ApiError::from_status(404, Some("missing".into())),
			ApiError::Client {
				status: 404,
				message: Some("missing".into())
			}
		);
		assert_eq!(ApiError::from_status(503, None), ApiError::Server { status: 503 });
	}

	#[test]
	fn only_transport_and_server_errors_retry() {
		assert!(ApiError::Transport("refused".into()).is_retryable());
		assert!(ApiError::Server { status: 500 }.is_retryable());
		assert!(!ApiError::Client { status: 400, message: None }.is_retryable());
		assert!(!ApiError::Rejected { message: None }.is_retryable());
		assert!(!ApiError::Cancelled.is_retryable());
	}

	#[test]
	fn rejected_message_is_verbatim_or_fallback() {
		let err = ApiError::Rejected {
			message: Some("Already voted".into()),
		};
		assert_eq!(err.user_message("Failed to vote."), "Already voted");

		let err = ApiError::Rejected {
			message: Some("   ".into()),
		};
		assert_eq!(err.user_message("Failed to vote."), "Failed to vote.");
	}

	#[test]
	fn server_message_keeps_its_whitespace() {
		let err = ApiError::Client {
			status: 409,
			message: Some("  Proposal already exists \n".into()),
		};
		assert_eq!(err.user_message("fallback"), "  Proposal already exists \n");
	}

	#[test]
	fn generic_messages_for_transport_and_server() {
		assert_eq!(
			ApiError::Transport("x".into()).user_message("ignored"),
			CONNECTIVITY_MESSAGE
		);
		assert_eq!(
			ApiError::Server { status: 502 }.user_message("ignored"),
			SERVER_MESSAGE
		);
	}
}
