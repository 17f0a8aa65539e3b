use serde::{Deserialize, Serialize};

use crate::errors::Error;

pub const NO_RESPONSE_MESSAGE: &str = "No response received";

/// Extra hints attached to some `ok: false` answers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    /// Seconds to wait before repeating the request (flood control).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

/// `{ ok, message?, result? }` wrapper around every answer.
///
/// The service names the error text `description`; both spellings are read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(
        default,
        alias = "description",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ResponseParameters>,
    // No `default` here: serde would then require `T: Default`. A missing
    // `Option` field already reads as `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            ok: true,
            message: None,
            error_code: None,
            parameters: None,
            result: Some(result),
        }
    }

    /// Substitute used when a body could not be decoded at all.
    pub fn no_response() -> Self {
        Self {
            ok: false,
            message: Some(NO_RESPONSE_MESSAGE.to_string()),
            error_code: None,
            parameters: None,
            result: None,
        }
    }

    /// Convert an `ok: false` envelope into [`Error::Api`]; `status` is used when
    /// the body carried no `error_code`.
    pub fn to_error(&self, status: u16) -> Error {
        let params = self.parameters.clone().unwrap_or_default();
        Error::Api {
            code: self.error_code.unwrap_or(i64::from(status)),
            message: self
                .message
                .clone()
                .unwrap_or_else(|| "request was not successful".to_string()),
            retry_after: params.retry_after,
            migrate_to_chat_id: params.migrate_to_chat_id,
        }
    }
}
