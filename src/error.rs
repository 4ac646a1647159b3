use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt;

pub const ENV_VAR_ERROR: i32 = 1;
pub const REQWEST_ERROR: i32 = 3;
pub const UPSTREAM_ERROR: i32 = 4;
pub const UNEXPECTED_ERROR: i32 = 5;
pub const INVALID_INPUT_ERROR: i32 = 101;
pub const CAPACITY_EXCEEDED_ERROR: i32 = 102;
pub const NOTHING_TO_DELETE_ERROR: i32 = 103;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_capacity_exceeded(&self) -> bool {
        self.code == CAPACITY_EXCEEDED_ERROR
    }

    pub fn is_nothing_to_delete(&self) -> bool {
        self.code == NOTHING_TO_DELETE_ERROR
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: INVALID_INPUT_ERROR,
        message: "invalid input".into(),
    }
}

pub fn capacity_exceeded_error() -> Error {
    Error {
        code: CAPACITY_EXCEEDED_ERROR,
        message: "pin capacity exceeded".into(),
    }
}

pub fn nothing_to_delete_error() -> Error {
    Error {
        code: NOTHING_TO_DELETE_ERROR,
        message: "nothing to delete".into(),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: ENV_VAR_ERROR,
        message: format!("environment variable error: {}", err),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: REQWEST_ERROR,
        message: format!("reqwest error: {}", err),
    }
}

pub fn upstream_error(reason: impl Into<String>) -> Error {
    Error {
        code: UPSTREAM_ERROR,
        message: format!("upstream error: {}", reason.into()),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: UNEXPECTED_ERROR,
        message: "unexpected error".into(),
    }
}
