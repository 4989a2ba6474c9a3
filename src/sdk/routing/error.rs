use serde::Deserialize;
use thiserror::Error;

// Shape of the JSON body Mapbox sends back on non-2xx responses
#[derive(Deserialize, Debug)]
pub struct MapboxErrorPayload {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Failure talking to a hosted service. An empty answer is not an error; the
/// provider reports that as `Ok(None)`.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("API Error ({}): {message}", .code.as_deref().unwrap_or("no code"))]
    Api {
        code: Option<String>,
        message: String,
    },

    // Non-success status whose body isn't the documented error JSON
    #[error("Unstructured API Error: {0}")]
    RawApi(String),

    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Could not build request URL from {0}")]
    InvalidUrl(String),
}

impl ServiceError {
    pub fn from_body(status: reqwest::StatusCode, body: &str) -> Self {
        match serde_json::from_str::<MapboxErrorPayload>(body) {
            Ok(payload) => ServiceError::Api {
                code: payload.code,
                message: payload.message,
            },
            Err(_) => {
                log::error!(
                    "API returned non-success status: {}. Unparseable Body: {}",
                    status,
                    body
                );
                ServiceError::RawApi(format!("{}: {}", status, body))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn structured_error_body_is_kept() {
        let err = ServiceError::from_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message": "No route found", "code": "NoRoute"}"#,
        );
        assert_eq!(err.to_string(), "API Error (NoRoute): No route found");
    }

    #[test]
    fn plain_text_body_falls_back_to_raw() {
        let err = ServiceError::from_body(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(err, ServiceError::RawApi(ref s) if s.contains("upstream down")));
    }
}
