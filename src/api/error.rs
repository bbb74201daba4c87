use thiserror::Error;

/// Errors from the forecast data endpoint. The endpoint is
/// unauthenticated, so the taxonomy is small: either the transport
/// failed, or the server answered with something unusable.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("component not found: {0}")]
    NotFound(String),

    #[error("server error: {0}")]
    ServerError(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Maximum length for error response bodies carried in error messages.
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        // The cut must land on a char boundary or the slice panics.
        let mut cut = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..cut],
            body.len()
        )
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            404 => ApiError::NotFound(truncated),
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::UnexpectedResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_common_codes() {
        let e = ApiError::from_status(reqwest::StatusCode::NOT_FOUND, "no such type");
        assert!(matches!(e, ApiError::NotFound(_)));

        let e = ApiError::from_status(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(e, ApiError::ServerError(_)));

        let e = ApiError::from_status(reqwest::StatusCode::IM_A_TEAPOT, "short and stout");
        assert!(matches!(e, ApiError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 400 three-byte chars: a naive byte slice at the truncation
        // limit would land inside a character and panic.
        let body = "€".repeat(400);
        let e = ApiError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &body);
        let msg = e.to_string();
        assert!(msg.contains("truncated"));
        assert!(msg.contains("1200 total bytes"));
    }

    #[test]
    fn test_long_bodies_are_truncated() {
        let body = "x".repeat(2000);
        let e = ApiError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &body);
        let msg = e.to_string();
        assert!(msg.len() < 700);
        assert!(msg.contains("truncated"));
    }
}
