use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// JSON body extractor that runs the payload through its declared rules
/// before the handler sees it. Violations come back together, not one at a
/// time.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation {
                details: vec![e.body_text()],
            })?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
    }

    fn json_request(body: &str) -> Request {
        HttpRequest::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let req = json_request(r#"{"name": "alice"}"#);
        let ValidatedJson(probe) = ValidatedJson::<Probe>::from_request(req, &())
            .await
            .expect("valid body");
        assert_eq!(probe.name, "alice");
    }

    #[tokio::test]
    async fn rejects_rule_violation() {
        let req = json_request(r#"{"name": "ab"}"#);
        let err = ValidatedJson::<Probe>::from_request(req, &())
            .await
            .unwrap_err();
        match err {
            ApiError::Validation { details } => {
                assert!(details[0].contains("too short"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let req = json_request("{not json");
        let err = ValidatedJson::<Probe>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }
}
