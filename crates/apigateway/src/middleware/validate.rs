use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shared::errors::ErrorKind;
use validator::{Validate, ValidationErrors};

/// JSON body that has passed its `validator` rules.
pub struct SimpleValidatedJson<T>(pub T);

pub struct ValidationRejection {
    status: StatusCode,
    message: String,
    details: Option<Value>,
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let mut body = json!({
            "status": "error",
            "kind": ErrorKind::ValidationFailed.as_str(),
            "message": self.message,
        });
        if let Some(details) = self.details {
            body["details"] = details;
        }

        (self.status, Json(body)).into_response()
    }
}

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationRejection {
                status: rejection.status(),
                message: rejection.body_text(),
                details: None,
            })?;

        value
            .validate()
            .map_err(|errors| ValidationRejection {
                status: StatusCode::BAD_REQUEST,
                message: summarize(&errors),
                details: Some(field_messages(&errors)),
            })?;

        Ok(Self(value))
    }
}

fn describe(field: &str, error: &validator::ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| match error.code.as_ref() {
            "email" => "Invalid email format".to_string(),
            "url" => "Invalid URL format".to_string(),
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            _ => format!("Invalid {field}"),
        })
}

fn summarize(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(move |e| format!("{field}: {}", describe(&field, e)))
        })
        .collect();
    messages.sort();

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

fn field_messages(errors: &ValidationErrors) -> Value {
    let map: serde_json::Map<String, Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs.iter().map(|e| describe(&field, e)).collect();
            (field.to_string(), json!(messages))
        })
        .collect();

    Value::Object(map)
}
