//! Backend Command Wrappers
//!
//! Frontend bindings to the HTTP endpoints, organized by domain.
//! Every response is a JSON object carrying a `success` flag.

mod task;
mod subtask;
mod tab;
mod dialog;

use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::ApiError;

// Re-export all public items
pub use task::*;
pub use subtask::*;
pub use tab::*;
pub use dialog::*;

/// Where the backend's endpoints live
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Api {
    base: String,
}

impl Api {
    /// Prefix every endpoint path with `base`
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Check the success flag, then extract the typed body.
///
/// A body that is not JSON is a decode error on a 2xx status and a status
/// error otherwise; `success: false` is always `Rejected`.
pub(crate) fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !(200..300).contains(&status) => return Err(ApiError::Status(status)),
        Err(err) => return Err(ApiError::Decode(err.to_string())),
    };
    if value.get("success").and_then(Value::as_bool) != Some(true) {
        let message = value.get("error").and_then(Value::as_str).map(str::to_owned);
        return Err(ApiError::Rejected(message));
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(ApiError::network)?;
    decode(status, &body)
}

async fn get<T: DeserializeOwned>(api: &Api, path: &str) -> Result<T, ApiError> {
    tracing::debug!(path, "GET");
    let response = Request::get(&api.endpoint(path)).send().await.map_err(ApiError::network)?;
    read(response).await
}

async fn post<T: DeserializeOwned>(api: &Api, path: &str) -> Result<T, ApiError> {
    tracing::debug!(path, "POST");
    let response = Request::post(&api.endpoint(path)).send().await.map_err(ApiError::network)?;
    read(response).await
}

async fn post_json<B: Serialize, T: DeserializeOwned>(api: &Api, path: &str, body: &B) -> Result<T, ApiError> {
    tracing::debug!(path, "POST json");
    let request = Request::post(&api.endpoint(path)).json(body).map_err(ApiError::network)?;
    let response = request.send().await.map_err(ApiError::network)?;
    read(response).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ack, CreatedTab, TaskListResponse, ToggledResponse};

    #[test]
    fn test_endpoint_joins_base() {
        assert_eq!(Api::new("/todo/").endpoint("/fetch_tasks"), "/todo/fetch_tasks");
        assert_eq!(Api::new("").endpoint("/add_task"), "/add_task");
        assert_eq!(Api::default(), Api::new("/"));
    }

    #[test]
    fn test_decode_success_body() {
        let toggled: ToggledResponse = decode(200, r#"{"success": true, "completed": true}"#).unwrap();
        assert!(toggled.completed);
        let _: Ack = decode(200, r#"{"success": true}"#).unwrap();
    }

    #[test]
    fn test_decode_rejection_carries_server_message() {
        let err = decode::<CreatedTab>(400, r#"{"success": false, "error": "Tab with that name already exists"}"#)
            .unwrap_err();
        assert_eq!(err, ApiError::Rejected(Some("Tab with that name already exists".into())));
        assert_eq!(err.to_string(), "Tab with that name already exists");
    }

    #[test]
    fn test_decode_rejection_without_fields() {
        let err = decode::<ToggledResponse>(200, r#"{"success": false}"#).unwrap_err();
        assert_eq!(err, ApiError::Rejected(None));
        assert_eq!(err.to_string(), "request was rejected");
    }

    #[test]
    fn test_decode_non_json() {
        assert_eq!(decode::<Ack>(500, "<html>oops</html>").unwrap_err(), ApiError::Status(500));
        assert!(matches!(decode::<Ack>(200, "not json"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_decode_missing_field_on_success() {
        assert!(matches!(
            decode::<ToggledResponse>(200, r#"{"success": true}"#),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_task_list() {
        let body = r#"{"success": true, "todos": [
            {"id": 1, "task": "a", "completed": false, "tab_id": 7,
             "subtasks": [{"id": 4, "name": "s", "completed": true}]},
            {"id": 2, "task": "b", "completed": true, "tabId": null, "subtasks": []}
        ]}"#;
        let list: TaskListResponse = decode(200, body).unwrap();
        assert_eq!(list.todos.len(), 2);
        assert_eq!(list.todos[0].tab_id, Some(7));
        assert_eq!(list.todos[0].subtasks[0].id, 4);
        assert_eq!(list.todos[1].tab_id, None);
    }
}
