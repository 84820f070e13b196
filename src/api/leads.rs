//! HTTP client for the lead capture and admin lead endpoints.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::window;

use crate::api::models::{Lead, LeadPage, LeadPatch, LeadQuery, LeadSubmission, NewNote};
use crate::config;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("not authorized")]
    Unauthorized,
    #[error("lead not found")]
    NotFound,
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("could not read server response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            other => ApiError::Status(other),
        }
    }

    /// Short text for a toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not reach the server. Check your connection.".to_string(),
            ApiError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            ApiError::NotFound => "That lead no longer exists.".to_string(),
            ApiError::Status(code) if *code >= 500 => "The server had a problem. Try again shortly.".to_string(),
            ApiError::Status(code) => format!("Request was rejected ({})", code),
            ApiError::Decode(_) | ApiError::Encode(_) => "Unexpected response from the server.".to_string(),
        }
    }
}

fn stored_token() -> Option<String> {
    window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .and_then(|storage| storage.get_item("token").ok())
        .flatten()
}

fn leads_url(path: &str) -> String {
    format!("{}/api/admin/leads{}", config::get_backend_url(), path)
}

fn authorized(request: Request) -> Request {
    match stored_token() {
        Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
        None => request,
    }
}

async fn send(request: Request) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !response.ok() {
        log::warn!("lead api {} -> {}", response.url(), response.status());
        return Err(ApiError::from_status(response.status()));
    }
    Ok(response)
}

async fn send_json<T: DeserializeOwned>(request: Request) -> Result<T, ApiError> {
    send(request)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Public lead capture, no token.
pub async fn submit_lead(submission: &LeadSubmission) -> Result<(), ApiError> {
    let request = Request::post(&format!("{}/api/leads", config::get_backend_url()))
        .json(submission)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    send(request).await.map(|_| ())
}

pub async fn list_leads(query: &LeadQuery) -> Result<LeadPage, ApiError> {
    let url = leads_url(&format!("?{}", query.to_query_string()));
    send_json(authorized(Request::get(&url))).await
}

pub async fn get_lead(id: &str) -> Result<Lead, ApiError> {
    let url = leads_url(&format!("/{}", urlencoding::encode(id)));
    send_json(authorized(Request::get(&url))).await
}

pub async fn update_lead(id: &str, patch: &LeadPatch) -> Result<Lead, ApiError> {
    let url = leads_url(&format!("/{}", urlencoding::encode(id)));
    let request = authorized(Request::patch(&url))
        .json(patch)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    send_json(request).await
}

pub async fn add_note(id: &str, note: &NewNote) -> Result<Lead, ApiError> {
    let url = leads_url(&format!("/{}/notes", urlencoding::encode(id)));
    let request = authorized(Request::post(&url))
        .json(note)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    send_json(request).await
}

pub async fn delete_lead(id: &str) -> Result<(), ApiError> {
    let url = leads_url(&format!("/{}", urlencoding::encode(id)));
    send(authorized(Request::delete(&url))).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::from_status(401), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(404), ApiError::NotFound);
        assert_eq!(ApiError::from_status(422), ApiError::Status(422));
    }

    #[test]
    fn user_messages_hide_details() {
        let msg = ApiError::Decode("expected value at line 1".into()).user_message();
        assert!(!msg.contains("line 1"));
        assert!(ApiError::Status(503).user_message().contains("server"));
        assert!(ApiError::Status(409).user_message().contains("409"));
    }
}
