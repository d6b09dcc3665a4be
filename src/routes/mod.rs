/**
 * Routes Module
 * HTTP handlers for the public site, the admin console and operations
 */

pub mod admin;
pub mod auth;
pub mod health;
pub mod logs;
pub mod media;
pub mod site;

use std::collections::HashMap;

use axum::extract::Multipart;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::AppError;
use crate::storage::UploadedFile;

/// Error body shared by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Parse a JSON request body. Admin handlers call this after the session check
/// so an unauthenticated caller never sees a body rejection.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected JSON body: {}", e);
        AppError::validation("Invalid JSON body")
    })
}

/// A multipart form split into text fields and file parts.
#[derive(Debug, Default)]
pub struct FormParts {
    pub fields: HashMap<String, String>,
    /// (field name, file), in submission order.
    pub files: Vec<(String, UploadedFile)>,
}

impl FormParts {
    /// Read every part of a multipart body into memory.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = FormParts::default();

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Multipart error: {}", e);
                    return Err(AppError::validation("Invalid multipart data"));
                }
            };

            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);

            match file_name {
                Some(file_name) => {
                    let bytes = field.bytes().await.map_err(|e| {
                        tracing::warn!("Failed to read upload '{}': {}", file_name, e);
                        AppError::validation("Invalid multipart data")
                    })?;
                    // Browsers send an empty part for an untouched file input.
                    if bytes.is_empty() && file_name.is_empty() {
                        continue;
                    }
                    form.files.push((
                        name,
                        UploadedFile::new(file_name, content_type.as_deref(), bytes),
                    ));
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|_| AppError::validation("Invalid multipart data"))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// Remove and return the first file sent under `name`.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|(field, _)| field == name)?;
        Some(self.files.remove(index).1)
    }

    /// Remove and return every file sent under `name`.
    pub fn take_files(&mut self, name: &str) -> Vec<UploadedFile> {
        let (taken, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|(field, _)| field == name);
        self.files = rest;
        taken.into_iter().map(|(_, file)| file).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormParts {
        FormParts {
            fields: HashMap::from([("title".to_string(), "Sunset".to_string())]),
            files: vec![
                ("photos".to_string(), UploadedFile::new("a.jpg", None, vec![1u8])),
                ("avatar".to_string(), UploadedFile::new("me.jpg", None, vec![2u8])),
                ("photos".to_string(), UploadedFile::new("b.jpg", None, vec![3u8])),
            ],
        }
    }

    #[test]
    fn test_take_file_and_files() {
        let mut form = form();
        assert_eq!(form.text("title").as_deref(), Some("Sunset"));
        assert_eq!(form.text("missing"), None);

        let avatar = form.take_file("avatar").unwrap();
        assert_eq!(avatar.file_name, "me.jpg");
        assert!(form.take_file("avatar").is_none());

        let photos = form.take_files("photos");
        assert_eq!(
            photos.iter().map(|f| f.file_name.as_str()).collect::<Vec<_>>(),
            vec!["a.jpg", "b.jpg"]
        );
        assert!(form.files.is_empty());
    }

    #[test]
    fn test_error_response_omits_empty_message() {
        let body = serde_json::to_value(ErrorResponse {
            error: "Review not found".to_string(),
            message: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Review not found" }));
    }
}
