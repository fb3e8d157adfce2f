// Multipart upload storage

use crate::config::UploadConfig;
use crate::error::{AppError, Result};
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Multipart field carrying the menu photo.
pub const IMAGE_FIELD: &str = "image";

/// A menu photo written to the upload directory.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub path: PathBuf,
    /// URL path the file is served under.
    pub public_path: String,
}

/// Store the first file sent in the `image` field.
///
/// Returns `Ok(None)` when the form carries no such file.
pub async fn store_image(config: &UploadConfig, mut multipart: Multipart) -> Result<Option<StoredUpload>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(config, "Failed to read multipart field", e))?
    {
        if field.name() != Some(IMAGE_FIELD) || field.file_name().is_none() {
            debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        if let Some(content_type) = &content_type {
            if !content_type.starts_with("image/") {
                return Err(AppError::InvalidRequest(format!(
                    "Only image uploads are allowed, got {}",
                    content_type
                )));
            }
        }
        let extension = extension_for(field.file_name(), content_type.as_deref());

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(config, "Failed to read image", e))?;
        if data.is_empty() {
            return Err(AppError::InvalidRequest("Uploaded image is empty".to_string()));
        }

        let filename = format!("menu-{}.{}", Uuid::new_v4(), extension);
        let path = Path::new(&config.dir).join(&filename);
        tokio::fs::write(&path, &data).await?;

        info!("Stored upload {} ({} bytes)", filename, data.len());
        return Ok(Some(StoredUpload {
            public_path: format!("{}/{}", config.public_path.trim_end_matches('/'), filename),
            path,
        }));
    }

    Ok(None)
}

/// Oversized bodies surface as a multipart read error; report them as a
/// client error naming the limit.
fn multipart_error(config: &UploadConfig, context: &str, error: MultipartError) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::InvalidRequest(format!(
            "Image exceeds the {} byte upload limit",
            config.max_bytes
        ));
    }
    AppError::InvalidRequest(format!("{}: {}", context, error))
}

/// File extension for a stored upload: the client's extension when it looks
/// sane, else one derived from the content type.
fn extension_for(file_name: Option<&str>, content_type: Option<&str>) -> String {
    let from_name = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    if let Some(ext) = from_name {
        return ext;
    }

    match content_type {
        Some("image/jpeg") | Some("image/jpg") => "jpg",
        Some("image/png") => "png",
        Some("image/webp") => "webp",
        Some("image/gif") => "gif",
        Some("image/heic") => "heic",
        _ => "img",
    }
    .to_string()
}
