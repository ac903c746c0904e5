//! ImageKit uploads and deletes.
//!
//! Uploads go straight from the desk to the host as multipart forms signed
//! with [`crate::signature::sign`]. The private key never leaves this
//! process; only the signature, timestamp, and expiry travel with the file.

use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use gate_config::ImageKitConfig;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::error::MediaError;
use crate::signature::{UploadSignature, sign};

/// Delivery quality used when the caller does not ask for one.
pub const DEFAULT_QUALITY: u8 = 80;

/// What the host reports for a stored file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub file_id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub size: u64,
}

/// Somewhere selfies can be stored and later removed.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>, file_name: &str) -> Result<UploadedImage, MediaError>;
    async fn delete(&self, file_id: &str) -> Result<(), MediaError>;
}

#[derive(Debug, Deserialize)]
struct HostError {
    #[serde(default)]
    message: Option<String>,
}

/// ImageKit over HTTP.
#[derive(Debug, Clone)]
pub struct ImageKitClient {
    http: reqwest::Client,
    config: ImageKitConfig,
}

impl ImageKitClient {
    /// # Errors
    ///
    /// Returns [`MediaError::Http`] if the HTTP client fails to build.
    pub fn new(config: ImageKitConfig) -> Result<Self, MediaError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gatepass/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub const fn config(&self) -> &ImageKitConfig {
        &self.config
    }

    /// Upload a `data:image/...;base64,` URL, as produced by a capture preview.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Upload`] when the payload is not valid base64, or
    /// any error from [`ImageHost::upload`].
    pub async fn upload_data_url(
        &self,
        data_url: &str,
        file_name: &str,
    ) -> Result<UploadedImage, MediaError> {
        let bytes = decode_data_url(data_url)?;
        self.upload(bytes, file_name).await
    }

    /// Delivery URL for `path`, resized and recompressed by the host.
    #[must_use]
    pub fn image_url(
        &self,
        path: &str,
        width: Option<u32>,
        height: Option<u32>,
        quality: Option<u8>,
    ) -> String {
        image_url(&self.config.url_endpoint, path, width, height, quality)
    }

    fn signature(&self) -> Result<UploadSignature, MediaError> {
        sign(
            &self.config.private_key,
            &self.config.account_id,
            Utc::now().timestamp(),
            self.config.signature_ttl_secs,
        )
    }

    fn upload_form(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        signature: UploadSignature,
    ) -> Result<Form, MediaError> {
        let file = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("image/jpeg")?;
        let mut form = Form::new()
            .part("file", file)
            .text("fileName", file_name.to_string())
            .text("folder", self.config.folder.clone())
            .text("useUniqueFileName", "true")
            .text("publicKey", self.config.public_key.clone())
            .text("timestamp", signature.timestamp.to_string())
            .text("signature", signature.signature)
            .text("expire", signature.expire.to_string());
        if !self.config.tags.is_empty() {
            form = form.text("tags", self.config.tags.join(","));
        }
        Ok(form)
    }
}

#[async_trait]
impl ImageHost for ImageKitClient {
    async fn upload(&self, bytes: Vec<u8>, file_name: &str) -> Result<UploadedImage, MediaError> {
        if bytes.is_empty() {
            return Err(MediaError::upload("No file provided"));
        }
        if !self.config.is_configured() {
            return Err(MediaError::Credentials);
        }

        let signature = self.signature()?;
        let size = bytes.len();
        let form = self.upload_form(bytes, file_name, signature)?;

        tracing::debug!(file_name, size, "uploading selfie");
        let resp = self
            .http
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        let image = read_upload(status, &body)?;
        tracing::info!(file_id = %image.file_id, url = %image.url, "selfie uploaded");
        Ok(image)
    }

    async fn delete(&self, file_id: &str) -> Result<(), MediaError> {
        if file_id.trim().is_empty() {
            return Err(MediaError::upload("File ID is required"));
        }
        if self.config.private_key.is_empty() {
            return Err(MediaError::Credentials);
        }

        let url = format!("{}/{file_id}", self.config.api_url.trim_end_matches('/'));
        let resp = self
            .http
            .delete(url)
            .basic_auth(&self.config.private_key, None::<&str>)
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            tracing::info!(file_id, "image deleted");
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(MediaError::Upload {
            status: Some(status.as_u16()),
            message: format!("ImageKit delete failed: {}", failure_reason(status.as_u16(), &body)),
        })
    }
}

/// Interpret an upload response.
pub(crate) fn read_upload(status: u16, body: &str) -> Result<UploadedImage, MediaError> {
    if !(200..300).contains(&status) {
        return Err(MediaError::Upload {
            status: Some(status),
            message: format!("ImageKit upload failed: {}", failure_reason(status, body)),
        });
    }
    let image: UploadedImage =
        serde_json::from_str(body).map_err(|e| MediaError::Parse(e.to_string()))?;
    if image.url.is_empty() {
        return Err(MediaError::Parse("upload response has no url".into()));
    }
    Ok(image)
}

fn failure_reason(status: u16, body: &str) -> String {
    serde_json::from_str::<HostError>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// Strip an optional `data:...;base64,` prefix and decode the rest.
///
/// # Errors
///
/// Returns [`MediaError::Upload`] for empty or malformed payloads.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, MediaError> {
    let payload = data_url
        .split_once(";base64,")
        .map_or(data_url, |(_, rest)| rest)
        .trim();
    if payload.is_empty() {
        return Err(MediaError::upload("No file provided"));
    }
    STANDARD
        .decode(payload)
        .map_err(|e| MediaError::upload(format!("invalid image data: {e}")))
}

/// `{endpoint}{path}?w=&h=&q=`, or an empty string when either part is missing.
#[must_use]
pub fn image_url(
    endpoint: &str,
    path: &str,
    width: Option<u32>,
    height: Option<u32>,
    quality: Option<u8>,
) -> String {
    if endpoint.is_empty() || path.is_empty() {
        return String::new();
    }
    let mut params = Vec::new();
    if let Some(w) = width {
        params.push(format!("w={w}"));
    }
    if let Some(h) = height {
        params.push(format!("h={h}"));
    }
    params.push(format!("q={}", quality.unwrap_or(DEFAULT_QUALITY)));
    format!("{endpoint}{path}?{}", params.join("&"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn configured() -> ImageKitConfig {
        ImageKitConfig {
            account_id: "acct".into(),
            public_key: "public_abc".into(),
            private_key: "private_xyz".into(),
            url_endpoint: "https://ik.imagekit.io/demo".into(),
            ..Default::default()
        }
    }

    #[test]
    fn reads_a_successful_upload() {
        let body = r#"{
            "fileId": "f_123",
            "name": "visitor-1_abc.jpg",
            "url": "https://ik.imagekit.io/demo/visitors/visitor-1_abc.jpg",
            "filePath": "/visitors/visitor-1_abc.jpg",
            "size": 2048,
            "fileType": "image"
        }"#;
        let image = read_upload(200, body).unwrap();
        assert_eq!(image.file_id, "f_123");
        assert_eq!(image.file_path, "/visitors/visitor-1_abc.jpg");
        assert_eq!(image.size, 2048);
    }

    #[test]
    fn rejected_upload_carries_host_message() {
        let err = read_upload(403, r#"{"message": "Your request contains expired signature"}"#)
            .unwrap_err();
        match err {
            MediaError::Upload { status, message } => {
                assert_eq!(status, Some(403));
                assert_eq!(
                    message,
                    "ImageKit upload failed: Your request contains expired signature"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejected_upload_without_body_uses_status() {
        let err = read_upload(500, "").unwrap_err();
        assert_eq!(err.to_string(), "ImageKit upload failed: HTTP 500");
    }

    #[test]
    fn success_without_url_is_a_parse_error() {
        let err = read_upload(200, r#"{"fileId": "f", "name": "n", "url": ""}"#).unwrap_err();
        assert!(matches!(err, MediaError::Parse(_)));
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        let bytes = decode_data_url("data:image/jpeg;base64,/9j/4A==").unwrap();
        assert_eq!(bytes, vec![0xff, 0xd8, 0xff, 0xe0]);
        assert_eq!(decode_data_url("/9j/4A==").unwrap(), bytes);
    }

    #[test]
    fn empty_data_url_is_rejected() {
        assert!(matches!(
            decode_data_url("data:image/jpeg;base64,"),
            Err(MediaError::Upload { status: None, .. })
        ));
    }

    #[test]
    fn image_url_defaults_quality() {
        assert_eq!(
            image_url("https://ik.io/demo", "/visitors/a.jpg", Some(200), None, None),
            "https://ik.io/demo/visitors/a.jpg?w=200&q=80"
        );
        assert_eq!(
            image_url("https://ik.io/demo", "/a.jpg", Some(64), Some(64), Some(50)),
            "https://ik.io/demo/a.jpg?w=64&h=64&q=50"
        );
    }

    #[test]
    fn image_url_is_empty_without_endpoint_or_path() {
        assert_eq!(image_url("", "/a.jpg", None, None, None), "");
        assert_eq!(image_url("https://ik.io/demo", "", None, None, None), "");
    }

    #[tokio::test]
    async fn empty_upload_fails_before_signing() {
        let client = ImageKitClient::new(ImageKitConfig::default()).unwrap();
        let err = client.upload(Vec::new(), "visitor-1.jpg").await.unwrap_err();
        assert!(matches!(err, MediaError::Upload { status: None, .. }));
    }

    #[tokio::test]
    async fn unconfigured_upload_is_a_credentials_error() {
        let client = ImageKitClient::new(ImageKitConfig::default()).unwrap();
        let err = client.upload(vec![1, 2, 3], "visitor-1.jpg").await.unwrap_err();
        assert!(matches!(err, MediaError::Credentials));
    }

    #[test]
    fn client_builds_urls_from_its_endpoint() {
        let client = ImageKitClient::new(configured()).unwrap();
        assert_eq!(
            client.image_url("/visitors/a.jpg", None, None, Some(90)),
            "https://ik.imagekit.io/demo/visitors/a.jpg?q=90"
        );
    }
}
