use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Response, header};
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

const API_URL: &str = "https://api.dropboxapi.com/2";
const CONTENT_URL: &str = "https://content.dropboxapi.com/2";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Storage endpoint {endpoint} answered {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: u16,
        body: String,
    },
}

/// Somewhere uploaded files can be stored and shared
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores `contents` as `file_name` inside `folder`
    ///
    /// # Returns
    /// A public link that downloads the file directly
    async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<String, StorageError>;
}

/// Dropbox-backed storage using a long-lived access token
pub struct DropboxStorage {
    client: Client,
    access_token: String,
}

#[derive(Deserialize)]
struct UploadedFile {
    path_display: String,
}

#[derive(Deserialize)]
struct SharedLink {
    url: String,
}

#[derive(Deserialize)]
struct SharedLinkList {
    links: Vec<SharedLink>,
}

impl DropboxStorage {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            access_token: access_token.into(),
        }
    }

    async fn rpc(&self, endpoint: &'static str, body: Value) -> Result<Response, StorageError> {
        Ok(self
            .client
            .post(format!("{API_URL}/{endpoint}"))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?)
    }

    /// Creates the folder, treating an existing folder as success
    async fn ensure_folder(&self, path: &str) -> Result<(), StorageError> {
        const ENDPOINT: &str = "files/create_folder_v2";

        let response = self
            .rpc(ENDPOINT, json!({ "path": path, "autorename": false }))
            .await?;

        if response.status().is_success() {
            info!("Created storage folder {path}");
            return Ok(());
        }

        let status = response.status().as_u16();
        let body = response.text().await?;
        if body.contains("path/conflict/folder") {
            debug!("Storage folder {path} already exists");
            return Ok(());
        }

        Err(StorageError::Api {
            endpoint: ENDPOINT,
            status,
            body,
        })
    }

    async fn put_file(&self, path: &str, contents: Vec<u8>) -> Result<String, StorageError> {
        const ENDPOINT: &str = "files/upload";

        let arg = json!({
            "path": path,
            "mode": "add",
            "autorename": true,
            "mute": false,
        });

        let response = self
            .client
            .post(format!("{CONTENT_URL}/{ENDPOINT}"))
            .bearer_auth(&self.access_token)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .header("Dropbox-API-Arg", header_safe_json(&arg))
            .body(contents)
            .send()
            .await?;

        let uploaded: UploadedFile = Self::parse(ENDPOINT, response).await?;
        Ok(uploaded.path_display)
    }

    /// Creates a public link, reusing the existing one if the file is already shared
    async fn share(&self, path: &str) -> Result<String, StorageError> {
        const ENDPOINT: &str = "sharing/create_shared_link_with_settings";

        let response = self
            .rpc(
                ENDPOINT,
                json!({ "path": path, "settings": { "requested_visibility": "public" } }),
            )
            .await?;

        if response.status().is_success() {
            let link: SharedLink = response.json().await?;
            return Ok(link.url);
        }

        let status = response.status().as_u16();
        let body = response.text().await?;
        if !body.contains("shared_link_already_exists") {
            return Err(StorageError::Api {
                endpoint: ENDPOINT,
                status,
                body,
            });
        }

        if let Some(url) = existing_link_url(&body) {
            return Ok(url);
        }

        const LIST_ENDPOINT: &str = "sharing/list_shared_links";
        let response = self
            .rpc(LIST_ENDPOINT, json!({ "path": path, "direct_only": true }))
            .await?;
        let list: SharedLinkList = Self::parse(LIST_ENDPOINT, response).await?;

        list.links
            .into_iter()
            .next()
            .map(|link| link.url)
            .ok_or_else(|| StorageError::Api {
                endpoint: LIST_ENDPOINT,
                status,
                body: format!("no shared link for {path}"),
            })
    }

    async fn parse<T: for<'de> Deserialize<'de>>(
        endpoint: &'static str,
        response: Response,
    ) -> Result<T, StorageError> {
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Api {
                endpoint,
                status: status.as_u16(),
                body: response.text().await?,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl FileStorage for DropboxStorage {
    async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<String, StorageError> {
        let folder_path = format!("/{}", folder.trim_matches('/'));
        self.ensure_folder(&folder_path).await?;

        let stored_path = self
            .put_file(&format!("{folder_path}/{file_name}"), contents)
            .await?;
        info!("Uploaded {stored_path}");

        let link = self.share(&stored_path).await?;
        Ok(direct_download_link(&link))
    }
}

/// Turns a Dropbox preview link into one that downloads the file
pub fn direct_download_link(link: &str) -> String {
    link.replace("?dl=0", "?dl=1")
}

/// The link Dropbox reports alongside a `shared_link_already_exists` error
fn existing_link_url(error_body: &str) -> Option<String> {
    let body: Value = serde_json::from_str(error_body).ok()?;

    body.pointer("/error/shared_link_already_exists/metadata/url")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Serializes `value` as JSON that is safe inside an HTTP header
///
/// Non-ASCII characters are written as `\uXXXX` escapes.
fn header_safe_json(value: &Value) -> String {
    let mut escaped = String::new();

    for c in value.to_string().chars() {
        if c.is_ascii() {
            escaped.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                escaped.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_download_link() {
        assert_eq!(
            direct_download_link("https://www.dropbox.com/s/abc/notes.pdf?dl=0"),
            "https://www.dropbox.com/s/abc/notes.pdf?dl=1"
        );
        assert_eq!(
            direct_download_link("https://www.dropbox.com/s/abc/notes.pdf"),
            "https://www.dropbox.com/s/abc/notes.pdf"
        );
    }

    #[test]
    fn test_existing_link_url() {
        let body = r#"{
            "error_summary": "shared_link_already_exists/metadata/..",
            "error": {
                ".tag": "shared_link_already_exists",
                "shared_link_already_exists": {
                    ".tag": "metadata",
                    "metadata": { "url": "https://www.dropbox.com/s/xyz/a.pdf?dl=0" }
                }
            }
        }"#;

        assert_eq!(
            existing_link_url(body).as_deref(),
            Some("https://www.dropbox.com/s/xyz/a.pdf?dl=0")
        );
        assert_eq!(existing_link_url("not json"), None);
    }

    #[test]
    fn test_header_safe_json() {
        let arg = json!({ "path": "/notes/résumé 📄.pdf" });
        let header = header_safe_json(&arg);

        assert!(header.is_ascii());
        assert!(header.contains("r\\u00e9sum\\u00e9"));
        assert!(header.contains("\\ud83d\\udcc4"));

        let round_trip: Value = serde_json::from_str(&header).unwrap();
        assert_eq!(round_trip, arg);
    }
}
