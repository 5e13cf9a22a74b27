//! Google Drive API client (public folders, API-key access)

use std::time::Duration;

use serde::Deserialize;

/// Raw file record as the Drive v3 `files` endpoint returns it.
/// `size` arrives as a decimal string for historical JSON reasons.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFileRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileListResponse {
    #[serde(default)]
    files: Option<Vec<RawFileRecord>>,
}

/// Shown whenever the folder listing cannot be retrieved; the usual cause
/// is a folder that is not shared publicly
pub const FETCH_REMEDIATION: &str =
    "Failed to load movies. Make sure the Google Drive folder is public.";

pub struct DriveClient {
    folder_id: String,
    api_key: String,
}

impl DriveClient {
    pub fn new(folder_id: &str, api_key: &str) -> Self {
        Self {
            folder_id: folder_id.trim().to_string(),
            api_key: api_key.trim().to_string(),
        }
    }

    fn list_url(&self) -> String {
        format!(
            "https://www.googleapis.com/drive/v3/files?q=%27{}%27%20in%20parents%20and%20trashed%3Dfalse&fields=files(id,name,mimeType,size)&pageSize=1000&key={}",
            self.folder_id, self.api_key
        )
    }

    /// List the folder's contents. Any transport error, non-success status
    /// or response without a `files` field is a fetch failure carrying the
    /// user-facing remediation message.
    pub fn fetch_folder_contents(&self) -> Result<Vec<RawFileRecord>, String> {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(60)))
            .timeout_connect(Some(Duration::from_secs(15)))
            .build()
            .new_agent();

        let mut response = agent
            .get(&self.list_url())
            .header("Accept", "application/json")
            .call()
            .map_err(|e| format!("{} ({})", FETCH_REMEDIATION, e))?;

        if response.status() != 200 {
            return Err(format!("{} (HTTP {})", FETCH_REMEDIATION, response.status()));
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| format!("{} (read failed: {})", FETCH_REMEDIATION, e))?;

        let listing: FileListResponse = serde_json::from_str(&body)
            .map_err(|e| format!("{} (bad response: {})", FETCH_REMEDIATION, e))?;

        listing.files.ok_or_else(|| FETCH_REMEDIATION.to_string())
    }
}

/// Drive's embedded preview page for a file
pub fn preview_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/preview", file_id)
}

/// Direct byte-range content URL, also used for forced download
pub fn content_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={}", file_id)
}

/// Stream the file body to a local path (the forced-download transport)
pub fn download_to_file(url: &str, dest: &std::path::Path) -> Result<u64, String> {
    let agent = ureq::Agent::config_builder()
        .timeout_connect(Some(Duration::from_secs(15)))
        .build()
        .new_agent();

    let response = agent
        .get(url)
        .call()
        .map_err(|e| format!("Download failed: {}", e))?;

    if response.status() != 200 {
        return Err(format!("Download failed: HTTP {}", response.status()));
    }

    let mut reader = response.into_body().into_reader();
    let mut file = std::fs::File::create(dest)
        .map_err(|e| format!("Cannot create {}: {}", dest.display(), e))?;
    std::io::copy(&mut reader, &mut file).map_err(|e| format!("Download failed: {}", e))
}
