use crate::tab::note_event::NoteEvent;
use crate::transcription::response::TranscribeResponse;
use crate::DombraError;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// Largest clip accepted for upload, roughly 15 seconds of compressed audio.
pub const MAX_CLIP_BYTES: u64 = 2_000_000;

/// Multipart field holding the audio bytes.
const FILE_FIELD: &str = "file";

const TRANSCRIBE_PATH: &str = "/transcribe";

/// Fails when a clip of `size` bytes is above the upload limit.
pub fn check_clip_size(size: u64) -> Result<(), DombraError> {
    if size > MAX_CLIP_BYTES {
        Err(DombraError::ClipTooLarge {
            size,
            max: MAX_CLIP_BYTES,
        })
    } else {
        Ok(())
    }
}

/// Audio clip ready to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    file_name: String,
    bytes: Vec<u8>,
}

impl AudioClip {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, DombraError> {
        check_clip_size(bytes.len() as u64)?;
        Ok(Self {
            file_name: file_name.into(),
            bytes,
        })
    }

    /// Size of the clip in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// HTTP client for the transcription backend.
#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    http: reqwest::Client,
    base_url: String,
}

impl TranscriptionClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DombraError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| DombraError::ConfigError(format!("Could not build HTTP client {err}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}{TRANSCRIBE_PATH}", self.base_url)
    }

    /// Uploads the clip and returns the transcribed notes in backend order.
    pub async fn transcribe(&self, clip: AudioClip) -> Result<Vec<NoteEvent>, DombraError> {
        let endpoint = self.endpoint();
        log::info!(
            "Uploading {:?} ({} bytes) to {endpoint}",
            clip.file_name,
            clip.size()
        );

        let part = Part::bytes(clip.bytes).file_name(clip.file_name);
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .http
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| DombraError::BackendUnreachable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DombraError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| DombraError::BackendUnreachable(err.to_string()))?;
        let tabs = TranscribeResponse::from_json(&body)?.into_tabs();
        log::info!("Received {} notes from {endpoint}", tabs.len());
        Ok(tabs)
    }
}
