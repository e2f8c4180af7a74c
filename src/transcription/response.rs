use crate::tab::note_event::NoteEvent;
use crate::DombraError;
use serde::Deserialize;

/// Body returned by `POST /transcribe`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranscribeResponse {
    /// Optional, the reference backend sends `"ok"`.
    #[serde(default)]
    pub status: Option<String>,
    pub tabs: Vec<NoteEvent>,
}

impl TranscribeResponse {
    const STATUS_OK: &'static str = "ok";

    /// Validates the raw body against the expected shape.
    pub fn from_json(body: &[u8]) -> Result<Self, DombraError> {
        let response: Self = serde_json::from_slice(body)?;
        match response.status.as_deref() {
            None | Some(Self::STATUS_OK) => Ok(response),
            Some(other) => Err(DombraError::MalformedResponse(format!(
                "unexpected status {other:?}"
            ))),
        }
    }

    pub fn into_tabs(self) -> Vec<NoteEvent> {
        self.tabs
    }
}
