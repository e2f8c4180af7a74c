//! Upload state owned by the view.
//!
//! Every upload gets a sequence number, only the latest one may update the state
//! so a slow response can never overwrite a newer result.

use crate::tab::note_event::NoteEvent;
use crate::transcription::client::check_clip_size;
use crate::DombraError;
use std::fmt::Display;

/// Sequence number of an upload request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of the last transition.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

#[derive(Debug, Default)]
pub struct UploadState {
    last_request: u64,            // last issued sequence number
    in_flight: Option<RequestId>, // request allowed to complete
    file_name: Option<String>,    // clip of the in flight or last request
    tabs: Option<Vec<NoteEvent>>, // latest successful result
    error: Option<String>,        // message to display
    phase: Phase,                 // last transition
}

impl UploadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an upload for a clip of `size` bytes.
    ///
    /// An oversized clip only sets the error message, no request must be sent.
    /// Otherwise the returned id supersedes any request still in flight.
    pub fn begin(
        &mut self,
        file_name: impl Into<String>,
        size: u64,
    ) -> Result<RequestId, DombraError> {
        if let Err(err) = check_clip_size(size) {
            log::warn!("{err}");
            self.error = Some(err.user_message());
            return Err(err);
        }
        if let Some(previous) = self.in_flight {
            log::debug!("request {previous} superseded");
        }
        self.last_request += 1;
        let id = RequestId(self.last_request);
        self.in_flight = Some(id);
        self.file_name = Some(file_name.into());
        self.error = None;
        self.phase = Phase::Loading;
        Ok(id)
    }

    /// Applies the result of request `id`.
    ///
    /// Returns `false` when the request is stale and the result was dropped.
    pub fn complete(
        &mut self,
        id: RequestId,
        result: Result<Vec<NoteEvent>, DombraError>,
    ) -> bool {
        if self.in_flight != Some(id) {
            log::debug!("ignoring stale response for request {id}");
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(tabs) => {
                log::info!("request {id} transcribed {} notes", tabs.len());
                self.tabs = Some(tabs);
                self.phase = Phase::Success;
            }
            Err(err) => {
                // keep the previous tabs on screen
                log::error!("request {id} failed: {err}");
                self.error = Some(err.user_message());
                self.phase = Phase::Failed;
            }
        }
        true
    }

    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn tabs(&self) -> Option<&[NoteEvent]> {
        self.tabs.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Reports an error that happened before any request could be sent.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::note_event::DombraString;
    use crate::transcription::client::MAX_CLIP_BYTES;

    fn init_logger() {
        env_logger::builder()
            .is_test(true)
            .try_init()
            .unwrap_or_default();
    }

    fn some_tabs(fret: u32) -> Vec<NoteEvent> {
        vec![NoteEvent::new(DombraString::D, fret)]
    }

    #[test]
    fn starts_idle() {
        let state = UploadState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.is_loading());
        assert!(state.tabs().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn successful_upload() {
        init_logger();
        let mut state = UploadState::new();
        let id = state.begin("clip.wav", 1_000).unwrap();
        assert!(state.is_loading());
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(state.file_name(), Some("clip.wav"));

        assert!(state.complete(id, Ok(some_tabs(3))));
        assert!(!state.is_loading());
        assert_eq!(state.phase(), Phase::Success);
        assert_eq!(state.tabs(), Some(some_tabs(3).as_slice()));
    }

    #[test]
    fn oversized_clip_never_loads() {
        init_logger();
        let mut state = UploadState::new();
        let err = state.begin("long.wav", MAX_CLIP_BYTES + 1).unwrap_err();
        assert!(matches!(err, DombraError::ClipTooLarge { .. }));
        assert!(!state.is_loading());
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.error(), Some("Keep it short (≤15 s)."));
    }

    #[test]
    fn clip_at_limit_is_accepted() {
        let mut state = UploadState::new();
        assert!(state.begin("edge.wav", MAX_CLIP_BYTES).is_ok());
        assert!(state.is_loading());
    }

    #[test]
    fn failure_keeps_previous_tabs() {
        init_logger();
        let mut state = UploadState::new();
        let first = state.begin("a.wav", 10).unwrap();
        state.complete(first, Ok(some_tabs(1)));

        let second = state.begin("b.wav", 10).unwrap();
        assert!(state.is_loading());
        let failure = DombraError::BackendUnreachable("connection refused".to_string());
        assert!(state.complete(second, Err(failure)));

        assert!(!state.is_loading());
        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(
            state.error(),
            Some("Backend not reachable. Is the transcription service running?")
        );
        assert_eq!(state.tabs(), Some(some_tabs(1).as_slice()));
    }

    #[test]
    fn new_upload_clears_error() {
        let mut state = UploadState::new();
        let _ = state.begin("long.wav", MAX_CLIP_BYTES * 2);
        assert!(state.error().is_some());
        state.begin("short.wav", 10).unwrap();
        assert!(state.error().is_none());
    }

    #[test]
    fn success_replaces_tabs() {
        let mut state = UploadState::new();
        let first = state.begin("a.wav", 10).unwrap();
        state.complete(first, Ok(vec![NoteEvent::new(DombraString::G, 0); 3]));
        let second = state.begin("b.wav", 10).unwrap();
        state.complete(second, Ok(some_tabs(9)));
        assert_eq!(state.tabs(), Some(some_tabs(9).as_slice()));
    }

    #[test]
    fn stale_response_is_ignored() {
        init_logger();
        let mut state = UploadState::new();
        let older = state.begin("a.wav", 10).unwrap();
        let newer = state.begin("b.wav", 10).unwrap();
        assert_ne!(older, newer);

        // older response arrives first and must not end the loading of the newer one
        assert!(!state.complete(older, Ok(some_tabs(1))));
        assert!(state.is_loading());
        assert!(state.tabs().is_none());

        assert!(state.complete(newer, Ok(some_tabs(2))));
        assert_eq!(state.tabs(), Some(some_tabs(2).as_slice()));

        // late arrival after the newer one completed
        assert!(!state.complete(older, Err(DombraError::BackendUnreachable(String::new()))));
        assert_eq!(state.phase(), Phase::Success);
        assert!(state.error().is_none());
    }

    #[test]
    fn oversized_clip_during_upload_keeps_loading() {
        let mut state = UploadState::new();
        let id = state.begin("a.wav", 10).unwrap();
        assert!(state.begin("long.wav", MAX_CLIP_BYTES + 1).is_err());
        assert!(state.is_loading());
        assert!(state.complete(id, Ok(some_tabs(0))));
    }
}
