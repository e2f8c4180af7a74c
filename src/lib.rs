//! Dombratab - ASCII tablature for the dombra from short audio clips
//!
//! This library provides:
//! - The note events returned by the transcription backend
//! - ASCII tablature rendering of those events
//! - An HTTP client for the transcription backend
//! - The upload state machine driving the application
//!
//! # Example
//!
//! ```
//! use dombratab::{render_ascii_tab, DombraString, NoteEvent};
//!
//! let notes = vec![
//!     NoteEvent::new(DombraString::D, 2),
//!     NoteEvent::new(DombraString::G, 0),
//! ];
//! assert_eq!(render_ascii_tab(&notes), "G| -- 0  \nD| 2  -- \n");
//! ```

pub mod error;
pub mod tab;
pub mod transcription;
pub mod upload;

// Re-export main types for convenience
pub use error::DombraError;
pub use tab::{
    ascii_tab::{render_ascii_tab, AsciiTab, TabRow, ROW_WIDTH},
    note_event::{DombraString, NoteEvent},
};
pub use transcription::{
    client::{check_clip_size, AudioClip, TranscriptionClient, MAX_CLIP_BYTES},
    response::TranscribeResponse,
};
pub use upload::{Phase, RequestId, UploadState};
