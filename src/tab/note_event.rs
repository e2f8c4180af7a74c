use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One of the two strings of a dombra.
///
/// The backend numbers them `1` (D string, tuned D4) and `2` (G string, tuned G3).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DombraString {
    D,
    G,
}

impl TryFrom<u8> for DombraString {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::D),
            2 => Ok(Self::G),
            other => Err(format!("unknown dombra string {other}, expected 1 or 2")),
        }
    }
}

impl From<DombraString> for u8 {
    fn from(string: DombraString) -> Self {
        match string {
            DombraString::D => 1,
            DombraString::G => 2,
        }
    }
}

impl Display for DombraString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::D => write!(f, "D"),
            Self::G => write!(f, "G"),
        }
    }
}

/// A transcribed note as returned by the backend.
///
/// Timing and pitch are informative only, the tablature layout uses the order of the events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    pub string: DombraString,
    pub fret: u32,
}

impl NoteEvent {
    pub const fn new(string: DombraString, fret: u32) -> Self {
        Self {
            pitch: None,
            start: None,
            end: None,
            string,
            fret,
        }
    }

    pub const fn with_timing(mut self, pitch: f64, start: f64, end: f64) -> Self {
        self.pitch = Some(pitch);
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}
