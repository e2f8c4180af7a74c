use std::path::PathBuf;

/// Audio formats offered by the file dialog, decoding happens on the backend.
const AUDIO_EXTENSIONS: [&str; 8] = ["wav", "mp3", "m4a", "ogg", "flac", "aac", "webm", "opus"];

#[derive(Debug, Clone, thiserror::Error)]
pub enum FilePickerError {
    #[error("dialog window closed without selecting a file")]
    DialogClosed,
    #[error("IO error: {0}")]
    IoError(String),
}

/// Content of a picked audio file.
#[derive(Debug, Clone)]
pub struct PickedAudio {
    pub bytes: Vec<u8>,
    pub parent_folder: Option<PathBuf>,
    pub file_name: String,
}

/// Opens a file dialog and returns the content of the picked file.
pub async fn open_file_dialog(
    start_folder: Option<PathBuf>,
) -> Result<PickedAudio, FilePickerError> {
    let mut dialog = rfd::AsyncFileDialog::new()
        .add_filter("Audio files", &AUDIO_EXTENSIONS)
        .set_title("Pick a short audio clip");
    if let Some(folder) = start_folder {
        dialog = dialog.set_directory(folder);
    }
    let picked_file = dialog
        .pick_file()
        .await
        .ok_or(FilePickerError::DialogClosed)?;
    load_file(picked_file.path()).await
}

/// Loads the content of a file at the given path.
pub async fn load_file(path: impl Into<PathBuf>) -> Result<PickedAudio, FilePickerError> {
    let path = path.into();
    let file_name = path
        .file_name()
        .and_then(|f| f.to_str())
        .map(ToString::to_string)
        .unwrap_or_default();
    let parent_folder = path.parent().map(std::path::Path::to_path_buf);
    log::info!("Loading file: {file_name:?}");
    tokio::fs::read(&path)
        .await
        .map_err(|error| FilePickerError::IoError(error.to_string()))
        .map(|bytes| PickedAudio {
            bytes,
            parent_folder,
            file_name,
        })
}

pub fn is_audio_file(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| AUDIO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}
