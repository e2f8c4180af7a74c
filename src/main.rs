use crate::ui::application::DombraApplication;
use crate::AppError::ConfigError;
use clap::Parser;
use config::Config;
use dombratab::{
    render_ascii_tab, AudioClip, DombraError as LibDombraError, TranscribeResponse,
    TranscriptionClient,
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod config;
mod ui;

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("dombratab=info"))
        .init();

    // args
    let mut args = CliArgs::parse();
    let audio_file_path = args.audio_file.take().map(PathBuf::from);
    let tabs_json_path = args.tabs_json.take().map(PathBuf::from);

    // check if audio file exists
    if let Some(audio_file_path) = &audio_file_path {
        if !audio_file_path.exists() {
            let err = ConfigError(format!("Audio file not found {audio_file_path:?}"));
            return Err(err);
        }
        if !ui::is_audio_file(audio_file_path) {
            log::warn!("{audio_file_path:?} does not look like an audio file");
        }
        log::info!("Starting with audio file {audio_file_path:?}");
    }

    // offline rendering of a saved backend reply
    if let Some(tabs_json_path) = &tabs_json_path {
        print!("{}", render_saved_reply(tabs_json_path)?);
        return Ok(());
    }

    // read local config
    let local_config = Config::read_config()?;
    let api_url = local_config.resolve_api_url(args.api_url.take());
    log::info!("Using transcription backend {api_url}");
    let client = TranscriptionClient::new(api_url, Duration::from_secs(args.timeout_secs))?;

    if args.headless {
        let Some(audio_file_path) = audio_file_path else {
            return Err(ConfigError(
                "--headless requires --audio-file or --tabs-json".to_string(),
            ));
        };
        print!("{}", transcribe_headless(&client, &audio_file_path)?);
        return Ok(());
    }

    // bundle application args
    let args = ApplicationArgs {
        client,
        audio_file_path,
        local_config,
    };

    // go!
    DombraApplication::start(args)?;
    Ok(())
}

/// Renders a backend reply stored on disk, no network involved.
fn render_saved_reply(path: &Path) -> Result<String, AppError> {
    let body = std::fs::read(path)?;
    let tabs = TranscribeResponse::from_json(&body)?.into_tabs();
    Ok(render_ascii_tab(&tabs))
}

/// Uploads a single clip and renders the returned tablature.
fn transcribe_headless(client: &TranscriptionClient, path: &Path) -> Result<String, AppError> {
    let file_name = path
        .file_name()
        .and_then(|f| f.to_str())
        .map(ToString::to_string)
        .unwrap_or_default();
    let bytes = std::fs::read(path)?;
    // refuses oversized clips before any request
    let clip = AudioClip::new(file_name, bytes)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let tabs = runtime.block_on(client.transcribe(clip))?;
    Ok(render_ascii_tab(&tabs))
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Base URL of the transcription backend.
    #[arg(long, env = "DOMBRA_API_URL")]
    api_url: Option<String>,
    /// Optional path to an audio clip to by-pass the file picker.
    #[arg(long)]
    audio_file: Option<String>,
    /// Print the tablature to stdout instead of opening a window.
    #[arg(long, default_value_t = false)]
    headless: bool,
    /// Render a saved backend JSON reply and exit.
    #[arg(long, conflicts_with = "audio_file")]
    tabs_json: Option<String>,
    /// Transcription request timeout in seconds.
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ApplicationArgs {
    client: TranscriptionClient,
    audio_file_path: Option<PathBuf>,
    local_config: Config,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("iced error: {0}")]
    IcedError(iced::Error),
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("{0}")]
    TranscriptionError(String),
    #[error("other error: {0}")]
    OtherError(String),
}

impl From<LibDombraError> for AppError {
    fn from(error: LibDombraError) -> Self {
        match error {
            LibDombraError::ConfigError(s) => Self::ConfigError(s),
            LibDombraError::IoError(s) => Self::OtherError(s),
            other => Self::TranscriptionError(other.user_message()),
        }
    }
}

impl From<iced::Error> for AppError {
    fn from(error: iced::Error) -> Self {
        Self::IcedError(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::OtherError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dombratab::MAX_CLIP_BYTES;

    // nothing listens on the discard port
    fn unreachable_client() -> TranscriptionClient {
        TranscriptionClient::new("http://127.0.0.1:9", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn headless_refuses_oversized_clip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.wav");
        std::fs::write(&path, vec![0_u8; MAX_CLIP_BYTES as usize + 1]).unwrap();

        // refused locally, an upload would report an unreachable backend instead
        let err = transcribe_headless(&unreachable_client(), &path).unwrap_err();
        assert!(
            matches!(&err, AppError::TranscriptionError(m) if m == "Keep it short (≤15 s)."),
            "{err}"
        );
    }

    #[test]
    fn headless_reports_unreachable_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        let err = transcribe_headless(&unreachable_client(), &path).unwrap_err();
        assert!(
            matches!(&err, AppError::TranscriptionError(m) if m.starts_with("Backend not reachable")),
            "{err}"
        );
    }

    #[test]
    fn saved_reply_is_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reply.json");
        std::fs::write(
            &path,
            r#"{"status":"ok","tabs":[{"string":1,"fret":2},{"string":2,"fret":0}]}"#,
        )
        .unwrap();

        let output = render_saved_reply(&path).unwrap();
        assert_eq!(output, "G| -- 0  \nD| 2  -- \n");
    }

    #[test]
    fn malformed_saved_reply_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reply.json");
        std::fs::write(&path, r#"{"tabs":[{"string":3,"fret":0}]}"#).unwrap();

        let err = render_saved_reply(&path).unwrap_err();
        assert!(matches!(err, AppError::TranscriptionError(_)), "{err}");
    }
}
