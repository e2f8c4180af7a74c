use iced::keyboard::key::Named::Escape;
use iced::widget::scrollable::{scroll_to, AbsoluteOffset, Id};
use iced::widget::{column, container, horizontal_space, row, text};
use iced::{keyboard, Alignment, Border, Color, Element, Subscription, Task, Theme};
use std::borrow::Cow;
use std::path::PathBuf;

use crate::config::Config;
use crate::ui::picker::{load_file, open_file_dialog, FilePickerError, PickedAudio};
use crate::ui::tablature::Tablature;
use crate::ui::utils::{action_gated, modal, untitled_text_table_box};
use crate::ApplicationArgs;
use dombratab::{
    AudioClip, DombraError, NoteEvent, Phase, RequestId, TranscriptionClient, UploadState,
};

pub struct DombraApplication {
    client: TranscriptionClient,  // transcription backend
    upload: UploadState,          // current upload and result
    tablature: Option<Tablature>, // rendered result
    dialog_is_open: bool,         // file picker in progress
    local_config: Config,         // remembers last audio folder
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenFileDialog,                                   // open file dialog
    OpenFile(PathBuf),                                // open file path
    FileOpened(Result<PickedAudio, FilePickerError>), // file content, parent folder & file name
    Transcribed(RequestId, Result<Vec<NoteEvent>, DombraError>), // backend reply
    ClearError,                                       // clear error message
    ReportError(String),                              // report error message
}

impl DombraApplication {
    fn new(client: TranscriptionClient, local_config: Config) -> Self {
        Self {
            client,
            upload: UploadState::new(),
            tablature: None,
            dialog_is_open: false,
            local_config,
        }
    }

    pub fn start(args: ApplicationArgs) -> iced::Result {
        iced::application(
            DombraApplication::title,
            DombraApplication::update,
            DombraApplication::view,
        )
        .subscription(DombraApplication::subscription)
        .theme(DombraApplication::theme)
        .window_size((900.0, 600.0))
        .centered()
        .run_with(move || {
            (
                DombraApplication::new(args.client, args.local_config),
                args.audio_file_path
                    .map_or_else(Task::none, |f| Task::done(Message::OpenFile(f))),
            )
        })
    }

    fn title(&self) -> String {
        match self.upload.file_name() {
            Some(file_name) => format!("Dombratab - {file_name}"),
            None => String::from("Dombratab - untitled"),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenFileDialog => {
                if self.dialog_is_open {
                    Task::none()
                } else {
                    self.dialog_is_open = true;
                    Task::perform(
                        open_file_dialog(self.local_config.get_audio_folder()),
                        Message::FileOpened,
                    )
                }
            }
            Message::OpenFile(path) => Task::perform(load_file(path), Message::FileOpened),
            Message::FileOpened(result) => {
                self.dialog_is_open = false;
                match result {
                    Ok(picked) => self.upload_clip(picked),
                    Err(FilePickerError::DialogClosed) => Task::none(),
                    Err(err) => {
                        Task::done(Message::ReportError(format!("Failed to open file: {err}")))
                    }
                }
            }
            Message::Transcribed(request_id, result) => {
                if !self.upload.complete(request_id, result) {
                    return Task::none();
                }
                // a failure keeps the previous tablature as it is
                if self.upload.phase() != Phase::Success {
                    return Task::none();
                }
                match self.upload.tabs() {
                    Some(notes) => {
                        let scroll_id = Id::new(Cow::Borrowed("tablature-scroll-elements"));
                        self.tablature = Some(Tablature::new(notes, scroll_id.clone()));
                        // reset tablature scroll
                        scroll_to(scroll_id, AbsoluteOffset::default())
                    }
                    None => Task::none(),
                }
            }
            Message::ClearError => {
                self.upload.clear_error();
                Task::none()
            }
            Message::ReportError(error) => {
                log::warn!("{error}");
                self.upload.report_error(error);
                Task::none()
            }
        }
    }

    fn upload_clip(&mut self, picked: PickedAudio) -> Task<Message> {
        if let Err(err) = self.local_config.set_audio_folder(picked.parent_folder) {
            log::warn!("Could not remember audio folder: {err}");
        }
        let size = picked.bytes.len() as u64;
        let Ok(request_id) = self.upload.begin(picked.file_name.clone(), size) else {
            // oversized, message already set
            return Task::none();
        };
        let clip = match AudioClip::new(picked.file_name, picked.bytes) {
            Ok(clip) => clip,
            Err(err) => return Task::done(Message::Transcribed(request_id, Err(err))),
        };
        let client = self.client.clone();
        Task::perform(
            async move { client.transcribe(clip).await },
            move |result| Message::Transcribed(request_id, result),
        )
    }

    fn view(&self) -> Element<Message> {
        let open_file = action_gated(
            text("Open"),
            "Open audio clip",
            (!self.dialog_is_open).then_some(Message::OpenFileDialog),
        );

        let loading = if self.upload.is_loading() {
            text("Transcribing…").color(Color::from_rgb8(0x4D, 0x8F, 0xE3)) // blue
        } else {
            text("")
        };

        let controls = row![
            open_file,
            loading,
            horizontal_space(),
            text(self.client.base_url()).size(14),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let controls = container(controls)
            .padding(10)
            .style(|_theme| container::Style {
                border: Border::default()
                    .color(Color::from_rgb8(0x40, 0x44, 0x4B)) // gray
                    .width(1),
                ..Default::default()
            });

        let status = row![
            text(self.upload.file_name().unwrap_or_default()),
            horizontal_space(),
            text(format!("{:?}", self.upload.phase())),
        ]
        .spacing(10);

        let tablature_view = self
            .tablature
            .as_ref()
            .map_or_else(|| untitled_text_table_box().into(), |t| t.view());

        let base = column![controls, tablature_view, status]
            .spacing(20)
            .padding(10)
            .into();

        // add error modal if any
        if let Some(error_message) = self.upload.error() {
            let error_view = text(error_message)
                .size(20)
                .color(Color::from_rgb8(0xEF, 0x44, 0x44)); // red
            modal(base, error_view, Message::ClearError)
        } else {
            base
        }
    }

    #[allow(clippy::unused_self)]
    const fn theme(&self) -> Theme {
        Theme::Dark
    }

    #[allow(clippy::unused_self)]
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, modifiers| match key.as_ref() {
            keyboard::Key::Character("o") if modifiers.command() => Some(Message::OpenFileDialog),
            keyboard::Key::Named(Escape) => Some(Message::ClearError),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dombratab::DombraString;

    fn application() -> DombraApplication {
        let client =
            TranscriptionClient::new(Config::DEFAULT_API_URL, TranscriptionClient::DEFAULT_TIMEOUT)
                .unwrap();
        DombraApplication::new(client, Config::default())
    }

    fn transcribed(app: &mut DombraApplication, result: Result<Vec<NoteEvent>, DombraError>) {
        let request_id = app.upload.begin("clip.wav", 10).unwrap();
        let _ = app.update(Message::Transcribed(request_id, result));
    }

    #[test]
    fn success_builds_tablature() {
        let mut app = application();
        transcribed(&mut app, Ok(vec![NoteEvent::new(DombraString::G, 4)]));
        assert_eq!(app.tablature.as_ref().map(Tablature::note_count), Some(1));
        assert!(!app.upload.is_loading());
    }

    #[test]
    fn failure_leaves_tablature_untouched() {
        let mut app = application();
        transcribed(&mut app, Ok(vec![NoteEvent::new(DombraString::D, 1); 3]));
        assert!(app.tablature.is_some());

        // drop the view to observe whether a failure rebuilds it
        app.tablature = None;
        let failure = DombraError::BackendUnreachable("connection refused".to_string());
        transcribed(&mut app, Err(failure));

        assert!(app.tablature.is_none());
        assert_eq!(app.upload.phase(), Phase::Failed);
        assert_eq!(app.upload.tabs().map(<[NoteEvent]>::len), Some(3));
        assert!(app.upload.error().is_some());
    }
}
