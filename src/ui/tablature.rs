use crate::ui::application::Message;
use dombratab::{AsciiTab, NoteEvent};
use iced::widget::{column, scrollable, text};
use iced::{Element, Font, Length};

const INNER_PADDING: f32 = 10.0;

/// Rendered tablature kept between views.
pub struct Tablature {
    note_count: usize,
    rendered: String,
    pub scroll_id: scrollable::Id,
}

impl Tablature {
    pub fn new(notes: &[NoteEvent], scroll_id: scrollable::Id) -> Self {
        let tab = AsciiTab::from_events(notes);
        log::debug!("laid out {} notes in {} rows", notes.len(), tab.rows().len());
        Self {
            note_count: notes.len(),
            rendered: tab.to_string(),
            scroll_id,
        }
    }

    pub const fn note_count(&self) -> usize {
        self.note_count
    }

    pub fn view(&self) -> Element<'_, Message> {
        let title = text(format!("Tab (DG dombra) - {} notes", self.note_count())).size(16);
        let body: Element<'_, Message> = if self.note_count() == 0 {
            text("No notes detected").into()
        } else {
            text(&self.rendered).font(Font::MONOSPACE).size(14).into()
        };
        let content = column![title, body].spacing(10).padding(INNER_PADDING);

        scrollable(content)
            .id(self.scroll_id.clone())
            .height(Length::Fill)
            .width(Length::Fill)
            .direction(scrollable::Direction::Both {
                vertical: scrollable::Scrollbar::default(),
                horizontal: scrollable::Scrollbar::default(),
            })
            .into()
    }
}
