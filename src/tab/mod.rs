pub mod ascii_tab;
pub mod note_event;
