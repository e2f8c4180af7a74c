pub mod application;
mod picker;
mod tablature;
mod utils;

pub use picker::is_audio_file;
