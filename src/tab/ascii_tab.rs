use crate::tab::note_event::{DombraString, NoteEvent};
use std::fmt::Display;

/// Number of note columns per row before wrapping.
pub const ROW_WIDTH: usize = 40;

/// Width of a fret cell, wider fret numbers keep their natural length.
const CELL_WIDTH: usize = 3;

/// Cell placed on the string that does not play at a given column.
const PLACEHOLDER: &str = "-- ";

/// Line labels, the G string is printed on top.
const G_LABEL: &str = "G| ";
const D_LABEL: &str = "D| ";

/// A row of at most `ROW_WIDTH` columns, both tracks always hold the same number of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabRow {
    g_cells: Vec<String>,
    d_cells: Vec<String>,
}

impl TabRow {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            g_cells: Vec::with_capacity(capacity),
            d_cells: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, note: &NoteEvent) {
        let cell = format!("{:<width$}", note.fret, width = CELL_WIDTH);
        let (played, muted) = match note.string {
            DombraString::G => (&mut self.g_cells, &mut self.d_cells),
            DombraString::D => (&mut self.d_cells, &mut self.g_cells),
        };
        played.push(cell);
        muted.push(PLACEHOLDER.to_string());
    }

    /// Number of note columns in the row.
    pub fn columns(&self) -> usize {
        debug_assert_eq!(self.g_cells.len(), self.d_cells.len());
        self.g_cells.len()
    }

    pub fn cells(&self, string: DombraString) -> &[String] {
        match string {
            DombraString::G => &self.g_cells,
            DombraString::D => &self.d_cells,
        }
    }
}

impl Display for TabRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{G_LABEL}{}", self.g_cells.concat())?;
        writeln!(f, "{D_LABEL}{}", self.d_cells.concat())
    }
}

/// ASCII tablature laid out in rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsciiTab {
    rows: Vec<TabRow>,
}

impl AsciiTab {
    /// Lays out the notes in input order, wrapping every `ROW_WIDTH` notes.
    pub fn from_events(events: &[NoteEvent]) -> Self {
        let rows = events
            .chunks(ROW_WIDTH)
            .map(|chunk| {
                let mut row = TabRow::with_capacity(chunk.len());
                for note in chunk {
                    row.push(note);
                }
                row
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[TabRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Display for AsciiTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            // blank line between rows
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Renders the notes as a two-line-per-row ASCII tablature.
pub fn render_ascii_tab(events: &[NoteEvent]) -> String {
    AsciiTab::from_events(events).to_string()
}
