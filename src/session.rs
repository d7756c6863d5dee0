use facetag_vision::Thumbnail;
use image::DynamicImage;
use uuid::Uuid;

use crate::contacts::{Contact, ContactDirectory};

/// Cursor movement over the face sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// One detected face materialized for tagging.
#[derive(Debug, Clone)]
pub struct Face {
    pub id: Uuid,
    pub image: DynamicImage,
    pub capture_quality: Option<f32>,
    pub contact: Option<Contact>,
}

impl From<Thumbnail> for Face {
    fn from(thumbnail: Thumbnail) -> Self {
        Self {
            id: Uuid::new_v4(),
            image: thumbnail.image,
            capture_quality: thumbnail.capture_quality,
            contact: None,
        }
    }
}

/// Mutable state of one tagging pass over a photo.
///
/// Owned by the interactive context. Every operation is synchronous and
/// absorbs invalid requests as no-ops; nothing here errors. The session is
/// empty until a pipeline result is installed, and `reset` returns it to
/// empty while invalidating any pipeline still in flight.
#[derive(Debug)]
pub struct TaggingSession {
    faces: Vec<Face>,
    selected: usize,
    search: String,
    filtered: Vec<Contact>,
    directory: ContactDirectory,
    generation: u64,
}

impl TaggingSession {
    pub fn new(directory: ContactDirectory) -> Self {
        let filtered = directory.search("");
        Self {
            faces: Vec::new(),
            selected: 0,
            search: String::new(),
            filtered,
            directory,
            generation: 0,
        }
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Cursor position. Meaningless while the session is empty.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_face(&self) -> Option<&Face> {
        self.faces.get(self.selected)
    }

    pub fn search_query(&self) -> &str {
        &self.search
    }

    pub fn filtered_contacts(&self) -> &[Contact] {
        &self.filtered
    }

    pub fn directory(&self) -> &ContactDirectory {
        &self.directory
    }

    /// Identifies which pipeline run this session is waiting for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Adopt a pipeline result. A result whose generation does not match
    /// the session's current one was started before a reset; it is stale
    /// and dropped.
    pub fn install(&mut self, generation: u64, faces: Vec<Face>) -> bool {
        if generation != self.generation {
            log::debug!(
                "dropping stale pipeline result (generation {generation}, session at {})",
                self.generation
            );
            return false;
        }
        self.faces = faces;
        self.selected = 0;
        true
    }

    /// Move the cursor to `index` if it names a face; no-op otherwise.
    pub fn select(&mut self, index: usize) {
        if index < self.faces.len() {
            self.selected = index;
        }
    }

    /// Step the cursor one face over, clamped at either end; the boundary
    /// does not wrap.
    pub fn advance(&mut self, direction: Direction) {
        if self.faces.is_empty() {
            return;
        }
        match direction {
            Direction::Next => {
                if self.selected + 1 < self.faces.len() {
                    self.selected += 1;
                }
            }
            Direction::Previous => {
                self.selected = self.selected.saturating_sub(1);
            }
        }
    }

    /// Interpret a drag gesture. Only a mostly-horizontal swipe moves the
    /// cursor: leftward to the next face, rightward to the previous one.
    /// Diagonal and vertical gestures are ignored.
    pub fn swipe(&mut self, dx: f32, dy: f32) {
        if dx.abs() <= dy.abs() {
            return;
        }
        if dx < 0.0 {
            self.advance(Direction::Next);
        } else {
            self.advance(Direction::Previous);
        }
    }

    /// Bind `name` to the selected face and move on to the next one. One
    /// submission, both effects. Consumes the search buffer. No-op while
    /// the session is empty.
    pub fn assign_contact(&mut self, name: &str) {
        if self.faces.is_empty() {
            return;
        }
        let contact = self.directory.resolve_or_create(name);
        self.faces[self.selected].contact = Some(contact);
        self.update_search("");
        self.advance(Direction::Next);
    }

    /// Recompute the filtered directory view for `query`.
    pub fn update_search(&mut self, query: &str) {
        self.search = query.to_string();
        self.filtered = self.directory.search(&self.search);
    }

    /// Discard all session state and return to empty. Any pipeline still
    /// in flight for the old generation will be dropped at install time.
    pub fn reset(&mut self) {
        self.faces.clear();
        self.selected = 0;
        self.search.clear();
        self.filtered = self.directory.search("");
        self.generation += 1;
    }
}
