use log::debug;

use crate::matcher;
use crate::model::{AppEntry, AppIndex};

/// Mutable UI session state. The index is read-only after startup;
/// `visible` and `selected` are re-derived on every query change and
/// reset after every launch attempt. Everything runs on one thread:
/// an event is fully processed, then the next one is read.
pub struct AppState {
    pub index: AppIndex,
    pub query: String,
    pub visible: Vec<usize>,
    pub selected: usize,
    pub error: Option<String>,
}

impl AppState {
    pub fn new(index: AppIndex) -> Self {
        let visible = (0..index.len()).collect();
        Self {
            index,
            query: String::new(),
            visible,
            selected: 0,
            error: None,
        }
    }

    pub fn update_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.update_filter();
    }

    fn update_filter(&mut self) {
        self.visible = matcher::filter_indices(self.index.entries(), &self.query);
        self.selected = 0;
        debug!(
            "filter: query={:?}, visible={}",
            self.query,
            self.visible.len()
        );
    }

    /// Move the focused row, wrapping in both directions. No-op when
    /// the visible list is empty.
    pub fn move_selection(&mut self, delta: i32) {
        if self.visible.is_empty() {
            return;
        }
        let len = self.visible.len() as i32;
        self.selected = (self.selected as i32 + delta).rem_euclid(len) as usize;
    }

    pub fn focused(&self) -> Option<&AppEntry> {
        self.visible
            .get(self.selected)
            .map(|&idx| &self.index.entries()[idx])
    }

    pub fn visible_names(&self) -> impl Iterator<Item = &str> {
        self.visible
            .iter()
            .map(|&idx| self.index.entries()[idx].display_name.as_str())
    }

    /// Back to the initial browsing state: empty query, all entries
    /// visible, focus on the first row. Runs after every launch
    /// attempt, successful or not.
    pub fn reset_session(&mut self) {
        self.query.clear();
        self.update_filter();
    }
}
