#[derive(Debug, Clone)]
pub struct AppEntry {
    pub display_name: String, // User-facing label
    pub raw_exec: String,     // Unparsed command line, field codes intact
    #[allow(dead_code)]
    pub open_in_terminal: bool, // Parsed from Terminal=, does not affect launch yet
}

impl AppEntry {
    pub fn new(display_name: String, raw_exec: String, open_in_terminal: bool) -> Self {
        Self {
            display_name,
            raw_exec,
            open_in_terminal,
        }
    }
}

/// Ordered set of launchable entries, built once at startup and
/// read-only afterwards. Duplicate display names are allowed; name
/// lookup resolves to the most-recently-scanned entry.
#[derive(Debug)]
pub struct AppIndex {
    entries: Vec<AppEntry>,
}

impl AppIndex {
    pub fn new(entries: Vec<AppEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AppEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw command for a display name. Last scanned wins on collision,
    /// so a user-local descriptor overrides a system one.
    pub fn command_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.display_name == name)
            .map(|e| e.raw_exec.as_str())
    }
}
