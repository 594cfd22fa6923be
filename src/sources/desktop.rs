use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::BaseDirs;
use log::{debug, info};
use thiserror::Error;
use walkdir::WalkDir;

use crate::model::AppEntry;
use crate::sources::{Scan, Source};

pub struct DesktopSource;

impl Source for DesktopSource {
    fn scan(&self) -> Result<Scan> {
        Ok(scan_dirs(&descriptor_dirs()))
    }
}

/// System directory first, user-local last: on a display-name
/// collision the later entry wins, so user-local overrides system.
fn descriptor_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![Path::new("/usr/share/applications").to_path_buf()];
    if let Some(base_dirs) = BaseDirs::new() {
        dirs.push(base_dirs.data_dir().join("applications"));
    }
    dirs
}

pub fn scan_dirs(dirs: &[PathBuf]) -> Scan {
    let mut entries = Vec::new();
    let mut skipped = 0;

    for dir in dirs {
        if !dir.is_dir() {
            debug!("descriptor directory {:?} does not exist, skipping", dir);
            continue;
        }
        debug!("scanning descriptors in {:?}", dir);

        let files = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .flatten();

        for file in files {
            let path = file.path();
            if !file.file_type().is_file()
                || path.extension().and_then(|s| s.to_str()) != Some("desktop")
            {
                continue;
            }

            // One broken descriptor must never block startup.
            match fs::read_to_string(path) {
                Ok(content) => match parse_descriptor(&content) {
                    Ok(Some(entry)) => entries.push(entry),
                    Ok(None) => {}
                    Err(err) => {
                        debug!("skipping {:?}: {}", path, err);
                        skipped += 1;
                    }
                },
                Err(err) => {
                    debug!("skipping {:?}: {}", path, err);
                    skipped += 1;
                }
            }
        }
    }

    info!(
        "DesktopSource: {} entries, {} descriptors skipped",
        entries.len(),
        skipped
    );
    Scan { entries, skipped }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {0}: expected comment, section header, or key=value")]
    Syntax(usize),
}

/// Parse one descriptor as a non-interpolating INI. Only the
/// `[Desktop Entry]` section is read. `Ok(None)` means the file is
/// valid but yields no entry (hidden, or required keys missing);
/// `Err` means the whole file is malformed.
///
/// An entry requires `Name` (non-empty) and `Exec` (present, possibly
/// empty) with `NoDisplay` false. `Exec` is kept raw; field codes are
/// stripped at launch time, not here.
fn parse_descriptor(content: &str) -> Result<Option<AppEntry>, ParseError> {
    let mut name = None;
    let mut exec = None;
    let mut terminal = false;
    let mut no_display = false;
    let mut in_desktop_entry = false;

    for (lineno, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            in_desktop_entry = line == "[Desktop Entry]";
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ParseError::Syntax(lineno + 1));
        };

        if !in_desktop_entry {
            continue;
        }

        let value = value.trim();
        match key.trim() {
            "Name" => name = Some(value.to_string()),
            "Exec" => exec = Some(value.to_string()),
            "Terminal" => terminal = parse_bool(value),
            "NoDisplay" => no_display = parse_bool(value),
            _ => {}
        }
    }

    if no_display {
        return Ok(None);
    }

    match (name, exec) {
        (Some(n), Some(e)) if !n.is_empty() => Ok(Some(AppEntry::new(n, e, terminal))),
        _ => Ok(None),
    }
}

/// Case-insensitive comparison against the literal "true"; anything
/// else, including absence, is false.
fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppIndex;
    use std::fs;

    fn parse(content: &str) -> Option<AppEntry> {
        parse_descriptor(content).unwrap()
    }

    #[test]
    fn parses_a_minimal_descriptor() {
        let entry = parse("[Desktop Entry]\nName=Firefox\nExec=firefox %u\n").unwrap();
        assert_eq!(entry.display_name, "Firefox");
        assert_eq!(entry.raw_exec, "firefox %u");
        assert!(!entry.open_in_terminal);
    }

    #[test]
    fn booleans_compare_case_insensitively() {
        let entry = parse("[Desktop Entry]\nName=Htop\nExec=htop\nTerminal=TRUE\n").unwrap();
        assert!(entry.open_in_terminal);

        let entry = parse("[Desktop Entry]\nName=Htop\nExec=htop\nTerminal=yes\n").unwrap();
        assert!(!entry.open_in_terminal);
    }

    #[test]
    fn no_display_excludes_the_entry() {
        let content = "[Desktop Entry]\nName=Calculator\nExec=gnome-calculator\nNoDisplay=true\n";
        assert!(parse(content).is_none());
    }

    #[test]
    fn missing_name_or_exec_yields_no_entry() {
        assert!(parse("[Desktop Entry]\nExec=firefox\n").is_none());
        assert!(parse("[Desktop Entry]\nName=Firefox\n").is_none());
        assert!(parse("[Desktop Entry]\nName=\nExec=firefox\n").is_none());
    }

    #[test]
    fn empty_exec_is_present_and_included() {
        let entry = parse("[Desktop Entry]\nName=Editor\nExec=\n").unwrap();
        assert_eq!(entry.display_name, "Editor");
        assert_eq!(entry.raw_exec, "");
    }

    #[test]
    fn keys_outside_the_desktop_entry_section_are_ignored() {
        let content = "[Desktop Action new]\nName=Wrong\nExec=wrong\n\
                       [Desktop Entry]\nName=Right\nExec=right\n";
        let entry = parse(content).unwrap();
        assert_eq!(entry.display_name, "Right");
        assert_eq!(entry.raw_exec, "right");
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let content = "# header\n\n[Desktop Entry]\n# inline\nName=App\nExec=app\n";
        assert!(parse(content).is_some());
    }

    #[test]
    fn a_bare_word_line_is_a_syntax_error() {
        let err = parse_descriptor("[Desktop Entry]\nName=App\ngarbage\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax(3)));
    }

    fn write_descriptor(dir: &Path, file: &str, content: &str) {
        fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn scan_visits_files_in_name_order_and_skips_broken_ones() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptor(dir.path(), "b.desktop", "[Desktop Entry]\nName=Beta\nExec=beta\n");
        write_descriptor(dir.path(), "a.desktop", "[Desktop Entry]\nName=Alpha\nExec=alpha\n");
        write_descriptor(dir.path(), "broken.desktop", "not an ini\n");
        write_descriptor(dir.path(), "notes.txt", "ignored entirely");

        let scan = scan_dirs(&[dir.path().to_path_buf()]);
        let names: Vec<&str> = scan
            .entries
            .iter()
            .map(|e| e.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
        assert_eq!(scan.skipped, 1);
    }

    #[test]
    fn scan_skips_nonexistent_directories() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptor(dir.path(), "a.desktop", "[Desktop Entry]\nName=Alpha\nExec=alpha\n");
        let missing = dir.path().join("not-here");

        let scan = scan_dirs(&[missing, dir.path().to_path_buf()]);
        assert_eq!(scan.entries.len(), 1);
        assert_eq!(scan.skipped, 0);
    }

    #[test]
    fn later_directory_wins_name_collisions_through_the_index() {
        let system = tempfile::tempdir().unwrap();
        let local = tempfile::tempdir().unwrap();
        write_descriptor(
            system.path(),
            "editor.desktop",
            "[Desktop Entry]\nName=Editor\nExec=editor-system\n",
        );
        write_descriptor(
            local.path(),
            "editor.desktop",
            "[Desktop Entry]\nName=Editor\nExec=editor-local\n",
        );

        let scan = scan_dirs(&[system.path().to_path_buf(), local.path().to_path_buf()]);
        assert_eq!(scan.entries.len(), 2);

        let index = AppIndex::new(scan.entries);
        assert_eq!(index.command_for("Editor"), Some("editor-local"));
    }
}
