use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

use log::info;
use thiserror::Error;

use crate::model::AppIndex;

#[derive(Debug, Error)]
pub enum LaunchError {
    // Unreachable while the focus invariants hold, but handled anyway.
    #[error("no command for {0}")]
    UnknownEntry(String),
    #[error("empty command")]
    EmptyCommand,
    #[error("{0}")]
    Spawn(#[from] io::Error),
}

/// Shell-word-split `raw_exec` (quoting honored, no shell invoked)
/// and drop field-code tokens starting with `%`. Malformed input,
/// e.g. an unbalanced quote, yields an empty vector.
pub fn sanitize(raw_exec: &str) -> Vec<String> {
    shell_words::split(raw_exec)
        .map(|words| words.into_iter().filter(|w| !w.starts_with('%')).collect())
        .unwrap_or_default()
}

/// Resolve `name` through the index and spawn its sanitized command
/// as a detached process. Fire-and-forget: the child is never waited
/// on or reaped.
pub fn launch(name: &str, index: &AppIndex) -> Result<(), LaunchError> {
    let raw_exec = index
        .command_for(name)
        .ok_or_else(|| LaunchError::UnknownEntry(name.to_string()))?;

    let argv = sanitize(raw_exec);
    let Some((program, args)) = argv.split_first() else {
        return Err(LaunchError::EmptyCommand);
    };

    spawn_detached(program, args)?;
    info!("launched {name}: {argv:?}");
    Ok(())
}

/// Null stdio plus `setsid()` before exec: the child gets its own
/// session, so it neither inherits the launcher's controlling
/// terminal nor dies when the launcher exits.
fn spawn_detached(program: &str, args: &[String]) -> io::Result<()> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    unsafe {
        command.pre_exec(|| {
            nix::unistd::setsid().map_err(io::Error::from)?;
            Ok(())
        });
    }

    command.spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppEntry, AppIndex};

    fn index_with(entries: &[(&str, &str)]) -> AppIndex {
        AppIndex::new(
            entries
                .iter()
                .map(|(name, exec)| AppEntry::new(name.to_string(), exec.to_string(), false))
                .collect(),
        )
    }

    #[test]
    fn sanitize_strips_field_codes() {
        assert_eq!(sanitize("app %U --flag %f"), vec!["app", "--flag"]);
        assert_eq!(sanitize("app"), vec!["app"]);
    }

    #[test]
    fn sanitize_of_empty_exec_is_empty() {
        assert!(sanitize("").is_empty());
    }

    #[test]
    fn sanitize_honors_quoting() {
        assert_eq!(
            sanitize(r#"sh -c "echo hi" %U"#),
            vec!["sh", "-c", "echo hi"]
        );
        assert_eq!(
            sanitize(r#""/opt/My App/run" --file %F"#),
            vec!["/opt/My App/run", "--file"]
        );
    }

    #[test]
    fn sanitize_of_malformed_input_is_empty() {
        assert!(sanitize("app \"unterminated").is_empty());
    }

    #[test]
    fn launch_fails_on_unknown_name() {
        let index = index_with(&[]);
        let err = launch("Ghost", &index).unwrap_err();
        assert!(matches!(err, LaunchError::UnknownEntry(_)));
        assert_eq!(err.to_string(), "no command for Ghost");
    }

    #[test]
    fn launch_fails_on_empty_command() {
        let index = index_with(&[("Editor", "")]);
        let err = launch("Editor", &index).unwrap_err();
        assert!(matches!(err, LaunchError::EmptyCommand));
        assert_eq!(err.to_string(), "empty command");
    }

    #[test]
    fn launch_surfaces_spawn_errors() {
        let index = index_with(&[("Ghost", "/launchr-test/no-such-binary")]);
        let err = launch("Ghost", &index).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn(_)));
    }

    #[test]
    fn launch_spawns_an_existing_binary() {
        let index = index_with(&[("True", "true %U")]);
        assert!(launch("True", &index).is_ok());
    }
}
