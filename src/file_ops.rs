//! File actions behind validated commands.
//!
//! Operands are resolved against the session root; nothing here re-checks the
//! command shape beyond making sure each operand slot is filled.
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use filecmd::{Command, CommandKind};
use log::debug;

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The action ran; the message is printed as confirmation.
    Done(String),
    Exit,
}

pub fn execute(command: &Command, root: &Path) -> io::Result<Outcome> {
    match command.kind {
        CommandKind::Exit => Ok(Outcome::Exit),
        CommandKind::Create => {
            let name = operand(command, 0)?;
            create_file(&resolve(root, name))?;
            Ok(Outcome::Done(format!("created {name}")))
        }
        CommandKind::Delete => {
            let name = operand(command, 0)?;
            delete_file(&resolve(root, name))?;
            Ok(Outcome::Done(format!("deleted {name}")))
        }
        CommandKind::Copy => {
            let (src, dst) = (operand(command, 0)?, operand(command, 1)?);
            copy_file(&resolve(root, src), &resolve(root, dst))?;
            Ok(Outcome::Done(format!("copied {src} -> {dst}")))
        }
        CommandKind::Rename => {
            let (src, dst) = (operand(command, 0)?, operand(command, 1)?);
            rename_file(&resolve(root, src), &resolve(root, dst))?;
            Ok(Outcome::Done(format!("renamed {src} -> {dst}")))
        }
    }
}

fn operand(command: &Command, idx: usize) -> io::Result<&str> {
    command.operands.get(idx).map(String::as_str).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is missing operand {}", command.kind, idx + 1),
        )
    })
}

fn resolve(root: &Path, name: &str) -> PathBuf {
    root.join(name)
}

pub fn create_file(path: &Path) -> io::Result<()> {
    debug!("fileop event=create path={}", path.display());
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map(|_| ())
        .map_err(|err| with_path(err, path))
}

pub fn delete_file(path: &Path) -> io::Result<()> {
    debug!("fileop event=delete path={}", path.display());
    fs::remove_file(path).map_err(|err| with_path(err, path))
}

pub fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    debug!(
        "fileop event=copy src={} dst={}",
        src.display(),
        dst.display()
    );
    if same_file(src, dst)? {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: source and destination are the same file", src.display()),
        ));
    }
    let bytes = fs::copy(src, dst).map_err(|err| with_path(err, src))?;
    debug!("fileop event=copy done bytes={}", bytes);
    Ok(())
}

pub fn rename_file(src: &Path, dst: &Path) -> io::Result<()> {
    debug!(
        "fileop event=rename src={} dst={}",
        src.display(),
        dst.display()
    );
    fs::rename(src, dst).map_err(|err| with_path(err, src))
}

// `fs::copy` onto the source itself truncates it before reading.
fn same_file(src: &Path, dst: &Path) -> io::Result<bool> {
    let src_meta = fs::metadata(src).map_err(|err| with_path(err, src))?;
    let dst_meta = match fs::metadata(dst) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(with_path(err, dst)),
    };
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        Ok(src_meta.dev() == dst_meta.dev() && src_meta.ino() == dst_meta.ino())
    }
    #[cfg(not(unix))]
    {
        let _ = (src_meta, dst_meta);
        Ok(fs::canonicalize(src)? == fs::canonicalize(dst)?)
    }
}

fn with_path(err: io::Error, path: &Path) -> io::Error {
    io::Error::new(err.kind(), format!("{}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filecmd::parse_command;
    use tempfile::tempdir;

    fn run(line: &str, root: &Path) -> io::Result<Outcome> {
        execute(&parse_command(line).unwrap(), root)
    }

    #[test]
    fn create_then_delete() {
        let dir = tempdir().unwrap();
        let outcome = run("create file notes.txt", dir.path()).unwrap();
        assert_eq!(outcome, Outcome::Done("created notes.txt".to_string()));
        assert!(dir.path().join("notes.txt").is_file());

        run("delete file notes.txt", dir.path()).unwrap();
        assert!(!dir.path().join("notes.txt").exists());
    }

    #[test]
    fn create_refuses_existing_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("keep.txt"), "data").unwrap();
        let err = run("create file keep.txt", dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read_to_string(dir.path().join("keep.txt")).unwrap(), "data");
    }

    #[test]
    fn copy_and_rename() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "alpha").unwrap();

        let outcome = run("copy file a.txt to b.txt", dir.path()).unwrap();
        assert_eq!(outcome, Outcome::Done("copied a.txt -> b.txt".to_string()));
        assert_eq!(std::fs::read_to_string(dir.path().join("b.txt")).unwrap(), "alpha");

        run("rename file b.txt to c.txt", dir.path()).unwrap();
        assert!(!dir.path().join("b.txt").exists());
        assert_eq!(std::fs::read_to_string(dir.path().join("c.txt")).unwrap(), "alpha");
        assert!(dir.path().join("a.txt").exists());
    }

    #[test]
    fn copy_onto_itself_keeps_contents() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "precious").unwrap();

        let err = run("copy file a.txt to a.txt", dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("same file"));
        assert_eq!(std::fs::read_to_string(dir.path().join("a.txt")).unwrap(), "precious");
    }

    #[cfg(unix)]
    #[test]
    fn copy_onto_hard_link_keeps_contents() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "precious").unwrap();
        std::fs::hard_link(dir.path().join("a.txt"), dir.path().join("b.txt")).unwrap();

        let err = run("copy file a.txt to b.txt", dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(std::fs::read_to_string(dir.path().join("b.txt")).unwrap(), "precious");
    }

    #[test]
    fn missing_source_reports_path() {
        let dir = tempdir().unwrap();
        let err = run("delete file ghost.txt", dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("ghost.txt"));

        let err = run("copy file ghost.txt to x.txt", dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn exit_touches_nothing() {
        let dir = tempdir().unwrap();
        assert_eq!(run("exit", dir.path()).unwrap(), Outcome::Exit);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn hand_built_command_without_operands() {
        let command = Command {
            kind: CommandKind::Create,
            operands: Vec::new(),
        };
        let err = execute(&command, Path::new(".")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
