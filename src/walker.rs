//! Expands a list of file/directory arguments into a sorted list of `.jack`
//! files, grounded in `test_runner.rs`'s `discover_test_files`/
//! `discover_in_directory` pair from the reference compiler workspace.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CompileError;

const JACK_EXTENSION: &str = "jack";

/// Collects every `.jack` file reachable from `paths`. Files are included
/// directly regardless of extension; directories are recursed into up to
/// `max_depth` levels (`None` means unbounded). The result is sorted for
/// deterministic compile order across runs.
pub fn collect_jack_files(
    paths: &[PathBuf],
    max_depth: Option<usize>,
) -> Result<Vec<PathBuf>, CompileError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            collect_in_directory(path, 0, max_depth, &mut files)?;
        } else {
            return Err(CompileError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            ));
        }
    }
    files.sort();
    Ok(files)
}

fn collect_in_directory(
    dir: &Path,
    depth: usize,
    max_depth: Option<usize>,
    files: &mut Vec<PathBuf>,
) -> Result<(), CompileError> {
    if max_depth.is_some_and(|max| depth > max) {
        return Ok(());
    }

    let entries = fs::read_dir(dir).map_err(|e| CompileError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| CompileError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            collect_in_directory(&path, depth + 1, max_depth, files)?;
        } else if path.extension().is_some_and(|ext| ext == JACK_EXTENSION) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, write};

    #[test]
    fn test_collects_and_sorts_files_from_mixed_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        create_dir_all(&sub).unwrap();
        write(dir.path().join("B.jack"), "").unwrap();
        write(sub.join("A.jack"), "").unwrap();
        write(dir.path().join("notes.txt"), "").unwrap();

        let files = collect_jack_files(&[dir.path().to_path_buf()], None).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0] < files[1]);
    }

    #[test]
    fn test_respects_max_depth() {
        let dir = tempfile::tempdir().unwrap();
        let deep = dir.path().join("a").join("b");
        create_dir_all(&deep).unwrap();
        write(dir.path().join("top.jack"), "").unwrap();
        write(deep.join("buried.jack"), "").unwrap();

        let files = collect_jack_files(&[dir.path().to_path_buf()], Some(0)).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("top.jack"));
    }

    #[test]
    fn test_a_direct_file_argument_is_included_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weird.txt");
        write(&path, "").unwrap();
        let files = collect_jack_files(&[path.clone()], None).unwrap();
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn test_missing_path_is_an_io_error() {
        let err = collect_jack_files(&[PathBuf::from("/no/such/path")], None).unwrap_err();
        assert!(matches!(err, CompileError::Io { .. }));
    }
}
