//! Writing a finished [`Generation`] to disk.
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::Generation;

/// Write every file of `generation` into `dir` (created if missing),
/// overwriting existing files. Returns the written paths in emission order.
pub fn write_generation(dir: impl AsRef<Path>, generation: &Generation) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|source| Error::io(dir, source))?;
    let mut written = Vec::with_capacity(generation.files.len());
    for file in &generation.files {
        let path = dir.join(&file.file_name);
        std::fs::write(&path, &file.contents).map_err(|source| Error::io(&path, source))?;
        info!(path = %path.display(), bytes = file.contents.len(), "wrote");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::GeneratedFile;

    fn generation() -> Generation {
        Generation {
            files: vec![
                GeneratedFile::new("Feed.h", "header"),
                GeneratedFile::new("Feed.m", "impl"),
            ],
            diagnostics: vec![],
        }
    }

    #[test]
    fn creates_directory_and_writes_all_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out/nested");
        let written = write_generation(&dir, &generation()).unwrap();
        assert_eq!(written, vec![dir.join("Feed.h"), dir.join("Feed.m")]);
        assert_eq!(std::fs::read_to_string(dir.join("Feed.m")).unwrap(), "impl");
    }

    #[test]
    fn overwrites_existing_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("Feed.h"), "stale").unwrap();
        write_generation(tmp.path(), &generation()).unwrap();
        assert_eq!(std::fs::read_to_string(tmp.path().join("Feed.h")).unwrap(), "header");
    }

    #[test]
    fn unwritable_target_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let err = write_generation(blocker.join("sub"), &generation()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
