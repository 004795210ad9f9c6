//! Reading and writing jobfiles on disk.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use jobfile_codec::{Document, RenderOptions};

use crate::error::{CliError, Result};

/// Read and parse a jobfile.
pub fn read_jobfile(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = Document::parse(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), sections = document.len(), "Read jobfile");
    Ok(document)
}

/// Render a document and write it to `path`.
///
/// The text goes to a temporary file next to `path` first and is then
/// renamed into place. No trailing newline is added.
pub fn write_jobfile(path: &Path, document: &Document, options: RenderOptions) -> Result<()> {
    let write_err = |source: std::io::Error| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    let content = document.render_with(&options);
    let temp_file = temp_path(path);

    {
        let mut file = File::create(&temp_file).map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path).map_err(write_err)?;
    }

    fs::rename(&temp_file, path).map_err(write_err)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote jobfile");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "jobfile".into(), |n| n.to_string_lossy());
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobfile_codec::Section;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn document() -> Document {
        let mut doc = Document::new();
        let mut instance = Section::new("INSTANCE_DEFINITION").unwrap();
        instance.set("INSTANCE_ID", "<Default>").unwrap();
        doc.push(instance);
        doc
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("job.txt");
        let doc = document();

        write_jobfile(&path, &doc, RenderOptions::default()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, doc.render(true));
        assert!(!text.ends_with('\n'));

        let read = read_jobfile(&path).unwrap();
        assert_eq!(read.len(), 1);
        assert!(!dir.path().join(".job.txt.tmp").exists());
    }

    #[test]
    fn test_write_keeps_delimiters_when_asked() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("job.txt");
        let options = RenderOptions {
            fix_delimiter_bug: false,
        };
        write_jobfile(&path, &document(), options).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("<Default>"));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("job.txt");
        fs::write(&path, "old content").unwrap();
        write_jobfile(&path, &document(), RenderOptions::default()).unwrap();
        assert!(fs::read_to_string(&path)
            .unwrap()
            .starts_with("START_SECTION INSTANCE_DEFINITION"));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_jobfile(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn test_read_invalid_jobfile() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "START_SECTION GENERAL\n").unwrap();
        let err = read_jobfile(&path).unwrap_err();
        assert!(matches!(err, CliError::Parse { .. }));
        assert!(err.to_string().contains("bad.txt"));
    }
}
