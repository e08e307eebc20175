//! File plumbing for the host: reading, writing and listing notebook files.
//! All paths are relative to a notebook root; the core's parse and serialize
//! never touch the filesystem themselves.

use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::NotebookFile;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("no such file: {0}")]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid notebook directory: {0}")]
    InvalidNotebookDir(String),
}

/// Read a notebook file's text, given its path relative to the root.
pub fn read_file(relative_path: &RelativePath, notebook_root: &Path) -> Result<String, IoError> {
    let path = relative_path.to_path(notebook_root);
    fs::read_to_string(&path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => IoError::NotFound(path.clone()),
        _ => IoError::Io(source),
    })
}

/// Write serialized document text back to a notebook file, creating any
/// missing parent directories on the way.
pub fn write_file(
    relative_path: &RelativePath,
    notebook_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let path = relative_path.to_path(notebook_root);
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    Ok(())
}

/// List the markdown files under the notebook root, sorted by relative path.
pub fn scan_notebook_files(notebook_root: &Path) -> Result<Vec<NotebookFile>, IoError> {
    if !notebook_root.is_dir() {
        return Err(IoError::InvalidNotebookDir(
            "notebook directory not found".to_string(),
        ));
    }

    let mut paths = collect_markdown_paths(notebook_root)?;
    paths.sort();

    let files = paths
        .iter()
        .filter_map(|path| {
            let relative = path.strip_prefix(notebook_root).ok()?;
            Some(NotebookFile::new(RelativePathBuf::from_path(relative).ok()?))
        })
        .collect();
    Ok(files)
}

/// Walk the tree with an explicit worklist, keeping only `.md` files.
fn collect_markdown_paths(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    let mut pending = vec![root.to_path_buf()];
    let mut found = Vec::new();

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "md") {
                found.push(path);
            }
        }
    }

    Ok(found)
}

pub fn validate_notebook_dir(path: &Path) -> Result<(), IoError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(IoError::InvalidNotebookDir(format!(
            "{} does not exist or is not a directory",
            path.display()
        )))
    }
}
