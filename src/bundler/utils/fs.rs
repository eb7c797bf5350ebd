//! File system utilities for packaging.
//!
//! Provides idempotent directory handling, symlink-preserving copies and
//! deterministic directory listings, all reporting failures as
//! [`Error::ResourceIo`](crate::bundler::Error::ResourceIo).

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails with [`Error::ResourceIo`] if the source is missing or unreadable.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", from)?;
    Ok(())
}

/// Recursively copies the contents of `from` into `to`, creating `to` and
/// any missing parents. Existing files in `to` are overwritten.
///
/// Preserves symlinks on platforms that support them.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    copy_dir_renaming(from, to, |name| name.to_string()).await
}

/// Like [`copy_dir`], passing every file name (not directory names) through
/// `rename` before writing it.
pub async fn copy_dir_renaming<F>(from: &Path, to: &Path, rename: F) -> Result<()>
where
    F: Fn(&str) -> String + Send + 'static,
{
    let root = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        std::fs::create_dir_all(&to).fs_context("creating directory", &to)?;

        for entry in walkdir::WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(e, &root))?;
            let rel_path = entry
                .path()
                .strip_prefix(&root)
                .map_err(io::Error::other)
                .fs_context("resolving copied path", entry.path())?;
            if rel_path.as_os_str().is_empty() {
                continue;
            }

            let mut dest_path = to.join(rel_path);
            if !entry.file_type().is_dir() {
                let name = entry.file_name().to_string_lossy();
                dest_path.set_file_name(rename(&name));
            }

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path())
                    .fs_context("reading symlink", entry.path())?;
                if dest_path.symlink_metadata().is_ok() {
                    std::fs::remove_file(&dest_path)
                        .fs_context("replacing existing file", &dest_path)?;
                }
                if entry.path().is_dir() {
                    symlink_dir(&target, &dest_path)
                } else {
                    symlink_file(&target, &dest_path)
                }
                .fs_context("creating symlink", &dest_path)?;
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path)
                    .fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path)
                    .fs_context("copying file", entry.path())?;
            }
        }

        Ok(())
    })
    .await
    .map_err(io::Error::other)
    .fs_context("copying directory", from)?
}

/// Converts a traversal error into [`Error::ResourceIo`] naming the failing path.
fn walk_error(error: walkdir::Error, root: &Path) -> Error {
    let path = error.path().unwrap_or(root).to_path_buf();
    let message = error.to_string();
    Error::ResourceIo {
        context: "walking directory".to_string(),
        path,
        source: error
            .into_io_error()
            .unwrap_or_else(|| io::Error::other(message)),
    }
}

/// Copies a file set into `dest`.
///
/// A directory contributes its contents, a file contributes itself under its
/// own name.
pub async fn copy_file_set(sources: &[PathBuf], dest: &Path) -> Result<()> {
    for source in sources {
        if source.is_dir() {
            copy_dir(source, dest).await?;
        } else {
            let name = source.file_name().ok_or_else(|| {
                Error::InvalidRequest(format!("{} has no file name", source.display()))
            })?;
            copy_file(source, &dest.join(name)).await?;
        }
    }
    Ok(())
}

/// Entries directly under `dir`, sorted by path.
pub async fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir)
        .await
        .fs_context("reading directory", dir)?;
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .fs_context("reading directory entry", dir)?
    {
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}

/// Regular files directly under `dir`, sorted by path. Symlinks are skipped.
pub async fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in list_entries(dir).await? {
        let metadata = fs::symlink_metadata(&path)
            .await
            .fs_context("reading file metadata", &path)?;
        if metadata.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}
