use super::InputFormat;
use crate::config::DEFAULT_CONFIG_FILE;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

pub fn list_sheets(root: &Path, exclude: &[PathBuf]) -> Vec<PathBuf> {
    let mut sheets = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| InputFormat::from_path(path).is_some())
        .filter(|path| {
            path.file_name().and_then(|name| name.to_str()) != Some(DEFAULT_CONFIG_FILE)
        })
        .filter(|path| !exclude.iter().any(|excluded| same_file(path, excluded)))
        .collect::<Vec<_>>();
    sheets.sort();
    sheets
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
