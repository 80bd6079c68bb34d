use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Font collections can be nested a few levels deep (e.g. /usr/share/fonts/truetype/dejavu).
const MAX_DEPTH: usize = 4;

#[cfg(windows)]
const SYSTEM_FONT_DIRS: &[&str] = &["C:\\Windows\\Fonts"];

#[cfg(target_os = "macos")]
const SYSTEM_FONT_DIRS: &[&str] = &["/Library/Fonts", "/System/Library/Fonts"];

#[cfg(not(any(windows, target_os = "macos")))]
const SYSTEM_FONT_DIRS: &[&str] = &["/usr/share/fonts", "/usr/local/share/fonts"];

/// Directories searched for a font by file name, user dirs first.
pub fn font_search_dirs() -> Vec<PathBuf> {
    let mut search = Vec::new();
    if let Some(dir) = dirs::font_dir() {
        search.push(dir);
    }
    if let Some(home) = dirs::home_dir() {
        search.push(home.join(".fonts"));
    }
    search.extend(SYSTEM_FONT_DIRS.iter().map(PathBuf::from));
    search
}

/// Find a font file by literal path or by case-insensitive file name.
pub fn find_font_file(name: &str, search: &[PathBuf]) -> Option<PathBuf> {
    let literal = Path::new(name);
    if literal.is_file() {
        return Some(literal.to_path_buf());
    }

    let wanted = name.to_lowercase();
    search
        .iter()
        .filter(|dir| dir.is_dir())
        .find_map(|dir| {
            WalkDir::new(dir)
                .max_depth(MAX_DEPTH)
                .follow_links(true)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .find(|entry| {
                    entry.file_type().is_file()
                        && entry.file_name().to_string_lossy().to_lowercase() == wanted
                })
                .map(|entry| entry.into_path())
        })
}
