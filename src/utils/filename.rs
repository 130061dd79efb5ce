use crate::utils::constants::YEAR_FILE_EXTENSION;
use std::path::{Path, PathBuf};

/// Last path segment of an index `file` entry (always `/`-separated).
pub fn basename(file: &str) -> &str {
    file.rsplit('/').next().unwrap_or(file)
}

/// True for delayed-mode core profiles: basename `D*.nc`.
///
/// Anchored at the first character, so `BD...` (bio) and `SD...`
/// (synthetic) profiles are rejected, as is lowercase `d`.
pub fn is_delayed_mode_core(file: &str) -> bool {
    let name = basename(file);
    name.starts_with('D') && name.ends_with(".nc") && !name.contains('\\')
}

/// Output path of a year partition, e.g. `docs/2024.json`.
pub fn year_file_path(dir: &Path, year: i64) -> PathBuf {
    dir.join(format!("{}.{}", year, YEAR_FILE_EXTENSION))
}

/// Render `path` relative to `root` when possible, for report lines.
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
