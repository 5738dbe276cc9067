//! Config-file discovery and reading.
//!
//! Paths are configured verbatim and read in order at resolution time. A
//! path that cannot be read (missing, unreadable, a directory) is treated
//! as absent and skipped: listing a config path is a suggestion, not a
//! requirement. Malformed content is a different matter and is rejected by
//! the resolution pipeline once the text has been read.

use std::path::PathBuf;

use tracing::debug;

/// Read every configured path, in order, returning the ones that exist.
pub(crate) fn read_config_files(paths: &[PathBuf]) -> Vec<(PathBuf, String)> {
    let mut files = Vec::new();
    for path in paths {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!(path = %path.display(), "loaded config file");
                files.push((path.clone(), content));
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping absent config file");
            }
        }
    }
    files
}

/// Conventional lookup order for an application's config files, lowest
/// priority first: the platform config directory (XDG on Linux,
/// `~/Library/Application Support` on macOS), then a dotfile in the user's
/// home directory.
///
/// Purely a convenience for callers of `set_config_files`; entries whose
/// base directory cannot be determined are omitted.
pub fn default_config_files(app_name: &str) -> Vec<PathBuf> {
    let file_name = format!("{app_name}.toml");
    let mut paths = Vec::new();

    if let Some(proj) = directories::ProjectDirs::from("", "", app_name) {
        paths.push(proj.config_dir().join(&file_name));
    }
    if let Some(user) = directories::UserDirs::new() {
        paths.push(user.home_dir().join(format!(".{file_name}")));
    }
    paths
}
