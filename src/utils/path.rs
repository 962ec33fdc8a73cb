//! Path utilities: expand ~ and resolve database names against the config dir.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Absolute (or `~/`) paths are kept, bare names land inside `dir`.
pub fn resolve_in(dir: &Path, name: &str) -> PathBuf {
    let p = expand_tilde(name);
    if p.is_absolute() { p } else { dir.join(p) }
}
