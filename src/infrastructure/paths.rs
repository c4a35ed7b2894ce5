//! Path utilities for the Zellij sandbox environment.
//!
//! In the plugin sandbox the host filesystem is mounted under `/host`. These
//! helpers locate the panel's data directory and turn user-supplied paths from
//! the plugin configuration into sandbox paths.

use std::path::PathBuf;

/// Returns the data directory for panel storage.
///
/// The directory is located at `/host/.local/share/zellij/modpanel` in the
/// Zellij sandbox. `/host` points to the cwd of the last focused terminal, or
/// the folder where Zellij was started, which typically makes this
/// `~/.local/share/zellij/modpanel`.
///
/// The shared store (`store.json`), local preferences, the identity file and
/// the trace file all live here unless configured otherwise.
///
/// # Examples
///
/// ```
/// use modpanel::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/modpanel");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("modpanel")
}

/// Expands tilde paths to use the `/host` prefix for the Zellij sandbox.
///
/// # Examples
///
/// ```
/// use modpanel::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/panel/store.json"), "/host/panel/store.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Resolves an optional configured file path, falling back to
/// `file_name` inside `data_dir`.
#[must_use]
pub fn resolve_file(configured: Option<&str>, data_dir: &std::path::Path, file_name: &str) -> PathBuf {
    configured
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map_or_else(|| data_dir.join(file_name), |p| PathBuf::from(expand_tilde(p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn configured_path_wins_over_default() {
        let data = Path::new("/data");
        assert_eq!(resolve_file(None, data, "store.json"), Path::new("/data/store.json"));
        assert_eq!(resolve_file(Some(" "), data, "store.json"), Path::new("/data/store.json"));
        assert_eq!(
            resolve_file(Some("~/shared.json"), data, "store.json"),
            Path::new("/host/shared.json")
        );
    }
}
