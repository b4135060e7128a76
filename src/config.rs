//! Stylesheet discovery.
//!
//! Without `--css`, the first `style.css` found in these directories wins:
//! `~/.wlosd/`, `$XDG_CONFIG_HOME/wlosd/`, `~/.config/wlosd/`, `/etc/xdg/wlosd/`.

use std::path::PathBuf;

/// File name looked up in each search directory
pub const STYLESHEET_NAME: &str = "style.css";

const APP_DIR: &str = "wlosd";

/// Directories searched for the stylesheet, in priority order.
pub fn search_dirs() -> Vec<PathBuf> {
    search_dirs_from(
        dirs::home_dir(),
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
    )
}

fn search_dirs_from(home: Option<PathBuf>, xdg_config_home: Option<PathBuf>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(home) = &home {
        candidates.push(home.join(".wlosd"));
    }
    // An empty XDG_CONFIG_HOME counts as unset
    if let Some(config) = xdg_config_home.filter(|p| !p.as_os_str().is_empty()) {
        candidates.push(config.join(APP_DIR));
    }
    if let Some(home) = &home {
        candidates.push(home.join(".config").join(APP_DIR));
    }
    candidates.push(PathBuf::from("/etc/xdg").join(APP_DIR));
    candidates
}

/// First `dir/name` that is an existing file.
pub fn find_in(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    dirs.iter().map(|dir| dir.join(name)).find(|path| path.is_file())
}

/// Locate the default stylesheet, if any.
pub fn find_stylesheet() -> Option<PathBuf> {
    find_in(&search_dirs(), STYLESHEET_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_order() {
        let dirs = search_dirs_from(
            Some(PathBuf::from("/home/u")),
            Some(PathBuf::from("/xdg")),
        );
        assert_eq!(
            dirs,
            [
                PathBuf::from("/home/u/.wlosd"),
                PathBuf::from("/xdg/wlosd"),
                PathBuf::from("/home/u/.config/wlosd"),
                PathBuf::from("/etc/xdg/wlosd"),
            ]
        );
    }

    #[test]
    fn test_search_without_home_or_xdg() {
        assert_eq!(
            search_dirs_from(None, Some(PathBuf::new())),
            [PathBuf::from("/etc/xdg/wlosd")]
        );
    }

    #[test]
    fn test_first_match_wins() {
        let root = tempfile::tempdir().unwrap();
        let first = root.path().join("first");
        let second = root.path().join("second");
        std::fs::create_dir_all(&first).unwrap();
        std::fs::create_dir_all(&second).unwrap();
        let dirs = [first.clone(), second.clone()];

        assert_eq!(find_in(&dirs, STYLESHEET_NAME), None);

        std::fs::write(second.join(STYLESHEET_NAME), "").unwrap();
        assert_eq!(
            find_in(&dirs, STYLESHEET_NAME),
            Some(second.join(STYLESHEET_NAME))
        );

        std::fs::write(first.join(STYLESHEET_NAME), "").unwrap();
        assert_eq!(
            find_in(&dirs, STYLESHEET_NAME),
            Some(first.join(STYLESHEET_NAME))
        );
    }

    #[test]
    fn test_directory_named_like_stylesheet_ignored() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join(STYLESHEET_NAME)).unwrap();
        assert_eq!(
            find_in(&[root.path().to_path_buf()], STYLESHEET_NAME),
            None
        );
    }
}
