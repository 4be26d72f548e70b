use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Location of an optional user corrections file layered over the
    /// bundled dictionary.
    pub fn user_dictionary_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let config_dir = PathBuf::from(home).join(".config").join("subfix");
            Some(config_dir.join("corrections.properties"))
        } else {
            ProjectDirs::from("", "", "subfix")
                .map(|proj_dirs| proj_dirs.config_dir().join("corrections.properties"))
        }
    }
}
