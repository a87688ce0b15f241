//! Application identity used to locate the storage file

use std::path::PathBuf;

/// File name of the JSON object holding every entry of an application
pub const STORAGE_FILE: &str = "local_storage.json";

/// Application identifier used to determine storage location
///
/// The store follows the [XDG Base Directory Specification](https://specifications.freedesktop.org/basedir-spec/basedir-spec-latest.html)
/// on Linux and similar conventions on other platforms.
///
/// # Example
///
/// ```
/// use iced_local_storage::AppName;
///
/// let app_name = AppName::new("dev", "iced-todo", "todo-list");
/// assert_eq!(app_name.application, "todo-list");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppName {
    pub qualifier: String,
    pub organization: String,
    pub application: String,
}

impl AppName {
    /// Create a new application name
    ///
    /// # Arguments
    ///
    /// * `qualifier` - Typically a reverse domain name (e.g., "com", "dev")
    /// * `organization` - Your organization or username
    /// * `application` - The application name
    pub fn new(
        qualifier: impl Into<String>,
        organization: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            qualifier: qualifier.into(),
            organization: organization.into(),
            application: application.into(),
        }
    }

    /// Directory holding the storage file
    ///
    /// - Linux: `$XDG_CONFIG_HOME/<app>/store` or `~/.config/<app>/store`
    /// - macOS: `~/Library/Application Support/<app>/store`
    /// - Windows: `%LOCALAPPDATA%\<app>\store`
    ///
    /// Falls back to `./store` when no home directory can be found.
    pub fn storage_dir(&self) -> PathBuf {
        directories::ProjectDirs::from(
            self.qualifier.as_str(),
            self.organization.as_str(),
            self.application.as_str(),
        )
        .map(|dirs| dirs.config_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join("store")
    }

    /// Full path of the storage file
    pub fn storage_path(&self) -> PathBuf {
        self.storage_dir().join(STORAGE_FILE)
    }
}
