use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Workspace root that note paths are relative to
    pub const WORKSPACE_ROOT: &str = "DOC_LOGGER_ROOT";
    /// File name of the note log inside the workspace root
    pub const NOTES_FILE: &str = "DOC_LOGGER_NOTES_FILE";
}

/// Default values
pub mod defaults {
    pub const NOTES_FILE: &str = "NOTES.md";
}

#[derive(Clone, Debug)]
pub struct Config {
    /// None when no workspace is open
    pub workspace_root: Option<PathBuf>,
    pub notes_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_root: None,
            notes_file: defaults::NOTES_FILE.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from a variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());

        let workspace_root = var(env_vars::WORKSPACE_ROOT).map(PathBuf::from);
        let notes_file =
            var(env_vars::NOTES_FILE).unwrap_or_else(|| defaults::NOTES_FILE.to_string());

        Self {
            workspace_root,
            notes_file,
        }
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// Get the note file path, if a workspace is open
    pub fn notes_path(&self) -> Option<PathBuf> {
        self.workspace_root
            .as_ref()
            .map(|root| root.join(&self.notes_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_has_no_workspace() {
        let config = Config::default();
        assert!(config.workspace_root.is_none());
        assert!(config.notes_path().is_none());
        assert_eq!(config.notes_file, "NOTES.md");
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (env_vars::WORKSPACE_ROOT, "/ws"),
            (env_vars::NOTES_FILE, "LOG.md"),
        ]);
        let config = Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.workspace_root, Some(PathBuf::from("/ws")));
        assert_eq!(config.notes_path(), Some(PathBuf::from("/ws/LOG.md")));
    }

    #[test]
    fn test_from_lookup_blank_is_unset() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (env_vars::WORKSPACE_ROOT, "  "),
            (env_vars::NOTES_FILE, ""),
        ]);
        let config = Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert!(config.workspace_root.is_none());
        assert_eq!(config.notes_file, defaults::NOTES_FILE);

        let config = Config::from_lookup(|_| None);
        assert!(config.workspace_root.is_none());
        assert_eq!(config.notes_file, defaults::NOTES_FILE);
    }

    #[test]
    fn test_notes_path() {
        let config = Config::default().with_workspace_root("/ws");
        assert_eq!(config.notes_path(), Some(PathBuf::from("/ws/NOTES.md")));
    }
}
