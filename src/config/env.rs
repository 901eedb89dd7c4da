//! Environment access used while loading configuration
//!
//! Loading goes through [`ConfigEnv`] so tests can supply files and
//! variables without touching the real process environment.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

pub trait ConfigEnv {
    /// Value of an environment variable, if set and valid unicode
    fn var(&self, name: &str) -> Option<String>;

    fn read_file(&self, path: &Path) -> io::Result<String>;

    fn file_exists(&self, path: &Path) -> bool;
}

/// The process environment and filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct RealEnv;

impl ConfigEnv for RealEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory environment for tests
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: HashMap<String, String>,
    files: HashMap<PathBuf, String>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }
}

impl ConfigEnv for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not in mock environment", path.display()),
            )
        })
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_env() {
        let env = MockEnv::new()
            .with_env("TICKETDESK_SEED", "7")
            .with_file("ticketdesk.toml", "sample_seed = 7");

        assert_eq!(env.var("TICKETDESK_SEED").as_deref(), Some("7"));
        assert!(env.var("TICKETDESK_HOST").is_none());
        assert!(env.file_exists(Path::new("ticketdesk.toml")));
        assert_eq!(
            env.read_file(Path::new("ticketdesk.toml")).unwrap(),
            "sample_seed = 7"
        );

        let err = env.read_file(Path::new("missing.toml")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
