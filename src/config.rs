//! Compiler configuration: the environment the parser may consult.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Directory `~/` expands to in indirect file names. `None` makes tilde paths an error.
    pub home_dir: Option<PathBuf>,
}

impl CompilerConfig {
    /// Capture `HOME` from the process environment.
    pub fn from_env() -> Self {
        CompilerConfig {
            home_dir: std::env::var_os("HOME").map(PathBuf::from),
        }
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        CompilerConfig {
            home_dir: Some(home.into()),
        }
    }

    /// Expand a leading `~/` by textual concatenation: `~/x` becomes `$HOME/x`, so an absolute
    /// remainder (`~//etc/x`) stays under home. Returns `None` when no home is set.
    pub(crate) fn expand_tilde(&self, name: &str) -> Option<PathBuf> {
        if !name.starts_with("~/") {
            return Some(Path::new(name).to_path_buf());
        }
        let home = self.home_dir.as_ref()?;
        let mut expanded = OsString::from(home.as_os_str());
        expanded.push(&name[1..]);
        Some(PathBuf::from(expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_against_home() {
        let cfg = CompilerConfig::with_home("/home/snappy");
        assert_eq!(
            cfg.expand_tilde("~/certs/root.pem"),
            Some(PathBuf::from("/home/snappy/certs/root.pem"))
        );
        assert_eq!(cfg.expand_tilde("local.pem"), Some(PathBuf::from("local.pem")));
        assert_eq!(cfg.expand_tilde("~user/x"), Some(PathBuf::from("~user/x")));
    }

    #[test]
    fn absolute_remainder_stays_under_home() {
        let cfg = CompilerConfig::with_home("/home/snappy");
        let expanded = cfg.expand_tilde("~//etc/passwd").expect("home set");
        assert_eq!(expanded.as_os_str(), "/home/snappy//etc/passwd");
        assert!(expanded.starts_with("/home/snappy"));
    }

    #[test]
    fn empty_home_expands_to_root() {
        let cfg = CompilerConfig::with_home("");
        let expanded = cfg.expand_tilde("~/file").expect("home set");
        assert_eq!(expanded.as_os_str(), "/file");
    }

    #[test]
    fn tilde_without_home_fails() {
        let cfg = CompilerConfig::default();
        assert_eq!(cfg.expand_tilde("~/missing-file"), None);
        assert_eq!(cfg.expand_tilde("/abs/file"), Some(PathBuf::from("/abs/file")));
    }
}
