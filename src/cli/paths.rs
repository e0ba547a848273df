//! Path resolution utilities for CLI commands

use std::env;
use std::path::PathBuf;

/// Resolve the root path for workspace discovery.
///
/// An explicit root wins; otherwise the current directory, or "." if that
/// cannot be determined.
pub fn resolve_root_path(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_explicit_path() {
        let explicit = PathBuf::from("/tmp/notes");
        assert_eq!(resolve_root_path(Some(explicit.clone())), explicit);
    }

    #[test]
    fn test_resolve_without_path_uses_current_dir() {
        let result = resolve_root_path(None);
        if let Ok(current) = env::current_dir() {
            assert_eq!(result, current);
        } else {
            assert_eq!(result, PathBuf::from("."));
        }
    }
}
