use regex::Regex;
use tracing::warn;

/// Compiled `excluded_paths` patterns
///
/// A pattern matches the whole document path, case-insensitively; `*` matches
/// any run of characters including `/`. Everything else is literal.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    patterns: Vec<Regex>,
}

impl ExclusionSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns = patterns
            .iter()
            .map(AsRef::as_ref)
            .filter(|p| !p.trim().is_empty())
            .filter_map(|pattern| match glob_to_regex(pattern) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    warn!(pattern, error = %e, "ignoring invalid exclusion pattern");
                    None
                }
            })
            .collect();
        ExclusionSet { patterns }
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(path))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let body = pattern
        .trim()
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("(?is)^{}$", body))
}
