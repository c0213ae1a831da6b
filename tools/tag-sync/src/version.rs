//! Version extraction from metadata files.

use maskwork_common::{MaskworkError, MaskworkResult};
use regex::Regex;

/// Matches the conventional metadata line `__version__ = '1.4.0'`,
/// capturing the version string.
pub const DEFAULT_PATTERN: &str = r"__version__\s*=\s*'([^']+)'";

/// Pull the version out of `content` using `pattern`, which must contain
/// exactly one capture group. The first matching line wins.
pub fn extract_version(content: &str, pattern: &str) -> MaskworkResult<String> {
    let regex = Regex::new(pattern)
        .map_err(|e| MaskworkError::tag(format!("invalid version pattern: {e}")))?;

    if regex.captures_len() != 2 {
        return Err(MaskworkError::tag(format!(
            "version pattern must have exactly one capture group, found {}",
            regex.captures_len() - 1
        )));
    }

    let captures = regex.captures(content).ok_or_else(|| {
        MaskworkError::tag(format!("no line matches version pattern `{pattern}`"))
    })?;

    let version = captures
        .get(1)
        .map(|m| m.as_str().trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MaskworkError::tag("version pattern captured an empty string"))?;

    Ok(version.to_string())
}

/// Tag name for a version string: `v` + the version, verbatim.
pub fn tag_name(version: &str) -> String {
    format!("v{version}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_metadata_version_line() {
        let content = "__author__ = 'someone'\n__version__ = '1.4.0'\n";
        let version = extract_version(content, DEFAULT_PATTERN).unwrap();
        assert_eq!(version, "1.4.0");
        assert_eq!(tag_name(&version), "v1.4.0");
    }

    #[test]
    fn missing_version_line_is_an_error() {
        let err = extract_version("__author__ = 'someone'\n", DEFAULT_PATTERN).unwrap_err();
        assert!(err.to_string().contains("no line matches"));
    }

    #[test]
    fn empty_capture_is_an_error() {
        assert!(extract_version("__version__ = ''\n", DEFAULT_PATTERN).is_err());
    }

    #[test]
    fn patterns_without_capture_groups_are_rejected() {
        let err = extract_version("1.2.3", r"\d+\.\d+\.\d+").unwrap_err();
        assert!(err.to_string().contains("capture group"));
    }

    #[test]
    fn custom_patterns_cover_cargo_manifests() {
        let content = "[package]\nname = \"demo\"\nversion = \"0.3.1\"\n";
        let version = extract_version(content, r#"(?m)^version\s*=\s*"([^"]+)""#).unwrap();
        assert_eq!(version, "0.3.1");
    }

    #[test]
    fn first_match_wins() {
        let content = "__version__ = '1.0.0'\n__version__ = '2.0.0'\n";
        assert_eq!(extract_version(content, DEFAULT_PATTERN).unwrap(), "1.0.0");
    }

    #[test]
    fn tag_name_is_verbatim_concatenation() {
        assert_eq!(tag_name("1.4.0"), "v1.4.0");
        assert_eq!(tag_name("2.0.0-rc.1"), "v2.0.0-rc.1");
    }
}
