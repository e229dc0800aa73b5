//! # Image Reference Helpers
//!
//! File: cli/src/common/docker/naming.rs
//!
//! Pure string helpers for image references. No daemon access.

/// Returns the part of an image reference after its last `/`.
///
/// The created container is labelled with this short name rather than the
/// full reference the image was pulled from.
///
/// * `"registry.example.com/library/alpine"` → `"alpine"`
/// * `"alpine"` → `"alpine"`
/// * `""` → `""`
pub fn short_name(image: &str) -> &str {
    image.rsplit_once('/').map_or(image, |(_, last)| last)
}

/// Tag to request when pulling `image`.
///
/// The pull endpoint fetches *every* tag of a repository when no tag is
/// given, so references without an explicit tag or digest ask for `latest`.
/// A `:` only counts as a tag separator in the final path segment, which
/// keeps registry ports (`localhost:5000/app`) from being mistaken for tags.
pub fn pull_tag(image: &str) -> Option<&'static str> {
    let has_digest = image.contains('@');
    let has_tag = short_name(image).contains(':');
    if has_digest || has_tag || image.is_empty() {
        None
    } else {
        Some("latest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_strips_registry_and_namespace() {
        assert_eq!(short_name("registry.example.com/library/alpine"), "alpine");
        assert_eq!(short_name("library/alpine:3.19"), "alpine:3.19");
    }

    #[test]
    fn test_short_name_without_separator_is_unchanged() {
        assert_eq!(short_name("alpine"), "alpine");
    }

    #[test]
    fn test_short_name_empty() {
        assert_eq!(short_name(""), "");
    }

    #[test]
    fn test_short_name_trailing_slash_is_empty() {
        assert_eq!(short_name("registry.example.com/"), "");
    }

    #[test]
    fn test_pull_tag_defaults_to_latest() {
        assert_eq!(pull_tag("alpine"), Some("latest"));
        assert_eq!(pull_tag("localhost:5000/app"), Some("latest"));
    }

    #[test]
    fn test_pull_tag_respects_explicit_tag_or_digest() {
        assert_eq!(pull_tag("alpine:3.19"), None);
        assert_eq!(pull_tag("localhost:5000/app:dev"), None);
        assert_eq!(pull_tag("alpine@sha256:0123abcd"), None);
    }
}
