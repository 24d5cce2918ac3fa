//! Path rules for the repository filesystem.
//!
//! Paths are slash-separated and relative to the repository root. A path is
//! valid when it is non-empty, has no leading or trailing slash, and none of
//! its elements is empty, `.` or `..`.
//!
//! The root is the one exception: both `""` and `"."` name the repository
//! root and are always accepted. They resolve to the empty API path.

/// True when `name` satisfies the element rules above (root excluded).
pub fn is_valid_path(name: &str) -> bool {
    if name == "." {
        return true;
    }
    !name.is_empty()
        && name
            .split('/')
            .all(|elem| !elem.is_empty() && elem != "." && elem != "..")
}

/// True for the root sentinels `""` and `"."`.
pub fn is_root(name: &str) -> bool {
    name.is_empty() || name == "."
}

/// Map a caller path to the path sent to the contents API, or `None` when invalid.
pub(crate) fn api_path(name: &str) -> Option<&str> {
    if is_root(name) {
        Some("")
    } else if is_valid_path(name) {
        Some(name)
    } else {
        None
    }
}

/// Last element of a path; `.` for the root.
pub(crate) fn base_name(name: &str) -> &str {
    if is_root(name) {
        return ".";
    }
    name.rsplit('/').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_paths() {
        for name in [".", "README.md", "a/b/c.txt", "x..y", ".github/workflows", "a b/c"] {
            assert!(is_valid_path(name), "{name:?} should be valid");
        }
    }

    #[test]
    fn test_invalid_paths() {
        for name in ["", "/", "/a", "a/", "a//b", "./a", "a/.", "../a", "a/../b", ".."] {
            assert!(!is_valid_path(name), "{name:?} should be invalid");
        }
    }

    #[test]
    fn test_root_sentinel() {
        assert_eq!(api_path(""), Some(""));
        assert_eq!(api_path("."), Some(""));
        assert_eq!(api_path("src/lib.rs"), Some("src/lib.rs"));
        assert_eq!(api_path("/src"), None);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(""), ".");
        assert_eq!(base_name("."), ".");
        assert_eq!(base_name("README.md"), "README.md");
        assert_eq!(base_name("rate/rate.go"), "rate.go");
    }
}
