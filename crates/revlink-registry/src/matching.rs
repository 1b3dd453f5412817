//! Comparison between a queried path and a project's registered repository.

use revlink_types::{CanonicalPath, trim_trailing_separators};

/// Returns whether `registered` names the repository at `path`.
///
/// `prefix` is prepended to `path` first, for registries that record
/// absolute on-disk locations. Trailing separators are ignored on both sides;
/// otherwise the comparison is exact.
pub fn registered_path_matches(prefix: &str, path: &CanonicalPath, registered: &str) -> bool {
    let queried = format!("{}{}", trim_trailing_separators(prefix), path.as_str());
    trim_trailing_separators(&queried) == trim_trailing_separators(registered)
}
