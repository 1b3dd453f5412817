//! Project registry handles.

use std::fmt;

use serde::Serialize;

/// Registry id of a project node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProjectId(pub i64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A project whose registered repository owns a revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectMatch {
    /// The owning project.
    pub project_id: ProjectId,

    /// The project's slug.
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_display() {
        assert_eq!(ProjectId(42).to_string(), "42");
    }
}
