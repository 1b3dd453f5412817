//! Parent walk through the project hierarchy.

use std::collections::{HashSet, VecDeque};

use revlink_types::ProjectId;
use tracing::debug;

/// Upper bound on the number of projects in an ancestry chain.
pub const MAX_ANCESTRY_DEPTH: usize = 64;

/// A project as stored in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNode {
    /// Registry id.
    pub id: ProjectId,

    /// Slug used in tracker URLs.
    pub slug: String,

    /// Parent project, if any. A weak reference: it may not resolve.
    pub parent: Option<ProjectId>,
}

/// Collects slugs from `start` up to its root, returned root-first.
///
/// `lookup` fetches a node by id; `Ok(None)` means the id does not resolve
/// and ends the walk. The walk also ends on the first repeated id, so a
/// cycle yields each node once, and after [`MAX_ANCESTRY_DEPTH`] nodes. If
/// `start` itself does not resolve the chain is empty.
///
/// # Errors
///
/// Returns the first error produced by `lookup`.
pub fn ancestry_chain<E, F>(start: ProjectId, mut lookup: F) -> Result<Vec<String>, E>
where
    F: FnMut(ProjectId) -> Result<Option<ProjectNode>, E>,
{
    let mut chain = VecDeque::new();
    let mut seen = HashSet::new();
    let mut next = Some(start);

    while let Some(id) = next {
        if chain.len() >= MAX_ANCESTRY_DEPTH {
            debug!(%start, depth = chain.len(), "ancestry walk truncated at depth limit");
            break;
        }
        if !seen.insert(id) {
            debug!(%start, %id, "ancestry walk stopped at cycle");
            break;
        }
        let Some(node) = lookup(id)? else {
            debug!(%start, %id, "ancestry walk stopped at unresolvable project");
            break;
        };

        chain.push_front(node.slug);
        next = node.parent;
    }

    Ok(chain.into())
}
