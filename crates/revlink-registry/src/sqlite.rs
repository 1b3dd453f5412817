//! SQLite-backed project registry.

use std::path::PathBuf;
use std::time::Duration;

use revlink_types::{CanonicalPath, CanonicalRevision, ProjectId, ProjectMatch};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use tracing::debug;

use crate::{
    Connector, ProjectNode, RegistryError, RegistryResult, SupervisedConnection, ancestry_chain,
    registered_path_matches,
};

/// Tables the registry database is expected to contain.
///
/// The registry is populated out-of-band; revlink only reads it. The layout
/// follows the project tracker's own: projects form a tree through
/// `parent_id`, each repository belongs to one project, and each changeset
/// row records a revision seen in one repository.
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY,
    identifier TEXT,
    parent_id INTEGER
);
CREATE TABLE IF NOT EXISTS repositories (
    id INTEGER PRIMARY KEY,
    project_id INTEGER,
    url TEXT
);
CREATE TABLE IF NOT EXISTS changesets (
    id INTEGER PRIMARY KEY,
    repository_id INTEGER,
    revision TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS changesets_revision ON changesets(revision);
";

// No ORDER BY: when several repositories carry the same revision the first
// row in the database's own order is authoritative.
const OWNING_PROJECT_QUERY: &str = "
SELECT projects.id, projects.identifier, repositories.url
FROM changesets
LEFT JOIN repositories ON changesets.repository_id = repositories.id
LEFT JOIN projects ON repositories.project_id = projects.id
WHERE changesets.revision = ?1
LIMIT 1";

const PROJECT_QUERY: &str = "SELECT identifier, parent_id FROM projects WHERE id = ?1";

/// Opens read-only connections to a registry database file.
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    database: PathBuf,
    busy_timeout: Duration,
}

impl SqliteConnector {
    /// Creates a connector for the database at `database`.
    #[must_use]
    pub fn new(database: impl Into<PathBuf>, busy_timeout: Duration) -> Self {
        Self {
            database: database.into(),
            busy_timeout,
        }
    }
}

impl Connector for SqliteConnector {
    type Connection = Connection;

    fn connect(&self) -> RegistryResult<Connection> {
        if !self.database.exists() {
            return Err(RegistryError::DatabaseNotFound(self.database.clone()));
        }

        let conn = Connection::open_with_flags(
            &self.database,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(self.busy_timeout)?;

        debug!(database = %self.database.display(), "opened registry database");
        Ok(conn)
    }
}

/// Read-only queries against the project registry.
pub struct SqliteRegistry {
    conn: SupervisedConnection<SqliteConnector>,
    path_prefix: String,
}

impl SqliteRegistry {
    /// Creates a registry client. The database is opened on first use.
    ///
    /// `path_prefix` is prepended to queried paths before they are compared
    /// with registered repository URLs.
    #[must_use]
    pub fn new(connector: SqliteConnector, path_prefix: impl Into<String>) -> Self {
        Self {
            conn: SupervisedConnection::new(connector),
            path_prefix: path_prefix.into(),
        }
    }

    /// Finds the project whose registered repository is `path` and contains
    /// `revision`.
    ///
    /// Only the first changeset row for `revision` is considered. `None` when
    /// there is no row, when the row has null project or repository fields, or
    /// when the registered repository differs from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unavailable`] if the query fails twice.
    pub fn find_owning_project(
        &self,
        path: &CanonicalPath,
        revision: &CanonicalRevision,
    ) -> RegistryResult<Option<ProjectMatch>> {
        let row = self.conn.run(|conn| {
            let row = conn
                .query_row(OWNING_PROJECT_QUERY, params![revision.as_str()], |row| {
                    Ok((
                        row.get::<_, Option<i64>>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, Option<String>>(2)?,
                    ))
                })
                .optional()?;
            Ok(row)
        })?;

        let Some(row) = row else {
            debug!(%revision, "no changeset recorded");
            return Ok(None);
        };

        let (Some(id), Some(slug), Some(url)) = row else {
            debug!(%revision, "changeset row has incomplete project fields");
            return Ok(None);
        };

        if !registered_path_matches(&self.path_prefix, path, &url) {
            debug!(%revision, %path, registered = %url, "changeset belongs to another repository");
            return Ok(None);
        }

        Ok(Some(ProjectMatch {
            project_id: ProjectId(id),
            slug,
        }))
    }

    /// Returns the slugs from the root project down to `project`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unavailable`] if the walk fails twice.
    pub fn ancestry_chain(&self, project: ProjectId) -> RegistryResult<Vec<String>> {
        self.conn.run(|conn| {
            let mut stmt = conn.prepare_cached(PROJECT_QUERY)?;
            ancestry_chain::<RegistryError, _>(project, |id| {
                let node = stmt
                    .query_row(params![id.0], |row| {
                        Ok((
                            row.get::<_, Option<String>>(0)?,
                            row.get::<_, Option<i64>>(1)?,
                        ))
                    })
                    .optional()?;

                // A project without a slug cannot appear in a URL.
                Ok(node.and_then(|(slug, parent)| {
                    slug.map(|slug| ProjectNode {
                        id,
                        slug,
                        parent: parent.map(ProjectId),
                    })
                }))
            })
        })
    }
}
