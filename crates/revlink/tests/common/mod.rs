//! Shared fixture: a repositories root, a mappings directory and a registry
//! database laid out the way a deployment has them.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use git2::{Repository, Signature};
use revlink_config::Config;
use revlink_registry::SCHEMA;
use rusqlite::{Connection, params};
use tempfile::TempDir;

pub const TRACKER: &str = "http://projects.kde.org";
pub const BROWSER: &str = "http://gitweb.kde.org";

pub struct Fixture {
    dir: TempDir,
    /// Head of `frameworks/kcoreaddons`, registered under kcoreaddons.
    pub registered: String,
    /// Head of `playground/demo`, absent from the registry.
    pub unregistered: String,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::create_dir_all(dir.path().join("repositories")).unwrap();
        fs::create_dir_all(dir.path().join("mappings")).unwrap();

        let registered = create_repo(
            &dir.path().join("repositories/frameworks/kcoreaddons"),
            "Initial kcoreaddons commit",
        );
        let unregistered = create_repo(
            &dir.path().join("repositories/playground/demo"),
            "Initial demo commit",
        );

        let fixture = Self {
            dir,
            registered,
            unregistered,
        };
        fixture.map("frameworks-kcoreaddons", "frameworks/kcoreaddons");
        fixture.map("kde/kcoreaddons", "frameworks/kcoreaddons");
        fixture.map("playground-demo", "playground/demo");
        fixture.create_registry();
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn repositories_root(&self) -> PathBuf {
        self.path().join("repositories")
    }

    pub fn database(&self) -> PathBuf {
        self.path().join("registry.sqlite")
    }

    /// Writes the mapping file for `identifier`.
    pub fn map(&self, identifier: &str, target: &str) {
        let file = self.path().join("mappings").join(identifier);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(file, format!("{target}\n")).unwrap();
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.storage.repositories_root = self.repositories_root();
        config.storage.mappings_dir = self.path().join("mappings");
        config.registry.database = self.database();
        config.urls.tracker = TRACKER.to_string();
        config.urls.browser = BROWSER.to_string();
        config.urls.portal = TRACKER.to_string();
        config
    }

    /// Writes `revlink.toml` into the fixture directory and returns its path.
    pub fn write_config(&self) -> PathBuf {
        let path = self.path().join("revlink.toml");
        let content = format!(
            r#"[storage]
repositories_root = '{}'
mappings_dir = '{}'

[registry]
database = '{}'

[urls]
tracker = "{TRACKER}"
browser = "{BROWSER}"
portal = "{TRACKER}"
"#,
            self.repositories_root().display(),
            self.path().join("mappings").display(),
            self.database().display(),
        );
        fs::write(&path, content).expect("failed to write revlink.toml");
        path
    }

    /// Creates a bare mirror at `suffix` below the root cloned from a fresh
    /// upstream, and returns the upstream path.
    pub fn add_mirror(&self, suffix: &str) -> PathBuf {
        let upstream = self.path().join("upstream").join(suffix);
        create_repo(&upstream, "Upstream commit");

        let mirror = self.repositories_root().join(suffix);
        fs::create_dir_all(mirror.parent().unwrap()).unwrap();
        git2::build::RepoBuilder::new()
            .bare(true)
            .clone(upstream.to_str().unwrap(), &mirror)
            .expect("failed to clone mirror");
        upstream
    }

    fn create_registry(&self) {
        let conn = Connection::open(self.database()).unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute_batch(
            "INSERT INTO projects (id, identifier, parent_id) VALUES
                (1, 'platform', NULL),
                (2, 'frameworks', 1),
                (3, 'kcoreaddons', 2);
             INSERT INTO repositories (id, project_id, url) VALUES
                (1, 3, '/frameworks/kcoreaddons/');",
        )
        .unwrap();
        conn.execute(
            "INSERT INTO changesets (repository_id, revision) VALUES (1, ?1)",
            params![self.registered],
        )
        .unwrap();
    }
}

/// Creates a repository with one commit and returns the commit hash.
pub fn create_repo(path: &Path, message: &str) -> String {
    let repo = Repository::init(path).expect("failed to init repo");
    fs::write(path.join("README"), message).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new("README")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let sig = Signature::now("Test User", "test@example.com").unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[])
        .unwrap()
        .to_string()
}

/// Adds a commit on top of HEAD and returns its hash.
pub fn commit_on_top(path: &Path, message: &str) -> String {
    let repo = Repository::open(path).unwrap();
    fs::write(path.join("CHANGES"), message).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new("CHANGES")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let parent = repo.head().unwrap().peel_to_commit().unwrap();

    let sig = Signature::now("Test User", "test@example.com").unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
        .unwrap()
        .to_string()
}

pub fn tracker_url(revision: &str) -> String {
    format!("{TRACKER}/projects/platform/frameworks/kcoreaddons/repository/revisions/{revision}")
}

pub fn browser_url(path: &str, revision: &str) -> String {
    format!("{BROWSER}/{path}/commit/{revision}")
}
