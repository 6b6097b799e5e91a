//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions, and manifest
//! snippets to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_manifest(manifests::CORE_AND_APP);
//!     fixture.command().arg("apply").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

use dependency_duplicator::dependency::Dependency;
use dependency_duplicator::project::{Project, ProjectId};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    #[allow(unused_imports)]
    pub use super::{dependency, id, project, TestFixture};
}

/// Common reactor manifests for testing.
#[allow(dead_code)]
pub mod manifests {
    /// `app` depends on `core`; `core` declares commons-lang3 and a rule
    /// duplicating it into test scope.
    pub const CORE_AND_APP: &str = r#"
projects:
  - id: com.example:core:1.0.0
    duplicator:
      duplications:
        - dependency-keys: ["org\\.apache\\.commons:commons-lang3:jar"]
          target-scope: test
    dependencies:
      - group: org.apache.commons
        artifact: commons-lang3
        version: 3.12.0
        scope: compile
  - id: com.example:app:1.0.0
    dependencies:
      - group: com.example
        artifact: core
        version: 1.0.0
"#;

    /// Configuration inherited from a parent outside the reactor, in property form.
    pub const INHERITED_PROPERTIES: &str = r#"
projects:
  - id: com.example:core:1.0.0
    parent: com.example:parent:1.0.0
    dependencies:
      - { group: org.slf4j, artifact: slf4j-api, version: 2.0.9 }
ancestors:
  - id: com.example:parent:1.0.0
    properties:
      ddp.sourceDependencies: "org\\.slf4j:.*, ch\\.qos\\.logback:.*"
      ddp.targetScope: test
      ddp.addDependenciesDownstream: "false"
"#;

    /// A pattern that does not compile.
    pub const INVALID_PATTERN: &str = r#"
projects:
  - id: com.example:core:1.0.0
    duplicator:
      duplications:
        - dependency-keys: "org.slf4j:(.*"
    dependencies:
      - { group: org.slf4j, artifact: slf4j-api }
"#;

    /// Two projects depending on each other.
    pub const CYCLE: &str = r#"
projects:
  - id: com.example:a:1.0.0
    dependencies: [{ group: com.example, artifact: b }]
  - id: com.example:b:1.0.0
    dependencies: [{ group: com.example, artifact: a }]
"#;

    /// Not a manifest at all.
    pub const INVALID_YAML: &str = "projects: [unclosed";
}

/// Project identity in the `com.example` group at version 1.0.0.
#[allow(dead_code)]
pub fn id(artifact: &str) -> ProjectId {
    ProjectId::new("com.example", artifact, "1.0.0")
}

/// A project depending on the listed `com.example` projects.
#[allow(dead_code)]
pub fn project(artifact: &str, depends_on: &[&str]) -> Project {
    depends_on.iter().fold(Project::new(id(artifact)), |p, upstream| {
        p.with_dependency(Dependency::new("com.example", *upstream).with_version("1.0.0"))
    })
}

/// A third-party dependency with a version and scope.
#[allow(dead_code)]
pub fn dependency(group: &str, artifact: &str, scope: &str) -> Dependency {
    Dependency::new(group, artifact)
        .with_version("1.0")
        .with_scope(scope)
}

/// A test fixture that provides a temporary directory with an optional manifest.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `reactor.yaml` manifest with the given content.
    pub fn with_manifest(self, content: &str) -> Self {
        self.temp_dir
            .child("reactor.yaml")
            .write_str(content)
            .expect("Failed to write manifest");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the manifest file.
    pub fn manifest_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("reactor.yaml")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dependency-duplicator");
        cmd.current_dir(self.path());
        cmd.env_remove("DEPENDENCY_DUPLICATOR_MANIFEST");
        cmd.env_remove("DEPENDENCY_DUPLICATOR_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
