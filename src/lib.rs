//! # Dependency Duplicator Library
//!
//! Duplicates selected dependency declarations across the projects of a
//! multi-module build. A duplication rule matches dependencies by a regular
//! expression over their management key (`groupId:artifactId:type[:classifier]`),
//! clones each match with overridden coordinates (a different scope, type or
//! classifier) and adds the clone to the declaring project and, optionally, to
//! every project that depends on it. After all additions the build ordering is
//! recomputed, since new declarations may introduce new inter-project edges.
//!
//! ## Quick Example
//!
//! ```
//! use dependency_duplicator::manifest;
//! use dependency_duplicator::phases::Options;
//!
//! let yaml = r#"
//! projects:
//!   - id: com.example:core:1.0.0
//!     duplicator:
//!       duplications:
//!         - dependency-keys: ["org\\.apache\\.commons:.*"]
//!           target-scope: test
//!     dependencies:
//!       - { group: org.apache.commons, artifact: commons-lang3, version: 3.12.0 }
//!   - id: com.example:app:1.0.0
//!     dependencies:
//!       - { group: com.example, artifact: core, version: 1.0.0 }
//! "#;
//!
//! let mut reactor = manifest::parse(yaml).unwrap().into_reactor().unwrap();
//! let report = reactor.run(Options::default()).unwrap();
//! assert_eq!(report.total_added(), 2);
//! ```
//!
//! ## Core Concepts
//!
//! - **Dependencies (`dependency`, `dependency_set`)**: Declarations with a
//!   cached management key, deep equality and an insertion-ordered set.
//! - **Matching (`matcher`, `rule`)**: Whole-key regex matchers and the
//!   duplication rules built from them.
//! - **Configuration (`config`)**: The structured `duplicator` block and the
//!   legacy `ddp.*` properties.
//! - **Graph (`project`, `graph`)**: Projects, their ordering and the
//!   `ProjectGraph` abstraction the passes run against.
//! - **Phases (`phases`)**: Resolution, scan, commit and resequencing.
//! - **Manifest (`manifest`)**: A YAML stand-in for the build tool's session.

pub mod config;
pub mod dependency;
pub mod dependency_set;
pub mod error;
pub mod graph;
pub mod manifest;
pub mod matcher;
pub mod output;
pub mod phases;
pub mod project;
pub mod rule;
pub mod suggestions;

#[cfg(test)]
mod matcher_proptest;
