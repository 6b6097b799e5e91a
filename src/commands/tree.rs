//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the projects
//! of a reactor with the projects depending on them.
//!
//! ## Functionality
//!
//! - **Dependents Visualization**: Each root project (one without upstream
//!   projects) is shown with its direct dependents, recursively.
//! - **Depth Control**: Supports `--depth` flag to limit tree depth
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::path::PathBuf;

use dependency_duplicator::graph::ProjectGraph;
use dependency_duplicator::manifest;
use dependency_duplicator::project::ProjectId;
use dependency_duplicator::suggestions;

/// Display the projects of a reactor and their dependents
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Path to the reactor manifest.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "DEPENDENCY_DUPLICATOR_MANIFEST",
        default_value = "reactor.yaml"
    )]
    pub manifest: PathBuf,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the root projects, 1 to show direct dependents, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<()> {
    let manifest_path = &args.manifest;
    if !manifest_path.exists() {
        return Err(suggestions::manifest_not_found(manifest_path));
    }

    println!("🌳 Project tree for: {}", manifest_path.display());

    let reactor = manifest::from_file(manifest_path)
        .and_then(|m| m.into_reactor())
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load manifest from {}: {}",
                manifest_path.display(),
                e
            )
        })?;

    let max_depth = args.depth.unwrap_or(usize::MAX);
    for root in build_forest(reactor.graph(), max_depth) {
        print_tree(&root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;
    }

    Ok(())
}

/// Builds one tree per root project, in build order.
fn build_forest(graph: &dyn ProjectGraph, max_depth: usize) -> Vec<TreeNode> {
    graph
        .sorted_projects()
        .into_iter()
        .filter(|id| graph.upstream_projects(id, false).is_empty())
        .map(|id| build_tree_node(graph, &id, max_depth, 0))
        .collect()
}

fn build_tree_node(
    graph: &dyn ProjectGraph,
    id: &ProjectId,
    max_depth: usize,
    current_depth: usize,
) -> TreeNode {
    let label = id.to_string();
    let dependents = graph.downstream_projects(id, false);

    if current_depth >= max_depth || dependents.is_empty() {
        TreeNode {
            label,
            children: vec![],
        }
    } else {
        let children = dependents
            .iter()
            .map(|child| build_tree_node(graph, child, max_depth, current_depth + 1))
            .collect();
        TreeNode { label, children }
    }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
