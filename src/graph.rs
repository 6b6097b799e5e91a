//! # Project Graph
//!
//! The build graph over the reactor's projects. An edge `P -> Q` means "P
//! depends on Q": Q is upstream of P and P is downstream of Q.
//!
//! ## Key Components
//!
//! - **`ProjectSorter`**: derives the edges from the projects' declarations,
//!   rejects duplicate identities and cycles, and computes a stable
//!   topological order (upstream before downstream, enumeration order among
//!   projects that are ready at the same time). Uses petgraph.
//!
//! - **`ProjectGraph`**: the abstraction the propagation phases work against.
//!   It enumerates projects, answers upstream/downstream queries from its
//!   current sorter and accepts a rebuilt sorter. Implementations that cannot
//!   accept one keep the default `replace_sorter`, which fails with
//!   [`Error::GraphShape`] instead of silently ignoring the request.
//!
//! - **`ReactorGraph`**: the concrete graph owning the projects.
//!
//! - **`FilteredGraph`**: a view restricting ordering queries to a subset of
//!   projects, as in a partial build. It enumerates every project of the
//!   underlying graph and forwards rebuilds to it.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, Reversed};
use petgraph::Direction;

use crate::error::{Error, Result};
use crate::project::{Project, ProjectId};

/// Ordering and query structure computed from a set of projects.
#[derive(Debug, Clone)]
pub struct ProjectSorter {
    /// Edges point from upstream to downstream.
    graph: DiGraph<ProjectId, ()>,
    node_map: HashMap<ProjectId, NodeIndex>,
    sorted: Vec<ProjectId>,
    positions: HashMap<NodeIndex, usize>,
}

impl ProjectSorter {
    /// Builds the sorter for `projects`, in enumeration order.
    pub fn new(projects: &[Project]) -> Result<Self> {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for project in projects {
            if node_map.contains_key(&project.id) {
                return Err(Error::DuplicateProject {
                    id: project.id.to_string(),
                });
            }
            let idx = graph.add_node(project.id.clone());
            node_map.insert(project.id.clone(), idx);
        }

        let mut by_coordinates: HashMap<(&str, &str), Vec<&ProjectId>> = HashMap::new();
        for project in projects {
            by_coordinates
                .entry((project.id.group.as_str(), project.id.artifact.as_str()))
                .or_default()
                .push(&project.id);
        }

        for project in projects {
            let Some(&downstream) = node_map.get(&project.id) else {
                continue;
            };

            let mut upstream_ids: Vec<&ProjectId> = project.parent.iter().collect();
            for dependency in &project.dependencies {
                if let Some(candidates) =
                    by_coordinates.get(&(dependency.group(), dependency.artifact()))
                {
                    upstream_ids.extend(
                        candidates
                            .iter()
                            .copied()
                            .filter(|id| id.is_referenced_by(dependency)),
                    );
                }
            }

            for upstream_id in upstream_ids {
                if upstream_id == &project.id {
                    continue;
                }
                if let Some(&upstream) = node_map.get(upstream_id) {
                    graph.update_edge(upstream, downstream, ());
                }
            }
        }

        let order = stable_toposort(&graph)?;
        let positions = order.iter().enumerate().map(|(pos, idx)| (*idx, pos)).collect();
        let sorted = order
            .iter()
            .filter_map(|idx| graph.node_weight(*idx).cloned())
            .collect();

        Ok(Self {
            graph,
            node_map,
            sorted,
            positions,
        })
    }

    /// All projects, upstream before downstream.
    pub fn sorted_projects(&self) -> &[ProjectId] {
        &self.sorted
    }

    pub fn contains(&self, id: &ProjectId) -> bool {
        self.node_map.contains_key(id)
    }

    /// Projects depending on `id`, in sorted order.
    pub fn downstream(&self, id: &ProjectId, transitive: bool) -> Vec<ProjectId> {
        let Some(&start) = self.node_map.get(id) else {
            return Vec::new();
        };
        let found = if transitive {
            let mut dfs = Dfs::new(&self.graph, start);
            let mut found = Vec::new();
            while let Some(node) = dfs.next(&self.graph) {
                if node != start {
                    found.push(node);
                }
            }
            found
        } else {
            self.graph
                .neighbors_directed(start, Direction::Outgoing)
                .collect()
        };
        self.in_sorted_order(found)
    }

    /// Projects `id` depends on, in sorted order.
    pub fn upstream(&self, id: &ProjectId, transitive: bool) -> Vec<ProjectId> {
        let Some(&start) = self.node_map.get(id) else {
            return Vec::new();
        };
        let found = if transitive {
            let reversed = Reversed(&self.graph);
            let mut dfs = Dfs::new(reversed, start);
            let mut found = Vec::new();
            while let Some(node) = dfs.next(reversed) {
                if node != start {
                    found.push(node);
                }
            }
            found
        } else {
            self.graph
                .neighbors_directed(start, Direction::Incoming)
                .collect()
        };
        self.in_sorted_order(found)
    }

    fn in_sorted_order(&self, mut nodes: Vec<NodeIndex>) -> Vec<ProjectId> {
        nodes.sort_by_key(|idx| self.positions.get(idx).copied().unwrap_or(usize::MAX));
        nodes.dedup();
        nodes
            .into_iter()
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect()
    }
}

/// Kahn's algorithm, picking the lowest node index among ready nodes.
fn stable_toposort(graph: &DiGraph<ProjectId, ()>) -> Result<Vec<NodeIndex>> {
    let mut in_degree: HashMap<NodeIndex, usize> = graph
        .node_indices()
        .map(|idx| (idx, graph.neighbors_directed(idx, Direction::Incoming).count()))
        .collect();

    let mut ready: BinaryHeap<Reverse<NodeIndex>> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(idx, _)| Reverse(*idx))
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(Reverse(node)) = ready.pop() {
        order.push(node);
        for next in graph.neighbors_directed(node, Direction::Outgoing) {
            if let Some(degree) = in_degree.get_mut(&next) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(Reverse(next));
                }
            }
        }
    }

    if order.len() < graph.node_count() {
        return Err(Error::CycleDetected {
            cycle: describe_cycle(graph),
        });
    }
    Ok(order)
}

/// Formats one cycle as `a -> b -> a`, where `->` reads "depends on".
fn describe_cycle(graph: &DiGraph<ProjectId, ()>) -> String {
    let Some(component) = tarjan_scc(graph).into_iter().find(|c| c.len() > 1) else {
        return "unknown".to_string();
    };
    cycle_path(graph, &component)
        .iter()
        .filter_map(|idx| graph.node_weight(*idx).map(ToString::to_string))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Shortest walk from the component's first node back to itself, following
/// "depends on" (incoming) edges.
fn cycle_path(graph: &DiGraph<ProjectId, ()>, component: &[NodeIndex]) -> Vec<NodeIndex> {
    let members: HashSet<NodeIndex> = component.iter().copied().collect();
    let Some(&start) = component.iter().min() else {
        return Vec::new();
    };

    let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        for next in graph.neighbors_directed(node, Direction::Incoming) {
            if !members.contains(&next) {
                continue;
            }
            if next == start {
                let mut path = vec![node];
                let mut cursor = node;
                while let Some(&prev) = previous.get(&cursor) {
                    path.push(prev);
                    cursor = prev;
                }
                path.reverse();
                path.push(start);
                return path;
            }
            if !previous.contains_key(&next) {
                previous.insert(next, node);
                queue.push_back(next);
            }
        }
    }
    component.to_vec()
}

/// The build graph as seen by the propagation phases.
pub trait ProjectGraph {
    /// Short name of the implementation, used in diagnostics.
    fn kind(&self) -> &str;

    /// Every project of the reactor, in stable enumeration order.
    fn all_projects(&self) -> &[Project];

    fn project_mut(&mut self, id: &ProjectId) -> Option<&mut Project>;

    /// Projects in build order.
    fn sorted_projects(&self) -> Vec<ProjectId>;

    fn downstream_projects(&self, id: &ProjectId, transitive: bool) -> Vec<ProjectId>;

    fn upstream_projects(&self, id: &ProjectId, transitive: bool) -> Vec<ProjectId>;

    /// Swaps in a rebuilt ordering.
    fn replace_sorter(&mut self, _sorter: ProjectSorter) -> Result<()> {
        Err(Error::GraphShape {
            graph: self.kind().to_string(),
            message: "this graph does not support rebuilding its ordering".to_string(),
        })
    }

    fn contains(&self, id: &ProjectId) -> bool {
        self.all_projects().iter().any(|p| &p.id == id)
    }
}

impl<G: ProjectGraph + ?Sized> ProjectGraph for Box<G> {
    fn kind(&self) -> &str {
        (**self).kind()
    }

    fn all_projects(&self) -> &[Project] {
        (**self).all_projects()
    }

    fn project_mut(&mut self, id: &ProjectId) -> Option<&mut Project> {
        (**self).project_mut(id)
    }

    fn sorted_projects(&self) -> Vec<ProjectId> {
        (**self).sorted_projects()
    }

    fn downstream_projects(&self, id: &ProjectId, transitive: bool) -> Vec<ProjectId> {
        (**self).downstream_projects(id, transitive)
    }

    fn upstream_projects(&self, id: &ProjectId, transitive: bool) -> Vec<ProjectId> {
        (**self).upstream_projects(id, transitive)
    }

    fn replace_sorter(&mut self, sorter: ProjectSorter) -> Result<()> {
        (**self).replace_sorter(sorter)
    }

    fn contains(&self, id: &ProjectId) -> bool {
        (**self).contains(id)
    }
}

/// The full reactor.
#[derive(Debug, Clone)]
pub struct ReactorGraph {
    projects: Vec<Project>,
    sorter: ProjectSorter,
}

impl ReactorGraph {
    pub fn new(projects: Vec<Project>) -> Result<Self> {
        let sorter = ProjectSorter::new(&projects)?;
        Ok(Self { projects, sorter })
    }

    pub fn sorter(&self) -> &ProjectSorter {
        &self.sorter
    }

    pub fn into_projects(self) -> Vec<Project> {
        self.projects
    }
}

impl ProjectGraph for ReactorGraph {
    fn kind(&self) -> &str {
        "reactor"
    }

    fn all_projects(&self) -> &[Project] {
        &self.projects
    }

    fn project_mut(&mut self, id: &ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| &p.id == id)
    }

    fn sorted_projects(&self) -> Vec<ProjectId> {
        self.sorter.sorted_projects().to_vec()
    }

    fn downstream_projects(&self, id: &ProjectId, transitive: bool) -> Vec<ProjectId> {
        self.sorter.downstream(id, transitive)
    }

    fn upstream_projects(&self, id: &ProjectId, transitive: bool) -> Vec<ProjectId> {
        self.sorter.upstream(id, transitive)
    }

    fn replace_sorter(&mut self, sorter: ProjectSorter) -> Result<()> {
        if let Some(missing) = self.projects.iter().find(|p| !sorter.contains(&p.id)) {
            return Err(Error::GraphShape {
                graph: self.kind().to_string(),
                message: format!("rebuilt ordering does not contain {}", missing.id),
            });
        }
        self.sorter = sorter;
        Ok(())
    }
}

/// A view of `G` restricted to the selected projects.
#[derive(Debug, Clone)]
pub struct FilteredGraph<G> {
    inner: G,
    selected: HashSet<ProjectId>,
}

impl<G: ProjectGraph> FilteredGraph<G> {
    pub fn new(inner: G, selected: impl IntoIterator<Item = ProjectId>) -> Result<Self> {
        let selected: HashSet<ProjectId> = selected.into_iter().collect();
        if let Some(missing) = selected.iter().find(|id| !inner.contains(id)) {
            return Err(Error::ProjectNotFound {
                id: missing.to_string(),
            });
        }
        Ok(Self { inner, selected })
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }

    fn keep_selected(&self, ids: Vec<ProjectId>) -> Vec<ProjectId> {
        ids.into_iter().filter(|id| self.selected.contains(id)).collect()
    }
}

impl<G: ProjectGraph> ProjectGraph for FilteredGraph<G> {
    fn kind(&self) -> &str {
        "filtered"
    }

    fn all_projects(&self) -> &[Project] {
        self.inner.all_projects()
    }

    fn project_mut(&mut self, id: &ProjectId) -> Option<&mut Project> {
        self.inner.project_mut(id)
    }

    fn sorted_projects(&self) -> Vec<ProjectId> {
        self.keep_selected(self.inner.sorted_projects())
    }

    fn downstream_projects(&self, id: &ProjectId, transitive: bool) -> Vec<ProjectId> {
        self.keep_selected(self.inner.downstream_projects(id, transitive))
    }

    fn upstream_projects(&self, id: &ProjectId, transitive: bool) -> Vec<ProjectId> {
        self.keep_selected(self.inner.upstream_projects(id, transitive))
    }

    fn replace_sorter(&mut self, sorter: ProjectSorter) -> Result<()> {
        self.inner.replace_sorter(sorter)
    }
}
