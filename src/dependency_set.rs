//! An insertion-ordered set of dependencies.
//!
//! Elements are compared with deep equality (see [`Dependency`]), so two
//! declarations that differ only in scope are both kept.

use indexmap::IndexSet;

use crate::dependency::Dependency;

#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    dependencies: IndexSet<Dependency>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `dependency` unless an equal one is already present.
    ///
    /// Returns `true` if the dependency was inserted.
    pub fn add(&mut self, dependency: Dependency) -> bool {
        self.dependencies.insert(dependency)
    }

    pub fn add_all(&mut self, dependencies: impl IntoIterator<Item = Dependency>) {
        self.dependencies.extend(dependencies);
    }

    pub fn contains(&self, dependency: &Dependency) -> bool {
        self.dependencies.contains(dependency)
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Dependency> {
        self.dependencies.iter()
    }

    /// The element at `index` in first-insertion order.
    pub fn get(&self, index: usize) -> Option<&Dependency> {
        self.dependencies.get_index(index)
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a Dependency;
    type IntoIter = indexmap::set::Iter<'a, Dependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Dependency> for DependencySet {
    fn from_iter<I: IntoIterator<Item = Dependency>>(iter: I) -> Self {
        Self {
            dependencies: iter.into_iter().collect(),
        }
    }
}
