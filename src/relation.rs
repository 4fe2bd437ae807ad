use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use thiserror::Error;

/// The edge store rejected the operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelationError {
    /// The identical edge is already declared.
    #[error("The relation is already declared.")]
    Duplicate,

    /// The edge is not declared.
    #[error("The relation is not declared.")]
    NotFound,
}

/// A set of relation edges over opaque argument identities.
///
/// Two modes, chosen at construction:
/// - *non-cascading*: edges are directed pairs; queries may optionally follow
///   directed reachability (used for requirement/dependency rules).
/// - *cascading*: edges are undirected, and membership queries close over the
///   connected component — declaring `A↔B` and `B↔C` places all three in one
///   group (used for mutual-exclusion rules).
///
/// This component stores edges only; semantic preconditions (irreflexivity,
/// validity of the identities, cross-graph exclusions) belong to the caller.
#[derive(Debug, Clone)]
pub struct RelationGraph<T> {
    cascading: bool,
    edges: Vec<(T, T)>,
}

impl<T> RelationGraph<T>
where
    T: Clone + Eq + Hash,
{
    /// An empty graph in the requested mode.
    pub fn new(cascading: bool) -> Self {
        Self {
            cascading,
            edges: Vec::default(),
        }
    }

    /// Whether queries close over the undirected component.
    pub fn is_cascading(&self) -> bool {
        self.cascading
    }

    /// Declare an edge.
    /// Rejects a duplicate of an identical edge (either orientation when
    /// cascading).
    pub fn add(&mut self, first: T, second: T) -> Result<(), RelationError> {
        if self.contains(&first, &second) {
            return Err(RelationError::Duplicate);
        }

        self.edges.push((first, second));
        Ok(())
    }

    /// Whether the edge is literally declared (either orientation when
    /// cascading).
    pub fn contains(&self, first: &T, second: &T) -> bool {
        self.edges.iter().any(|(a, b)| {
            (a == first && b == second) || (self.cascading && a == second && b == first)
        })
    }

    /// Remove a declared edge.
    pub fn remove(&mut self, first: &T, second: &T) -> Result<(), RelationError> {
        let cascading = self.cascading;
        let index = self
            .edges
            .iter()
            .position(|(a, b)| {
                (a == first && b == second) || (cascading && a == second && b == first)
            })
            .ok_or(RelationError::NotFound)?;
        self.edges.remove(index);
        Ok(())
    }

    /// Remove every edge touching `node`, on either side.
    /// Returns the number of edges removed.
    pub fn remove_all(&mut self, node: &T) -> usize {
        let before = self.edges.len();
        self.edges.retain(|(a, b)| a != node && b != node);
        before - self.edges.len()
    }

    /// Remove every edge.
    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Whether `first` relates to `second`.
    ///
    /// Non-cascading: the directed edge, or — with `transitive` — directed
    /// reachability through intermediate nodes.
    /// Cascading: membership of `second` in the group of `first`; the
    /// `transitive` parameter is irrelevant since the group already closes
    /// over the declared edges.
    pub fn exists(&self, first: &T, second: &T, transitive: bool) -> bool {
        if first == second {
            return false;
        }
        if self.cascading {
            return self.group_relations(first).contains(&second);
        }
        if self.contains(first, second) {
            return true;
        }
        if !transitive {
            return false;
        }

        // Directed breadth-first reachability.
        let mut visited: HashSet<&T> = HashSet::default();
        let mut queue: VecDeque<&T> = VecDeque::from([first]);

        while let Some(node) = queue.pop_front() {
            for (a, b) in &self.edges {
                if a == node && visited.insert(b) {
                    if b == second {
                        return true;
                    }
                    queue.push_back(b);
                }
            }
        }

        false
    }

    /// The nodes directly related to `node` by a declared edge:
    /// its targets for a non-cascading graph, its neighbors on either side
    /// for a cascading graph.
    pub fn direct_relations(&self, node: &T) -> Vec<&T> {
        let mut result = Vec::default();

        for (a, b) in &self.edges {
            if a == node {
                result.push(b);
            } else if self.cascading && b == node {
                result.push(a);
            }
        }

        result
    }

    /// The sources of edges pointing at `node` (the "dependents" side of a
    /// directed graph).
    pub fn incoming_relations(&self, node: &T) -> Vec<&T> {
        self.edges
            .iter()
            .filter(|(_, b)| b == node)
            .map(|(a, _)| a)
            .collect()
    }

    /// Every node reachable from `node` through the undirected closure of the
    /// declared edges — the full group containing `node`, excluding `node`
    /// itself.
    pub fn group_relations(&self, node: &T) -> Vec<&T> {
        let mut visited: HashSet<&T> = HashSet::from([node]);
        let mut result = Vec::default();
        let mut queue: VecDeque<&T> = VecDeque::from([node]);

        while let Some(current) = queue.pop_front() {
            for (a, b) in &self.edges {
                let neighbor = if a == current {
                    b
                } else if b == current {
                    a
                } else {
                    continue;
                };

                if visited.insert(neighbor) {
                    result.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        result
    }

    /// Whether any declared edge leaves `node` (or touches it, when
    /// cascading).
    pub fn has_relations(&self, node: &T) -> bool {
        self.edges
            .iter()
            .any(|(a, b)| a == node || (self.cascading && b == node))
    }

    /// Whether any declared edge points at `node`.
    pub fn has_incoming(&self, node: &T) -> bool {
        self.edges.iter().any(|(_, b)| b == node)
    }

    /// Every declared edge as a `(first, second)` pair — the literal edges,
    /// not the closure.
    pub fn all_pairs(&self) -> impl Iterator<Item = &(T, T)> {
        self.edges.iter()
    }

    /// The number of declared edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether no edge is declared.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
