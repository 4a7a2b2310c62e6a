//! City adjacency graph
//!
//! Edges are stored in both directions, so adjacency is symmetric by
//! construction. Self-loops are rejected.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::core::types::CityId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityGraph {
    edges: BTreeMap<CityId, BTreeSet<CityId>>,
}

impl CityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a city with no neighbors yet
    pub fn add_city(&mut self, city: CityId) {
        self.edges.entry(city).or_default();
    }

    /// Connect two cities. Returns false for a self-loop.
    pub fn add_edge(&mut self, a: CityId, b: CityId) -> bool {
        if a == b {
            return false;
        }
        self.edges.entry(a).or_default().insert(b);
        self.edges.entry(b).or_default().insert(a);
        true
    }

    pub fn are_adjacent(&self, a: CityId, b: CityId) -> bool {
        self.edges.get(&a).is_some_and(|n| n.contains(&b))
    }

    /// Neighbors of a city in ascending id order
    pub fn neighbors(&self, city: CityId) -> impl Iterator<Item = CityId> + '_ {
        self.edges.get(&city).into_iter().flat_map(|n| n.iter().copied())
    }

    pub fn cities(&self) -> impl Iterator<Item = CityId> + '_ {
        self.edges.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn is_symmetric(&self) -> bool {
        self.edges
            .iter()
            .all(|(a, ns)| ns.iter().all(|b| self.are_adjacent(*b, *a)))
    }

    pub fn has_self_loops(&self) -> bool {
        self.edges.iter().any(|(a, ns)| ns.contains(a))
    }

    /// True when every city can reach every other city
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.edges.keys().next().copied() else {
            return true;
        };

        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(city) = queue.pop_front() {
            for next in self.neighbors(city) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        seen.len() == self.edges.len()
    }
}
