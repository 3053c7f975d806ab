//! Connected-component analysis over a pruned network
//!
//! Uses petgraph for the undirected adjacency structure and breadth-first
//! traversal. Traversals start from each unvisited system in system-list
//! order; every new start is a new component.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::{Bfs, VisitMap, Visitable};
use serde::{Deserialize, Serialize};

use crate::core::models::{Edge, StellarSystem};

/// Connectivity of a network, computed on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityReport {
    pub connected: bool,
    pub component_count: usize,
}

impl ConnectivityReport {
    pub fn from_component_count(component_count: usize) -> Self {
        Self {
            connected: component_count == 1,
            component_count,
        }
    }
}

/// Undirected graph keyed by system id
struct SystemGraph {
    graph: UnGraph<usize, f64>,
    nodes: HashMap<usize, NodeIndex>,
}

impl SystemGraph {
    fn build(systems: &[StellarSystem], edges: &[Edge]) -> Self {
        let mut graph: UnGraph<usize, f64> = UnGraph::with_capacity(systems.len(), edges.len());
        let mut nodes = HashMap::with_capacity(systems.len());

        for system in systems {
            nodes
                .entry(system.id)
                .or_insert_with(|| graph.add_node(system.id));
        }
        // Endpoints missing from the system list still carry reachability
        for edge in edges {
            let a = *nodes
                .entry(edge.system1_id)
                .or_insert_with(|| graph.add_node(edge.system1_id));
            let b = *nodes
                .entry(edge.system2_id)
                .or_insert_with(|| graph.add_node(edge.system2_id));
            graph.add_edge(a, b, edge.distance);
        }

        Self { graph, nodes }
    }

    /// Ids reached from each traversal start, in traversal order
    fn components(&self, systems: &[StellarSystem]) -> Vec<Vec<usize>> {
        let mut components = Vec::new();
        let mut bfs = Bfs {
            stack: VecDeque::new(),
            discovered: self.graph.visit_map(),
        };

        for system in systems {
            let start = self.nodes[&system.id];
            if bfs.discovered.is_visited(&start) {
                continue;
            }

            bfs.discovered.visit(start);
            bfs.stack.push_back(start);

            let mut members = Vec::new();
            while let Some(node) = bfs.next(&self.graph) {
                members.push(self.graph[node]);
            }
            components.push(members);
        }

        components
    }
}

/// Member ids of every connected component, in discovery order
pub fn connected_components(systems: &[StellarSystem], edges: &[Edge]) -> Vec<Vec<usize>> {
    SystemGraph::build(systems, edges).components(systems)
}

/// Number of connected components
pub fn count_components(systems: &[StellarSystem], edges: &[Edge]) -> usize {
    if systems.is_empty() {
        return 0;
    }
    if systems.len() == 1 || edges.is_empty() {
        return systems.len();
    }
    connected_components(systems, edges).len()
}

/// Whether the systems form exactly one component
pub fn is_connected(systems: &[StellarSystem], edges: &[Edge]) -> bool {
    count_components(systems, edges) == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn systems(n: usize) -> Vec<StellarSystem> {
        (0..n)
            .map(|i| StellarSystem::new(i, format!("S{}", i), Point3::new(i as f64, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn test_empty_network() {
        assert_eq!(count_components(&[], &[]), 0);
        assert!(!is_connected(&[], &[]));
        assert!(connected_components(&[], &[]).is_empty());
    }

    #[test]
    fn test_single_system_is_connected() {
        let s = systems(1);
        assert_eq!(count_components(&s, &[]), 1);
        assert!(is_connected(&s, &[]));
    }

    #[test]
    fn test_no_edges_means_singletons() {
        let s = systems(4);
        assert_eq!(count_components(&s, &[]), 4);
        assert!(!is_connected(&s, &[]));
    }

    #[test]
    fn test_two_systems_within_range() {
        let s = vec![
            StellarSystem::new(0, "a", Point3::new(0.0, 0.0, 0.0)),
            StellarSystem::new(1, "b", Point3::new(5.0, 5.0, 0.0)),
        ];
        let edges = vec![Edge::new(0, 1, 50f64.sqrt())];
        assert_eq!(count_components(&s, &edges), 1);
        assert!(is_connected(&s, &edges));
    }

    #[test]
    fn test_chain_and_isolated() {
        let s = systems(5);
        let edges = vec![Edge::new(0, 1, 1.0), Edge::new(2, 1, 1.0), Edge::new(3, 4, 1.0)];

        assert_eq!(count_components(&s, &edges), 2);
        assert_eq!(
            connected_components(&s, &edges),
            vec![vec![0, 1, 2], vec![3, 4]]
        );
    }

    #[test]
    fn test_components_discovered_in_system_order() {
        let s = systems(6);
        let edges = vec![Edge::new(5, 1, 1.0), Edge::new(4, 0, 1.0)];

        let components = connected_components(&s, &edges);
        assert_eq!(components, vec![vec![0, 4], vec![1, 5], vec![2], vec![3]]);
    }

    #[test]
    fn test_edge_through_unknown_id_still_joins() {
        let s = systems(2);
        let edges = vec![Edge::new(0, 42, 1.0), Edge::new(42, 1, 1.0)];
        assert_eq!(count_components(&s, &edges), 1);
    }

    #[test]
    fn test_report_from_count() {
        assert!(ConnectivityReport::from_component_count(1).connected);
        assert!(!ConnectivityReport::from_component_count(0).connected);
        assert!(!ConnectivityReport::from_component_count(3).connected);
    }
}
