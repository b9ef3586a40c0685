//! Connected component detection and dominant component selection

use std::collections::HashMap;
use crate::cluster::{Cluster, Component};
use crate::data::preprocessing::extract_subgraph;
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::CompressedGraph;

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set (for union by size)
    rank: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            rank: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        // Path compression: point everything on the way at the root
        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return; // Already in the same set
        }

        // Attach smaller tree under root of larger tree
        let rank_x = self.rank[root_x as usize];
        let rank_y = self.rank[root_y as usize];

        if rank_x > rank_y {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += rank_y;
        } else {
            self.parent[root_x as usize] = root_y;
            self.rank[root_y as usize] += rank_x;
        }
    }

    /// Get the size of the set containing x
    pub fn size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.rank[root as usize]
    }
}

/// Partition the graph's nodes into connected components
///
/// Components are ordered by their first member in insertion order and
/// list their members in insertion order.
pub fn label_components(graph: &CompressedGraph) -> Vec<Vec<u32>> {
    let node_count = graph.node_count;
    let mut sets = DisjointSets::new(node_count);

    for (src, dst) in graph.undirected_edges() {
        sets.union(src, dst);
    }

    let mut root_to_component: HashMap<u32, usize> = HashMap::new();
    let mut components: Vec<Vec<u32>> = Vec::new();

    for node in 0..node_count as u32 {
        let root = sets.find(node);
        let slot = *root_to_component.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(node);
    }

    components
}

/// List every connected component, largest first
///
/// Equal sizes keep discovery order.
pub fn find_connected_components(graph: &CompressedGraph) -> Vec<Cluster> {
    log::info!("Finding connected components over {} nodes", graph.node_count);

    let mut clusters: Vec<Cluster> = label_components(graph)
        .into_iter()
        .enumerate()
        .map(|(id, members)| Cluster {
            id: id as u32,
            size: members.len(),
            members,
        })
        .collect();

    // Stable sort so ties stay in discovery order
    clusters.sort_by(|a, b| b.size.cmp(&a.size));

    log::info!("Found {} connected components", clusters.len());

    clusters
}

/// Select the component with the most nodes and extract its subgraph
///
/// Ties go to the component discovered first.
pub fn select_dominant_component(graph: &CompressedGraph) -> AnalysisResult<Component> {
    if graph.is_empty() {
        return Err(AnalysisError::EmptyGraph);
    }

    let mut dominant: Option<Vec<u32>> = None;
    for members in label_components(graph) {
        let larger = dominant
            .as_ref()
            .map_or(true, |best| members.len() > best.len());
        if larger {
            dominant = Some(members);
        }
    }

    let members = dominant.ok_or(AnalysisError::EmptyGraph)?;
    let subgraph = extract_subgraph(graph, &members);

    log::info!(
        "Selected dominant component with {} of {} nodes and {} edges",
        subgraph.node_count,
        graph.node_count,
        subgraph.edge_count()
    );

    Ok(Component::new(members, subgraph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AccountId;
    use crate::graph::builder::GraphBuilder;
    use proptest::prelude::*;

    fn graph_from(nodes: &[&str], edges: &[(&str, &str)]) -> CompressedGraph {
        let mut builder = GraphBuilder::default();
        for node in nodes {
            builder.get_or_create_node(&AccountId::from(*node));
        }
        for (a, b) in edges {
            builder.add_edge(&AccountId::from(*a), &AccountId::from(*b));
        }
        builder.build()
    }

    #[test]
    fn union_find_tracks_set_sizes() {
        let mut sets = DisjointSets::new(5);
        sets.union(0, 1);
        sets.union(3, 4);
        sets.union(1, 4);

        assert_eq!(sets.size(0), 4);
        assert_eq!(sets.size(2), 1);
        assert_eq!(sets.find(0), sets.find(3));
        assert_ne!(sets.find(0), sets.find(2));
    }

    #[test]
    fn picks_the_largest_of_five_three_one() {
        let graph = graph_from(
            &["x1", "y1", "y2", "y3", "z1", "z2", "z3", "z4", "z5"],
            &[
                ("y1", "y2"),
                ("y2", "y3"),
                ("z1", "z2"),
                ("z2", "z3"),
                ("z3", "z4"),
                ("z4", "z5"),
            ],
        );

        let component = select_dominant_component(&graph).unwrap();
        assert_eq!(component.node_count(), 5);
        assert_eq!(component.edge_count(), 4);
        for id in ["z1", "z2", "z3", "z4", "z5"] {
            assert!(component.contains(&AccountId::from(id)));
        }
        assert!(!component.contains(&AccountId::from("y1")));
        assert!(!component.contains(&AccountId::from("x1")));
    }

    #[test]
    fn ties_go_to_the_first_discovered_component() {
        let graph = graph_from(&[], &[("a", "b"), ("c", "d")]);
        let component = select_dominant_component(&graph).unwrap();
        assert_eq!(component.node_ids(), &[AccountId::from("a"), AccountId::from("b")]);
        assert_eq!(component.members(), &[0, 1]);
    }

    #[test]
    fn empty_graph_is_an_error() {
        let graph = GraphBuilder::default().build();
        assert_eq!(
            select_dominant_component(&graph).unwrap_err(),
            AnalysisError::EmptyGraph
        );
    }

    #[test]
    fn lists_components_largest_first() {
        let graph = graph_from(&["solo"], &[("a", "b"), ("c", "d"), ("d", "e")]);
        let clusters = find_connected_components(&graph);

        let sizes: Vec<usize> = clusters.iter().map(|c| c.size).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
        assert_eq!(clusters[1].id, 1);
        assert_eq!(clusters[2].members, vec![0]);
    }

    proptest! {
        #[test]
        fn component_count_matches_petgraph(
            edges in proptest::collection::vec((0u8..30, 0u8..30), 0..60)
        ) {
            let mut builder = GraphBuilder::default();
            for node in 0..30u64 {
                builder.get_or_create_node(&AccountId::from(node));
            }
            for (a, b) in &edges {
                builder.add_edge(&AccountId::from(u64::from(*a)), &AccountId::from(u64::from(*b)));
            }
            let graph = builder.build();

            let expected = petgraph::algo::connected_components(&graph.to_petgraph());
            prop_assert_eq!(label_components(&graph).len(), expected);

            let largest = label_components(&graph).iter().map(Vec::len).max().unwrap_or(0);
            let dominant = select_dominant_component(&graph).unwrap();
            prop_assert_eq!(dominant.node_count(), largest);
        }
    }
}
