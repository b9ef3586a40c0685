//! Mention graph construction module

use crate::data::mentions::extract_mentions;
use crate::data::{AccountId, Post};
use crate::graph::compressed::NodeMetadata;
use crate::graph::CompressedGraph;
use std::collections::{HashMap, HashSet};

/// Builder for incrementally constructing an undirected mention graph
///
/// Nodes keep their insertion order. Repeated edges are ignored and
/// self-mentions never produce an edge.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Number of nodes
    node_count: usize,

    /// Mapping from account identities to node indices
    id_to_index: HashMap<AccountId, u32>,

    /// Node identities in insertion order
    node_ids: Vec<AccountId>,

    /// Adjacency lists for each node
    adjacency_lists: Vec<Vec<u32>>,

    /// Edges already present, as (lower, higher) index pairs
    edge_set: HashSet<(u32, u32)>,

    /// Posts written per node
    posts_authored: Vec<u32>,

    /// Mentions received per node
    times_mentioned: Vec<u32>,

    /// Self-mentions that were dropped
    rejected_self_mentions: usize,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            node_count: 0,
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
            edge_set: HashSet::with_capacity(capacity),
            posts_authored: Vec::with_capacity(capacity),
            times_mentioned: Vec::with_capacity(capacity),
            rejected_self_mentions: 0,
        }
    }

    /// Get or create the node index for an account
    pub fn get_or_create_node(&mut self, id: &AccountId) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        // Create a new node
        let idx = self.node_count as u32;
        self.id_to_index.insert(id.clone(), idx);
        self.node_ids.push(id.clone());
        self.adjacency_lists.push(Vec::new());
        self.posts_authored.push(0);
        self.times_mentioned.push(0);
        self.node_count += 1;

        idx
    }

    /// Add an undirected edge between two accounts
    ///
    /// Both accounts are registered as nodes. Returns `false` when the edge
    /// already existed or would be a self-loop.
    pub fn add_edge(&mut self, a: &AccountId, b: &AccountId) -> bool {
        let a_idx = self.get_or_create_node(a);
        let b_idx = self.get_or_create_node(b);

        if a_idx == b_idx {
            self.rejected_self_mentions += 1;
            log::debug!("Ignoring self-mention by {}", a);
            return false;
        }

        let key = (a_idx.min(b_idx), a_idx.max(b_idx));
        if !self.edge_set.insert(key) {
            return false;
        }

        self.adjacency_lists[a_idx as usize].push(b_idx);
        self.adjacency_lists[b_idx as usize].push(a_idx);

        true
    }

    /// Record one post: its author and every account it references
    pub fn add_post(&mut self, author: &AccountId, references: &[AccountId]) {
        let author_idx = self.get_or_create_node(author);
        self.posts_authored[author_idx as usize] += 1;

        for reference in references {
            self.add_edge(author, reference);
            let ref_idx = self.id_to_index[reference];
            self.times_mentioned[ref_idx as usize] += 1;
        }
    }

    /// Feed a sequence of posts through mention extraction, in order
    pub fn ingest<'a, I>(&mut self, posts: I)
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let mut post_count = 0usize;
        for post in posts {
            let (author, references) = extract_mentions(post);
            self.add_post(&author, &references);
            post_count += 1;
        }

        log::info!(
            "Ingested {} posts into {} nodes and {} edges",
            post_count,
            self.node_count,
            self.edge_set.len()
        );
        if self.rejected_self_mentions > 0 {
            log::info!("Dropped {} self-mentions", self.rejected_self_mentions);
        }
    }

    /// Number of nodes so far
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of distinct undirected edges so far
    pub fn edge_count(&self) -> usize {
        self.edge_set.len()
    }

    /// Number of self-mentions that produced no edge
    pub fn rejected_self_mentions(&self) -> usize {
        self.rejected_self_mentions
    }

    /// Build the compressed graph
    pub fn build(mut self) -> CompressedGraph {
        // Count total adjacency entries (two per edge)
        let entry_count: usize = self.adjacency_lists.iter()
            .map(|list| list.len())
            .sum();

        // Create offsets array
        let mut offsets = Vec::with_capacity(self.node_count + 1);
        offsets.push(0);

        let mut offset = 0;
        for list in &self.adjacency_lists {
            offset += list.len() as u32;
            offsets.push(offset);
        }

        // Create edges array
        let mut edges = Vec::with_capacity(entry_count);
        for list in &mut self.adjacency_lists {
            // Sort for binary search efficiency
            list.sort_unstable();
            edges.extend_from_slice(list);
        }

        let metadata = NodeMetadata {
            posts_authored: self.posts_authored,
            times_mentioned: self.times_mentioned,
        };

        CompressedGraph {
            node_count: self.node_count,
            offsets,
            edges,
            node_ids: self.node_ids,
            metadata: Some(metadata),
        }
    }
}

/// Build the mention graph for a whole post sequence
pub fn build_mention_graph(posts: &[Post]) -> CompressedGraph {
    let mut builder = GraphBuilder::with_capacity(posts.len());
    builder.ingest(posts);
    builder.build()
}
