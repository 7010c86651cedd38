//! The rewrite graph: positioned nodes joined by directed, length-constrained edges.
//!
//! Iteration over nodes and edges is insertion order. Template matching maps its
//! In/Out records onto a target's incoming/outgoing edges in that order, so the
//! order is part of the contract, not an implementation detail.
//!
//! Misuse of the mutation API (connecting an already-connected pair, removing a
//! node that still has edges, touching a node that is not in the graph) panics:
//! those are programming errors in a stepper, never search outcomes.

use std::hash::{Hash, Hasher};

use slotmap::{SlotMap, new_key_type};
use xxhash_rust::xxh3::Xxh3;

use crate::geometry::{BoundingBox, XY};

new_key_type! {
    pub struct NodeId;
}

pub const DEFAULT_EDGE_COLOUR: u32 = 0xff4b_4b4b;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub name: String,
    pub codes: String,
    /// Which template (or subsystem) created the node.
    pub template: String,
    pub pos: XY,
    pub radius: f64,
    incoming: Vec<NodeId>,
    outgoing: Vec<NodeId>,
}

impl Node {
    /// Start nodes of incoming edges, in connection order.
    pub fn in_neighbours(&self) -> &[NodeId] {
        &self.incoming
    }

    /// End nodes of outgoing edges, in connection order.
    pub fn out_neighbours(&self) -> &[NodeId] {
        &self.outgoing
    }

    pub fn degree(&self) -> usize {
        self.incoming.len() + self.outgoing.len()
    }
}

/// Directed connector between two nodes.
///
/// Equality and hashing look only at the endpoints: the graph never holds two
/// edges between the same pair of nodes, so lengths and width are not identity.
#[derive(Clone, Copy, Debug)]
pub struct DirectedEdge {
    pub start: NodeId,
    pub end: NodeId,
    pub min_length: f64,
    pub max_length: f64,
    pub half_width: f64,
    pub colour: u32,
}

impl DirectedEdge {
    pub fn connects(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }

    pub fn other_node(&self, node: NodeId) -> Option<NodeId> {
        if node == self.start {
            Some(self.end)
        } else if node == self.end {
            Some(self.start)
        } else {
            None
        }
    }

    pub fn shares_endpoint_with(&self, other: &DirectedEdge) -> bool {
        self.connects(other.start) || self.connects(other.end)
    }

    fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }
}

impl PartialEq for DirectedEdge {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Eq for DirectedEdge {}

impl Hash for DirectedEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

/// Two edges keyed without regard to order, plus where they intersect.
///
/// `t1`/`t2` are the fractions along `e1`/`e2` and take no part in equality.
#[derive(Clone, Copy, Debug)]
pub struct EdgePair {
    pub e1: DirectedEdge,
    pub e2: DirectedEdge,
    pub t1: f64,
    pub t2: f64,
}

impl EdgePair {
    pub fn new(e1: DirectedEdge, e2: DirectedEdge) -> Self {
        Self { e1, e2, t1: 0.0, t2: 0.0 }
    }

    pub fn with_intersection(e1: DirectedEdge, e2: DirectedEdge, t1: f64, t2: f64) -> Self {
        Self { e1, e2, t1, t2 }
    }

    fn ordered_keys(&self) -> [(NodeId, NodeId); 2] {
        let a = (self.e1.start, self.e1.end);
        let b = (self.e2.start, self.e2.end);
        if a <= b { [a, b] } else { [b, a] }
    }
}

impl PartialEq for EdgePair {
    fn eq(&self, other: &Self) -> bool {
        (self.e1 == other.e1 && self.e2 == other.e2) || (self.e1 == other.e2 && self.e2 == other.e1)
    }
}

impl Eq for EdgePair {}

impl Hash for EdgePair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered_keys().hash(state);
    }
}

#[derive(Clone, Debug, Default)]
struct GraphState {
    nodes: SlotMap<NodeId, Node>,
    node_order: Vec<NodeId>,
    edges: Vec<DirectedEdge>,
}

/// Owned copy of a graph's full state, taken by [`Graph::create_restore_point`].
///
/// Handing it back to [`Graph::restore`] consumes it; restore points are
/// independent of one another and of later mutation.
#[derive(Clone, Debug)]
pub struct RestorePoint {
    state: GraphState,
}

impl RestorePoint {
    pub fn num_nodes(&self) -> usize {
        self.state.node_order.len()
    }

    pub fn num_edges(&self) -> usize {
        self.state.edges.len()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    state: GraphState,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: &str, codes: &str, template: &str, radius: f64) -> NodeId {
        let id = self.state.nodes.insert(Node {
            name: name.to_string(),
            codes: codes.to_string(),
            template: template.to_string(),
            pos: XY::ZERO,
            radius,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        });
        self.state.node_order.push(id);
        id
    }

    /// Panics if `node` still has edges or is not in the graph.
    pub fn remove_node(&mut self, node: NodeId) {
        let Some(removed) = self.state.nodes.get(node) else {
            panic!("remove_node: {node:?} is not in the graph");
        };
        assert!(
            removed.degree() == 0,
            "remove_node: {node:?} ('{}') still has {} edge(s); disconnect first",
            removed.name,
            removed.degree()
        );
        self.state.nodes.remove(node);
        self.state.node_order.retain(|&id| id != node);
    }

    /// Panics when `start == end`, when either node is missing, or when the
    /// unordered pair is already connected.
    pub fn connect(
        &mut self,
        start: NodeId,
        end: NodeId,
        min_length: f64,
        max_length: f64,
        half_width: f64,
    ) -> DirectedEdge {
        assert!(start != end, "connect: cannot connect {start:?} to itself");
        assert!(self.contains(start), "connect: start {start:?} is not in the graph");
        assert!(self.contains(end), "connect: end {end:?} is not in the graph");
        assert!(
            self.edge_between(start, end).is_none(),
            "connect: {start:?} and {end:?} are already connected"
        );

        let edge = DirectedEdge {
            start,
            end,
            min_length,
            max_length,
            half_width,
            colour: DEFAULT_EDGE_COLOUR,
        };
        self.state.edges.push(edge);
        self.state.nodes[start].outgoing.push(end);
        self.state.nodes[end].incoming.push(start);
        edge
    }

    /// Removes the edge joining `a` and `b` in whichever direction it runs.
    ///
    /// Panics if there is no such edge.
    pub fn disconnect(&mut self, a: NodeId, b: NodeId) {
        let Some(index) = self.state.edges.iter().position(|e| e.joins(a, b)) else {
            panic!("disconnect: no edge between {a:?} and {b:?}");
        };
        let edge = self.state.edges.remove(index);
        self.state.nodes[edge.start].outgoing.retain(|&id| id != edge.end);
        self.state.nodes[edge.end].incoming.retain(|&id| id != edge.start);
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.state.nodes.contains_key(node)
    }

    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.state.nodes.get(node)
    }

    /// Panics if `node` is not in the graph.
    pub fn pos(&self, node: NodeId) -> XY {
        self.state.nodes[node].pos
    }

    /// Panics if `node` is not in the graph.
    pub fn set_pos(&mut self, node: NodeId, pos: XY) {
        self.state.nodes[node].pos = pos;
    }

    pub fn num_nodes(&self) -> usize {
        self.state.node_order.len()
    }

    pub fn num_edges(&self) -> usize {
        self.state.edges.len()
    }

    /// Node ids in insertion order.
    pub fn all_nodes(&self) -> &[NodeId] {
        &self.state.node_order
    }

    /// Edges in insertion order.
    pub fn all_edges(&self) -> &[DirectedEdge] {
        &self.state.edges
    }

    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&DirectedEdge> {
        self.state.edges.iter().find(|e| e.joins(a, b))
    }

    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_between(a, b).is_some()
    }

    /// Incoming edges of `node`, in the order they were connected.
    pub fn in_edges(&self, node: NodeId) -> Vec<DirectedEdge> {
        self.state.nodes[node]
            .incoming
            .iter()
            .filter_map(|&start| self.directed_edge(start, node))
            .collect()
    }

    /// Outgoing edges of `node`, in the order they were connected.
    pub fn out_edges(&self, node: NodeId) -> Vec<DirectedEdge> {
        self.state.nodes[node]
            .outgoing
            .iter()
            .filter_map(|&end| self.directed_edge(node, end))
            .collect()
    }

    /// Current straight-line length of `edge`.
    pub fn edge_length(&self, edge: &DirectedEdge) -> f64 {
        (self.pos(edge.end) - self.pos(edge.start)).length()
    }

    pub fn set_edge_colour(&mut self, start: NodeId, end: NodeId, colour: u32) {
        if let Some(edge) = self.state.edges.iter_mut().find(|e| e.start == start && e.end == end)
        {
            edge.colour = colour;
        }
    }

    /// Box enclosing every node disc; empty for an empty graph.
    pub fn bounds(&self) -> BoundingBox {
        let mut bounds = BoundingBox::EMPTY;
        for &id in &self.state.node_order {
            let node = &self.state.nodes[id];
            bounds.include_disc(node.pos, node.radius);
        }
        bounds
    }

    pub fn create_restore_point(&self) -> RestorePoint {
        RestorePoint { state: self.state.clone() }
    }

    /// Reverts to exactly the state captured by `point`, discarding every
    /// mutation made since it was taken.
    pub fn restore(&mut self, point: RestorePoint) {
        self.state = point.state;
    }

    /// Panics with a description of the first broken structural invariant.
    pub fn assert_invariants(&self) {
        assert_eq!(self.state.nodes.len(), self.state.node_order.len(), "node order out of sync");
        for (index, edge) in self.state.edges.iter().enumerate() {
            assert!(self.contains(edge.start), "edge {index} starts at a removed node");
            assert!(self.contains(edge.end), "edge {index} ends at a removed node");
            assert!(edge.start != edge.end, "edge {index} is a self-loop");
            let duplicates =
                self.state.edges.iter().filter(|other| other.joins(edge.start, edge.end)).count();
            assert_eq!(duplicates, 1, "edge {index} duplicates an unordered node pair");
        }
        for &id in &self.state.node_order {
            let node = &self.state.nodes[id];
            for &start in &node.incoming {
                assert!(self.directed_edge(start, id).is_some(), "dangling incoming entry");
            }
            for &end in &node.outgoing {
                assert!(self.directed_edge(id, end).is_some(), "dangling outgoing entry");
            }
        }
        let adjacency: usize = self.state.nodes.values().map(Node::degree).sum();
        assert_eq!(adjacency, self.state.edges.len() * 2, "adjacency lists out of sync");
    }

    /// Stable hash of node order, attributes, positions, and edges.
    ///
    /// Node identity is encoded by insertion index, so two graphs built by the
    /// same sequence of operations fingerprint identically.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        let index_of =
            |id: NodeId| self.state.node_order.iter().position(|&n| n == id).unwrap_or(usize::MAX);

        hasher.write_u64(self.state.node_order.len() as u64);
        for &id in &self.state.node_order {
            let node = &self.state.nodes[id];
            hasher.write(node.name.as_bytes());
            hasher.write_u8(0);
            hasher.write(node.codes.as_bytes());
            hasher.write_u8(0);
            hasher.write_u64(node.pos.x.to_bits());
            hasher.write_u64(node.pos.y.to_bits());
            hasher.write_u64(node.radius.to_bits());
        }
        hasher.write_u64(self.state.edges.len() as u64);
        for edge in &self.state.edges {
            hasher.write_u64(index_of(edge.start) as u64);
            hasher.write_u64(index_of(edge.end) as u64);
            hasher.write_u64(edge.min_length.to_bits());
            hasher.write_u64(edge.max_length.to_bits());
            hasher.write_u64(edge.half_width.to_bits());
        }
        hasher.finish()
    }

    fn directed_edge(&self, start: NodeId, end: NodeId) -> Option<DirectedEdge> {
        self.state.edges.iter().find(|e| e.start == start && e.end == end).copied()
    }
}

/// Structural equality: same node ids in the same order with identical
/// attributes, and the same edges (lengths and width included) in the same order.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.state.node_order == other.state.node_order
            && self
                .state
                .node_order
                .iter()
                .all(|&id| self.state.nodes.get(id) == other.state.nodes.get(id))
            && self.state.edges.len() == other.state.edges.len()
            && self.state.edges.iter().zip(&other.state.edges).all(|(a, b)| {
                a == b
                    && a.min_length == b.min_length
                    && a.max_length == b.max_length
                    && a.half_width == b.half_width
                    && a.colour == b.colour
            })
    }
}
