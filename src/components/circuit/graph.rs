use rand::Rng;

use super::config::{GraphConfig, PURPLE};
use crate::components::canvas::Rgb;
use crate::components::canvas::smooth::smooth;

pub type NodeId = usize;
pub type EdgeId = usize;

/// Relative grid cells a new node may link back to. Only cells that were
/// already visited are listed, so every pair is tried at most once.
const BACK_NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (0, -1), (-1, -1), (1, -1)];

/// Persisted, smoothed highlight of a node or edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
	pub level: f64,
	pub color: Rgb,
}

impl Glow {
	pub fn new(color: Rgb) -> Self {
		Self { level: 0.0, color }
	}

	pub fn approach(&mut self, target: f64, color: Rgb, rate: f64, color_threshold: f64) {
		self.level = smooth(self.level, target, rate);
		if target > color_threshold {
			self.color = color;
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: NodeId,
	pub x: f64,
	pub y: f64,
	/// Incident edges, in creation order.
	pub edges: Vec<EdgeId>,
	pub glow: Glow,
}

impl Node {
	pub fn pos(&self) -> (f64, f64) {
		(self.x, self.y)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub from: NodeId,
	pub to: NodeId,
	pub length: f64,
	pub glow: Glow,
}

/// Horizontal band around the page's content column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExclusionZone {
	pub left: f64,
	pub right: f64,
	pub margin: f64,
}

impl ExclusionZone {
	pub fn for_width(width: f64, config: &GraphConfig) -> Self {
		let center = width / 2.0;
		let half = config.content_max_width.min(width * config.content_width_ratio) / 2.0;
		Self {
			left: center - half,
			right: center + half,
			margin: config.exclusion_margin,
		}
	}

	/// Inside the band widened by the soft margin.
	pub fn contains(&self, x: f64) -> bool {
		x > self.left - self.margin && x < self.right + self.margin
	}

	/// Inside the content column itself.
	pub fn contains_core(&self, x: f64) -> bool {
		x > self.left && x < self.right
	}
}

/// One generation of the circuit network.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
}

impl Graph {
	/// Lay a sparse jittered grid over `width × full_height`, skipping the
	/// content band, and link each node to some of its earlier neighbors.
	pub fn build<R: Rng>(width: f64, full_height: f64, config: &GraphConfig, rng: &mut R) -> Self {
		let (width, full_height) = (width.max(0.0), full_height.max(0.0));
		let grid = config.grid.max(1.0);
		let cols = (width / grid).ceil() as usize + 1;
		let rows = (full_height / grid).ceil() as usize + 1;
		let zone = ExclusionZone::for_width(width, config);
		let node_p = config.node_probability.clamp(0.0, 1.0);
		let edge_p = config.edge_probability.clamp(0.0, 1.0);
		let jitter = grid * config.jitter;

		let mut graph = Graph::default();
		let mut cells: Vec<Option<NodeId>> = vec![None; cols * rows];

		for row in 0..rows {
			for col in 0..cols {
				let (base_x, base_y) = (col as f64 * grid, row as f64 * grid);
				if zone.contains(base_x) || !rng.gen_bool(node_p) {
					continue;
				}

				let x = base_x + rng.gen_range(-0.5..0.5) * jitter;
				let y = base_y + rng.gen_range(-0.5..0.5) * jitter;
				let id = graph.push_node(x, y);
				cells[row * cols + col] = Some(id);

				for (dc, dr) in BACK_NEIGHBORS {
					let (nc, nr) = (col as isize + dc, row as isize + dr);
					if nc < 0 || nr < 0 || nc as usize >= cols {
						continue;
					}
					let Some(neighbor) = cells[nr as usize * cols + nc as usize] else {
						continue;
					};
					if !rng.gen_bool(edge_p) {
						continue;
					}
					let mid_x = (x + graph.nodes[neighbor].x) / 2.0;
					if zone.contains(mid_x) {
						continue;
					}
					graph.push_edge(neighbor, id);
				}
			}
		}

		graph
	}

	/// Build from explicit points and `(from, to)` links. Links naming a
	/// missing node are ignored.
	pub fn from_links(points: &[(f64, f64)], links: &[(NodeId, NodeId)]) -> Self {
		let mut graph = Graph::default();
		for &(x, y) in points {
			graph.push_node(x, y);
		}
		for &(from, to) in links {
			if from < graph.nodes.len() && to < graph.nodes.len() {
				graph.push_edge(from, to);
			}
		}
		graph
	}

	fn push_node(&mut self, x: f64, y: f64) -> NodeId {
		let id = self.nodes.len();
		self.nodes.push(Node {
			id,
			x,
			y,
			edges: Vec::new(),
			glow: Glow::new(PURPLE),
		});
		id
	}

	fn push_edge(&mut self, from: NodeId, to: NodeId) -> EdgeId {
		let id = self.edges.len();
		let (a, b) = (&self.nodes[from], &self.nodes[to]);
		let length = (b.x - a.x).hypot(b.y - a.y);
		self.edges.push(Edge {
			from,
			to,
			length,
			glow: Glow::new(PURPLE),
		});
		self.nodes[from].edges.push(id);
		if to != from {
			self.nodes[to].edges.push(id);
		}
		id
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, id: NodeId) -> &Node {
		&self.nodes[id]
	}

	pub fn edge(&self, id: EdgeId) -> &Edge {
		&self.edges[id]
	}

	pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
		&mut self.nodes[id]
	}

	pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
		&mut self.edges[id]
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn endpoints(&self, edge: EdgeId) -> ((f64, f64), (f64, f64)) {
		let e = &self.edges[edge];
		(self.nodes[e.from].pos(), self.nodes[e.to].pos())
	}

	pub fn edge_midpoint(&self, edge: EdgeId) -> (f64, f64) {
		let ((x1, y1), (x2, y2)) = self.endpoints(edge);
		((x1 + x2) / 2.0, (y1 + y2) / 2.0)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn build(width: f64, height: f64, seed: u64) -> Graph {
		let mut rng = SmallRng::seed_from_u64(seed);
		Graph::build(width, height, &GraphConfig::default(), &mut rng)
	}

	#[test]
	fn exclusion_band_stays_clear() {
		let config = GraphConfig::default();
		for seed in 0..8 {
			let graph = build(1920.0, 3200.0, seed);
			let zone = ExclusionZone::for_width(1920.0, &config);
			assert!(!graph.nodes().is_empty());
			for node in graph.nodes() {
				assert!(!zone.contains_core(node.x), "node at x={} in content", node.x);
			}
			for id in 0..graph.edges().len() {
				let (mx, _) = graph.edge_midpoint(id);
				assert!(!zone.contains(mx), "edge midpoint at x={mx} in band");
			}
		}
	}

	#[test]
	fn same_seed_same_graph() {
		let a = build(1920.0, 1080.0, 42);
		let b = build(1920.0, 1080.0, 42);
		assert_eq!(a, b);
		assert_ne!(a, build(1920.0, 1080.0, 43));
	}

	#[test]
	fn incidence_lists_match_edges() {
		let graph = build(1600.0, 2400.0, 7);
		for (id, edge) in graph.edges().iter().enumerate() {
			assert!(graph.node(edge.from).edges.contains(&id));
			assert!(graph.node(edge.to).edges.contains(&id));
			let ((x1, y1), (x2, y2)) = graph.endpoints(id);
			assert!((edge.length - (x2 - x1).hypot(y2 - y1)).abs() < 1e-9);
		}
		let listed: usize = graph.nodes().iter().map(|n| n.edges.len()).sum();
		assert_eq!(listed, graph.edges().len() * 2);
	}

	#[test]
	fn no_duplicate_edges() {
		let graph = build(1920.0, 4000.0, 11);
		let mut seen = HashSet::new();
		for edge in graph.edges() {
			let key = (edge.from.min(edge.to), edge.from.max(edge.to));
			assert!(seen.insert(key), "duplicate edge {key:?}");
			assert_ne!(edge.from, edge.to);
		}
	}

	#[test]
	fn edges_only_join_grid_neighbors() {
		let config = GraphConfig::default();
		let graph = build(1920.0, 1080.0, 3);
		let reach = 2.0f64.sqrt() * config.grid * (1.0 + config.jitter);
		for edge in graph.edges() {
			assert!(edge.length <= reach + 1e-9);
		}
	}

	#[test]
	fn tiny_and_degenerate_viewports_are_empty_not_errors() {
		for (w, h) in [(0.0, 0.0), (40.0, 30.0), (-10.0, f64::NAN)] {
			let graph = build(w, h, 1);
			assert!(graph.is_empty());
			assert!(graph.edges().is_empty());
		}
	}

	#[test]
	fn from_links_skips_unknown_nodes() {
		let graph = Graph::from_links(&[(0.0, 0.0), (3.0, 4.0)], &[(0, 1), (1, 5)]);
		assert_eq!(graph.edges().len(), 1);
		assert_eq!(graph.edge(0).length, 5.0);
		assert_eq!((graph.edge(0).from, graph.edge(0).to), (0, 1));
		assert_eq!(graph.edge_midpoint(0), (1.5, 2.0));
	}
}
