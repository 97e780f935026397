//! Converts backend graph records into renderer-ready display data.

use crate::api::{GraphSnapshot, PropertyMap, PropertyValue};
use crate::theme::{Color, Palette};

use super::scale::GraphMetrics;

/// One flattened property, in server key order.
#[derive(Clone, Debug, PartialEq)]
pub struct Detail {
	pub key: String,
	pub value: PropertyValue,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayNode {
	pub id: String,
	/// Node name, or "Unnamed".
	pub label: String,
	/// First label, used as the node's type.
	pub group: Option<String>,
	pub labels: Vec<String>,
	pub details: Vec<Detail>,
	pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayLink {
	/// Server id, or `"{source}->{target}"`.
	pub id: String,
	pub source: String,
	pub target: String,
	/// Relation type.
	pub label: String,
	pub details: Vec<Detail>,
	pub color: Color,
	pub width: f64,
}

/// Renderer input. Compared by value so an unchanged snapshot does not
/// restart the layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayGraph {
	pub nodes: Vec<DisplayNode>,
	pub links: Vec<DisplayLink>,
}

impl DisplayGraph {
	pub fn node(&self, id: &str) -> Option<&DisplayNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn link(&self, id: &str) -> Option<&DisplayLink> {
		self.links.iter().find(|l| l.id == id)
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

fn flatten(properties: &PropertyMap) -> Vec<Detail> {
	properties
		.iter()
		.map(|(key, value)| Detail {
			key: key.clone(),
			value: value.clone(),
		})
		.collect()
}

/// Adapt a snapshot. Every node and edge yields exactly one display entry;
/// edges with unknown endpoints are kept and skipped at draw time.
pub fn adapt(graph: &GraphSnapshot, palette: &Palette, metrics: &GraphMetrics) -> DisplayGraph {
	let nodes = graph
		.nodes
		.iter()
		.map(|node| DisplayNode {
			id: node.id.clone(),
			label: if node.name.is_empty() {
				"Unnamed".to_string()
			} else {
				node.name.clone()
			},
			group: node.labels.first().cloned(),
			labels: node.labels.clone(),
			details: flatten(&node.properties),
			color: palette.primary,
		})
		.collect();

	let links = graph
		.edges
		.iter()
		.map(|edge| DisplayLink {
			id: edge.display_id(),
			source: edge.source_id.clone(),
			target: edge.target_id.clone(),
			label: edge.edge_type.clone(),
			details: flatten(&edge.properties),
			color: palette.border,
			width: metrics.link_width,
		})
		.collect();

	DisplayGraph { nodes, links }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::{Edge, Node};
	use crate::components::force_graph::scale::ViewportClass;
	use crate::theme::Theme;

	fn node(id: &str, name: &str, labels: &[&str]) -> Node {
		Node {
			id: id.into(),
			labels: labels.iter().map(|l| l.to_string()).collect(),
			name: name.into(),
			properties: PropertyMap::new(),
		}
	}

	fn edge(id: Option<&str>, source: &str, target: &str) -> Edge {
		Edge {
			id: id.map(str::to_string),
			source_id: source.into(),
			target_id: target.into(),
			edge_type: "NEAR".into(),
			properties: PropertyMap::new(),
		}
	}

	fn run(graph: &GraphSnapshot) -> DisplayGraph {
		adapt(
			graph,
			&Theme::default().palette,
			&GraphMetrics::for_class(ViewportClass::Large),
		)
	}

	#[test]
	fn ark_location_scenario() {
		let mut ark = node("n1", "Ark Location", &["Location"]);
		ark.properties
			.insert("ETA".into(), PropertyValue::Text("3 days".into()));
		let out = run(&GraphSnapshot {
			nodes: vec![ark],
			edges: Vec::new(),
		});

		let n = &out.nodes[0];
		assert_eq!(n.label, "Ark Location");
		assert_eq!(n.group.as_deref(), Some("Location"));
		assert_eq!(
			n.details,
			[Detail {
				key: "ETA".into(),
				value: PropertyValue::Text("3 days".into())
			}]
		);
		assert!(out.links.is_empty());
	}

	#[test]
	fn counts_are_preserved_even_with_dangling_edges() {
		let graph = GraphSnapshot {
			nodes: vec![node("a", "A", &[]), node("b", "B", &["X", "Y"])],
			edges: vec![
				edge(Some("e1"), "a", "b"),
				edge(None, "a", "ghost"),
				edge(None, "b", "a"),
			],
		};
		let out = run(&graph);
		assert_eq!(out.nodes.len(), graph.nodes.len());
		assert_eq!(out.links.len(), graph.edges.len());
	}

	#[test]
	fn group_is_first_label_or_none() {
		let out = run(&GraphSnapshot {
			nodes: vec![node("a", "A", &[]), node("b", "B", &["X", "Y"])],
			edges: Vec::new(),
		});
		assert_eq!(out.nodes[0].group, None);
		assert_eq!(out.nodes[1].group.as_deref(), Some("X"));
	}

	#[test]
	fn missing_edge_id_defaults_to_arrow_form() {
		let out = run(&GraphSnapshot {
			nodes: Vec::new(),
			edges: vec![edge(None, "a", "b"), edge(Some("e9"), "a", "b")],
		});
		assert_eq!(out.links[0].id, "a->b");
		assert_eq!(out.links[1].id, "e9");
		assert_eq!(out.links[0].label, "NEAR");
	}

	#[test]
	fn empty_name_is_unnamed() {
		let out = run(&GraphSnapshot {
			nodes: vec![node("a", "", &[])],
			edges: Vec::new(),
		});
		assert_eq!(out.nodes[0].label, "Unnamed");
	}

	#[test]
	fn colors_come_from_palette() {
		let theme = Theme::blue_light();
		let out = adapt(
			&GraphSnapshot {
				nodes: vec![node("a", "A", &[])],
				edges: vec![edge(None, "a", "a")],
			},
			&theme.palette,
			&GraphMetrics::for_class(ViewportClass::Small),
		);
		assert_eq!(out.nodes[0].color, theme.palette.primary);
		assert_eq!(out.links[0].color, theme.palette.border);
		assert_eq!(out.links[0].width, 1.0);
	}

	#[test]
	fn identical_input_adapts_to_equal_output() {
		let graph = GraphSnapshot {
			nodes: vec![node("a", "A", &["X"])],
			edges: vec![edge(None, "a", "a")],
		};
		assert_eq!(run(&graph), run(&graph));
	}
}
