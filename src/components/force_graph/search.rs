//! Case-insensitive substring search over the displayed graph.

use super::adapter::DisplayGraph;
use super::selection::Selection;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchScope {
	#[default]
	All,
	Nodes,
	Edges,
}

impl SearchScope {
	pub const ALL: [SearchScope; 3] = [SearchScope::All, SearchScope::Nodes, SearchScope::Edges];

	pub fn title(self) -> &'static str {
		match self {
			SearchScope::All => "All",
			SearchScope::Nodes => "Nodes",
			SearchScope::Edges => "Edges",
		}
	}

	/// Empty-state text naming the active scope.
	pub fn empty_message(self) -> String {
		let noun = match self {
			SearchScope::All => "results",
			SearchScope::Nodes => "nodes",
			SearchScope::Edges => "edges",
		};
		format!("No {} found", noun)
	}

	fn includes_nodes(self) -> bool {
		self != SearchScope::Edges
	}

	fn includes_edges(self) -> bool {
		self != SearchScope::Nodes
	}
}

/// Which field the query matched. Label wins when both do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchType {
	Label,
	Id,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit {
	pub selection: Selection,
	pub label: String,
	pub match_type: MatchType,
}

fn match_type(query: &str, label: &str, id: &str) -> Option<MatchType> {
	if label.to_lowercase().contains(query) {
		Some(MatchType::Label)
	} else if id.to_lowercase().contains(query) {
		Some(MatchType::Id)
	} else {
		None
	}
}

/// Nodes then links matching `query`, in display order. A blank query
/// matches nothing.
pub fn search(graph: &DisplayGraph, query: &str, scope: SearchScope) -> Vec<SearchHit> {
	let query = query.trim().to_lowercase();
	if query.is_empty() {
		return Vec::new();
	}

	let mut hits = Vec::new();
	if scope.includes_nodes() {
		hits.extend(graph.nodes.iter().filter_map(|n| {
			match_type(&query, &n.label, &n.id).map(|match_type| SearchHit {
				selection: Selection::node(&n.id),
				label: n.label.clone(),
				match_type,
			})
		}));
	}
	if scope.includes_edges() {
		hits.extend(graph.links.iter().filter_map(|l| {
			match_type(&query, &l.label, &l.id).map(|match_type| SearchHit {
				selection: Selection::edge(&l.id),
				label: l.label.clone(),
				match_type,
			})
		}));
	}
	hits
}

/// Split hits into the visible head and the "+N more" count.
pub fn visible_hits(hits: &[SearchHit], limit: usize) -> (&[SearchHit], usize) {
	let shown = hits.len().min(limit);
	(&hits[..shown], hits.len() - shown)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::ElementKind;
	use crate::components::force_graph::adapter::{DisplayLink, DisplayNode};
	use crate::theme::Color;

	fn graph() -> DisplayGraph {
		let node = |id: &str, label: &str| DisplayNode {
			id: id.into(),
			label: label.into(),
			group: None,
			labels: Vec::new(),
			details: Vec::new(),
			color: Color::rgb(0, 0, 0),
		};
		DisplayGraph {
			nodes: vec![node("n1", "Alice"), node("alpha-7", "Bob")],
			links: vec![DisplayLink {
				id: "n1->alpha-7".into(),
				source: "n1".into(),
				target: "alpha-7".into(),
				label: "KNOWS".into(),
				details: Vec::new(),
				color: Color::rgb(0, 0, 0),
				width: 2.0,
			}],
		}
	}

	#[test]
	fn substring_is_case_insensitive() {
		let hits = search(&graph(), "alic", SearchScope::All);
		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].selection, Selection::node("n1"));
		assert_eq!(hits[0].match_type, MatchType::Label);
	}

	#[test]
	fn empty_query_matches_nothing() {
		assert!(search(&graph(), "", SearchScope::All).is_empty());
		assert!(search(&graph(), "   ", SearchScope::All).is_empty());
	}

	#[test]
	fn id_matches_are_marked() {
		let hits = search(&graph(), "ALPHA", SearchScope::All);
		let kinds: Vec<_> = hits
			.iter()
			.map(|h| (h.selection.kind, h.match_type))
			.collect();
		assert_eq!(
			kinds,
			[
				(ElementKind::Node, MatchType::Id),
				(ElementKind::Edge, MatchType::Id)
			]
		);
	}

	#[test]
	fn scope_filters_kinds() {
		assert_eq!(search(&graph(), "n", SearchScope::Edges).len(), 1);
		assert!(search(&graph(), "knows", SearchScope::Nodes).is_empty());
		assert_eq!(search(&graph(), "knows", SearchScope::Edges)[0].label, "KNOWS");
	}

	#[test]
	fn empty_state_names_scope() {
		assert_eq!(SearchScope::All.empty_message(), "No results found");
		assert_eq!(SearchScope::Edges.empty_message(), "No edges found");
	}

	#[test]
	fn overflow_count() {
		let hits = search(&graph(), "a", SearchScope::All);
		let (shown, more) = visible_hits(&hits, 1);
		assert_eq!(shown.len(), 1);
		assert_eq!(more, hits.len() - 1);
		let (shown, more) = visible_hits(&hits, 10);
		assert_eq!((shown.len(), more), (hits.len(), 0));
	}
}
