//! Wire types for the community graph REST API.
//!
//! Field names follow the server's camelCase JSON. Property bags keep the
//! server's key order so that adapted detail lists and proposal payloads
//! enumerate keys the way the backend sent them.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Ordered property bag attached to nodes, edges and proposals.
pub type PropertyMap = IndexMap<String, PropertyValue>;

/// A scalar property value.
///
/// JSON strings that parse as RFC 3339 timestamps become [`PropertyValue::Date`];
/// non-scalar JSON (null, arrays, objects) is kept as compact JSON text.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
	Text(String),
	Number(f64),
	Bool(bool),
	Date(DateTime<Utc>),
}

/// The kind of a [`PropertyValue`], used by the proposal editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropertyKind {
	#[default]
	Text,
	Number,
	Bool,
	Date,
}

impl PropertyKind {
	pub const ALL: [PropertyKind; 4] = [
		PropertyKind::Text,
		PropertyKind::Number,
		PropertyKind::Bool,
		PropertyKind::Date,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			PropertyKind::Text => "text",
			PropertyKind::Number => "number",
			PropertyKind::Bool => "boolean",
			PropertyKind::Date => "date",
		}
	}

	pub fn from_str_lossy(s: &str) -> Self {
		match s {
			"number" => PropertyKind::Number,
			"boolean" => PropertyKind::Bool,
			"date" => PropertyKind::Date,
			_ => PropertyKind::Text,
		}
	}
}

impl PropertyValue {
	pub fn kind(&self) -> PropertyKind {
		match self {
			PropertyValue::Text(_) => PropertyKind::Text,
			PropertyValue::Number(_) => PropertyKind::Number,
			PropertyValue::Bool(_) => PropertyKind::Bool,
			PropertyValue::Date(_) => PropertyKind::Date,
		}
	}

	/// Parse user input as a value of the given kind.
	/// Text is kept as typed; other kinds ignore surrounding whitespace.
	pub fn parse_as(kind: PropertyKind, input: &str) -> Option<Self> {
		match kind {
			PropertyKind::Text => Some(PropertyValue::Text(input.to_string())),
			PropertyKind::Number => input
				.trim()
				.parse::<f64>()
				.ok()
				.filter(|n| n.is_finite())
				.map(PropertyValue::Number),
			PropertyKind::Bool => match input.trim().to_ascii_lowercase().as_str() {
				"true" => Some(PropertyValue::Bool(true)),
				"false" => Some(PropertyValue::Bool(false)),
				_ => None,
			},
			PropertyKind::Date => parse_timestamp(input.trim()).map(PropertyValue::Date),
		}
	}
}

impl From<Value> for PropertyValue {
	fn from(value: Value) -> Self {
		match value {
			Value::Bool(b) => PropertyValue::Bool(b),
			Value::Number(n) => n
				.as_f64()
				.map(PropertyValue::Number)
				.unwrap_or_else(|| PropertyValue::Text(n.to_string())),
			Value::String(s) => match DateTime::parse_from_rfc3339(&s) {
				Ok(dt) => PropertyValue::Date(dt.with_timezone(&Utc)),
				Err(_) => PropertyValue::Text(s),
			},
			other => PropertyValue::Text(other.to_string()),
		}
	}
}

impl<'de> Deserialize<'de> for PropertyValue {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Value::deserialize(deserializer).map(PropertyValue::from)
	}
}

impl Serialize for PropertyValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			PropertyValue::Text(s) => serializer.serialize_str(s),
			PropertyValue::Number(n) => serializer.serialize_f64(*n),
			PropertyValue::Bool(b) => serializer.serialize_bool(*b),
			PropertyValue::Date(dt) => {
				serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
			}
		}
	}
}

impl fmt::Display for PropertyValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PropertyValue::Text(s) => f.write_str(s),
			PropertyValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
				write!(f, "{}", *n as i64)
			}
			PropertyValue::Number(n) => write!(f, "{n}"),
			PropertyValue::Bool(b) => write!(f, "{b}"),
			PropertyValue::Date(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
		}
	}
}

/// Parse an RFC 3339 timestamp, or a zone-less ISO timestamp taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
	if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
		return Some(dt.with_timezone(&Utc));
	}
	["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
		.iter()
		.find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
		.map(|naive| naive.and_utc())
}

/// A committed node of the community graph.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Node {
	pub id: String,
	#[serde(default)]
	pub labels: Vec<String>,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub properties: PropertyMap,
}

/// A committed relation between two nodes.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	/// Server id; some endpoints omit it.
	#[serde(default)]
	pub id: Option<String>,
	pub source_id: String,
	pub target_id: String,
	#[serde(default, rename = "type")]
	pub edge_type: String,
	#[serde(default)]
	pub properties: PropertyMap,
}

/// A full graph snapshot. Refetches replace it wholesale.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GraphSnapshot {
	#[serde(default)]
	pub nodes: Vec<Node>,
	#[serde(default)]
	pub edges: Vec<Edge>,
}

impl Edge {
	/// The server id, or `"{sourceId}->{targetId}"` when the server sent none.
	pub fn display_id(&self) -> String {
		self.id
			.clone()
			.unwrap_or_else(|| format!("{}->{}", self.source_id, self.target_id))
	}
}

impl GraphSnapshot {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	pub fn find_node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Look an edge up by its display id.
	pub fn find_edge(&self, id: &str) -> Option<&Edge> {
		self.edges.iter().find(|e| e.display_id() == id)
	}

	pub fn node_name(&self, id: &str) -> Option<&str> {
		self.find_node(id).map(|n| n.name.as_str())
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProposalStatus {
	#[default]
	Pending,
	Approved,
	Rejected,
}

impl ProposalStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			ProposalStatus::Pending => "PENDING",
			ProposalStatus::Approved => "APPROVED",
			ProposalStatus::Rejected => "REJECTED",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProposalType {
	#[default]
	Create,
	Update,
	Delete,
}

impl ProposalType {
	pub fn as_str(self) -> &'static str {
		match self {
			ProposalType::Create => "CREATE",
			ProposalType::Update => "UPDATE",
			ProposalType::Delete => "DELETE",
		}
	}
}

/// Whether an element or proposal concerns a node or an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
	Node,
	Edge,
}

impl ElementKind {
	pub fn as_str(self) -> &'static str {
		match self {
			ElementKind::Node => "node",
			ElementKind::Edge => "edge",
		}
	}

	pub fn title(self) -> &'static str {
		match self {
			ElementKind::Node => "Node",
			ElementKind::Edge => "Edge",
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProposal {
	pub id: String,
	#[serde(default)]
	pub user_id: String,
	#[serde(default)]
	pub username: Option<String>,
	#[serde(default)]
	pub community_id: Option<String>,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub labels: Vec<String>,
	#[serde(default)]
	pub properties: PropertyMap,
	#[serde(default)]
	pub status: ProposalStatus,
	#[serde(default)]
	pub proposal_type: ProposalType,
	#[serde(default)]
	pub upvotes: i64,
	#[serde(default)]
	pub downvotes: i64,
	#[serde(default)]
	pub created_at: String,
	#[serde(default)]
	pub node_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeProposal {
	pub id: String,
	#[serde(default)]
	pub user_id: String,
	#[serde(default)]
	pub username: Option<String>,
	#[serde(default)]
	pub community_id: Option<String>,
	#[serde(default)]
	pub source_id: String,
	#[serde(default)]
	pub target_id: String,
	#[serde(default, rename = "type")]
	pub edge_type: String,
	#[serde(default)]
	pub properties: PropertyMap,
	#[serde(default)]
	pub status: ProposalStatus,
	#[serde(default)]
	pub proposal_type: ProposalType,
	#[serde(default)]
	pub upvotes: i64,
	#[serde(default)]
	pub downvotes: i64,
	#[serde(default)]
	pub created_at: String,
	#[serde(default)]
	pub edge_id: Option<String>,
}

/// Addresses a proposal across both proposal lists.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProposalKey {
	pub kind: ElementKind,
	pub id: String,
}

impl ProposalKey {
	pub fn new(kind: ElementKind, id: impl Into<String>) -> Self {
		Self {
			kind,
			id: id.into(),
		}
	}
}

/// Node and edge proposals of one community.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphProposals {
	pub node_proposals: Vec<NodeProposal>,
	pub edge_proposals: Vec<EdgeProposal>,
}

/// A kind-agnostic view of one proposal for list rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct ProposalSummary {
	pub key: ProposalKey,
	pub title: String,
	pub labels: Vec<String>,
	pub status: ProposalStatus,
	pub proposal_type: ProposalType,
	pub username: Option<String>,
	pub upvotes: i64,
	pub downvotes: i64,
	pub created_at: Option<DateTime<Utc>>,
	/// `(sourceId, targetId)` of an edge proposal.
	pub endpoints: Option<(String, String)>,
	pub properties: PropertyMap,
}

impl GraphProposals {
	/// All proposals, newest first. Unparseable timestamps sort last.
	pub fn newest_first(&self) -> Vec<ProposalSummary> {
		let mut all: Vec<ProposalSummary> = self
			.node_proposals
			.iter()
			.map(|p| ProposalSummary {
				key: ProposalKey::new(ElementKind::Node, &p.id),
				title: p.name.clone(),
				labels: p.labels.clone(),
				status: p.status,
				proposal_type: p.proposal_type,
				username: p.username.clone(),
				upvotes: p.upvotes,
				downvotes: p.downvotes,
				created_at: parse_timestamp(&p.created_at),
				endpoints: None,
				properties: p.properties.clone(),
			})
			.chain(self.edge_proposals.iter().map(|p| ProposalSummary {
				key: ProposalKey::new(ElementKind::Edge, &p.id),
				title: p.edge_type.clone(),
				labels: Vec::new(),
				status: p.status,
				proposal_type: p.proposal_type,
				username: p.username.clone(),
				upvotes: p.upvotes,
				downvotes: p.downvotes,
				created_at: parse_timestamp(&p.created_at),
				endpoints: Some((p.source_id.clone(), p.target_id.clone())),
				properties: p.properties.clone(),
			}))
			.collect();
		all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
		all
	}

	/// Adjust the tally of one proposal in place. Returns false if it is not present.
	pub fn adjust_votes(&mut self, key: &ProposalKey, up: i64, down: i64) -> bool {
		let tally = match key.kind {
			ElementKind::Node => self
				.node_proposals
				.iter_mut()
				.find(|p| p.id == key.id)
				.map(|p| (&mut p.upvotes, &mut p.downvotes)),
			ElementKind::Edge => self
				.edge_proposals
				.iter_mut()
				.find(|p| p.id == key.id)
				.map(|p| (&mut p.upvotes, &mut p.downvotes)),
		};
		match tally {
			Some((u, d)) => {
				*u += up;
				*d += down;
				true
			}
			None => false,
		}
	}

	pub fn tally(&self, key: &ProposalKey) -> Option<(i64, i64)> {
		match key.kind {
			ElementKind::Node => self
				.node_proposals
				.iter()
				.find(|p| p.id == key.id)
				.map(|p| (p.upvotes, p.downvotes)),
			ElementKind::Edge => self
				.edge_proposals
				.iter()
				.find(|p| p.id == key.id)
				.map(|p| (p.upvotes, p.downvotes)),
		}
	}
}

/// Body of `POST /node/proposal`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeProposal {
	pub community_id: String,
	pub user_id: String,
	pub name: String,
	pub labels: Vec<String>,
	pub properties: PropertyMap,
	pub proposal_type: ProposalType,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub node_id: Option<String>,
}

/// Body of `POST /edge/proposal`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEdgeProposal {
	pub community_id: String,
	pub user_id: String,
	pub source_id: String,
	pub target_id: String,
	#[serde(rename = "type")]
	pub edge_type: String,
	pub properties: PropertyMap,
	pub proposal_type: ProposalType,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub edge_id: Option<String>,
}

/// A proposal creation request of either flavor.
#[derive(Clone, Debug, PartialEq)]
pub enum ProposalRequest {
	Node(CreateNodeProposal),
	Edge(CreateEdgeProposal),
}

impl ProposalRequest {
	pub fn kind(&self) -> ElementKind {
		match self {
			ProposalRequest::Node(_) => ElementKind::Node,
			ProposalRequest::Edge(_) => ElementKind::Edge,
		}
	}

	pub fn proposal_type(&self) -> ProposalType {
		match self {
			ProposalRequest::Node(p) => p.proposal_type,
			ProposalRequest::Edge(p) => p.proposal_type,
		}
	}

	/// Notice text shown after the server accepts this request.
	pub fn success_message(&self) -> &'static str {
		match (self.kind(), self.proposal_type()) {
			(ElementKind::Node, ProposalType::Create) => "Node proposal created successfully!",
			(ElementKind::Node, ProposalType::Update) => "Node update proposal created!",
			(ElementKind::Node, ProposalType::Delete) => "Node delete proposal created!",
			(ElementKind::Edge, ProposalType::Create) => "Edge proposal created successfully!",
			(ElementKind::Edge, ProposalType::Update) => "Edge update proposal created!",
			(ElementKind::Edge, ProposalType::Delete) => "Edge delete proposal created!",
		}
	}

	/// Fallback text when the server rejects this request without a message.
	pub fn failure_message(&self) -> &'static str {
		match (self.kind(), self.proposal_type()) {
			(ElementKind::Node, ProposalType::Create) => "Failed to create node proposal!",
			(ElementKind::Edge, ProposalType::Create) => "Failed to create edge proposal!",
			(_, ProposalType::Update) => "Failed to create update proposal",
			(_, ProposalType::Delete) => "Failed to create delete proposal",
		}
	}
}

/// A signed vote: -1, 0 (cleared) or +1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VoteValue {
	Down,
	#[default]
	None,
	Up,
}

impl VoteValue {
	pub fn as_i8(self) -> i8 {
		match self {
			VoteValue::Down => -1,
			VoteValue::None => 0,
			VoteValue::Up => 1,
		}
	}
}

impl Serialize for VoteValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_i8(self.as_i8())
	}
}

/// Body of `POST /{node,edge}/proposal/vote`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
	pub proposal_id: String,
	pub vote_value: VoteValue,
	pub user_id: String,
}

/// Body of `POST /query`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
	pub question: String,
	pub community_id: String,
}

/// Answer and supporting subgraph returned by `POST /query`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct QueryAnswer {
	#[serde(default)]
	pub answer: String,
	#[serde(default)]
	pub nodes: Vec<Node>,
	#[serde(default)]
	pub edges: Vec<Edge>,
}

impl QueryAnswer {
	pub fn into_snapshot(self) -> (String, GraphSnapshot) {
		(
			self.answer,
			GraphSnapshot {
				nodes: self.nodes,
				edges: self.edges,
			},
		)
	}
}

/// Uniform response envelope `{success, data?, error?}`.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiEnvelope<T> {
	pub success: bool,
	#[serde(default = "Option::default")]
	pub data: Option<T>,
	#[serde(default)]
	pub error: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn node_properties_keep_server_order() {
		let node: Node = serde_json::from_value(json!({
			"id": "n1",
			"name": "Ark Location",
			"labels": ["Location"],
			"properties": {"zeta": "1", "alpha": 2, "mid": true}
		}))
		.unwrap();
		let keys: Vec<_> = node.properties.keys().cloned().collect();
		assert_eq!(keys, ["zeta", "alpha", "mid"]);
		assert_eq!(node.properties["alpha"], PropertyValue::Number(2.0));
		assert_eq!(node.properties["mid"], PropertyValue::Bool(true));
	}

	#[test]
	fn property_value_kinds_from_json() {
		assert_eq!(
			PropertyValue::from(json!("3 days")),
			PropertyValue::Text("3 days".into())
		);
		assert_eq!(
			PropertyValue::from(json!("2024-03-01T10:00:00Z")).kind(),
			PropertyKind::Date
		);
		assert_eq!(
			PropertyValue::from(json!(null)),
			PropertyValue::Text("null".into())
		);
		assert_eq!(
			PropertyValue::from(json!(["a", 1])),
			PropertyValue::Text("[\"a\",1]".into())
		);
	}

	#[test]
	fn property_value_serializes_as_scalars() {
		let mut props = PropertyMap::new();
		props.insert("eta".into(), PropertyValue::Text("3 days".into()));
		props.insert("crew".into(), PropertyValue::Number(12.0));
		props.insert("armed".into(), PropertyValue::Bool(false));
		props.insert(
			"seen".into(),
			PropertyValue::parse_as(PropertyKind::Date, "2024-03-01T10:00:00Z").unwrap(),
		);
		let value = serde_json::to_value(&props).unwrap();
		assert_eq!(
			value,
			json!({"eta": "3 days", "crew": 12.0, "armed": false, "seen": "2024-03-01T10:00:00Z"})
		);
	}

	#[test]
	fn property_value_display() {
		assert_eq!(PropertyValue::Number(3.0).to_string(), "3");
		assert_eq!(PropertyValue::Number(2.5).to_string(), "2.5");
		assert_eq!(PropertyValue::Bool(true).to_string(), "true");
	}

	#[test]
	fn parse_as_keeps_text_whitespace() {
		assert_eq!(
			PropertyValue::parse_as(PropertyKind::Text, "  3 days "),
			Some(PropertyValue::Text("  3 days ".into()))
		);
		assert_eq!(
			PropertyValue::parse_as(PropertyKind::Number, " 42 "),
			Some(PropertyValue::Number(42.0))
		);
		assert_eq!(
			PropertyValue::parse_as(PropertyKind::Bool, " false"),
			Some(PropertyValue::Bool(false))
		);
	}

	#[test]
	fn parse_as_rejects_mismatched_input() {
		assert_eq!(PropertyValue::parse_as(PropertyKind::Number, "abc"), None);
		assert_eq!(PropertyValue::parse_as(PropertyKind::Bool, "yes"), None);
		assert_eq!(
			PropertyValue::parse_as(PropertyKind::Bool, "TRUE"),
			Some(PropertyValue::Bool(true))
		);
		assert_eq!(PropertyValue::parse_as(PropertyKind::Date, "tomorrow"), None);
	}

	#[test]
	fn edge_id_is_optional() {
		let edge: Edge = serde_json::from_value(json!({
			"sourceId": "a", "targetId": "b", "type": "DEFENDS", "properties": {}
		}))
		.unwrap();
		assert_eq!(edge.id, None);
		assert_eq!(edge.edge_type, "DEFENDS");
		assert_eq!(edge.display_id(), "a->b");

		let snapshot = GraphSnapshot {
			nodes: Vec::new(),
			edges: vec![edge],
		};
		assert!(snapshot.find_edge("a->b").is_some());
		assert!(snapshot.find_edge("b->a").is_none());
	}

	#[test]
	fn node_proposal_payload_includes_node_id_only_when_present() {
		let mut update = CreateNodeProposal {
			community_id: "c1".into(),
			user_id: "u1".into(),
			name: "Ark".into(),
			labels: vec!["Location".into()],
			properties: PropertyMap::new(),
			proposal_type: ProposalType::Update,
			node_id: Some("n1".into()),
		};
		let value = serde_json::to_value(&update).unwrap();
		assert_eq!(value["nodeId"], "n1");
		assert_eq!(value["proposalType"], "UPDATE");

		update.proposal_type = ProposalType::Create;
		update.node_id = None;
		let value = serde_json::to_value(&update).unwrap();
		assert!(value.get("nodeId").is_none());
		assert_eq!(value["communityId"], "c1");
	}

	#[test]
	fn vote_request_serializes_signed_value() {
		let req = VoteRequest {
			proposal_id: "p1".into(),
			vote_value: VoteValue::Down,
			user_id: "u1".into(),
		};
		assert_eq!(
			serde_json::to_value(&req).unwrap(),
			json!({"proposalId": "p1", "voteValue": -1, "userId": "u1"})
		);
	}

	#[test]
	fn proposals_sort_newest_first() {
		let proposals = GraphProposals {
			node_proposals: vec![
				NodeProposal {
					id: "old".into(),
					created_at: "2024-01-01T00:00:00Z".into(),
					..Default::default()
				},
				NodeProposal {
					id: "broken".into(),
					created_at: "not a date".into(),
					..Default::default()
				},
			],
			edge_proposals: vec![EdgeProposal {
				id: "new".into(),
				created_at: "2024-02-01T00:00:00.000".into(),
				..Default::default()
			}],
		};
		let ids: Vec<_> = proposals
			.newest_first()
			.into_iter()
			.map(|p| p.key.id)
			.collect();
		assert_eq!(ids, ["new", "old", "broken"]);
	}

	#[test]
	fn adjust_votes_targets_one_proposal() {
		let mut proposals = GraphProposals {
			node_proposals: vec![NodeProposal {
				id: "p1".into(),
				upvotes: 2,
				..Default::default()
			}],
			edge_proposals: vec![EdgeProposal {
				id: "p1".into(),
				upvotes: 5,
				..Default::default()
			}],
		};
		let key = ProposalKey::new(ElementKind::Edge, "p1");
		assert!(proposals.adjust_votes(&key, 1, 0));
		assert_eq!(proposals.tally(&key), Some((6, 0)));
		assert_eq!(
			proposals.tally(&ProposalKey::new(ElementKind::Node, "p1")),
			Some((2, 0))
		);
		assert!(!proposals.adjust_votes(&ProposalKey::new(ElementKind::Node, "zz"), 1, 0));
	}
}
