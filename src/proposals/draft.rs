//! Editable proposal forms and their validation.

use thiserror::Error;

use crate::api::{
	CreateEdgeProposal, CreateNodeProposal, Edge, ElementKind, Node, PropertyKind, PropertyMap,
	PropertyValue, ProposalRequest, ProposalType,
};

/// Why a draft cannot be submitted. Messages are shown to the user as-is.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DraftError {
	#[error("Node name is required!")]
	MissingName,
	#[error("Edge source, target, and type are mandatory!")]
	MissingEdgeFields,
	#[error("Property \"{key}\" must have a value!")]
	EmptyValue { key: String },
	#[error("Property \"{key}\" is not a valid {}!", .kind.as_str())]
	InvalidValue { key: String, kind: PropertyKind },
	#[error("At least one property is mandatory for {}!", element_phrase(.0))]
	NoProperties(ElementKind),
}

fn element_phrase(kind: &ElementKind) -> &'static str {
	match kind {
		ElementKind::Node => "a node",
		ElementKind::Edge => "an edge",
	}
}

/// One key/value line of the property editor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyRow {
	pub key: String,
	pub value: String,
	pub kind: PropertyKind,
}

impl PropertyRow {
	pub fn from_value(key: &str, value: &PropertyValue) -> Self {
		Self {
			key: key.to_string(),
			value: value.to_string(),
			kind: value.kind(),
		}
	}
}

/// Form state for creating or updating a node or edge.
#[derive(Clone, Debug, PartialEq)]
pub struct ProposalDraft {
	pub kind: ElementKind,
	pub proposal_type: ProposalType,
	/// The element being updated; `None` for CREATE.
	pub element_id: Option<String>,
	pub name: String,
	/// Comma-separated.
	pub labels: String,
	pub source_id: String,
	pub target_id: String,
	pub edge_type: String,
	pub properties: Vec<PropertyRow>,
}

impl ProposalDraft {
	pub fn create(kind: ElementKind) -> Self {
		Self {
			kind,
			proposal_type: ProposalType::Create,
			element_id: None,
			name: String::new(),
			labels: String::new(),
			source_id: String::new(),
			target_id: String::new(),
			edge_type: String::new(),
			properties: vec![PropertyRow::default()],
		}
	}

	pub fn update_node(node: &Node) -> Self {
		Self {
			proposal_type: ProposalType::Update,
			element_id: Some(node.id.clone()),
			name: node.name.clone(),
			labels: node.labels.join(", "),
			properties: rows(&node.properties),
			..Self::create(ElementKind::Node)
		}
	}

	pub fn update_edge(edge: &Edge) -> Self {
		Self {
			proposal_type: ProposalType::Update,
			element_id: Some(edge.display_id()),
			source_id: edge.source_id.clone(),
			target_id: edge.target_id.clone(),
			edge_type: edge.edge_type.clone(),
			properties: rows(&edge.properties),
			..Self::create(ElementKind::Edge)
		}
	}

	pub fn add_row(&mut self) {
		self.properties.push(PropertyRow::default());
	}

	/// Remove a row, always leaving at least one to type into.
	pub fn remove_row(&mut self, index: usize) {
		if index < self.properties.len() {
			self.properties.remove(index);
		}
		if self.properties.is_empty() {
			self.add_row();
		}
	}

	pub fn label_list(&self) -> Vec<String> {
		self.labels
			.split(',')
			.map(str::trim)
			.filter(|l| !l.is_empty())
			.map(str::to_string)
			.collect()
	}

	/// Validate and build the request body.
	pub fn validate(&self, community_id: &str, user_id: &str) -> Result<ProposalRequest, DraftError> {
		match self.kind {
			ElementKind::Node if self.name.trim().is_empty() => return Err(DraftError::MissingName),
			ElementKind::Edge
				if self.source_id.trim().is_empty()
					|| self.target_id.trim().is_empty()
					|| self.edge_type.trim().is_empty() =>
			{
				return Err(DraftError::MissingEdgeFields);
			}
			_ => {}
		}

		let properties = self.property_map()?;
		if properties.is_empty() {
			return Err(DraftError::NoProperties(self.kind));
		}

		let request = match self.kind {
			ElementKind::Node => ProposalRequest::Node(CreateNodeProposal {
				community_id: community_id.to_string(),
				user_id: user_id.to_string(),
				name: self.name.trim().to_string(),
				labels: self.label_list(),
				properties,
				proposal_type: self.proposal_type,
				node_id: self.element_id.clone(),
			}),
			ElementKind::Edge => ProposalRequest::Edge(CreateEdgeProposal {
				community_id: community_id.to_string(),
				user_id: user_id.to_string(),
				source_id: self.source_id.trim().to_string(),
				target_id: self.target_id.trim().to_string(),
				edge_type: self.edge_type.trim().to_string(),
				properties,
				proposal_type: self.proposal_type,
				edge_id: self.element_id.clone(),
			}),
		};
		Ok(request)
	}

	fn property_map(&self) -> Result<PropertyMap, DraftError> {
		let mut map = PropertyMap::new();
		for row in &self.properties {
			let key = row.key.trim();
			if key.is_empty() {
				continue;
			}
			if row.value.trim().is_empty() {
				return Err(DraftError::EmptyValue {
					key: key.to_string(),
				});
			}
			let value =
				PropertyValue::parse_as(row.kind, &row.value).ok_or_else(|| DraftError::InvalidValue {
					key: key.to_string(),
					kind: row.kind,
				})?;
			map.insert(key.to_string(), value);
		}
		Ok(map)
	}
}

fn rows(properties: &PropertyMap) -> Vec<PropertyRow> {
	let rows: Vec<PropertyRow> = properties
		.iter()
		.map(|(k, v)| PropertyRow::from_value(k, v))
		.collect();
	if rows.is_empty() {
		vec![PropertyRow::default()]
	} else {
		rows
	}
}

/// DELETE proposal for a node: keeps the name, drops labels and properties.
pub fn delete_node_request(node: &Node, community_id: &str, user_id: &str) -> ProposalRequest {
	ProposalRequest::Node(CreateNodeProposal {
		community_id: community_id.to_string(),
		user_id: user_id.to_string(),
		name: node.name.clone(),
		labels: Vec::new(),
		properties: PropertyMap::new(),
		proposal_type: ProposalType::Delete,
		node_id: Some(node.id.clone()),
	})
}

/// DELETE proposal for an edge: keeps endpoints and type, drops properties.
pub fn delete_edge_request(edge: &Edge, community_id: &str, user_id: &str) -> ProposalRequest {
	ProposalRequest::Edge(CreateEdgeProposal {
		community_id: community_id.to_string(),
		user_id: user_id.to_string(),
		source_id: edge.source_id.clone(),
		target_id: edge.target_id.clone(),
		edge_type: edge.edge_type.clone(),
		properties: PropertyMap::new(),
		proposal_type: ProposalType::Delete,
		edge_id: Some(edge.display_id()),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row(key: &str, value: &str, kind: PropertyKind) -> PropertyRow {
		PropertyRow {
			key: key.into(),
			value: value.into(),
			kind,
		}
	}

	fn node_draft() -> ProposalDraft {
		let mut draft = ProposalDraft::create(ElementKind::Node);
		draft.name = "  Ark Location ".into();
		draft.labels = "Location, , Site".into();
		draft.properties = vec![row("ETA", "3 days", PropertyKind::Text)];
		draft
	}

	#[test]
	fn node_create_builds_request_without_id() {
		let request = node_draft().validate("c1", "u1").unwrap();
		let ProposalRequest::Node(body) = request else {
			panic!("expected a node request");
		};
		assert_eq!(body.name, "Ark Location");
		assert_eq!(body.labels, ["Location", "Site"]);
		assert_eq!(body.node_id, None);
		assert_eq!(body.proposal_type, ProposalType::Create);
		assert_eq!(
			body.properties["ETA"],
			PropertyValue::Text("3 days".into())
		);
	}

	#[test]
	fn node_name_is_required() {
		let mut draft = node_draft();
		draft.name = "   ".into();
		assert_eq!(draft.validate("c1", "u1"), Err(DraftError::MissingName));
	}

	#[test]
	fn edge_fields_are_required() {
		let mut draft = ProposalDraft::create(ElementKind::Edge);
		draft.source_id = "a".into();
		draft.target_id = "b".into();
		draft.properties = vec![row("since", "2020", PropertyKind::Number)];
		let err = draft.validate("c1", "u1").unwrap_err();
		assert_eq!(err.to_string(), "Edge source, target, and type are mandatory!");
	}

	#[test]
	fn key_without_value_is_rejected() {
		let mut draft = node_draft();
		draft.properties.push(row("crew", " ", PropertyKind::Number));
		let err = draft.validate("c1", "u1").unwrap_err();
		assert_eq!(err.to_string(), "Property \"crew\" must have a value!");
	}

	#[test]
	fn blank_rows_are_ignored_but_one_property_is_needed() {
		let mut draft = ProposalDraft::create(ElementKind::Edge);
		draft.source_id = "a".into();
		draft.target_id = "b".into();
		draft.edge_type = "DEFENDS".into();
		draft.properties = vec![row("", "orphan", PropertyKind::Text)];
		let err = draft.validate("c1", "u1").unwrap_err();
		assert_eq!(err.to_string(), "At least one property is mandatory for an edge!");
	}

	#[test]
	fn values_must_parse_as_their_kind() {
		let mut draft = node_draft();
		draft.properties = vec![row("crew", "twelve", PropertyKind::Number)];
		let err = draft.validate("c1", "u1").unwrap_err();
		assert_eq!(err.to_string(), "Property \"crew\" is not a valid number!");
	}

	#[test]
	fn update_draft_carries_element_id() {
		let mut props = PropertyMap::new();
		props.insert("crew".into(), PropertyValue::Number(12.0));
		let node = Node {
			id: "n1".into(),
			labels: vec!["Ship".into()],
			name: "Ark".into(),
			properties: props,
		};
		let draft = ProposalDraft::update_node(&node);
		assert_eq!(draft.properties, [row("crew", "12", PropertyKind::Number)]);

		let ProposalRequest::Node(body) = draft.validate("c1", "u1").unwrap() else {
			panic!("expected a node request");
		};
		assert_eq!(body.node_id.as_deref(), Some("n1"));
		assert_eq!(body.proposal_type, ProposalType::Update);
		assert_eq!(body.properties["crew"], PropertyValue::Number(12.0));
	}

	#[test]
	fn remove_row_keeps_one_row() {
		let mut draft = ProposalDraft::create(ElementKind::Node);
		draft.remove_row(0);
		assert_eq!(draft.properties.len(), 1);
		draft.remove_row(7);
		assert_eq!(draft.properties.len(), 1);
	}

	#[test]
	fn delete_requests_are_stripped() {
		let edge = Edge {
			id: None,
			source_id: "a".into(),
			target_id: "b".into(),
			edge_type: "DEFENDS".into(),
			properties: PropertyMap::new(),
		};
		let ProposalRequest::Edge(body) = delete_edge_request(&edge, "c1", "u1") else {
			panic!("expected an edge request");
		};
		assert_eq!(body.edge_id.as_deref(), Some("a->b"));
		assert_eq!(body.proposal_type, ProposalType::Delete);
		assert!(body.properties.is_empty());
	}
}
