//! HTTP client for the community graph backend.
//!
//! Every response is expected in the `{success, data?, error?}` envelope.
//! Transport failures and 5xx responses are retried immediately up to
//! [`RetryPolicy::max_retries`] times; 4xx and `success: false` are terminal.

use log::{debug, warn};
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::models::{
	ApiEnvelope, CreateEdgeProposal, CreateNodeProposal, EdgeProposal, ElementKind,
	GraphProposals, GraphSnapshot, NodeProposal, ProposalRequest, QueryAnswer, QueryRequest,
	VoteRequest, VoteValue,
};
use crate::config::AppConfig;

/// How often a failed request is re-sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Extra attempts after the first, for retryable failures only.
	pub max_retries: u32,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self { max_retries: 1 }
	}
}

/// Error body shape of non-2xx responses. Everything but `error` is ignored.
#[derive(Deserialize)]
struct ErrorBody {
	#[serde(default)]
	error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
	http: reqwest::Client,
	base_url: String,
	retry: RetryPolicy,
}

impl ApiClient {
	pub fn new(base_url: impl Into<String>, retry: RetryPolicy) -> Self {
		let base_url = base_url.into().trim_end_matches('/').to_string();
		Self {
			http: reqwest::Client::new(),
			base_url,
			retry,
		}
	}

	pub fn from_config(config: &AppConfig) -> Self {
		Self::new(
			config.api_base_url.clone(),
			RetryPolicy {
				max_retries: config.max_retries,
			},
		)
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// `GET /node/{communityId}/graph`
	pub async fn fetch_graph(&self, community_id: &str) -> Result<GraphSnapshot, ApiError> {
		let path = format!("/node/{}/graph", community_id);
		let graph: Option<GraphSnapshot> = self.send(Method::GET, &path, None).await?;
		Ok(graph.unwrap_or_default())
	}

	/// `GET /node/{communityId}/proposal`
	pub async fn fetch_node_proposals(
		&self,
		community_id: &str,
	) -> Result<Vec<NodeProposal>, ApiError> {
		let path = format!("/node/{}/proposal", community_id);
		let list: Option<Vec<NodeProposal>> = self.send(Method::GET, &path, None).await?;
		Ok(list.unwrap_or_default())
	}

	/// `GET /edge/{communityId}/proposal`
	pub async fn fetch_edge_proposals(
		&self,
		community_id: &str,
	) -> Result<Vec<EdgeProposal>, ApiError> {
		let path = format!("/edge/{}/proposal", community_id);
		let list: Option<Vec<EdgeProposal>> = self.send(Method::GET, &path, None).await?;
		Ok(list.unwrap_or_default())
	}

	/// Both proposal lists of a community, fetched concurrently.
	pub async fn fetch_proposals(&self, community_id: &str) -> Result<GraphProposals, ApiError> {
		let (node_proposals, edge_proposals) = futures::try_join!(
			self.fetch_node_proposals(community_id),
			self.fetch_edge_proposals(community_id)
		)?;
		Ok(GraphProposals {
			node_proposals,
			edge_proposals,
		})
	}

	/// `POST /node/proposal`
	pub async fn create_node_proposal(&self, request: &CreateNodeProposal) -> Result<(), ApiError> {
		let body = to_body(request)?;
		let _: Option<Value> = self.send(Method::POST, "/node/proposal", Some(body)).await?;
		Ok(())
	}

	/// `POST /edge/proposal`
	pub async fn create_edge_proposal(&self, request: &CreateEdgeProposal) -> Result<(), ApiError> {
		let body = to_body(request)?;
		let _: Option<Value> = self.send(Method::POST, "/edge/proposal", Some(body)).await?;
		Ok(())
	}

	pub async fn create_proposal(&self, request: &ProposalRequest) -> Result<(), ApiError> {
		match request {
			ProposalRequest::Node(r) => self.create_node_proposal(r).await,
			ProposalRequest::Edge(r) => self.create_edge_proposal(r).await,
		}
	}

	/// `POST /node/proposal/vote`
	pub async fn vote_node_proposal(
		&self,
		proposal_id: &str,
		vote_value: VoteValue,
		user_id: &str,
	) -> Result<(), ApiError> {
		self.vote_proposal(ElementKind::Node, proposal_id, vote_value, user_id)
			.await
	}

	/// `POST /edge/proposal/vote`
	pub async fn vote_edge_proposal(
		&self,
		proposal_id: &str,
		vote_value: VoteValue,
		user_id: &str,
	) -> Result<(), ApiError> {
		self.vote_proposal(ElementKind::Edge, proposal_id, vote_value, user_id)
			.await
	}

	pub async fn vote_proposal(
		&self,
		kind: ElementKind,
		proposal_id: &str,
		vote_value: VoteValue,
		user_id: &str,
	) -> Result<(), ApiError> {
		let path = format!("/{}/proposal/vote", kind.as_str());
		let body = to_body(&VoteRequest {
			proposal_id: proposal_id.to_string(),
			vote_value,
			user_id: user_id.to_string(),
		})?;
		let _: Option<Value> = self.send(Method::POST, &path, Some(body)).await?;
		Ok(())
	}

	/// `POST /query`
	pub async fn query_graph(
		&self,
		community_id: &str,
		question: &str,
	) -> Result<QueryAnswer, ApiError> {
		let body = to_body(&QueryRequest {
			question: question.to_string(),
			community_id: community_id.to_string(),
		})?;
		let answer: Option<QueryAnswer> = self.send(Method::POST, "/query", Some(body)).await?;
		answer.ok_or_else(|| ApiError::Decode("query response carried no data".into()))
	}

	async fn send<T: DeserializeOwned>(
		&self,
		method: Method,
		path: &str,
		body: Option<Value>,
	) -> Result<Option<T>, ApiError> {
		let url = format!("{}{}", self.base_url, path);
		let mut attempt = 0;
		loop {
			debug!("crowdgraph: {} {} (attempt {})", method, url, attempt + 1);
			match self.send_once(method.clone(), &url, body.as_ref()).await {
				Err(err) if err.is_retryable() && attempt < self.retry.max_retries => {
					warn!("crowdgraph: {} {} failed, retrying: {}", method, url, err);
					attempt += 1;
				}
				Err(err) => {
					warn!("crowdgraph: {} {} failed: {}", method, url, err);
					return Err(err);
				}
				ok => return ok,
			}
		}
	}

	async fn send_once<T: DeserializeOwned>(
		&self,
		method: Method,
		url: &str,
		body: Option<&Value>,
	) -> Result<Option<T>, ApiError> {
		let mut request = self.http.request(method, url);
		if let Some(body) = body {
			request = request.json(body);
		}
		let response = request.send().await?;
		let status = response.status();
		let text = response.text().await?;

		if !status.is_success() {
			let message = serde_json::from_str::<ErrorBody>(&text)
				.ok()
				.and_then(|b| b.error);
			return Err(ApiError::from_status(status.as_u16(), message));
		}

		let envelope: ApiEnvelope<T> =
			serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;
		if !envelope.success {
			return Err(ApiError::Rejected {
				message: envelope.error,
			});
		}
		Ok(envelope.data)
	}
}

fn to_body<T: serde::Serialize>(payload: &T) -> Result<Value, ApiError> {
	serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_url_trailing_slash_is_trimmed() {
		let client = ApiClient::new("http://localhost:8080/", RetryPolicy::default());
		assert_eq!(client.base_url(), "http://localhost:8080");
	}

	#[test]
	fn config_drives_retry_policy() {
		let config = AppConfig {
			max_retries: 3,
			..AppConfig::default()
		};
		let client = ApiClient::from_config(&config);
		assert_eq!(client.retry, RetryPolicy { max_retries: 3 });
	}
}
