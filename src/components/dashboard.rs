//! Community dashboard: loads the graph and proposals and turns info panel,
//! editor, and vote actions into API calls.
//!
//! Every request runs inside the dashboard's [`RequestScope`], which is
//! cancelled when the dashboard unmounts. A cancelled request never touches
//! signals or raises notices.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info, warn};

use super::contribution_queue::ContributionQueue;
use super::force_graph::Selection;
use super::knowledge_graph::KnowledgeGraph;
use super::notice::{Notices, use_notices};
use super::proposal_editor::ProposalEditor;
use super::query_bar::QueryBar;
use crate::api::{
	ApiClient, ElementKind, GraphSnapshot, ProposalKey, ProposalRequest, RequestScope, VoteValue,
};
use crate::config::AppConfig;
use crate::proposals::{
	ProposalDraft, VoteBoard, VoteError, delete_edge_request, delete_node_request, vote_mutation,
};

const NOT_LOGGED_IN_PROPOSAL: &str = "You must be logged in to contribute.";

/// Shared handles of one mounted dashboard.
#[derive(Clone)]
struct Controller {
	client: ApiClient,
	scope: RequestScope,
	notices: Notices,
	community_id: String,
	user_id: Option<String>,
	graph: RwSignal<GraphSnapshot>,
	board: RwSignal<VoteBoard>,
	/// Answer and subgraph of the active question, shown instead of the graph.
	query_result: RwSignal<Option<(String, GraphSnapshot)>>,
	loading: RwSignal<bool>,
	load_error: RwSignal<Option<String>>,
	querying: RwSignal<bool>,
	submitting: RwSignal<bool>,
	draft: RwSignal<Option<ProposalDraft>>,
}

impl Controller {
	/// The graph currently on screen.
	fn shown(&self) -> Signal<GraphSnapshot> {
		let (graph, query_result) = (self.graph, self.query_result);
		Signal::derive(move || {
			query_result
				.with(|q| q.as_ref().map(|(_, g)| g.clone()))
				.unwrap_or_else(|| graph.get())
		})
	}

	fn refresh_graph(&self) {
		let this = self.clone();
		spawn_local(async move {
			let (client, community) = (this.client.clone(), this.community_id.clone());
			let result = this
				.scope
				.run(async move { client.fetch_graph(&community).await })
				.await;
			match result {
				Ok(snapshot) => {
					info!(
						"crowdgraph: loaded graph with {} nodes, {} edges",
						snapshot.nodes.len(),
						snapshot.edges.len()
					);
					this.graph.try_set(snapshot);
					this.load_error.try_set(None);
				}
				Err(err) if err.is_cancelled() => return,
				Err(err) => {
					this.load_error
						.try_set(Some(err.user_message("Failed to load the knowledge graph.")));
				}
			}
			this.loading.try_set(false);
		});
	}

	fn refresh_proposals(&self) {
		let this = self.clone();
		spawn_local(async move {
			let (client, community) = (this.client.clone(), this.community_id.clone());
			let result = this
				.scope
				.run(async move { client.fetch_proposals(&community).await })
				.await;
			match result {
				Ok(proposals) => {
					info!(
						"crowdgraph: loaded {} node and {} edge proposals",
						proposals.node_proposals.len(),
						proposals.edge_proposals.len()
					);
					this.board.try_update(|b| b.replace_proposals(proposals));
				}
				Err(err) if err.is_cancelled() => {}
				Err(err) => this
					.notices
					.error(err.user_message("Failed to load contributions.")),
			}
		});
	}

	fn vote(&self, key: ProposalKey, clicked: VoteValue) {
		let Some(user_id) = self.user_id.clone() else {
			self.notices.error(VoteError::NotLoggedIn.to_string());
			return;
		};
		let plan = match self.board.with_untracked(|b| b.ledger.plan(&key, clicked)) {
			Ok(plan) => plan,
			Err(err) => {
				debug!("crowdgraph: vote ignored: {}", err);
				return;
			}
		};
		info!(
			"crowdgraph: voting {} on {} proposal {}",
			plan.next.as_i8(),
			key.kind.as_str(),
			key.id
		);

		let this = self.clone();
		spawn_local(async move {
			let request = {
				let (client, plan) = (this.client.clone(), plan.clone());
				this.scope.run(async move {
					client
						.vote_proposal(plan.key.kind, &plan.key.id, plan.next, &user_id)
						.await
				})
			};
			match vote_mutation(plan.clone()).run(&this.board, request).await {
				Ok(()) => {
					this.board.try_update(|b| b.ledger.settle(&plan.key));
					this.notices.success(plan.success_message());
					// A vote can settle a proposal, which changes the graph.
					this.refresh_proposals();
					this.refresh_graph();
				}
				Err(err) if err.is_cancelled() => {}
				Err(err) => this
					.notices
					.error(err.user_message("Failed to vote. Please try again.")),
			}
		});
	}

	fn submit(&self, request: ProposalRequest) {
		info!(
			"crowdgraph: submitting {} {} proposal",
			request.proposal_type().as_str(),
			request.kind().as_str()
		);
		self.submitting.set(true);
		let this = self.clone();
		spawn_local(async move {
			let result = {
				let (client, request) = (this.client.clone(), request.clone());
				this.scope
					.run(async move { client.create_proposal(&request).await })
					.await
			};
			match result {
				Ok(()) => {
					this.notices.success(request.success_message());
					this.draft.try_set(None);
					this.refresh_proposals();
					this.refresh_graph();
				}
				Err(err) if err.is_cancelled() => return,
				Err(err) => this.notices.error(err.user_message(request.failure_message())),
			}
			this.submitting.try_set(false);
		});
	}

	fn submit_draft(&self, draft: ProposalDraft) {
		let Some(user_id) = self.user_id.as_deref() else {
			self.notices.error(NOT_LOGGED_IN_PROPOSAL);
			return;
		};
		match draft.validate(&self.community_id, user_id) {
			Ok(request) => self.submit(request),
			Err(err) => self.notices.error(err.to_string()),
		}
	}

	fn open_editor(&self, selection: Selection) {
		let draft = self.shown().with_untracked(|g| match selection.kind {
			ElementKind::Node => g.find_node(&selection.id).map(ProposalDraft::update_node),
			ElementKind::Edge => g.find_edge(&selection.id).map(ProposalDraft::update_edge),
		});
		match draft {
			Some(draft) => self.draft.set(Some(draft)),
			None => warn!(
				"crowdgraph: cannot edit {} {}: not in the graph",
				selection.kind.as_str(),
				selection.id
			),
		}
	}

	fn delete(&self, selection: Selection) {
		let Some(user_id) = self.user_id.as_deref() else {
			self.notices.error(NOT_LOGGED_IN_PROPOSAL);
			return;
		};
		let request = self.shown().with_untracked(|g| match selection.kind {
			ElementKind::Node => g
				.find_node(&selection.id)
				.map(|n| delete_node_request(n, &self.community_id, user_id)),
			ElementKind::Edge => g
				.find_edge(&selection.id)
				.map(|e| delete_edge_request(e, &self.community_id, user_id)),
		});
		match request {
			Some(request) => self.submit(request),
			None => warn!(
				"crowdgraph: cannot delete {} {}: not in the graph",
				selection.kind.as_str(),
				selection.id
			),
		}
	}

	fn ask(&self, question: String) {
		info!("crowdgraph: querying graph: {}", question);
		self.querying.set(true);
		let this = self.clone();
		spawn_local(async move {
			let (client, community) = (this.client.clone(), this.community_id.clone());
			let result = this
				.scope
				.run(async move { client.query_graph(&community, &question).await })
				.await;
			match result {
				Ok(answer) => {
					this.query_result.try_set(Some(answer.into_snapshot()));
					this.notices.success("Search completed!");
				}
				Err(err) if err.is_cancelled() => return,
				Err(err) => {
					this.query_result.try_set(None);
					this.notices.error(err.user_message("Search failed"));
				}
			}
			this.querying.try_set(false);
		});
	}
}

#[component]
pub fn CommunityDashboard() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let Some(community_id) = config.community_id.clone() else {
		return view! {
			<div class="cg-dashboard">
				<p class="cg-muted cg-center">"No community selected."</p>
			</div>
		}
		.into_any();
	};
	let client = use_context::<ApiClient>().unwrap_or_else(|| ApiClient::from_config(&config));

	let controller = Controller {
		client,
		scope: RequestScope::new(),
		notices: use_notices(),
		community_id,
		user_id: config.user_id.clone(),
		graph: RwSignal::new(GraphSnapshot::default()),
		board: RwSignal::new(VoteBoard::default()),
		query_result: RwSignal::new(None),
		loading: RwSignal::new(true),
		load_error: RwSignal::new(None),
		querying: RwSignal::new(false),
		submitting: RwSignal::new(false),
		draft: RwSignal::new(None),
	};
	let scope = controller.scope.clone();
	on_cleanup(move || {
		debug!("crowdgraph: dashboard unmounted, cancelling {} requests", scope.in_flight());
		scope.cancel_all();
	});

	controller.refresh_graph();
	controller.refresh_proposals();

	let shown = controller.shown();
	let graph_open = RwSignal::new(false);

	let on_vote = {
		let c = controller.clone();
		Callback::new(move |(key, value): (ProposalKey, VoteValue)| c.vote(key, value))
	};
	let on_edit = {
		let c = controller.clone();
		Callback::new(move |selection: Selection| c.open_editor(selection))
	};
	let on_delete = {
		let c = controller.clone();
		Callback::new(move |selection: Selection| c.delete(selection))
	};
	let on_submit = {
		let c = controller.clone();
		Callback::new(move |draft: ProposalDraft| c.submit_draft(draft))
	};
	let on_query = {
		let c = controller.clone();
		Callback::new(move |question: String| c.ask(question))
	};
	let query_result = controller.query_result;
	let answer = Signal::derive(move || query_result.with(|q| q.as_ref().map(|(a, _)| a.clone())));
	let (loading, load_error, draft) = (controller.loading, controller.load_error, controller.draft);

	let status = move || {
		if loading.get() {
			Some(view! { <p class="cg-muted cg-center">"Loading knowledge graph..."</p> }.into_any())
		} else {
			load_error
				.get()
				.map(|message| view! { <p class="cg-error cg-center">{message}</p> }.into_any())
		}
	};

	let signed_in = config
		.username
		.clone()
		.map(|name| view! { <span class="cg-muted cg-small">{format!("Signed in as {}", name)}</span> });

	view! {
		<div class="cg-dashboard">
			<header class="cg-row">
				<h1>"Knowledge Graph"</h1>
				{signed_in}
			</header>
			<QueryBar
				busy=controller.querying
				answer=answer
				on_query=on_query
				on_clear=move |_| query_result.set(None)
			/>
			<section class="cg-card">
				<div class="cg-row">
					<h2>"Graph"</h2>
					<button
						class="cg-button cg-primary"
						on:click=move |_: ev::MouseEvent| draft.set(Some(ProposalDraft::create(ElementKind::Node)))
					>
						"Add Node / Edge"
					</button>
				</div>
				{status}
				<div class="cg-graph-frame">
					<KnowledgeGraph
						graph=shown
						on_edit=on_edit
						on_delete=on_delete
						on_expand=move |_| graph_open.set(true)
					/>
				</div>
			</section>
			<ContributionQueue board=controller.board graph=controller.graph on_vote=on_vote />
			<Show when=move || graph_open.get()>
				<div class="cg-overlay">
					<button class="cg-icon-button cg-overlay-close" title="Close" on:click=move |_| graph_open.set(false)>
						"✕"
					</button>
					<KnowledgeGraph graph=shown on_edit=on_edit on_delete=on_delete expanded=true />
				</div>
			</Show>
			<ProposalEditor
				draft=draft
				graph=shown
				submitting=controller.submitting
				on_submit=on_submit
			/>
		</div>
	}
	.into_any()
}
