//! Pending and settled proposals with voting controls.

use std::cmp::Reverse;

use leptos::ev;
use leptos::prelude::*;

use crate::api::{
	ElementKind, GraphSnapshot, ProposalKey, ProposalStatus, ProposalSummary, ProposalType, VoteValue,
};
use crate::proposals::VoteBoard;

/// Entries shown before "View all".
pub const COLLAPSED_LIMIT: usize = 5;
/// Labels shown per entry.
const LABEL_LIMIT: usize = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueueSort {
	#[default]
	Recent,
	Oldest,
	Upvotes,
	Downvotes,
}

impl QueueSort {
	pub const ALL: [QueueSort; 4] = [
		QueueSort::Recent,
		QueueSort::Oldest,
		QueueSort::Upvotes,
		QueueSort::Downvotes,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			QueueSort::Recent => "recent",
			QueueSort::Oldest => "oldest",
			QueueSort::Upvotes => "upvotes",
			QueueSort::Downvotes => "downvotes",
		}
	}

	pub fn title(self) -> &'static str {
		match self {
			QueueSort::Recent => "Most Recent",
			QueueSort::Oldest => "Oldest First",
			QueueSort::Upvotes => "Most Upvotes",
			QueueSort::Downvotes => "Most Downvotes",
		}
	}

	fn parse(value: &str) -> Self {
		Self::ALL
			.into_iter()
			.find(|s| s.as_str() == value)
			.unwrap_or_default()
	}
}

/// Filters of the full list. `None` means "all".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueueFilter {
	pub status: Option<ProposalStatus>,
	pub kind: Option<ElementKind>,
	pub action: Option<ProposalType>,
	pub sort: QueueSort,
}

impl QueueFilter {
	/// Filter and order proposals that arrive newest first.
	pub fn apply(&self, proposals: &[ProposalSummary]) -> Vec<ProposalSummary> {
		let mut out: Vec<ProposalSummary> = proposals
			.iter()
			.filter(|p| self.status.is_none_or(|s| p.status == s))
			.filter(|p| self.kind.is_none_or(|k| p.key.kind == k))
			.filter(|p| self.action.is_none_or(|a| p.proposal_type == a))
			.cloned()
			.collect();
		match self.sort {
			QueueSort::Recent => {}
			QueueSort::Oldest => out.sort_by_key(|p| (p.created_at.is_none(), p.created_at)),
			QueueSort::Upvotes => out.sort_by_key(|p| Reverse(p.upvotes)),
			QueueSort::Downvotes => out.sort_by_key(|p| Reverse(p.downvotes)),
		}
		out
	}
}

fn status_class(status: ProposalStatus) -> &'static str {
	match status {
		ProposalStatus::Pending => "cg-badge cg-badge-pending",
		ProposalStatus::Approved => "cg-badge cg-badge-approved",
		ProposalStatus::Rejected => "cg-badge cg-badge-rejected",
	}
}

/// Value of the "no filter" option of each select.
const ANY: &str = "all";

const STATUS_OPTIONS: [(&str, &str); 4] = [
	(ANY, "All Statuses"),
	("PENDING", "Pending"),
	("APPROVED", "Approved"),
	("REJECTED", "Rejected"),
];
const KIND_OPTIONS: [(&str, &str); 3] = [(ANY, "All Types"), ("node", "Nodes"), ("edge", "Edges")];
const ACTION_OPTIONS: [(&str, &str); 4] = [
	(ANY, "All Actions"),
	("CREATE", "Create"),
	("UPDATE", "Update"),
	("DELETE", "Delete"),
];

fn parse_status(value: &str) -> Option<ProposalStatus> {
	[
		ProposalStatus::Pending,
		ProposalStatus::Approved,
		ProposalStatus::Rejected,
	]
	.into_iter()
	.find(|s| s.as_str() == value)
}

fn parse_kind(value: &str) -> Option<ElementKind> {
	[ElementKind::Node, ElementKind::Edge]
		.into_iter()
		.find(|k| k.as_str() == value)
}

fn parse_action(value: &str) -> Option<ProposalType> {
	[ProposalType::Create, ProposalType::Update, ProposalType::Delete]
		.into_iter()
		.find(|a| a.as_str() == value)
}

impl QueueFilter {
	fn status_value(&self) -> &'static str {
		self.status.map_or(ANY, ProposalStatus::as_str)
	}

	fn kind_value(&self) -> &'static str {
		self.kind.map_or(ANY, ElementKind::as_str)
	}

	fn action_value(&self) -> &'static str {
		self.action.map_or(ANY, ProposalType::as_str)
	}
}

/// "View all" opens the full list, so any proposal at all makes it useful.
fn shows_view_all(count: usize) -> bool {
	count > 0
}

const UNKNOWN: &str = "Unknown";

/// Display strings of the detail modal for one proposal.
#[derive(Clone, Debug, PartialEq)]
pub struct ProposalDetail {
	pub heading: String,
	pub created: String,
	pub username: String,
	/// Source and target names of an edge, falling back to their ids.
	pub endpoints: Option<(String, String)>,
	pub properties: Vec<(String, String)>,
}

impl ProposalDetail {
	pub fn new(proposal: &ProposalSummary, graph: &GraphSnapshot) -> Self {
		let name = |id: &str| {
			graph
				.node_name(id)
				.filter(|n| !n.is_empty())
				.unwrap_or(id)
				.to_string()
		};
		ProposalDetail {
			heading: format!("{} - Full Details", proposal.title),
			created: proposal
				.created_at
				.map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
				.unwrap_or_else(|| UNKNOWN.to_string()),
			username: proposal.username.clone().unwrap_or_else(|| UNKNOWN.to_string()),
			endpoints: proposal
				.endpoints
				.as_ref()
				.map(|(source, target)| (name(source), name(target))),
			properties: proposal
				.properties
				.iter()
				.map(|(k, v)| (k.clone(), v.to_string()))
				.collect(),
		}
	}
}

#[component]
fn FilterSelect(
	options: Vec<(&'static str, &'static str)>,
	#[prop(into)] current: Signal<&'static str>,
	#[prop(into)] on_pick: Callback<String>,
) -> impl IntoView {
	let options = options
		.into_iter()
		.map(|(value, title)| view! { <option value=value selected=move || current.get() == value>{title}</option> })
		.collect_view();
	view! {
		<select
			class="cg-input"
			prop:value=move || current.get()
			on:change=move |evt: ev::Event| on_pick.run(event_target_value(&evt))
		>
			{options}
		</select>
	}
}

#[component]
fn VoteButtons(
	proposal_key: ProposalKey,
	upvotes: i64,
	downvotes: i64,
	board: Signal<VoteBoard>,
	on_vote: Callback<(ProposalKey, VoteValue)>,
) -> impl IntoView {
	let current = {
		let key = proposal_key.clone();
		Memo::new(move |_| board.with(|b| b.ledger.current(&key)))
	};
	let busy = {
		let key = proposal_key.clone();
		Memo::new(move |_| board.with(|b| b.ledger.is_in_flight(&key)))
	};
	let vote_button = move |value: VoteValue, glyph: &'static str, count: i64| {
		let key = proposal_key.clone();
		let class = move || {
			if current.get() == value {
				"cg-vote cg-vote-active"
			} else {
				"cg-vote"
			}
		};
		view! {
			<button
				class=class
				disabled=move || busy.get()
				on:click=move |_| on_vote.run((key.clone(), value))
			>
				{glyph}
				" "
				{count}
			</button>
		}
	};
	view! {
		<div class="cg-row">
			{vote_button(VoteValue::Up, "▲", upvotes)}
			{vote_button(VoteValue::Down, "▼", downvotes)}
		</div>
	}
}

#[component]
fn ProposalEntry(
	proposal: ProposalSummary,
	board: Signal<VoteBoard>,
	on_vote: Callback<(ProposalKey, VoteValue)>,
	on_review: Callback<ProposalKey>,
) -> impl IntoView {
	let key = proposal.key.clone();
	let review_key = key.clone();
	let labels = proposal
		.labels
		.iter()
		.take(LABEL_LIMIT)
		.map(|l| view! { <span class="cg-chip">{l.clone()}</span> })
		.collect_view();
	let author = proposal
		.username
		.clone()
		.map(|name| view! { <span class="cg-muted cg-small">{format!("by {}", name)}</span> });

	view! {
		<li class="cg-proposal">
			<div class="cg-row">
				<span class="cg-strong">{proposal.title.clone()}</span>
				<span class=status_class(proposal.status)>{proposal.status.as_str()}</span>
			</div>
			<div class="cg-row cg-small">
				<span class="cg-muted">{proposal.key.kind.title()}</span>
				<span class="cg-muted">{proposal.proposal_type.as_str()}</span>
				{labels}
				{author}
			</div>
			<div class="cg-row">
				<VoteButtons
					proposal_key=key
					upvotes=proposal.upvotes
					downvotes=proposal.downvotes
					board=board
					on_vote=on_vote
				/>
				<button class="cg-link" on:click=move |_| on_review.run(review_key.clone())>"Review →"</button>
			</div>
		</li>
	}
}

#[component]
fn ProposalDetailModal(
	proposal: ProposalSummary,
	graph: Signal<GraphSnapshot>,
	board: Signal<VoteBoard>,
	on_vote: Callback<(ProposalKey, VoteValue)>,
	on_close: Callback<()>,
) -> impl IntoView {
	let detail = graph.with_untracked(|g| ProposalDetail::new(&proposal, g));
	let element = match &detail.endpoints {
		None => {
			let labels = proposal
				.labels
				.iter()
				.map(|l| view! { <span class="cg-chip">{l.clone()}</span> })
				.collect_view();
			view! {
				<h4>"Node Details"</h4>
				<dl class="cg-detail-grid">
					<dt>"Name"</dt>
					<dd>{proposal.title.clone()}</dd>
					<dt>"Labels"</dt>
					<dd>{labels}</dd>
				</dl>
			}
			.into_any()
		}
		Some((source, target)) => view! {
			<h4>"Edge Details"</h4>
			<dl class="cg-detail-grid">
				<dt>"Type"</dt>
				<dd>{proposal.title.clone()}</dd>
				<dt>"From"</dt>
				<dd>{source.clone()}</dd>
				<dt>"To"</dt>
				<dd>{target.clone()}</dd>
			</dl>
		}
		.into_any(),
	};
	let properties = (!detail.properties.is_empty()).then(|| {
		let rows = detail
			.properties
			.iter()
			.map(|(k, v)| view! { <dt>{k.clone()}</dt> <dd>{v.clone()}</dd> })
			.collect_view();
		view! {
			<h4>"Properties"</h4>
			<dl class="cg-detail-grid">{rows}</dl>
		}
	});

	view! {
		<div class="cg-modal-backdrop" on:click=move |_| on_close.run(())>
			<div class="cg-modal cg-proposal-detail" on:click=move |evt: ev::MouseEvent| evt.stop_propagation()>
				<div class="cg-row">
					<h2>{detail.heading.clone()}</h2>
					<button class="cg-icon-button" on:click=move |_| on_close.run(())>"✕"</button>
				</div>
				<p class="cg-muted cg-small">"Complete information about this contribution"</p>
				<h4>"Basic Information"</h4>
				<dl class="cg-detail-grid">
					<dt>"Proposal Type"</dt>
					<dd>{proposal.proposal_type.as_str()}</dd>
					<dt>"Status"</dt>
					<dd><span class=status_class(proposal.status)>{proposal.status.as_str()}</span></dd>
					<dt>"Created At"</dt>
					<dd>{detail.created.clone()}</dd>
					<dt>"Username"</dt>
					<dd>{detail.username.clone()}</dd>
				</dl>
				{element}
				{properties}
				<h4>"Voting Information"</h4>
				<VoteButtons
					proposal_key=proposal.key.clone()
					upvotes=proposal.upvotes
					downvotes=proposal.downvotes
					board=board
					on_vote=on_vote
				/>
			</div>
		</div>
	}
}

/// Proposal list: the newest few inline, everything behind "View all".
#[component]
pub fn ContributionQueue(
	#[prop(into)] board: Signal<VoteBoard>,
	/// Graph used to name the endpoints of edge proposals.
	#[prop(into)]
	graph: Signal<GraphSnapshot>,
	/// A vote button was clicked with this value.
	#[prop(into)]
	on_vote: Callback<(ProposalKey, VoteValue)>,
) -> impl IntoView {
	let show_all = RwSignal::new(false);
	let filter = RwSignal::new(QueueFilter::default());
	let reviewing = RwSignal::new(None::<ProposalKey>);
	let summaries = Memo::new(move |_| board.with(|b| b.proposals.newest_first()));
	// Looked up live so the modal follows vote counts after a refresh.
	let reviewed = Memo::new(move |_| {
		let key = reviewing.get()?;
		summaries.with(|s| s.iter().find(|p| p.key == key).cloned())
	});
	let on_review = Callback::new(move |key: ProposalKey| reviewing.set(Some(key)));

	let entries = move |list: Vec<ProposalSummary>| {
		list.into_iter()
			.map(|proposal| {
				view! { <ProposalEntry proposal=proposal board=board on_vote=on_vote on_review=on_review /> }
			})
			.collect_view()
	};

	let recent = move || {
		let list: Vec<ProposalSummary> = summaries.with(|s| s.iter().take(COLLAPSED_LIMIT).cloned().collect());
		if list.is_empty() {
			view! { <p class="cg-muted cg-center">"No contributions yet"</p> }.into_any()
		} else {
			view! { <ul class="cg-proposals">{entries(list)}</ul> }.into_any()
		}
	};

	let full = move || {
		let list = summaries.with(|s| filter.get().apply(s));
		if list.is_empty() {
			view! { <p class="cg-muted cg-center">"No contributions found"</p> }.into_any()
		} else {
			view! { <ul class="cg-proposals">{entries(list)}</ul> }.into_any()
		}
	};

	let detail = move || {
		reviewed.get().map(|proposal| {
			view! {
				<ProposalDetailModal
					proposal=proposal
					graph=graph
					board=board
					on_vote=on_vote
					on_close=Callback::new(move |_| reviewing.set(None))
				/>
			}
		})
	};

	let sort_options: Vec<(&'static str, &'static str)> =
		QueueSort::ALL.into_iter().map(|s| (s.as_str(), s.title())).collect();

	view! {
		<section class="cg-card cg-queue">
			<div class="cg-row">
				<h3>"Contributions"</h3>
				<Show when=move || summaries.with(|s| shows_view_all(s.len()))>
					<button class="cg-link" on:click=move |_| show_all.set(true)>"View all"</button>
				</Show>
			</div>
			{recent}
			<Show when=move || show_all.get()>
				<div class="cg-modal-backdrop" on:click=move |_| show_all.set(false)>
					<div class="cg-modal cg-queue-all" on:click=move |evt: ev::MouseEvent| evt.stop_propagation()>
						<div class="cg-row">
							<h2>"All Contributions"</h2>
							<button class="cg-icon-button" on:click=move |_| show_all.set(false)>"✕"</button>
						</div>
						<div class="cg-row cg-filters">
							<FilterSelect
								options=STATUS_OPTIONS.to_vec()
								current=Signal::derive(move || filter.with(QueueFilter::status_value))
								on_pick=move |v: String| filter.update(|f| f.status = parse_status(&v))
							/>
							<FilterSelect
								options=KIND_OPTIONS.to_vec()
								current=Signal::derive(move || filter.with(QueueFilter::kind_value))
								on_pick=move |v: String| filter.update(|f| f.kind = parse_kind(&v))
							/>
							<FilterSelect
								options=ACTION_OPTIONS.to_vec()
								current=Signal::derive(move || filter.with(QueueFilter::action_value))
								on_pick=move |v: String| filter.update(|f| f.action = parse_action(&v))
							/>
							<FilterSelect
								options=sort_options.clone()
								current=Signal::derive(move || filter.with(|f| f.sort.as_str()))
								on_pick=move |v: String| filter.update(|f| f.sort = QueueSort::parse(&v))
							/>
						</div>
						{full}
					</div>
				</div>
			</Show>
			{detail}
		</section>
	}
}
