//! Structured create/update form for node and edge proposals.
//!
//! The form edits a [`ProposalDraft`] held by the caller; validation and
//! submission happen there.

use leptos::ev;
use leptos::prelude::*;

use crate::api::{ElementKind, GraphSnapshot, PropertyKind, ProposalType};
use crate::proposals::{PropertyRow, ProposalDraft};

pub fn editor_title(kind: ElementKind, proposal_type: ProposalType) -> String {
	match proposal_type {
		ProposalType::Create => "Add Node / Edge".to_string(),
		_ => format!("Edit {}", kind.title()),
	}
}

pub fn editor_description(kind: ElementKind, proposal_type: ProposalType) -> String {
	match proposal_type {
		ProposalType::Create => {
			"Propose a new node or edge to contribute to this knowledge graph.".to_string()
		}
		_ => format!("Update the information of this {}.", kind.as_str()),
	}
}

pub fn submit_label(kind: ElementKind, proposal_type: ProposalType) -> String {
	match proposal_type {
		ProposalType::Create => format!("Add {}", kind.title()),
		_ => "Propose Update".to_string(),
	}
}

fn edit(draft: RwSignal<Option<ProposalDraft>>, f: impl FnOnce(&mut ProposalDraft)) {
	draft.update(|d| {
		if let Some(d) = d.as_mut() {
			f(d);
		}
	});
}

fn edit_row(draft: RwSignal<Option<ProposalDraft>>, index: usize, f: impl FnOnce(&mut PropertyRow)) {
	edit(draft, |d| {
		if let Some(row) = d.properties.get_mut(index) {
			f(row);
		}
	});
}

fn read<T: Default>(draft: RwSignal<Option<ProposalDraft>>, f: impl FnOnce(&ProposalDraft) -> T) -> T {
	draft.with(|d| d.as_ref().map(f).unwrap_or_default())
}

/// Select value of the row at `index`; rows shift down after a removal.
fn row_kind(draft: &ProposalDraft, index: usize) -> &'static str {
	draft
		.properties
		.get(index)
		.map(|r| r.kind.as_str())
		.unwrap_or_default()
}

#[component]
fn PropertyRows(draft: RwSignal<Option<ProposalDraft>>) -> impl IntoView {
	// Rows are rebuilt only when their count changes so inputs keep focus.
	let count = Memo::new(move |_| read(draft, |d| d.properties.len()));

	let rows = move || {
		(0..count.get())
			.map(|i| {
				let kind_options = PropertyKind::ALL
					.into_iter()
					.map(|kind| {
						view! {
							<option
								value=kind.as_str()
								selected=move || read(draft, |d| d.properties.get(i).map(|r| r.kind)) == Some(kind)
							>
								{kind.as_str()}
							</option>
						}
					})
					.collect_view();
				view! {
					<div class="cg-row cg-property-row">
						<input
							class="cg-input"
							placeholder="Key"
							prop:value=move || read(draft, |d| d.properties.get(i).map(|r| r.key.clone()).unwrap_or_default())
							on:input=move |evt: ev::Event| {
								let value = event_target_value(&evt);
								edit_row(draft, i, |r| r.key = value);
							}
						/>
						<input
							class="cg-input"
							placeholder="Value"
							prop:value=move || read(draft, |d| d.properties.get(i).map(|r| r.value.clone()).unwrap_or_default())
							on:input=move |evt: ev::Event| {
								let value = event_target_value(&evt);
								edit_row(draft, i, |r| r.value = value);
							}
						/>
						<select
							class="cg-input"
							prop:value=move || read(draft, |d| row_kind(d, i))
							on:change=move |evt: ev::Event| {
								let kind = PropertyKind::from_str_lossy(&event_target_value(&evt));
								edit_row(draft, i, |r| r.kind = kind);
							}
						>
							{kind_options}
						</select>
						<button
							class="cg-icon-button"
							title="Remove property"
							on:click=move |_| edit(draft, |d| d.remove_row(i))
						>
							"✕"
						</button>
					</div>
				}
			})
			.collect_view()
	};

	view! {
		<div class="cg-properties">
			{rows}
			<button class="cg-link" on:click=move |_| edit(draft, ProposalDraft::add_row)>
				"+ Add Property"
			</button>
		</div>
	}
}

#[component]
fn NodeFields(draft: RwSignal<Option<ProposalDraft>>) -> impl IntoView {
	view! {
		<input
			class="cg-input"
			placeholder="Node Name (required)"
			prop:value=move || read(draft, |d| d.name.clone())
			on:input=move |evt: ev::Event| {
				let value = event_target_value(&evt);
				edit(draft, |d| d.name = value);
			}
		/>
		<input
			class="cg-input"
			placeholder="Labels (comma separated)"
			prop:value=move || read(draft, |d| d.labels.clone())
			on:input=move |evt: ev::Event| {
				let value = event_target_value(&evt);
				edit(draft, |d| d.labels = value);
			}
		/>
	}
}

#[component]
fn EdgeFields(draft: RwSignal<Option<ProposalDraft>>, graph: Signal<GraphSnapshot>) -> impl IntoView {
	let choices = Memo::new(move |_| {
		graph.with(|g| {
			g.nodes
				.iter()
				.map(|n| (n.id.clone(), if n.name.is_empty() { n.id.clone() } else { n.name.clone() }))
				.collect::<Vec<_>>()
		})
	});

	let node_select = move |placeholder: &'static str, is_source: bool| {
		let current = move || {
			read(draft, |d| {
				if is_source {
					d.source_id.clone()
				} else {
					d.target_id.clone()
				}
			})
		};
		let options = move || {
			choices
				.get()
				.into_iter()
				.map(|(id, name)| {
					let selected_id = id.clone();
					view! { <option value=id selected=move || current() == selected_id>{name}</option> }
				})
				.collect_view()
		};
		view! {
			<select
				class="cg-input"
				on:change=move |evt: ev::Event| {
					let value = event_target_value(&evt);
					edit(draft, |d| {
						if is_source {
							d.source_id = value;
						} else {
							d.target_id = value;
						}
					});
				}
			>
				<option value="" selected=move || current().is_empty()>{placeholder}</option>
				{options}
			</select>
		}
	};

	view! {
		{node_select("Select source node...", true)}
		{node_select("Select target node...", false)}
		<input
			class="cg-input"
			placeholder="Edge Type (required)"
			prop:value=move || read(draft, |d| d.edge_type.clone())
			on:input=move |evt: ev::Event| {
				let value = event_target_value(&evt);
				edit(draft, |d| d.edge_type = value);
			}
		/>
	}
}

/// Modal form, shown while `draft` is `Some`. Closing sets it back to `None`.
#[component]
pub fn ProposalEditor(
	draft: RwSignal<Option<ProposalDraft>>,
	#[prop(into)] graph: Signal<GraphSnapshot>,
	#[prop(into)] submitting: Signal<bool>,
	#[prop(into)] on_submit: Callback<ProposalDraft>,
) -> impl IntoView {
	let mode = Memo::new(move |_| draft.with(|d| d.as_ref().map(|d| (d.kind, d.proposal_type))));

	let close = move || draft.set(None);
	let submit = move |_: ev::MouseEvent| {
		if let Some(current) = draft.get_untracked() {
			on_submit.run(current);
		}
	};

	let form = move || {
		mode.get().map(|(kind, proposal_type)| {
			let tabs = (proposal_type == ProposalType::Create).then(|| {
				[ElementKind::Node, ElementKind::Edge]
					.into_iter()
					.map(|tab| {
						let class = if tab == kind { "cg-tab cg-tab-active" } else { "cg-tab" };
						view! {
							<button class=class on:click=move |_| draft.set(Some(ProposalDraft::create(tab)))>
								{tab.title()}
							</button>
						}
					})
					.collect_view()
			});
			let fields = match kind {
				ElementKind::Node => view! { <NodeFields draft=draft /> }.into_any(),
				ElementKind::Edge => view! { <EdgeFields draft=draft graph=graph /> }.into_any(),
			};
			view! {
				<div class="cg-modal-backdrop" on:click=move |_| close()>
					<div class="cg-modal cg-editor" on:click=move |evt: ev::MouseEvent| evt.stop_propagation()>
						<div class="cg-row">
							<h2>{editor_title(kind, proposal_type)}</h2>
							<button class="cg-icon-button" on:click=move |_| close()>"✕"</button>
						</div>
						<p class="cg-muted">{editor_description(kind, proposal_type)}</p>
						<div class="cg-tabs">{tabs}</div>
						<div class="cg-form">
							{fields}
							<PropertyRows draft=draft />
						</div>
						<button
							class="cg-button cg-primary cg-wide"
							disabled=move || submitting.get()
							on:click=submit
						>
							{submit_label(kind, proposal_type)}
						</button>
					</div>
				</div>
			}
		})
	};

	view! { {form} }
}
