//! Details of the selected node or edge, its action menu, and the delete
//! confirmation dialog.

use leptos::ev;
use leptos::prelude::*;

use super::force_graph::adapter::Detail;
use super::force_graph::{DisplayGraph, InfoPanel, PanelEvent, Selection};
use crate::api::ElementKind;

/// What the panel shows for one selection.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelContent {
	pub title: String,
	pub type_name: String,
	pub id: String,
	pub details: Vec<Detail>,
}

impl PanelContent {
	/// `None` when the selected element is no longer in the graph.
	pub fn for_selection(graph: &DisplayGraph, selection: &Selection) -> Option<Self> {
		match selection.kind {
			ElementKind::Node => graph.node(&selection.id).map(|node| Self {
				title: node.label.clone(),
				type_name: node
					.group
					.clone()
					.unwrap_or_else(|| ElementKind::Node.title().to_string()),
				id: node.id.clone(),
				details: node.details.clone(),
			}),
			ElementKind::Edge => graph.link(&selection.id).map(|link| Self {
				title: link.label.clone(),
				type_name: ElementKind::Edge.title().to_string(),
				id: link.id.clone(),
				details: link.details.clone(),
			}),
		}
	}
}

pub fn delete_prompt(kind: ElementKind) -> String {
	format!(
		"Are you sure you want to delete this {}? This will create a DELETE proposal.",
		kind.as_str()
	)
}

/// Modal yes/no prompt. Clicking the backdrop cancels.
#[component]
pub fn ConfirmDialog(
	#[prop(into)] title: String,
	#[prop(into)] message: String,
	#[prop(into)] confirm_label: String,
	#[prop(into)] on_confirm: Callback<()>,
	#[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
	view! {
		<div class="cg-modal-backdrop" on:click=move |_| on_cancel.run(())>
			<div class="cg-modal cg-confirm" on:click=move |evt: ev::MouseEvent| evt.stop_propagation()>
				<h2>{title}</h2>
				<p class="cg-muted">{message}</p>
				<div class="cg-row">
					<button class="cg-button" on:click=move |_| on_cancel.run(())>
						"Cancel"
					</button>
					<button class="cg-button cg-danger" on:click=move |_| on_confirm.run(())>
						{confirm_label}
					</button>
				</div>
			</div>
		</div>
	}
}

/// The floating details card. Hidden while the panel is closed.
#[component]
pub fn InfoPanelView(
	#[prop(into)] panel: Signal<InfoPanel>,
	#[prop(into)] graph: Signal<DisplayGraph>,
	#[prop(into)] on_event: Callback<PanelEvent>,
) -> impl IntoView {
	let content = Memo::new(move |_| {
		let panel = panel.get();
		let selection = panel.selection()?;
		graph.with(|g| PanelContent::for_selection(g, selection))
	});

	let card = move || {
		content.get().map(|content| {
			let details = if content.details.is_empty() {
				view! { <div class="cg-muted cg-italic">"No properties"</div> }.into_any()
			} else {
				content
					.details
					.into_iter()
					.map(|d| {
						view! {
							<div class="cg-detail">
								<strong>{format!("{}:", d.key)}</strong>
								<span class="cg-muted">{d.value.to_string()}</span>
							</div>
						}
					})
					.collect_view()
					.into_any()
			};

			view! {
				<div class="cg-info-panel">
					<div class="cg-info-header">
						<div class="cg-menu">
							<button
								class="cg-icon-button"
								title="Actions"
								on:click=move |_| on_event.run(PanelEvent::ToggleMenu)
							>
								"⋮"
							</button>
							<Show when=move || panel.get().menu_open()>
								<div class="cg-menu-dropdown">
									<button on:click=move |_| on_event.run(PanelEvent::Edit)>"Edit"</button>
									<button class="cg-danger-text" on:click=move |_| on_event.run(PanelEvent::Delete)>
										"Delete"
									</button>
								</div>
							</Show>
						</div>
						<div class="cg-info-title">{content.title}</div>
						<button
							class="cg-icon-button"
							title="Close"
							on:click=move |_| on_event.run(PanelEvent::Close)
						>
							"✕"
						</button>
					</div>
					<div class="cg-muted">
						<span class="cg-strong">"Type:"</span>
						" "
						{content.type_name}
					</div>
					<div class="cg-muted">
						<span class="cg-strong">"ID:"</span>
						" "
						<span class="cg-mono">{content.id}</span>
					</div>
					<hr />
					{details}
				</div>
			}
		})
	};

	let confirm = move || {
		let panel = panel.get();
		let selection = panel.selection()?.clone();
		panel.confirming_delete().then(|| {
			view! {
				<ConfirmDialog
					title=format!("Delete {}", selection.kind.title())
					message=delete_prompt(selection.kind)
					confirm_label="Delete"
					on_confirm=move |_| on_event.run(PanelEvent::ConfirmDelete)
					on_cancel=move |_| on_event.run(PanelEvent::CancelDelete)
				/>
			}
		})
	};

	view! {
		{card}
		{confirm}
	}
}
