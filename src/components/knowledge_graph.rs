//! The graph widget: canvas, info panel, search panel, and view controls.
//!
//! Used inline on the dashboard and again, with `expanded`, inside the
//! full-screen overlay. Only the expanded presentation carries the search
//! panel.

use leptos::ev;
use leptos::prelude::*;

use super::force_graph::{
	ForceGraphCanvas, GraphMetrics, InfoPanel, PanelEffect, PanelEvent, Selection, ViewCommand,
	adapt,
};
use super::info_panel::InfoPanelView;
use super::search_panel::SearchPanel;
use crate::api::GraphSnapshot;
use crate::theme::use_theme;

/// Width assumed until the canvas has measured itself.
const INITIAL_WIDTH: f64 = 800.0;

#[component]
pub fn KnowledgeGraph(
	#[prop(into)] graph: Signal<GraphSnapshot>,
	/// Edit chosen from the info panel menu.
	#[prop(into)]
	on_edit: Callback<Selection>,
	/// Delete confirmed in the info panel.
	#[prop(into)]
	on_delete: Callback<Selection>,
	#[prop(optional, into)] on_expand: Option<Callback<()>>,
	#[prop(default = false)] expanded: bool,
) -> impl IntoView {
	let theme = use_theme();
	let metrics = RwSignal::new(GraphMetrics::for_width(INITIAL_WIDTH));
	let panel = RwSignal::new(InfoPanel::default());
	let zoomed_in = RwSignal::new(false);
	let command = RwSignal::new(None::<ViewCommand>);

	let palette = Signal::derive(move || theme.get().palette);
	let display = Memo::new(move |_| {
		graph.with(|g| adapt(g, &theme.get().palette, &metrics.get()))
	});
	let selection = Signal::derive(move || panel.with(|p| p.selection().cloned()));

	let apply = move |event: PanelEvent| {
		match panel.try_update(|p| p.apply(event)).flatten() {
			Some(PanelEffect::OpenEditor(target)) => on_edit.run(target),
			Some(PanelEffect::Delete(target)) => on_delete.run(target),
			None => {}
		}
	};

	let on_pick = Callback::new(move |picked: Option<Selection>| {
		apply(match picked {
			Some(target) => PanelEvent::Pick(target),
			None => PanelEvent::BackgroundClick,
		});
	});

	let on_navigate = Callback::new(move |target: Selection| {
		apply(PanelEvent::Pick(target.clone()));
		command.set(Some(ViewCommand::Focus(target)));
	});

	let toggle_zoom = move |_: ev::MouseEvent| {
		let zoom_in = !zoomed_in.get_untracked();
		zoomed_in.set(zoom_in);
		command.set(Some(if zoom_in {
			ViewCommand::ZoomIn
		} else {
			ViewCommand::Fit
		}));
	};

	let search = expanded.then(|| {
		view! {
			<SearchPanel
				graph=display
				metrics=metrics
				selection=selection
				on_navigate=on_navigate
				on_clear=move |_| apply(PanelEvent::Close)
			/>
		}
	});

	let expand_button = on_expand.filter(|_| !expanded).map(|on_expand| {
		view! {
			<button
				class="cg-fab cg-fab-right"
				title="Expand Knowledge Graph"
				on:click=move |_| on_expand.run(())
			>
				"⤢"
			</button>
		}
	});

	let hint = move || {
		(!expanded && metrics.get().is_small())
			.then(|| view! { <div class="cg-hint">"Click nodes to explore"</div> })
	};

	view! {
		<div class=if expanded { "cg-graph cg-graph-expanded" } else { "cg-graph" }>
			<div class="cg-graph-canvas">
				<ForceGraphCanvas
					data=display
					palette=palette
					selection=selection
					zoomed_in=zoomed_in
					command=command
					metrics=metrics
					on_pick=on_pick
					expanded=expanded
				/>
			</div>
			{search}
			<InfoPanelView panel=panel graph=display on_event=move |event| apply(event) />
			<div class="cg-controls">
				<button
					class="cg-fab"
					title=move || if zoomed_in.get() { "Zoom Out" } else { "Zoom In at Center" }
					on:click=toggle_zoom
				>
					{move || if zoomed_in.get() { "−" } else { "+" }}
				</button>
			</div>
			{expand_button}
			{hint}
		</div>
	}
}
