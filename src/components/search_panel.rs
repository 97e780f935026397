//! Search box, scope tabs, and the result list of the expanded graph view.

use leptos::ev;
use leptos::prelude::*;

use super::force_graph::search::{search, visible_hits};
use super::force_graph::{DisplayGraph, GraphMetrics, MatchType, SearchHit, SearchScope, Selection};
use crate::api::ElementKind;

/// Index of the list entry to highlight: the current selection if listed,
/// otherwise the first hit.
fn highlighted(hits: &[SearchHit], selection: Option<&Selection>) -> Option<usize> {
	if hits.is_empty() {
		return None;
	}
	selection
		.and_then(|s| hits.iter().position(|h| &h.selection == s))
		.or(Some(0))
}

#[component]
pub fn SearchPanel(
	#[prop(into)] graph: Signal<DisplayGraph>,
	#[prop(into)] metrics: Signal<GraphMetrics>,
	#[prop(into)] selection: Signal<Option<Selection>>,
	/// A result was chosen.
	#[prop(into)]
	on_navigate: Callback<Selection>,
	/// The query was emptied or the scope changed.
	#[prop(into)]
	on_clear: Callback<()>,
) -> impl IntoView {
	let query = RwSignal::new(String::new());
	let scope = RwSignal::new(SearchScope::All);
	let hits = Memo::new(move |_| graph.with(|g| search(g, &query.get(), scope.get())));

	let on_input = move |evt: ev::Event| {
		let value = event_target_value(&evt);
		let cleared = value.trim().is_empty();
		query.set(value);
		if cleared {
			on_clear.run(());
		}
	};

	let tabs = move || {
		SearchScope::ALL
			.into_iter()
			.map(|tab| {
				let class = move || {
					if scope.get() == tab {
						"cg-tab cg-tab-active"
					} else {
						"cg-tab"
					}
				};
				view! {
					<button
						class=class
						on:click=move |_| {
							scope.set(tab);
							on_clear.run(());
						}
					>
						{tab.title()}
					</button>
				}
			})
			.collect_view()
	};

	let results = move || {
		let hits = hits.get();
		let limit = metrics.get().search_limit;
		let selected = selection.get();
		let active = highlighted(&hits, selected.as_ref());
		let (shown, more) = visible_hits(&hits, limit);
		let items = shown
			.iter()
			.cloned()
			.enumerate()
			.map(|(index, hit)| {
				let class = if Some(index) == active {
					"cg-result cg-result-active"
				} else {
					"cg-result"
				};
				let marker = match hit.selection.kind {
					ElementKind::Node => "●",
					ElementKind::Edge => "→",
				};
				let id_match = (hit.match_type == MatchType::Id)
					.then(|| view! { <span class="cg-muted cg-small">"ID"</span> });
				let target = hit.selection.clone();
				view! {
					<button class=class on:click=move |_| on_navigate.run(target.clone())>
						<span class="cg-result-marker">{marker}</span>
						<span class="cg-result-label">{hit.label}</span>
						{id_match}
					</button>
				}
			})
			.collect_view();
		let overflow = (more > 0).then(|| view! { <div class="cg-muted cg-center">{format!("+{} more", more)}</div> });
		(!hits.is_empty()).then(|| {
			view! {
				<div class="cg-results">
					{items}
					{overflow}
				</div>
			}
		})
	};

	let empty_state = move || {
		let searching = !query.get().trim().is_empty();
		(searching && hits.with(Vec::is_empty))
			.then(|| view! { <div class="cg-muted cg-center">{scope.get().empty_message()}</div> })
	};

	view! {
		<div class="cg-search-panel">
			<input
				type="text"
				class="cg-input"
				placeholder="Search nodes & edges..."
				prop:value=move || query.get()
				on:input=on_input
			/>
			<div class="cg-tabs">{tabs}</div>
			{results}
			{empty_state}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn hit(id: &str) -> SearchHit {
		SearchHit {
			selection: Selection::node(id),
			label: id.to_uppercase(),
			match_type: MatchType::Label,
		}
	}

	#[test]
	fn first_hit_is_preselected() {
		let hits = [hit("a"), hit("b")];
		assert_eq!(highlighted(&hits, None), Some(0));
		assert_eq!(highlighted(&hits, Some(&Selection::node("zz"))), Some(0));
	}

	#[test]
	fn current_selection_wins() {
		let hits = [hit("a"), hit("b")];
		assert_eq!(highlighted(&hits, Some(&Selection::node("b"))), Some(1));
		assert_eq!(highlighted(&[], Some(&Selection::node("b"))), None);
	}
}
