//! Natural-language question box for the community graph.

use leptos::ev;
use leptos::prelude::*;

/// The trimmed question, or `None` when there is nothing to ask.
pub fn normalize_question(input: &str) -> Option<String> {
	let question = input.trim();
	(!question.is_empty()).then(|| question.to_string())
}

/// Whether a key press submits: Enter, and only while no question is pending.
fn submits(key: &str, busy: bool) -> bool {
	key == "Enter" && !busy
}

#[component]
pub fn QueryBar(
	#[prop(into)] busy: Signal<bool>,
	/// Answer text of the active query result, if any.
	#[prop(into)]
	answer: Signal<Option<String>>,
	#[prop(into)] on_query: Callback<String>,
	/// Drop the query result and show the community graph again.
	#[prop(into)]
	on_clear: Callback<()>,
) -> impl IntoView {
	let text = RwSignal::new(String::new());

	let submit = move || {
		match normalize_question(&text.get_untracked()) {
			Some(question) => on_query.run(question),
			None => on_clear.run(()),
		}
	};

	let on_keydown = move |evt: ev::KeyboardEvent| {
		if evt.key() != "Enter" {
			return;
		}
		evt.prevent_default();
		if submits(&evt.key(), busy.get_untracked()) {
			submit();
		}
	};

	let result = move || {
		answer.get().map(|answer| {
			view! {
				<div class="cg-answer">
					<p>{answer}</p>
					<button
						class="cg-link"
						on:click=move |_| {
							text.set(String::new());
							on_clear.run(());
						}
					>
						"Clear"
					</button>
				</div>
			}
		})
	};

	view! {
		<div class="cg-query">
			<div class="cg-row">
				<input
					type="search"
					class="cg-input"
					placeholder="Search Query"
					prop:value=move || text.get()
					on:input=move |evt: ev::Event| text.set(event_target_value(&evt))
					on:keydown=on_keydown
				/>
				<button class="cg-button cg-primary" disabled=move || busy.get() on:click=move |_| submit()>
					"Ask"
				</button>
			</div>
			{result}
		</div>
	}
}
