//! crowdgraph: client for crowdsourced community knowledge graphs.
//!
//! Renders a community's graph with a force-directed layout, lets members
//! search and inspect it, and turns their edits into proposals that the
//! community votes on.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod config;
pub mod proposals;
pub mod theme;

pub use components::force_graph::{DisplayGraph, ForceGraphCanvas, adapt};
pub use config::AppConfig;

use api::ApiClient;
use components::{CommunityDashboard, NoticeStack, Notices};
use theme::provide_theme;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging(level: Level) {
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("crowdgraph: logging initialized at {}", level);
}

/// Main application component.
/// Reads the page configuration and renders the community dashboard.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::load();
	let client = ApiClient::from_config(&config);
	info!(
		"crowdgraph: api at {}, community {}",
		client.base_url(),
		config.community_id.as_deref().unwrap_or("<none>")
	);
	let theme = provide_theme(&config.theme);
	provide_context(client);
	provide_context(config);
	Notices::provide();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=move || if theme.get().is_dark() { "dark" } else { "light" } />
		<Title text="Community Knowledge Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="cg-app" style=move || theme.get().css_variables()>
			<CommunityDashboard />
			<NoticeStack />
		</div>
	}
}
