//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use crowdgraph::{App, AppConfig, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging(AppConfig::load().level());

	mount_to_body(|| {
		view! { <App /> }
	})
}
