//! Force-directed graph visualization component.
//!
//! Renders an interactive force-directed graph on an HTML canvas with:
//! - Physics-based node positioning with a finite cooldown
//! - Pan, zoom, node dragging, and click-to-select
//! - Animated camera moves for search navigation and zoom toggling
//! - Viewport-size-dependent layout and drawing metrics
//!
//! # Example
//!
//! ```ignore
//! let display = Memo::new(move |_| adapt(&graph.get(), &theme.get().palette, &metrics.get()));
//!
//! view! {
//!     <ForceGraphCanvas
//!         data=display
//!         palette=palette
//!         selection=selection
//!         zoomed_in=zoomed_in
//!         command=command
//!         metrics=metrics
//!         on_pick=move |picked| panel.update(|p| { p.apply(pick_event(picked)); })
//!     />
//! }
//! ```

pub mod adapter;
mod component;
mod render;
pub mod scale;
pub mod search;
pub mod selection;
mod state;

pub use adapter::{DisplayGraph, DisplayLink, DisplayNode, adapt};
pub use component::{ForceGraphCanvas, ViewCommand};
pub use scale::GraphMetrics;
pub use search::{MatchType, SearchHit, SearchScope};
pub use selection::{InfoPanel, PanelEffect, PanelEvent, Selection};
