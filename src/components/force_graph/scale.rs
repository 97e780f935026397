//! Viewport size classes and zoom-dependent drawing metrics.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: simulation coordinates. The canvas transform scales
//!   them by the zoom factor `k`.
//! - **Screen-space**: canvas pixels. A screen-constant size is drawn in world
//!   space as `size / k`.
//!
//! [`GraphMetrics`] holds the screen-space constants for a size class;
//! [`ScaledValues`] converts them to world space once per frame.

/// Widths below this are the "small" class.
pub const SMALL_BREAKPOINT: f64 = 500.0;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 40.0;

/// Labels longer than this are truncated on small viewports.
const LABEL_TRUNCATE_AT: usize = 10;
const LABEL_KEEP: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportClass {
	Small,
	Large,
}

impl ViewportClass {
	pub fn from_width(width: f64) -> Self {
		if width < SMALL_BREAKPOINT {
			ViewportClass::Small
		} else {
			ViewportClass::Large
		}
	}

	pub fn is_small(self) -> bool {
		self == ViewportClass::Small
	}
}

/// Screen-space constants and physics tuning for one size class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphMetrics {
	pub class: ViewportClass,
	/// Node radius in pixels.
	pub node_size: f64,
	pub link_width: f64,
	/// Rest length of a link in world units.
	pub link_distance: f64,
	/// Repulsion magnitude between nodes.
	pub charge: f64,
	pub label_font: f64,
	pub edge_label_font: f64,
	/// Zoom used when navigating to a search result.
	pub focus_zoom: f64,
	/// Zoom used by the zoom-in toggle.
	pub toggle_zoom: f64,
	pub fit_duration_ms: f64,
	pub fit_padding: f64,
	/// Search results shown before "+N more".
	pub search_limit: usize,
}

impl GraphMetrics {
	pub fn for_class(class: ViewportClass) -> Self {
		match class {
			ViewportClass::Small => Self {
				class,
				node_size: 6.0,
				link_width: 1.0,
				link_distance: 100.0,
				charge: 80.0,
				label_font: 8.0,
				edge_label_font: 6.0,
				focus_zoom: 8.0,
				toggle_zoom: 12.0,
				fit_duration_ms: 300.0,
				fit_padding: 50.0,
				search_limit: 3,
			},
			ViewportClass::Large => Self {
				class,
				node_size: 10.0,
				link_width: 2.0,
				link_distance: 150.0,
				charge: 150.0,
				label_font: 11.0,
				edge_label_font: 9.0,
				focus_zoom: 12.0,
				toggle_zoom: 16.0,
				fit_duration_ms: 400.0,
				fit_padding: 100.0,
				search_limit: 5,
			},
		}
	}

	pub fn for_width(width: f64) -> Self {
		Self::for_class(ViewportClass::from_width(width))
	}

	pub fn is_small(&self) -> bool {
		self.class.is_small()
	}

	/// Node labels are drawn on large viewports, or on small ones once zoomed in.
	pub fn show_node_labels(&self, zoomed_in: bool) -> bool {
		!self.is_small() || zoomed_in
	}

	/// Text drawn next to a node.
	pub fn node_label(&self, label: &str) -> String {
		if self.is_small() && label.chars().count() > LABEL_TRUNCATE_AT {
			let head: String = label.chars().take(LABEL_KEEP).collect();
			format!("{}...", head)
		} else {
			label.to_string()
		}
	}
}

/// Pre-computed world-space values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering and hit-testing.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledValues {
	pub k: f64,
	pub node_radius: f64,
	/// Selection ring radius.
	pub ring_radius: f64,
	pub ring_width: f64,
	pub outline_width: f64,
	pub link_width: f64,
	/// Width of the highlight drawn under a selected link.
	pub link_highlight_width: f64,
	/// Extra pick tolerance around a link.
	pub link_hit_slop: f64,
	pub label_font: String,
	pub edge_label_font: String,
	pub label_offset: f64,
}

impl ScaledValues {
	pub fn new(metrics: &GraphMetrics, k: f64) -> Self {
		let k = if k > 0.0 { k } else { 1.0 };
		let node_radius = metrics.node_size / k;
		Self {
			k,
			node_radius,
			ring_radius: node_radius + 1.5 / k,
			ring_width: 2.5 / k,
			outline_width: 0.5 / k,
			link_width: metrics.link_width / k,
			link_highlight_width: metrics.link_width * 3.0 / k,
			link_hit_slop: 4.0 / k,
			label_font: format!("bold {}px sans-serif", metrics.label_font / k),
			edge_label_font: format!("{}px sans-serif", metrics.edge_label_font / k),
			label_offset: node_radius + 0.5,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn breakpoint_is_exclusive() {
		assert_eq!(ViewportClass::from_width(499.0), ViewportClass::Small);
		assert_eq!(ViewportClass::from_width(500.0), ViewportClass::Large);
	}

	#[test]
	fn small_class_is_denser() {
		let small = GraphMetrics::for_class(ViewportClass::Small);
		let large = GraphMetrics::for_class(ViewportClass::Large);
		assert!(small.link_distance < large.link_distance);
		assert!(small.charge < large.charge);
		assert_eq!(small.search_limit, 3);
		assert_eq!(large.search_limit, 5);
	}

	#[test]
	fn node_radius_is_screen_constant() {
		let metrics = GraphMetrics::for_class(ViewportClass::Large);
		let near = ScaledValues::new(&metrics, 4.0);
		let far = ScaledValues::new(&metrics, 1.0);
		assert_eq!(near.node_radius * near.k, far.node_radius * far.k);
		assert_eq!(near.node_radius, 2.5);
		assert_eq!(far.ring_radius, 11.5);
		assert_eq!(far.link_highlight_width, 6.0);
	}

	#[test]
	fn labels_truncate_only_when_small() {
		let small = GraphMetrics::for_class(ViewportClass::Small);
		let large = GraphMetrics::for_class(ViewportClass::Large);
		assert_eq!(small.node_label("Ark Location"), "Ark Loca...");
		assert_eq!(small.node_label("Ark"), "Ark");
		assert_eq!(small.node_label("0123456789"), "0123456789");
		assert_eq!(large.node_label("Ark Location"), "Ark Location");
	}

	#[test]
	fn label_visibility_rule() {
		let small = GraphMetrics::for_class(ViewportClass::Small);
		assert!(!small.show_node_labels(false));
		assert!(small.show_node_labels(true));
		assert!(GraphMetrics::for_class(ViewportClass::Large).show_node_labels(false));
	}
}
