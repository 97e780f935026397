//! Canvas rendering for the force graph.
//!
//! Drawing happens in two world-space passes so nodes sit on top:
//! 1. Links: selection highlight underneath, the line, then the midpoint label
//! 2. Nodes: fill, selection ring, outline, then the name label

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::{GraphMetrics, ScaledValues};
use super::selection::Selection;
use super::state::ForceGraphState;
use crate::api::ElementKind;
use crate::theme::Palette;

const RING_ALPHA: f64 = 0x99 as f64 / 255.0;
const OUTLINE_ALPHA: f64 = 0x44 as f64 / 255.0;
const LINK_HIGHLIGHT_ALPHA: f64 = 0x66 as f64 / 255.0;

/// Per-frame view flags that affect drawing but not layout.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
	pub selection: Option<Selection>,
	pub zoomed_in: bool,
	pub expanded: bool,
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	metrics: &GraphMetrics,
	palette: &Palette,
	options: &RenderOptions,
) {
	let scale = ScaledValues::new(metrics, state.transform.k);

	ctx.set_fill_style_str(&palette.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_links(state, ctx, &scale, palette, options);
	draw_nodes(state, ctx, metrics, &scale, palette, options);

	ctx.restore();
}

fn is_selected(options: &RenderOptions, kind: ElementKind, id: &str) -> bool {
	options
		.selection
		.as_ref()
		.is_some_and(|s| s.is(kind, id))
}

fn draw_links(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	palette: &Palette,
	options: &RenderOptions,
) {
	let show_labels = options.expanded || options.zoomed_in;
	let highlight = palette.primary.with_alpha(LINK_HIGHLIGHT_ALPHA).to_css();

	for (link, (x1, y1), (x2, y2)) in state.link_segments() {
		if is_selected(options, ElementKind::Edge, &link.id) {
			ctx.set_stroke_style_str(&highlight);
			ctx.set_line_width(scale.link_highlight_width);
			ctx.begin_path();
			ctx.move_to(x1, y1);
			ctx.line_to(x2, y2);
			ctx.stroke();
		}

		ctx.set_stroke_style_str(&link.color.to_css());
		ctx.set_line_width(link.width / scale.k);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();

		if show_labels && !link.label.is_empty() {
			ctx.set_font(&scale.edge_label_font);
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			ctx.set_fill_style_str(&palette.text.to_css());
			let _ = ctx.fill_text(&link.label, (x1 + x2) / 2.0, (y1 + y2) / 2.0);
		}
	}
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	metrics: &GraphMetrics,
	scale: &ScaledValues,
	palette: &Palette,
	options: &RenderOptions,
) {
	let show_labels = metrics.show_node_labels(options.zoomed_in);
	let ring = palette.primary.with_alpha(RING_ALPHA).to_css();
	let outline = palette.primary.with_alpha(OUTLINE_ALPHA).to_css();
	let text = palette.text.to_css();

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		if !x.is_finite() || !y.is_finite() {
			return;
		}
		let info = &node.data.user_data;

		ctx.begin_path();
		let _ = ctx.arc(x, y, scale.node_radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color.to_css());
		ctx.fill();

		if is_selected(options, ElementKind::Node, &info.id) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, scale.ring_radius, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&ring);
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, scale.node_radius, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&outline);
		ctx.set_line_width(scale.outline_width);
		ctx.stroke();

		if show_labels {
			ctx.set_font(&scale.label_font);
			ctx.set_text_align("left");
			ctx.set_text_baseline("middle");
			ctx.set_fill_style_str(&text);
			let _ = ctx.fill_text(
				&metrics.node_label(&info.label),
				x + scale.label_offset,
				y + scale.label_offset,
			);
		}
	});
}
