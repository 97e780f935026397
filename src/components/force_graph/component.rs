//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element sized to its parent and wires
//! up mouse/wheel handlers for clicking, node dragging, panning, and zooming.
//! An animation loop runs via `requestAnimationFrame`, stepping the simulation
//! and camera and redrawing each frame until the component is disposed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::adapter::DisplayGraph;
use super::render::{self, RenderOptions};
use super::scale::GraphMetrics;
use super::selection::Selection;
use super::state::{ForceGraphState, ForceParams, PointerOutcome};
use crate::theme::Palette;

/// Delay after a data or size change before forces are rebound and the view
/// is fitted.
const SETTLE_DELAY_MS: f64 = 600.0;
/// Camera move to a search result.
const FOCUS_DURATION_MS: f64 = 500.0;
const ZOOM_IN_DURATION_MS: f64 = 300.0;
/// Longest step fed to the simulation after a stalled frame.
const MAX_FRAME_MS: f64 = 50.0;
const DEFAULT_WIDTH: f64 = 800.0;
const DEFAULT_HEIGHT: f64 = 600.0;

/// Camera instructions from the surrounding UI.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewCommand {
	/// Center on a node, or an edge's midpoint, at the focus zoom.
	Focus(Selection),
	/// Center on the origin at the toggle zoom.
	ZoomIn,
	/// Fit every node in view.
	Fit,
}

/// Simulation state plus the canvas it draws to.
struct GraphContext {
	state: ForceGraphState,
	ctx: CanvasRenderingContext2d,
	canvas: HtmlCanvasElement,
	metrics: GraphMetrics,
	/// When set, the time at which to rebind forces and fit the view.
	settle_at: Option<f64>,
	last_frame: f64,
}

/// Callbacks of the animation loop and the pending frame id.
///
/// The frame callback reschedules itself through its own slot, so the
/// closure is only freed once the slots are emptied.
struct LoopSlots<F> {
	animate: Rc<RefCell<Option<F>>>,
	resize: Rc<RefCell<Option<F>>>,
	frame: Rc<Cell<Option<i32>>>,
}

impl<F> Clone for LoopSlots<F> {
	fn clone(&self) -> Self {
		Self {
			animate: self.animate.clone(),
			resize: self.resize.clone(),
			frame: self.frame.clone(),
		}
	}
}

impl<F> LoopSlots<F> {
	fn new() -> Self {
		Self {
			animate: Rc::new(RefCell::new(None)),
			resize: Rc::new(RefCell::new(None)),
			frame: Rc::new(Cell::new(None)),
		}
	}

	/// Drop both callbacks and forget the pending frame.
	fn release(&self) {
		self.animate.borrow_mut().take();
		self.resize.borrow_mut().take();
		self.frame.set(None);
	}
}

impl LoopSlots<Closure<dyn FnMut()>> {
	/// Cancel the pending frame, unhook the resize listener, then release.
	fn teardown(&self) {
		if let Some(window) = web_sys::window() {
			if let Some(id) = self.frame.get() {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(ref cb) = *self.resize.borrow() {
				let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		self.release();
	}
}

fn measure(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|(w, h)| *w > 0.0 && *h > 0.0)
		.unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
}

fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders an interactive force-directed graph on a canvas element.
///
/// The canvas fills its parent and follows window resizes. `metrics` is
/// written whenever the viewport size class changes so siblings can size
/// themselves the same way. Clicks report through `on_pick`: `Some` for a
/// node or edge, `None` for empty canvas.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<DisplayGraph>,
	#[prop(into)] palette: Signal<Palette>,
	#[prop(into)] selection: Signal<Option<Selection>>,
	#[prop(into)] zoomed_in: Signal<bool>,
	#[prop(into)] command: Signal<Option<ViewCommand>>,
	metrics: RwSignal<GraphMetrics>,
	#[prop(into)] on_pick: Callback<Option<Selection>>,
	#[prop(default = false)] expanded: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let slots: LoopSlots<Closure<dyn FnMut()>> = LoopSlots::new();
	let alive = Arc::new(AtomicBool::new(true));
	let (context_init, animate_init, resize_cb_init, frame_init, alive_init) = (
		context.clone(),
		slots.animate.clone(),
		slots.resize.clone(),
		slots.frame.clone(),
		alive.clone(),
	);

	let alive_cleanup = alive.clone();
	let slots_cleanup = StoredValue::new_local(slots);
	on_cleanup(move || {
		alive_cleanup.store(false, Ordering::Relaxed);
		slots_cleanup.try_with_value(LoopSlots::teardown);
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("crowdgraph: canvas 2d context unavailable, graph not drawn");
			return;
		};

		let (w, h) = measure(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let graph_metrics = GraphMetrics::for_width(w);
		let now = js_sys::Date::now();
		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(
				&data.get_untracked(),
				w,
				h,
				ForceParams::from_metrics(&graph_metrics),
			),
			ctx,
			canvas,
			metrics: graph_metrics,
			settle_at: Some(now + SETTLE_DELAY_MS),
			last_frame: now,
		});
		metrics.set(graph_metrics);
		debug!("crowdgraph: canvas mounted at {}x{}", w, h);

		let context_resize = context_init.clone();
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let resized = context_resize.borrow_mut().as_mut().and_then(|c| {
				let (nw, nh) = measure(&c.canvas);
				if (nw, nh) == (c.state.width, c.state.height) {
					return None;
				}
				c.canvas.set_width(nw as u32);
				c.canvas.set_height(nh as u32);
				c.state.resize(nw, nh);
				c.metrics = GraphMetrics::for_width(nw);
				c.settle_at = Some(js_sys::Date::now() + SETTLE_DELAY_MS);
				Some(c.metrics)
			});
			if let Some(m) = resized {
				if metrics.try_get_untracked() != Some(m) {
					let _ = metrics.try_set(m);
				}
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner, frame_anim, alive_anim) = (
			context_init.clone(),
			animate_init.clone(),
			frame_init.clone(),
			alive_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			if !alive_anim.load(Ordering::Relaxed) {
				return;
			}

			let options = RenderOptions {
				selection: selection.try_get_untracked().flatten(),
				zoomed_in: zoomed_in.try_get_untracked().unwrap_or(false),
				expanded,
			};
			if let (Some(c), Some(palette)) = (
				context_anim.borrow_mut().as_mut(),
				palette.try_get_untracked(),
			) {
				let now = js_sys::Date::now();
				let dt = (now - c.last_frame).clamp(0.0, MAX_FRAME_MS);
				c.last_frame = now;
				if c.settle_at.is_some_and(|at| now >= at) {
					c.settle_at = None;
					c.state.rebind(ForceParams::from_metrics(&c.metrics));
					c.state.zoom_to_fit(c.metrics.fit_padding, c.metrics.fit_duration_ms);
				}
				c.state.tick(dt);
				render::render(&c.state, &c.ctx, &c.metrics, &palette, &options);
			}

			if let Some(ref cb) = *animate_inner.borrow() {
				frame_anim.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			frame_init.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	let context_data = context.clone();
	Effect::new(move |_| {
		let graph = data.get();
		if let Some(c) = context_data.borrow_mut().as_mut() {
			c.state.set_data(&graph);
			c.settle_at = Some(js_sys::Date::now() + SETTLE_DELAY_MS);
			debug!(
				"crowdgraph: canvas data {} nodes, {} links",
				graph.nodes.len(),
				graph.links.len()
			);
		}
	});

	let context_cmd = context.clone();
	Effect::new(move |_| {
		let Some(command) = command.get() else {
			return;
		};
		if let Some(c) = context_cmd.borrow_mut().as_mut() {
			let m = c.metrics;
			match command {
				ViewCommand::Focus(target) => {
					if let Some((x, y)) = c.state.element_position(&target) {
						c.state.center_on(x, y, m.focus_zoom, FOCUS_DURATION_MS);
					}
				}
				ViewCommand::ZoomIn => c.state.center_on(0.0, 0.0, m.toggle_zoom, ZOOM_IN_DURATION_MS),
				ViewCommand::Fit => c.state.zoom_to_fit(m.fit_padding, m.fit_duration_ms),
			}
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(c) = context_md.borrow_mut().as_mut() {
			let (x, y) = local_point(&c.canvas, &ev);
			let m = c.metrics;
			c.state.pointer_down(x, y, &m);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(c) = context_mm.borrow_mut().as_mut() {
			let (x, y) = local_point(&c.canvas, &ev);
			c.state.pointer_move(x, y);
			let cursor = if c.state.drag.active || c.state.pan.active {
				"grabbing"
			} else if c.state.hit(x, y, &c.metrics).is_some() {
				"pointer"
			} else {
				"grab"
			};
			let _ = web_sys::HtmlElement::style(&c.canvas).set_property("cursor", cursor);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let outcome = context_mu.borrow_mut().as_mut().map(|c| {
			let (x, y) = local_point(&c.canvas, &ev);
			let m = c.metrics;
			c.state.pointer_up(x, y, &m)
		});
		match outcome {
			Some(PointerOutcome::Picked(picked)) => on_pick.run(Some(picked)),
			Some(PointerOutcome::Background) => on_pick.run(None),
			Some(PointerOutcome::Gesture) | None => {}
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(c) = context_ml.borrow_mut().as_mut() {
			c.state.pointer_leave();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(c) = context_wh.borrow_mut().as_mut() {
			let (x, y) = local_point(&c.canvas, &ev);
			c.state.wheel(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn releasing_slots_breaks_the_self_reference() {
		let slots: LoopSlots<Box<dyn FnMut()>> = LoopSlots::new();
		let own_slot = slots.animate.clone();
		*slots.animate.borrow_mut() = Some(Box::new(move || {
			let _ = own_slot.borrow().is_some();
		}));
		slots.frame.set(Some(7));
		assert_eq!(Rc::strong_count(&slots.animate), 2);

		slots.release();
		assert_eq!(Rc::strong_count(&slots.animate), 1);
		assert!(slots.animate.borrow().is_none());
		assert_eq!(slots.frame.get(), None);
	}
}
