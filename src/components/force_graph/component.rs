use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::LayoutEngine;
use super::types::GraphSnapshot;
use crate::config::{LayoutConfig, Theme};

/// Longest step fed to the simulation, so a backgrounded tab does not
/// resume with one huge jump.
const MAX_FRAME_DT: f64 = 0.05;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(cb: &FrameCallback) {
	if let (Some(window), Some(cb)) = (web_sys::window(), cb.borrow().as_ref()) {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Steps the engine held in `slot` by one frame. Once the canvas is gone
/// the engine is dropped and `false` ends the frame loop.
fn step_frame(slot: &RefCell<Option<LayoutEngine>>, alive: bool, dt: f32) -> bool {
	if !alive {
		slot.borrow_mut().take();
		return false;
	}
	if let Some(engine) = slot.borrow_mut().as_mut() {
		engine.tick(dt);
	}
	true
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Canvas view of one repository's tree. A fresh engine is created when the
/// component mounts; later changes to `data` are reconciled into it.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphSnapshot>,
	#[prop(into)] theme: Signal<Theme>,
	#[prop(default = LayoutConfig::default())] config: LayoutConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<LayoutEngine>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));
	let (state_init, animate_init, alive_init) = (state.clone(), animate.clone(), alive.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(config.width as u32);
		canvas.set_height(config.height as u32);
		let Some(ctx) = context_2d(&canvas) else {
			error!("canvas has no 2d context");
			return;
		};

		let mut engine = LayoutEngine::new(config);
		engine.prewarm(&data.get_untracked());
		*state_init.borrow_mut() = Some(engine);

		let (state_anim, animate_inner, alive_anim) =
			(state_init.clone(), animate_init.clone(), alive_init.clone());
		let mut last = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last) / 1000.0).clamp(0.0, MAX_FRAME_DT) as f32;
			last = now;
			if !step_frame(&state_anim, alive_anim.load(Ordering::Relaxed), dt) {
				// releasing our own handle frees this closure once it returns
				animate_inner.borrow_mut().take();
				return;
			}
			if let Some(ref s) = *state_anim.borrow() {
				render::render(s, &ctx, theme.get_untracked().background());
			}
			request_frame(&animate_inner);
		}));
		request_frame(&animate_init);
	});

	let state_data = state.clone();
	Effect::new(move |prev: Option<()>| {
		let snapshot = data.get();
		// the mount effect pre-warms with the first snapshot
		if prev.is_none() {
			return;
		}
		if let Some(ref mut s) = *state_data.borrow_mut() {
			s.update(&snapshot);
		}
	});

	on_cleanup(move || alive.store(false, Ordering::Relaxed));

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.release();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom(x, y, ev.delta_y());
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
			style="display: block; cursor: grab; border: 2px solid grey; border-radius: 5px;"
		/>
	}
}
