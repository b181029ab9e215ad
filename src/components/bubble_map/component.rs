use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::loader::{Covers, load_covers};
use super::render;
use super::state::MapState;
use super::types::{RelationView, Track, TrackDetail};
use crate::config::MapConfig;

fn panel_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0))
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

#[component]
pub fn BubbleMapCanvas(
	#[prop(into)] catalog: Signal<Vec<Track>>,
	selected: RwSignal<Option<TrackDetail>>,
	#[prop(into)] view_mode: Signal<RelationView>,
	#[prop(optional)] config: MapConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<MapState>>> = Rc::new(RefCell::new(None));
	let covers: Rc<RefCell<Covers>> = Rc::new(RefCell::new(Covers::default()));
	let size = Rc::new(Cell::new((800.0, 600.0)));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, covers_init, size_init, animate_init, resize_cb_init) = (
		state.clone(),
		covers.clone(),
		size.clone(),
		animate.clone(),
		resize_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = panel_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		size_init.set((w, h));

		let Some(ctx) = context_2d(&canvas) else {
			warn!("Canvas 2D context unavailable; map disabled");
			return;
		};

		let (state_resize, size_resize, canvas_resize) =
			(state_init.clone(), size_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = panel_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			size_resize.set((nw, nh));
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, covers_anim, animate_inner) =
			(state_init.clone(), covers_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				let mut sink = selected;
				s.tick(&mut sink);
				let covers = covers_anim.borrow();
				render::render(s, &*covers, &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let (state_load, covers_load, size_load) = (state.clone(), covers.clone(), size.clone());
	Effect::new(move |_| {
		let tracks = catalog.get();
		if tracks.is_empty() {
			return;
		}
		let (state, covers, size, config) = (
			state_load.clone(),
			covers_load.clone(),
			size_load.clone(),
			config.clone(),
		);
		spawn_local(async move {
			*covers.borrow_mut() = load_covers(&tracks).await;
			let (w, h) = size.get();
			let mut map = MapState::new(tracks, w, h, config);
			map.set_view(view_mode.get_untracked());
			map.set_selection(selected.get_untracked().map(|d| d.index));
			info!("Bubble map ready with {} bubbles", map.bubbles.len());
			*state.borrow_mut() = Some(map);
		});
	});

	let state_view = state.clone();
	Effect::new(move |_| {
		let view = view_mode.get();
		if let Some(ref mut s) = *state_view.borrow_mut() {
			s.set_view(view);
		}
	});

	let state_sel = state.clone();
	Effect::new(move |_| {
		let index = selected.with(|d| d.as_ref().map(|d| d.index));
		if let Some(ref mut s) = *state_sel.borrow_mut() {
			s.set_selection(index);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			let mut sink = selected;
			s.press(x, y, &mut sink);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			let mut sink = selected;
			s.pointer_move(x, y, &mut sink);
			let cursor = if s.hover.is_some() {
				"pointer"
			} else if s.pan.active {
				"grabbing"
			} else {
				"grab"
			};
			let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
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
			s.pointer_leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="bubble-map-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
