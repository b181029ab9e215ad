use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent};

use super::render;
use super::state::{Toggle, TurntableState};
use crate::components::bubble_map::{Track, TrackDetail, load_image};

fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((360.0, 360.0))
}

/// Record player for the selected track. Clicking toggles play/pause, or
/// puts the first track on when the deck is empty.
#[component]
pub fn Turntable(
	#[prop(into)] catalog: Signal<Vec<Track>>,
	selected: RwSignal<Option<TrackDetail>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let deck = Rc::new(RefCell::new(TurntableState::default()));
	let label: Rc<RefCell<Option<HtmlImageElement>>> = Rc::new(RefCell::new(None));
	let size = Rc::new(Cell::new((360.0, 360.0)));
	let playing = RwSignal::new(false);
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (deck_init, label_init, size_init, animate_init, resize_cb_init) = (
		deck.clone(),
		label.clone(),
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
		let (w, h) = container_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		size_init.set((w, h));

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("Canvas 2D context unavailable; turntable disabled");
			return;
		};

		let (size_resize, canvas_resize) = (size_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = container_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			size_resize.set((nw, nh));
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (deck_anim, label_anim, size_anim, animate_inner) = (
			deck_init.clone(),
			label_init.clone(),
			size_init.clone(),
			animate_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let mut d = deck_anim.borrow_mut();
			d.tick();
			let (w, h) = size_anim.get();
			render::render(&d, label_anim.borrow().as_ref(), w, h, &ctx);
			drop(d);
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let (deck_sel, label_sel) = (deck.clone(), label.clone());
	Effect::new(move |_| {
		let Some(detail) = selected.get() else {
			return;
		};
		deck_sel.borrow_mut().load(detail.index);
		playing.set(true);
		*label_sel.borrow_mut() = None;
		if let Some(url) = detail.cover_url {
			let (deck, label, index) = (deck_sel.clone(), label_sel.clone(), detail.index);
			spawn_local(async move {
				match load_image(url).await {
					// a newer selection may have replaced this one meanwhile
					Ok(img) if deck.borrow().track == Some(index) => {
						*label.borrow_mut() = Some(img);
					}
					Ok(_) => {}
					Err(e) => debug!("Label art unavailable: {e}"),
				}
			});
		}
	});

	let deck_click = deck.clone();
	let on_click = move |_: MouseEvent| {
		let outcome = deck_click.borrow_mut().toggle();
		match outcome {
			Toggle::NeedsTrack => {
				if let Some(first) = catalog.with(|tracks| tracks.first().map(Track::detail)) {
					selected.set(Some(first));
				}
			}
			Toggle::Playing => playing.set(true),
			Toggle::Paused => playing.set(false),
		}
	};

	view! {
		<div class="lp-player">
			<canvas
				node_ref=canvas_ref
				class="lp-canvas"
				on:click=on_click
				style="display: block; cursor: pointer;"
			/>
			<span class="lp-led" class:on=move || playing.get()></span>
		</div>
	}
}
