use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::components::bubble_map::{
	BubbleMapCanvas, RelationView, Track, TrackDetail, fetch_catalog,
};
use crate::components::detail_panel::DetailPanel;
use crate::components::turntable::Turntable;
use crate::config::{CONFIG_URL, MapConfig};

/// Toggle button for one relation view.
#[component]
fn ViewButton(mode: RelationView, current: RwSignal<RelationView>) -> impl IntoView {
	view! {
		<button
			class="relation-toggle-btn"
			class:active=move || current.get() == mode
			on:click=move |_| current.set(mode)
		>
			{mode.label()}
		</button>
	}
}

/// Replay page: bubble map on the left, record player and details on the right.
#[component]
pub fn Home() -> impl IntoView {
	let catalog = RwSignal::new(Vec::<Track>::new());
	let config = RwSignal::new(None::<MapConfig>);
	let selected = RwSignal::new(None::<TrackDetail>);
	let view_mode = RwSignal::new(RelationView::default());

	spawn_local(async move {
		let cfg = MapConfig::load(CONFIG_URL).await;
		match fetch_catalog(&cfg.data_url).await {
			Ok(tracks) => catalog.set(tracks),
			Err(e) => error!("Catalog unavailable, map stays empty: {e}"),
		}
		config.set(Some(cfg));
	});

	view! {
		<div class="replay">
			<section id="map-panel" class="map-panel">
				{move || {
					config
						.get()
						.map(|cfg| {
							view! {
								<BubbleMapCanvas
									catalog=catalog
									selected=selected
									view_mode=view_mode
									config=cfg
								/>
							}
						})
				}}
				<div class="relation-toggle">
					<ViewButton mode=RelationView::Artist current=view_mode />
					<ViewButton mode=RelationView::Genre current=view_mode />
				</div>
			</section>
			<aside class="lp-panel">
				<div id="lp-canvas-container" class="lp-canvas-container">
					<Turntable catalog=catalog selected=selected />
				</div>
				<DetailPanel detail=selected />
			</aside>
		</div>
	}
}
