use leptos::prelude::*;

use super::bubble_map::TrackDetail;

/// Receives the track to show whenever the selection changes.
pub trait DetailSink {
	fn show(&mut self, detail: Option<TrackDetail>);
}

impl DetailSink for RwSignal<Option<TrackDetail>> {
	fn show(&mut self, detail: Option<TrackDetail>) {
		self.set(detail);
	}
}

/// "Now playing" text for the selected track, or an idle hint.
#[component]
pub fn DetailPanel(#[prop(into)] detail: Signal<Option<TrackDetail>>) -> impl IntoView {
	view! {
		<div class="lp-info">
			{move || match detail.get() {
				None => {
					view! { <p class="lp-idle-msg">"버블을 눌러 트랙을 골라보세요"</p> }.into_any()
				}
				Some(d) => {
					let genre_display = if d.genre_visible() { "inline" } else { "none" };
					let link_display = if d.link_visible() { "inline-flex" } else { "none" };
					let href = d.link.unwrap_or_else(|| "#".into());
					view! {
						<div class="lp-song-info visible">
							<span class="lp-month">{d.month}</span>
							<h2 class="lp-title">{d.title}</h2>
							<p class="lp-artist">{d.artist}</p>
							<span class="lp-plays">{d.plays_label}</span>
							<span class="lp-genre" style:display=genre_display>
								{d.genre.unwrap_or_default()}
							</span>
							<a
								class="lp-yt-btn"
								href=href
								target="_blank"
								rel="noopener noreferrer"
								style:display=link_display
							>
								"YouTube"
							</a>
						</div>
					}
						.into_any()
				}
			}}
		</div>
	}
}
