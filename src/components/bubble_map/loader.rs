use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;

use futures::future::join_all;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlImageElement, Response};

use super::types::{CoverKey, MonthRecord, Track};
use crate::error::{LoadError, LoadResult};

/// Outcome of a batch of cover loads once every request has settled.
#[derive(Debug)]
pub struct Settled<T> {
	pub loaded: HashMap<CoverKey, T>,
	pub failed: Vec<CoverKey>,
}

impl<T> Default for Settled<T> {
	fn default() -> Self {
		Self {
			loaded: HashMap::new(),
			failed: Vec::new(),
		}
	}
}

impl<T> Settled<T> {
	pub fn get(&self, key: CoverKey) -> Option<&T> {
		self.loaded.get(&key)
	}

	pub fn settled(&self) -> usize {
		self.loaded.len() + self.failed.len()
	}
}

pub type Covers = Settled<HtmlImageElement>;

/// Artist names are compared verbatim, so only an empty string is absent.
fn verbatim(value: Option<String>) -> Option<String> {
	value.filter(|s| !s.is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
	value
		.map(|s| s.trim().to_owned())
		.filter(|s| !s.is_empty())
}

/// Flatten `months → songs` into index-stable tracks.
pub fn parse_catalog(json: &str) -> LoadResult<Vec<Track>> {
	let months: Vec<MonthRecord> = serde_json::from_str(json)?;
	let mut tracks = Vec::new();
	for (mi, month) in months.into_iter().enumerate() {
		for (si, song) in month.songs.into_iter().enumerate() {
			tracks.push(Track {
				index: tracks.len(),
				key: CoverKey { month: mi, song: si },
				month: month.month_label.clone(),
				title: song.title,
				artist: verbatim(song.artist),
				genre: non_empty(song.genre),
				plays: song.plays,
				cover_url: non_empty(song.cover_url),
				link: non_empty(song.youtube_url),
			});
		}
	}
	Ok(tracks)
}

pub async fn fetch_text(url: &str) -> LoadResult<String> {
	let window = web_sys::window().ok_or(LoadError::Window)?;
	let resp: Response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|e| LoadError::fetch(url, e))?
		.dyn_into()
		.map_err(|e| LoadError::fetch(url, e))?;
	if !resp.ok() {
		return Err(LoadError::Status {
			url: url.to_owned(),
			status: resp.status(),
		});
	}
	let text = JsFuture::from(resp.text().map_err(|e| LoadError::fetch(url, e))?)
		.await
		.map_err(|e| LoadError::fetch(url, e))?;
	text.as_string().ok_or_else(|| LoadError::Fetch {
		url: url.to_owned(),
		reason: "response body is not text".into(),
	})
}

pub async fn fetch_catalog(url: &str) -> LoadResult<Vec<Track>> {
	let tracks = parse_catalog(&fetch_text(url).await?)?;
	info!("Loaded {} tracks from {}", tracks.len(), url);
	Ok(tracks)
}

/// Wait for every request to settle, recording which ones failed.
pub async fn settle_all<T, E, F, I>(requests: I) -> Settled<T>
where
	I: IntoIterator<Item = (CoverKey, F)>,
	F: Future<Output = Result<T, E>>,
	E: Display,
{
	let outcomes = join_all(
		requests
			.into_iter()
			.map(|(key, request)| async move { (key, request.await) }),
	)
	.await;

	let mut settled = Settled::default();
	for (key, outcome) in outcomes {
		match outcome {
			Ok(value) => {
				settled.loaded.insert(key, value);
			}
			Err(e) => {
				warn!("Cover {}-{} unavailable: {}", key.month, key.song, e);
				settled.failed.push(key);
			}
		}
	}
	settled.failed.sort();
	settled
}

pub async fn load_image(url: String) -> LoadResult<HtmlImageElement> {
	let img = HtmlImageElement::new().map_err(|e| LoadError::fetch(&url, e))?;
	img.set_cross_origin(Some("anonymous"));
	let pending = js_sys::Promise::new(&mut |resolve, reject| {
		img.set_onload(Some(&resolve));
		img.set_onerror(Some(&reject));
	});
	img.set_src(&url);
	let result = JsFuture::from(pending).await;
	img.set_onload(None);
	img.set_onerror(None);
	result.map(|_| img).map_err(|_| LoadError::Image { url })
}

/// Request every cover the catalog names and wait for all of them.
pub async fn load_covers(tracks: &[Track]) -> Covers {
	let requests: Vec<_> = tracks
		.iter()
		.filter_map(|t| t.cover_url.clone().map(|url| (t.key, load_image(url))))
		.collect();
	let requested = requests.len();
	let covers = settle_all(requests).await;
	info!(
		"Covers settled: {} of {} ({} failed)",
		covers.settled(),
		requested,
		covers.failed.len()
	);
	covers
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;
	use futures::future::{Ready, ready};

	use super::*;

	const CATALOG: &str = r#"[
		{ "month_label": "1월", "songs": [
			{ "title": "Ditto", "artist": "NewJeans", "genre": "K-Pop, Dance", "plays": 43,
			  "cover_url": "covers/ditto.jpg", "youtube_url": "https://example.com/v" },
			{ "title": "Hype Boy", "artist": "NewJeans", "genre": "", "plays": 3 }
		]},
		{ "month_label": "2월", "songs": [] },
		{ "month_label": "3월", "songs": [
			{ "title": "Seven", "artist": "", "plays": 1, "youtube_url": "" },
			{ "title": "Love wins all", "artist": "IU ", "plays": 2.6 },
			{ "title": "Shh", "artist": "  ", "plays": -4 }
		]}
	]"#;

	#[test]
	fn catalog_flattens_in_month_then_song_order() {
		let tracks = parse_catalog(CATALOG).unwrap();
		let titles: Vec<_> = tracks.iter().map(|t| t.title.as_str()).collect();
		assert_eq!(titles, ["Ditto", "Hype Boy", "Seven", "Love wins all", "Shh"]);
		assert_eq!(tracks[2].index, 2);
		assert_eq!(tracks[2].key, CoverKey { month: 2, song: 0 });
		assert_eq!(tracks[2].month, "3월");
	}

	#[test]
	fn blank_optionals_become_absent() {
		let tracks = parse_catalog(CATALOG).unwrap();
		assert_eq!(tracks[0].link.as_deref(), Some("https://example.com/v"));
		assert_eq!(tracks[1].genre, None);
		assert_eq!(tracks[1].cover_url, None);
		assert_eq!(tracks[2].artist, None);
		assert_eq!(tracks[2].link, None);
	}

	#[test]
	fn artist_keeps_surrounding_whitespace() {
		let tracks = parse_catalog(CATALOG).unwrap();
		assert_eq!(tracks[3].artist.as_deref(), Some("IU "));
		assert_eq!(tracks[4].artist.as_deref(), Some("  "));
	}

	#[test]
	fn odd_play_counts_are_rounded_and_clamped() {
		let tracks = parse_catalog(CATALOG).unwrap();
		assert_eq!(tracks[3].plays, 3);
		assert_eq!(tracks[4].plays, 0);
	}

	#[test]
	fn malformed_catalog_is_an_error() {
		assert!(matches!(
			parse_catalog(r#"{ "month_label": "1월" }"#),
			Err(LoadError::Parse(_))
		));
		assert!(parse_catalog("not json").is_err());
	}

	#[test]
	fn barrier_waits_for_successes_and_failures() {
		let key = |song| CoverKey { month: 0, song };
		let requests: Vec<(CoverKey, Ready<Result<&str, String>>)> = vec![
			(key(2), ready(Err("404".to_string()))),
			(key(0), ready(Ok("a"))),
			(key(1), ready(Err("timeout".to_string()))),
			(key(3), ready(Ok("d"))),
		];
		let settled = block_on(settle_all(requests));
		assert_eq!(settled.settled(), 4);
		assert_eq!(settled.get(key(0)), Some(&"a"));
		assert_eq!(settled.get(key(3)), Some(&"d"));
		assert_eq!(settled.failed, vec![key(1), key(2)]);
	}

	#[test]
	fn barrier_with_no_requests_settles_immediately() {
		let requests: Vec<(CoverKey, Ready<Result<(), String>>)> = Vec::new();
		let settled = block_on(settle_all(requests));
		assert_eq!(settled.settled(), 0);
	}
}
