use serde::{Deserialize, Deserializer};

const HUES: &[u16] = &[340, 200, 45, 160, 280, 30, 180, 320, 100, 260, 20, 140];

#[derive(Clone, Debug, Deserialize)]
pub struct MonthRecord {
	pub month_label: String,
	#[serde(default)]
	pub songs: Vec<SongRecord>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SongRecord {
	pub title: String,
	#[serde(default)]
	pub artist: Option<String>,
	#[serde(default)]
	pub genre: Option<String>,
	#[serde(deserialize_with = "lenient_plays")]
	pub plays: u32,
	#[serde(default)]
	pub cover_url: Option<String>,
	#[serde(default)]
	pub youtube_url: Option<String>,
}

/// Accept any JSON number, rounding and clamping it into `u32`.
fn lenient_plays<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
	let raw = f64::deserialize(de)?;
	if raw.is_nan() {
		return Ok(0);
	}
	Ok(raw.round().clamp(0.0, f64::from(u32::MAX)) as u32)
}

/// Position of a song inside the catalog, `(month, song)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoverKey {
	pub month: usize,
	pub song: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
	pub index: usize,
	pub key: CoverKey,
	pub month: String,
	pub title: String,
	pub artist: Option<String>,
	pub genre: Option<String>,
	pub plays: u32,
	pub cover_url: Option<String>,
	pub link: Option<String>,
}

impl Track {
	/// First comma-separated genre, trimmed.
	pub fn primary_genre(&self) -> Option<&str> {
		self.genre
			.as_deref()
			.and_then(|g| g.split(',').next())
			.map(str::trim)
			.filter(|g| !g.is_empty())
	}

	pub fn hue(&self) -> u16 {
		HUES[self.index % HUES.len()]
	}

	/// Placeholder text for a bubble without a cover.
	pub fn initials(&self) -> String {
		self.title.chars().take(2).collect()
	}

	pub fn detail(&self) -> TrackDetail {
		TrackDetail {
			index: self.index,
			month: self.month.clone(),
			title: self.title.clone(),
			artist: self.artist.clone().unwrap_or_default(),
			plays_label: format!("{}회 재생", self.plays),
			genre: self.genre.clone(),
			link: self.link.clone(),
			cover_url: self.cover_url.clone(),
		}
	}
}

/// What the detail panel and the turntable show for a selected track.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackDetail {
	pub index: usize,
	pub month: String,
	pub title: String,
	pub artist: String,
	pub plays_label: String,
	pub genre: Option<String>,
	pub link: Option<String>,
	pub cover_url: Option<String>,
}

impl TrackDetail {
	pub fn link_visible(&self) -> bool {
		self.link.is_some()
	}

	pub fn genre_visible(&self) -> bool {
		self.genre.is_some()
	}
}

/// Which connection set the map draws and highlights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RelationView {
	#[default]
	Artist,
	Genre,
}

impl RelationView {
	pub fn label(self) -> &'static str {
		match self {
			RelationView::Artist => "아티스트",
			RelationView::Genre => "장르",
		}
	}
}
