use super::types::{RelationView, Track};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationKind {
	Artist,
	Genre,
}

impl From<RelationView> for RelationKind {
	fn from(view: RelationView) -> Self {
		match view {
			RelationView::Artist => RelationKind::Artist,
			RelationView::Genre => RelationKind::Genre,
		}
	}
}

impl RelationKind {
	/// The value two tracks must share to be connected.
	pub fn key_of(self, track: &Track) -> Option<&str> {
		match self {
			RelationKind::Artist => track.artist.as_deref().filter(|a| !a.is_empty()),
			RelationKind::Genre => track.primary_genre(),
		}
	}

	/// Dash pattern for the passive stroke.
	pub fn dash(self) -> &'static [f64] {
		match self {
			RelationKind::Artist => &[3.0, 7.0],
			RelationKind::Genre => &[4.0, 6.0],
		}
	}
}

/// Unordered pair of bubbles, stored with `a < b`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
	pub a: usize,
	pub b: usize,
	pub kind: RelationKind,
	pub key: String,
}

#[derive(Clone, Debug, Default)]
pub struct RelationIndex {
	pub artist: Vec<Connection>,
	pub genre: Vec<Connection>,
}

fn pairs(tracks: &[Track], kind: RelationKind) -> Vec<Connection> {
	let mut out = Vec::new();
	for (i, ti) in tracks.iter().enumerate() {
		let Some(key) = kind.key_of(ti) else {
			continue;
		};
		for (j, tj) in tracks.iter().enumerate().skip(i + 1) {
			if kind.key_of(tj) == Some(key) {
				out.push(Connection {
					a: i,
					b: j,
					kind,
					key: key.to_owned(),
				});
			}
		}
	}
	out
}

impl RelationIndex {
	pub fn build(tracks: &[Track]) -> Self {
		Self {
			artist: pairs(tracks, RelationKind::Artist),
			genre: pairs(tracks, RelationKind::Genre),
		}
	}

	pub fn visible(&self, view: RelationView) -> &[Connection] {
		match view {
			RelationView::Artist => &self.artist,
			RelationView::Genre => &self.genre,
		}
	}

	/// Whether `a` and `b` share a key under `kind`.
	pub fn related(tracks: &[Track], kind: RelationKind, a: usize, b: usize) -> bool {
		match (tracks.get(a), tracks.get(b)) {
			(Some(ta), Some(tb)) => kind.key_of(ta).is_some() && kind.key_of(ta) == kind.key_of(tb),
			_ => false,
		}
	}
}
