use log::debug;

use super::camera::{Camera, PanState};
use super::layout::{Bubble, arrange_spiral, radius_for_plays};
use super::relations::{Connection, RelationIndex, RelationKind};
use super::simulation;
use super::types::{RelationView, Track};
use crate::components::detail_panel::DetailSink;
use crate::config::{MapConfig, SelectionTrigger};

/// Everything the map mutates between frames, owned by the component that
/// drives the animation loop.
pub struct MapState {
	pub tracks: Vec<Track>,
	pub bubbles: Vec<Bubble>,
	pub relations: RelationIndex,
	pub camera: Camera,
	pub pan: PanState,
	pub hover: Option<usize>,
	pub selection: Option<usize>,
	pub view: RelationView,
	pub pointer: Option<(f64, f64)>,
	pub width: f64,
	pub height: f64,
	config: MapConfig,
}

impl MapState {
	pub fn new(tracks: Vec<Track>, width: f64, height: f64, config: MapConfig) -> Self {
		let max_plays = config
			.layout
			.max_plays
			.unwrap_or_else(|| tracks.iter().map(|t| t.plays).max().unwrap_or(1));
		let mut bubbles: Vec<Bubble> = tracks
			.iter()
			.map(|t| Bubble::new(t.index, radius_for_plays(t.plays, max_plays, &config.layout)))
			.collect();
		arrange_spiral(&mut bubbles, width, height, &config.layout);
		let relations = RelationIndex::build(&tracks);
		debug!(
			"Map built: {} bubbles, {} artist links, {} genre links",
			bubbles.len(),
			relations.artist.len(),
			relations.genre.len()
		);

		Self {
			tracks,
			bubbles,
			relations,
			camera: Camera::new(config.camera.clone()),
			pan: PanState::default(),
			hover: None,
			selection: None,
			view: RelationView::default(),
			pointer: None,
			width,
			height,
			config,
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		arrange_spiral(&mut self.bubbles, width, height, &self.config.layout);
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		self.camera.screen_to_world(sx, sy, self.width, self.height)
	}

	/// Topmost bubble under a screen point. Bubbles are drawn in index order,
	/// so the last match is the one on top.
	pub fn bubble_at(&self, sx: f64, sy: f64) -> Option<usize> {
		let (wx, wy) = self.screen_to_world(sx, sy);
		self.bubbles.iter().rposition(|b| b.contains(wx, wy))
	}

	fn refresh_hover(&mut self, sink: &mut impl DetailSink) {
		let hovered = if self.pan.active {
			None
		} else {
			self.pointer.and_then(|(x, y)| self.bubble_at(x, y))
		};
		if hovered == self.hover {
			return;
		}
		self.hover = hovered;
		if let Some(idx) = hovered {
			if self.config.selection == SelectionTrigger::Hover && self.selection != Some(idx) {
				self.select(idx, sink);
			}
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64, sink: &mut impl DetailSink) {
		self.pointer = Some((sx, sy));
		self.camera.drag_pan(&self.pan, sx, sy);
		self.refresh_hover(sink);
	}

	pub fn pointer_leave(&mut self) {
		self.pointer = None;
		self.pan.active = false;
		self.hover = None;
	}

	/// Select the bubble under the pointer, or start panning the background.
	pub fn press(&mut self, sx: f64, sy: f64, sink: &mut impl DetailSink) -> Option<usize> {
		self.pointer = Some((sx, sy));
		match self.bubble_at(sx, sy) {
			Some(idx) => {
				self.select(idx, sink);
				Some(idx)
			}
			None => {
				self.camera.begin_pan(&mut self.pan, sx, sy);
				self.hover = None;
				None
			}
		}
	}

	pub fn release(&mut self) {
		self.pan.active = false;
	}

	/// Positive `delta_y` (scrolling down) zooms out.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		// horizontal-only scrolls carry no zoom direction
		if delta_y == 0.0 {
			return;
		}
		self.camera
			.zoom_at(sx, sy, self.width, self.height, delta_y < 0.0);
	}

	/// Advance one frame: re-hit-test under the (possibly moved) bubbles, then
	/// step the simulation.
	pub fn tick(&mut self, sink: &mut impl DetailSink) {
		self.refresh_hover(sink);
		simulation::step(&mut self.bubbles, self.hover, &self.config.simulation);
	}

	pub fn select(&mut self, idx: usize, sink: &mut impl DetailSink) {
		let Some(track) = self.tracks.get(idx) else {
			return;
		};
		debug!("Selected track {}: {}", idx, track.title);
		self.selection = Some(idx);
		sink.show(Some(track.detail()));
	}

	/// Mirror a selection made elsewhere (e.g. the turntable) without
	/// notifying the panel again.
	pub fn set_selection(&mut self, idx: Option<usize>) {
		self.selection = idx.filter(|&i| i < self.tracks.len());
	}

	pub fn set_view(&mut self, view: RelationView) {
		if self.view != view {
			debug!("Relation view: {view:?}");
			self.view = view;
		}
	}

	/// Bubble whose relations are highlighted: the hovered one, else the
	/// selected one.
	pub fn focus(&self) -> Option<usize> {
		self.hover.or(self.selection)
	}

	pub fn visible_connections(&self) -> &[Connection] {
		self.relations.visible(self.view)
	}

	pub fn is_connected(&self, idx: usize) -> bool {
		match self.focus() {
			Some(f) if f != idx => {
				RelationIndex::related(&self.tracks, RelationKind::from(self.view), idx, f)
			}
			_ => false,
		}
	}

	/// Only an active hover dims the rest of the map.
	pub fn is_dimmed(&self, idx: usize) -> bool {
		self.hover.is_some_and(|h| h != idx) && !self.is_connected(idx)
	}

	pub fn is_active(&self, conn: &Connection) -> bool {
		self.focus()
			.and_then(|f| self.tracks.get(f))
			.and_then(|t| conn.kind.key_of(t))
			.is_some_and(|key| key == conn.key)
	}
}
