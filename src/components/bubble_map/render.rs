use super::loader::Settled;
use super::state::MapState;
use crate::components::canvas::{Stroke, Surface};

const GRID_SIZE: f64 = 40.0;
const GRID_COLOR: &str = "rgba(255, 69, 0, 0.31)";
const GLOW_RINGS: u32 = 4;

fn accent(alpha: f64) -> String {
	format!("rgba(255, 69, 0, {alpha:.3})")
}

pub fn render<S: Surface>(state: &MapState, covers: &Settled<S::Image>, surface: &S) {
	surface.clear(state.width, state.height);
	draw_grid(state, surface);
	surface.save();
	let (ox, oy) = state.camera.origin(state.width, state.height);
	surface.transform(ox, oy, state.camera.zoom, 0.0);
	draw_connections(state, surface);
	draw_bubbles(state, covers, surface);
	surface.restore();
}

/// World-aligned grid drawn in screen space so lines stay one pixel wide.
fn draw_grid<S: Surface>(state: &MapState, surface: &S) {
	let (w, h) = (state.width, state.height);
	let (start_x, start_y) = state.screen_to_world(0.0, 0.0);
	let (end_x, end_y) = state.screen_to_world(w, h);
	let stroke = Stroke::solid(GRID_COLOR, 1.0);

	let mut x = (start_x / GRID_SIZE).floor() * GRID_SIZE;
	while x <= end_x {
		let (sx, _) = state.camera.world_to_screen(x, 0.0, w, h);
		surface.line(sx, 0.0, sx, h, stroke);
		x += GRID_SIZE;
	}
	let mut y = (start_y / GRID_SIZE).floor() * GRID_SIZE;
	while y <= end_y {
		let (_, sy) = state.camera.world_to_screen(0.0, y, w, h);
		surface.line(0.0, sy, w, sy, stroke);
		y += GRID_SIZE;
	}
}

fn draw_connections<S: Surface>(state: &MapState, surface: &S) {
	let k = state.camera.zoom;
	let (active_color, passive_color, marker_color) = (accent(0.78), accent(0.16), accent(0.86));
	let label = state.view.label();

	for conn in state.visible_connections() {
		let (Some(a), Some(b)) = (state.bubbles.get(conn.a), state.bubbles.get(conn.b)) else {
			continue;
		};
		if state.is_active(conn) {
			surface.line(a.x, a.y, b.x, b.y, Stroke::solid(&active_color, 1.5 / k));
			let (mx, my) = ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
			surface.fill_circle(mx, my, 2.0 / k, &marker_color);
			surface.text(label, mx, my - 10.0 / k, 8.0 / k, &marker_color);
		} else {
			surface.line(
				a.x,
				a.y,
				b.x,
				b.y,
				Stroke {
					color: &passive_color,
					width: 0.5 / k,
					dash: conn.kind.dash(),
				},
			);
		}
	}
}

fn draw_bubbles<S: Surface>(state: &MapState, covers: &Settled<S::Image>, surface: &S) {
	let k = state.camera.zoom;
	for (i, b) in state.bubbles.iter().enumerate() {
		let Some(track) = state.tracks.get(b.track) else {
			continue;
		};
		let hovered = state.hover == Some(i);
		let connected = state.is_connected(i);
		let selected = state.selection == Some(i);
		let dimmed = state.is_dimmed(i);

		let (glow_alpha, glow_radius) = if hovered {
			(0.4, b.radius * 1.5)
		} else if connected {
			(0.2, b.radius)
		} else {
			(0.08, b.radius)
		};
		for ring in (1..=GLOW_RINGS).rev() {
			let alpha = glow_alpha * (1.0 - f64::from(ring) / 4.5);
			surface.fill_circle(b.x, b.y, glow_radius + f64::from(ring) * 4.0, &accent(alpha));
		}

		let face = b.radius * 0.925;
		match covers.get(track.key) {
			Some(img) => {
				surface.circle_image(img, b.x, b.y, face, if dimmed { 0.3 } else { 1.0 });
			}
			None => {
				let (disc, ink) = if dimmed {
					("rgb(20, 20, 20)", 0.35)
				} else {
					("rgb(32, 32, 32)", 0.85)
				};
				surface.fill_circle(b.x, b.y, face, disc);
				surface.text(
					&track.initials(),
					b.x,
					b.y,
					b.radius * 0.3,
					&format!("hsla({}, 68%, 58%, {ink})", track.hue()),
				);
			}
		}

		if hovered || selected {
			surface.stroke_circle(
				b.x,
				b.y,
				face + 3.0 / k,
				Stroke::solid("rgba(255, 255, 255, 0.82)", 1.5 / k),
			);
		} else if connected {
			surface.stroke_circle(
				b.x,
				b.y,
				face + 1.5 / k,
				Stroke::solid("rgba(255, 255, 255, 0.27)", 0.8 / k),
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::bubble_map::loader::parse_catalog;
	use crate::components::bubble_map::types::{CoverKey, RelationView, TrackDetail};
	use crate::components::canvas::testing::{Op, Recorder};
	use crate::components::detail_panel::DetailSink;
	use crate::config::MapConfig;

	const W: f64 = 2000.0;
	const H: f64 = 1600.0;

	struct Ignore;

	impl DetailSink for Ignore {
		fn show(&mut self, _: Option<TrackDetail>) {}
	}

	fn state() -> MapState {
		let tracks = parse_catalog(
			r#"[{ "month_label": "5월", "songs": [
				{ "title": "Alpha", "artist": "X", "plays": 4, "cover_url": "a.jpg" },
				{ "title": "Beta", "artist": "Z", "plays": 2 },
				{ "title": "Gamma", "artist": "X", "plays": 9 }
			]}]"#,
		)
		.unwrap();
		MapState::new(tracks, W, H, MapConfig::default())
	}

	fn covers() -> Settled<&'static str> {
		let mut covers = Settled::default();
		covers.loaded.insert(CoverKey { month: 0, song: 0 }, "alpha-cover");
		covers
	}

	#[test]
	fn draws_grid_then_connections_then_bubbles_in_index_order() {
		let state = state();
		let surface = Recorder::default();
		render(&state, &covers(), &surface);
		let ops = surface.ops();

		assert_eq!(ops[0], Op::Clear);
		let transform = ops
			.iter()
			.position(|op| matches!(op, Op::Transform(..)))
			.unwrap();
		assert_eq!(ops[transform - 1], Op::Save);
		assert!(ops[1..transform - 1].iter().all(|op| matches!(op, Op::Line { .. })));
		assert!(matches!(ops[transform + 1], Op::Line { dashed: true, .. }));
		assert_eq!(ops.last(), Some(&Op::Restore));

		let faces: Vec<_> = ops
			.iter()
			.filter_map(|op| match op {
				Op::Image(name, ..) => Some(name.to_string()),
				Op::Text(text, _) => Some(text.clone()),
				_ => None,
			})
			.collect();
		assert_eq!(faces, ["alpha-cover", "Be", "Ga"]);
	}

	#[test]
	fn hover_turns_link_solid_and_labels_it() {
		let mut state = state();
		let b = &state.bubbles[0];
		let (sx, sy) = state.camera.world_to_screen(b.x, b.y, W, H);
		state.pointer_move(sx, sy, &mut Ignore);
		let surface = Recorder::default();
		render(&state, &covers(), &surface);
		let ops = surface.ops();

		let (a, c) = (&state.bubbles[0], &state.bubbles[2]);
		assert!(ops.contains(&Op::Line {
			from: (a.x, a.y),
			to: (c.x, c.y),
			color: accent(0.78),
			dashed: false,
		}));
		assert!(ops.iter().any(|op| matches!(op, Op::Text(t, _) if t == "아티스트")));
		assert_eq!(state.hover, Some(0));
		assert!(ops.contains(&Op::Image("alpha-cover", (a.x, a.y), 1.0)));
		assert!(ops.iter().any(|op| matches!(op, Op::Ring(..))));
	}

	#[test]
	fn genre_view_hides_artist_links() {
		let mut state = state();
		state.set_view(RelationView::Genre);
		let surface = Recorder::default();
		render(&state, &covers(), &surface);
		let ops = surface.ops();
		let transform = ops
			.iter()
			.position(|op| matches!(op, Op::Transform(..)))
			.unwrap();
		assert!(!matches!(ops[transform + 1], Op::Line { .. }));
	}
}
