use super::state::TurntableState;
use crate::components::canvas::{Stroke, Surface};

const BACKGROUND: &str = "#FF4500";

pub fn render<S: Surface>(
	deck: &TurntableState,
	label: Option<&S::Image>,
	width: f64,
	height: f64,
	surface: &S,
) {
	surface.fill_rect(0.0, 0.0, width, height, BACKGROUND);
	let (cx, cy) = (width / 2.0, height / 2.0);
	let lp = width.min(height) * 0.32;
	let label_r = lp * 0.35;

	surface.fill_circle(cx, cy, lp * 1.25, "rgb(30, 30, 30)");
	surface.fill_circle(cx, cy, lp, "rgb(10, 10, 10)");
	let groove = Stroke::solid("rgb(40, 40, 40)", 0.5);
	let mut r = label_r + 10.0;
	while r < lp * 0.95 {
		surface.stroke_circle(cx, cy, r, groove);
		r += 3.0;
	}
	surface.stroke_circle(cx, cy, lp, Stroke::solid("rgb(80, 80, 80)", 2.0));

	surface.save();
	surface.transform(cx, cy, 1.0, deck.rotation.to_radians());
	match label {
		Some(img) => surface.circle_image(img, 0.0, 0.0, label_r, 1.0),
		None => {
			surface.fill_circle(0.0, 0.0, label_r, "rgb(34, 34, 34)");
			surface.text("APPLESonic", 0.0, -label_r * 0.1, label_r * 0.22, "rgb(170, 170, 170)");
			surface.text("2025", 0.0, label_r * 0.2, label_r * 0.15, "rgb(170, 170, 170)");
		}
	}
	surface.stroke_circle(
		0.0,
		0.0,
		label_r * 0.98,
		Stroke::solid("rgba(255, 69, 0, 0.2)", 2.0),
	);
	surface.restore();

	surface.fill_circle(cx, cy, 5.0, BACKGROUND);
	surface.fill_circle(cx, cy, 3.0, "rgb(60, 60, 60)");
	draw_tonearm(deck, cx, cy, lp, surface);
}

/// Arm hanging from a pivot at the top right; 0° points straight down and
/// positive angles swing it off the record.
fn draw_tonearm<S: Surface>(deck: &TurntableState, cx: f64, cy: f64, lp: f64, surface: &S) {
	let (px, py) = (cx + lp * 1.05, cy - lp * 0.75);
	let length = lp * 1.1;
	let theta = deck.tonearm.to_radians();
	let (dx, dy) = (theta.sin(), theta.cos());
	let tip = (px + dx * length, py + dy * length);
	let neck = (px + dx * length * 0.85, py + dy * length * 0.85);

	surface.line(px, py, neck.0, neck.1, Stroke::solid("rgb(70, 70, 70)", 6.0));
	surface.line(neck.0, neck.1, tip.0, tip.1, Stroke::solid("rgb(55, 55, 55)", 12.0));
	surface.fill_circle(tip.0, tip.1, 3.0, "rgb(90, 90, 90)");
	surface.fill_circle(px, py, lp * 0.08, "rgb(45, 45, 45)");
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::canvas::testing::{Op, Recorder};
	use crate::components::turntable::state::{ARM_PLAYING_DEG, ARM_RESTING_DEG};

	/// Stylus distance from the record centre, in record radii.
	fn stylus_offset(deck: &TurntableState) -> f64 {
		let theta = deck.tonearm.to_radians();
		let (x, y) = (1.05 + theta.sin() * 1.1, -0.75 + theta.cos() * 1.1);
		x.hypot(y)
	}

	#[test]
	fn stylus_rests_off_the_record_and_plays_on_it() {
		let mut deck = TurntableState::default();
		deck.tonearm = ARM_RESTING_DEG;
		assert!(stylus_offset(&deck) > 1.0);
		deck.tonearm = ARM_PLAYING_DEG;
		let on = stylus_offset(&deck);
		assert!(on > 0.35 && on < 0.95);
	}

	#[test]
	fn empty_deck_shows_default_label() {
		let surface = Recorder::default();
		render(&TurntableState::default(), None, 400.0, 300.0, &surface);
		let ops = surface.ops();
		assert_eq!(ops[0], Op::Rect(BACKGROUND.into()));
		assert!(ops.iter().any(|op| matches!(op, Op::Text(t, _) if t == "APPLESonic")));
		assert!(!ops.iter().any(|op| matches!(op, Op::Image(..))));
	}

	#[test]
	fn label_turns_with_the_record() {
		let mut deck = TurntableState::default();
		deck.load(0);
		deck.tick();
		let surface = Recorder::default();
		render(&deck, Some(&"cover"), 400.0, 300.0, &surface);
		let ops = surface.ops();
		assert!(ops.contains(&Op::Transform(200.0, 150.0, 1.0, 2.5f64.to_radians())));
		let transform = ops
			.iter()
			.position(|op| matches!(op, Op::Transform(..)))
			.unwrap();
		assert_eq!(ops[transform + 1], Op::Image("cover", (0.0, 0.0), 1.0));
	}
}
