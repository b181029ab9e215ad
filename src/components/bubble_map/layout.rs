use crate::config::LayoutConfig;

/// Per-track render state, moved every frame by the simulation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bubble {
	pub track: usize,
	pub x: f64,
	pub y: f64,
	pub rest_x: f64,
	pub rest_y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
}

impl Bubble {
	pub fn new(track: usize, radius: f64) -> Self {
		Self {
			track,
			radius,
			..Self::default()
		}
	}

	pub fn contains(&self, wx: f64, wy: f64) -> bool {
		(self.x - wx).hypot(self.y - wy) < self.radius
	}

	#[cfg(test)]
	pub fn displacement(&self) -> f64 {
		(self.x - self.rest_x).hypot(self.y - self.rest_y)
	}
}

/// Power-law radius for a play count, clamped to the configured range.
pub fn radius_for_plays(plays: u32, max_plays: u32, cfg: &LayoutConfig) -> f64 {
	let span = f64::from(max_plays.max(2) - 1);
	let norm = ((f64::from(plays) - 1.0) / span).clamp(0.0, 1.0);
	cfg.min_radius + norm.powf(cfg.radius_exponent) * (cfg.max_radius - cfg.min_radius)
}

/// Rest position of the `i`-th bubble on the golden-angle spiral, relative to
/// the viewport centre.
pub fn spiral_position(i: usize, width: f64, height: f64, cfg: &LayoutConfig) -> (f64, f64) {
	let unit = width.min(height) * cfg.scale_factor;
	let angle = i as f64 * cfg.golden_angle;
	let r = unit * ((i + 1) as f64).sqrt() * cfg.spacing;
	(r * angle.cos(), r * angle.sin())
}

/// Place every bubble at rest on the spiral. Runs on creation and resize.
pub fn arrange_spiral(bubbles: &mut [Bubble], width: f64, height: f64, cfg: &LayoutConfig) {
	for (i, b) in bubbles.iter_mut().enumerate() {
		let (x, y) = spiral_position(i, width, height, cfg);
		b.x = x;
		b.y = y;
		b.rest_x = x;
		b.rest_y = y;
		b.vx = 0.0;
		b.vy = 0.0;
	}
}
