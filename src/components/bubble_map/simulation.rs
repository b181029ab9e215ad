//! Per-frame spring model: neighbours flee a hovered bubble, then drift home
//! once the hover ends.

use super::layout::Bubble;
use crate::config::SimulationConfig;

/// Push every bubble near `target` away from it. The target itself is held
/// still so it stays under the pointer.
pub fn apply_repulsion(bubbles: &mut [Bubble], target: usize, cfg: &SimulationConfig) {
	let Some(t) = bubbles.get(target) else {
		return;
	};
	let (tx, ty) = (t.x, t.y);
	let reach = t.radius * cfg.repulsion_multiplier;

	for (i, b) in bubbles.iter_mut().enumerate() {
		if i == target {
			b.vx = 0.0;
			b.vy = 0.0;
			continue;
		}
		let (dx, dy) = (b.x - tx, b.y - ty);
		let d = dx.hypot(dy);
		// d == 0 has no direction
		if d > 0.0 && d < reach {
			let force = (reach - d) / reach * cfg.repulsion_strength;
			b.vx += dx / d * force;
			b.vy += dy / d * force;
		}
		b.x += b.vx;
		b.y += b.vy;
		b.vx *= cfg.repulsion_damping;
		b.vy *= cfg.repulsion_damping;
	}
}

/// Spring every bubble back toward its rest position.
pub fn apply_return(bubbles: &mut [Bubble], cfg: &SimulationConfig) {
	for b in bubbles.iter_mut() {
		b.vx += (b.rest_x - b.x) * cfg.return_strength;
		b.vy += (b.rest_y - b.y) * cfg.return_strength;
		b.x += b.vx;
		b.y += b.vy;
		b.vx *= cfg.return_damping;
		b.vy *= cfg.return_damping;
	}
}

/// One frame: repulsion while something is hovered, return otherwise.
pub fn step(bubbles: &mut [Bubble], hovered: Option<usize>, cfg: &SimulationConfig) {
	match hovered {
		Some(target) => apply_repulsion(bubbles, target, cfg),
		None => apply_return(bubbles, cfg),
	}
}
