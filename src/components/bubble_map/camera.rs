use crate::config::CameraConfig;

/// Zoom and pan, with pan measured from the viewport centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
	pub zoom: f64,
	pub pan_x: f64,
	pub pan_y: f64,
	limits: CameraConfig,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub pan_start_x: f64,
	pub pan_start_y: f64,
}

impl Camera {
	pub fn new(limits: CameraConfig) -> Self {
		Self {
			zoom: 1.0,
			pan_x: 0.0,
			pan_y: 0.0,
			limits,
		}
	}

	/// Screen-space origin of world `(0, 0)`.
	pub fn origin(&self, width: f64, height: f64) -> (f64, f64) {
		(width / 2.0 + self.pan_x, height / 2.0 + self.pan_y)
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64, width: f64, height: f64) -> (f64, f64) {
		let (ox, oy) = self.origin(width, height);
		((sx - ox) / self.zoom, (sy - oy) / self.zoom)
	}

	pub fn world_to_screen(&self, wx: f64, wy: f64, width: f64, height: f64) -> (f64, f64) {
		let (ox, oy) = self.origin(width, height);
		(wx * self.zoom + ox, wy * self.zoom + oy)
	}

	/// Zoom one wheel notch toward (`zoom_in`) or away from the cursor,
	/// keeping the world point under the cursor fixed on screen.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, width: f64, height: f64, zoom_in: bool) {
		let step = if zoom_in {
			self.limits.zoom_in_step
		} else {
			self.limits.zoom_out_step
		};
		let new_zoom = (self.zoom * step).clamp(self.limits.zoom_min, self.limits.zoom_max);
		let ratio = new_zoom / self.zoom;
		let (mx, my) = (sx - width / 2.0, sy - height / 2.0);
		self.pan_x = mx - (mx - self.pan_x) * ratio;
		self.pan_y = my - (my - self.pan_y) * ratio;
		self.zoom = new_zoom;
	}

	pub fn begin_pan(&self, pan: &mut PanState, sx: f64, sy: f64) {
		*pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			pan_start_x: self.pan_x,
			pan_start_y: self.pan_y,
		};
	}

	pub fn drag_pan(&mut self, pan: &PanState, sx: f64, sy: f64) {
		if pan.active {
			self.pan_x = pan.pan_start_x + (sx - pan.start_x);
			self.pan_y = pan.pan_start_y + (sy - pan.start_y);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const W: f64 = 900.0;
	const H: f64 = 600.0;

	fn close(a: (f64, f64), b: (f64, f64)) -> bool {
		(a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
	}

	#[test]
	fn world_screen_round_trip_at_identity_and_offset() {
		let mut cam = Camera::new(CameraConfig::default());
		assert_eq!(cam.screen_to_world(W / 2.0, H / 2.0, W, H), (0.0, 0.0));
		cam.pan_x = 40.0;
		cam.pan_y = -25.0;
		cam.zoom = 2.0;
		let w = cam.screen_to_world(100.0, 80.0, W, H);
		assert!(close(cam.world_to_screen(w.0, w.1, W, H), (100.0, 80.0)));
	}

	#[test]
	fn zoom_keeps_point_under_cursor_fixed() {
		let mut cam = Camera::new(CameraConfig::default());
		cam.pan_x = 13.0;
		cam.pan_y = -7.0;
		for (i, &(sx, sy)) in [(120.0, 40.0), (700.0, 580.0), (450.0, 300.0)]
			.iter()
			.enumerate()
		{
			let before = cam.screen_to_world(sx, sy, W, H);
			cam.zoom_at(sx, sy, W, H, i % 2 == 0);
			let after = cam.world_to_screen(before.0, before.1, W, H);
			assert!(close(after, (sx, sy)), "{after:?} != {:?}", (sx, sy));
		}
	}

	#[test]
	fn zoom_is_clamped_and_still_anchored() {
		let mut cam = Camera::new(CameraConfig::default());
		for _ in 0..100 {
			let before = cam.screen_to_world(200.0, 150.0, W, H);
			cam.zoom_at(200.0, 150.0, W, H, true);
			let after = cam.world_to_screen(before.0, before.1, W, H);
			assert!(close(after, (200.0, 150.0)));
		}
		assert_eq!(cam.zoom, 4.0);
		for _ in 0..100 {
			cam.zoom_at(10.0, 10.0, W, H, false);
		}
		assert_eq!(cam.zoom, 0.4);
	}

	#[test]
	fn drag_pans_relative_to_press_point() {
		let mut cam = Camera::new(CameraConfig::default());
		cam.pan_x = 5.0;
		let mut pan = PanState::default();
		cam.drag_pan(&pan, 50.0, 50.0);
		assert_eq!(cam.pan_x, 5.0);
		cam.begin_pan(&mut pan, 100.0, 100.0);
		cam.drag_pan(&pan, 130.0, 90.0);
		assert_eq!((cam.pan_x, cam.pan_y), (35.0, -10.0));
	}
}
