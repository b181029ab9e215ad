pub const SPIN_STEP_DEG: f64 = 2.5;
pub const ARM_PLAYING_DEG: f64 = -25.0;
pub const ARM_RESTING_DEG: f64 = 35.0;
const ARM_EASE: f64 = 0.1;

/// What a press on the player did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
	/// Nothing is loaded; the caller should pick a track.
	NeedsTrack,
	Playing,
	Paused,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TurntableState {
	pub track: Option<usize>,
	pub playing: bool,
	/// Record rotation in degrees, kept in `[0, 360)`.
	pub rotation: f64,
	/// Tonearm swing in degrees; eases toward the playing or resting angle.
	pub tonearm: f64,
}

impl Default for TurntableState {
	fn default() -> Self {
		Self {
			track: None,
			playing: false,
			rotation: 0.0,
			tonearm: ARM_RESTING_DEG,
		}
	}
}

impl TurntableState {
	/// Put a record on and start it from the top.
	pub fn load(&mut self, track: usize) {
		self.track = Some(track);
		self.playing = true;
		self.rotation = 0.0;
	}

	pub fn toggle(&mut self) -> Toggle {
		if self.track.is_none() {
			return Toggle::NeedsTrack;
		}
		self.playing = !self.playing;
		if self.playing {
			Toggle::Playing
		} else {
			Toggle::Paused
		}
	}

	pub fn tick(&mut self) {
		if self.playing {
			self.rotation = (self.rotation + SPIN_STEP_DEG) % 360.0;
		}
		let target = if self.playing {
			ARM_PLAYING_DEG
		} else {
			ARM_RESTING_DEG
		};
		self.tonearm += (target - self.tonearm) * ARM_EASE;
	}
}
