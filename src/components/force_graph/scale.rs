//! Mappings from node data to visual attributes.

/// Nine-step diverging "Spectral" scheme.
pub const SPECTRAL_9: [&str; 9] = [
	"#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598", "#abdda4", "#66c2a5",
	"#3288bd",
];

pub const ENTER_COLOR: &str = "#008000";
pub const EXIT_COLOR: &str = "#ff0000";

/// Groups at or past this depth share the small fixed radius.
pub const DEEP_GROUP: u32 = 6;
pub const DEEP_RADIUS: f64 = 7.0;
pub const MAX_RADIUS: f64 = 18.0;

/// Radius a node grows to once it has entered.
pub fn target_radius(group: u32) -> f64 {
	if group < DEEP_GROUP {
		MAX_RADIUS / (group as f64 + 1.0).sqrt()
	} else {
		DEEP_RADIUS
	}
}

/// Categorical colour scale: each new group takes the next palette entry,
/// wrapping around once the palette is exhausted.
#[derive(Clone, Debug, Default)]
pub struct OrdinalScale {
	domain: Vec<u32>,
}

impl OrdinalScale {
	pub fn color(&mut self, group: u32) -> &'static str {
		let idx = match self.domain.iter().position(|&g| g == group) {
			Some(idx) => idx,
			None => {
				self.domain.push(group);
				self.domain.len() - 1
			}
		};
		SPECTRAL_9[idx % SPECTRAL_9.len()]
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
	/// Parses `#rrggbb`.
	pub fn from_hex(hex: &str) -> Option<Self> {
		let hex = hex.strip_prefix('#')?;
		if hex.len() != 6 {
			return None;
		}
		let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
		Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
	}

	pub fn lerp(self, to: Rgb, t: f64) -> Rgb {
		let t = t.clamp(0.0, 1.0);
		let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
		Rgb(mix(self.0, to.0), mix(self.1, to.1), mix(self.2, to.2))
	}

	pub fn css(self) -> String {
		format!("rgb({}, {}, {})", self.0, self.1, self.2)
	}
}

pub fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0);
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// Eased interpolation between two values over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
	pub from: f64,
	pub to: f64,
	pub elapsed_ms: f64,
	pub duration_ms: f64,
}

impl Tween {
	pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
		Self {
			from,
			to,
			elapsed_ms: 0.0,
			duration_ms,
		}
	}

	pub fn advance(&mut self, dt_ms: f64) {
		self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
	}

	/// Linear progress in `[0, 1]`.
	pub fn progress(&self) -> f64 {
		if self.duration_ms <= 0.0 {
			1.0
		} else {
			self.elapsed_ms / self.duration_ms
		}
	}

	pub fn value(&self) -> f64 {
		self.from + (self.to - self.from) * ease_cubic_in_out(self.progress())
	}

	pub fn is_done(&self) -> bool {
		self.progress() >= 1.0
	}
}
