//! Session-wide constants and the light/dark theme.

/// Bounds and timings for the layout engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Canvas width in CSS pixels.
	pub width: f64,
	/// Canvas height in CSS pixels.
	pub height: f64,
	/// Allowed zoom range `(min, max)`.
	pub scale_extent: (f64, f64),
	/// Grow-in duration for entering nodes.
	pub enter_ms: f64,
	/// Shrink-out duration for exiting nodes.
	pub exit_ms: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			width: 1500.0,
			height: 900.0,
			scale_extent: (0.3, 8.0),
			enter_ms: 900.0,
			exit_ms: 1300.0,
		}
	}
}

/// Everything the app needs to know up front. There is no config file; this
/// is built once from `Default` and handed to the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VizConfig {
	/// Root of the GitHub REST API.
	pub api_base: &'static str,
	/// Number of commits listed in the commit panel.
	pub commits_back: u8,
	/// Number of issues listed in the issue panel.
	pub issues_back: u8,
	/// Commit messages longer than this are cut and suffixed with `...`.
	pub message_char_limit: usize,
	/// Canvas and animation settings.
	pub layout: LayoutConfig,
}

impl Default for VizConfig {
	fn default() -> Self {
		Self {
			api_base: "https://api.github.com",
			commits_back: 30,
			issues_back: 20,
			message_char_limit: 60,
			layout: LayoutConfig::default(),
		}
	}
}

/// Global visual theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	/// Dark text on white.
	#[default]
	Light,
	/// White text on black.
	Dark,
}

impl Theme {
	/// The other theme.
	pub fn toggled(self) -> Self {
		match self {
			Theme::Light => Theme::Dark,
			Theme::Dark => Theme::Light,
		}
	}

	/// Page and panel background colour.
	pub fn background(self) -> &'static str {
		match self {
			Theme::Light => "white",
			Theme::Dark => "black",
		}
	}

	/// Text colour.
	pub fn foreground(self) -> &'static str {
		match self {
			Theme::Light => "black",
			Theme::Dark => "white",
		}
	}

	/// Inline style fragment setting both colours.
	pub fn colors(self) -> String {
		format!(
			"background-color: {}; color: {};",
			self.background(),
			self.foreground()
		)
	}

	/// Label for the toggle button.
	pub fn toggle_label(self) -> &'static str {
		match self {
			Theme::Light => "Dark mode",
			Theme::Dark => "Light mode",
		}
	}
}
