//! Application settings shared through the reactive context.

/// Where the graph backend lives and how the viewer tunes its layout.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// Base URL of the graph backend, without a trailing slash.
	pub api_base: String,
	/// Strength applied to every link force once link values are known.
	pub link_strength: f64,
	/// Directional particles drawn on each highlighted link.
	pub particles_per_link: usize,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base: "http://localhost:8080".into(),
			link_strength: 0.05,
			particles_per_link: 4,
		}
	}
}
