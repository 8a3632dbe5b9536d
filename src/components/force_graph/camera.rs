use std::f64::consts::FRAC_PI_2;

use super::simulation::Vec3;

const FOV_DEGREES: f64 = 40.0;
const NEAR: f64 = 1.0;
const ORBIT_SPEED: f64 = 0.005;
const MIN_DISTANCE: f64 = 20.0;
const MAX_DISTANCE: f64 = 20_000.0;

/// A world point mapped onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	/// Distance from the camera along its view axis.
	pub depth: f64,
	/// Screen pixels per world unit at this depth.
	pub scale: f64,
}

/// Perspective camera orbiting the origin.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
	pub yaw: f64,
	pub pitch: f64,
	pub distance: f64,
	pub width: f64,
	pub height: f64,
}

impl OrbitCamera {
	/// Places the camera far enough back to frame `node_count` nodes.
	pub fn framing(node_count: usize, width: f64, height: f64) -> Self {
		Self {
			yaw: 0.0,
			pitch: 0.0,
			distance: (node_count.max(1) as f64).cbrt() * 170.0,
			width,
			height,
		}
	}

	fn focal(&self) -> f64 {
		(self.height / 2.0) / (FOV_DEGREES.to_radians() / 2.0).tan()
	}

	pub fn project(&self, p: Vec3) -> Option<Projected> {
		let (sy, cy) = self.yaw.sin_cos();
		let (sp, cp) = self.pitch.sin_cos();

		let x1 = p.x * cy - p.z * sy;
		let z1 = p.x * sy + p.z * cy;
		let y2 = p.y * cp - z1 * sp;
		let z2 = p.y * sp + z1 * cp;

		let depth = self.distance - z2;
		if depth < NEAR {
			return None;
		}
		let scale = self.focal() / depth;
		Some(Projected {
			x: self.width / 2.0 + x1 * scale,
			y: self.height / 2.0 - y2 * scale,
			depth,
			scale,
		})
	}

	/// Inverse of [`OrbitCamera::project`] for a screen point at `depth`.
	pub fn unproject(&self, sx: f64, sy: f64, depth: f64) -> Vec3 {
		let scale = self.focal() / depth;
		let x1 = (sx - self.width / 2.0) / scale;
		let y2 = -(sy - self.height / 2.0) / scale;
		let z2 = self.distance - depth;

		let (s_yaw, c_yaw) = self.yaw.sin_cos();
		let (sp, cp) = self.pitch.sin_cos();

		let y = y2 * cp + z2 * sp;
		let z1 = -y2 * sp + z2 * cp;
		Vec3::new(x1 * c_yaw + z1 * s_yaw, y, -x1 * s_yaw + z1 * c_yaw)
	}

	pub fn orbit(&mut self, dx: f64, dy: f64) {
		self.yaw += dx * ORBIT_SPEED;
		self.pitch = (self.pitch + dy * ORBIT_SPEED).clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);
	}

	pub fn zoom(&mut self, factor: f64) {
		self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
