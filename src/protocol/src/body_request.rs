use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
	Triangle,
	Rectangle,
	Polygon,
	Trellis,
}

// x, y: body centre
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyRequest {
	pub ty: BodyType,
	pub x: f64,
	pub y: f64,
	pub is_static: Option<bool>,
	pub size: Option<f64>,
	pub width: Option<f64>,
	pub height: Option<f64>,
	// polygon vertex count
	pub k: Option<usize>,
	// trellis resolution
	pub nx: Option<usize>,
	pub ny: Option<usize>,
	pub stiff: Option<bool>,
	pub reinforce: Option<bool>,
}

impl BodyRequest {
	pub fn new(ty: BodyType, x: f64, y: f64) -> Self {
		Self {
			ty,
			x,
			y,
			is_static: None,
			size: None,
			width: None,
			height: None,
			k: None,
			nx: None,
			ny: None,
			stiff: None,
			reinforce: None,
		}
	}

	pub fn with_static(mut self, is_static: bool) -> Self {
		self.is_static = Some(is_static);
		self
	}

	pub fn with_size(mut self, size: f64) -> Self {
		self.size = Some(size);
		self
	}

	pub fn with_width(mut self, width: f64) -> Self {
		self.width = Some(width);
		self
	}

	pub fn with_height(mut self, height: f64) -> Self {
		self.height = Some(height);
		self
	}

	pub fn with_k(mut self, k: usize) -> Self {
		self.k = Some(k);
		self
	}

	pub fn with_grid(mut self, nx: usize, ny: usize) -> Self {
		self.nx = Some(nx);
		self.ny = Some(ny);
		self
	}

	pub fn with_stiff(mut self, stiff: bool) -> Self {
		self.stiff = Some(stiff);
		self
	}

	pub fn with_reinforce(mut self, reinforce: bool) -> Self {
		self.reinforce = Some(reinforce);
		self
	}
}
