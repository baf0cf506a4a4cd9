use crate::error::{EngineError, Result};
use crate::V2;
use protocol::config::Bounds;

// world boundary
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Posbox {
	pub xmin: f64,
	pub xmax: f64,
	pub ymin: f64,
	pub ymax: f64,
}

impl Posbox {
	pub fn from_bounds(bounds: &Bounds) -> Result<Self> {
		let [xmin, ymin] = bounds.top;
		let [xmax, ymax] = bounds.right;
		let finite = [xmin, xmax, ymin, ymax].iter().all(|x| x.is_finite());
		if !finite || xmax <= xmin || ymax <= ymin {
			return Err(EngineError::InvalidBounds {
				top: bounds.top,
				right: bounds.right,
			});
		}
		Ok(Self {
			xmin,
			xmax,
			ymin,
			ymax,
		})
	}

	pub fn width(&self) -> f64 {
		self.xmax - self.xmin
	}

	pub fn height(&self) -> f64 {
		self.ymax - self.ymin
	}

	pub fn apply(&self, pos: &mut V2) -> bool {
		let x = pos[0].min(self.xmax).max(self.xmin);
		let y = pos[1].min(self.ymax).max(self.ymin);
		let flag = x != pos[0] || y != pos[1];
		pos[0] = x;
		pos[1] = y;
		flag
	}
}
