use crate::body::polygon;
use crate::body::trellis::TrellisTemplate;
use crate::body::Body;
use crate::constraint::linear::DEFAULT_RESTITUTION;
use crate::error::{EngineError, Result};
use crate::V2;
use protocol::body_request::{BodyRequest, BodyType};

pub const DEFAULT_SIZE: f64 = 40.;
pub const DEFAULT_K: usize = 5;
pub const DEFAULT_RESOLUTION: usize = 4;

fn invalid(msg: String) -> EngineError {
	EngineError::InvalidRequest(msg)
}

fn positive(name: &str, value: f64) -> Result<f64> {
	if value.is_finite() && value > 0. {
		Ok(value)
	} else {
		Err(invalid(format!("{} must be finite and positive, got {}", name, value)))
	}
}

/// Builds the body described by a request, `x, y` being its centre.
pub fn build(req: &BodyRequest) -> Result<Body> {
	if !req.x.is_finite() || !req.y.is_finite() {
		return Err(invalid(format!("non-finite position ({}, {})", req.x, req.y)));
	}
	let is_static = req.is_static.unwrap_or(false);
	let size = positive("size", req.size.unwrap_or(DEFAULT_SIZE))?;
	let width = positive("width", req.width.unwrap_or(size))?;
	let height = positive("height", req.height.unwrap_or(size))?;

	let body = match req.ty {
		BodyType::Triangle => {
			polygon::triangle(req.x, req.y, size, is_static, DEFAULT_RESTITUTION)
		}
		BodyType::Rectangle => polygon::rectangle(
			req.x,
			req.y,
			width,
			height,
			is_static,
			DEFAULT_RESTITUTION,
		),
		BodyType::Polygon => {
			let k = req.k.unwrap_or(DEFAULT_K);
			if k < 3 {
				return Err(invalid(format!("k must be at least 3, got {}", k)));
			}
			polygon::regular(req.x, req.y, size, k, is_static, DEFAULT_RESTITUTION)
		}
		BodyType::Trellis => {
			let nx = req.nx.unwrap_or(DEFAULT_RESOLUTION);
			let ny = req.ny.unwrap_or(DEFAULT_RESOLUTION);
			if nx == 0 || ny == 0 {
				return Err(invalid(format!("trellis needs nx, ny >= 1, got {}x{}", nx, ny)));
			}
			let corner = V2::new(req.x - width / 2., req.y - height / 2.);
			let mut template = TrellisTemplate::new(corner, V2::new(width, height), nx, ny);
			if req.stiff.unwrap_or(false) {
				template = template.stiff();
			}
			if req.reinforce.unwrap_or(false) {
				template = template.reinforced();
			}
			if is_static {
				template = template.pinned();
			}
			template.build()
		}
	};
	tracing::debug!(
		"built {:?}: {} particles, {} constraints",
		req.ty,
		body.particles.len(),
		body.constraints.len()
	);
	Ok(body)
}
