use crate::error::{EngineError, Result};
use crate::posbox::Posbox;
use protocol::config::{BroadPhaseMode, Config};

const DEFAULT_CELLS: f64 = 10.;
const MAX_CELLS: f64 = (1 << 20) as f64;

/// Checks a configuration and returns the world box it describes.
pub fn validate(config: &Config) -> Result<Posbox> {
	let posbox = Posbox::from_bounds(&config.bounds)?;
	if let Some(csize) = config.cell_size {
		if !csize.is_finite() || csize <= 0. {
			return Err(EngineError::InvalidCellSize(csize));
		}
		if config.broad_phase == BroadPhaseMode::Naive {
			tracing::warn!("cell size {} ignored in naive broad phase", csize);
		}
	}
	if config.iterations == 0 {
		return Err(EngineError::InvalidIterations);
	}
	if !config.damping.is_finite() || config.damping < 0. {
		return Err(EngineError::InvalidDamping(config.damping));
	}
	if !config.gravity.iter().all(|g| g.is_finite()) {
		return Err(EngineError::InvalidGravity(config.gravity));
	}
	if config.broad_phase == BroadPhaseMode::Grid {
		let csize = cell_size(config, &posbox);
		let cells = (posbox.width() / csize).ceil() * (posbox.height() / csize).ceil();
		if !cells.is_finite() || cells > MAX_CELLS {
			return Err(EngineError::InvalidCellSize(csize));
		}
	}
	Ok(posbox)
}

pub fn cell_size(config: &Config, posbox: &Posbox) -> f64 {
	config
		.cell_size
		.unwrap_or_else(|| posbox.width().max(posbox.height()) / DEFAULT_CELLS)
}
