use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
	#[error("invalid world bounds: top {top:?}, right {right:?}")]
	InvalidBounds { top: [f64; 2], right: [f64; 2] },
	#[error("invalid grid cell size {0} (must be finite and positive)")]
	InvalidCellSize(f64),
	#[error("relaxation needs at least one iteration")]
	InvalidIterations,
	#[error("invalid damping constant {0}")]
	InvalidDamping(f64),
	#[error("invalid gravity {0:?}")]
	InvalidGravity([f64; 2]),
	#[error("invalid particle mass {0} (must be finite and positive)")]
	InvalidMass(f64),
	#[error("invalid body request: {0}")]
	InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_error_display() {
		let err = EngineError::InvalidCellSize(-1.);
		assert!(format!("{err}").contains("-1"));
		let err = EngineError::InvalidRequest("k must be at least 3".into());
		assert_eq!(format!("{err}"), "invalid body request: k must be at least 3");
	}
}
