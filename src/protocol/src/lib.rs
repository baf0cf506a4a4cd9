pub mod body_request;
pub mod config;
pub mod pr_model;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use body_request::BodyRequest;
use config::Config;
use pr_model::SimulationState;

#[derive(Debug, Error)]
pub enum ProtocolError {
	#[error("cannot encode message: {0}")]
	Encode(bincode::Error),
	#[error("cannot decode message: {0}")]
	Decode(bincode::Error),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

// host -> simulation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
	Start {
		config: Config,
		objects: Vec<BodyRequest>,
	},
	AddBody(BodyRequest),
	TogglePause,
	FrameForward,
	Stop,
}

// simulation -> host
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Message {
	Ready,
	State(SimulationState),
	Rejected(String),
}

impl Command {
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		bincode::serialize(self).map_err(ProtocolError::Encode)
	}

	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		bincode::deserialize(bytes).map_err(ProtocolError::Decode)
	}
}

impl Message {
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		bincode::serialize(self).map_err(ProtocolError::Encode)
	}

	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		bincode::deserialize(bytes).map_err(ProtocolError::Decode)
	}
}
