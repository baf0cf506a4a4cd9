pub mod body;
pub mod broad_phase;
pub mod collision;
pub mod config;
pub mod constraint;
pub mod engine;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod grid;
pub mod hull;
pub mod particle;
pub mod posbox;
pub mod scene;
pub mod time_manager;
pub mod worker;

pub type V2 = nalgebra::Vector2<f64>;
pub type C2 = nalgebra::Vector2<usize>;

pub use body::Body;
pub use engine::Engine;
pub use error::{EngineError, Result};
