pub mod curves;
pub mod duration;
pub mod error;
pub mod intensity;
