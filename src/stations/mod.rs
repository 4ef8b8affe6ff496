pub mod catalog;
pub mod error;
pub mod geodesic;
pub mod resolver;
