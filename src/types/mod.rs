pub mod curve_point;
pub mod idf_record;
pub mod intensity_unit;
pub mod province;
pub mod station;
