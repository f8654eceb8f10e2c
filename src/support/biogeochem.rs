//! Small numeric helpers for soil biogeochemistry.
//!
//! - [`q10_effect`]: temperature response of a biological rate.
//! - [`permafrost_depth_index`] and [`permafrost_depth`]: locate the
//!   shallowest frozen layer of a soil column.

mod permafrost;
mod q10;

pub use permafrost::{
    PermafrostError, freezing_point, permafrost_depth, permafrost_depth_index,
};
pub use q10::q10_effect;
