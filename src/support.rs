//! Supporting utilities shared by models.

pub mod biogeochem;
pub mod constraint;
pub mod state;
pub mod units;
