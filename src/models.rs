//! Public Twine models.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the actual computation and domain logic lives. The `core` module is an
//! implementation detail; the model module re-exports what callers need.
//!
//! [`twine_core::Model`] implementations are thin adapters that delegate to
//! the model-specific core API.

pub mod reactive_transport;
