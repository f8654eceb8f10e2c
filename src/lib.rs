//! # Twine Reactive Transport
//!
//! Operator-splitting coupling of transport and chemistry process kernels for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: The reactive transport coordinator and its [`twine_core::Model`] adapters.
//! - [`support`]: Supporting utilities used by models (field storage, units, constraints).
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Model-specific utility code lives in a model's internal `core` module and
//! only moves to [`support`] once more than one model needs it.

pub mod models;
pub mod support;
