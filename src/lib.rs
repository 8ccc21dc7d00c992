#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Deterministic, space-filling hyperparameter designs driven by scrambled
//! Sobol' sequences. Describe a parameter space as named [`Scale`]s
//! (discrete choices, linear and geometric ranges, weighted mixtures,
//! composed post-processing) and get `2^m` configurations whose projection
//! onto every dimension is far more even than independent random draws.
//!
//! # Getting Started
//!
//! ```
//! use quasisweep::prelude::*;
//!
//! let space = Space::builder()
//!     .dimension("lr", Geometric::log_uniform(1e-5, 1e-1)?)
//!     .dimension("dropout", MinMax::new(0.0, 0.5)?)
//!     .dimension("optimizer", Discrete::labels(["sgd", "adam", "rmsprop"])?)
//!     .build()?;
//!
//! let configs = Design::builder().seed(7).exponent(4).build()?.generate(&space)?;
//! assert_eq!(configs.len(), 16);
//!
//! let lr: f64 = configs[3].get_as("lr")?;
//! assert!((1e-5..=1e-1).contains(&lr));
//! # Ok::<(), quasisweep::Error>(())
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Scale`] | Map a coordinate in `[0, 1]` to a typed parameter value. |
//! | [`Space`] | Ordered, uniquely named dimensions, each with a scale. |
//! | [`Design`] | Seed and size `2^m` of one batch; generates configurations. |
//! | [`SampleMatrix`](sequence::SampleMatrix) | The `d × 2^m` coordinates a batch is built from. |
//! | [`Configuration`] | One record: a [`Value`] per dimension, in declaration order. |
//!
//! # How a batch is built
//!
//! 1. [`sequence::sobol::generate`] emits the first `2^m` points of the
//!    Sobol' sequence, starting with the all-zero point so every power-of-two
//!    prefix stays equidistributed.
//! 2. [`sequence::scramble::Scrambler`] applies an independent Matoušek
//!    linear scramble and random digital shift to every dimension.
//! 3. [`design::assemble`] maps each column through the space's scales and
//!    narrows every value into its scale's declared [`ValueType`].
//!
//! Generation is a pure function of `(seed, space, m)`: the same inputs give
//! bit-identical output, and a finished [`SampleMatrix`](sequence::SampleMatrix)
//! can be split by column range across threads with
//! [`design::assemble_range`].
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `derive` | `#[derive(FromConfiguration)]` for typed records | off |
//! | `serde` | `Serialize`/`Deserialize` on [`Value`], [`ValueType`], [`SampleMatrix`](sequence::SampleMatrix); `Serialize` on [`Configuration`] | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) during generation | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod configuration;
pub mod design;
mod error;
pub mod scale;
pub mod sequence;
mod space;
mod value;

pub use configuration::{Configuration, FromConfiguration};
pub use design::{DEFAULT_SEED, Design, DesignBuilder, sample, sample_with_seed};
pub use error::{Error, Result};
#[cfg(feature = "derive")]
pub use quasisweep_derive::FromConfiguration;
pub use scale::{DynScale, Scale};
pub use space::{Dimension, Space, SpaceBuilder};
pub use value::{ScaleValue, Value, ValueType};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use quasisweep::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "derive")]
    pub use quasisweep_derive::FromConfiguration;

    pub use crate::configuration::{Configuration, FromConfiguration};
    pub use crate::design::{DEFAULT_SEED, Design, assemble, assemble_range, sample};
    pub use crate::error::{Error, Result};
    pub use crate::scale::{
        Constant, Discrete, DynScale, Geometric, MinMax, Mixture, Scale, TypeInference,
    };
    pub use crate::sequence::SampleMatrix;
    pub use crate::space::Space;
    pub use crate::value::{ScaleValue, Value, ValueType};
}
