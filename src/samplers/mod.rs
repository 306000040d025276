//! Defines the `Sampler` trait - an object that can draw random joint samples from a
//! `BayesNet`.

use crate::util::Result;
use crate::variable::Assignment;

pub mod forward;

pub use self::forward::ForwardSampler;

pub trait Sampler {
    /// Draw one full joint sample (a complete `Assignment`) from the associated network.
    ///
    /// # Errors
    /// A malformed network surfaces as the underlying CPT lookup failure.
    fn sample(&mut self) -> Result<Assignment>;
}
