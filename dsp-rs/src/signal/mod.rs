//! Time-domain and frequency-domain signal operations.

pub mod accumulate;
pub mod convolve;
pub mod dft;
pub mod frequency;
pub mod traits;
pub mod wave;
