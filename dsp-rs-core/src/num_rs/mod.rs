//! Best effort parallels of numpy routines.

mod convolve;
mod cumsum;
mod diff;

pub use convolve::*;
pub use cumsum::*;
pub use diff::*;
