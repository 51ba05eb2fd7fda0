//! Shared trait-first kernel substrate.
//!
//! Every numeric operation of the crate is available as a kernel: a small
//! struct built from a validated `*Config` through [`KernelLifecycle`], that
//! reads its input through [`Read1D`] and writes either into a caller-provided
//! [`Write1D`] buffer or into a freshly allocated one.

mod errors;
mod io;
mod lifecycle;

pub use errors::*;
pub use io::*;
pub use lifecycle::*;
