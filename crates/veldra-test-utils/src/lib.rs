//! Test utilities for Veldra crates.
//!
//! The main component is [`MockGpu`] (behind the `mock` feature): a
//! [`GpuApi`](veldra_gpu::GpuApi) implementation that records every call and
//! tracks pipeline state without touching a real GPU, so the coordination
//! layer's contracts can be verified in plain unit tests.

#[cfg(feature = "mock")]
pub mod mock_gpu;

#[cfg(feature = "mock")]
pub use mock_gpu::*;
