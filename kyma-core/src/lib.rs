//! Board-agnostic core logic for the Kyma visualizer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Asymmetric rise/decay smoothing for meter values
//! - Render mode selection and mode-gated packet dispatch
//! - Scrolling bar-graph and spectrum state
//! - Pot moving average with periodic host reporting
//! - Button debouncing
//! - The `RenderTarget` trait seam toward the display subsystem

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bars;
pub mod debounce;
pub mod dispatch;
pub mod mode;
pub mod sampler;
pub mod smooth;
pub mod spectrum;
pub mod traits;
