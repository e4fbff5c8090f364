//! Heave Core Primitives
//!
//! This crate provides the foundational types for the Heave widget kit:
//!
//! - **Color**: Linear RGBA color with interpolation, used for tint propagation
//! - **Geometry**: Points, sizes, and rectangles for content-view placement
//! - **State Machines**: The `StateTransitions` trait driving widget lifecycle
//!
//! # Example
//!
//! ```rust
//! use heave_core::{Color, Rect};
//!
//! let tint = Color::from_hex(0x007AFF);
//! let bounds = Rect::new(0.0, 0.0, 320.0, 60.0);
//! let center = bounds.center();
//! assert_eq!(center.x, 160.0);
//! assert!(tint.a == 1.0);
//! ```

pub mod color;
pub mod fsm;
pub mod geometry;

pub use color::Color;
pub use fsm::StateTransitions;
pub use geometry::{Point, Rect, Size};
