//! # Tessera Core
//!
//! Plain geometry for a retained-mode UI:
//! - Integer pixel rectangles, points, sizes and margins
//! - Anchor flags and the reflow rules applied when a parent resizes
//! - RGBA colors
//!
//! ## Coordinate spaces
//!
//! ```text
//!   origin rect ┌──────────────────────────┐  absolute rect expanded by
//!               │  absolute rect           │  the skin's origin margins
//!               │  ┌────────────────────┐  │
//!               │  │ client rect        │  │  origin rect inset by the
//!               │  │  (children live    │  │  skin's client margins
//!               │  │   here)            │  │
//!               │  └────────────────────┘  │
//!               └──────────────────────────┘
//! ```
//!
//! Nothing in this crate knows about controls; `tessera_ui` feeds it values.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod anchor;
pub mod color;
pub mod math;

pub use anchor::{anchor_margins, center_shift, reflow, Anchors};
pub use color::Color;
pub use math::{Margins, Point, Rect, Size};
