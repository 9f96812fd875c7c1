#![warn(missing_docs)]

//! Cross-section construction for the resection surface engine.
//!
//! A closed ring is cut at a stable seam ([`select_seam`]), its two sides are
//! joined into ribs ([`build_ribs`]), and the ribs' principal axes give a
//! shared sweep direction. [`build_cross_sections`] emits the resulting
//! structured grid, ready for Bézier fitting.

pub mod builder;
pub mod error;
pub mod ribs;
pub mod seam;

pub use builder::{build_cross_sections, CrossSectionSettings, CrossSections};
pub use error::{Result, SectionError};
pub use ribs::{average_direction, build_ribs, rib_frames, RibFrame};
pub use seam::{align_to_seam, select_seam, Seam};
