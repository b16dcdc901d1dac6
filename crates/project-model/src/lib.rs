//! Reelcut Project Model
//!
//! Defines the core data contracts for Reelcut recordings:
//! - **Geometry:** Pixel-space vectors and the crop rectangle with its
//!   validity invariants
//! - **Project:** The editing configuration applied to a recording
//!   (background, camera, cursor), persisted as JSON
//!
//! All geometry is in source-display pixel units; the engine converts
//! pointer coordinates into this space before any rectangle math.

pub mod geometry;
pub mod project;

pub use geometry::*;
pub use project::*;
