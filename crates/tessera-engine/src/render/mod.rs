//! Frame presentation.
//!
//! The [`Presenter`] owns the CPU-side pixel surface and the fixed GPU
//! resources used to put it on screen: one texture matching the surface
//! size, one static full-screen quad, one blit pipeline. Each frame the
//! whole surface buffer is uploaded and drawn in a single call with
//! nearest-neighbor sampling, so logical pixels keep hard edges at any
//! scale factor.

mod presenter;

pub use presenter::Presenter;
