//! Frame timing.
//!
//! One [`FrameClock`] per engine loop; `tick()` is called once per frame and
//! `reset()` re-bases the clock after setup so the first frame's delta does
//! not include window and GPU construction time.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
