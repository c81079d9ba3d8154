use anyhow::Result;

use crate::time::FrameTime;

use super::ctx::EngineCtx;

/// Application contract driven by the engine loop.
///
/// One implementer per application. Errors returned from any hook are not
/// caught by the loop; they abort it and surface unmodified from
/// `Engine::run`.
pub trait App {
    /// Called once before the first frame.
    fn on_setup(&mut self, ctx: &mut EngineCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called every frame between the surface clear and presentation.
    ///
    /// `time.dt` is the elapsed time since the previous frame in seconds.
    fn on_update(&mut self, ctx: &mut EngineCtx<'_>, time: FrameTime) -> Result<()>;

    /// Called exactly once when the loop exits normally.
    fn on_destroy(&mut self) {}
}
