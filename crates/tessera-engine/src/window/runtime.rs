use anyhow::{Context, Result, anyhow};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, EngineCtx};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::input::InputState;
use crate::input::platform::translate_window_event;
use crate::render::Presenter;
use crate::time::FrameClock;

/// Engine configuration.
///
/// `width`/`height` are the logical pixel-surface resolution; the window is
/// created `pixel_size` times larger on each axis and is not resizable.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub pixel_size: u32,
}

impl EngineConfig {
    /// Configuration with a 1:1 logical-to-window pixel mapping.
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            pixel_size: 1,
        }
    }

    /// Sets the pixel scale factor: one logical pixel becomes an N x N block
    /// of window pixels.
    pub fn with_pixel_size(mut self, pixel_size: u32) -> Self {
        self.pixel_size = pixel_size;
        self
    }
}

/// Entry point for the engine loop.
pub struct Engine;

impl Engine {
    /// Runs `app` until the window is closed or a hook requests exit.
    ///
    /// Blocks for the lifetime of the application. Construction failures
    /// (window, GPU context, pipeline) and errors returned by the `App`
    /// hooks all surface here; the loop itself never swallows or retries
    /// them.
    pub fn run<A>(config: EngineConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        anyhow::ensure!(
            config.width >= 1 && config.height >= 1,
            "logical surface must be at least 1x1"
        );
        anyhow::ensure!(config.pixel_size >= 1, "pixel scale factor must be at least 1");

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = LoopState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.finish()
    }
}

#[self_referencing]
struct WindowEntry {
    input: InputState,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct LoopState<A>
where
    A: App + 'static,
{
    config: EngineConfig,
    app: A,

    entry: Option<WindowEntry>,
    presenter: Option<Presenter>,

    setup_done: bool,
    destroyed: bool,
    exit_requested: bool,
    error: Option<anyhow::Error>,
}

impl<A> LoopState<A>
where
    A: App + 'static,
{
    fn new(config: EngineConfig, app: A) -> Self {
        Self {
            config,
            app,
            entry: None,
            presenter: None,
            setup_done: false,
            destroyed: false,
            exit_requested: false,
            error: None,
        }
    }

    /// Records a fatal error and stops the loop; `finish` hands the error to
    /// the caller of `Engine::run`.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.error = Some(err);
        event_loop.exit();
    }

    fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Creates the window, GPU context, and presenter, then runs the
    /// one-time setup hook.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_size = LogicalSize::new(
            (self.config.width * self.config.pixel_size) as f64,
            (self.config.height * self.config.pixel_size) as f64,
        );

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(window_size)
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let entry = WindowEntryTryBuilder {
            input: InputState::default(),
            clock: FrameClock::new(),
            window,
            gpu_builder: |window| pollster::block_on(Gpu::new(window, GpuInit::default())),
        }
        .try_build()?;

        let presenter =
            entry.with_gpu(|gpu| Presenter::new(gpu, self.config.width, self.config.height))?;

        log::info!(
            "engine window created: {}x{} logical pixels at scale {}",
            self.config.width,
            self.config.height,
            self.config.pixel_size,
        );

        self.entry = Some(entry);
        self.presenter = Some(presenter);

        self.run_setup()?;
        self.setup_done = true;

        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }

        Ok(())
    }

    fn run_setup(&mut self) -> Result<()> {
        let pixel_size = self.config.pixel_size;
        let (Some(entry), Some(presenter)) = (self.entry.as_mut(), self.presenter.as_mut())
        else {
            return Ok(());
        };
        let app = &mut self.app;

        let mut exit = false;
        let result = entry.with_mut(|fields| {
            let result = {
                let mut ctx = EngineCtx::new(presenter, fields.input, pixel_size, &mut exit);
                app.on_setup(&mut ctx)
            };

            // Re-base the clock so the first frame's delta measures from
            // just after setup, not from engine construction.
            fields.clock.reset();
            result
        });

        if exit {
            self.exit_requested = true;
        }
        result
    }

    /// Drives one frame: delta time, surface clear, update hook, upload and
    /// draw, present.
    fn drive_frame(&mut self, event_loop: &ActiveEventLoop) {
        let pixel_size = self.config.pixel_size;
        let (Some(entry), Some(presenter)) = (self.entry.as_mut(), self.presenter.as_mut())
        else {
            return;
        };
        let app = &mut self.app;

        let mut exit = false;
        let result = entry.with_mut(|fields| -> Result<()> {
            let time = fields.clock.tick();

            presenter.begin_frame();
            {
                let mut ctx = EngineCtx::new(presenter, fields.input, pixel_size, &mut exit);
                app.on_update(&mut ctx, time)?;
            }

            let mut frame = match fields.gpu.begin_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    let msg = err.to_string();
                    return match fields.gpu.handle_surface_error(err) {
                        SurfaceErrorAction::Fatal => {
                            Err(anyhow!("fatal GPU surface error: {msg}"))
                        }
                        // Reconfigured or transient: drop this frame; the
                        // next redraw request retries.
                        _ => Ok(()),
                    };
                }
            };

            presenter.end_frame(fields.gpu.queue(), &mut frame.encoder, &frame.view);
            fields.window.pre_present_notify();
            fields.gpu.submit(frame);
            Ok(())
        });

        if exit {
            self.exit_requested = true;
        }
        if let Err(err) = result {
            self.fail(event_loop, err);
            return;
        }
        if self.exit_requested {
            event_loop.exit();
        }
    }
}

impl<A> ApplicationHandler for LoopState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Input translation happens for every event before lifecycle
        // handling, so `CloseRequested` frames still see final input.
        if let Some(entry) = self.entry.as_mut() {
            entry.with_mut(|fields| {
                if let Some(ev) = translate_window_event(fields.window, &event) {
                    fields.input.apply_event(ev);
                }
            });
        }

        match &event {
            WindowEvent::CloseRequested => event_loop.exit(),

            // The window is not user-resizable, but DPI changes still
            // produce new physical sizes the swapchain must follow.
            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::RedrawRequested => self.drive_frame(event_loop),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.error.is_some() || self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: each presented frame immediately requests the
        // next one.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Teardown runs exactly once, only if setup completed and no hook
        // error is on its way out through `Engine::run`.
        if self.setup_done && !self.destroyed && self.error.is_none() {
            self.destroyed = true;
            log::debug!("engine loop exiting; running teardown");
            self.app.on_destroy();
        }
    }
}
