//! The windowed rendering engine: a [`Scene`] plus its wgpu backend.

pub mod command;
mod input;
mod options;

use web_time::Instant;

use crate::error::GyreError;
use crate::gpu::render_context::RenderContext;
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::scene::{FrameSnapshot, Scene};
use crate::util::frame_timing::FrameTiming;

/// Target FPS limit
const TARGET_FPS: u32 = 300;

/// Seconds between FPS log lines.
const FPS_LOG_INTERVAL: f32 = 5.0;

/// Owns the GPU context, the scene, and the renderer that draws it.
///
/// # Frame loop
///
/// Each frame, call [`render`](Self::render) to run the scene update
/// pipeline, upload the results, draw and present. Call
/// [`resize`](Self::resize) when the window size changes. Pointer input is
/// forwarded via [`handle_input`](Self::handle_input), recognized touch
/// gestures via [`handle_gesture`](Self::handle_gesture), and key presses
/// via [`handle_key`](Self::handle_key).
pub struct GyreEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    renderer: SceneRenderer,
    scene: Scene,
    options: Options,
    active_preset: Option<String>,
    frame_timing: FrameTiming,
    since_fps_log: f32,
}

impl GyreEngine {
    /// Create the GPU context for `window` and build the scene from
    /// `options`.
    ///
    /// # Errors
    ///
    /// Returns [`GyreError::Gpu`] if GPU initialization fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, GyreError> {
        let context = RenderContext::new(window, size).await?;
        Ok(Self::with_context(context, options))
    }

    /// Build the engine around an existing context.
    #[must_use]
    pub fn with_context(context: RenderContext, options: Options) -> Self {
        let scene = Scene::new(&options);
        let renderer = SceneRenderer::new(&context, scene.renderables());
        Self {
            context,
            renderer,
            scene,
            options,
            active_preset: None,
            frame_timing: FrameTiming::new(TARGET_FPS),
            since_fps_log: 0.0,
        }
    }

    /// The scene being displayed.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the scene (lights, programmatic camera moves).
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Current surface size in pixels.
    #[must_use]
    pub fn screen_size(&self) -> (u32, u32) {
        self.context.size()
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Run the scene update pipeline against the wall clock and upload its
    /// output, without drawing.
    pub fn update(&mut self) -> FrameSnapshot {
        let frame = self.scene.update_frame(Instant::now(), self.context.size());
        self.renderer.prepare(&self.context.queue, &frame);

        self.since_fps_log += frame.dt;
        if self.since_fps_log >= FPS_LOG_INTERVAL {
            self.since_fps_log = 0.0;
            log::debug!("{:.1} fps", self.frame_timing.fps());
        }
        frame
    }

    /// Update, draw and present one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if no swapchain image can be
    /// acquired even after reconfiguring; callers should
    /// [`resize`](Self::resize) on `Lost` or `Outdated`.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // Check if we should render based on FPS limit
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        let _ = self.update();

        let frame = self.context.acquire_frame()?;
        let mut encoder = self.context.create_encoder();
        self.renderer.render(&mut encoder, &frame.view);
        self.context.present(encoder, frame);

        self.frame_timing.end_frame();
        Ok(())
    }

    /// Reconfigure the surface and depth buffer. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.renderer.resize(&self.context);
        log::debug!("resized to {width}x{height}");
    }
}
