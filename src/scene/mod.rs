//! The fixed scene and its per-frame update pipeline.
//!
//! [`Scene`] owns the orbit controller, the gesture layers, the light list
//! and the animated body. Input reaches the controller through
//! [`Scene::handle_gesture`] / [`Scene::handle_input`]; once per displayed
//! frame [`Scene::update_frame`] advances time, integrates camera
//! smoothing, and derives everything the renderer uploads.

pub mod animation;
pub mod mesh_gen;
pub mod renderable;

use std::f32::consts::FRAC_PI_6;

use glam::{Mat4, Vec3};
use web_time::Instant;

pub use self::animation::OrbitingBody;
pub use self::mesh_gen::{AxisId, MeshData, MeshVertex, Topology};
pub use self::renderable::{
    FrameUniforms, Material, ObjectUniform, Renderable, RenderableKind,
};
use crate::camera::{
    viewport_aspect, CameraState, ControlMode, OrbitController, OrbitPose,
};
use crate::engine::command::{CameraCommand, CommandSink};
use crate::input::{
    GestureEvent, GestureTranslator, InputEvent, KeyAction, PointerGestures,
};
use crate::lighting::{Light, LightingManager, LightingUniform};
use crate::options::Options;
use crate::util::frame_timing::FrameClock;

/// Side length of the ground grid.
pub const GRID_SIZE: f32 = 33.0;
/// Distance between neighbouring grid lines.
pub const GRID_SPACING: f32 = 0.33;
/// Width of the axis quads.
pub const AXIS_THICKNESS: f32 = 0.03;
/// Longest wall-clock step a single frame integrates, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.25;
/// Full apex angle of the pyramid.
pub const PYRAMID_APEX_ANGLE: f32 = FRAC_PI_6;
/// Circumradius of the pyramid base.
pub const PYRAMID_BASE_RADIUS: f32 = 1.5;

const GRID_COLOR: Vec3 = Vec3::new(0.35, 0.35, 0.4);
const EDGE_COLOR: Vec3 = Vec3::new(0.1, 0.1, 0.1);

fn axis_color(id: AxisId) -> Vec3 {
    match id {
        AxisId::X => Vec3::new(0.9, 0.2, 0.2),
        AxisId::Y => Vec3::new(0.2, 0.9, 0.2),
        AxisId::Z => Vec3::new(0.2, 0.4, 0.95),
    }
}

/// Everything derived for one frame, ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Seconds integrated this frame.
    pub dt: f32,
    /// World-to-view transform.
    pub view: Mat4,
    /// View-to-clip transform.
    pub proj: Mat4,
    /// Eye position in world space.
    pub camera_position: Vec3,
    /// One entry per renderable, in [`Scene::renderables`] order.
    pub objects: Vec<FrameUniforms>,
    /// Packed light list.
    pub lighting: LightingUniform,
}

/// The viewer's scene: static scenery, one animated sphere, one camera.
#[derive(Debug)]
pub struct Scene {
    controller: OrbitController,
    translator: GestureTranslator,
    pointer: PointerGestures,
    lighting: LightingManager,
    body: OrbitingBody,
    renderables: Vec<Renderable>,
    clock: FrameClock,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

impl Scene {
    /// Build the scene and put the camera in its home pose.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        let camera = CameraState::from_options(&options.camera);
        let home = OrbitPose::from_options(&options.camera);
        let mut controller =
            OrbitController::new(camera, options.orbit.clone(), home);
        controller.reset();

        let mut lighting = LightingManager::new(options.lighting.ambient());
        for light in &options.lighting.lights {
            if let Some(evicted) = lighting.add_light(*light) {
                log::warn!("light capacity exceeded, dropped {evicted:?}");
            }
        }

        let renderables = build_renderables(options);
        log::info!(
            "scene built: {} renderables, {} lights",
            renderables.len(),
            lighting.len()
        );

        Self {
            controller,
            translator: GestureTranslator::new(options.input.clone()),
            pointer: PointerGestures::new(options.input.clone()),
            lighting,
            body: OrbitingBody::new(&options.animation),
            renderables,
            clock: FrameClock::new(),
        }
    }

    /// Re-apply tunable options without rebuilding geometry. The camera
    /// pose and animation angles are kept.
    pub fn apply_options(&mut self, options: &Options) {
        self.controller.set_config(options.orbit.clone());
        let camera = &options.camera;
        self.controller
            .set_projection(camera.fovy, camera.znear, camera.zfar);
        self.translator.set_options(options.input.clone());
        self.pointer.set_options(options.input.clone());
        self.lighting.set_ambient_color(options.lighting.ambient());
        self.body.apply_options(&options.animation);
    }

    /// Camera controller.
    #[must_use]
    pub fn controller(&self) -> &OrbitController {
        &self.controller
    }

    /// Mutable camera controller, for programmatic camera moves.
    pub fn controller_mut(&mut self) -> &mut OrbitController {
        &mut self.controller
    }

    /// Gesture translator state.
    #[must_use]
    pub fn translator(&self) -> &GestureTranslator {
        &self.translator
    }

    /// Current light list.
    #[must_use]
    pub fn lighting(&self) -> &LightingManager {
        &self.lighting
    }

    /// Add a light, evicting the oldest of its kind when full.
    pub fn add_light(&mut self, light: Light) -> Option<Light> {
        self.lighting.add_light(light)
    }

    /// The animated sphere.
    #[must_use]
    pub fn body(&self) -> &OrbitingBody {
        &self.body
    }

    /// Draw list in submission order.
    #[must_use]
    pub fn renderables(&self) -> &[Renderable] {
        &self.renderables
    }

    /// Feed a recognized gesture through the translator into the
    /// controller. Returns the command that was executed, if any.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Option<CameraCommand> {
        let command = self.translator.handle_event(event)?;
        self.controller.execute(command);
        Some(command)
    }

    /// Feed a raw pointer event through the desktop adapter. Returns whether
    /// any camera command resulted.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> bool {
        let gestures = self.pointer.handle_event(event, now);
        let mut consumed = false;
        for gesture in gestures {
            consumed |= self.handle_gesture(gesture).is_some();
        }
        consumed
    }

    /// Perform a keyboard action.
    pub fn apply_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::ResetCamera => self.controller.reset(),
            KeyAction::ToggleSmoothing => {
                let enabled = self.controller.mode() == ControlMode::Direct;
                self.controller.set_smoothing(enabled);
                log::info!("camera smoothing {}", on_off(enabled));
            }
            KeyAction::ToggleAnimation => {
                let running = self.body.toggle();
                log::info!("animation {}", on_off(running));
            }
        }
    }

    /// Run the per-frame pipeline against the wall clock. `viewport` is the
    /// drawable size in pixels. The first call integrates zero time and no
    /// call integrates more than [`MAX_FRAME_DELTA`].
    pub fn update_frame(
        &mut self,
        now: Instant,
        viewport: (u32, u32),
    ) -> FrameSnapshot {
        let dt = self.clock.tick(now).min(MAX_FRAME_DELTA);
        let aspect = viewport_aspect(viewport.0 as f32, viewport.1 as f32);
        self.advance(dt, aspect)
    }

    /// Run the per-frame pipeline with an explicit time step.
    ///
    /// Order: animation, camera smoothing, view/projection, per-object
    /// uniforms, lighting snapshot.
    pub fn advance(&mut self, dt: f32, aspect: f32) -> FrameSnapshot {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.body.advance(dt);
        self.controller.update(dt);

        let camera = self.controller.camera();
        let view = camera.view_matrix();
        let proj = camera.projection_matrix(aspect);
        let camera_position = camera.position();
        let body_model = self.body.model_matrix();

        let objects = self
            .renderables
            .iter()
            .map(|renderable| {
                let model = match renderable.kind {
                    RenderableKind::Static => Mat4::IDENTITY,
                    RenderableKind::OrbitingBody => body_model,
                };
                FrameUniforms::new(
                    model,
                    view,
                    proj,
                    renderable.material,
                    camera_position,
                )
            })
            .collect();

        FrameSnapshot {
            dt,
            view,
            proj,
            camera_position,
            objects,
            lighting: self.lighting.snapshot(),
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn build_renderables(options: &Options) -> Vec<Renderable> {
    let mut renderables = vec![
        Renderable {
            name: "grid",
            kind: RenderableKind::Static,
            material: Material::unlit(GRID_COLOR),
            mesh: mesh_gen::grid(GRID_SIZE, GRID_SPACING),
        },
        Renderable {
            name: "pyramid",
            kind: RenderableKind::Static,
            material: Material::RED,
            mesh: mesh_gen::pyramid(PYRAMID_APEX_ANGLE, PYRAMID_BASE_RADIUS),
        },
        Renderable {
            name: "pyramid edges",
            kind: RenderableKind::Static,
            material: Material::unlit(EDGE_COLOR),
            mesh: mesh_gen::pyramid_edges(PYRAMID_APEX_ANGLE, PYRAMID_BASE_RADIUS),
        },
        Renderable {
            name: "sphere",
            kind: RenderableKind::OrbitingBody,
            material: Material::SPHERE,
            mesh: mesh_gen::uv_sphere(
                options.animation.radius,
                options.animation.segments,
            ),
        },
    ];
    for (name, id) in [("x axis", AxisId::X), ("y axis", AxisId::Y), ("z axis", AxisId::Z)] {
        renderables.push(Renderable {
            name,
            kind: RenderableKind::Static,
            material: Material::unlit(axis_color(id)),
            mesh: mesh_gen::axis(id, GRID_SIZE, AXIS_THICKNESS),
        });
    }
    renderables
}
