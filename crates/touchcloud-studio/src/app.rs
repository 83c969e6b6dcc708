use glam::Vec2;
use touchcloud_engine::core::{App, AppControl, FrameCtx};
use touchcloud_engine::geometry::PointCloud;
use touchcloud_engine::input::{
    InputEvent, KeyState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
    TouchEvent,
};
use touchcloud_engine::render::{FrameOutcome, FrameRenderer, RendererConfig};
use touchcloud_engine::scene::{self, CommandQueue, CommandSender, SceneInput, SceneState};

use crate::controls::{ControlAction, Controls};
use crate::touch::{PointerId, TouchTracker};

/// Logical pixels counted as one wheel line for high-precision scrolling.
const PIXELS_PER_WHEEL_LINE: f32 = 40.0;

/// Turns a frame's input events into scene commands.
#[derive(Debug, Default)]
pub struct InputRouter {
    controls: Controls,
    tracker: TouchTracker,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes events in arrival order. Returns `Exit` when asked to quit.
    pub fn route(&mut self, events: &[InputEvent], input: &mut impl SceneInput) -> AppControl {
        for ev in events {
            match ev {
                InputEvent::Key {
                    key,
                    state: KeyState::Pressed,
                    repeat,
                    ..
                } => {
                    if self.controls.on_key(*key, *repeat, input) == ControlAction::Exit {
                        return AppControl::Exit;
                    }
                }

                InputEvent::MouseWheel { delta, .. } => {
                    self.controls.on_wheel(delta.lines_y(PIXELS_PER_WHEEL_LINE), input);
                }

                InputEvent::PointerButton(PointerButtonEvent {
                    button: MouseButton::Left,
                    state,
                    x,
                    y,
                    ..
                }) => match state {
                    MouseButtonState::Pressed => self.stroke(PointerId::Mouse, *x, *y, input),
                    MouseButtonState::Released => self.tracker.end(PointerId::Mouse),
                },

                InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                    if self.tracker.is_active(PointerId::Mouse) {
                        self.stroke(PointerId::Mouse, *x, *y, input);
                    }
                }

                InputEvent::Touch(TouchEvent { id, phase, x, y, .. }) => {
                    let pointer = PointerId::Touch(*id);
                    if phase.is_active() {
                        self.stroke(pointer, *x, *y, input);
                    } else {
                        self.tracker.end(pointer);
                    }
                }

                InputEvent::Focused(false) => self.tracker.clear(),

                _ => {}
            }
        }
        AppControl::Continue
    }

    fn stroke(&mut self, id: PointerId, x: f32, y: f32, input: &mut impl SceneInput) {
        let s = self.tracker.track(id, Vec2::new(x, y));
        input.add_sample(s.position, s.color, s.intensity);
    }
}

/// The touch sketch: draws strokes into a spinning point cloud.
pub struct SketchApp {
    config: RendererConfig,
    renderer: Option<FrameRenderer>,

    scene: SceneState,
    cloud: PointCloud<wgpu::Buffer>,

    router: InputRouter,
    sender: CommandSender,
    commands: CommandQueue,
}

impl SketchApp {
    pub fn new(config: RendererConfig) -> Self {
        let (sender, commands) = scene::channel();
        Self {
            config,
            renderer: None,
            scene: SceneState::default(),
            cloud: PointCloud::new(),
            router: InputRouter::new(),
            sender,
            commands,
        }
    }
}

impl App for SketchApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();

        // ── Renderer ──────────────────────────────────────────────────────
        let renderer = match self.renderer.as_mut() {
            Some(renderer) => {
                if viewport != renderer.viewport() && viewport.is_valid() {
                    renderer.resize(viewport);
                    self.scene.set_viewport(viewport);
                }
                renderer
            }
            None => match FrameRenderer::new(ctx.gpu, self.config.clone(), viewport) {
                Ok(renderer) => {
                    self.scene.set_viewport(viewport);
                    self.renderer.insert(renderer)
                }
                Err(err) => {
                    log::error!("renderer initialization failed: {err:#}");
                    return AppControl::Exit;
                }
            },
        };

        // ── Input ─────────────────────────────────────────────────────────
        if self.router.route(&ctx.input_frame.events, &mut self.sender) == AppControl::Exit {
            log::info!("exit requested");
            return AppControl::Exit;
        }

        self.commands
            .drain(&mut self.scene, &mut self.cloud, ctx.gpu.device());

        // ── Render ────────────────────────────────────────────────────────
        match renderer.render_frame(ctx, &mut self.scene, &self.cloud) {
            FrameOutcome::Fatal => AppControl::Exit,
            FrameOutcome::Presented | FrameOutcome::Skipped(_) => AppControl::Continue,
        }
    }
}
