use anyhow::Result;
use glam::Mat4;
use winit::window::Window;

use crate::coords::Viewport;
use crate::core::FrameCtx;
use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::geometry::transform::{perspective_rh, radians_from_degrees};
use crate::geometry::{DrawStyle, PointCloud};
use crate::scene::SceneState;

use super::config::RendererConfig;
use super::frame_loop::{FrameBackend, FrameLoop, FrameOutcome};
use super::pipeline::CloudPipelines;
use super::target::PassTarget;
use super::uniforms::{FrameUniforms, UniformRing};

/// Draws the accumulated geometry once per frame.
///
/// Owns the pipelines, a uniform slot per in-flight frame and the loop that
/// bounds how many submitted frames the GPU may still be working on.
pub struct FrameRenderer {
    config: RendererConfig,
    pipelines: CloudPipelines,
    uniforms: UniformRing,
    frames: FrameLoop,

    viewport: Viewport,
    projection: Mat4,
}

impl FrameRenderer {
    /// Builds pipelines and the uniform ring for `gpu`'s surface.
    ///
    /// Fails on an unusable configuration; nothing should be drawn then.
    pub fn new(gpu: &Gpu<'_>, config: RendererConfig, viewport: Viewport) -> Result<Self> {
        validate(&config)?;

        let pipelines = CloudPipelines::new(gpu.device(), gpu.surface_format(), gpu.depth_format());
        let uniforms = UniformRing::new(
            gpu.device(),
            pipelines.bind_group_layout(),
            config.frames_in_flight,
        );
        let frames = FrameLoop::new(config.frames_in_flight);

        log::info!(
            "frame renderer ready ({} frames in flight, fov {}°)",
            frames.gate().capacity(),
            config.fov_y_degrees
        );

        let mut renderer = Self {
            projection: Mat4::IDENTITY,
            viewport: Viewport::default(),
            config,
            pipelines,
            uniforms,
            frames,
        };
        renderer.resize(viewport);
        Ok(renderer)
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Frames the GPU has not yet finished.
    #[inline]
    pub fn frames_in_flight(&self) -> usize {
        self.frames.gate().in_flight()
    }

    #[inline]
    pub fn frames_presented(&self) -> u64 {
        self.frames.frames_presented()
    }

    #[inline]
    pub fn frames_skipped(&self) -> u64 {
        self.frames.frames_skipped()
    }

    /// Recomputes the projection for a new viewport. Invalid sizes are ignored.
    pub fn resize(&mut self, viewport: Viewport) {
        let Some(projection) = projection_for(&self.config, viewport) else {
            log::debug!("ignoring resize to {}x{}", viewport.width, viewport.height);
            return;
        };
        self.viewport = viewport;
        self.projection = projection;
        log::info!("viewport {}x{} (aspect {:.3})", viewport.width, viewport.height, viewport.aspect());
    }

    /// Renders and presents one frame to the window's surface.
    ///
    /// Blocks while the in-flight limit is reached. On a surface error the
    /// frame is skipped and neither the scene angles nor the uniform ring
    /// advance.
    pub fn render_frame(
        &mut self,
        ctx: &mut FrameCtx<'_, '_>,
        scene: &mut SceneState,
        cloud: &PointCloud<wgpu::Buffer>,
    ) -> FrameOutcome {
        let mut backend = SurfaceBackend {
            gpu: &mut *ctx.gpu,
            window: ctx.window.window,
            pipelines: &self.pipelines,
            uniforms: &self.uniforms,
            clear_color: self.config.clear_color.into(),
        };
        self.frames
            .run(&mut backend, scene, cloud, &self.config, self.projection)
    }
}

/// Window surface and queue for one `render_frame` call.
struct SurfaceBackend<'r, 'w> {
    gpu: &'r mut Gpu<'w>,
    window: &'r Window,
    pipelines: &'r CloudPipelines,
    uniforms: &'r UniformRing,
    clear_color: wgpu::Color,
}

impl FrameBackend for SurfaceBackend<'_, '_> {
    type Frame = GpuFrame;
    type Buffer = wgpu::Buffer;

    fn poll(&mut self) {
        self.gpu.poll();
    }

    fn begin_frame(&mut self) -> Result<GpuFrame, SurfaceErrorAction> {
        match self.gpu.begin_frame() {
            Ok(frame) => Ok(frame),
            Err(err) => Err(self.gpu.handle_surface_error(err)),
        }
    }

    fn write_uniforms(&mut self, slot: usize, uniforms: &FrameUniforms) {
        self.uniforms.write(self.gpu.queue(), slot, uniforms);
    }

    fn encode(
        &mut self,
        frame: &mut GpuFrame,
        slot: usize,
        cloud: &PointCloud<wgpu::Buffer>,
        style: DrawStyle,
    ) {
        let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("touchcloud pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.gpu.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        pass.set_bind_group(0, self.uniforms.bind_group(slot), &[]);

        let mut target = PassTarget::new(&mut pass, self.pipelines);
        cloud.render(&mut target, style);
    }

    fn submit(&mut self, frame: GpuFrame, on_done: Box<dyn FnOnce() + Send>) {
        self.window.pre_present_notify();
        self.gpu.submit(frame, on_done);
    }
}

fn validate(config: &RendererConfig) -> Result<()> {
    anyhow::ensure!(config.frames_in_flight > 0, "frames_in_flight must be at least 1");
    anyhow::ensure!(
        config.fov_y_degrees > 0.0 && config.fov_y_degrees < 180.0,
        "fov_y_degrees must be in (0, 180), got {}",
        config.fov_y_degrees
    );
    anyhow::ensure!(
        config.z_near > 0.0 && config.z_far > config.z_near,
        "invalid depth range {}..{}",
        config.z_near,
        config.z_far
    );
    anyhow::ensure!(
        config.camera_distance.is_finite() && config.camera_distance > 0.0,
        "camera_distance must be positive"
    );
    anyhow::ensure!(config.clear_color.is_finite(), "clear_color must be finite");
    Ok(())
}

/// Perspective for `viewport`, or `None` when it has no area.
fn projection_for(config: &RendererConfig, viewport: Viewport) -> Option<Mat4> {
    viewport.is_valid().then(|| {
        perspective_rh(
            radians_from_degrees(config.fov_y_degrees),
            viewport.aspect(),
            config.z_near,
            config.z_far,
        )
    })
}
