use std::sync::Arc;
use std::time::Duration;

use glam::Mat4;

use crate::device::SurfaceErrorAction;
use crate::geometry::{DrawStyle, PointCloud};
use crate::scene::SceneState;

use super::config::RendererConfig;
use super::gate::{FrameGate, FramePermit};
use super::uniforms::{light_direction, FrameUniforms, SlotRing};

/// How long to block on the gate between device polls.
const GATE_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Result of one rendered frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Presented,
    /// No drawable this frame; scene state was left untouched.
    Skipped(SurfaceErrorAction),
    /// The surface cannot recover; the caller should exit.
    Fatal,
}

/// The device side of a frame: drawable acquisition, uniform upload,
/// encoding and submission.
pub trait FrameBackend {
    type Frame;
    type Buffer;

    /// Drives completion callbacks without blocking.
    fn poll(&mut self);

    /// Acquires a drawable. Errors are already classified (and the surface
    /// reconfigured when that helps).
    fn begin_frame(&mut self) -> Result<Self::Frame, SurfaceErrorAction>;

    fn write_uniforms(&mut self, slot: usize, uniforms: &FrameUniforms);

    /// Records the pass for `cloud`, bound to uniform `slot`.
    fn encode(
        &mut self,
        frame: &mut Self::Frame,
        slot: usize,
        cloud: &PointCloud<Self::Buffer>,
        style: DrawStyle,
    );

    /// Submits and presents. `on_done` runs once the GPU has finished.
    fn submit(&mut self, frame: Self::Frame, on_done: Box<dyn FnOnce() + Send>);
}

/// Per-frame sequencing shared by every backend.
///
/// A frame takes a gate permit, acquires a drawable, advances the uniform
/// slot, steps the scene, encodes and submits. The permit travels with the
/// submission and is released by its completion callback.
pub struct FrameLoop {
    gate: Arc<FrameGate>,
    slots: SlotRing,
    frames_presented: u64,
    frames_skipped: u64,
}

impl FrameLoop {
    pub fn new(frames_in_flight: usize) -> Self {
        Self {
            gate: FrameGate::new(frames_in_flight),
            slots: SlotRing::new(frames_in_flight),
            frames_presented: 0,
            frames_skipped: 0,
        }
    }

    #[inline]
    pub fn gate(&self) -> &FrameGate {
        &self.gate
    }

    #[inline]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    #[inline]
    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    /// Renders and presents one frame through `backend`.
    ///
    /// Blocks while the in-flight limit is reached. On a surface error the
    /// permit is returned at once and neither the scene angles nor the slot
    /// ring advance.
    pub fn run<B: FrameBackend>(
        &mut self,
        backend: &mut B,
        scene: &mut SceneState,
        cloud: &PointCloud<B::Buffer>,
        config: &RendererConfig,
        projection: Mat4,
    ) -> FrameOutcome {
        let permit = self.acquire_permit(backend);

        let mut frame = match backend.begin_frame() {
            Ok(frame) => frame,
            Err(action) => {
                drop(permit);
                if action.is_fatal() {
                    log::error!("surface lost beyond recovery; stopping");
                    return FrameOutcome::Fatal;
                }
                self.frames_skipped += 1;
                log::warn!("frame skipped ({action:?}, {} so far)", self.frames_skipped);
                return FrameOutcome::Skipped(action);
            }
        };

        let slot = self.slots.advance();
        let light = light_direction(scene.light_angle(), config.light_radius, config.light_height);
        let uniforms =
            FrameUniforms::new(projection, config.camera_distance, scene.spin_angle(), light);
        backend.write_uniforms(slot, &uniforms);

        scene.advance_frame(config.light_step);

        backend.encode(&mut frame, slot, cloud, scene.style());
        backend.submit(frame, Box::new(move || drop(permit)));

        self.frames_presented += 1;
        FrameOutcome::Presented
    }

    /// Takes a frame slot, polling the backend so completion callbacks can
    /// free one while we wait.
    fn acquire_permit<B: FrameBackend>(&self, backend: &mut B) -> FramePermit {
        if let Some(permit) = self.gate.try_acquire() {
            return permit;
        }

        log::debug!("{} frames in flight; waiting for the GPU", self.gate.in_flight());
        loop {
            backend.poll();
            if let Some(permit) = self.gate.acquire_timeout(GATE_POLL_INTERVAL) {
                return permit;
            }
        }
    }
}
