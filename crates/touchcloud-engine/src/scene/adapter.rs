use std::sync::mpsc;

use glam::Vec2;

use crate::geometry::{DrawStyle, GeometryDevice, PointCloud, Sample};
use crate::paint::Color;

use super::{SceneCommand, SceneState};

/// What an input surface (touch, mouse, keyboard, widgets) may ask of the scene.
pub trait SceneInput {
    /// `position` is in logical pixels, origin top-left.
    fn add_sample(&mut self, position: Vec2, color: Color, intensity: f32);
    fn set_style(&mut self, style: DrawStyle);
    fn set_spin_speed(&mut self, slider: f32);
    fn reset(&mut self);
}

/// Creates a connected sender/queue pair.
pub fn channel() -> (CommandSender, CommandQueue) {
    let (tx, rx) = mpsc::channel();
    (CommandSender { tx }, CommandQueue { rx })
}

/// `SceneInput` that queues commands for the render thread.
///
/// Cheap to clone and `Send`, so input may originate on any thread.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<SceneCommand>,
}

impl CommandSender {
    pub fn send(&self, cmd: SceneCommand) {
        if self.tx.send(cmd).is_err() {
            log::debug!("scene command dropped: queue closed");
        }
    }
}

impl SceneInput for CommandSender {
    fn add_sample(&mut self, position: Vec2, color: Color, intensity: f32) {
        self.send(SceneCommand::Sample(Sample {
            position,
            color,
            intensity,
        }));
    }

    fn set_style(&mut self, style: DrawStyle) {
        self.send(SceneCommand::SetStyle(style));
    }

    fn set_spin_speed(&mut self, slider: f32) {
        self.send(SceneCommand::SetSpinSpeed(slider));
    }

    fn reset(&mut self) {
        self.send(SceneCommand::Reset);
    }
}

/// Receiving end, drained once per frame on the render thread.
///
/// This is the only path that mutates geometry or scene parameters, so
/// appends never race with each other or with a draw.
#[derive(Debug)]
pub struct CommandQueue {
    rx: mpsc::Receiver<SceneCommand>,
}

impl CommandQueue {
    /// Applies every pending command in arrival order.
    ///
    /// Geometry errors are logged and do not stop the drain. Returns the
    /// number of commands applied.
    pub fn drain<D>(
        &self,
        scene: &mut SceneState,
        cloud: &mut PointCloud<D::Buffer>,
        device: &D,
    ) -> usize
    where
        D: GeometryDevice,
    {
        let mut applied = 0;
        for cmd in self.rx.try_iter() {
            if let Err(err) = cmd.apply(scene, cloud, device) {
                log::error!("sample rejected: {err}");
            }
            applied += 1;
        }
        applied
    }
}
