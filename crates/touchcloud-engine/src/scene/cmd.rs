use crate::geometry::{DrawStyle, GeometryDevice, GeometryError, PointCloud, Sample};

use super::SceneState;

/// One queued mutation of the scene or its geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    Sample(Sample),
    SetStyle(DrawStyle),
    /// Speed slider value; see `SceneState::set_spin_speed`.
    SetSpinSpeed(f32),
    Reset,
}

impl SceneCommand {
    /// Applies the command on the render thread.
    pub fn apply<D>(
        self,
        scene: &mut SceneState,
        cloud: &mut PointCloud<D::Buffer>,
        device: &D,
    ) -> Result<(), GeometryError>
    where
        D: GeometryDevice,
    {
        match self {
            SceneCommand::Sample(sample) => {
                cloud.add_sample(device, scene.sample_space(), &sample, scene.style())
            }
            SceneCommand::SetStyle(style) => {
                if scene.set_style(style) {
                    cloud.reset();
                }
                Ok(())
            }
            SceneCommand::SetSpinSpeed(slider) => {
                scene.set_spin_speed(slider);
                Ok(())
            }
            SceneCommand::Reset => {
                log::info!("reset ({} vertices cleared)", cloud.vertex_count());
                cloud.reset();
                Ok(())
            }
        }
    }
}
