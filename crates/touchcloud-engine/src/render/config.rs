use crate::paint::Color;

/// Frame renderer configuration.
///
/// Defaults reproduce the demo's fixed camera and lighting.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Number of frames that may be submitted but not yet completed on the GPU.
    pub frames_in_flight: usize,

    /// Vertical field of view, in degrees.
    pub fov_y_degrees: f32,

    pub z_near: f32,
    pub z_far: f32,

    /// Distance the scene is pushed along -Z in front of the camera.
    pub camera_distance: f32,

    /// Light angle advance per presented frame, in radians.
    pub light_step: f32,

    /// Radius of the light's orbit around the Y axis.
    pub light_radius: f32,

    /// Height of the light above the XZ plane.
    pub light_height: f32,

    pub clear_color: Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            frames_in_flight: 3,
            fov_y_degrees: 65.0,
            z_near: 0.1,
            z_far: 100.0,
            camera_distance: 10.0,
            light_step: 0.01,
            light_radius: 5.0,
            light_height: 5.0,
            clear_color: Color::BLACK,
        }
    }
}
