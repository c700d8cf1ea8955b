use glam::Vec3;

/// Number of light slots the shader exposes.
pub const MAX_LIGHTS: usize = 4;

/// One shader light slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub enabled: bool,
    pub position: Vec3,
    pub ambient_color: Vec3,
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

impl Default for LightSource {
    fn default() -> Self {
        Self {
            enabled: false,
            position: Vec3::ZERO,
            ambient_color: Vec3::ZERO,
            diffuse_color: Vec3::ZERO,
            specular_color: Vec3::ZERO,
            focal_strength: 1.0,
            specular_intensity: 0.0,
        }
    }
}

/// The fixed bank of light slots pushed to the shader each frame.
/// All slots start disabled; the scene script enables the ones it uses.
#[derive(Debug, Clone, Default)]
pub struct LightRig {
    pub lights: [LightSource; MAX_LIGHTS],
}

impl LightRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled_count(&self) -> usize {
        self.lights.iter().filter(|l| l.enabled).count()
    }
}

/// Raw RGB channel values of the animated tower light at time `t` seconds.
pub fn rgb_channels(t: f32) -> Vec3 {
    Vec3::new(t.sin(), t.cos(), t.sin() / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rig_starts_dark() {
        let rig = LightRig::new();
        assert_eq!(rig.enabled_count(), 0);
    }

    #[test]
    fn rgb_channels_at_zero() {
        let c = rgb_channels(0.0);
        assert_eq!(c, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn rgb_channels_bounded() {
        for i in 0..100 {
            let c = rgb_channels(i as f32 * 0.37);
            assert!(c.x.abs() <= 1.0 && c.y.abs() <= 1.0 && c.z.abs() <= 0.5);
        }
    }
}
