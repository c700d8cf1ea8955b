use glam::{Mat4, Vec2, Vec3, Vec4};

/// The preloaded basic meshes a command can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Plane,
    Box,
    Sphere,
    Cylinder,
    Prism,
}

/// Scale, per-axis rotation in degrees, and translation, composed in the
/// fixed order scale → rotate X → rotate Y → rotate Z → translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    pub scale: Vec3,
    pub rotation_degrees: Vec3,
    pub translation: Vec3,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation_degrees: Vec3::ZERO,
            translation: Vec3::ZERO,
        }
    }
}

impl ObjectTransform {
    pub fn matrix(&self) -> Mat4 {
        let scale = Mat4::from_scale(self.scale);
        let rot_x = Mat4::from_rotation_x(self.rotation_degrees.x.to_radians());
        let rot_y = Mat4::from_rotation_y(self.rotation_degrees.y.to_radians());
        let rot_z = Mat4::from_rotation_z(self.rotation_degrees.z.to_radians());
        let translation = Mat4::from_translation(self.translation);
        translation * rot_z * rot_y * rot_x * scale
    }
}

/// One scripted draw: a shape, its model transform, and the shader state it
/// wants (flat color, up to two texture layers, optional specular map, and a
/// named material preset). Self-contained: commands do not inherit state
/// from earlier commands.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub shape: ShapeKind,
    pub transform: ObjectTransform,
    pub color: Vec4,
    pub texture: Option<String>,
    pub texture2: Option<String>,
    pub specular_map: Option<String>,
    pub uv_scale: Vec2,
    pub material: Option<String>,
}

impl DrawCommand {
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            shape,
            transform: ObjectTransform::default(),
            color: Vec4::ONE,
            texture: None,
            texture2: None,
            specular_map: None,
            uv_scale: Vec2::ONE,
            material: None,
        }
    }

    pub fn scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.scale = Vec3::new(x, y, z);
        self
    }

    pub fn rotate(mut self, x_deg: f32, y_deg: f32, z_deg: f32) -> Self {
        self.transform.rotation_degrees = Vec3::new(x_deg, y_deg, z_deg);
        self
    }

    pub fn translate(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.translation = Vec3::new(x, y, z);
        self
    }

    pub fn color(mut self, r: f32, g: f32, b: f32, a: f32) -> Self {
        self.color = Vec4::new(r, g, b, a);
        self
    }

    pub fn texture(mut self, tag: &str) -> Self {
        self.texture = Some(tag.to_owned());
        self
    }

    pub fn texture2(mut self, tag: &str) -> Self {
        self.texture2 = Some(tag.to_owned());
        self
    }

    pub fn specular_map(mut self, tag: &str) -> Self {
        self.specular_map = Some(tag.to_owned());
        self
    }

    pub fn uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Vec2::new(u, v);
        self
    }

    pub fn material(mut self, tag: &str) -> Self {
        self.material = Some(tag.to_owned());
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.color.w < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_composition_order() {
        let t = ObjectTransform {
            scale: Vec3::new(2.0, 3.0, 4.0),
            rotation_degrees: Vec3::new(30.0, 45.0, 60.0),
            translation: Vec3::new(1.0, -2.0, 5.0),
        };
        let expected = Mat4::from_translation(t.translation)
            * Mat4::from_rotation_z(60.0f32.to_radians())
            * Mat4::from_rotation_y(45.0f32.to_radians())
            * Mat4::from_rotation_x(30.0f32.to_radians())
            * Mat4::from_scale(t.scale);
        assert_eq!(t.matrix(), expected);
    }

    #[test]
    fn scale_applies_before_rotation() {
        // Rotating 90 degrees about Z maps the scaled X axis onto Y.
        let t = ObjectTransform {
            scale: Vec3::new(2.0, 1.0, 1.0),
            rotation_degrees: Vec3::new(0.0, 0.0, 90.0),
            translation: Vec3::ZERO,
        };
        let p = t.matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn builder_sets_all_channels() {
        let cmd = DrawCommand::new(ShapeKind::Plane)
            .scale(20.0, 1.0, 10.0)
            .color(1.0, 1.0, 1.0, 1.0)
            .texture("desk")
            .texture2("deskmat")
            .specular_map("deskmat_specmap")
            .material("wood");
        assert_eq!(cmd.shape, ShapeKind::Plane);
        assert_eq!(cmd.texture.as_deref(), Some("desk"));
        assert_eq!(cmd.texture2.as_deref(), Some("deskmat"));
        assert_eq!(cmd.specular_map.as_deref(), Some("deskmat_specmap"));
        assert_eq!(cmd.material.as_deref(), Some("wood"));
        assert!(!cmd.is_transparent());
    }

    #[test]
    fn transparency_from_alpha() {
        let cmd = DrawCommand::new(ShapeKind::Plane).color(1.0, 1.0, 1.0, 0.1);
        assert!(cmd.is_transparent());
    }
}
