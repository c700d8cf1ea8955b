use glam::Vec3;

/// Named bundle of reflectance values consumed by the shader.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDef {
    pub tag: String,
    pub ambient_color: Vec3,
    pub ambient_strength: f32,
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    pub shininess: f32,
}

/// Registry of the material presets referenced by the draw script.
#[derive(Debug, Clone, Default)]
pub struct MaterialBank {
    materials: Vec<MaterialDef>,
}

impl MaterialBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// The seven presets of the desk scene.
    pub fn desk_presets() -> Self {
        let mut bank = Self::new();

        // Wood for the desk surface and walls.
        bank.register(MaterialDef {
            tag: "wood".into(),
            ambient_color: Vec3::new(0.1, 0.1, 0.0),
            ambient_strength: 0.3,
            diffuse_color: Vec3::new(0.7, 0.7, 0.6),
            specular_color: Vec3::new(0.5, 0.5, 0.4),
            shininess: 32.0,
        });

        // Glass for the displays.
        bank.register(MaterialDef {
            tag: "glass".into(),
            ambient_color: Vec3::new(0.1, 0.1, 0.1),
            ambient_strength: 0.3,
            diffuse_color: Vec3::new(0.2, 0.2, 0.2),
            specular_color: Vec3::new(0.8, 0.8, 0.8),
            shininess: 64.0,
        });

        // Plastic for the keyboard.
        bank.register(MaterialDef {
            tag: "plastic".into(),
            ambient_color: Vec3::new(0.0, 0.1, 0.1),
            ambient_strength: 0.3,
            diffuse_color: Vec3::new(0.8, 0.8, 0.8),
            specular_color: Vec3::new(0.2, 0.6, 0.4),
            shininess: 16.0,
        });

        // Soft plastic for the trackball body.
        bank.register(MaterialDef {
            tag: "trackball".into(),
            ambient_color: Vec3::new(0.2, 0.2, 0.2),
            ambient_strength: 0.3,
            diffuse_color: Vec3::new(0.4, 0.4, 0.4),
            specular_color: Vec3::new(0.7, 0.7, 0.7),
            shininess: 48.0,
        });

        // Marble-like finish for the trackball ball (and the RGB fan).
        bank.register(MaterialDef {
            tag: "ballball".into(),
            ambient_color: Vec3::new(0.2, 0.2, 0.2),
            ambient_strength: 0.3,
            diffuse_color: Vec3::new(0.4, 0.4, 0.4),
            specular_color: Vec3::new(0.7, 0.7, 0.7),
            shininess: 128.0,
        });

        // Aluminum for the monitor stand and tower panels.
        bank.register(MaterialDef {
            tag: "aluminum".into(),
            ambient_color: Vec3::new(0.3, 0.3, 0.3),
            ambient_strength: 0.1,
            diffuse_color: Vec3::new(0.3, 0.3, 0.3),
            specular_color: Vec3::new(0.6, 0.6, 0.6),
            shininess: 64.0,
        });

        // Dull plastic for the CRT casing.
        bank.register(MaterialDef {
            tag: "crt".into(),
            ambient_color: Vec3::new(0.6, 0.6, 0.6),
            ambient_strength: 0.3,
            diffuse_color: Vec3::new(0.6, 0.6, 0.6),
            specular_color: Vec3::new(0.7, 0.7, 0.7),
            shininess: 12.0,
        });

        bank
    }

    pub fn register(&mut self, material: MaterialDef) {
        self.materials.push(material);
    }

    pub fn find(&self, tag: &str) -> Option<&MaterialDef> {
        self.materials.iter().find(|m| m.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
