//! The fixed desk scene: a flat, scripted sequence of draw commands.
//!
//! Scene layout is literal content, not an algorithm. Positions are in world
//! units with the desk surface at the origin; +X is world right, +Z is
//! toward the default camera.

use crate::command::{DrawCommand, ShapeKind};
use crate::lighting::{rgb_channels, LightRig, LightSource};
use glam::Vec3;

/// Texture tags the script draws with, paired with the file stems they are
/// loaded from. Loading any of these is required; a missing file is fatal.
pub const REQUIRED_TEXTURES: [(&str, &str); 6] = [
    ("keyboard", "keyboard-filament.png"),
    ("desk", "dark-wood.png"),
    ("keycap", "keycap.png"),
    ("deskmat", "deskmat.png"),
    ("deskmat_specmap", "deskmat_specularmap.png"),
    ("lambda_wallpaper", "Hackerlambda1440p.png"),
];

/// The static lights: a warm ceiling light and a desk lamp behind the scene.
/// Slot 2 is reserved for the animated tower light, slot 3 stays dark.
pub fn build_lights() -> LightRig {
    let mut rig = LightRig::new();

    rig.lights[0] = LightSource {
        enabled: true,
        position: Vec3::new(10.0, 20.0, 12.0),
        ambient_color: Vec3::new(1.0, 0.95, 0.9),
        diffuse_color: Vec3::new(1.0, 1.0, 1.0),
        specular_color: Vec3::new(1.0, 0.95, 0.55),
        focal_strength: 2.0,
        specular_intensity: 0.005,
    };

    rig.lights[1] = LightSource {
        enabled: true,
        position: Vec3::new(0.0, 3.0, -12.0),
        ambient_color: Vec3::new(1.0, 0.95, 0.55),
        diffuse_color: Vec3::new(1.0, 0.95, 0.55),
        specular_color: Vec3::new(1.0, 0.95, 0.55),
        focal_strength: 2.0,
        specular_intensity: 0.05,
    };

    rig
}

/// Refresh the animated RGB light inside the tower for time `t` seconds.
pub fn update_rgb_light(rig: &mut LightRig, t: f32) {
    let c = rgb_channels(t) * 0.3;
    rig.lights[2] = LightSource {
        enabled: true,
        position: Vec3::new(11.5, 4.5, 5.0),
        ambient_color: c,
        diffuse_color: c,
        specular_color: c,
        focal_strength: 2.0,
        specular_intensity: 0.005,
    };
}

/// Produce the full draw sequence for time `t` seconds. Objects with
/// transparency come last so blending composes over the opaque scene.
pub fn desk_scene(t: f32) -> Vec<DrawCommand> {
    let mut cmds = Vec::with_capacity(64);
    desk(&mut cmds);
    walls(&mut cmds);
    keyboard(&mut cmds);
    trackball(&mut cmds);
    primary_monitor(&mut cmds);
    secondary_monitor(&mut cmds);
    tower(&mut cmds, t);
    cmds
}

fn desk(cmds: &mut Vec<DrawCommand>) {
    // Desk surface: wood plane with the deskmat layered on top and a
    // specular map so the mat catches light differently than the wood.
    cmds.push(
        DrawCommand::new(ShapeKind::Plane)
            .scale(20.0, 1.0, 10.0)
            .translate(0.0, 0.0, 0.0)
            .color(1.0, 1.0, 1.0, 1.0)
            .texture("desk")
            .texture2("deskmat")
            .specular_map("deskmat_specmap")
            .material("wood"),
    );
}

fn walls(cmds: &mut Vec<DrawCommand>) {
    // Wall to world left, stood upright by rotating the plane about Z.
    cmds.push(
        DrawCommand::new(ShapeKind::Plane)
            .scale(50.0, 1.0, 25.0)
            .rotate(0.0, 0.0, 90.0)
            .translate(-25.0, 0.0, -10.0)
            .color(1.0, 0.9, 0.55, 1.0)
            .material("wood"),
    );

    // Wall behind the scene.
    cmds.push(
        DrawCommand::new(ShapeKind::Plane)
            .scale(50.0, 1.0, 50.0)
            .rotate(90.0, 0.0, 0.0)
            .translate(0.0, 0.0, -15.0)
            .color(1.0, 0.9, 0.55, 1.0)
            .material("wood"),
    );
}

fn keyboard(cmds: &mut Vec<DrawCommand>) {
    // Split ergonomic keyboard: three tilted base boxes, casing strips
    // bridging the gaps, and four columns of keycaps plus thumb and pinky
    // clusters. Keycap positions are relative to their base box.
    let main = Vec3::new(-5.0, 1.0, 5.0);
    let second = main + Vec3::new(2.0, 0.0, 1.5);
    let third = main + Vec3::new(-3.0, -0.75, 0.0);

    let base = |shape: ShapeKind| {
        DrawCommand::new(shape)
            .color(0.0, 1.0, 0.0, 1.0)
            .texture("keyboard")
            .material("plastic")
    };

    // Main box, tilted along Z like a tented keyboard half.
    cmds.push(
        base(ShapeKind::Box)
            .scale(5.0, 1.0, 2.5)
            .rotate(0.0, 0.0, 15.0)
            .translate(main.x, main.y, main.z),
    );

    // Second box: the thumb-cluster wedge, angled on all three axes.
    cmds.push(
        base(ShapeKind::Box)
            .scale(1.5, 3.0, 1.0)
            .rotate(-75.0, 25.0, -15.0)
            .translate(second.x, second.y, second.z),
    );

    // Third box: the flat pinky column outboard of the main box.
    cmds.push(
        base(ShapeKind::Box)
            .scale(1.5, 0.75, 1.75)
            .translate(third.x, third.y, third.z),
    );

    // Casing strips bridging the gaps between the bases.
    cmds.push(
        base(ShapeKind::Box)
            .scale(5.0, 2.0, 0.1)
            .rotate(0.0, 0.0, 15.0)
            .translate(main.x, main.y - 1.0, main.z + 1.25),
    );
    cmds.push(
        base(ShapeKind::Box)
            .scale(5.0, 2.0, 0.1)
            .rotate(0.0, 0.0, 15.0)
            .translate(main.x, main.y - 1.0, main.z - 1.25),
    );
    cmds.push(
        base(ShapeKind::Box)
            .scale(2.0, 2.0, 0.1)
            .rotate(0.0, -70.0, 0.0)
            .translate(second.x - 0.5, second.y - 1.0, second.z + 0.5),
    );
    cmds.push(
        base(ShapeKind::Box)
            .scale(0.1, 2.0, 3.5)
            .translate(main.x + 2.3, main.y, main.z + 0.5),
    );

    // Keycaps: uniform size, columns stepped in height to follow the finger
    // stagger. d is the keycap pitch.
    let cap_size = 0.5;
    let d = 0.75;
    let keycap = |offset: Vec3, rot: Vec3| {
        DrawCommand::new(ShapeKind::Box)
            .scale(cap_size, cap_size / 2.0, cap_size)
            .rotate(rot.x, rot.y, rot.z)
            .translate(offset.x, offset.y, offset.z)
            .color(0.9, 1.0, 1.0, 1.0)
            .texture("keycap")
            .material("plastic")
    };

    // Four columns on the main box, matching its Z tilt.
    let main_rot = Vec3::new(0.0, 0.0, 15.0);
    let columns = [
        (0.0, 0.5),
        (-d, 0.35),
        (-2.0 * d, 0.2),
        (d, 0.65),
    ];
    for (dx, dy) in columns {
        for dz in [d, 0.0, -d] {
            cmds.push(keycap(main + Vec3::new(dx, dy, dz), main_rot));
        }
    }

    // Thumb cluster on the second box, rotated to sit flush on the wedge.
    let thumb_rot = Vec3::new(15.0, 25.0, -15.0);
    for offset in [
        Vec3::new(0.0, 0.35, d),
        Vec3::new(d / 2.0, 0.075, 2.0 * d),
        Vec3::new(d, 0.1, d / 2.0),
        Vec3::new(1.5 * d, -0.1, 1.5 * d),
    ] {
        cmds.push(keycap(second + offset, thumb_rot));
    }

    // Pinky cluster on the third box, unrotated; a small offset re-centers
    // the keys on the narrower base.
    let off = 0.25;
    for offset in [
        Vec3::new(off, 0.35, d - off),
        Vec3::new(off, 0.35, -d + off),
        Vec3::new(-d + off, 0.35, d - off),
        Vec3::new(-d + off, 0.35, -d + off),
    ] {
        cmds.push(keycap(third + offset, Vec3::ZERO));
    }
}

fn trackball(cmds: &mut Vec<DrawCommand>) {
    let at = Vec3::new(4.0, 1.0, 5.0);

    // The ball itself: shiny marble finish.
    cmds.push(
        DrawCommand::new(ShapeKind::Sphere)
            .translate(at.x, at.y, at.z)
            .color(0.5, 0.5, 0.5, 1.0)
            .material("ballball"),
    );

    // Receptacle the ball sits in, tilted toward the user.
    cmds.push(
        DrawCommand::new(ShapeKind::Cylinder)
            .scale(1.5, 1.0, 1.5)
            .rotate(-12.5, 0.0, 0.0)
            .translate(at.x, at.y - 1.0, at.z + 0.2)
            .color(0.3, 0.3, 0.3, 1.0)
            .material("trackball"),
    );

    // Body under the receptacle.
    cmds.push(
        DrawCommand::new(ShapeKind::Cylinder)
            .scale(1.5, 1.0, 2.25)
            .translate(at.x, at.y - 1.25, at.z + 0.5)
            .color(0.3, 0.3, 0.3, 1.0)
            .material("trackball"),
    );

    // Palm rest, elongated toward the user.
    cmds.push(
        DrawCommand::new(ShapeKind::Sphere)
            .scale(1.25, 0.75, 2.0)
            .translate(at.x, at.y - 0.25, at.z + 1.0)
            .color(0.3, 0.3, 0.3, 1.0)
            .material("trackball"),
    );

    // Flare at the near edge of the palm rest.
    cmds.push(
        DrawCommand::new(ShapeKind::Cylinder)
            .scale(2.0, 0.5, 1.25)
            .translate(at.x, at.y - 1.0, at.z + 1.75)
            .color(0.3, 0.3, 0.3, 1.0)
            .material("trackball"),
    );
}

fn primary_monitor(cmds: &mut Vec<DrawCommand>) {
    let display = Vec3::new(0.0, 8.0, -7.5);

    // Display panel, upright and parallel with the front edge of the desk.
    cmds.push(
        DrawCommand::new(ShapeKind::Plane)
            .scale(10.0, 1.0, 5.0)
            .rotate(90.0, 0.0, 0.0)
            .translate(display.x, display.y, display.z)
            .color(1.0, 1.0, 1.0, 1.0)
            .texture("lambda_wallpaper")
            .material("glass"),
    );

    // Near-invisible glass sheet just in front of the panel; mostly there
    // for the specular highlight.
    cmds.push(
        DrawCommand::new(ShapeKind::Plane)
            .scale(10.0, 1.0, 5.0)
            .rotate(90.0, 0.0, 0.0)
            .translate(display.x, display.y, display.z + 0.05)
            .color(1.0, 1.0, 1.0, 0.1)
            .material("glass"),
    );

    // Stand: a prism column and two splayed prism legs.
    cmds.push(
        DrawCommand::new(ShapeKind::Prism)
            .scale(1.0, 9.75, 1.0)
            .rotate(0.0, 180.0, 0.0)
            .translate(display.x, display.y - 3.0, display.z - 0.51)
            .material("aluminum"),
    );
    cmds.push(
        DrawCommand::new(ShapeKind::Prism)
            .scale(1.5, 7.5, 0.25)
            .rotate(100.0, 65.0, 0.0)
            .translate(display.x + 3.25, display.y - 7.25, display.z + 1.75)
            .material("aluminum"),
    );
    cmds.push(
        DrawCommand::new(ShapeKind::Prism)
            .scale(1.5, 7.5, 0.25)
            .rotate(100.0, -65.0, 0.0)
            .translate(display.x - 3.25, display.y - 7.25, display.z + 1.75)
            .material("aluminum"),
    );
}

fn secondary_monitor(cmds: &mut Vec<DrawCommand>) {
    let display = Vec3::new(-15.0, 7.0, 0.0);

    // CRT front casing, tilted up and angled toward the center of the desk.
    cmds.push(
        DrawCommand::new(ShapeKind::Box)
            .scale(10.0, 10.0, 3.0)
            .rotate(10.0, 245.0, 0.0)
            .translate(display.x, display.y, display.z)
            .color(1.0, 1.0, 1.0, 1.0)
            .material("crt"),
    );

    // Electron-gun housing behind the front casing.
    cmds.push(
        DrawCommand::new(ShapeKind::Box)
            .scale(9.0, 8.0, 8.0)
            .rotate(10.0, 245.0, 0.0)
            .translate(display.x - 2.5, display.y - 1.5, display.z - 1.5)
            .color(0.3, 0.3, 0.3, 1.0)
            .material("trackball"),
    );

    // Swivel base.
    cmds.push(
        DrawCommand::new(ShapeKind::Cylinder)
            .scale(5.0, 1.0, 5.0)
            .rotate(0.0, 245.0, 0.0)
            .translate(display.x - 2.5, display.y - 7.0, display.z - 1.5)
            .color(0.3, 0.3, 0.3, 1.0)
            .material("trackball"),
    );

    // 4:3 screen box with the wallpaper.
    cmds.push(
        DrawCommand::new(ShapeKind::Box)
            .scale(8.0, 6.0, 2.0)
            .rotate(10.0, 245.0, 0.0)
            .translate(display.x + 0.9, display.y, display.z + 0.495)
            .color(0.2, 0.2, 0.2, 1.0)
            .texture("lambda_wallpaper")
            .material("glass"),
    );

    // Translucent overlay box just proud of the screen for the glass look.
    cmds.push(
        DrawCommand::new(ShapeKind::Box)
            .scale(8.0, 6.0, 2.0)
            .rotate(10.0, 245.0, 0.0)
            .translate(display.x + 1.0, display.y, display.z + 0.5)
            .color(0.2, 0.2, 0.2, 0.2)
            .material("glass"),
    );
}

fn tower(cmds: &mut Vec<DrawCommand>, t: f32) {
    // Tower case built from five aluminum panels; the sixth side is the
    // transparent glass panel, drawn last so the RGB fan shows through.
    let s = 2.25;
    let front = Vec3::new(12.5, 4.5, 7.5);

    let panel = || {
        DrawCommand::new(ShapeKind::Plane)
            .color(0.3, 0.3, 0.3, 1.0)
            .material("aluminum")
    };

    cmds.push(
        panel()
            .scale(s, 1.0, s * 2.0)
            .rotate(90.0, 0.0, 0.0)
            .translate(front.x, front.y, front.z),
    );
    cmds.push(
        panel()
            .scale(s * 2.0, 1.0, s * 2.0)
            .rotate(90.0, 90.0, 0.0)
            .translate(front.x + s, front.y, front.z - 2.0 * s),
    );
    cmds.push(
        panel()
            .scale(s, 1.0, s * 2.0)
            .rotate(90.0, 0.0, 0.0)
            .translate(front.x, front.y, front.z - 4.0 * s),
    );
    cmds.push(
        panel()
            .scale(s, 1.0, s * 2.0)
            .translate(front.x, front.y + s * 2.0, front.z - 2.0 * s),
    );
    cmds.push(
        panel()
            .scale(s, 1.0, s * 2.0)
            .translate(front.x, front.y - s * 1.95, front.z - 2.0 * s),
    );

    // RGB fan: tint is the animated light color averaged toward white.
    let c = (rgb_channels(t) + 2.0) / 3.0;
    cmds.push(
        DrawCommand::new(ShapeKind::Cylinder)
            .rotate(0.0, 0.0, 90.0)
            .translate(front.x + s - 0.1, front.y, front.z - 2.0 * s)
            .color(c.x, c.y, c.z, 1.0)
            .material("ballball"),
    );

    // Glass side panel, transparent, after everything else in the scene.
    cmds.push(
        DrawCommand::new(ShapeKind::Plane)
            .scale(s * 2.0, 1.0, s * 2.0)
            .rotate(90.0, 270.0, 0.0)
            .translate(front.x - s, front.y, front.z - 2.0 * s)
            .color(1.0, 1.0, 1.0, 0.1)
            .material("glass"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialBank;
    use crate::texture::TextureBank;

    #[test]
    fn shape_census() {
        let cmds = desk_scene(0.0);
        let count = |shape| cmds.iter().filter(|c| c.shape == shape).count();
        assert_eq!(count(ShapeKind::Plane), 11);
        assert_eq!(count(ShapeKind::Box), 31);
        assert_eq!(count(ShapeKind::Sphere), 2);
        assert_eq!(count(ShapeKind::Cylinder), 5);
        assert_eq!(count(ShapeKind::Prism), 3);
        assert_eq!(cmds.len(), 52);
    }

    #[test]
    fn every_material_tag_has_a_preset() {
        let bank = MaterialBank::desk_presets();
        for cmd in desk_scene(0.0) {
            if let Some(tag) = &cmd.material {
                assert!(bank.find(tag).is_some(), "unknown material {tag}");
            }
        }
    }

    #[test]
    fn every_texture_tag_is_in_the_required_set() {
        let mut bank = TextureBank::new();
        for (tag, _) in REQUIRED_TEXTURES {
            bank.register(tag).unwrap();
        }
        for cmd in desk_scene(0.0) {
            for tag in [&cmd.texture, &cmd.texture2, &cmd.specular_map]
                .into_iter()
                .flatten()
            {
                assert!(bank.slot(tag).is_some(), "unknown texture {tag}");
            }
        }
        assert!(!bank.missing_reported());
    }

    #[test]
    fn scene_ends_with_the_transparent_glass_panel() {
        let cmds = desk_scene(0.0);
        let last = cmds.last().unwrap();
        assert_eq!(last.shape, ShapeKind::Plane);
        assert!(last.is_transparent());
    }

    #[test]
    fn static_lights_enabled() {
        let rig = build_lights();
        assert_eq!(rig.enabled_count(), 2);
        assert_eq!(rig.lights[0].position, Vec3::new(10.0, 20.0, 12.0));
        assert_eq!(rig.lights[1].position, Vec3::new(0.0, 3.0, -12.0));
    }

    #[test]
    fn rgb_light_animates() {
        let mut rig = build_lights();
        update_rgb_light(&mut rig, 0.0);
        assert!(rig.lights[2].enabled);
        assert_eq!(rig.enabled_count(), 3);
        let first = rig.lights[2].diffuse_color;

        update_rgb_light(&mut rig, 1.0);
        assert_ne!(rig.lights[2].diffuse_color, first);
    }

    #[test]
    fn fan_tint_tracks_the_light() {
        let cmds = desk_scene(0.0);
        let fan = cmds
            .iter()
            .filter(|c| c.shape == ShapeKind::Cylinder)
            .last()
            .unwrap();
        // At t=0 the channels are (0, 1, 0) averaged toward white.
        assert!((fan.color.x - 2.0 / 3.0).abs() < 1e-5);
        assert!((fan.color.y - 1.0).abs() < 1e-5);
        assert!((fan.color.z - 2.0 / 3.0).abs() < 1e-5);
    }
}
