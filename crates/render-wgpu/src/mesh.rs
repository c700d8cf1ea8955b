//! CPU-side generators for the five basic meshes the draw script references.
//! All meshes are unit-sized; the per-draw model matrix does the shaping.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

const SPHERE_SEGMENTS: u32 = 32;
const SPHERE_RINGS: u32 = 16;
const CYLINDER_SEGMENTS: u32 = 32;

/// Flat quad spanning x,z in [-1, 1] at y = 0, facing +Y.
pub fn plane_mesh() -> MeshData {
    let n = [0.0, 1.0, 0.0];
    let vertices = vec![
        Vertex { position: [-1.0, 0.0,  1.0], normal: n, uv: [0.0, 1.0] },
        Vertex { position: [ 1.0, 0.0,  1.0], normal: n, uv: [1.0, 1.0] },
        Vertex { position: [ 1.0, 0.0, -1.0], normal: n, uv: [1.0, 0.0] },
        Vertex { position: [-1.0, 0.0, -1.0], normal: n, uv: [0.0, 0.0] },
    ];
    let indices = vec![0, 1, 2, 2, 3, 0];
    MeshData { vertices, indices }
}

/// Unit cube centered at the origin, one quad per face.
pub fn box_mesh() -> MeshData {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        Vertex { position: [-p, -p,  p], normal: [0.0, 0.0, 1.0], uv: [0.0, 1.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, 0.0, 1.0], uv: [1.0, 1.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 0.0, 1.0], uv: [1.0, 0.0] },
        Vertex { position: [-p,  p,  p], normal: [0.0, 0.0, 1.0], uv: [0.0, 0.0] },
        // -Z face
        Vertex { position: [ p, -p, -p], normal: [0.0, 0.0, -1.0], uv: [0.0, 1.0] },
        Vertex { position: [-p, -p, -p], normal: [0.0, 0.0, -1.0], uv: [1.0, 1.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 0.0, -1.0], uv: [1.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 0.0, -1.0], uv: [0.0, 0.0] },
        // +X face
        Vertex { position: [ p, -p,  p], normal: [1.0, 0.0, 0.0], uv: [0.0, 1.0] },
        Vertex { position: [ p, -p, -p], normal: [1.0, 0.0, 0.0], uv: [1.0, 1.0] },
        Vertex { position: [ p,  p, -p], normal: [1.0, 0.0, 0.0], uv: [1.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [1.0, 0.0, 0.0], uv: [0.0, 0.0] },
        // -X face
        Vertex { position: [-p, -p, -p], normal: [-1.0, 0.0, 0.0], uv: [0.0, 1.0] },
        Vertex { position: [-p, -p,  p], normal: [-1.0, 0.0, 0.0], uv: [1.0, 1.0] },
        Vertex { position: [-p,  p,  p], normal: [-1.0, 0.0, 0.0], uv: [1.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [-1.0, 0.0, 0.0], uv: [0.0, 0.0] },
        // +Y face
        Vertex { position: [-p,  p,  p], normal: [0.0, 1.0, 0.0], uv: [0.0, 1.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 1.0, 0.0], uv: [1.0, 1.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 1.0, 0.0], uv: [1.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 1.0, 0.0], uv: [0.0, 0.0] },
        // -Y face
        Vertex { position: [-p, -p, -p], normal: [0.0, -1.0, 0.0], uv: [0.0, 1.0] },
        Vertex { position: [ p, -p, -p], normal: [0.0, -1.0, 0.0], uv: [1.0, 1.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, -1.0, 0.0], uv: [1.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [0.0, -1.0, 0.0], uv: [0.0, 0.0] },
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0,1,2, 2,3,0,       // +Z
        4,5,6, 6,7,4,       // -Z
        8,9,10, 10,11,8,    // +X
        12,13,14, 14,15,12, // -X
        16,17,18, 18,19,16, // +Y
        20,21,22, 22,23,20, // -Y
    ];
    MeshData { vertices, indices }
}

/// UV sphere of radius 1 centered at the origin.
pub fn sphere_mesh() -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for ring in 0..=SPHERE_RINGS {
        // phi runs pole to pole.
        let phi = std::f32::consts::PI * ring as f32 / SPHERE_RINGS as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for seg in 0..=SPHERE_SEGMENTS {
            let theta = std::f32::consts::TAU * seg as f32 / SPHERE_SEGMENTS as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let dir = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            vertices.push(Vertex {
                position: dir,
                normal: dir,
                uv: [
                    seg as f32 / SPHERE_SEGMENTS as f32,
                    ring as f32 / SPHERE_RINGS as f32,
                ],
            });
        }
    }

    let stride = SPHERE_SEGMENTS + 1;
    for ring in 0..SPHERE_RINGS {
        for seg in 0..SPHERE_SEGMENTS {
            let a = (ring * stride + seg) as u16;
            let b = a + 1;
            let c = a + stride as u16;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    MeshData { vertices, indices }
}

/// Cylinder of radius 1 with its base at y = 0 and top at y = 1, capped at
/// both ends. The base sits at the draw position, matching how the script
/// places receptacles and columns.
pub fn cylinder_mesh() -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side wall.
    for seg in 0..=CYLINDER_SEGMENTS {
        let theta = std::f32::consts::TAU * seg as f32 / CYLINDER_SEGMENTS as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        let normal = [cos_theta, 0.0, sin_theta];
        let u = seg as f32 / CYLINDER_SEGMENTS as f32;
        vertices.push(Vertex {
            position: [cos_theta, 0.0, sin_theta],
            normal,
            uv: [u, 1.0],
        });
        vertices.push(Vertex {
            position: [cos_theta, 1.0, sin_theta],
            normal,
            uv: [u, 0.0],
        });
    }
    for seg in 0..CYLINDER_SEGMENTS {
        let a = (seg * 2) as u16;
        indices.extend_from_slice(&[a, a + 1, a + 2, a + 2, a + 1, a + 3]);
    }

    // Caps: a center vertex plus the rim, fanned out.
    for (y, normal_y) in [(0.0, -1.0), (1.0, 1.0)] {
        let center = vertices.len() as u16;
        vertices.push(Vertex {
            position: [0.0, y, 0.0],
            normal: [0.0, normal_y, 0.0],
            uv: [0.5, 0.5],
        });
        for seg in 0..=CYLINDER_SEGMENTS {
            let theta = std::f32::consts::TAU * seg as f32 / CYLINDER_SEGMENTS as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            vertices.push(Vertex {
                position: [cos_theta, y, sin_theta],
                normal: [0.0, normal_y, 0.0],
                uv: [0.5 + cos_theta * 0.5, 0.5 + sin_theta * 0.5],
            });
        }
        for seg in 0..CYLINDER_SEGMENTS {
            let rim = center + 1 + seg as u16;
            if normal_y < 0.0 {
                indices.extend_from_slice(&[center, rim, rim + 1]);
            } else {
                indices.extend_from_slice(&[center, rim + 1, rim]);
            }
        }
    }

    MeshData { vertices, indices }
}

/// Triangular prism centered at the origin: unit height along Y, triangular
/// cross-section in XZ with the flat back at z = 0.5 and the ridge at
/// z = -0.5.
pub fn prism_mesh() -> MeshData {
    let h = 0.5_f32;
    // Cross-section corners, counter-clockwise seen from +Y.
    let back_left = [-0.5, 0.5];
    let back_right = [0.5, 0.5];
    let ridge = [0.0, -0.5];

    // Outward normals of the two slanted sides, unit length in XZ.
    let inv = 1.0 / (1.25_f32).sqrt();
    let right_n = [1.0 * inv, 0.0, -0.5 * inv];
    let left_n = [-1.0 * inv, 0.0, -0.5 * inv];

    let mut vertices = Vec::new();
    let mut indices: Vec<u16> = Vec::new();

    let mut quad = |a: [f32; 2], b: [f32; 2], normal: [f32; 3]| {
        let base = vertices.len() as u16;
        vertices.push(Vertex { position: [a[0], -h, a[1]], normal, uv: [0.0, 1.0] });
        vertices.push(Vertex { position: [b[0], -h, b[1]], normal, uv: [1.0, 1.0] });
        vertices.push(Vertex { position: [b[0],  h, b[1]], normal, uv: [1.0, 0.0] });
        vertices.push(Vertex { position: [a[0],  h, a[1]], normal, uv: [0.0, 0.0] });
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    };

    quad(back_left, back_right, [0.0, 0.0, 1.0]);
    quad(back_right, ridge, right_n);
    quad(ridge, back_left, left_n);

    // Triangular caps.
    for (y, normal_y) in [(-h, -1.0), (h, 1.0)] {
        let base = vertices.len() as u16;
        for corner in [back_left, back_right, ridge] {
            vertices.push(Vertex {
                position: [corner[0], y, corner[1]],
                normal: [0.0, normal_y, 0.0],
                uv: [corner[0] + 0.5, corner[1] + 0.5],
            });
        }
        if normal_y > 0.0 {
            indices.extend_from_slice(&[base, base + 1, base + 2]);
        } else {
            indices.extend_from_slice(&[base, base + 2, base + 1]);
        }
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_mesh(mesh: &MeshData) {
        assert!(!mesh.vertices.is_empty());
        assert_eq!(mesh.indices.len() % 3, 0);
        for &i in &mesh.indices {
            assert!((i as usize) < mesh.vertices.len(), "index out of range");
        }
        for v in &mesh.vertices {
            let [x, y, z] = v.normal;
            let len = (x * x + y * y + z * z).sqrt();
            assert!((len - 1.0).abs() < 1e-4, "normal not unit length: {len}");
        }
    }

    #[test]
    fn all_meshes_are_well_formed() {
        for mesh in [
            plane_mesh(),
            box_mesh(),
            sphere_mesh(),
            cylinder_mesh(),
            prism_mesh(),
        ] {
            check_mesh(&mesh);
        }
    }

    #[test]
    fn plane_spans_unit_extent() {
        let mesh = plane_mesh();
        for v in &mesh.vertices {
            assert_eq!(v.position[1], 0.0);
            assert!(v.position[0].abs() <= 1.0 && v.position[2].abs() <= 1.0);
        }
    }

    #[test]
    fn sphere_vertices_sit_on_unit_radius() {
        let mesh = sphere_mesh();
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            let r = (x * x + y * y + z * z).sqrt();
            assert!((r - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn cylinder_extends_from_base_to_unit_height() {
        let mesh = cylinder_mesh();
        let min_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        let max_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_eq!(min_y, 0.0);
        assert_eq!(max_y, 1.0);
    }

    #[test]
    fn prism_is_centered_on_y() {
        let mesh = prism_mesh();
        let min_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        let max_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_eq!(min_y, -0.5);
        assert_eq!(max_y, 0.5);
    }

    #[test]
    fn sphere_fits_sixteen_bit_indices() {
        let mesh = sphere_mesh();
        assert!(mesh.vertices.len() <= u16::MAX as usize);
        assert_eq!(mesh.index_count() as usize, mesh.indices.len());
    }
}
