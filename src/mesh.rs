//! Wireframe meshes for the decorative scene. The page draws edges only, so
//! a mesh is just vertices plus index pairs.

use std::f64::consts::TAU;

use crate::geometry::Vec3;
use crate::scene::{ModelKind, ShapeKind, Transform};

#[derive(Clone, Debug, PartialEq)]
pub struct WireMesh {
    pub vertices: Vec<Vec3>,
    pub edges: Vec<(usize, usize)>,
}

impl WireMesh {
    pub fn octahedron(radius: f64) -> Self {
        let vertices = vec![
            Vec3::new(radius, 0.0, 0.0),
            Vec3::new(-radius, 0.0, 0.0),
            Vec3::new(0.0, radius, 0.0),
            Vec3::new(0.0, -radius, 0.0),
            Vec3::new(0.0, 0.0, radius),
            Vec3::new(0.0, 0.0, -radius),
        ];
        let mut edges = Vec::with_capacity(12);
        for pole in [2, 3, 4, 5] {
            for around in [0, 1] {
                edges.push((pole, around));
            }
        }
        for pole in [2, 3] {
            for around in [4, 5] {
                edges.push((pole, around));
            }
        }
        Self { vertices, edges }
    }

    pub fn cuboid(width: f64, height: f64, depth: f64) -> Self {
        let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
        let vertices = (0..8)
            .map(|corner| {
                Vec3::new(
                    if corner & 1 == 0 { -x } else { x },
                    if corner & 2 == 0 { -y } else { y },
                    if corner & 4 == 0 { -z } else { z },
                )
            })
            .collect();
        let mut edges = Vec::with_capacity(12);
        for a in 0..8_usize {
            for bit in [1, 2, 4] {
                if a & bit == 0 {
                    edges.push((a, a | bit));
                }
            }
        }
        Self { vertices, edges }
    }

    pub fn icosahedron(radius: f64) -> Self {
        let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
        let raw = [
            (-1.0, phi, 0.0),
            (1.0, phi, 0.0),
            (-1.0, -phi, 0.0),
            (1.0, -phi, 0.0),
            (0.0, -1.0, phi),
            (0.0, 1.0, phi),
            (0.0, -1.0, -phi),
            (0.0, 1.0, -phi),
            (phi, 0.0, -1.0),
            (phi, 0.0, 1.0),
            (-phi, 0.0, -1.0),
            (-phi, 0.0, 1.0),
        ];
        let vertices: Vec<Vec3> = raw
            .iter()
            .map(|(x, y, z)| Vec3::new(*x, *y, *z).normalized() * radius)
            .collect();

        // Neighbouring vertices sit exactly one edge length apart.
        let edge_length = vertices[0].distance(vertices[1]);
        let mut edges = Vec::with_capacity(30);
        for a in 0..vertices.len() {
            for b in a + 1..vertices.len() {
                if (vertices[a].distance(vertices[b]) - edge_length).abs() < 1e-6 {
                    edges.push((a, b));
                }
            }
        }
        Self { vertices, edges }
    }

    /// Circle in the XY plane.
    pub fn ring(radius: f64, segments: usize) -> Self {
        let segments = segments.max(3);
        let vertices = (0..segments)
            .map(|step| {
                let angle = TAU * step as f64 / segments as f64;
                Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
            })
            .collect();
        let edges = (0..segments).map(|step| (step, (step + 1) % segments)).collect();
        Self { vertices, edges }
    }

    pub fn torus(major: f64, minor: f64, rings: usize, sides: usize) -> Self {
        let rings = rings.max(3);
        let sides = sides.max(3);
        let mut vertices = Vec::with_capacity(rings * sides);
        for ring in 0..rings {
            let u = TAU * ring as f64 / rings as f64;
            for side in 0..sides {
                let v = TAU * side as f64 / sides as f64;
                let reach = major + minor * v.cos();
                vertices.push(Vec3::new(reach * u.cos(), reach * u.sin(), minor * v.sin()));
            }
        }

        let index = |ring: usize, side: usize| (ring % rings) * sides + side % sides;
        let mut edges = Vec::with_capacity(rings * sides * 2);
        for ring in 0..rings {
            for side in 0..sides {
                edges.push((index(ring, side), index(ring, side + 1)));
                edges.push((index(ring, side), index(ring + 1, side)));
            }
        }
        Self { vertices, edges }
    }

    pub fn for_project(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Octahedron => Self::octahedron(1.0),
            ShapeKind::Torus => Self::torus(0.8, 0.3, 12, 6),
            ShapeKind::Icosahedron => Self::icosahedron(1.0),
        }
    }

    /// Blocky stand-ins for the device mockups.
    pub fn for_model(kind: ModelKind) -> Self {
        match kind {
            ModelKind::Laptop => Self::cuboid(2.0, 0.1, 1.4)
                .merged(Self::cuboid(2.0, 1.3, 0.05).offset(Vec3::new(0.0, 0.7, -0.7))),
            ModelKind::Smartphone => Self::cuboid(0.6, 1.2, 0.08),
            ModelKind::Server => (0..3).fold(Self::cuboid(1.0, 0.3, 0.8), |mesh, unit| {
                if unit == 0 {
                    mesh
                } else {
                    mesh.merged(Self::cuboid(1.0, 0.3, 0.8).offset(Vec3::new(0.0, unit as f64 * 0.4, 0.0)))
                }
            }),
        }
    }

    pub fn offset(mut self, by: Vec3) -> Self {
        for vertex in &mut self.vertices {
            *vertex = *vertex + by;
        }
        self
    }

    pub fn merged(mut self, other: Self) -> Self {
        let base = self.vertices.len();
        self.vertices.extend(other.vertices);
        self.edges
            .extend(other.edges.into_iter().map(|(a, b)| (a + base, b + base)));
        self
    }

    /// World-space edge segments under `transform`.
    pub fn segments(&self, transform: &Transform) -> Vec<(Vec3, Vec3)> {
        let placed: Vec<Vec3> = self.vertices.iter().map(|v| transform.apply(*v)).collect();
        self.edges
            .iter()
            .map(|(a, b)| (placed[*a], placed[*b]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platonic_solids_have_expected_edge_counts() {
        assert_eq!(WireMesh::octahedron(1.0).edges.len(), 12);
        assert_eq!(WireMesh::cuboid(1.0, 1.0, 1.0).edges.len(), 12);
        let icosahedron = WireMesh::icosahedron(1.0);
        assert_eq!(icosahedron.vertices.len(), 12);
        assert_eq!(icosahedron.edges.len(), 30);
    }

    #[test]
    fn ring_closes_on_itself() {
        let ring = WireMesh::ring(2.0, 8);
        assert_eq!(ring.edges.len(), 8);
        assert_eq!(ring.edges.last(), Some(&(7, 0)));
        assert!(ring.vertices.iter().all(|v| (v.length() - 2.0).abs() < 1e-9));
    }

    #[test]
    fn torus_vertices_stay_within_tube() {
        let torus = WireMesh::torus(0.8, 0.3, 12, 6);
        assert_eq!(torus.vertices.len(), 72);
        for vertex in &torus.vertices {
            let planar = Vec3::new(vertex.x, vertex.y, 0.0).length();
            assert!(planar >= 0.5 - 1e-9 && planar <= 1.1 + 1e-9);
        }
    }

    #[test]
    fn merged_meshes_reindex_edges() {
        let server = WireMesh::for_model(ModelKind::Server);
        assert_eq!(server.vertices.len(), 24);
        assert_eq!(server.edges.len(), 36);
        assert!(server.edges.iter().all(|(a, b)| *a < 24 && *b < 24));
    }

    #[test]
    fn segments_follow_transform() {
        let mesh = WireMesh::cuboid(2.0, 2.0, 2.0);
        let segments = mesh.segments(&Transform::at(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(segments.len(), 12);
        assert!(segments.iter().all(|(a, b)| a.x >= 9.0 && b.x <= 11.0));
    }
}
