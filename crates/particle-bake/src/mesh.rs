//! Baked mesh and material types

use std::io::{self, Write};
use std::path::PathBuf;

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Name given to every baked object
pub const BAKED_OBJECT_NAME: &str = "Baked Particle Mesh";

/// Coordinate space of baked vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BakeMeshOptions {
    /// Vertices stay in the particle system's local space
    #[default]
    Default,
    /// Vertices are moved to world space with the system's transform
    BakePosition,
}

impl BakeMeshOptions {
    /// Options matching a "use transform" toggle
    pub fn from_use_transform(use_transform: bool) -> Self {
        if use_transform {
            Self::BakePosition
        } else {
            Self::Default
        }
    }
}

/// Surface appearance shared by a renderer and the objects baked from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Material name
    pub name: String,
    /// Base color (RGBA, 0.0-1.0)
    pub color: [f32; 4],
    /// Optional texture reference
    pub texture: Option<PathBuf>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default-Particle".to_string(),
            color: [1.0, 1.0, 1.0, 1.0],
            texture: None,
        }
    }
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates
    pub uvs: Vec<[f32; 2]>,
    /// Vertex colors (RGBA)
    pub colors: Vec<[f32; 4]>,
    /// Triangle list, three indices per triangle
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no geometry
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Axis-aligned bounds as (min, max), or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions.iter().map(|p| Vec3::from(*p));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Append a quad spanning `center +/- right +/- up`
    ///
    /// Vertices go counter-clockwise when seen from `normal`, as two
    /// triangles.
    pub fn push_quad(&mut self, center: Vec3, right: Vec3, up: Vec3, normal: Vec3, color: Vec4) {
        let base = self.positions.len() as u32;
        let corners = [
            (center - right - up, [0.0, 0.0]),
            (center + right - up, [1.0, 0.0]),
            (center + right + up, [1.0, 1.0]),
            (center - right + up, [0.0, 1.0]),
        ];

        for (position, uv) in corners {
            self.positions.push(position.to_array());
            self.normals.push(normal.to_array());
            self.uvs.push(uv);
            self.colors.push(color.to_array());
        }

        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// A mesh plus the material it was baked with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakedObject {
    /// Object name
    pub name: String,
    /// Baked geometry
    pub mesh: Mesh,
    /// Material, when one was applied
    pub material: Option<Material>,
}

impl BakedObject {
    /// Wrap a freshly baked mesh
    pub fn new(mesh: Mesh) -> Self {
        Self {
            name: BAKED_OBJECT_NAME.to_string(),
            mesh,
            material: None,
        }
    }

    /// Write as Wavefront OBJ text
    ///
    /// Vertex colors are appended to `v` lines (`v x y z r g b`), the
    /// widely supported extension. Faces are 1-based `v/vt/vn` triples.
    pub fn write_obj<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let mesh = &self.mesh;

        writeln!(
            writer,
            "# {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        )?;
        writeln!(writer, "o {}", self.name)?;
        if let Some(material) = &self.material {
            writeln!(writer, "usemtl {}", material.name)?;
        }

        for (p, c) in mesh.positions.iter().zip(&mesh.colors) {
            writeln!(writer, "v {} {} {} {} {} {}", p[0], p[1], p[2], c[0], c[1], c[2])?;
        }
        for uv in &mesh.uvs {
            writeln!(writer, "vt {} {}", uv[0], uv[1])?;
        }
        for n in &mesh.normals {
            writeln!(writer, "vn {} {} {}", n[0], n[1], n[2])?;
        }
        for tri in mesh.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
            writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        }

        writer.flush()
    }
}
