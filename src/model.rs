use std::path::Path;

use anyhow::{bail, Context, Result};
use glium::Display;
use glutin::surface::WindowSurface;
use obj::{IndexTuple, ObjData, ObjMaterial, SimplePolygon};
use rustc_hash::FxHashMap;

use crate::mesh::{Mesh, Vertex};

/// CPU-side contents of one OBJ group before upload.
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub material: Option<String>,
}

/// All drawable surfaces of one asset file, one mesh per group.
pub struct Model {
    pub meshes: Vec<Mesh>,
}

impl Model {
    /// Reads and uploads an OBJ file. An asset that yields no triangles is
    /// an error; an empty model is never handed to the render loop.
    pub fn load(display: &Display<WindowSurface>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("reading model {}", path.display()))?;
        let data = parse_obj(&bytes).with_context(|| format!("parsing model {}", path.display()))?;

        let mut meshes = Vec::new();
        for group in split_groups(&data) {
            if group.indices.is_empty() {
                continue;
            }
            meshes.push(Mesh::new(
                display,
                &group.vertices,
                &group.indices,
                Vec::new(),
                group.material,
            )?);
        }
        if meshes.is_empty() {
            bail!("model {} contains no drawable geometry", path.display());
        }
        Ok(Self { meshes })
    }
}

/// Parse the byte stream of an OBJ file into its raw data tables.
pub fn parse_obj(bytes: &[u8]) -> Result<ObjData, obj::ObjError> {
    let mut reader = std::io::BufReader::new(bytes);
    ObjData::load_buf(&mut reader)
}

/// Splits the parsed file into per-group vertex/index lists. Polygons are
/// fan-triangulated and vertices deduplicated per distinct
/// position/texcoord/normal index triple; missing texcoords and normals are
/// zero-filled. The material name comes from the group's `usemtl` reference,
/// with the group name as fallback.
pub fn split_groups(data: &ObjData) -> Vec<MeshData> {
    let mut groups = Vec::new();
    for object in &data.objects {
        for group in &object.groups {
            let mut vertices = Vec::new();
            let mut indices = Vec::new();
            let mut seen: FxHashMap<(usize, Option<usize>, Option<usize>), u32> =
                FxHashMap::default();

            for SimplePolygon(poly) in &group.polys {
                if poly.len() < 3 {
                    continue;
                }
                let mut resolve = |tuple: &IndexTuple| -> u32 {
                    *seen.entry((tuple.0, tuple.1, tuple.2)).or_insert_with(|| {
                        vertices.push(Vertex {
                            position: data.position[tuple.0],
                            normal: tuple.2.map_or([0.0; 3], |normal| data.normal[normal]),
                            tex_coords: tuple.1.map_or([0.0; 2], |uv| data.texture[uv]),
                        });
                        u32::try_from(vertices.len() - 1).unwrap()
                    })
                };

                let anchor = resolve(&poly[0]);
                for pair in poly[1..].windows(2) {
                    indices.push(anchor);
                    indices.push(resolve(&pair[0]));
                    indices.push(resolve(&pair[1]));
                }
            }

            let material = match &group.material {
                Some(ObjMaterial::Ref(name)) => Some(name.clone()),
                Some(ObjMaterial::Mtl(material)) => Some(material.name.clone()),
                None if group.name.is_empty() => None,
                None => Some(group.name.clone()),
            };

            groups.push(MeshData {
                vertices,
                indices,
                material,
            });
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::{parse_obj, split_groups};

    const CAR_OBJ: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
g body
usemtl CarPaint_Body
f 1/1/1 2/2/1 3/3/1 4/4/1
g wheels
usemtl Tire_Black_Rubber
f 1/1/1 2/2/1 3/3/1
";

    fn group<'d>(groups: &'d [super::MeshData], material: &str) -> &'d super::MeshData {
        groups
            .iter()
            .find(|group| group.material.as_deref() == Some(material))
            .expect("missing group")
    }

    #[test]
    fn groups_split_with_material_names() {
        let data = parse_obj(CAR_OBJ.as_bytes()).unwrap();
        let groups = split_groups(&data);
        let drawable = groups.iter().filter(|group| !group.indices.is_empty());
        assert_eq!(drawable.count(), 2);
        assert_eq!(group(&groups, "CarPaint_Body").indices.len(), 6);
        assert_eq!(group(&groups, "Tire_Black_Rubber").indices.len(), 3);
    }

    #[test]
    fn quads_fan_triangulate_with_deduplicated_vertices() {
        let data = parse_obj(CAR_OBJ.as_bytes()).unwrap();
        let groups = split_groups(&data);
        let body = group(&groups, "CarPaint_Body");
        assert_eq!(body.vertices.len(), 4);
        assert_eq!(body.indices, [0, 1, 2, 0, 2, 3]);
        assert!(body
            .indices
            .iter()
            .all(|&index| (index as usize) < body.vertices.len()));
    }

    #[test]
    fn vertices_carry_positions_texcoords_normals() {
        let data = parse_obj(CAR_OBJ.as_bytes()).unwrap();
        let groups = split_groups(&data);
        let second = group(&groups, "CarPaint_Body").vertices[1];
        assert_eq!(second.position, [1.0, 0.0, 0.0]);
        assert_eq!(second.tex_coords, [1.0, 0.0]);
        assert_eq!(second.normal, [0.0, 0.0, 1.0]);
    }
}
