//! OBJ format support
//!
//! Vertices are taken from the `v` lines in file order, including vertices no
//! face references, so vertex indices match the file. Polygons are
//! fan-triangulated. The `obj` crate stores positions as `f32`.

use crate::{MeshReader, MeshWriter};
use meshquant_core::{Error, Point3d, Result, TriangleMesh};
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub struct ObjReader;
pub struct ObjWriter;

fn map_obj_error(path: &Path, err: ObjError) -> Error {
    match err {
        ObjError::Io(e) => Error::Io(e),
        other => Error::InvalidData(format!("OBJ parse error in {}: {}", path.display(), other)),
    }
}

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let data = ObjData::load_buf(BufReader::new(file)).map_err(|e| map_obj_error(path, e))?;

        let vertices = data
            .position
            .iter()
            .map(|&[x, y, z]| Point3d::new(f64::from(x), f64::from(y), f64::from(z)))
            .collect();

        let mut faces = Vec::new();
        for object in &data.objects {
            for group in &object.groups {
                for poly in &group.polys {
                    let indices: Vec<usize> = poly.0.iter().map(|tuple| tuple.0).collect();
                    for i in 1..indices.len().saturating_sub(1) {
                        faces.push([indices[0], indices[i], indices[i + 1]]);
                    }
                }
            }
            debug!(object = %object.name, groups = object.groups.len(), "OBJ object loaded");
        }

        Ok(TriangleMesh::from_vertices_and_faces(vertices, faces))
    }
}

impl MeshWriter for ObjWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let path = path.as_ref();

        let mut group = Group::new("default".to_string());
        group.polys = mesh
            .faces
            .iter()
            .map(|face| {
                SimplePolygon(
                    face.iter()
                        .map(|&idx| IndexTuple(idx, None, None))
                        .collect(),
                )
            })
            .collect();
        let mut object = Object::new("meshquant".to_string());
        object.groups.push(group);

        let data = ObjData {
            position: mesh
                .vertices
                .iter()
                .map(|v| [v.x as f32, v.y as f32, v.z as f32])
                .collect(),
            objects: vec![object],
            ..Default::default()
        };

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        data.write_to_buf(&mut writer)
            .map_err(|e| map_obj_error(path, e))?;
        writer.flush()?;
        Ok(())
    }
}
