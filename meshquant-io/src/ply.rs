//! PLY format support

use crate::{MeshReader, MeshWriter};
use meshquant_core::{Error, Point3d, Result, TriangleMesh};
use ply_rs::{
    parser::Parser,
    ply::{
        Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
        ScalarType,
    },
    writer::Writer,
};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub struct PlyReader;
pub struct PlyWriter;

impl MeshReader for PlyReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        // Parse PLY header and payload
        let parser = Parser::<DefaultElement>::new();
        let ply = parser.read_ply(&mut reader)?;

        // Extract vertices
        let mut vertices = Vec::new();
        if let Some(vertex_element) = ply.payload.get("vertex") {
            for vertex in vertex_element {
                let x = extract_property_value(vertex, "x")?;
                let y = extract_property_value(vertex, "y")?;
                let z = extract_property_value(vertex, "z")?;

                vertices.push(Point3d::new(x, y, z));
            }
        }

        // Extract faces, fan-triangulating polygons
        let mut faces = Vec::new();
        if let Some(face_element) = ply.payload.get("face") {
            for face in face_element {
                let indices = extract_face_indices(face)?;
                for i in 1..indices.len().saturating_sub(1) {
                    faces.push([indices[0], indices[i], indices[i + 1]]);
                }
            }
        }

        Ok(TriangleMesh::from_vertices_and_faces(vertices, faces))
    }
}

impl MeshWriter for PlyWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        // Create PLY structure
        let mut ply = Ply::<DefaultElement>::new();
        ply.header.encoding = Encoding::Ascii;
        ply.header
            .comments
            .push("exported by meshquant".to_string());

        // Define vertex element
        let mut vertex_element = ElementDef::new("vertex".to_string());
        vertex_element.count = mesh.vertices.len();
        for axis in ["x", "y", "z"] {
            vertex_element.properties.add(PropertyDef::new(
                axis.to_string(),
                PropertyType::Scalar(ScalarType::Double),
            ));
        }
        ply.header.elements.add(vertex_element);

        // Define face element
        let mut face_element = ElementDef::new("face".to_string());
        face_element.count = mesh.faces.len();
        face_element.properties.add(PropertyDef::new(
            "vertex_indices".to_string(),
            PropertyType::List(ScalarType::UChar, ScalarType::Int),
        ));
        ply.header.elements.add(face_element);

        // Add vertex data
        let vertices: Vec<DefaultElement> = mesh
            .vertices
            .iter()
            .map(|vertex| {
                let mut element = DefaultElement::new();
                element.insert("x".to_string(), Property::Double(vertex.x));
                element.insert("y".to_string(), Property::Double(vertex.y));
                element.insert("z".to_string(), Property::Double(vertex.z));
                element
            })
            .collect();
        ply.payload.insert("vertex".to_string(), vertices);

        // Add face data
        let mut faces = Vec::with_capacity(mesh.faces.len());
        for face in &mesh.faces {
            let mut indices = Vec::with_capacity(3);
            for &idx in face {
                let idx = i32::try_from(idx).map_err(|_| {
                    Error::InvalidData(format!("vertex index {} does not fit a PLY int", idx))
                })?;
                indices.push(idx);
            }
            let mut element = DefaultElement::new();
            element.insert("vertex_indices".to_string(), Property::ListInt(indices));
            faces.push(element);
        }
        ply.payload.insert("face".to_string(), faces);

        // Write PLY file
        let writer_instance = Writer::new();
        writer_instance.write_ply(&mut writer, &mut ply)?;
        writer.flush()?;

        Ok(())
    }
}

/// Extract a property value as f64 from a PLY element
fn extract_property_value(element: &DefaultElement, name: &str) -> Result<f64> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(f64::from(*val)),
        Some(Property::Double(val)) => Ok(*val),
        Some(Property::Int(val)) => Ok(f64::from(*val)),
        Some(Property::UInt(val)) => Ok(f64::from(*val)),
        Some(Property::Short(val)) => Ok(f64::from(*val)),
        Some(Property::UShort(val)) => Ok(f64::from(*val)),
        Some(Property::Char(val)) => Ok(f64::from(*val)),
        Some(Property::UChar(val)) => Ok(f64::from(*val)),
        _ => Err(Error::InvalidData(format!(
            "Property '{}' not found or invalid type",
            name
        ))),
    }
}

/// Extract face indices from a PLY face element
fn extract_face_indices(element: &DefaultElement) -> Result<Vec<usize>> {
    let invalid = || Error::InvalidData("Face index is negative".to_string());
    match element
        .get("vertex_indices")
        .or_else(|| element.get("vertex_index"))
    {
        Some(Property::ListInt(indices)) => indices
            .iter()
            .map(|&idx| usize::try_from(idx).map_err(|_| invalid()))
            .collect(),
        Some(Property::ListUInt(indices)) => Ok(indices.iter().map(|&idx| idx as usize).collect()),
        Some(Property::ListUChar(indices)) => {
            Ok(indices.iter().map(|&idx| usize::from(idx)).collect())
        }
        Some(Property::ListUShort(indices)) => {
            Ok(indices.iter().map(|&idx| usize::from(idx)).collect())
        }
        _ => Err(Error::InvalidData("Face indices not found".to_string())),
    }
}
