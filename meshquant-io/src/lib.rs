//! Mesh I/O for meshquant
//!
//! This crate loads vertex/face data from OBJ and PLY files and writes reconstructed
//! meshes back out. Format is picked from the file extension.

pub mod ply;
pub mod obj;

use meshquant_core::{Error, Result, TriangleMesh};
use std::path::Path;

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()>;
}

/// Supported mesh formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Ply,
}

impl MeshFormat {
    /// Detect the format from a path's extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());
        match ext.as_deref() {
            Some("obj") => Ok(MeshFormat::Obj),
            Some("ply") => Ok(MeshFormat::Ply),
            _ => Err(Error::UnsupportedFormat(format!(
                "unsupported mesh format: {:?}",
                path.extension()
            ))),
        }
    }

    /// File extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            MeshFormat::Obj => "obj",
            MeshFormat::Ply => "ply",
        }
    }
}

/// Auto-detect format and read mesh
///
/// Fails with [`Error::NotAMesh`] when the file parses but carries no vertices.
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    let mesh = match MeshFormat::from_path(path)? {
        MeshFormat::Obj => obj::ObjReader::read_mesh(path)?,
        MeshFormat::Ply => ply::PlyReader::read_mesh(path)?,
    };

    if mesh.is_empty() {
        return Err(Error::NotAMesh(format!(
            "{} contains no vertex data",
            path.display()
        )));
    }
    if let Some(face) = mesh.first_invalid_face() {
        return Err(Error::InvalidData(format!(
            "{}: face {} references a vertex that does not exist",
            path.display(),
            face
        )));
    }

    tracing::debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "loaded mesh"
    );
    Ok(mesh)
}

/// Auto-detect format and write mesh
pub fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match MeshFormat::from_path(path)? {
        MeshFormat::Obj => obj::ObjWriter::write_mesh(mesh, path)?,
        MeshFormat::Ply => ply::PlyWriter::write_mesh(mesh, path)?,
    }
    tracing::info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "wrote mesh"
    );
    Ok(())
}

#[cfg(test)]
mod tests;
