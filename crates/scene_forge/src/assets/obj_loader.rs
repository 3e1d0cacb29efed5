//! OBJ file loader for mesh-instance models

use crate::assets::mesh::{Mesh, Vertex};
use std::path::Path;
use thiserror::Error;

/// OBJ parsing errors
#[derive(Error, Debug)]
pub enum ObjError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed number or index
    #[error("Parse error on line {line}: {message}")]
    ParseError {
        /// 1-based line number
        line: usize,
        /// What failed to parse
        message: String,
    },
    /// Structurally invalid file
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Minimal Wavefront OBJ reader (positions, normals, texture coordinates, faces)
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file and return a mesh
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, ObjError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_obj(&text)
    }

    /// Parse OBJ text into a mesh
    ///
    /// Polygons are fan-triangulated; missing normals default to +Y and
    /// missing texture coordinates to (0, 0).
    pub fn parse_obj(text: &str) -> Result<Mesh, ObjError> {
        let mut positions: Vec<[f32; 3]> = Vec::new();
        let mut normals: Vec<[f32; 3]> = Vec::new();
        let mut tex_coords: Vec<[f32; 2]> = Vec::new();
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for (line_index, raw) in text.lines().enumerate() {
            let line_no = line_index + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let parse = |s: &str, what: &str| -> Result<f32, ObjError> {
                s.parse().map_err(|_| ObjError::ParseError {
                    line: line_no,
                    message: format!("invalid {what} '{s}'"),
                })
            };

            match parts[0] {
                "v" if parts.len() >= 4 => {
                    positions.push([
                        parse(parts[1], "vertex x")?,
                        parse(parts[2], "vertex y")?,
                        parse(parts[3], "vertex z")?,
                    ]);
                }
                "vn" if parts.len() >= 4 => {
                    normals.push([
                        parse(parts[1], "normal x")?,
                        parse(parts[2], "normal y")?,
                        parse(parts[3], "normal z")?,
                    ]);
                }
                "vt" if parts.len() >= 3 => {
                    tex_coords.push([parse(parts[1], "tex coord u")?, parse(parts[2], "tex coord v")?]);
                }
                "f" if parts.len() >= 4 => {
                    let mut face_indices = Vec::with_capacity(parts.len() - 1);

                    for vertex_data in &parts[1..] {
                        let mut refs = vertex_data.split('/');

                        // OBJ indices are 1-based
                        let pos_idx: usize = refs
                            .next()
                            .and_then(|s| s.parse().ok())
                            .filter(|&i: &usize| i > 0)
                            .ok_or_else(|| ObjError::ParseError {
                                line: line_no,
                                message: format!("invalid position index in '{vertex_data}'"),
                            })?;
                        let tex_idx = refs.next().and_then(|s| s.parse::<usize>().ok()).and_then(|i| i.checked_sub(1));
                        let normal_idx = refs.next().and_then(|s| s.parse::<usize>().ok()).and_then(|i| i.checked_sub(1));

                        let position = positions.get(pos_idx - 1).ok_or_else(|| {
                            ObjError::InvalidFormat(format!("position index {pos_idx} out of bounds on line {line_no}"))
                        })?;
                        let tex_coord = tex_idx.and_then(|i| tex_coords.get(i)).copied().unwrap_or([0.0, 0.0]);
                        let normal = normal_idx.and_then(|i| normals.get(i)).copied().unwrap_or([0.0, 1.0, 0.0]);

                        vertices.push(Vertex::new(*position, normal, tex_coord));
                        face_indices.push((vertices.len() - 1) as u32);
                    }

                    for i in 1..(face_indices.len() - 1) {
                        indices.push(face_indices[0]);
                        indices.push(face_indices[i]);
                        indices.push(face_indices[i + 1]);
                    }
                }
                _ => {}
            }
        }

        if vertices.is_empty() {
            return Err(ObjError::InvalidFormat("No vertices found in OBJ file".to_string()));
        }

        Ok(Mesh::new(vertices, indices))
    }
}
