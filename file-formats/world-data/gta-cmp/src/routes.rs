//! Routes: variable-length vertex lists

use gta_data::{SectionReader, WriteExt};

use crate::error::{CmpError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePoint {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

/// A route record: `u8 vertex_count, u8 route_type, vertex_count × (x, y, z)`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub route_type: u8,
    pub vertices: Vec<RoutePoint>,
}

impl Route {
    pub fn packed_len(&self) -> usize {
        2 + self.vertices.len() * 3
    }

    /// Read routes until the section is exhausted
    pub fn read_all(reader: &mut SectionReader<'_>) -> Result<Vec<Self>> {
        let mut routes = Vec::new();
        while !reader.is_empty() {
            let start = reader.offset();
            let header = reader.take("routes", 2).map_err(|_| CmpError::CorruptSection {
                section: "routes",
                message: format!("stray byte at offset {start}"),
            })?;
            let (count, route_type) = (usize::from(header[0]), header[1]);
            let points = reader
                .take("routes", count * 3)
                .map_err(|_| CmpError::CorruptSection {
                    section: "routes",
                    message: format!(
                        "route at offset {start} declares {count} vertices past the section end"
                    ),
                })?;
            let vertices = points
                .chunks_exact(3)
                .map(|p| RoutePoint {
                    x: p[0],
                    y: p[1],
                    z: p[2],
                })
                .collect();
            routes.push(Self {
                route_type,
                vertices,
            });
        }
        Ok(routes)
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        let count = u8::try_from(self.vertices.len()).map_err(|_| CmpError::Encode {
            section: "routes",
            message: format!("{} vertices do not fit a u8 count", self.vertices.len()),
        })?;
        out.put_u8(count);
        out.put_u8(self.route_type);
        for point in &self.vertices {
            out.extend_from_slice(&[point.x, point.y, point.z]);
        }
        Ok(())
    }
}
