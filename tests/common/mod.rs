//! Shared sample types for the integration tests.
//!
//! A small asset-pipeline flavored type family exercising every field shape the
//! freezing contract knows: scalars, scalar arrays, strings, embedded value types,
//! boxed reference types and arrays of freezable values.

#![allow(dead_code)]

use std::io::Write;

use permafrost::prelude::*;

/// Scalar + scalar array + string, all inline in one root page.
pub struct Record {
    pub count: u32,
    pub values: Vec<u32>,
    pub name: String,
}

impl Freeze for Record {
    const FROZEN_SIZE: usize = 4 + ARRAY_FIELD_SIZE + STRING_FIELD_SIZE;
    const IS_REFERENCE: bool = false;

    fn freeze<W: Write>(&self, page: &mut PageWriter<'_, W>, offset: usize) -> Result<()> {
        page.write(offset, self.count)?;
        page.write_scalars(offset + 4, &self.values)?;
        page.write_str(offset + 4 + ARRAY_FIELD_SIZE, &self.name)
    }
}

#[derive(Clone, Copy)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Freeze for Vec3 {
    const FROZEN_SIZE: usize = 3 * 4;
    const IS_REFERENCE: bool = false;

    fn freeze<W: Write>(&self, page: &mut PageWriter<'_, W>, offset: usize) -> Result<()> {
        page.write(offset, self.x)?;
        page.write(offset + 4, self.y)?;
        page.write(offset + 8, self.z)
    }
}

#[derive(Clone, Copy)]
pub struct BoundingBox {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Freeze for BoundingBox {
    const FROZEN_SIZE: usize = 2 * Vec3::FROZEN_SIZE;
    const IS_REFERENCE: bool = false;

    fn freeze<W: Write>(&self, page: &mut PageWriter<'_, W>, offset: usize) -> Result<()> {
        page.write_value(offset, &self.center)?;
        page.write_value(offset + Vec3::FROZEN_SIZE, &self.half_extents)
    }
}

/// Boxed into its own page wherever it appears.
pub struct Material {
    pub name: String,
}

impl Freeze for Material {
    const FROZEN_SIZE: usize = STRING_FIELD_SIZE;
    const IS_REFERENCE: bool = true;

    fn freeze<W: Write>(&self, page: &mut PageWriter<'_, W>, offset: usize) -> Result<()> {
        page.write_str(offset, &self.name)
    }
}

pub struct MeshSection {
    pub bounds: BoundingBox,
    pub indices: Vec<u32>,
    pub material: Material,
}

impl Freeze for MeshSection {
    const FROZEN_SIZE: usize = BoundingBox::FROZEN_SIZE + ARRAY_FIELD_SIZE + POINTER_SIZE;
    const IS_REFERENCE: bool = false;

    fn freeze<W: Write>(&self, page: &mut PageWriter<'_, W>, offset: usize) -> Result<()> {
        page.write_value(offset, &self.bounds)?;
        page.write_scalars(offset + BoundingBox::FROZEN_SIZE, &self.indices)?;
        page.write_value(
            offset + BoundingBox::FROZEN_SIZE + ARRAY_FIELD_SIZE,
            &self.material,
        )
    }
}

pub struct Mesh {
    pub sections: Vec<MeshSection>,
    pub name: String,
}

impl Freeze for Mesh {
    const FROZEN_SIZE: usize = ARRAY_FIELD_SIZE + STRING_FIELD_SIZE;
    const IS_REFERENCE: bool = false;

    fn freeze<W: Write>(&self, page: &mut PageWriter<'_, W>, offset: usize) -> Result<()> {
        page.write_values(offset, &self.sections)?;
        page.write_str(offset + ARRAY_FIELD_SIZE, &self.name)
    }
}

/// Freezes `value` into a fresh single-root image and returns its bytes.
pub fn freeze_to_vec<T: Freeze>(value: &T, payload_version: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut writer = ImageWriter::new(&mut buffer, payload_version);
    writer.write_root(value).expect("freeze failed");
    writer.finish().expect("finalize failed");
    buffer
}

pub fn sample_mesh() -> Mesh {
    Mesh {
        sections: vec![MeshSection {
            bounds: BoundingBox {
                center: Vec3 {
                    x: 0.5,
                    y: 1.25,
                    z: -3.0,
                },
                half_extents: Vec3 {
                    x: 2.0,
                    y: 2.0,
                    z: 2.0,
                },
            },
            indices: vec![0, 1, 2],
            material: Material {
                name: "stone".to_string(),
            },
        }],
        name: "rock".to_string(),
    }
}

pub fn read_u64(image: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(image[offset..offset + 8].try_into().unwrap())
}

pub fn read_u32(image: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(image[offset..offset + 4].try_into().unwrap())
}
