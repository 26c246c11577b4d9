//! Fixed-size vector, quaternion and matrix value types.
//!
//! All of these parse from comma and/or whitespace separated component lists,
//! e.g. `"0, 1, 0"` or `"0 1 0"`.

use super::{ParseScalar, fixed_components};
use crate::ScalarFormatError;

/// Two-component single-precision vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

/// Three-component single-precision vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

/// Three-component double-precision vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3d {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

/// Four-component single-precision vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector4 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W component.
    pub w: f32,
}

/// Single-precision rotation quaternion, written `x, y, z, w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W (scalar) component.
    pub w: f32,
}

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Double-precision rotation quaternion, written `x, y, z, w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuaternionD {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
    /// W (scalar) component.
    pub w: f64,
}

impl QuaternionD {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };
}

impl Default for QuaternionD {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// 4x4 single-precision matrix, written as sixteen row-major components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4x4 {
    /// Matrix rows, top to bottom.
    pub rows: [[f32; 4]; 4],
}

impl Matrix4x4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ParseScalar for Vector2 {
    const TYPE_NAME: &'static str = "Vector2";

    fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
        let [x, y] = fixed_components(raw, Self::TYPE_NAME)?;
        Ok(Self { x, y })
    }
}

impl ParseScalar for Vector3 {
    const TYPE_NAME: &'static str = "Vector3";

    fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
        let [x, y, z] = fixed_components(raw, Self::TYPE_NAME)?;
        Ok(Self { x, y, z })
    }
}

impl ParseScalar for Vector3d {
    const TYPE_NAME: &'static str = "Vector3d";

    fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
        let [x, y, z] = fixed_components(raw, Self::TYPE_NAME)?;
        Ok(Self { x, y, z })
    }
}

impl ParseScalar for Vector4 {
    const TYPE_NAME: &'static str = "Vector4";

    fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
        let [x, y, z, w] = fixed_components(raw, Self::TYPE_NAME)?;
        Ok(Self { x, y, z, w })
    }
}

impl ParseScalar for Quaternion {
    const TYPE_NAME: &'static str = "Quaternion";

    fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
        let [x, y, z, w] = fixed_components(raw, Self::TYPE_NAME)?;
        Ok(Self { x, y, z, w })
    }
}

impl ParseScalar for QuaternionD {
    const TYPE_NAME: &'static str = "QuaternionD";

    fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
        let [x, y, z, w] = fixed_components(raw, Self::TYPE_NAME)?;
        Ok(Self { x, y, z, w })
    }
}

impl ParseScalar for Matrix4x4 {
    const TYPE_NAME: &'static str = "Matrix4x4";

    fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
        let components: [f32; 16] = fixed_components(raw, Self::TYPE_NAME)?;
        let mut rows = [[0.0_f32; 4]; 4];
        for (row, chunk) in rows.iter_mut().zip(components.chunks_exact(4)) {
            row.copy_from_slice(chunk);
        }
        Ok(Self { rows })
    }
}

crate::scalar_field!(
    Vector2,
    Vector3,
    Vector3d,
    Vector4,
    Quaternion,
    QuaternionD,
    Matrix4x4
);
