//! Debug inspection type definitions
//!
//! Core types for the debug property registry: the type tag stored with each
//! registration, the runtime value passed between tools and producers, and
//! the [`DebugScalar`] mapping from Rust types to both.

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Value type identifier for registered debug properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    // Primitives
    Bool,
    I8,
    I16,
    I32,
    U8,
    U16,
    U32,
    F32,
    F64,

    // Vectors
    Vec2, // { x: f32, y: f32 }
    Vec3, // { x: f32, y: f32, z: f32 }
    Vec4, // { x: f32, y: f32, z: f32, w: f32 }
}

impl ValueType {
    /// Get the byte size of this value type
    pub fn byte_size(&self) -> usize {
        match self {
            ValueType::Bool | ValueType::I8 | ValueType::U8 => 1,
            ValueType::I16 | ValueType::U16 => 2,
            ValueType::I32 | ValueType::U32 | ValueType::F32 => 4,
            ValueType::F64 => 8,
            ValueType::Vec2 => 8,  // 2 * f32
            ValueType::Vec3 => 12, // 3 * f32
            ValueType::Vec4 => 16, // 4 * f32
        }
    }

    /// Get a human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::I8 => "i8",
            ValueType::I16 => "i16",
            ValueType::I32 => "i32",
            ValueType::U8 => "u8",
            ValueType::U16 => "u16",
            ValueType::U32 => "u32",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
            ValueType::Vec2 => "Vec2",
            ValueType::Vec3 => "Vec3",
            ValueType::Vec4 => "Vec4",
        }
    }

    /// Whether the value has a single numeric representation (sliders, clamping)
    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            ValueType::Bool | ValueType::Vec2 | ValueType::Vec3 | ValueType::Vec4
        )
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Runtime value representation for debug inspection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum DebugValue {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    U8(u8),
    U16(u16),
    U32(u32),
    F32(f32),
    F64(f64),
    Vec2 { x: f32, y: f32 },
    Vec3 { x: f32, y: f32, z: f32 },
    Vec4 { x: f32, y: f32, z: f32, w: f32 },
}

impl DebugValue {
    /// Convert to f64 for numeric types, `None` for bools and vectors
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            DebugValue::I8(v) => Some(v as f64),
            DebugValue::I16(v) => Some(v as f64),
            DebugValue::I32(v) => Some(v as f64),
            DebugValue::U8(v) => Some(v as f64),
            DebugValue::U16(v) => Some(v as f64),
            DebugValue::U32(v) => Some(v as f64),
            DebugValue::F32(v) => Some(v as f64),
            DebugValue::F64(v) => Some(v),
            _ => None,
        }
    }

    /// Get the value type for this debug value
    pub fn value_type(&self) -> ValueType {
        match self {
            DebugValue::Bool(_) => ValueType::Bool,
            DebugValue::I8(_) => ValueType::I8,
            DebugValue::I16(_) => ValueType::I16,
            DebugValue::I32(_) => ValueType::I32,
            DebugValue::U8(_) => ValueType::U8,
            DebugValue::U16(_) => ValueType::U16,
            DebugValue::U32(_) => ValueType::U32,
            DebugValue::F32(_) => ValueType::F32,
            DebugValue::F64(_) => ValueType::F64,
            DebugValue::Vec2 { .. } => ValueType::Vec2,
            DebugValue::Vec3 { .. } => ValueType::Vec3,
            DebugValue::Vec4 { .. } => ValueType::Vec4,
        }
    }

    /// Apply range constraints
    ///
    /// Numeric values are clamped directly, vectors per component.
    /// Bools pass through unchanged.
    pub fn clamped(self, constraints: &Constraints) -> Self {
        let f = |v: f32| constraints.clamp(v as f64) as f32;
        match self {
            DebugValue::Bool(_) => self,
            DebugValue::I8(v) => DebugValue::I8(constraints.clamp(v as f64) as i8),
            DebugValue::I16(v) => DebugValue::I16(constraints.clamp(v as f64) as i16),
            DebugValue::I32(v) => DebugValue::I32(constraints.clamp(v as f64) as i32),
            DebugValue::U8(v) => DebugValue::U8(constraints.clamp(v as f64) as u8),
            DebugValue::U16(v) => DebugValue::U16(constraints.clamp(v as f64) as u16),
            DebugValue::U32(v) => DebugValue::U32(constraints.clamp(v as f64) as u32),
            DebugValue::F32(v) => DebugValue::F32(f(v)),
            DebugValue::F64(v) => DebugValue::F64(constraints.clamp(v)),
            DebugValue::Vec2 { x, y } => DebugValue::Vec2 { x: f(x), y: f(y) },
            DebugValue::Vec3 { x, y, z } => DebugValue::Vec3 {
                x: f(x),
                y: f(y),
                z: f(z),
            },
            DebugValue::Vec4 { x, y, z, w } => DebugValue::Vec4 {
                x: f(x),
                y: f(y),
                z: f(z),
                w: f(w),
            },
        }
    }
}

/// Range constraints for numeric values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub min: f64,
    pub max: f64,
}

impl Constraints {
    /// Create new constraints with min and max values
    ///
    /// Inverted bounds are swapped.
    pub fn new(min: f64, max: f64) -> Self {
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Clamp a value to these constraints
    ///
    /// Never panics: a NaN bound is ignored, and inverted bounds set
    /// directly on the fields resolve to `max`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// A Rust scalar that can be exposed as a debug property
///
/// Ties a concrete type to its [`ValueType`] tag and converts it to and from
/// the type-erased [`DebugValue`].
pub trait DebugScalar: Copy + Send + Sync + 'static {
    const VALUE_TYPE: ValueType;

    fn to_value(self) -> DebugValue;

    /// Returns `None` if `value` carries a different type tag
    fn from_value(value: DebugValue) -> Option<Self>;
}

macro_rules! impl_debug_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl DebugScalar for $ty {
                const VALUE_TYPE: ValueType = ValueType::$variant;

                fn to_value(self) -> DebugValue {
                    DebugValue::$variant(self)
                }

                fn from_value(value: DebugValue) -> Option<Self> {
                    match value {
                        DebugValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_debug_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    f32 => F32,
    f64 => F64,
}

impl DebugScalar for Vec2 {
    const VALUE_TYPE: ValueType = ValueType::Vec2;

    fn to_value(self) -> DebugValue {
        DebugValue::Vec2 {
            x: self.x,
            y: self.y,
        }
    }

    fn from_value(value: DebugValue) -> Option<Self> {
        match value {
            DebugValue::Vec2 { x, y } => Some(Vec2::new(x, y)),
            _ => None,
        }
    }
}

impl DebugScalar for Vec3 {
    const VALUE_TYPE: ValueType = ValueType::Vec3;

    fn to_value(self) -> DebugValue {
        DebugValue::Vec3 {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    fn from_value(value: DebugValue) -> Option<Self> {
        match value {
            DebugValue::Vec3 { x, y, z } => Some(Vec3::new(x, y, z)),
            _ => None,
        }
    }
}

impl DebugScalar for Vec4 {
    const VALUE_TYPE: ValueType = ValueType::Vec4;

    fn to_value(self) -> DebugValue {
        DebugValue::Vec4 {
            x: self.x,
            y: self.y,
            z: self.z,
            w: self.w,
        }
    }

    fn from_value(value: DebugValue) -> Option<Self> {
        match value {
            DebugValue::Vec4 { x, y, z, w } => Some(Vec4::new(x, y, z, w)),
            _ => None,
        }
    }
}
