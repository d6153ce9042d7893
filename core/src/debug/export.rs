//! Debug value export utilities
//!
//! Snapshots the current property values and formats them as Rust source
//! code (for copying tuned values back into code) or JSON (for tools).

use serde::Serialize;

use super::registry::DebugRegistry;
use super::types::DebugValue;

/// Current value of one live property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySnapshot {
    pub name: String,
    pub value: DebugValue,
}

/// Read all live properties in registration order
///
/// Properties whose producer has gone away are skipped.
pub fn snapshot(registry: &DebugRegistry) -> Vec<PropertySnapshot> {
    registry
        .property_names()
        .filter_map(|name| {
            registry.read_value(name).map(|value| PropertySnapshot {
                name: name.to_string(),
                value,
            })
        })
        .collect()
}

/// Export all live properties as flat Rust constants
///
/// Output format:
/// ```rust
/// // Exported from Debug Registry
/// const PLAYER_SPEED: f32 = 3.5;
/// const PLAYER_HEALTH: i32 = 100;
/// ```
pub fn export_as_rust_flat(registry: &DebugRegistry) -> String {
    let mut output = String::from("// Exported from Debug Registry\n\n");

    for entry in snapshot(registry) {
        output.push_str(&format_rust_const(&entry.name, &entry.value));
        output.push('\n');
    }

    output
}

/// Export all live properties as pretty-printed JSON
pub fn export_as_json(registry: &DebugRegistry) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&snapshot(registry))
}

/// Turn a property name into a valid SCREAMING_CASE identifier
fn const_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Format a single value as a Rust const declaration
fn format_rust_const(name: &str, value: &DebugValue) -> String {
    let const_name = const_ident(name);
    let ty = value.value_type().type_name();

    match value {
        DebugValue::Bool(v) => format!("const {const_name}: {ty} = {v};"),
        DebugValue::I8(v) => format!("const {const_name}: {ty} = {v};"),
        DebugValue::I16(v) => format!("const {const_name}: {ty} = {v};"),
        DebugValue::I32(v) => format!("const {const_name}: {ty} = {v};"),
        DebugValue::U8(v) => format!("const {const_name}: {ty} = {v};"),
        DebugValue::U16(v) => format!("const {const_name}: {ty} = {v};"),
        DebugValue::U32(v) => format!("const {const_name}: {ty} = {v};"),
        // {:?} keeps floats round-trip safe and always prints a decimal point
        DebugValue::F32(v) => format!("const {const_name}: {ty} = {v:?};"),
        DebugValue::F64(v) => format!("const {const_name}: {ty} = {v:?};"),
        DebugValue::Vec2 { x, y } => {
            format!("const {const_name}: {ty} = Vec2::new({x:?}, {y:?});")
        }
        DebugValue::Vec3 { x, y, z } => {
            format!("const {const_name}: {ty} = Vec3::new({x:?}, {y:?}, {z:?});")
        }
        DebugValue::Vec4 { x, y, z, w } => {
            format!("const {const_name}: {ty} = Vec4::new({x:?}, {y:?}, {z:?}, {w:?});")
        }
    }
}
