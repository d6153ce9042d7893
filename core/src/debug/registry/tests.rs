//! Tests for debug registry

#![cfg(test)]

use std::sync::atomic::Ordering;

use glam::Vec3;

use super::super::cell::{DebugBuffer, DebugCell};
use super::super::config::RegistryConfig;
use super::super::error::PropertyError;
use super::super::types::{Constraints, DebugValue, ValueType};
use super::{DebugRegistry, TreeNode};

fn mutable_registry() -> DebugRegistry {
    DebugRegistry::new(RegistryConfig::mutable())
}

#[test]
fn test_registry_basic() {
    let mut registry = mutable_registry();
    assert!(registry.is_empty());

    let exposure = DebugCell::new(1.0f32);
    registry.register_property("exposure", &exposure);
    assert_eq!(registry.len(), 1);
    assert!(registry.has_property("exposure"));
    assert_eq!(registry.property_address("exposure"), Some(exposure.address()));
    assert_eq!(registry.properties()[0].value_type, ValueType::F32);
}

#[test]
fn test_unregistered_name() {
    let registry = mutable_registry();
    assert!(!registry.has_property("missing"));
    assert_eq!(registry.property_address("missing"), None);
    assert_eq!(registry.read_value("missing"), None);

    let mut out = 5i32;
    assert!(!registry.get_property("missing", &mut out));
    assert_eq!(out, 5);
    assert_eq!(
        registry.try_set_property("missing", 1i32),
        Err(PropertyError::NotFound("missing".to_string()))
    );
}

#[test]
fn test_first_registration_wins() {
    let mut registry = mutable_registry();
    let first = DebugCell::new(1i32);
    let second = DebugCell::new(2i32);

    registry.register_property("x", &first);
    registry.register_property("x", &second);

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.property_address("x"), Some(first.address()));
    assert_ne!(registry.property_address("x"), Some(second.address()));
    assert_eq!(registry.property::<i32>("x"), Some(1));
}

#[test]
fn test_first_registration_wins_across_types() {
    let mut registry = mutable_registry();
    let flag = DebugCell::new(true);
    let number = DebugCell::new(3.0f32);

    registry.register_property("x", &flag);
    registry.register_property("x", &number);

    assert_eq!(registry.property_info("x").unwrap().value_type, ValueType::Bool);
}

#[test]
fn test_key_origin_does_not_matter() {
    let mut registry = mutable_registry();
    let a = DebugCell::new(0u8);
    let b = DebugCell::new(1u8);

    registry.register_property("level", &a);
    registry.register_property(String::from("level"), &b);

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.property_address("level"), Some(a.address()));
}

#[test]
fn test_gamma_scenario() {
    let mut registry = mutable_registry();
    let gamma = DebugCell::new(1.0f32);
    registry.register_property("gamma", &gamma);

    assert!(registry.set_property("gamma", 2.2f32));

    let mut out = 0.0f32;
    assert!(registry.get_property("gamma", &mut out));
    assert_eq!(out, 2.2);
    assert_eq!(gamma.get(), 2.2);
}

#[test]
fn test_set_then_get_vectors() {
    let mut registry = mutable_registry();
    let light_dir = DebugCell::new(Vec3::Y);
    registry.register_property("sun/direction", &light_dir);

    let dir = Vec3::new(0.0, -1.0, 0.5);
    assert!(registry.set_property("sun/direction", dir));
    assert_eq!(registry.property::<Vec3>("sun/direction"), Some(dir));
}

#[test]
fn test_read_only_registry_refuses_writes() {
    let mut registry = DebugRegistry::new(RegistryConfig::read_only());
    let gamma = DebugCell::new(1.0f32);
    registry.register_property("gamma", &gamma);

    assert!(!registry.set_property("gamma", 2.2f32));
    assert!(!registry.set_property("missing", 2.2f32));
    assert_eq!(
        registry.try_set_property("gamma", 2.2f32),
        Err(PropertyError::MutationDisabled)
    );
    assert_eq!(gamma.get(), 1.0);

    // Reads still work
    let mut out = 0.0f32;
    assert!(registry.get_property("gamma", &mut out));
    assert_eq!(out, 1.0);
}

#[test]
fn test_producer_updates_are_visible() {
    let mut registry = mutable_registry();
    let frame = DebugCell::new(0u32);
    registry.watch_property("frame", &frame);

    frame.set(42);
    assert_eq!(registry.read_value("frame"), Some(DebugValue::U32(42)));
}

#[test]
fn test_type_mismatch() {
    let mut registry = mutable_registry();
    let count = DebugCell::new(10i32);
    registry.register_property("count", &count);

    let mut out = 0.5f32;
    assert!(!registry.get_property("count", &mut out));
    assert_eq!(out, 0.5);

    assert_eq!(
        registry.try_set_property("count", 1.0f32),
        Err(PropertyError::TypeMismatch {
            name: "count".to_string(),
            expected: ValueType::I32,
            found: ValueType::F32,
        })
    );
    assert_eq!(count.get(), 10);
}

#[test]
fn test_watch_is_read_only() {
    let mut registry = mutable_registry();
    let fps = DebugCell::new(60.0f32);
    registry.watch_property("fps", &fps);

    assert!(registry.property_info("fps").unwrap().read_only);
    assert_eq!(
        registry.try_set_property("fps", 30.0f32),
        Err(PropertyError::ReadOnly("fps".to_string()))
    );
    assert_eq!(fps.get(), 60.0);
}

#[test]
fn test_constraints_clamp_writes() {
    let mut registry = mutable_registry();
    let volume = DebugCell::new(50u8);
    registry.register_property_with_constraints("volume", &volume, Constraints::new(0.0, 100.0));

    let info = registry.property_info("volume").unwrap();
    assert_eq!(info.constraints, Some(Constraints::new(0.0, 100.0)));

    assert!(registry.set_property("volume", 200u8));
    assert_eq!(volume.get(), 100);
}

#[test]
fn test_untyped_write() {
    let mut registry = mutable_registry();
    let enabled = DebugCell::new(false);
    registry.register_property("ssao/enabled", &enabled);

    assert!(!registry.write_value("ssao/enabled", DebugValue::U8(1)));
    assert!(registry.write_value("ssao/enabled", DebugValue::Bool(true)));
    assert!(enabled.get());
}

#[test]
fn test_stale_property() {
    let mut registry = DebugRegistry::new(RegistryConfig {
        allow_mutation: true,
        warn_on_stale: false,
    });
    let temp = DebugCell::new(1i16);
    registry.register_property("temp", &temp);
    drop(temp);

    assert!(!registry.has_property("temp"));
    assert_eq!(registry.property_address("temp"), None);
    assert!(!registry.properties()[0].is_live());
    assert_eq!(
        registry.try_set_property("temp", 2i16),
        Err(PropertyError::Stale("temp".to_string()))
    );

    // The dead entry still holds the name
    let replacement = DebugCell::new(3i16);
    registry.register_property("temp", &replacement);
    assert_eq!(registry.property::<i16>("temp"), None);
}

#[test]
fn test_clone_keeps_property_alive() {
    let mut registry = mutable_registry();
    let cell = DebugCell::new(1.0f64);
    registry.register_property("scale", &cell);

    let keep = cell.clone();
    drop(cell);
    assert!(registry.set_property("scale", 4.0f64));
    assert_eq!(keep.get(), 4.0);
}

#[test]
fn test_data_source_lookup() {
    let mut registry = mutable_registry();
    let histogram = DebugBuffer::from_vec(vec![1u32, 2, 3, 4, 5]);
    registry.register_data_source("histogram", &histogram);

    let source = registry.data_source("histogram");
    assert!(!source.is_null());
    assert_eq!(source.count(), 5);
    assert_eq!(source.address(), Some(histogram.address()));
    assert_eq!(source.element_size(), 4);
    assert_eq!(source.read_as::<u32>(), Some(vec![1, 2, 3, 4, 5]));
    assert_eq!(source.read_as::<u16>(), None);
    assert_eq!(source.to_bytes().len(), 20);

    histogram.update(|data| data[0] = 9);
    assert_eq!(registry.data_source("histogram").read_as::<u32>().unwrap()[0], 9);
}

#[test]
fn test_data_source_missing() {
    let registry = mutable_registry();
    let source = registry.data_source("missing");
    assert!(source.is_null());
    assert_eq!(source.count(), 0);
    assert_eq!(source.address(), None);
    assert!(source.to_bytes().is_empty());
    assert_eq!(source.read_as::<u8>(), None);
}

#[test]
fn test_data_source_first_wins() {
    let mut registry = mutable_registry();
    let a = DebugBuffer::<f32>::new(3);
    let b = DebugBuffer::<f32>::new(8);

    registry.register_data_source("frame_times", &a);
    registry.register_data_source("frame_times", &b);

    let source = registry.data_source("frame_times");
    assert_eq!(source.count(), 3);
    assert_eq!(source.address(), Some(a.address()));
}

#[test]
fn test_data_source_stale() {
    let mut registry = DebugRegistry::new(RegistryConfig {
        allow_mutation: true,
        warn_on_stale: false,
    });
    let buffer = DebugBuffer::<u8>::new(16);
    registry.register_data_source("scratch", &buffer);
    drop(buffer);

    let source = registry.data_source("scratch");
    assert!(source.is_null());
    assert_eq!(source.count(), 0);
    assert!(!registry.has_data_source("scratch"));
}

#[test]
fn test_namespaces_are_independent() {
    let mut registry = mutable_registry();
    let buffer = DebugBuffer::<u32>::new(5);
    registry.register_data_source("x", &buffer);
    assert_eq!(registry.property_address("x"), None);

    let cell = DebugCell::new(1i32);
    registry.register_property("x", &cell);
    assert_eq!(registry.property_address("x"), Some(cell.address()));

    let source = registry.data_source("x");
    assert_eq!(source.count(), 5);
    assert_eq!(source.address(), Some(buffer.address()));
}

#[test]
fn test_registry_groups() {
    let mut registry = mutable_registry();
    let speed = DebugCell::new(5.0f32);
    let health = DebugCell::new(100i32);
    let damage = DebugCell::new(10u8);
    let hits = DebugBuffer::<u16>::new(4);

    registry.group_begin("player");
    registry.register_property("speed", &speed);
    registry.register_property("health", &health);

    registry.group_begin("attacks");
    registry.register_property("damage", &damage);
    registry.register_data_source("hits", &hits);
    registry.group_end();

    registry.group_end();

    let names: Vec<&str> = registry.property_names().collect();
    assert_eq!(names, ["player/speed", "player/health", "player/attacks/damage"]);
    assert!(registry.has_property("player/attacks/damage"));
    assert!(!registry.has_property("damage"));
    assert_eq!(registry.data_source("player/attacks/hits").count(), 4);
}

#[test]
fn test_unbalanced_group_end_is_ignored() {
    let mut registry = mutable_registry();
    let cell = DebugCell::new(0i8);
    registry.group_end();
    registry.register_property("root", &cell);
    assert!(registry.has_property("root"));
}

#[test]
fn test_registry_finalize() {
    let mut registry = mutable_registry();
    let value = DebugCell::new(1i32);
    let ignored = DebugCell::new(2i32);
    let buffer = DebugBuffer::<u8>::new(1);

    registry.group_begin("unclosed");
    registry.register_property("value", &value);

    // Finalize should auto-close groups
    registry.finalize_registration();
    assert!(registry.is_finalized());
    assert!(registry.group_stack.is_empty());

    // Further registrations should be ignored
    registry.register_property("ignored", &ignored);
    registry.register_data_source("buffer", &buffer);
    assert_eq!(registry.len(), 1);
    assert!(registry.data_sources().is_empty());

    // Lookups and writes are unaffected
    assert!(registry.set_property("unclosed/value", 7i32));
    assert_eq!(value.get(), 7);
}

#[test]
fn test_build_tree() {
    let mut registry = mutable_registry();
    let speed = DebugCell::new(1.0f32);
    let damage = DebugCell::new(1u8);
    let global = DebugCell::new(1i32);
    let samples = DebugBuffer::<f32>::new(2);

    registry.group_begin("player");
    registry.register_property("speed", &speed);
    registry.group_begin("attacks");
    registry.register_property("damage", &damage);
    registry.group_end();
    registry.register_data_source("samples", &samples);
    registry.group_end();

    registry.register_property("global_value", &global);

    let tree = registry.build_tree();
    assert_eq!(tree.len(), 2); // player group + global_value

    match &tree[0] {
        TreeNode::Group { name, children } => {
            assert_eq!(name, "player");
            assert_eq!(children.len(), 3); // speed + attacks group + samples
            assert_eq!(children[0], TreeNode::Property(0));
            assert_eq!(children[2], TreeNode::DataSource(0));
        }
        _ => panic!("Expected group"),
    }
    assert_eq!(tree[1], TreeNode::Property(2));
}

#[test]
fn test_writes_with_inverted_constraints() {
    let mut registry = mutable_registry();
    let swapped = DebugCell::new(5.0f32);
    let inverted = DebugCell::new(5.0f32);
    registry.register_property_with_constraints("swapped", &swapped, Constraints::new(10.0, 0.0));
    registry.register_property_with_constraints(
        "inverted",
        &inverted,
        Constraints { min: 10.0, max: 0.0 },
    );

    assert!(registry.set_property("swapped", 3.0f32));
    assert_eq!(swapped.get(), 3.0);
    assert!(registry.set_property("swapped", 30.0f32));
    assert_eq!(swapped.get(), 10.0);

    assert!(registry.set_property("inverted", 3.0f32));
    assert_eq!(inverted.get(), 0.0);
}

#[test]
fn test_writes_with_nan_constraints() {
    let mut registry = mutable_registry();
    let level = DebugCell::new(0i32);
    let bias = DebugCell::new(0.0f64);
    registry.register_property_with_constraints("level", &level, Constraints::new(f64::NAN, 10.0));
    registry.register_property_with_constraints("bias", &bias, Constraints::new(-1.0, f64::NAN));

    assert!(registry.set_property("level", 30i32));
    assert_eq!(level.get(), 10);
    assert!(registry.set_property("level", -4i32));
    assert_eq!(level.get(), -4);

    assert!(registry.set_property("bias", -3.0f64));
    assert_eq!(bias.get(), -1.0);
    assert!(registry.set_property("bias", 2.5f64));
    assert_eq!(bias.get(), 2.5);
}

#[test]
fn test_data_source_with_count() {
    let mut registry = mutable_registry();
    let samples = DebugBuffer::from_vec(vec![1u16, 2, 3, 4, 5, 6]);
    registry.register_data_source_with_count("valid", &samples, 2);
    registry.register_data_source_with_count("capped", &samples, 100);

    let valid = registry.data_source("valid");
    assert_eq!(valid.count(), 2);
    assert_eq!(valid.to_bytes().len(), 4);
    assert_eq!(valid.read_as::<u16>(), Some(vec![1, 2]));

    assert_eq!(registry.data_source("capped").count(), 6);
}

#[test]
fn test_stale_lookup_reported_once_per_entry() {
    let mut registry = mutable_registry();
    let cell = DebugCell::new(1u32);
    let buffer = DebugBuffer::<u8>::new(4);
    registry.register_property("gone", &cell);
    registry.register_data_source("gone", &buffer);
    drop(cell);
    drop(buffer);

    let property = &registry.properties()[0];
    let source = &registry.data_sources()[0];
    assert!(!property.stale_reported.load(Ordering::Relaxed));

    for _ in 0..3 {
        assert!(!registry.has_property("gone"));
        assert_eq!(registry.read_value("gone"), None);
        assert!(registry.data_source("gone").is_null());
    }
    assert!(property.stale_reported.load(Ordering::Relaxed));
    assert!(source.stale_reported.load(Ordering::Relaxed));
}

#[test]
fn test_stale_flag_untouched_without_warnings() {
    let mut registry = DebugRegistry::new(RegistryConfig {
        allow_mutation: true,
        warn_on_stale: false,
    });
    let cell = DebugCell::new(1u32);
    registry.register_property("gone", &cell);
    drop(cell);

    assert!(!registry.has_property("gone"));
    assert!(!registry.properties()[0].stale_reported.load(Ordering::Relaxed));
}
