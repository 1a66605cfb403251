//! Unit tests for LayoutKey
//!
//! Tests key construction, normalization, determinism and hashing.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::cache::LayoutKey;
use crate::device::{
    AttributeBinding, InputSlotClass, ProgramId, ShaderAttribute, ShaderAttributeLayout,
    ShaderElementType, VertexFormat, MAX_VERTEX_ATTRIBS, SEMANTIC_NAME,
};
use crate::error::Error;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Shader declaring position (0), normal (1), uv (2) in that order
fn create_mesh_shader() -> ShaderAttributeLayout {
    ShaderAttributeLayout::new(
        ProgramId::from_raw(7),
        vec![
            ShaderAttribute { semantic_index: 0, element_type: ShaderElementType::Float3 },
            ShaderAttribute { semantic_index: 1, element_type: ShaderElementType::Float3 },
            ShaderAttribute { semantic_index: 2, element_type: ShaderElementType::Float2 },
        ],
    )
    .unwrap()
}

fn position() -> AttributeBinding {
    AttributeBinding::per_vertex(0, VertexFormat::R32G32B32_SFLOAT, 0, 0)
}

fn normal() -> AttributeBinding {
    AttributeBinding::per_vertex(1, VertexFormat::R32G32B32_SFLOAT, 0, 12)
}

fn uv() -> AttributeBinding {
    AttributeBinding::per_vertex(2, VertexFormat::R32G32_SFLOAT, 1, 0)
}

fn fx_hash(key: &LayoutKey) -> u64 {
    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// CONSTRUCTION TESTS
// ============================================================================

#[test]
fn test_build_orders_elements_by_shader_declaration() {
    let key = LayoutKey::build(&[uv(), position(), normal()], &create_mesh_shader()).unwrap();

    assert_eq!(key.len(), 3);
    let semantics: Vec<u32> = key.elements().iter().map(|e| e.semantic_index).collect();
    assert_eq!(semantics, vec![0, 1, 2]);
    assert_eq!(
        key.element_types(),
        &[ShaderElementType::Float3, ShaderElementType::Float3, ShaderElementType::Float2]
    );
}

#[test]
fn test_build_normalizes_element_descriptors() {
    let key = LayoutKey::build(&[normal()], &create_mesh_shader()).unwrap();
    let element = key.elements()[0];

    assert_eq!(element.semantic_name, SEMANTIC_NAME);
    assert_eq!(element.semantic_index, 1);
    assert_eq!(element.format, VertexFormat::R32G32B32_SFLOAT);
    assert_eq!(element.input_slot, 0);
    assert_eq!(element.byte_offset, 12);
    assert_eq!(element.slot_class, InputSlotClass::PerVertexData);
    assert_eq!(element.step_rate, 0);
}

#[test]
fn test_build_instance_divisor() {
    let instanced = AttributeBinding::per_instance(2, VertexFormat::R32G32_SFLOAT, 1, 0, 3);
    let key = LayoutKey::build(&[position(), instanced], &create_mesh_shader()).unwrap();

    let element = key.elements()[1];
    assert_eq!(element.slot_class, InputSlotClass::PerInstanceData);
    assert_eq!(element.step_rate, 3);
}

#[test]
fn test_build_zero_divisor_is_per_vertex() {
    let zero_divisor = AttributeBinding::per_instance(2, VertexFormat::R32G32_SFLOAT, 1, 0, 0);
    let a = LayoutKey::build(&[zero_divisor], &create_mesh_shader()).unwrap();
    let b = LayoutKey::build(&[uv()], &create_mesh_shader()).unwrap();

    assert_eq!(a.elements()[0].slot_class, InputSlotClass::PerVertexData);
    assert_eq!(a, b);
}

#[test]
fn test_build_skips_disabled_bindings() {
    let key = LayoutKey::build(&[position(), normal().disabled(), uv()], &create_mesh_shader()).unwrap();

    assert_eq!(key.len(), 2);
    assert_eq!(key.elements()[0].semantic_index, 0);
    assert_eq!(key.elements()[1].semantic_index, 2);
}

#[test]
fn test_build_skips_attributes_the_shader_does_not_read() {
    let extra = AttributeBinding::per_vertex(9, VertexFormat::R8G8B8A8_UNORM, 2, 0);
    let with_extra = LayoutKey::build(&[position(), extra], &create_mesh_shader()).unwrap();
    let without = LayoutKey::build(&[position()], &create_mesh_shader()).unwrap();

    assert_eq!(with_extra, without);
}

#[test]
fn test_build_empty_bindings() {
    let key = LayoutKey::build(&[], &create_mesh_shader()).unwrap();
    assert!(key.is_empty());
    assert_eq!(key, LayoutKey::empty());
    assert_eq!(key, LayoutKey::default());
}

#[test]
fn test_build_rejects_too_many_bindings() {
    let bindings: Vec<AttributeBinding> = (0..=MAX_VERTEX_ATTRIBS as u32)
        .map(|i| AttributeBinding::per_vertex(i % 16, VertexFormat::R32_SFLOAT, 0, i * 4).disabled())
        .collect();

    let result = LayoutKey::build(&bindings, &create_mesh_shader());
    assert!(matches!(result, Err(Error::InvalidLayout(_))));
}

#[test]
fn test_build_rejects_duplicate_semantic() {
    let duplicate = AttributeBinding::per_vertex(0, VertexFormat::R32G32B32A32_SFLOAT, 3, 0);
    let result = LayoutKey::build(&[position(), duplicate], &create_mesh_shader());
    assert!(matches!(result, Err(Error::InvalidLayout(_))));
}

#[test]
fn test_build_allows_duplicate_semantic_when_one_is_disabled() {
    let duplicate = AttributeBinding::per_vertex(0, VertexFormat::R32G32B32A32_SFLOAT, 3, 0).disabled();
    let key = LayoutKey::build(&[position(), duplicate], &create_mesh_shader()).unwrap();
    assert_eq!(key.elements()[0].format, VertexFormat::R32G32B32_SFLOAT);
}

#[test]
fn test_build_rejects_out_of_range_semantic() {
    let out_of_range = AttributeBinding::per_vertex(16, VertexFormat::R32_SFLOAT, 0, 0);
    let result = LayoutKey::build(&[out_of_range], &create_mesh_shader());
    assert!(matches!(result, Err(Error::InvalidLayout(_))));
}

// ============================================================================
// DETERMINISM TESTS
// ============================================================================

#[test]
fn test_build_is_deterministic() {
    let shader = create_mesh_shader();
    let bindings = [position(), normal(), uv()];

    let a = LayoutKey::build(&bindings, &shader).unwrap();
    let b = LayoutKey::build(&bindings, &shader).unwrap();
    assert_eq!(a, b);
    assert_eq!(fx_hash(&a), fx_hash(&b));
}

#[test]
fn test_build_ignores_binding_order_and_disabled_interleaving() {
    let shader = create_mesh_shader();
    let reference = LayoutKey::build(&[position(), normal(), uv()], &shader).unwrap();

    let orderings: [Vec<AttributeBinding>; 4] = [
        vec![uv(), normal(), position()],
        vec![normal(), uv(), position()],
        vec![position().disabled(), uv(), normal(), position()],
        vec![uv(), normal().disabled(), normal(), position()],
    ];

    for bindings in orderings.iter() {
        let key = LayoutKey::build(bindings, &shader).unwrap();
        assert_eq!(key, reference);
        assert_eq!(fx_hash(&key), fx_hash(&reference));
    }
}

// ============================================================================
// EQUALITY TESTS
// ============================================================================

#[test]
fn test_keys_differ_by_offset() {
    let shader = create_mesh_shader();
    let moved = AttributeBinding::per_vertex(1, VertexFormat::R32G32B32_SFLOAT, 0, 16);

    let a = LayoutKey::build(&[position(), normal()], &shader).unwrap();
    let b = LayoutKey::build(&[position(), moved], &shader).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_keys_differ_by_shader_element_type() {
    let float_shader = create_mesh_shader();
    let wide_shader = ShaderAttributeLayout::new(
        ProgramId::from_raw(8),
        vec![ShaderAttribute { semantic_index: 0, element_type: ShaderElementType::Float4 }],
    )
    .unwrap();

    let a = LayoutKey::build(&[position()], &float_shader).unwrap();
    let b = LayoutKey::build(&[position()], &wide_shader).unwrap();
    assert_eq!(a.elements(), b.elements());
    assert_ne!(a, b);
}

#[test]
fn test_keys_equal_across_programs_with_same_signature() {
    let other_program = ShaderAttributeLayout::new(
        ProgramId::from_raw(99),
        create_mesh_shader().attributes().to_vec(),
    )
    .unwrap();

    let a = LayoutKey::build(&[position(), uv()], &create_mesh_shader()).unwrap();
    let b = LayoutKey::build(&[position(), uv()], &other_program).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_element_order_matters() {
    let forward = create_mesh_shader();
    let mut reversed_attributes = forward.attributes().to_vec();
    reversed_attributes.reverse();
    let reversed = ShaderAttributeLayout::new(ProgramId::from_raw(7), reversed_attributes).unwrap();

    let a = LayoutKey::build(&[position(), normal(), uv()], &forward).unwrap();
    let b = LayoutKey::build(&[position(), normal(), uv()], &reversed).unwrap();
    assert_ne!(a, b);
}
