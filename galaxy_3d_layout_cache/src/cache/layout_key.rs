/// Canonical, hashable description of one input layout.
///
/// A key is a fixed-capacity array of normalized element descriptors, a
/// parallel array of the element types the shader reads, and an explicit
/// `count`. Only the first `count` slots take part in equality and hashing,
/// so keys are compared and hashed without allocating.
///
/// Elements are ordered by the shader's attribute declaration order, never by
/// the order of the caller's bindings: two draws that bind the same attributes
/// through differently ordered slots produce the same key.

use std::hash::{Hash, Hasher};

use crate::device::{
    AttributeBinding, ElementDesc, ShaderAttributeLayout, ShaderElementType, MAX_VERTEX_ATTRIBS,
};
use crate::error::Result;

#[derive(Debug, Clone, Copy)]
pub struct LayoutKey {
    elements: [ElementDesc; MAX_VERTEX_ATTRIBS],
    element_types: [ShaderElementType; MAX_VERTEX_ATTRIBS],
    count: usize,
}

impl LayoutKey {
    /// Key with no elements (a draw that reads no vertex attributes)
    pub fn empty() -> Self {
        Self {
            elements: [ElementDesc::UNUSED; MAX_VERTEX_ATTRIBS],
            element_types: [ShaderElementType::Float; MAX_VERTEX_ATTRIBS],
            count: 0,
        }
    }

    /// Build the key for the active bindings of a draw
    ///
    /// Walks the shader's declared attributes in declaration order and appends
    /// the enabled binding feeding each of them. Disabled bindings, and enabled
    /// bindings the shader does not read, are left out.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLayout` if more than `MAX_VERTEX_ATTRIBS` bindings
    /// are supplied, a semantic index is out of range, or two enabled bindings
    /// feed the same semantic index.
    pub fn build(bindings: &[AttributeBinding], shader_layout: &ShaderAttributeLayout) -> Result<Self> {
        if bindings.len() > MAX_VERTEX_ATTRIBS {
            crate::layout_bail!(InvalidLayout, "galaxy3d::LayoutKey",
                "{} attribute bindings supplied (max {})", bindings.len(), MAX_VERTEX_ATTRIBS);
        }

        // Binding index per semantic index, enabled bindings only
        let mut by_semantic: [Option<usize>; MAX_VERTEX_ATTRIBS] = [None; MAX_VERTEX_ATTRIBS];
        for (index, binding) in bindings.iter().enumerate() {
            if !binding.enabled {
                continue;
            }
            let semantic = binding.semantic_index as usize;
            if semantic >= MAX_VERTEX_ATTRIBS {
                crate::layout_bail!(InvalidLayout, "galaxy3d::LayoutKey",
                    "Attribute location {} out of range (max {})",
                    binding.semantic_index, MAX_VERTEX_ATTRIBS - 1);
            }
            if by_semantic[semantic].is_some() {
                crate::layout_bail!(InvalidLayout, "galaxy3d::LayoutKey",
                    "Attribute location {} is bound twice", binding.semantic_index);
            }
            by_semantic[semantic] = Some(index);
        }

        let mut key = Self::empty();
        for attribute in shader_layout.attributes() {
            // ShaderAttributeLayout guarantees semantic_index < MAX_VERTEX_ATTRIBS
            if let Some(index) = by_semantic[attribute.semantic_index as usize] {
                key.push(ElementDesc::from_binding(&bindings[index]), attribute.element_type);
            }
        }

        Ok(key)
    }

    fn push(&mut self, element: ElementDesc, element_type: ShaderElementType) {
        debug_assert!(self.count < MAX_VERTEX_ATTRIBS);
        self.elements[self.count] = element;
        self.element_types[self.count] = element_type;
        self.count += 1;
    }

    /// Normalized element descriptors, in shader declaration order
    pub fn elements(&self) -> &[ElementDesc] {
        &self.elements[..self.count]
    }

    /// Shader element type of each element
    pub fn element_types(&self) -> &[ShaderElementType] {
        &self.element_types[..self.count]
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the key has no elements
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for LayoutKey {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for LayoutKey {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count
            && self.elements() == other.elements()
            && self.element_types() == other.element_types()
    }
}

impl Eq for LayoutKey {}

impl Hash for LayoutKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.count.hash(state);
        self.elements().hash(state);
        self.element_types().hash(state);
    }
}

#[cfg(test)]
#[path = "layout_key_tests.rs"]
mod tests;
