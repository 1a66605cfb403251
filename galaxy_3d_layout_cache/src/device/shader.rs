/// Compiled program identity and the vertex input reflection of a program

use crate::device::{ShaderElementType, MAX_VERTEX_ATTRIBS};
use crate::error::Result;

/// Opaque identifier of a compiled program owned by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(u64);

impl ProgramId {
    /// Wrap a backend-specific program identifier
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Backend-specific program identifier
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// One vertex input declared by a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderAttribute {
    /// Attribute location (semantic index of the `TEXCOORD` input)
    pub semantic_index: u32,
    /// Element type the shader reads
    pub element_type: ShaderElementType,
}

/// Vertex inputs of a program, in shader declaration order
///
/// Produced by `LayoutDevice::reflect_shader_layout`. The declaration order
/// is the canonical element order of every layout key built against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderAttributeLayout {
    program: ProgramId,
    attributes: Vec<ShaderAttribute>,
}

impl ShaderAttributeLayout {
    /// Create a reflection result, validating the attribute list
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLayout` if there are more than
    /// `MAX_VERTEX_ATTRIBS` attributes, a semantic index is out of range, or
    /// two attributes share a semantic index.
    pub fn new(program: ProgramId, attributes: Vec<ShaderAttribute>) -> Result<Self> {
        if attributes.len() > MAX_VERTEX_ATTRIBS {
            crate::layout_bail!(InvalidLayout, "galaxy3d::ShaderAttributeLayout",
                "Program {} declares {} attributes (max {})",
                program.raw(), attributes.len(), MAX_VERTEX_ATTRIBS);
        }

        let mut seen: u32 = 0;
        for attribute in &attributes {
            if attribute.semantic_index as usize >= MAX_VERTEX_ATTRIBS {
                crate::layout_bail!(InvalidLayout, "galaxy3d::ShaderAttributeLayout",
                    "Program {} declares attribute location {} (max {})",
                    program.raw(), attribute.semantic_index, MAX_VERTEX_ATTRIBS - 1);
            }
            let bit = 1u32 << attribute.semantic_index;
            if seen & bit != 0 {
                crate::layout_bail!(InvalidLayout, "galaxy3d::ShaderAttributeLayout",
                    "Program {} declares attribute location {} twice",
                    program.raw(), attribute.semantic_index);
            }
            seen |= bit;
        }

        Ok(Self { program, attributes })
    }

    /// Program this reflection belongs to
    pub fn program(&self) -> ProgramId {
        self.program
    }

    /// Declared attributes, in declaration order
    pub fn attributes(&self) -> &[ShaderAttribute] {
        &self.attributes
    }

    /// Number of declared attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the program reads no vertex attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Declared attribute for a semantic index
    pub fn attribute(&self, semantic_index: u32) -> Option<&ShaderAttribute> {
        self.attributes.iter().find(|a| a.semantic_index == semantic_index)
    }
}
