/// Program registry entries of the software device

use galaxy_3d_layout_cache::galaxy3d::device::{ProgramId, ShaderAttribute, ShaderAttributeLayout};
use galaxy_3d_layout_cache::galaxy3d::Result;

/// Descriptor for registering a compiled program
#[derive(Debug, Clone)]
pub struct ProgramDesc {
    /// Debug name
    pub name: String,
    /// Vertex inputs, in shader declaration order
    pub attributes: Vec<ShaderAttribute>,
}

/// A registered program: its name and input signature
#[derive(Debug, Clone)]
pub(crate) struct SoftwareProgram {
    pub(crate) name: String,
    pub(crate) signature: ShaderAttributeLayout,
}

impl SoftwareProgram {
    /// Validate the descriptor and build the program's input signature
    pub(crate) fn from_desc(id: ProgramId, desc: ProgramDesc) -> Result<Self> {
        let signature = ShaderAttributeLayout::new(id, desc.attributes)?;
        Ok(Self {
            name: desc.name,
            signature,
        })
    }

    /// Declared input for a semantic index
    pub(crate) fn input(&self, semantic_index: u32) -> Option<&ShaderAttribute> {
        self.signature.attribute(semantic_index)
    }
}
