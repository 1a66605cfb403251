/// Compiled input layout of the software device
///
/// Compilation performs the checks a driver runs on an input element list
/// against a vertex shader's input signature.

use galaxy_3d_layout_cache::galaxy3d::device::{ElementDesc, InputSlotClass, ProgramId, MAX_VERTEX_ATTRIBS};
use galaxy_3d_layout_cache::galaxy3d::Result;

use crate::software_program::SoftwareProgram;

/// Number of vertex buffer slots
pub const MAX_INPUT_SLOTS: usize = 16;

/// Largest vertex a single slot can describe, in bytes
pub const MAX_VERTEX_STRIDE: u32 = 2048;

/// A compiled input layout object
#[derive(Debug, Clone)]
pub struct SoftwareLayout {
    elements: Vec<ElementDesc>,
    program: ProgramId,
    generation: u32,
    slot_extents: [u32; MAX_INPUT_SLOTS],
}

impl SoftwareLayout {
    /// Validate `elements` against the program signature and build the layout
    pub(crate) fn compile(
        elements: &[ElementDesc],
        program_id: ProgramId,
        program: &SoftwareProgram,
        generation: u32,
    ) -> Result<Self> {
        if elements.len() > MAX_VERTEX_ATTRIBS {
            galaxy_3d_layout_cache::layout_bail!(InvalidLayout, "galaxy3d::SoftwareLayout",
                "{} elements (max {})", elements.len(), MAX_VERTEX_ATTRIBS);
        }

        let mut seen: u32 = 0;
        let mut slot_extents = [0u32; MAX_INPUT_SLOTS];

        for element in elements {
            let Some(input) = program.input(element.semantic_index) else {
                galaxy_3d_layout_cache::layout_bail!(InvalidLayout, "galaxy3d::SoftwareLayout",
                    "{}{} is not in the input signature of program '{}'",
                    element.semantic_name, element.semantic_index, program.name);
            };

            // program.input() only finds indices < MAX_VERTEX_ATTRIBS
            let bit = 1u32 << element.semantic_index;
            if seen & bit != 0 {
                galaxy_3d_layout_cache::layout_bail!(InvalidLayout, "galaxy3d::SoftwareLayout",
                    "{}{} appears twice", element.semantic_name, element.semantic_index);
            }
            seen |= bit;

            if !input.element_type.accepts(element.format) {
                galaxy_3d_layout_cache::layout_bail!(InvalidLayout, "galaxy3d::SoftwareLayout",
                    "{}{}: format {:?} cannot feed shader input {:?}",
                    element.semantic_name, element.semantic_index, element.format, input.element_type);
            }

            match (element.slot_class, element.step_rate) {
                (InputSlotClass::PerVertexData, 0) => {}
                (InputSlotClass::PerInstanceData, rate) if rate > 0 => {}
                (slot_class, rate) => {
                    galaxy_3d_layout_cache::layout_bail!(InvalidLayout, "galaxy3d::SoftwareLayout",
                        "{}{}: step rate {} is invalid for {:?}",
                        element.semantic_name, element.semantic_index, rate, slot_class);
                }
            }

            let slot = element.input_slot as usize;
            if slot >= MAX_INPUT_SLOTS {
                galaxy_3d_layout_cache::layout_bail!(InvalidLayout, "galaxy3d::SoftwareLayout",
                    "{}{}: input slot {} (max {})",
                    element.semantic_name, element.semantic_index, slot, MAX_INPUT_SLOTS - 1);
            }

            let end = element.byte_offset.saturating_add(element.format.size_bytes());
            if end > MAX_VERTEX_STRIDE {
                galaxy_3d_layout_cache::layout_bail!(InvalidLayout, "galaxy3d::SoftwareLayout",
                    "{}{}: ends at byte {} (max {})",
                    element.semantic_name, element.semantic_index, end, MAX_VERTEX_STRIDE);
            }
            slot_extents[slot] = slot_extents[slot].max(end);
        }

        Ok(Self {
            elements: elements.to_vec(),
            program: program_id,
            generation,
            slot_extents,
        })
    }

    /// Element descriptors the layout was compiled from
    pub fn elements(&self) -> &[ElementDesc] {
        &self.elements
    }

    /// Program the layout was validated against
    pub fn program(&self) -> ProgramId {
        self.program
    }

    /// Device generation that created the layout
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Minimum vertex stride for `slot` (0 if the slot is unused)
    pub fn slot_extent(&self, slot: u32) -> u32 {
        self.slot_extents.get(slot as usize).copied().unwrap_or(0)
    }
}
