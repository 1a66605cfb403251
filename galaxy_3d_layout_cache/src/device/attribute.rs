/// Vertex attribute bindings (caller side) and input element descriptors (device side)

use crate::device::VertexFormat;

/// Maximum number of vertex attributes in one layout
pub const MAX_VERTEX_ATTRIBS: usize = 16;

/// Semantic name given to every input element
///
/// Attributes are told apart by semantic index only; the shader signature
/// declares all inputs as `TEXCOORD<n>`.
pub const SEMANTIC_NAME: &str = "TEXCOORD";

/// How often an attribute advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepRate {
    /// Data is per-vertex
    PerVertex,
    /// Data is per-instance, advancing every `divisor` instances
    ///
    /// A divisor of 0 behaves like `PerVertex`.
    PerInstance(u32),
}

/// One vertex attribute as currently bound for a draw
///
/// Supplied by the caller as an ordered slice; the order is the caller's
/// attribute slots and carries no meaning for the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeBinding {
    /// Shader attribute location this binding feeds
    pub semantic_index: u32,
    /// Format of the data in the vertex buffer
    pub format: VertexFormat,
    /// Vertex buffer slot supplying the data
    pub input_slot: u32,
    /// Offset in bytes from the start of the vertex
    pub byte_offset: u32,
    /// Per-vertex or per-instance stepping
    pub step_rate: StepRate,
    /// Disabled attributes contribute nothing to the layout
    pub enabled: bool,
}

impl AttributeBinding {
    /// Enabled per-vertex attribute
    pub fn per_vertex(semantic_index: u32, format: VertexFormat, input_slot: u32, byte_offset: u32) -> Self {
        Self {
            semantic_index,
            format,
            input_slot,
            byte_offset,
            step_rate: StepRate::PerVertex,
            enabled: true,
        }
    }

    /// Enabled per-instance attribute
    pub fn per_instance(
        semantic_index: u32,
        format: VertexFormat,
        input_slot: u32,
        byte_offset: u32,
        divisor: u32,
    ) -> Self {
        Self {
            semantic_index,
            format,
            input_slot,
            byte_offset,
            step_rate: StepRate::PerInstance(divisor),
            enabled: true,
        }
    }

    /// Same binding with the enabled flag cleared
    pub fn disabled(self) -> Self {
        Self { enabled: false, ..self }
    }
}

/// Input slot classification of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSlotClass {
    PerVertexData,
    PerInstanceData,
}

/// Normalized input element descriptor handed to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementDesc {
    pub semantic_name: &'static str,
    pub semantic_index: u32,
    pub format: VertexFormat,
    pub input_slot: u32,
    pub byte_offset: u32,
    pub slot_class: InputSlotClass,
    /// 0 for per-vertex data, instance divisor otherwise
    pub step_rate: u32,
}

impl ElementDesc {
    /// Filler for unused key slots
    pub(crate) const UNUSED: ElementDesc = ElementDesc {
        semantic_name: SEMANTIC_NAME,
        semantic_index: 0,
        format: VertexFormat::R32_SFLOAT,
        input_slot: 0,
        byte_offset: 0,
        slot_class: InputSlotClass::PerVertexData,
        step_rate: 0,
    };

    /// Normalize a caller binding into an element descriptor
    pub fn from_binding(binding: &AttributeBinding) -> Self {
        let (slot_class, step_rate) = match binding.step_rate {
            StepRate::PerInstance(divisor) if divisor > 0 => (InputSlotClass::PerInstanceData, divisor),
            _ => (InputSlotClass::PerVertexData, 0),
        };

        Self {
            semantic_name: SEMANTIC_NAME,
            semantic_index: binding.semantic_index,
            format: binding.format,
            input_slot: binding.input_slot,
            byte_offset: binding.byte_offset,
            slot_class,
            step_rate,
        }
    }
}
