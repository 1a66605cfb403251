/// Vertex data formats and shader-side element types

/// Scalar kind a vertex format delivers to (or a shader input expects from) the
/// input assembler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Floating point (includes normalized and half formats)
    Float,
    /// Signed integer
    SInt,
    /// Unsigned integer
    UInt,
}

/// Source data format of a vertex attribute
///
/// Defines the data type and component count of one attribute element as it
/// is stored in the vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum VertexFormat {
    // Float formats
    R32_SFLOAT,         // float (4 bytes)
    R32G32_SFLOAT,      // vec2 (8 bytes)
    R32G32B32_SFLOAT,   // vec3 (12 bytes)
    R32G32B32A32_SFLOAT, // vec4 (16 bytes)

    // Half float formats
    R16G16_SFLOAT,
    R16G16B16A16_SFLOAT,

    // Integer formats (signed)
    R32_SINT,
    R32G32_SINT,
    R32G32B32_SINT,
    R32G32B32A32_SINT,

    // Integer formats (unsigned)
    R32_UINT,
    R32G32_UINT,
    R32G32B32_UINT,
    R32G32B32A32_UINT,

    // Short formats
    R16G16_SINT,
    R16G16B16A16_SINT,
    R16G16_UINT,
    R16G16B16A16_UINT,

    // Normalized short formats
    R16G16_UNORM,
    R16G16B16A16_UNORM,
    R16G16_SNORM,
    R16G16B16A16_SNORM,

    // Byte formats
    R8G8B8A8_SINT,
    R8G8B8A8_UINT,

    // Normalized byte formats (colors, packed normals)
    R8G8B8A8_UNORM,
    R8G8B8A8_SNORM,
}

impl VertexFormat {
    /// Returns size in bytes for this format
    pub fn size_bytes(&self) -> u32 {
        match self {
            VertexFormat::R32_SFLOAT | VertexFormat::R32_SINT | VertexFormat::R32_UINT => 4,
            VertexFormat::R32G32_SFLOAT | VertexFormat::R32G32_SINT | VertexFormat::R32G32_UINT => 8,
            VertexFormat::R32G32B32_SFLOAT | VertexFormat::R32G32B32_SINT | VertexFormat::R32G32B32_UINT => 12,
            VertexFormat::R32G32B32A32_SFLOAT | VertexFormat::R32G32B32A32_SINT | VertexFormat::R32G32B32A32_UINT => 16,

            VertexFormat::R16G16_SFLOAT
            | VertexFormat::R16G16_SINT
            | VertexFormat::R16G16_UINT
            | VertexFormat::R16G16_UNORM
            | VertexFormat::R16G16_SNORM => 4,
            VertexFormat::R16G16B16A16_SFLOAT
            | VertexFormat::R16G16B16A16_SINT
            | VertexFormat::R16G16B16A16_UINT
            | VertexFormat::R16G16B16A16_UNORM
            | VertexFormat::R16G16B16A16_SNORM => 8,

            VertexFormat::R8G8B8A8_SINT
            | VertexFormat::R8G8B8A8_UINT
            | VertexFormat::R8G8B8A8_UNORM
            | VertexFormat::R8G8B8A8_SNORM => 4,
        }
    }

    /// Number of components (1 to 4)
    pub fn component_count(&self) -> u32 {
        match self {
            VertexFormat::R32_SFLOAT | VertexFormat::R32_SINT | VertexFormat::R32_UINT => 1,
            VertexFormat::R32G32_SFLOAT
            | VertexFormat::R32G32_SINT
            | VertexFormat::R32G32_UINT
            | VertexFormat::R16G16_SFLOAT
            | VertexFormat::R16G16_SINT
            | VertexFormat::R16G16_UINT
            | VertexFormat::R16G16_UNORM
            | VertexFormat::R16G16_SNORM => 2,
            VertexFormat::R32G32B32_SFLOAT | VertexFormat::R32G32B32_SINT | VertexFormat::R32G32B32_UINT => 3,
            _ => 4,
        }
    }

    /// Scalar kind delivered to the shader
    ///
    /// Normalized and half formats are converted to float by the input assembler.
    pub fn component_kind(&self) -> ComponentKind {
        match self {
            VertexFormat::R32_SINT
            | VertexFormat::R32G32_SINT
            | VertexFormat::R32G32B32_SINT
            | VertexFormat::R32G32B32A32_SINT
            | VertexFormat::R16G16_SINT
            | VertexFormat::R16G16B16A16_SINT
            | VertexFormat::R8G8B8A8_SINT => ComponentKind::SInt,

            VertexFormat::R32_UINT
            | VertexFormat::R32G32_UINT
            | VertexFormat::R32G32B32_UINT
            | VertexFormat::R32G32B32A32_UINT
            | VertexFormat::R16G16_UINT
            | VertexFormat::R16G16B16A16_UINT
            | VertexFormat::R8G8B8A8_UINT => ComponentKind::UInt,

            _ => ComponentKind::Float,
        }
    }
}

/// Element type a compiled vertex shader declares for one input attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderElementType {
    Float,
    Float2,
    Float3,
    Float4,
    Int,
    Int2,
    Int3,
    Int4,
    UInt,
    UInt2,
    UInt3,
    UInt4,
}

impl ShaderElementType {
    /// Number of components (1 to 4)
    pub fn component_count(&self) -> u32 {
        match self {
            ShaderElementType::Float | ShaderElementType::Int | ShaderElementType::UInt => 1,
            ShaderElementType::Float2 | ShaderElementType::Int2 | ShaderElementType::UInt2 => 2,
            ShaderElementType::Float3 | ShaderElementType::Int3 | ShaderElementType::UInt3 => 3,
            ShaderElementType::Float4 | ShaderElementType::Int4 | ShaderElementType::UInt4 => 4,
        }
    }

    /// Scalar kind the shader reads
    pub fn component_kind(&self) -> ComponentKind {
        match self {
            ShaderElementType::Float
            | ShaderElementType::Float2
            | ShaderElementType::Float3
            | ShaderElementType::Float4 => ComponentKind::Float,
            ShaderElementType::Int
            | ShaderElementType::Int2
            | ShaderElementType::Int3
            | ShaderElementType::Int4 => ComponentKind::SInt,
            ShaderElementType::UInt
            | ShaderElementType::UInt2
            | ShaderElementType::UInt3
            | ShaderElementType::UInt4 => ComponentKind::UInt,
        }
    }

    /// Whether a vertex of `format` can feed this shader input
    ///
    /// Only the scalar kind has to match; missing components are filled with
    /// defaults and extra components are ignored by the input assembler.
    pub fn accepts(&self, format: VertexFormat) -> bool {
        self.component_kind() == format.component_kind()
    }
}

#[cfg(test)]
#[path = "vertex_format_tests.rs"]
mod tests;
