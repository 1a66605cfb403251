/// Device module - vertex formats, attribute descriptions and the device trait

// Module declarations
pub mod vertex_format;
pub mod attribute;
pub mod shader;
pub mod layout_device;

// Re-export everything
pub use vertex_format::*;
pub use attribute::*;
pub use shader::*;
pub use layout_device::*;

// Mock layout device for tests (no backend required)
#[cfg(test)]
pub mod mock_layout_device;
