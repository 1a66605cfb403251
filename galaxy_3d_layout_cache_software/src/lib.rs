/*!
# Galaxy 3D Layout Cache - Software Backend

CPU implementation of the `LayoutDevice` trait.

The software device keeps a registry of programs (with their vertex input
signatures) and validates every input layout the way a driver would before
handing out a handle. It supports simulated device loss and reset, and an
optional cap on live layouts to exercise out-of-memory paths.
*/

mod software_device;
mod software_layout;
mod software_program;

pub use software_device::{SoftwareDevice, SoftwareDeviceConfig, SoftwareDeviceStats};
pub use software_layout::{SoftwareLayout, MAX_INPUT_SLOTS, MAX_VERTEX_STRIDE};
pub use software_program::ProgramDesc;

pub mod galaxy3d {
    pub use crate::software_device::{SoftwareDevice, SoftwareDeviceConfig, SoftwareDeviceStats};
    pub use crate::software_layout::{SoftwareLayout, MAX_INPUT_SLOTS, MAX_VERTEX_STRIDE};
    pub use crate::software_program::ProgramDesc;
}
