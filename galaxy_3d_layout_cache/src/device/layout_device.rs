/// LayoutDevice trait - the device capabilities the layout cache consumes

use crate::device::{ElementDesc, ProgramId, ShaderAttributeLayout};
use crate::error::Result;

/// Identity of a device instance at a given reset generation
///
/// A device reset (after device loss) bumps `generation`: handles created
/// under an older generation are never valid against the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId {
    pub instance: u32,
    pub generation: u32,
}

/// Native input layout object created by a device
///
/// Deliberately neither `Clone` nor `Copy`: the only way to give a handle up
/// is `LayoutDevice::release_layout`, which consumes it. The layout cache
/// owns every handle it stores and lends `&LayoutHandle` to callers for the
/// duration of one draw.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "layout handles must be released through LayoutDevice::release_layout"]
pub struct LayoutHandle {
    raw: u64,
}

impl LayoutHandle {
    /// Wrap a backend-specific layout object identifier
    pub fn from_raw(raw: u64) -> Self {
        Self { raw }
    }

    /// Backend-specific layout object identifier
    pub fn raw(&self) -> u64 {
        self.raw
    }
}

/// Device-side input layout capabilities
///
/// Implemented by backends (e.g. the software device). The cache shares the
/// device as `Arc<Mutex<dyn LayoutDevice>>` with the rest of the renderer.
pub trait LayoutDevice: Send {
    /// Identity of the device, including its reset generation
    fn device_id(&self) -> DeviceId;

    /// Report the vertex inputs a compiled program declares
    ///
    /// # Arguments
    ///
    /// * `program` - Compiled program to reflect
    fn reflect_shader_layout(&self, program: ProgramId) -> Result<ShaderAttributeLayout>;

    /// Compile an input layout object (expensive, may fail)
    ///
    /// # Arguments
    ///
    /// * `elements` - Normalized element descriptors, in shader declaration order
    /// * `program` - Program whose input signature the layout is validated against
    fn create_layout(&mut self, elements: &[ElementDesc], program: ProgramId) -> Result<LayoutHandle>;

    /// Free a layout object
    ///
    /// Called exactly once per handle by the cache.
    fn release_layout(&mut self, layout: LayoutHandle);

    /// Make a layout object current for subsequent draws
    fn bind_layout(&mut self, layout: &LayoutHandle) -> Result<()>;
}
