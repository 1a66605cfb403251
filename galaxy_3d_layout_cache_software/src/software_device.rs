/// SoftwareDevice - CPU reference implementation of LayoutDevice
///
/// Keeps programs and compiled layouts in slot maps; handles are the slot
/// keys in FFI form, so a handle from a removed (or pre-reset) layout never
/// aliases a newer one.

use std::sync::atomic::{AtomicU32, Ordering};

use slotmap::{Key, KeyData, SlotMap};

use galaxy_3d_layout_cache::galaxy3d::device::{
    DeviceId, ElementDesc, LayoutHandle, ProgramId, ShaderAttributeLayout,
};
use galaxy_3d_layout_cache::galaxy3d::{Error, LayoutDevice, Result};

use crate::software_layout::SoftwareLayout;
use crate::software_program::{ProgramDesc, SoftwareProgram};

slotmap::new_key_type! {
    struct ProgramSlot;
    struct LayoutSlot;
}

static NEXT_INSTANCE: AtomicU32 = AtomicU32::new(1);

/// Software device configuration
#[derive(Debug, Clone)]
pub struct SoftwareDeviceConfig {
    /// Limit on simultaneously live layouts (None = unlimited)
    pub max_live_layouts: Option<usize>,
    /// Name used in log messages
    pub label: String,
}

impl Default for SoftwareDeviceConfig {
    fn default() -> Self {
        Self {
            max_live_layouts: None,
            label: "software".to_string(),
        }
    }
}

/// Software device statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftwareDeviceStats {
    /// Layouts successfully created
    pub layouts_created: u64,
    /// Layouts released through release_layout
    pub layouts_released: u64,
    /// Layouts dropped by a device reset
    pub layouts_dropped: u64,
    /// bind_layout calls that succeeded
    pub binds: u64,
    /// create_layout calls that failed
    pub create_failures: u64,
}

pub struct SoftwareDevice {
    instance: u32,
    generation: u32,
    lost: bool,
    programs: SlotMap<ProgramSlot, SoftwareProgram>,
    layouts: SlotMap<LayoutSlot, SoftwareLayout>,
    bound: Option<LayoutSlot>,
    stats: SoftwareDeviceStats,
    config: SoftwareDeviceConfig,
}

fn program_slot(id: ProgramId) -> ProgramSlot {
    ProgramSlot::from(KeyData::from_ffi(id.raw()))
}

fn layout_slot(handle: &LayoutHandle) -> LayoutSlot {
    LayoutSlot::from(KeyData::from_ffi(handle.raw()))
}

impl SoftwareDevice {
    /// Create a device with a fresh instance id
    pub fn new(config: SoftwareDeviceConfig) -> Self {
        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        galaxy_3d_layout_cache::layout_debug!("galaxy3d::SoftwareDevice",
            "[{}] Created device instance {}", config.label, instance);

        Self {
            instance,
            generation: 0,
            lost: false,
            programs: SlotMap::with_key(),
            layouts: SlotMap::with_key(),
            bound: None,
            stats: SoftwareDeviceStats::default(),
            config,
        }
    }

    // ===== PROGRAMS =====

    /// Register a compiled program and its input signature
    pub fn create_program(&mut self, desc: ProgramDesc) -> Result<ProgramId> {
        // The signature carries the program id, which is the slot key
        let slot = self.programs.try_insert_with_key(|slot| {
            SoftwareProgram::from_desc(ProgramId::from_raw(slot.data().as_ffi()), desc)
        })?;

        let program = &self.programs[slot];
        galaxy_3d_layout_cache::layout_debug!("galaxy3d::SoftwareDevice",
            "[{}] Registered program '{}' ({} inputs)",
            self.config.label, program.name, program.signature.len());

        Ok(ProgramId::from_raw(slot.data().as_ffi()))
    }

    /// Unregister a program
    ///
    /// Layouts already created against it stay valid.
    pub fn destroy_program(&mut self, id: ProgramId) -> Result<()> {
        match self.programs.remove(program_slot(id)) {
            Some(_) => Ok(()),
            None => Err(galaxy_3d_layout_cache::layout_err!(InvalidResource, "galaxy3d::SoftwareDevice",
                "[{}] Unknown program {}", self.config.label, id.raw())),
        }
    }

    // ===== DEVICE LOSS =====

    /// Simulate device loss: layout creation and binding fail until reset()
    pub fn lose_device(&mut self) {
        galaxy_3d_layout_cache::layout_warn!("galaxy3d::SoftwareDevice",
            "[{}] Device lost (generation {})", self.config.label, self.generation);
        self.lost = true;
    }

    /// Recover from device loss
    ///
    /// Drops every layout of the current generation and bumps the generation,
    /// which changes `device_id()`. Programs survive the reset.
    pub fn reset(&mut self) {
        let dropped = self.layouts.len() as u64;
        self.layouts.clear();
        self.bound = None;
        self.stats.layouts_dropped += dropped;
        self.generation += 1;
        self.lost = false;

        galaxy_3d_layout_cache::layout_info!("galaxy3d::SoftwareDevice",
            "[{}] Reset to generation {} ({} layouts dropped)",
            self.config.label, self.generation, dropped);
    }

    /// Whether the device is currently lost
    pub fn is_lost(&self) -> bool {
        self.lost
    }

    // ===== INTROSPECTION =====

    /// Number of layouts created and not yet released
    pub fn live_layout_count(&self) -> usize {
        self.layouts.len()
    }

    /// Compiled layout behind a handle
    pub fn layout(&self, handle: &LayoutHandle) -> Option<&SoftwareLayout> {
        self.layouts.get(layout_slot(handle))
    }

    /// Raw handle of the currently bound layout
    pub fn bound_layout(&self) -> Option<u64> {
        self.bound.map(|slot| slot.data().as_ffi())
    }

    /// Cumulative statistics
    pub fn stats(&self) -> SoftwareDeviceStats {
        self.stats
    }

    fn try_create(&mut self, elements: &[ElementDesc], program_id: ProgramId) -> Result<LayoutHandle> {
        if self.lost {
            return Err(Error::DeviceLost);
        }

        if let Some(max) = self.config.max_live_layouts {
            if self.layouts.len() >= max {
                galaxy_3d_layout_cache::layout_warn!("galaxy3d::SoftwareDevice",
                    "[{}] Layout limit reached ({})", self.config.label, max);
                return Err(Error::OutOfMemory);
            }
        }

        let Some(program) = self.programs.get(program_slot(program_id)) else {
            galaxy_3d_layout_cache::layout_bail!(InvalidResource, "galaxy3d::SoftwareDevice",
                "[{}] Unknown program {}", self.config.label, program_id.raw());
        };

        let layout = SoftwareLayout::compile(elements, program_id, program, self.generation)?;
        let slot = self.layouts.insert(layout);
        Ok(LayoutHandle::from_raw(slot.data().as_ffi()))
    }
}

impl LayoutDevice for SoftwareDevice {
    fn device_id(&self) -> DeviceId {
        DeviceId {
            instance: self.instance,
            generation: self.generation,
        }
    }

    fn reflect_shader_layout(&self, program: ProgramId) -> Result<ShaderAttributeLayout> {
        match self.programs.get(program_slot(program)) {
            Some(entry) => Ok(entry.signature.clone()),
            None => Err(galaxy_3d_layout_cache::layout_err!(InvalidResource, "galaxy3d::SoftwareDevice",
                "[{}] Unknown program {}", self.config.label, program.raw())),
        }
    }

    fn create_layout(&mut self, elements: &[ElementDesc], program: ProgramId) -> Result<LayoutHandle> {
        match self.try_create(elements, program) {
            Ok(handle) => {
                self.stats.layouts_created += 1;
                Ok(handle)
            }
            Err(error) => {
                self.stats.create_failures += 1;
                Err(error)
            }
        }
    }

    fn release_layout(&mut self, layout: LayoutHandle) {
        let slot = layout_slot(&layout);
        if self.layouts.remove(slot).is_some() {
            if self.bound == Some(slot) {
                self.bound = None;
            }
            self.stats.layouts_released += 1;
        } else {
            // Layouts of an older generation were already dropped by reset()
            galaxy_3d_layout_cache::layout_debug!("galaxy3d::SoftwareDevice",
                "[{}] Ignoring release of stale layout {}", self.config.label, layout.raw());
        }
    }

    fn bind_layout(&mut self, layout: &LayoutHandle) -> Result<()> {
        if self.lost {
            return Err(Error::DeviceLost);
        }
        let slot = layout_slot(layout);
        if !self.layouts.contains_key(slot) {
            galaxy_3d_layout_cache::layout_bail!(InvalidResource, "galaxy3d::SoftwareDevice",
                "[{}] Bind of unknown layout {}", self.config.label, layout.raw());
        }
        self.bound = Some(slot);
        self.stats.binds += 1;
        Ok(())
    }
}

impl Default for SoftwareDevice {
    fn default() -> Self {
        Self::new(SoftwareDeviceConfig::default())
    }
}
