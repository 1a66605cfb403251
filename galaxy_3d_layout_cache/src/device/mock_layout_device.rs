/// Mock LayoutDevice for unit tests (no backend required)
///
/// Records every create/release/bind call so tests can check call counts
/// and the release-exactly-once discipline of the cache.

use rustc_hash::FxHashMap;

use crate::device::{
    DeviceId, ElementDesc, LayoutDevice, LayoutHandle, ProgramId, ShaderAttribute,
    ShaderAttributeLayout,
};
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct MockLayoutDevice {
    pub instance: u32,
    pub generation: u32,
    /// Element lists passed to every successful create_layout call
    pub created: Vec<Vec<ElementDesc>>,
    /// Raw handles in creation order
    pub created_handles: Vec<u64>,
    /// Release count per raw handle
    pub releases: FxHashMap<u64, u32>,
    /// Raw handles passed to bind_layout, in call order
    pub binds: Vec<u64>,
    /// Error returned by the next create_layout call
    pub fail_next_create: Option<Error>,
    programs: FxHashMap<u64, Vec<ShaderAttribute>>,
    next_raw: u64,
}

impl MockLayoutDevice {
    pub fn new(instance: u32) -> Self {
        Self {
            instance,
            generation: 0,
            created: Vec::new(),
            created_handles: Vec::new(),
            releases: FxHashMap::default(),
            binds: Vec::new(),
            fail_next_create: None,
            programs: FxHashMap::default(),
            next_raw: 1,
        }
    }

    pub fn register_program(&mut self, raw: u64, attributes: Vec<ShaderAttribute>) -> ProgramId {
        self.programs.insert(raw, attributes);
        ProgramId::from_raw(raw)
    }

    pub fn create_count(&self) -> usize {
        self.created.len()
    }

    pub fn release_count(&self) -> usize {
        self.releases.values().map(|&n| n as usize).sum()
    }

    /// Handles created but not yet released
    pub fn live_count(&self) -> usize {
        self.created_handles
            .iter()
            .filter(|raw| !self.releases.contains_key(raw))
            .count()
    }

    pub fn released_times(&self, raw: u64) -> u32 {
        self.releases.get(&raw).copied().unwrap_or(0)
    }

    /// Simulate a device reset: the device id changes
    pub fn reset(&mut self) {
        self.generation += 1;
    }
}

impl LayoutDevice for MockLayoutDevice {
    fn device_id(&self) -> DeviceId {
        DeviceId {
            instance: self.instance,
            generation: self.generation,
        }
    }

    fn reflect_shader_layout(&self, program: ProgramId) -> Result<ShaderAttributeLayout> {
        let attributes = self
            .programs
            .get(&program.raw())
            .ok_or_else(|| Error::InvalidResource(format!("unknown program {}", program.raw())))?;
        ShaderAttributeLayout::new(program, attributes.clone())
    }

    fn create_layout(&mut self, elements: &[ElementDesc], _program: ProgramId) -> Result<LayoutHandle> {
        if let Some(error) = self.fail_next_create.take() {
            return Err(error);
        }
        let raw = self.next_raw;
        self.next_raw += 1;
        self.created.push(elements.to_vec());
        self.created_handles.push(raw);
        Ok(LayoutHandle::from_raw(raw))
    }

    fn release_layout(&mut self, layout: LayoutHandle) {
        *self.releases.entry(layout.raw()).or_insert(0) += 1;
    }

    fn bind_layout(&mut self, layout: &LayoutHandle) -> Result<()> {
        self.binds.push(layout.raw());
        Ok(())
    }
}
