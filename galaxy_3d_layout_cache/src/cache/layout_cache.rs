/// Bounded LRU cache of device input layout objects.
///
/// Maps a [`LayoutKey`] to the layout object the device compiled for it, so
/// that a mesh drawn every frame pays for `create_layout` once. Every lookup
/// advances a recency counter and stamps the entry it touches; when the map
/// is full, the entry with the oldest stamp is evicted and released.
///
/// Victim selection is a linear scan over the entries. Evictions are rare
/// next to hits at the default capacity, so an intrusive recency list would
/// buy nothing measurable; it could replace the scan without any observable
/// change.
///
/// The cache owns every handle it stores. Each one is released exactly once,
/// either on eviction or on `clear()` (which `Drop` calls).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;

use crate::cache::LayoutKey;
use crate::device::{AttributeBinding, DeviceId, LayoutDevice, LayoutHandle, ShaderAttributeLayout};
use crate::error::{Error, Result};

/// Default number of cached layouts
pub const DEFAULT_CAPACITY: usize = 1024;

/// Layout cache configuration
#[derive(Debug, Clone)]
pub struct LayoutCacheConfig {
    /// Maximum number of resident layouts (0 disables caching)
    pub capacity: usize,
    /// Name used in log messages
    pub label: String,
}

impl Default for LayoutCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            label: "input_layouts".to_string(),
        }
    }
}

/// Cumulative layout cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutCacheStats {
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that called create_layout
    pub misses: u64,
    /// Entries evicted to make room
    pub evictions: u64,
    /// Handles given back to the device (evictions, teardown, transient)
    pub releases: u64,
    /// create_layout calls that failed
    pub create_failures: u64,
}

struct CacheEntry {
    handle: LayoutHandle,
    last_used: u64,
}

struct BoundDevice {
    device: Arc<Mutex<dyn LayoutDevice>>,
    id: DeviceId,
}

/// Where the handle for the current lookup lives
enum Resident {
    Entry(LayoutKey),
    Transient,
}

pub struct LayoutCache {
    device: Option<BoundDevice>,
    entries: FxHashMap<LayoutKey, CacheEntry>,
    /// Handle kept alive for one draw when capacity is 0
    transient: Option<LayoutHandle>,
    /// Raw handle last passed to bind_layout
    bound: Option<u64>,
    capacity: usize,
    counter: u64,
    stats: LayoutCacheStats,
    label: String,
}

/// Lock the device, recovering from poisoning so handles are never leaked
fn lock_device<'a>(
    device: &'a Mutex<dyn LayoutDevice + 'static>,
) -> MutexGuard<'a, dyn LayoutDevice + 'static> {
    device.lock().unwrap_or_else(PoisonError::into_inner)
}

impl LayoutCache {
    /// Create an empty, uninitialized cache
    pub fn new(config: LayoutCacheConfig) -> Self {
        Self {
            device: None,
            entries: FxHashMap::default(),
            transient: None,
            bound: None,
            capacity: config.capacity,
            counter: 0,
            stats: LayoutCacheStats::default(),
            label: config.label,
        }
    }

    /// Bind the cache to a device
    ///
    /// If the cache holds layouts created by a different device (or by an
    /// earlier generation of the same device), they are released against
    /// that old device first. Re-initializing with the same device identity
    /// keeps the cached layouts.
    pub fn initialize(&mut self, device: Arc<Mutex<dyn LayoutDevice>>) {
        let id = lock_device(&device).device_id();

        if let Some(current) = &self.device {
            if current.id != id {
                crate::layout_info!("galaxy3d::LayoutCache",
                    "[{}] Device changed ({:?} -> {:?}), releasing {} layouts",
                    self.label, current.id, id, self.entries.len());
                self.clear();
            }
        }

        self.device = Some(BoundDevice { device, id });
        self.bound = None;

        crate::layout_debug!("galaxy3d::LayoutCache",
            "[{}] Initialized on device {:?} (capacity {})", self.label, id, self.capacity);
    }

    /// Return the layout object for the active bindings of a draw
    ///
    /// Creates (and caches) the layout on first use of a key; later calls
    /// with an equivalent layout return the cached object. The returned
    /// handle is borrowed for the duration of one draw.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidLayout` if the bindings cannot form a key
    /// - `Error::InitializationFailed` if `initialize()` was never called
    /// - any error from `LayoutDevice::create_layout`, unchanged (nothing is
    ///   inserted in that case)
    ///
    /// # Panics
    ///
    /// Panics if the device identity changed since `initialize()` (device
    /// reset without re-initializing the cache): the cached handles belong
    /// to the old device and must never be bound to the new one.
    pub fn apply_layout(
        &mut self,
        bindings: &[AttributeBinding],
        shader_layout: &ShaderAttributeLayout,
    ) -> Result<&LayoutHandle> {
        let resident = self.lookup_or_create(bindings, shader_layout)?;
        self.resident_handle(&resident)
    }

    /// Apply the layout and make it current on the device
    ///
    /// `LayoutDevice::bind_layout` is only called when the layout differs
    /// from the one this cache bound last. Returns whether a bind was issued.
    pub fn bind_layout(
        &mut self,
        bindings: &[AttributeBinding],
        shader_layout: &ShaderAttributeLayout,
    ) -> Result<bool> {
        let resident = self.lookup_or_create(bindings, shader_layout)?;
        let raw = self.resident_handle(&resident)?.raw();
        if self.bound == Some(raw) {
            return Ok(false);
        }

        let device = self.device_arc()?;
        lock_device(&device).bind_layout(self.resident_handle(&resident)?)?;
        self.bound = Some(raw);
        Ok(true)
    }

    /// Forget which layout is bound, so the next `bind_layout` always binds
    ///
    /// Call after anything outside the cache changed the device's current
    /// input layout (state reset, blit, clear).
    pub fn mark_dirty(&mut self) {
        self.bound = None;
    }

    /// Release every cached layout and reset the recency counter
    ///
    /// Calling `clear()` on an empty cache is a no-op.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() || self.transient.is_some() {
            match self.device.as_ref().map(|bound| Arc::clone(&bound.device)) {
                Some(device) => {
                    let mut guard = lock_device(&device);
                    let released = self.entries.len();
                    for (_, entry) in self.entries.drain() {
                        guard.release_layout(entry.handle);
                        self.stats.releases += 1;
                    }
                    if let Some(handle) = self.transient.take() {
                        guard.release_layout(handle);
                        self.stats.releases += 1;
                    }
                    crate::layout_debug!("galaxy3d::LayoutCache",
                        "[{}] Cleared {} layouts", self.label, released);
                }
                None => {
                    // Entries only exist after initialize()
                    crate::layout_error!("galaxy3d::LayoutCache",
                        "[{}] {} layouts held without a device", self.label, self.entries.len());
                }
            }
        }

        self.counter = 0;
        self.bound = None;
    }

    // ===== ACCESSORS =====

    /// Number of resident layouts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no layout is resident
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of resident layouts
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current value of the recency counter
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Whether a layout for `key` is resident
    pub fn contains(&self, key: &LayoutKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Recency stamp of a resident layout
    pub fn last_used(&self, key: &LayoutKey) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.last_used)
    }

    /// Whether `initialize()` has been called
    pub fn is_initialized(&self) -> bool {
        self.device.is_some()
    }

    /// Identity of the device recorded by `initialize()`
    pub fn device_id(&self) -> Option<DeviceId> {
        self.device.as_ref().map(|bound| bound.id)
    }

    /// Cumulative statistics
    pub fn stats(&self) -> LayoutCacheStats {
        self.stats
    }

    /// Reset statistics to zero
    pub fn reset_stats(&mut self) {
        self.stats = LayoutCacheStats::default();
    }

    // ===== INTERNALS =====

    fn device_arc(&self) -> Result<Arc<Mutex<dyn LayoutDevice>>> {
        match &self.device {
            Some(bound) => Ok(Arc::clone(&bound.device)),
            None => Err(crate::layout_err!(InitializationFailed, "galaxy3d::LayoutCache",
                "[{}] Layout cache used before initialize()", self.label)),
        }
    }

    fn lookup_or_create(
        &mut self,
        bindings: &[AttributeBinding],
        shader_layout: &ShaderAttributeLayout,
    ) -> Result<Resident> {
        let key = LayoutKey::build(bindings, shader_layout)?;
        let device = self.device_arc()?;
        let mut guard = lock_device(&device);

        let current_id = guard.device_id();
        if let Some(bound) = &self.device {
            if bound.id != current_id {
                crate::layout_error!("galaxy3d::LayoutCache",
                    "[{}] Device changed from {:?} to {:?} without initialize()",
                    self.label, bound.id, current_id);
                panic!("layout cache used with a device it was not initialized for");
            }
        }

        // Last draw's transient layout is no longer in use
        if let Some(handle) = self.transient.take() {
            if self.bound == Some(handle.raw()) {
                self.bound = None;
            }
            guard.release_layout(handle);
            self.stats.releases += 1;
        }

        self.counter += 1;
        let stamp = self.counter;

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_used = stamp;
            self.stats.hits += 1;
            crate::layout_trace!("galaxy3d::LayoutCache",
                "[{}] Hit ({} elements, stamp {})", self.label, key.len(), stamp);
            return Ok(Resident::Entry(key));
        }

        self.stats.misses += 1;
        let handle = match guard.create_layout(key.elements(), shader_layout.program()) {
            Ok(handle) => handle,
            Err(error) => {
                self.stats.create_failures += 1;
                crate::layout_warn!("galaxy3d::LayoutCache",
                    "[{}] create_layout failed for {} elements: {}", self.label, key.len(), error);
                return Err(error);
            }
        };

        crate::layout_debug!("galaxy3d::LayoutCache",
            "[{}] Created layout {} ({} elements)", self.label, handle.raw(), key.len());

        if self.capacity == 0 {
            self.transient = Some(handle);
            return Ok(Resident::Transient);
        }

        if self.entries.len() >= self.capacity {
            self.evict_lru(&mut *guard);
        }
        self.entries.insert(key, CacheEntry { handle, last_used: stamp });

        Ok(Resident::Entry(key))
    }

    /// Remove and release the least recently used entry
    fn evict_lru(&mut self, device: &mut dyn LayoutDevice) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| *key);

        let Some(key) = victim else {
            return;
        };
        if let Some(entry) = self.entries.remove(&key) {
            crate::layout_debug!("galaxy3d::LayoutCache",
                "[{}] Evicting layout {} (last used {}, counter {})",
                self.label, entry.handle.raw(), entry.last_used, self.counter);
            if self.bound == Some(entry.handle.raw()) {
                self.bound = None;
            }
            device.release_layout(entry.handle);
            self.stats.evictions += 1;
            self.stats.releases += 1;
        }
    }

    fn resident_handle(&self, resident: &Resident) -> Result<&LayoutHandle> {
        let handle = match resident {
            Resident::Entry(key) => self.entries.get(key).map(|entry| &entry.handle),
            Resident::Transient => self.transient.as_ref(),
        };
        handle.ok_or_else(|| Error::InvalidResource(format!(
            "[{}] layout vanished between lookup and use", self.label)))
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(LayoutCacheConfig::default())
    }
}

impl Drop for LayoutCache {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
#[path = "layout_cache_tests.rs"]
mod tests;
