/*!
# Galaxy 3D Layout Cache

Input layout cache for the Galaxy 3D rendering engine.

Building an input layout object (the device object that binds a vertex
attribute description to a compiled shader's inputs) costs a driver round
trip. This crate memoizes those objects by a canonical key derived from the
active attribute bindings, so the same mesh drawn every frame creates its
layout once.

## Architecture

- **LayoutKey**: fixed-capacity, hashable description of one layout
- **LayoutCache**: bounded LRU map from LayoutKey to the device's layout object
- **LayoutDevice**: trait backends implement (create / release / reflect / bind)

Backend implementations (e.g. `galaxy_3d_layout_cache_software`) provide
concrete devices that implement `LayoutDevice`.
*/

// Internal modules
mod error;
pub mod log;
pub mod device;
pub mod cache;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Cache types
    pub use crate::cache::{LayoutCache, LayoutCacheConfig, LayoutCacheStats, LayoutKey, DEFAULT_CAPACITY};

    // Device trait
    pub use crate::device::LayoutDevice;

    // Logging sub-module (types and setup functions, macros are exported at the crate root)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, set_min_severity, min_severity,
        };
    }

    // Device sub-module with all attribute and shader types
    pub mod device {
        pub use crate::device::*;
    }
}
