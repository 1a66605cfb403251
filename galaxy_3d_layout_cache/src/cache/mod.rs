/// Cache module - layout keys and the bounded layout cache

pub mod layout_key;
pub mod layout_cache;

pub use layout_key::*;
pub use layout_cache::*;
