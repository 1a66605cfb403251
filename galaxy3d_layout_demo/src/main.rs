//! Galaxy3D layout cache demo
//!
//! Simulates a renderer drawing a scene of meshes with a handful of vertex
//! programs for a number of frames, routing every draw's input layout
//! through a LayoutCache on the software device, then prints the cache and
//! device statistics.
//!
//! Run with `--help` for the flags.

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use colored::Colorize;

use galaxy_3d_layout_cache::galaxy3d::device::{
    AttributeBinding, ShaderAttribute, ShaderAttributeLayout, ShaderElementType, VertexFormat,
};
use galaxy_3d_layout_cache::galaxy3d::log::{set_min_severity, LogSeverity};
use galaxy_3d_layout_cache::galaxy3d::{
    LayoutCache, LayoutCacheConfig, LayoutDevice, Result, DEFAULT_CAPACITY,
};
use galaxy_3d_layout_cache::{layout_error, layout_info};
use galaxy_3d_layout_cache_software::galaxy3d::{ProgramDesc, SoftwareDevice, SoftwareDeviceConfig};

#[derive(Parser, Debug)]
#[command(
    name = "galaxy3d_layout_demo",
    about = "Draw a simulated scene through the input layout cache and report hit rates."
)]
struct DemoArgs {
    /// Maximum number of cached layouts (0 disables caching)
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Number of frames to simulate
    #[arg(long, value_name = "N", default_value_t = 120)]
    frames: u32,

    /// Meshes drawn per frame
    #[arg(long, value_name = "N", default_value_t = 200)]
    meshes: u32,
}

/// Vertex programs of the scene: lit, skinned and instanced foliage
fn create_programs(device: &mut SoftwareDevice) -> Result<Vec<ShaderAttributeLayout>> {
    let descs = vec![
        ProgramDesc {
            name: "lit".to_string(),
            attributes: vec![
                ShaderAttribute { semantic_index: 0, element_type: ShaderElementType::Float3 },
                ShaderAttribute { semantic_index: 1, element_type: ShaderElementType::Float3 },
                ShaderAttribute { semantic_index: 2, element_type: ShaderElementType::Float2 },
            ],
        },
        ProgramDesc {
            name: "skinned".to_string(),
            attributes: vec![
                ShaderAttribute { semantic_index: 0, element_type: ShaderElementType::Float3 },
                ShaderAttribute { semantic_index: 1, element_type: ShaderElementType::Float3 },
                ShaderAttribute { semantic_index: 3, element_type: ShaderElementType::UInt4 },
                ShaderAttribute { semantic_index: 4, element_type: ShaderElementType::Float4 },
            ],
        },
        ProgramDesc {
            name: "foliage".to_string(),
            attributes: vec![
                ShaderAttribute { semantic_index: 0, element_type: ShaderElementType::Float3 },
                ShaderAttribute { semantic_index: 2, element_type: ShaderElementType::Float2 },
                ShaderAttribute { semantic_index: 5, element_type: ShaderElementType::Float4 },
            ],
        },
    ];

    let mut layouts = Vec::with_capacity(descs.len());
    for desc in descs {
        let program = device.create_program(desc)?;
        layouts.push(device.reflect_shader_layout(program)?);
    }
    Ok(layouts)
}

/// Attribute bindings of one mesh
///
/// Meshes share vertex formats in small groups, so many draws map to the
/// same layout. Bindings carry every attribute the engine knows about; the
/// ones the program does not read are ignored by the cache.
fn mesh_bindings(mesh: u32) -> Vec<AttributeBinding> {
    // Each group uses a different interleaved stride
    let pad = (mesh % 8) * 4;
    let normal = 12 + pad;
    let uv = normal + 12;

    vec![
        AttributeBinding::per_vertex(0, VertexFormat::R32G32B32_SFLOAT, 0, 0),
        AttributeBinding::per_vertex(1, VertexFormat::R32G32B32_SFLOAT, 0, normal),
        AttributeBinding::per_vertex(2, VertexFormat::R16G16_UNORM, 0, uv),
        AttributeBinding::per_vertex(3, VertexFormat::R8G8B8A8_UINT, 1, 0),
        AttributeBinding::per_vertex(4, VertexFormat::R8G8B8A8_UNORM, 1, 4),
        AttributeBinding::per_instance(5, VertexFormat::R32G32B32A32_SFLOAT, 2, 0, 1),
    ]
}

fn run(options: &DemoArgs) -> Result<()> {
    let device = Arc::new(Mutex::new(SoftwareDevice::new(SoftwareDeviceConfig {
        max_live_layouts: None,
        label: "demo".to_string(),
    })));
    let programs = {
        let mut guard = device.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        create_programs(&mut guard)?
    };

    let mut cache = LayoutCache::new(LayoutCacheConfig {
        capacity: options.capacity,
        label: "demo_layouts".to_string(),
    });
    cache.initialize(device.clone());

    for frame in 0..options.frames {
        // Render passes that rebind state behind the cache's back
        cache.mark_dirty();

        for mesh in 0..options.meshes {
            let program = &programs[(mesh as usize) % programs.len()];
            cache.bind_layout(&mesh_bindings(mesh), program)?;
        }

        if frame % 30 == 0 {
            let stats = cache.stats();
            layout_info!("galaxy3d::Demo",
                "Frame {}: {} layouts resident, {} hits, {} misses, {} evictions",
                frame, cache.len(), stats.hits, stats.misses, stats.evictions);
        }
    }

    let stats = cache.stats();
    let device_stats = device.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).stats();
    let lookups = stats.hits + stats.misses;
    let hit_rate = if lookups > 0 { stats.hits as f64 * 100.0 / lookups as f64 } else { 0.0 };

    println!();
    println!("{}", "=== Layout cache ===".bright_cyan().bold());
    println!("  capacity         {}", cache.capacity());
    println!("  resident         {}", cache.len());
    println!("  lookups          {}", lookups);
    println!("  hit rate         {}", format!("{:.2}%", hit_rate).bright_green());
    println!("  evictions        {}", stats.evictions);
    println!("{}", "=== Software device ===".bright_cyan().bold());
    println!("  layouts created  {}", device_stats.layouts_created);
    println!("  layouts released {}", device_stats.layouts_released);
    println!("  binds            {}", device_stats.binds);

    cache.clear();
    let live = device.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).live_layout_count();
    layout_info!("galaxy3d::Demo", "Cache cleared, {} layouts still live on the device", live);

    Ok(())
}

fn main() -> ExitCode {
    set_min_severity(LogSeverity::Info);

    let options = DemoArgs::parse();

    layout_info!("galaxy3d::Demo", "Drawing {} meshes for {} frames (cache capacity {})",
        options.meshes, options.frames, options.capacity);

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            layout_error!("galaxy3d::Demo", "Demo failed: {}", error);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
