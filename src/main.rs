use std::time::Instant;

use anyhow::Context;
use log::{debug, info};

use whitted::config::RenderConfig;
use whitted::{load_scene, Renderer};

fn main() -> anyhow::Result<()> {
    let config = RenderConfig::from_args();

    env_logger::Builder::new()
        .filter_level(config.log_filter)
        .parse_default_env()
        .init();

    let scene_file = load_scene(&config.scene_path)
        .with_context(|| format!("cannot load scene {}", config.scene_path.display()))?;
    let scene = &scene_file.scene;

    info!(
        "loaded {}: {}x{}, {} lights, {} pigments, {} textures, {} spheres",
        config.scene_path.display(),
        scene.width,
        scene.height,
        scene.lights.len(),
        scene.pigments.len(),
        scene.textures.len(),
        scene.spheres.len()
    );
    debug!("camera: {:?}", scene.camera);

    let output = config.output_path(&scene_file.output);

    let renderer = Renderer::new(scene, config.max_depth);

    let render_timer = Instant::now();
    let frame = if config.parallel {
        info!("rendering with depth {} on {} threads", config.max_depth, rayon::current_num_threads());
        renderer.render_parallel()
    } else {
        info!("rendering with depth {}", config.max_depth);
        renderer.render()
    };

    let stats = renderer.stats();
    info!(
        "rendered in {:.2?}: {} primary, {} shadow, {} reflection rays",
        render_timer.elapsed(),
        stats.primary_rays,
        stats.shadow_rays,
        stats.reflection_rays
    );

    frame
        .save(&output)
        .with_context(|| format!("cannot write image {}", output.display()))?;
    info!("wrote {}", output.display());

    Ok(())
}
