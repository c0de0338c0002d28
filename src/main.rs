// Single-shot command-line front end for the `pixel_forge` library: load an
// image, run one pipeline pass, and write the generated documents next to
// each other. Interactive embedders should use `driver::PipelineDriver`
// instead; this binary is the batch path.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pixel_forge::core_modules::color_map;
use pixel_forge::core_modules::pattern;
use pixel_forge::core_modules::utils::image_helper;
use pixel_forge::pipeline::{ModelPipeline, PipelineConfig, PixelBuffer};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pixel_forge")]
#[command(about = "Convert pixel art into a flat, tintable 3D item model")]
struct Args {
    /// Input image path
    input: PathBuf,

    /// Directory the generated files are written into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Color grouping tolerance; 0 keeps every exact color separate
    #[arg(short, long, default_value_t = 0)]
    tolerance: i64,

    /// Model name used for the texture binding and output file name
    #[arg(short, long, default_value = "")]
    model_name: String,

    /// Selector case label bound to the generated model
    #[arg(long, default_value = "")]
    case: String,

    /// Fallback model reference for the selector
    #[arg(long, default_value = "")]
    fallback: String,

    /// Also write the white silhouette texture the model samples from
    #[arg(long)]
    pattern: bool,

    /// Also write the group-map diagnostic image
    #[arg(long)]
    color_map: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (width, height, data) = image_helper::load_rgba_capped(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let buffer = PixelBuffer::new(width, height, data)?;
    info!("loaded {} as a {width}x{height} buffer", args.input.display());

    let mut pipeline = ModelPipeline::new(PipelineConfig::default());
    pipeline.set_tolerance(args.tolerance);
    pipeline.set_model_name(args.model_name);
    pipeline.set_case_label(args.case);
    pipeline.set_fallback_model(args.fallback);
    pipeline.set_image(buffer.clone());
    pipeline.process();
    info!(
        "{} color groups at tolerance {}",
        pipeline.ranked_groups().len(),
        pipeline.tolerance()
    );

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    let model_name = pipeline.effective_model_name().to_string();
    let override_name = pipeline
        .effective_fallback_model()
        .rsplit('/')
        .next()
        .unwrap_or("override")
        .to_string();

    let model_path = args.out_dir.join(format!("{model_name}.json"));
    let model_json = serde_json::to_string_pretty(pipeline.model_document()?)?;
    fs::write(&model_path, model_json)
        .with_context(|| format!("failed to write {}", model_path.display()))?;
    info!("wrote model document {}", model_path.display());

    let override_path = args.out_dir.join(format!("{override_name}.json"));
    let override_json = serde_json::to_string_pretty(pipeline.override_document()?)?;
    fs::write(&override_path, override_json)
        .with_context(|| format!("failed to write {}", override_path.display()))?;
    info!("wrote override document {}", override_path.display());

    println!("{}", pipeline.palette_listing());

    if args.pattern {
        let silhouette = pattern::render_pattern(&buffer);
        let pattern_path = args.out_dir.join(format!("{model_name}.png"));
        image_helper::save_rgba(&pattern_path, buffer.width(), buffer.height(), &silhouette)
            .with_context(|| format!("failed to write {}", pattern_path.display()))?;
        info!("wrote pattern texture {}", pattern_path.display());
    }

    if args.color_map {
        let map = color_map::render_group_map(
            pipeline.ranked_groups(),
            buffer.width(),
            buffer.height(),
        );
        let map_path = args.out_dir.join(format!("{model_name}_groups.png"));
        image_helper::save_rgba(&map_path, buffer.width(), buffer.height(), &map)
            .with_context(|| format!("failed to write {}", map_path.display()))?;
        info!("wrote group map {}", map_path.display());
    }

    Ok(())
}
