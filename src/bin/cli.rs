use anyhow::{bail, Context, Result};
use depthgate::{alignment_score, ColorFrame, DepthFrame, DepthGateConfig, QualityValidator};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    depthgate::init_logging();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: depthgate-cli <command> [args]");
        eprintln!("Commands:");
        eprintln!("  assess <depth.png> [--color <color.png>] [--config <cfg.toml>] [--json]");
        eprintln!("  write-config <cfg.toml>");
        std::process::exit(1);
    }

    let command = &args[1];
    match command.as_str() {
        "assess" => cmd_assess(&args),
        "write-config" => cmd_write_config(&args),
        _ => {
            eprintln!("Unknown command: {}", command);
            std::process::exit(1);
        }
    }
}

fn cmd_assess(args: &[String]) -> Result<()> {
    let mut depth_path = None;
    let mut color_path = None;
    let mut config_path = None;
    let mut json = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--color" => {
                i += 1;
                color_path = Some(args[i].clone());
            }
            "--config" => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--json" => json = true,
            _ => {
                if depth_path.is_none() {
                    depth_path = Some(args[i].clone());
                }
            }
        }
        i += 1;
    }

    let depth_path = depth_path.context("depth image path required")?;
    let depth = load_depth_png(&depth_path)?;

    let config = match config_path {
        Some(path) => DepthGateConfig::load_from_file(path)?,
        None => DepthGateConfig::default(),
    };
    let validator = QualityValidator::new(config)?;
    let report = validator.validate(&depth);

    let alignment = match color_path {
        Some(path) => {
            let color = load_color_png(&path)?;
            Some(alignment_score(&depth, &color, 1000.0))
        }
        None => None,
    };

    if json {
        let mut value = serde_json::to_value(&report)?;
        if let (Some(obj), Some(score)) = (value.as_object_mut(), alignment) {
            obj.insert("alignment".to_string(), serde_json::json!(score));
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Frame:      {} ({}x{})", depth_path, depth.width, depth.height);
        println!("Accepted:   {}", report.accepted);
        println!("Score:      {:.3}", report.score);
        println!("  coverage:     {:.3}", report.breakdown.coverage);
        println!("  smoothness:   {:.3}", report.breakdown.smoothness);
        println!("  edge quality: {:.3}", report.breakdown.edge_quality);
        println!("  noise level:  {:.3}", report.breakdown.noise_level);
        if let Some(score) = alignment {
            println!("Alignment:  {:.1}", score);
        }
    }

    Ok(())
}

fn cmd_write_config(args: &[String]) -> Result<()> {
    if args.len() < 3 {
        bail!("Usage: depthgate-cli write-config <cfg.toml>");
    }
    let path = &args[2];
    DepthGateConfig::default().save_to_file(path)?;
    println!("Wrote default configuration to {}", path);
    Ok(())
}

/// Load a 16-bit grayscale PNG as a depth frame (millimeter convention)
fn load_depth_png(path: &str) -> Result<DepthFrame> {
    let image = image::open(path).with_context(|| format!("Failed to open {}", path))?;
    let luma = image.to_luma16();
    let (width, height) = luma.dimensions();
    let sensor_id = sensor_id_from_path(path);
    Ok(DepthFrame::from_u16(luma.as_raw(), width, height, sensor_id))
}

/// Load an RGB8 PNG as a color frame
fn load_color_png(path: &str) -> Result<ColorFrame> {
    let image = image::open(path).with_context(|| format!("Failed to open {}", path))?;
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let sensor_id = sensor_id_from_path(path);
    Ok(ColorFrame::new(rgb.into_raw(), width, height, sensor_id))
}

fn sensor_id_from_path(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string())
}
