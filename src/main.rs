use perspective_fix::config::{fix::FixToolConfig, load_config};
use perspective_fix::image::io::{load_raster, save_raster, write_json_file};
use perspective_fix::image::RasterImage;
use perspective_fix::progress::{ConsoleProgress, NoProgress, ProgressSink};
use perspective_fix::PerspectiveFixer;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = env_logger::try_init();
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: FixToolConfig = load_config(Path::new(&config_path))?;

    let src = load_raster(&config.input).map_err(|e| e.to_string())?;
    let fixer = PerspectiveFixer::new(config.params.clone());

    let mut console = ConsoleProgress::stdout();
    let mut quiet = NoProgress;
    let progress: &mut dyn ProgressSink = if config.verbose {
        &mut console
    } else {
        &mut quiet
    };
    let result = fixer.process(&src, progress);
    if config.verbose {
        println!();
    }
    let fixed = result.map_err(|e| e.to_string())?;

    let report = &fixed.report;
    println!(
        "horizontal vp: ({:.1}, {:.1})  vertical vp: ({:.1}, {:.1})  scale: {:.4}  ({:.1} ms)",
        report.horizontal_vp.row,
        report.horizontal_vp.col,
        report.vertical_vp.row,
        report.vertical_vp.col,
        report.rectification.scale,
        report.timings.total_ms
    );

    let output = if config.show_original {
        RasterImage::side_by_side(&src, &fixed.image)
            .ok_or("Original and corrected images have different layouts")?
    } else {
        fixed.image
    };
    save_raster(&output, &config.output.image).map_err(|e| e.to_string())?;
    println!("Image written to {}", config.output.image.display());

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &fixed.report).map_err(|e| e.to_string())?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: perspective_fix <config.json>".to_string()
}
