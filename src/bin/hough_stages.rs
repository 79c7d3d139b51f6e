use perspective_fix::config::{load_config, stages::StagesToolConfig};
use perspective_fix::edges::edge_map_from_gray;
use perspective_fix::hough::{accumulate, collapse_clusters, extract_peaks, Family, HoughSpace};
use perspective_fix::image::io::{load_raster, save_weight_grid, write_json_file};
use perspective_fix::image::WeightGrid;
use perspective_fix::imgproc::to_grayscale;
use perspective_fix::pyramid::{Pyramid, PyramidOptions};
use perspective_fix::vanishing::{estimate_vanishing_point, MetaLine, VanishingPoint};
use perspective_fix::RectifyParams;
use serde::Serialize;
use std::env;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StagesSummary {
    working_width: usize,
    working_height: usize,
    edge_pixels: usize,
    families: Vec<FamilySummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FamilySummary {
    family: Family,
    slope_samples: usize,
    intercept_cells: usize,
    max_votes: u64,
    softness: f64,
    threshold: f64,
    peak_count: usize,
    cluster_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta_line: Option<MetaLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vanishing_point: Option<VanishingPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = env_logger::try_init();
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: StagesToolConfig = load_config(Path::new(&config_path))?;
    let params = &config.params;
    params.validate().map_err(|e| e.to_string())?;

    let src = load_raster(&config.input).map_err(|e| e.to_string())?;
    let pyramid = Pyramid::build(
        to_grayscale(&src),
        PyramidOptions::new(params.max_working_dimension),
    );
    let working = pyramid.working();
    let edges = edge_map_from_gray(working, &params.edges);
    let dir = &config.output.dir;
    save_grid(&edges, &dir.join("edges.png"))?;

    let spaces = accumulate(&edges, params.hough.max_accumulator_cells).map_err(|e| e.to_string())?;
    let mut families = Vec::with_capacity(2);
    for space in [&spaces.horizontal, &spaces.vertical] {
        families.push(dump_family(space, params, dir)?);
    }

    let summary = StagesSummary {
        working_width: edges.cols,
        working_height: edges.rows,
        edge_pixels: edges.count_nonzero(),
        families,
    };
    write_json_file(&config.output.summary_json, &summary).map_err(|e| e.to_string())?;
    println!("Stage images written to {}", dir.display());
    println!("Summary written to {}", config.output.summary_json.display());
    Ok(())
}

fn dump_family(space: &HoughSpace, params: &RectifyParams, dir: &Path) -> Result<FamilySummary, String> {
    let name = match space.family {
        Family::Horizontal => "horizontal",
        Family::Vertical => "vertical",
    };
    save_grid(&space.grid, &dir.join(format!("{name}_accumulator.png")))?;
    let mut summary = FamilySummary {
        family: space.family,
        slope_samples: space.grid.rows,
        intercept_cells: space.grid.cols,
        max_votes: space.grid.max(),
        softness: 0.0,
        threshold: 0.0,
        peak_count: 0,
        cluster_count: 0,
        meta_line: None,
        vanishing_point: None,
        error: None,
    };

    let peaks = match extract_peaks(&space.grid, &params.hough.peaks) {
        Ok(peaks) => peaks,
        Err(err) => {
            summary.error = Some(err.to_string());
            return Ok(summary);
        }
    };
    save_grid(&peaks.peaks, &dir.join(format!("{name}_peaks.png")))?;
    let clusters = collapse_clusters(&peaks.peaks);
    save_grid(&clusters.grid, &dir.join(format!("{name}_clusters.png")))?;
    summary.softness = peaks.softness;
    summary.threshold = peaks.threshold;
    summary.peak_count = peaks.peak_count();
    summary.cluster_count = clusters.points.len();

    match estimate_vanishing_point(space, &clusters.grid, &params.hough) {
        Ok((point, line)) => {
            summary.vanishing_point = Some(point);
            summary.meta_line = Some(line);
        }
        Err(err) => summary.error = Some(err.to_string()),
    }
    Ok(summary)
}

fn save_grid(grid: &WeightGrid, path: &Path) -> Result<(), String> {
    save_weight_grid(grid, path).map_err(|e| e.to_string())
}

fn usage() -> String {
    "Usage: hough_stages <config.json>".to_string()
}
