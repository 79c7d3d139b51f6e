mod common;

use common::synthetic_image::{
    converging_edge_map, horizontal_line, max_axis_spread, symmetric_slopes, vertical_line,
};
use perspective_fix::hough::HoughParams;
use perspective_fix::progress::NoProgress;
use perspective_fix::rectify::{apply_homography_points, plan_rectification, RectificationPlan};
use perspective_fix::stages::MetaBranch;
use perspective_fix::image::RasterImage;
use perspective_fix::{detect_vanishing_points, rectify_image, VanishingPoint};

const SIZE: usize = 100;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Largest deviation from axis alignment over every synthetic line, mapped by `h`.
fn worst_spread(
    plan: &RectificationPlan,
    horizontal: VanishingPoint,
    vertical: VanishingPoint,
    slopes: &[f64],
) -> (f64, f64) {
    let to_xy = |pixels: Vec<(usize, usize)>| -> Vec<[f64; 2]> {
        pixels.into_iter().map(|(r, c)| [c as f64, r as f64]).collect()
    };
    let mut rows = 0.0f64;
    let mut cols = 0.0f64;
    for &k in slopes {
        // Exact (unrounded) points along each line.
        let h_line: Vec<[f64; 2]> = to_xy(horizontal_line(SIZE, SIZE, horizontal, k))
            .into_iter()
            .map(|[x, _]| [x, horizontal.row + k * (x - horizontal.col)])
            .collect();
        let v_line: Vec<[f64; 2]> = to_xy(vertical_line(SIZE, SIZE, vertical, k))
            .into_iter()
            .map(|[_, y]| [vertical.col + k * (y - vertical.row), y])
            .collect();
        let h_mapped = apply_homography_points(&plan.homography, &h_line).unwrap();
        let v_mapped = apply_homography_points(&plan.homography, &v_line).unwrap();
        rows = rows.max(max_axis_spread(&h_mapped, 1));
        cols = cols.max(max_axis_spread(&v_mapped, 0));
    }
    (rows, cols)
}

fn assert_recovered(found: VanishingPoint, expected: VanishingPoint, along_is_row: bool) {
    let (along, across, exp_along, exp_across) = if along_is_row {
        (found.row, found.col, expected.row, expected.col)
    } else {
        (found.col, found.row, expected.col, expected.row)
    };
    assert!((along - exp_along).abs() <= 1.0, "{found:?} vs {expected:?}");
    assert!(
        (across - exp_across).abs() <= 0.1 * exp_across.abs(),
        "{found:?} vs {expected:?}"
    );
}

#[test]
fn converging_families_are_recovered() {
    init_logger();
    let horizontal = VanishingPoint::new(50.0, 1000.0);
    let vertical = VanishingPoint::new(-1000.0, 50.0);
    let slopes = symmetric_slopes(2, 0.02);
    let edges = converging_edge_map(SIZE, SIZE, horizontal, vertical, &slopes);

    let detection = detect_vanishing_points(&edges, &HoughParams::default(), &mut NoProgress).unwrap();
    assert_eq!(detection.horizontal.peak_count, 5);
    assert_eq!(detection.horizontal.cluster_count, 5);
    assert_eq!(detection.vertical.cluster_count, 5);
    assert_eq!(detection.horizontal.meta_line.branch, MetaBranch::SolveForIntercept);
    assert!(detection.horizontal.meta_line.slope < 0.0);
    assert!(detection.vertical.meta_line.slope > 0.0);
    assert_recovered(detection.horizontal.point, horizontal, true);
    assert_recovered(detection.vertical.point, vertical, false);
}

#[test]
fn recovered_points_straighten_the_lines() {
    init_logger();
    let slopes = symmetric_slopes(2, 0.02);
    for (horizontal, vertical) in [
        (VanishingPoint::new(50.0, 1000.0), VanishingPoint::new(-1000.0, 50.0)),
        (VanishingPoint::new(50.0, -1000.0), VanishingPoint::new(1100.0, 50.0)),
    ] {
        let edges = converging_edge_map(SIZE, SIZE, horizontal, vertical, &slopes);
        let detection =
            detect_vanishing_points(&edges, &HoughParams::default(), &mut NoProgress).unwrap();
        let plan = plan_rectification(
            SIZE,
            SIZE,
            detection.horizontal.point,
            detection.vertical.point,
            1.0,
        )
        .unwrap();
        let (rows, cols) = worst_spread(&plan, horizontal, vertical, &slopes);
        assert!(rows < 0.6 && cols < 0.6, "spread rows={rows:.3} cols={cols:.3}");
    }
}

#[test]
fn exact_points_align_lines_within_a_tenth_of_a_pixel() {
    let horizontal = VanishingPoint::new(50.0, 1000.0);
    let vertical = VanishingPoint::new(-1000.0, 50.0);
    let slopes = symmetric_slopes(2, 0.02);
    let plan = plan_rectification(SIZE, SIZE, horizontal, vertical, 1.0).unwrap();
    let (rows, cols) = worst_spread(&plan, horizontal, vertical, &slopes);
    assert!(rows < 0.1 && cols < 0.1, "spread rows={rows:.4} cols={cols:.4}");
}

#[test]
fn far_vanishing_points_give_identity() {
    let plan = plan_rectification(
        SIZE,
        SIZE,
        VanishingPoint::new(50.0, 1e9),
        VanishingPoint::new(-1e9, 50.0),
        1.0,
    )
    .unwrap();
    let deviation = (plan.composed - nalgebra::Matrix3::identity()).abs().max();
    assert!(deviation < 0.02, "composed deviates by {deviation}");
}

#[test]
fn far_vanishing_points_keep_the_pixels() {
    let src = RasterImage::gray_from_fn(SIZE, SIZE, |x, y| ((x + y) / 2) as u8);
    let out = rectify_image(
        &src,
        VanishingPoint::new(50.0, 1e9),
        VanishingPoint::new(-1e9, 50.0),
        1.0,
        &mut NoProgress,
    )
    .unwrap();
    assert_eq!((out.image.width, out.image.height), (SIZE, SIZE));

    let (mut total, mut worst, mut count) = (0.0, 0u8, 0);
    for y in 10..SIZE - 10 {
        for x in 10..SIZE - 10 {
            let diff = src.pixel(x, y)[0].abs_diff(out.image.pixel(x, y)[0]);
            total += diff as f64;
            worst = worst.max(diff);
            count += 1;
        }
    }
    let mean = total / count as f64;
    assert!(mean < 1.5, "mean absolute difference {mean:.3}");
    assert!(worst <= 3, "largest difference {worst}");
}
