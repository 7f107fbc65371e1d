//! Real-photo vs. virtual-capture comparison.
//!
//! Reads `aerial/`, `streetview/` and `webxr/` under a captures directory,
//! writes a side-by-side image and a diff map per pair into `comparisons/`,
//! and finishes with `comparisons/campus-comparison-report.json`.

pub mod atomic_write;
pub mod diff;
pub mod error;
pub mod pairing;
pub mod report;
pub mod timestamp;

use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub use error::CompareError;
pub use report::Report;

pub const OUTPUT_DIR: &str = "comparisons";
pub const REPORT_FILE: &str = "campus-comparison-report.json";

fn load_rgba(path: &Path) -> Result<image::RgbaImage, CompareError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| CompareError::Image {
            path: path.to_path_buf(),
            source,
        })
}

fn save_png(img: &image::RgbaImage, path: &Path) -> Result<(), CompareError> {
    img.save(path).map_err(|source| CompareError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Path shown in the report: relative to the captures directory when possible.
fn display_path(captures_dir: &Path, path: &Path) -> String {
    path.strip_prefix(captures_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Compare every pair under `captures_dir` and write the report. Returns the
/// report and the path it was written to.
pub fn run(captures_dir: &Path) -> Result<(Report, PathBuf), CompareError> {
    let pairs = pairing::find_pairs(captures_dir)?;
    if pairs.is_empty() {
        return Err(CompareError::NoPairs(captures_dir.to_path_buf()));
    }

    let out_dir = captures_dir.join(OUTPUT_DIR);
    std::fs::create_dir_all(&out_dir)?;

    let mut comparisons = Vec::with_capacity(pairs.len());
    for pair in pairs {
        println!("Comparing {}...", pair.name);
        let real = load_rgba(&pair.real)?;
        let virtual_img = load_rgba(&pair.virtual_img)?;

        let side_path = out_dir.join(format!("{}-side-by-side.png", pair.name));
        save_png(&diff::side_by_side(&real, &virtual_img), &side_path)?;

        let result = diff::score_images(&real, &virtual_img);
        let diff_path = out_dir.join(format!("{}-diff.png", pair.name));
        save_png(&result.diff_map, &diff_path)?;

        println!("  difference score: {:.2}", result.score);
        comparisons.push(report::Comparison {
            kind: pair.kind,
            name: pair.name,
            real_photo: display_path(captures_dir, &pair.real),
            virtual_photo: display_path(captures_dir, &pair.virtual_img),
            side_by_side: display_path(captures_dir, &side_path),
            diff_map: display_path(captures_dir, &diff_path),
            difference_score: result.score,
            recommendations: report::recommendations(result.score),
        });
    }

    let report = Report::new(timestamp::iso_timestamp(SystemTime::now()), comparisons);
    let report_path = out_dir.join(REPORT_FILE);
    atomic_write::atomic_write(&report_path, &report.to_json()?)?;
    Ok((report, report_path))
}
