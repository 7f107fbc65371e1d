//! Real/virtual image pairing.
//!
//! `aerial/*.png` pair with virtual captures whose name contains `aerial`;
//! `streetview/*.png` pair with those containing `ground-level`. Both lists
//! are sorted by file name and paired by index; leftovers are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use crate::report::ComparisonKind;

pub const AERIAL_DIR: &str = "aerial";
pub const STREETVIEW_DIR: &str = "streetview";
pub const VIRTUAL_DIR: &str = "webxr";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub kind: ComparisonKind,
    pub name: String,
    pub real: PathBuf,
    pub virtual_img: PathBuf,
}

/// Sorted `.png` files directly under `dir`. A missing directory is empty.
pub fn list_pngs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };
    let mut pngs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png && path.is_file() {
            pngs.push(path);
        }
    }
    pngs.sort();
    Ok(pngs)
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

/// Pair `real` images with the `virtual_imgs` whose file name contains
/// `needle`, in order.
pub fn pair_images(
    kind: ComparisonKind,
    real: &[PathBuf],
    virtual_imgs: &[PathBuf],
    needle: &str,
) -> Vec<ImagePair> {
    let prefix = match kind {
        ComparisonKind::Aerial => "aerial",
        ComparisonKind::StreetView => "streetview",
    };
    real.iter()
        .zip(virtual_imgs.iter().filter(|p| file_name(p).contains(needle)))
        .enumerate()
        .map(|(i, (real, virtual_img))| ImagePair {
            kind,
            name: format!("{prefix}-comparison-{i}"),
            real: real.clone(),
            virtual_img: virtual_img.clone(),
        })
        .collect()
}

/// All pairs under a captures directory laid out as `aerial/`,
/// `streetview/` and `webxr/`.
pub fn find_pairs(captures_dir: &Path) -> std::io::Result<Vec<ImagePair>> {
    let virtual_imgs = list_pngs(&captures_dir.join(VIRTUAL_DIR))?;
    let mut pairs = pair_images(
        ComparisonKind::Aerial,
        &list_pngs(&captures_dir.join(AERIAL_DIR))?,
        &virtual_imgs,
        "aerial",
    );
    pairs.extend(pair_images(
        ComparisonKind::StreetView,
        &list_pngs(&captures_dir.join(STREETVIEW_DIR))?,
        &virtual_imgs,
        "ground-level",
    ));
    Ok(pairs)
}
