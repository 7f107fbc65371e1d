//! Pixel difference scoring and the side-by-side / diff-map images.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Score and red difference map for one real/virtual pair.
#[derive(Debug, Clone)]
pub struct DiffResult {
    /// Mean per-channel absolute RGB difference, 0 (identical) to 100.
    pub score: f64,
    pub diff_map: RgbaImage,
}

/// Compare `virtual_img` against `real`. The virtual image is resized to the
/// real image's dimensions first; alpha is ignored.
pub fn score_images(real: &RgbaImage, virtual_img: &RgbaImage) -> DiffResult {
    let (width, height) = real.dimensions();
    let resized;
    let virtual_img = if virtual_img.dimensions() == (width, height) {
        virtual_img
    } else {
        resized = imageops::resize(virtual_img, width, height, FilterType::Triangle);
        &resized
    };

    let mut diff_map = RgbaImage::new(width, height);
    let mut total = 0.0_f64;
    for ((a, b), out) in real
        .pixels()
        .zip(virtual_img.pixels())
        .zip(diff_map.pixels_mut())
    {
        let channel_sum: u32 = (0..3).map(|c| u32::from(a[c].abs_diff(b[c]))).sum();
        let avg = channel_sum as f64 / 3.0;
        total += avg;
        *out = Rgba([clamped_byte(avg * 2.0), 0, 0, clamped_byte(avg)]);
    }

    let pixels = u64::from(width) * u64::from(height);
    let score = if pixels == 0 {
        0.0
    } else {
        total / pixels as f64 / 255.0 * 100.0
    };
    DiffResult { score, diff_map }
}

/// Round to the nearest byte, saturating at both ends.
fn clamped_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Real image on the left, virtual on the right, on a white canvas twice
/// the wider image's width.
pub fn side_by_side(real: &RgbaImage, virtual_img: &RgbaImage) -> RgbaImage {
    let width = real.width().max(virtual_img.width()) * 2;
    let height = real.height().max(virtual_img.height());
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, real, 0, 0);
    imageops::overlay(&mut canvas, virtual_img, i64::from(real.width()), 0);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, rgb: [u8; 3]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([rgb[0], rgb[1], rgb[2], 255]))
    }

    #[test]
    fn test_identical_images_score_zero() {
        let img = solid(8, 8, [120, 30, 200]);
        let result = score_images(&img, &img);
        assert_eq!(result.score, 0.0);
        assert!(result.diff_map.pixels().all(|p| p[0] == 0 && p[3] == 0));
    }

    #[test]
    fn test_black_vs_white_scores_hundred() {
        let result = score_images(&solid(4, 4, [0, 0, 0]), &solid(4, 4, [255, 255, 255]));
        assert!((result.score - 100.0).abs() < 1e-9);
        assert_eq!(result.diff_map.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_single_channel_difference_is_averaged() {
        // Red differs by 255, green and blue match: 85 per pixel, 33.3 %.
        let result = score_images(&solid(2, 2, [0, 10, 10]), &solid(2, 2, [255, 10, 10]));
        assert!((result.score - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.diff_map.get_pixel(1, 1), &Rgba([170, 0, 0, 85]));
    }

    #[test]
    fn test_diff_map_bytes_round_to_nearest() {
        // Average difference 2/3: red 4/3 rounds to 1, alpha 2/3 rounds to 1.
        let result = score_images(&solid(1, 1, [0, 0, 0]), &solid(1, 1, [2, 0, 0]));
        assert_eq!(result.diff_map.get_pixel(0, 0), &Rgba([1, 0, 0, 1]));
        assert_eq!(clamped_byte(300.0), 255);
        assert_eq!(clamped_byte(-1.0), 0);
    }

    #[test]
    fn test_virtual_is_resized_to_real() {
        let result = score_images(&solid(10, 6, [50, 50, 50]), &solid(3, 3, [50, 50, 50]));
        assert_eq!(result.diff_map.dimensions(), (10, 6));
        assert!(result.score < 0.5);
    }

    #[test]
    fn test_side_by_side_layout() {
        let real = solid(4, 2, [0, 0, 0]);
        let virt = solid(3, 5, [255, 0, 0]);
        let canvas = side_by_side(&real, &virt);
        assert_eq!(canvas.dimensions(), (8, 5));
        assert_eq!(canvas.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(4, 4), &Rgba([255, 0, 0, 255]));
        // Below the real image stays white.
        assert_eq!(canvas.get_pixel(0, 4), &Rgba([255, 255, 255, 255]));
    }
}
