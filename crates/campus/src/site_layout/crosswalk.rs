//! Zebra stripes for crosswalk segments.

use crate::config::{CROSSWALK_STRIPE_GAP, CROSSWALK_STRIPE_WIDTH};
use crate::scene_graph::{NodeTag, SceneNode};

use super::road_markings::{marking_material, marking_quad};
use super::types::Footprint;

/// Number of stripes that fit across `width`.
pub fn stripe_count(width: f32, stripe_width: f32, gap: f32) -> u32 {
    let pitch = stripe_width + gap;
    if pitch <= 0.0 || !width.is_finite() {
        return 0;
    }
    (width / pitch).floor().max(0.0) as u32
}

/// Offsets of each stripe centre from the segment origin, symmetric about 0.
pub fn stripe_offsets(count: u32, pitch: f32) -> impl Iterator<Item = f32> {
    let mid = (count as f32 - 1.0) / 2.0;
    (0..count).map(move |i| (i as f32 - mid) * pitch)
}

/// Stripes repeat across the short axis and each one spans the long axis.
pub fn crosswalk_stripes(name: &str, footprint: &Footprint) -> Vec<SceneNode> {
    let axis = footprint.long_axis();
    let count = stripe_count(
        footprint.width(),
        CROSSWALK_STRIPE_WIDTH,
        CROSSWALK_STRIPE_GAP,
    );
    let material = marking_material();

    stripe_offsets(count, CROSSWALK_STRIPE_WIDTH + CROSSWALK_STRIPE_GAP)
        .enumerate()
        .map(|(i, v)| {
            marking_quad(
                format!("{name}/stripe-{i}"),
                NodeTag::CrosswalkStripe,
                axis,
                footprint.length(),
                CROSSWALK_STRIPE_WIDTH,
                0.0,
                v,
                material,
            )
        })
        .collect()
}
