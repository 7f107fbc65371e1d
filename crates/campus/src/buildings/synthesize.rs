use bevy::prelude::*;

use crate::error::CampusError;
use crate::scene_graph::{NodeTag, SceneNode, Shape, SurfaceMaterial};

use super::types::{BuildingSpec, ParkingSpec};
use super::window_grid::place_windows;

/// Output of [`synthesize`]: the building group plus any sections that were
/// rejected along the way.
#[derive(Debug)]
pub struct Synthesized {
    pub node: SceneNode,
    pub skipped: Vec<CampusError>,
}

/// Build the composite mesh group for one building.
///
/// The group sits at the building base position on the ground. Each valid
/// section becomes a box child at `(offset.x, height / 2, offset.z)` with its
/// window quads attached underneath. Sections with non-positive dimensions
/// are skipped and reported; the building as a whole fails only when no
/// section survives or the floor count is zero.
pub fn synthesize(spec: &BuildingSpec) -> Result<Synthesized, CampusError> {
    if spec.floors < 1 {
        return Err(CampusError::invalid(&spec.name, "floors must be at least 1"));
    }
    if !spec.position.is_finite() {
        return Err(CampusError::invalid(&spec.name, "position is not finite"));
    }

    let mut group = SceneNode::group(&spec.name, NodeTag::Building).at(spec.position.at_height(0.0));
    let mut skipped = Vec::new();
    let facade = SurfaceMaterial::hex(spec.color).with_pbr(0.1, 0.7);

    for (index, section) in spec.sections.iter().enumerate() {
        if let Err(reason) = section.validate() {
            let subject = format!("{} section {index}", spec.name);
            warn!("Skipping building section '{subject}': {reason}");
            skipped.push(CampusError::invalid(subject, reason));
            continue;
        }

        let prefix = format!("{}/section-{index}", spec.name);
        let mut mesh = SceneNode::new(
            prefix.clone(),
            NodeTag::Section,
            Shape::Box {
                width: section.width,
                height: section.height,
                depth: section.depth,
            },
        )
        .at(section.offset.at_height(section.height / 2.0))
        .with_material(facade);
        mesh.children = place_windows(&prefix, section, spec.floors, spec.ground_floor_glass);
        group.push(mesh);
    }

    if group.children.is_empty() {
        return Err(CampusError::invalid(&spec.name, "no valid sections"));
    }

    Ok(Synthesized {
        node: group,
        skipped,
    })
}

const PARKING_OPENINGS: usize = 3;

/// Parking structure: a grey box with dark opening slabs stacked on its
/// front face.
pub fn synthesize_parking(spec: &ParkingSpec) -> Result<SceneNode, CampusError> {
    for (label, value) in [
        ("width", spec.width),
        ("height", spec.height),
        ("depth", spec.depth),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(CampusError::invalid(
                &spec.name,
                format!("{label} must be positive, got {value}"),
            ));
        }
    }

    let mut node = SceneNode::new(
        &spec.name,
        NodeTag::ParkingStructure,
        Shape::Box {
            width: spec.width,
            height: spec.height,
            depth: spec.depth,
        },
    )
    .at(spec.position.at_height(spec.height / 2.0))
    .with_material(SurfaceMaterial::hex(0xCCCCCC).with_pbr(0.0, 0.9));

    // Openings are thin slabs poking out of the front face, spread over the
    // section height.
    let slab_h = spec.height / PARKING_OPENINGS as f32;
    for level in 0..PARKING_OPENINGS {
        let y = level as f32 * slab_h + slab_h / 2.0 - spec.height / 2.0;
        node.push(
            SceneNode::new(
                format!("{}/opening-{level}", spec.name),
                NodeTag::Decor,
                Shape::Box {
                    width: spec.width * 0.9,
                    height: slab_h * 0.8,
                    depth: 2.0,
                },
            )
            .at(Vec3::new(0.0, y, spec.depth / 2.0 - 0.9))
            .with_material(SurfaceMaterial::hex(0x333333)),
        );
    }

    Ok(node)
}
