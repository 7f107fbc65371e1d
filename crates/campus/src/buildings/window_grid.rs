//! Derived window layout for one building section.
//!
//! Nothing here is stored: the grid is recomputed from the section
//! dimensions and floor count whenever windows are placed.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

use crate::config::{
    GLASS_HEIGHT_FACTOR, GLASS_WIDTH_FACTOR, WINDOW_HEIGHT, WINDOW_OFFSET, WINDOW_SPACING,
    WINDOW_WIDTH,
};
use crate::scene_graph::{NodeTag, SceneNode, Shape, SurfaceMaterial};

use super::types::Section;

/// One of the four vertical faces of a section box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facade {
    Front,
    Back,
    Right,
    Left,
}

impl Facade {
    pub const ALL: [Facade; 4] = [Facade::Front, Facade::Back, Facade::Right, Facade::Left];

    pub fn label(self) -> &'static str {
        match self {
            Facade::Front => "front",
            Facade::Back => "back",
            Facade::Right => "right",
            Facade::Left => "left",
        }
    }

    /// Y rotation turning a +Z facing quad outward from this face.
    pub fn rotation_y(self) -> f32 {
        match self {
            Facade::Front => 0.0,
            Facade::Back => PI,
            Facade::Right => FRAC_PI_2,
            Facade::Left => -FRAC_PI_2,
        }
    }

    /// Horizontal extent of this face.
    pub fn span(self, section: &Section) -> f32 {
        match self {
            Facade::Front | Facade::Back => section.width,
            Facade::Right | Facade::Left => section.depth,
        }
    }

    /// Position of a point on this face, `along` the face and at height `y`,
    /// pushed outward by [`WINDOW_OFFSET`]. Relative to the section centre.
    pub fn surface_point(self, section: &Section, along: f32, y: f32) -> Vec3 {
        let hw = section.width / 2.0 + WINDOW_OFFSET;
        let hd = section.depth / 2.0 + WINDOW_OFFSET;
        match self {
            Facade::Front => Vec3::new(along, y, hd),
            Facade::Back => Vec3::new(along, y, -hd),
            Facade::Right => Vec3::new(hw, y, along),
            Facade::Left => Vec3::new(-hw, y, along),
        }
    }
}

/// Column count for a facade of the given span.
pub fn window_columns(span: f32) -> u32 {
    (span / WINDOW_SPACING).floor().max(0.0) as u32
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowGrid {
    pub columns: u32,
    pub rows: u32,
    pub span: f32,
    pub floor_height: f32,
}

impl WindowGrid {
    pub fn new(section: &Section, floors: u32, facade: Facade) -> Self {
        let span = facade.span(section);
        Self {
            columns: window_columns(span),
            rows: floors,
            span,
            floor_height: section.height / floors.max(1) as f32,
        }
    }

    /// Horizontal centre of each column, measured from the face centre.
    pub fn column_centers(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.columns)
            .map(move |col| col as f32 * WINDOW_SPACING - self.span / 2.0 + WINDOW_SPACING / 2.0)
    }

    /// Width of the single ground-floor glass panel on this face.
    pub fn glass_width(&self) -> f32 {
        self.columns.max(1) as f32 * WINDOW_SPACING * GLASS_WIDTH_FACTOR
    }

    /// Vertical centre of a floor, measured from the section centre.
    pub fn row_center(&self, floor: u32, section_height: f32) -> f32 {
        floor as f32 * self.floor_height + self.floor_height / 2.0 - section_height / 2.0
    }
}

pub fn window_material() -> SurfaceMaterial {
    SurfaceMaterial::hex(0x4169E1)
        .with_pbr(0.8, 0.1)
        .with_emissive(0x222244, 0.2)
}

pub fn glass_material() -> SurfaceMaterial {
    SurfaceMaterial::hex(0x87CEEB)
        .with_pbr(0.9, 0.05)
        .with_alpha(0.8)
        .with_emissive(0x111155, 0.3)
}

/// Build window and glass quads for every facade of `section`, in the
/// section's local frame (origin at the box centre).
pub fn place_windows(
    prefix: &str,
    section: &Section,
    floors: u32,
    ground_floor_glass: bool,
) -> Vec<SceneNode> {
    let mut quads = Vec::new();

    for facade in Facade::ALL {
        let grid = WindowGrid::new(section, floors, facade);
        let window_h = WINDOW_HEIGHT.min(grid.floor_height * 0.8);
        let rot = facade.rotation_y();

        for floor in 0..grid.rows {
            let y = grid.row_center(floor, section.height);

            if floor == 0 && ground_floor_glass {
                quads.push(
                    SceneNode::new(
                        format!("{prefix}/{}/glass", facade.label()),
                        NodeTag::GlassPanel,
                        Shape::Quad {
                            width: grid.glass_width(),
                            height: grid.floor_height * GLASS_HEIGHT_FACTOR,
                        },
                    )
                    .at(facade.surface_point(section, 0.0, y))
                    .rotated_y(rot)
                    .with_material(glass_material()),
                );
                continue;
            }

            for (col, along) in grid.column_centers().enumerate() {
                quads.push(
                    SceneNode::new(
                        format!("{prefix}/{}/f{floor}c{col}", facade.label()),
                        NodeTag::Window,
                        Shape::Quad {
                            width: WINDOW_WIDTH,
                            height: window_h,
                        },
                    )
                    .at(facade.surface_point(section, along, y))
                    .rotated_y(rot)
                    .with_material(window_material()),
                );
            }
        }
    }

    quads
}
