//! Renderer-agnostic scene graph produced by the synthesizer and composer.
//!
//! A [`SceneNode`] is a named primitive (or group) with a local
//! [`Transform`], an optional [`SurfaceMaterial`] and owned children. The
//! scene host walks the tree once and instantiates whatever it renders with;
//! nothing in here touches GPU assets. Two trees built from the same input
//! compare equal with `==`.

use bevy::prelude::*;

/// Primitive geometry carried by a node. Dimensions are full extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Pure transform node with no geometry of its own.
    Group,
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// Flat rectangle in the local XY plane, facing +Z.
    Quad { width: f32, height: f32 },
    Cylinder { radius: f32, height: f32 },
    Sphere { radius: f32 },
    PointLight { intensity: f32, range: f32 },
}

/// Semantic role of a node, used for lookups, counting and picking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Scene,
    Ground,
    Building,
    Section,
    Window,
    GlassPanel,
    Road,
    RoadSurface,
    CenterDash,
    EdgeLine,
    Crosswalk,
    CrosswalkStripe,
    GreenArea,
    Tree,
    StreetLight,
    ParkingStructure,
    MonorailTrack,
    Station,
    Sign,
    Decor,
    Agent,
}

/// PBR-ish material description in sRGB space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMaterial {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub metallic: f32,
    pub roughness: f32,
    pub unlit: bool,
}

/// Split `0xRRGGBB` into normalised sRGB channels.
pub fn hex_to_srgb(rgb: u32) -> [f32; 3] {
    [
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
    ]
}

impl SurfaceMaterial {
    /// Opaque, matte material from a `0xRRGGBB` colour.
    pub fn hex(rgb: u32) -> Self {
        let [r, g, b] = hex_to_srgb(rgb);
        Self {
            base_color: [r, g, b, 1.0],
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
            metallic: 0.0,
            roughness: 0.9,
            unlit: false,
        }
    }

    pub fn with_pbr(mut self, metallic: f32, roughness: f32) -> Self {
        self.metallic = metallic;
        self.roughness = roughness;
        self
    }

    pub fn with_emissive(mut self, rgb: u32, intensity: f32) -> Self {
        self.emissive = hex_to_srgb(rgb);
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha;
        self
    }

    pub fn unlit(mut self) -> Self {
        self.unlit = true;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.base_color[3] < 1.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub tag: NodeTag,
    pub shape: Shape,
    pub transform: Transform,
    pub material: Option<SurfaceMaterial>,
    /// Text carried by signs.
    pub label: Option<String>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, tag: NodeTag, shape: Shape) -> Self {
        Self {
            name: name.into(),
            tag,
            shape,
            transform: Transform::IDENTITY,
            material: None,
            label: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>, tag: NodeTag) -> Self {
        Self::new(name, tag, Shape::Group)
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    pub fn rotated_y(mut self, radians: f32) -> Self {
        self.transform.rotation = Quat::from_rotation_y(radians);
        self
    }

    /// Lay a [`Shape::Quad`] flat on the ground, facing +Y.
    pub fn flat(mut self) -> Self {
        self.transform.rotation = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);
        self
    }

    pub fn with_material(mut self, material: SurfaceMaterial) -> Self {
        self.material = Some(material);
        self
    }

    pub fn labeled(mut self, text: impl Into<String>) -> Self {
        self.label = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Pre-order depth-first traversal, starting with `self`.
    pub fn iter(&self) -> DepthFirst<'_> {
        DepthFirst { stack: vec![self] }
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    pub fn count_tagged(&self, tag: NodeTag) -> usize {
        self.iter().filter(|n| n.tag == tag).count()
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.iter().find(|n| n.name == name)
    }

    pub fn children_tagged(&self, tag: NodeTag) -> impl Iterator<Item = &SceneNode> {
        self.children.iter().filter(move |c| c.tag == tag)
    }
}

pub struct DepthFirst<'a> {
    stack: Vec<&'a SceneNode>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a SceneNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SceneNode {
        SceneNode::group("root", NodeTag::Scene)
            .with_child(
                SceneNode::group("a", NodeTag::Building).with_child(SceneNode::new(
                    "a/box",
                    NodeTag::Section,
                    Shape::Box {
                        width: 1.0,
                        height: 1.0,
                        depth: 1.0,
                    },
                )),
            )
            .with_child(SceneNode::new(
                "b",
                NodeTag::Tree,
                Shape::Sphere { radius: 3.0 },
            ))
    }

    #[test]
    fn test_depth_first_order_is_preorder() {
        let tree = sample_tree();
        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["root", "a", "a/box", "b"]);
    }

    #[test]
    fn test_counts_and_find() {
        let tree = sample_tree();
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.count_tagged(NodeTag::Section), 1);
        assert!(tree.find("a/box").is_some());
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn test_hex_to_srgb() {
        let [r, g, b] = hex_to_srgb(0xFF8000);
        assert!((r - 1.0).abs() < f32::EPSILON);
        assert!((g - 128.0 / 255.0).abs() < 1e-6);
        assert!(b.abs() < f32::EPSILON);
    }

    #[test]
    fn test_flat_quad_faces_up() {
        let quad = SceneNode::new("q", NodeTag::RoadSurface, Shape::Quad {
            width: 2.0,
            height: 2.0,
        })
        .flat();
        let normal = quad.transform.rotation * Vec3::Z;
        assert!((normal - Vec3::Y).length() < 1e-5, "normal = {normal}");
    }
}
