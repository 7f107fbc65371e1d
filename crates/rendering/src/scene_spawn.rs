//! Instantiates the renderer-agnostic `SceneNode` tree as Bevy entities.
//!
//! Meshes are shared per primitive size and materials per surface
//! description. Building sections always get their own material so the hover
//! highlight can change one building without touching the others.

use std::collections::HashMap;

use bevy::prelude::*;

use campus::scene_graph::{NodeTag, SceneNode, Shape, SurfaceMaterial};
use campus::{CampusScene, SceneContext};

/// Emissive colours in the scene graph are unit range; Bevy expects cd/m².
const EMISSIVE_NITS: f32 = 400.0;

/// Lumens per unit of `Shape::PointLight` intensity.
const POINT_LIGHT_LUMENS: f32 = 100_000.0;

/// Marks the entity spawned for one scene node.
#[derive(Component, Debug, Clone)]
pub struct CampusNode {
    pub name: String,
    pub tag: NodeTag,
}

/// A section box of a named building. The hover picker tests the cursor ray
/// against `half_extents` around the entity's global translation.
#[derive(Component, Debug, Clone)]
pub struct BuildingSection {
    pub building: String,
    pub half_extents: Vec3,
    pub base_emissive: LinearRgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MeshKey {
    Box([u32; 3]),
    Quad([u32; 2]),
    Cylinder([u32; 2]),
    Sphere(u32),
}

impl MeshKey {
    fn of(shape: &Shape) -> Option<Self> {
        match *shape {
            Shape::Box {
                width,
                height,
                depth,
            } => Some(Self::Box([width.to_bits(), height.to_bits(), depth.to_bits()])),
            Shape::Quad { width, height } => Some(Self::Quad([width.to_bits(), height.to_bits()])),
            Shape::Cylinder { radius, height } => {
                Some(Self::Cylinder([radius.to_bits(), height.to_bits()]))
            }
            Shape::Sphere { radius } => Some(Self::Sphere(radius.to_bits())),
            Shape::Group | Shape::PointLight { .. } => None,
        }
    }

    fn build(self) -> Mesh {
        let f = f32::from_bits;
        match self {
            Self::Box([w, h, d]) => Cuboid::new(f(w), f(h), f(d)).into(),
            Self::Quad([w, h]) => Rectangle::new(f(w), f(h)).into(),
            Self::Cylinder([r, h]) => Cylinder::new(f(r), f(h)).into(),
            Self::Sphere(r) => Sphere::new(f(r)).mesh().uv(24, 16),
        }
    }
}

fn material_key(m: &SurfaceMaterial) -> [u32; 11] {
    [
        m.base_color[0].to_bits(),
        m.base_color[1].to_bits(),
        m.base_color[2].to_bits(),
        m.base_color[3].to_bits(),
        m.emissive[0].to_bits(),
        m.emissive[1].to_bits(),
        m.emissive[2].to_bits(),
        m.emissive_intensity.to_bits(),
        m.metallic.to_bits(),
        m.roughness.to_bits(),
        u32::from(m.unlit),
    ]
}

/// Linear emissive for a unit-range sRGB colour and intensity.
pub fn emissive_nits(rgb: [f32; 3], intensity: f32) -> LinearRgba {
    LinearRgba::from(Color::srgb(rgb[0], rgb[1], rgb[2])) * (intensity * EMISSIVE_NITS)
}

pub fn standard_material(m: &SurfaceMaterial) -> StandardMaterial {
    let [r, g, b, a] = m.base_color;
    StandardMaterial {
        base_color: Color::srgba(r, g, b, a),
        emissive: emissive_nits(m.emissive, m.emissive_intensity),
        metallic: m.metallic,
        perceptual_roughness: m.roughness,
        unlit: m.unlit,
        alpha_mode: if m.is_transparent() {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        ..default()
    }
}

/// Shared GPU handles for scene geometry.
#[derive(Resource, Default)]
pub struct MeshCache {
    meshes: HashMap<MeshKey, Handle<Mesh>>,
    materials: HashMap<[u32; 11], Handle<StandardMaterial>>,
}

impl MeshCache {
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

/// Walks a `SceneNode` tree and spawns one entity per node.
pub struct NodeSpawner<'a> {
    cache: &'a mut MeshCache,
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
    /// `(building, entity)` for every section spawned so far.
    pub sections: Vec<(String, Entity)>,
}

impl<'a> NodeSpawner<'a> {
    pub fn new(
        cache: &'a mut MeshCache,
        meshes: &'a mut Assets<Mesh>,
        materials: &'a mut Assets<StandardMaterial>,
    ) -> Self {
        Self {
            cache,
            meshes,
            materials,
            sections: Vec::new(),
        }
    }

    /// Spawn `node` and its subtree; returns the root entity.
    pub fn spawn(&mut self, commands: &mut Commands, node: &SceneNode, building: Option<&str>) -> Entity {
        let building = if node.tag == NodeTag::Building {
            Some(node.name.as_str())
        } else {
            building
        };

        let marker = CampusNode {
            name: node.name.clone(),
            tag: node.tag,
        };
        let mut entity = commands.spawn((marker, node.transform, Visibility::default()));
        if let Some(label) = &node.label {
            entity.insert(Name::new(label.clone()));
        }

        match node.shape {
            Shape::Group => {}
            Shape::PointLight { intensity, range } => {
                let [r, g, b, _] = node.material.map_or([1.0; 4], |m| m.base_color);
                entity.insert(PointLight {
                    color: Color::srgb(r, g, b),
                    intensity: intensity * POINT_LIGHT_LUMENS,
                    range,
                    shadows_enabled: false,
                    ..default()
                });
            }
            shape => {
                if let Some(key) = MeshKey::of(&shape) {
                    let meshes = &mut *self.meshes;
                    let mesh = self
                        .cache
                        .meshes
                        .entry(key)
                        .or_insert_with(|| meshes.add(key.build()))
                        .clone();
                    entity.insert(Mesh3d(mesh));
                }
                let surface = node.material.unwrap_or_else(|| SurfaceMaterial::hex(0xFFFFFF));
                let section_of = building.filter(|_| node.tag == NodeTag::Section);
                let material = if section_of.is_some() {
                    self.materials.add(standard_material(&surface))
                } else {
                    let materials = &mut *self.materials;
                    self.cache
                        .materials
                        .entry(material_key(&surface))
                        .or_insert_with(|| materials.add(standard_material(&surface)))
                        .clone()
                };
                entity.insert(MeshMaterial3d(material));

                if let (Some(name), Shape::Box { width, height, depth }) = (section_of, shape) {
                    entity.insert(BuildingSection {
                        building: name.to_string(),
                        half_extents: Vec3::new(width, height, depth) * 0.5,
                        base_emissive: emissive_nits(surface.emissive, surface.emissive_intensity),
                    });
                    let id = entity.id();
                    self.sections.push((name.to_string(), id));
                }
            }
        }

        let parent = entity.id();
        for child in &node.children {
            let child_entity = self.spawn(commands, child, building);
            commands.entity(parent).add_child(child_entity);
        }
        parent
    }
}

/// Startup: spawn the static campus and register building sections.
pub fn spawn_campus_scene(
    mut commands: Commands,
    scene: Res<CampusScene>,
    mut context: ResMut<SceneContext>,
    mut cache: ResMut<MeshCache>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut spawner = NodeSpawner::new(&mut cache, &mut meshes, &mut materials);
    spawner.spawn(&mut commands, &scene.root, None);
    let sections = std::mem::take(&mut spawner.sections);
    for (building, entity) in &sections {
        context.register_section(building, *entity);
    }
    info!(
        "Campus scene spawned: {} nodes, {} section boxes, {} meshes, {} materials",
        scene.root.node_count(),
        sections.len(),
        cache.mesh_count(),
        cache.material_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus::buildings::{synthesize, BuildingSpec};

    #[test]
    fn test_mesh_key_shares_identical_sizes() {
        let a = MeshKey::of(&Shape::Box {
            width: 1.5,
            height: 2.5,
            depth: 0.1,
        });
        let b = MeshKey::of(&Shape::Box {
            width: 1.5,
            height: 2.5,
            depth: 0.1,
        });
        assert_eq!(a, b);
        assert!(MeshKey::of(&Shape::Group).is_none());
        assert!(MeshKey::of(&Shape::PointLight {
            intensity: 1.0,
            range: 10.0
        })
        .is_none());
    }

    #[test]
    fn test_transparent_surface_blends() {
        let glass = standard_material(&SurfaceMaterial::hex(0x87CEEB).with_alpha(0.8));
        assert!(matches!(glass.alpha_mode, AlphaMode::Blend));
        let wall = standard_material(&SurfaceMaterial::hex(0xE8E8E8));
        assert!(matches!(wall.alpha_mode, AlphaMode::Opaque));
    }

    #[test]
    fn test_spawn_registers_sections_and_shares_window_meshes() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<MeshCache>()
            .init_resource::<SceneContext>();

        let spec = BuildingSpec::single("Lab", 0.0, 0.0, 20.0, 12.0, 12.0, 3, 0xDDDDDD);
        let building = synthesize(&spec).unwrap().node;
        let mut scene = CampusScene::default();
        scene.root.push(building);
        let total_nodes = scene.root.node_count();
        app.insert_resource(scene);

        app.add_systems(Update, spawn_campus_scene);
        app.update();

        let world = app.world_mut();
        assert_eq!(world.resource::<SceneContext>().sections("Lab").len(), 1);
        let nodes = world.query::<&CampusNode>().iter(world).count();
        assert_eq!(nodes, total_nodes);
        // One section box plus one window size.
        assert_eq!(world.resource::<MeshCache>().mesh_count(), 2);
    }

    #[test]
    fn test_labeled_nodes_carry_name() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<MeshCache>()
            .init_resource::<SceneContext>();

        let mut scene = CampusScene::default();
        scene.root.push(
            SceneNode::new("sign", NodeTag::Sign, Shape::Quad { width: 8.0, height: 1.5 })
                .labeled("有明テニスの森"),
        );
        scene.root.push(SceneNode::group("plain", NodeTag::Decor));
        app.insert_resource(scene);

        app.add_systems(Update, spawn_campus_scene);
        app.update();

        let world = app.world_mut();
        let named: Vec<(String, String)> = world
            .query::<(&CampusNode, &Name)>()
            .iter(world)
            .map(|(node, name)| (node.name.clone(), name.as_str().to_string()))
            .collect();
        assert_eq!(named, vec![("sign".to_string(), "有明テニスの森".to_string())]);
    }
}
