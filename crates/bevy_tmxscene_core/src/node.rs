//! Owned scene tree produced by assembly.
//!
//! The whole map is built as plain data first and only turned into entities once
//! assembly has succeeded, so a failed load leaves the world untouched.

use bevy::prelude::*;
use bevy::sprite_render::{ColorMaterial, MeshMaterial2d};

use crate::colliders::TileCollider;
use crate::components::TmxLayer;

/// Mesh and material pair for a node.
#[derive(Debug, Clone)]
pub struct MeshBinding {
    pub mesh: Handle<Mesh>,
    pub material: Handle<ColorMaterial>,
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<MeshBinding>,
    pub collider: Option<TileCollider>,
    pub layer: Option<TmxLayer>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            mesh: None,
            collider: None,
            layer: None,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshBinding) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_collider(mut self, collider: TileCollider) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn with_layer(mut self, layer: TmxLayer) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Reparent `child` under this node.
    pub fn attach(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Depth-first search by name, including this node.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// All nodes below this one, depth-first.
    pub fn descendants(&self) -> Vec<&SceneNode> {
        let mut nodes = Vec::new();
        let mut stack: Vec<&SceneNode> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.children.iter().rev());
        }
        nodes
    }

    /// Spawn this tree as a new entity hierarchy.
    pub fn spawn(self, commands: &mut Commands) -> Entity {
        let entity = commands.spawn_empty().id();
        self.spawn_into(commands, entity);
        entity
    }

    /// Spawn this tree onto an existing entity, keeping that entity's transform.
    pub fn spawn_onto(self, commands: &mut Commands, entity: Entity) {
        let children = spawn_all(self.children, commands);
        commands
            .entity(entity)
            .insert(Name::new(self.name))
            .add_children(&children);
    }

    fn spawn_into(self, commands: &mut Commands, entity: Entity) {
        let SceneNode {
            name,
            transform,
            mesh,
            collider,
            layer,
            children,
        } = self;

        let mut entity_commands = commands.entity(entity);
        entity_commands.insert((Name::new(name), transform, Visibility::Inherited));
        if let Some(binding) = mesh {
            entity_commands.insert((Mesh2d(binding.mesh), MeshMaterial2d(binding.material)));
        }
        if let Some(collider) = collider {
            entity_commands.insert(collider);
        }
        if let Some(layer) = layer {
            entity_commands.insert(layer);
        }

        let children = spawn_all(children, commands);
        commands.entity(entity).add_children(&children);
    }
}

fn spawn_all(nodes: Vec<SceneNode>, commands: &mut Commands) -> Vec<Entity> {
    nodes.into_iter().map(|node| node.spawn(commands)).collect()
}

#[cfg(test)]
mod tests {
    use bevy::ecs::world::CommandQueue;

    use super::*;
    use crate::colliders::ColliderBox;

    fn sample_tree() -> SceneNode {
        let mut root = SceneNode::new("level");
        let mut layer = SceneNode::new("ground").with_layer(TmxLayer::Tiles);
        layer.attach(
            SceneNode::new("collision_node")
                .with_transform(Transform::from_xyz(16.0, -32.0, 0.0))
                .with_collider(TileCollider {
                    boxes: vec![ColliderBox::from_rectangle(16.0, 16.0, 32.0)],
                }),
        );
        root.attach(layer);
        root.attach(SceneNode::new("sky").with_layer(TmxLayer::Image));
        root
    }

    #[test]
    fn test_find_and_descendants() {
        let root = sample_tree();
        assert!(root.find("collision_node").is_some());
        assert!(root.find("missing").is_none());

        let names: Vec<_> = root.descendants().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["ground", "collision_node", "sky"]);
    }

    #[test]
    fn test_spawn_builds_hierarchy() {
        let mut world = World::new();
        let mut queue = CommandQueue::default();
        let root = {
            let mut commands = Commands::new(&mut queue, &world);
            sample_tree().spawn(&mut commands)
        };
        queue.apply(&mut world);

        assert_eq!(world.get::<Name>(root).map(Name::as_str), Some("level"));
        let children = world.get::<Children>(root).unwrap();
        assert_eq!(children.len(), 2);

        let ground = children[0];
        assert_eq!(world.get::<TmxLayer>(ground), Some(&TmxLayer::Tiles));

        let collision = world.get::<Children>(ground).unwrap()[0];
        assert_eq!(
            world.get::<Transform>(collision).map(|t| t.translation),
            Some(Vec3::new(16.0, -32.0, 0.0))
        );
        assert!(world.get::<TileCollider>(collision).is_some());
        assert!(world.get::<Mesh2d>(collision).is_none());
    }

    #[test]
    fn test_spawn_onto_keeps_entity_transform() {
        let mut world = World::new();
        let target = world.spawn(Transform::from_xyz(5.0, 5.0, 0.0)).id();
        let mut queue = CommandQueue::default();
        {
            let mut commands = Commands::new(&mut queue, &world);
            sample_tree().spawn_onto(&mut commands, target);
        }
        queue.apply(&mut world);

        assert_eq!(
            world.get::<Transform>(target).map(|t| t.translation),
            Some(Vec3::new(5.0, 5.0, 0.0))
        );
        assert_eq!(world.get::<Children>(target).map(|c| c.len()), Some(2));
    }
}
