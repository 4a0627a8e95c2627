#![warn(missing_docs)]
//! `bevy_ecs` host for formation layouts.
//!
//! The world stores a plain parent/child hierarchy as components, and every
//! layout lives in the [`Formations`] resource. One exclusive system runs each
//! layout's recompute cycle per frame.

use bevy_ecs::change_detection::Mut;
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{ScheduleLabel, Schedules};
use formation_core::LayoutConfig;
use formation_layout::{Layout, SceneHost};
use glam::Vec3;

/// Position relative to the parent node.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct LocalPosition(pub Vec3);

/// Whether the node is shown.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visible(pub bool);

impl Default for Visible {
    fn default() -> Self {
        Self(true)
    }
}

/// Parent of a child node.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentNode(pub Entity);

/// Ordered children of a node.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildNodes(pub Vec<Entity>);

/// Every layout in the world.
#[derive(Resource, Debug, Default)]
pub struct Formations {
    layouts: Vec<Layout<Entity>>,
}

impl Formations {
    /// Register a layout. A previous layout for the same anchor is replaced.
    pub fn insert(&mut self, layout: Layout<Entity>) {
        let anchor = layout.anchor();
        self.layouts.retain(|existing| existing.anchor() != anchor);
        self.layouts.push(layout);
    }

    /// Unregister the layout for `anchor`.
    pub fn remove(&mut self, anchor: Entity) -> Option<Layout<Entity>> {
        let index = self.layouts.iter().position(|l| l.anchor() == anchor)?;
        Some(self.layouts.remove(index))
    }

    /// Layout for `anchor`.
    pub fn get(&self, anchor: Entity) -> Option<&Layout<Entity>> {
        self.layouts.iter().find(|l| l.anchor() == anchor)
    }

    /// Mutable layout for `anchor`.
    pub fn get_mut(&mut self, anchor: Entity) -> Option<&mut Layout<Entity>> {
        self.layouts.iter_mut().find(|l| l.anchor() == anchor)
    }

    /// Number of registered layouts.
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Whether no layouts are registered.
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

/// Recompute every layout every frame, not just on change.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LivePreview(pub bool);

/// [`SceneHost`] view of a world's node hierarchy.
pub struct WorldHost<'w>(pub &'w mut World);

impl SceneHost for WorldHost<'_> {
    type Node = Entity;

    fn children(&self, anchor: Entity) -> Vec<Entity> {
        self.0
            .get::<ChildNodes>(anchor)
            .map(|children| children.0.clone())
            .unwrap_or_default()
    }

    fn child_count(&self, anchor: Entity) -> usize {
        self.0
            .get::<ChildNodes>(anchor)
            .map_or(0, |children| children.0.len())
    }

    fn parent_of(&self, node: Entity) -> Option<Entity> {
        self.0.get::<ParentNode>(node).map(|parent| parent.0)
    }

    fn local_position(&self, node: Entity) -> Option<Vec3> {
        self.0.get::<LocalPosition>(node).map(|position| position.0)
    }

    fn set_local_position(&mut self, node: Entity, position: Vec3) {
        if let Some(mut entity) = self.0.get_entity_mut(node) {
            entity.insert(LocalPosition(position));
        }
    }

    fn is_visible(&self, node: Entity) -> bool {
        self.0.get::<Visible>(node).is_some_and(|visible| visible.0)
    }

    fn set_visible(&mut self, node: Entity, visible: bool) {
        if let Some(mut entity) = self.0.get_entity_mut(node) {
            entity.insert(Visible(visible));
        }
    }
}

/// Spawn a node that can anchor a layout.
pub fn spawn_anchor(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((
            LocalPosition(position),
            Visible::default(),
            ChildNodes::default(),
        ))
        .id()
}

/// Spawn a node as the last child of `parent`.
pub fn spawn_child(world: &mut World, parent: Entity) -> Entity {
    let child = world
        .spawn((LocalPosition::default(), Visible::default(), ParentNode(parent)))
        .id();
    match world.get_mut::<ChildNodes>(parent) {
        Some(mut children) => children.0.push(child),
        None => {
            if let Some(mut entity) = world.get_entity_mut(parent) {
                entity.insert(ChildNodes(vec![child]));
            }
        }
    }
    child
}

/// Remove `child` from its parent's child list, leaving it parentless.
pub fn detach_child(world: &mut World, child: Entity) {
    let Some(ParentNode(parent)) = world.get::<ParentNode>(child).copied() else {
        return;
    };
    if let Some(mut children) = world.get_mut::<ChildNodes>(parent) {
        children.0.retain(|existing| *existing != child);
    }
    if let Some(mut entity) = world.get_entity_mut(child) {
        entity.remove::<ParentNode>();
    }
}

/// Register a layout for `anchor` in the world's [`Formations`].
pub fn add_formation(world: &mut World, anchor: Entity, config: LayoutConfig, cull_excess: bool) {
    world
        .get_resource_or_insert_with(Formations::default)
        .insert(Layout::new(anchor, config).with_cull_excess(cull_excess));
}

/// Run one recompute cycle for every registered layout.
///
/// A layout whose configuration is invalid is skipped for this frame; the
/// others still run.
pub fn recompute_formations(world: &mut World) {
    if !world.contains_resource::<Formations>() {
        return;
    }
    let live_preview = world
        .get_resource::<LivePreview>()
        .is_some_and(|preview| preview.0);

    world.resource_scope(|world, mut formations: Mut<Formations>| {
        let mut host = WorldHost(world);
        for layout in formations.layouts.iter_mut() {
            if let Err(err) = layout.update(&mut host, live_preview) {
                tracing::warn!(anchor = ?layout.anchor(), "formation skipped this frame: {err}");
            }
        }
    });
}

/// Label for the per-frame formation schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ScheduleLabel)]
pub struct FormationSchedule;

/// Build the schedule that recomputes formations each frame.
pub fn build_default_schedule() -> Schedules {
    let mut schedules = Schedules::default();
    let mut schedule = Schedule::new(FormationSchedule);
    schedule.set_apply_final_deferred(true);
    schedule.add_systems(recompute_formations);
    schedules.insert(schedule);
    schedules
}

/// Run the formation schedule for one host frame.
pub fn run_frame(world: &mut World, schedules: &mut Schedules) {
    tracing::trace!("running formation schedule");
    if let Some(schedule) = schedules.get_mut(FormationSchedule) {
        schedule.run(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formation_core::ShapeType;

    fn world_with_line(children: usize) -> (World, Entity, Vec<Entity>) {
        let mut world = World::default();
        let anchor = spawn_anchor(&mut world, Vec3::new(10.0, 0.0, 0.0));
        let kids = (0..children).map(|_| spawn_child(&mut world, anchor)).collect();
        add_formation(&mut world, anchor, LayoutConfig::new(ShapeType::Line), true);
        (world, anchor, kids)
    }

    #[test]
    fn schedule_lays_out_children() {
        let (mut world, _, kids) = world_with_line(3);
        let mut schedules = build_default_schedule();
        run_frame(&mut world, &mut schedules);

        let xs: Vec<f32> = kids
            .iter()
            .map(|kid| world.get::<LocalPosition>(*kid).expect("positioned").0.x)
            .collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn new_children_are_picked_up_next_frame() {
        let (mut world, anchor, _) = world_with_line(2);
        let mut schedules = build_default_schedule();
        run_frame(&mut world, &mut schedules);

        let late = spawn_child(&mut world, anchor);
        world.insert_resource(LivePreview(false));
        run_frame(&mut world, &mut schedules);

        assert_eq!(
            world.get::<LocalPosition>(late),
            Some(&LocalPosition(Vec3::new(2.0, 0.0, 0.0)))
        );
        let formations = world.resource::<Formations>();
        assert_eq!(formations.get(anchor).map(|l| l.snapshot().len()), Some(3));
    }

    #[test]
    fn detached_children_leave_the_formation() {
        let (mut world, anchor, kids) = world_with_line(3);
        let mut schedules = build_default_schedule();
        run_frame(&mut world, &mut schedules);

        detach_child(&mut world, kids[0]);
        assert_eq!(WorldHost(&mut world).parent_of(kids[0]), None);
        run_frame(&mut world, &mut schedules);

        assert_eq!(WorldHost(&mut world).children(anchor), vec![kids[1], kids[2]]);
        assert_eq!(
            world.get::<LocalPosition>(kids[2]),
            Some(&LocalPosition(Vec3::new(1.0, 0.0, 0.0)))
        );
    }

    #[test]
    fn cube_overflow_is_hidden() {
        let mut world = World::default();
        let anchor = spawn_anchor(&mut world, Vec3::ZERO);
        let kids: Vec<Entity> = (0..7).map(|_| spawn_child(&mut world, anchor)).collect();
        add_formation(&mut world, anchor, LayoutConfig::new(ShapeType::Cube), true);
        recompute_formations(&mut world);

        assert_eq!(world.get::<Visible>(kids[5]), Some(&Visible(true)));
        assert_eq!(world.get::<Visible>(kids[6]), Some(&Visible(false)));
    }

    #[test]
    fn invalid_layout_does_not_block_others() {
        let mut world = World::default();
        let broken = spawn_anchor(&mut world, Vec3::ZERO);
        let fine = spawn_anchor(&mut world, Vec3::ZERO);
        spawn_child(&mut world, broken);
        let kid = spawn_child(&mut world, fine);
        world.get_mut::<LocalPosition>(kid).expect("spawned").0 = Vec3::splat(5.0);

        add_formation(
            &mut world,
            broken,
            LayoutConfig::new(ShapeType::Box).with_columns(0),
            true,
        );
        add_formation(&mut world, fine, LayoutConfig::new(ShapeType::Line), true);
        recompute_formations(&mut world);

        assert_eq!(WorldHost(&mut world).local_position(kid), Some(Vec3::ZERO));
    }

    #[test]
    fn replacing_a_formation_keeps_one_per_anchor() {
        let (mut world, anchor, _) = world_with_line(1);
        add_formation(&mut world, anchor, LayoutConfig::new(ShapeType::Circle), false);
        let formations = world.resource::<Formations>();
        assert_eq!(formations.len(), 1);
        assert_eq!(
            formations.get(anchor).map(|l| l.config().shape()),
            Some(ShapeType::Circle)
        );
    }
}
