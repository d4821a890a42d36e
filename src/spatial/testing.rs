//! Spatial domain: an axis-aligned box world for exercising sensing and
//! combat logic without a physics step.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{GameLayer, ProbeShape, WorldProbe};

#[derive(Debug, Clone, Copy)]
pub struct BoxBody {
    pub entity: Entity,
    pub min: Vec2,
    pub max: Vec2,
    pub layers: LayerMask,
}

#[derive(Default)]
pub struct BoxWorld {
    pub world: World,
    pub bodies: Vec<BoxBody>,
}

impl BoxWorld {
    /// Add a box by its lower-left corner and size.
    pub fn add(&mut self, min: Vec2, size: Vec2, layer: GameLayer) -> Entity {
        let entity = self.world.spawn_empty().id();
        self.bodies.push(BoxBody {
            entity,
            min,
            max: min + size,
            layers: LayerMask::from(layer),
        });
        entity
    }

    pub fn add_centered(&mut self, center: Vec2, half_extents: Vec2, layer: GameLayer) -> Entity {
        self.add(center - half_extents, half_extents * 2.0, layer)
    }

    pub fn entity(&mut self) -> Entity {
        self.world.spawn_empty().id()
    }
}

fn on_layers(body: &BoxBody, layers: LayerMask) -> bool {
    (body.layers & layers) != LayerMask::NONE
}

/// Slab test. Returns the entry distance along the ray, 0 when starting inside.
fn ray_entry(body: &BoxBody, origin: Vec2, dir: Vec2, max_distance: f32) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = max_distance;
    for axis in 0..2 {
        let (o, d, lo, hi) = (origin[axis], dir[axis], body.min[axis], body.max[axis]);
        if d.abs() < f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (mut t0, mut t1) = ((lo - o) / d, (hi - o) / d);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

impl WorldProbe for BoxWorld {
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<Entity> {
        self.bodies
            .iter()
            .filter(|body| on_layers(body, layers))
            .filter_map(|body| {
                ray_entry(body, origin, direction.as_vec2(), max_distance).map(|t| (t, body.entity))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, entity)| entity)
    }

    fn overlap(&self, shape: ProbeShape, center: Vec2, layers: LayerMask) -> Vec<Entity> {
        self.bodies
            .iter()
            .filter(|body| on_layers(body, layers))
            .filter(|body| match shape {
                ProbeShape::Circle { radius } => {
                    let nearest = center.clamp(body.min, body.max);
                    nearest.distance_squared(center) <= radius * radius
                }
                ProbeShape::Rect { half_extents } => {
                    let (min, max) = (center - half_extents, center + half_extents);
                    min.x <= body.max.x
                        && max.x >= body.min.x
                        && min.y <= body.max.y
                        && max.y >= body.min.y
                }
            })
            .map(|body| body.entity)
            .collect()
    }
}
