//! Spatial domain: the query seam every actor senses the world through.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Shape of an overlap query, centred on the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeShape {
    Circle { radius: f32 },
    Rect { half_extents: Vec2 },
}

impl ProbeShape {
    pub fn collider(&self) -> Collider {
        match *self {
            ProbeShape::Circle { radius } => Collider::circle(radius),
            ProbeShape::Rect { half_extents } => {
                Collider::rectangle(half_extents.x * 2.0, half_extents.y * 2.0)
            }
        }
    }
}

pub trait WorldProbe {
    /// First entity on `layers` hit by the ray, if any.
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<Entity>;

    /// Every entity on `layers` intersecting `shape` placed at `center`.
    fn overlap(&self, shape: ProbeShape, center: Vec2, layers: LayerMask) -> Vec<Entity>;
}

impl WorldProbe for SpatialQuery<'_, '_> {
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<Entity> {
        let filter = SpatialQueryFilter::from_mask(layers);
        SpatialQuery::cast_ray(self, origin, direction, max_distance, true, &filter)
            .map(|hit| hit.entity)
    }

    fn overlap(&self, shape: ProbeShape, center: Vec2, layers: LayerMask) -> Vec<Entity> {
        let filter = SpatialQueryFilter::from_mask(layers);
        self.shape_intersections(&shape.collider(), center, 0.0, &filter)
    }
}

/// Result of the two forward probes used for stair stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepProbe {
    pub lower: bool,
    pub upper: bool,
}

impl StepProbe {
    /// Something blocks the feet but the space one step up is clear.
    pub fn can_climb(&self) -> bool {
        self.lower && !self.upper
    }
}

pub fn facing_dir(facing: f32) -> Dir2 {
    if facing < 0.0 { Dir2::NEG_X } else { Dir2::X }
}

/// Downward rays from each foot point, OR'd together.
pub fn sense_ground(
    probe: &impl WorldProbe,
    origin: Vec2,
    feet: [Vec2; 2],
    distance: f32,
    layers: LayerMask,
) -> bool {
    feet.iter()
        .any(|foot| probe.cast_ray(origin + *foot, Dir2::NEG_Y, distance, layers).is_some())
}

/// Short forward ray starting `offset` units ahead of the body centre.
pub fn sense_wall(
    probe: &impl WorldProbe,
    origin: Vec2,
    facing: f32,
    offset: f32,
    reach: f32,
    layers: LayerMask,
) -> bool {
    let start = origin + Vec2::new(facing.signum() * offset, 0.0);
    probe
        .cast_ray(start, facing_dir(facing), reach, layers)
        .is_some()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepGeometry {
    /// Horizontal distance from the body centre to its leading edge.
    pub lead: f32,
    /// How far below the centre the lower probe starts.
    pub drop: f32,
    pub step_height: f32,
    pub check_distance: f32,
}

pub fn sense_step(
    probe: &impl WorldProbe,
    origin: Vec2,
    facing: f32,
    geometry: &StepGeometry,
    layers: LayerMask,
) -> StepProbe {
    let dir = facing_dir(facing);
    let lead = Vec2::new(facing.signum() * geometry.lead, 0.0);
    let lower_start = origin + lead - Vec2::Y * geometry.drop;
    let upper_start = origin + lead + Vec2::Y * geometry.step_height;
    StepProbe {
        lower: probe
            .cast_ray(lower_start, dir, geometry.check_distance, layers)
            .is_some(),
        upper: probe
            .cast_ray(upper_start, dir, geometry.check_distance, layers)
            .is_some(),
    }
}
