use cgmath::{InnerSpace, Point3};
use serde::Deserialize;

use crate::camera::Ray;

/// Intersection shape attached to a scene node. Stands in for the host
/// engine's physics colliders when scanning a scene snapshot.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Collider {
    Sphere { radius: f32 },
    Box { half_extents: [f32; 3] },
}

impl Collider {
    /// Distance along `ray` to the nearest hit of this collider centered at
    /// `center`, or `None` if the ray misses.
    pub fn intersect(&self, ray: &Ray, center: Point3<f32>) -> Option<f32> {
        match *self {
            Collider::Sphere { radius } => ray_sphere(ray, center, radius),
            Collider::Box { half_extents } => ray_aabb(ray, center, half_extents),
        }
    }
}

fn ray_sphere(ray: &Ray, center: Point3<f32>, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let t = -b - sqrt_d;
    if t >= 0.0 {
        return Some(t);
    }
    let t = -b + sqrt_d;
    if t >= 0.0 {
        Some(t)
    } else {
        None
    }
}

fn ray_aabb(ray: &Ray, center: Point3<f32>, half_extents: [f32; 3]) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let direction = ray.direction[axis];
        let min = center[axis] - half_extents[axis];
        let max = center[axis] + half_extents[axis];

        if direction.abs() < f32::EPSILON {
            if origin < min || origin > max {
                return None;
            }
            continue;
        }

        let inv = 1.0 / direction;
        let (t1, t2) = ((min - origin) * inv, (max - origin) * inv);
        let (t1, t2) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;
    }
    Some(if t_min >= 0.0 { t_min } else { t_max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn ray(origin: [f32; 3], direction: [f32; 3]) -> Ray {
        Ray {
            origin: Point3::new(origin[0], origin[1], origin[2]),
            direction: Vector3::new(direction[0], direction[1], direction[2]).normalize(),
        }
    }

    #[test]
    fn sphere_head_on_hit() {
        let collider = Collider::Sphere { radius: 1.0 };
        let r = ray([0.0, 0.0, -5.0], [0.0, 0.0, 1.0]);
        let t = collider.intersect(&r, Point3::new(0.0, 0.0, 0.0)).unwrap();
        assert!((t - 4.0).abs() < 1e-5, "got t = {t}");
    }

    #[test]
    fn sphere_miss() {
        let collider = Collider::Sphere { radius: 1.0 };
        let r = ray([0.0, 3.0, -5.0], [0.0, 0.0, 1.0]);
        assert!(collider.intersect(&r, Point3::new(0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn sphere_behind_ray_is_no_hit() {
        let collider = Collider::Sphere { radius: 1.0 };
        let r = ray([0.0, 0.0, 5.0], [0.0, 0.0, 1.0]);
        assert!(collider.intersect(&r, Point3::new(0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn sphere_origin_inside_hits_exit() {
        let collider = Collider::Sphere { radius: 2.0 };
        let r = ray([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        let t = collider.intersect(&r, Point3::new(0.0, 0.0, 0.0)).unwrap();
        assert!((t - 2.0).abs() < 1e-5, "got t = {t}");
    }

    #[test]
    fn aabb_head_on_hit() {
        let collider = Collider::Box {
            half_extents: [1.0, 1.0, 1.0],
        };
        let r = ray([0.0, 0.0, -5.0], [0.0, 0.0, 1.0]);
        let t = collider.intersect(&r, Point3::new(0.0, 0.0, 0.0)).unwrap();
        assert!((t - 4.0).abs() < 1e-5, "got t = {t}");
    }

    #[test]
    fn aabb_parallel_ray_outside_slab_misses() {
        let collider = Collider::Box {
            half_extents: [1.0, 1.0, 1.0],
        };
        let r = ray([0.0, 2.0, -5.0], [0.0, 0.0, 1.0]);
        assert!(collider.intersect(&r, Point3::new(0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn aabb_diagonal_hit() {
        let collider = Collider::Box {
            half_extents: [0.5, 0.5, 0.5],
        };
        let r = ray([-3.0, -3.0, -3.0], [1.0, 1.0, 1.0]);
        assert!(collider.intersect(&r, Point3::new(0.0, 0.0, 0.0)).is_some());
    }

    #[test]
    fn collider_deserializes_from_tagged_json() {
        let sphere: Collider = serde_json::from_str(r#"{"shape":"sphere","radius":2.5}"#).unwrap();
        assert!(matches!(sphere, Collider::Sphere { radius } if (radius - 2.5).abs() < 1e-6));

        let aabb: Collider =
            serde_json::from_str(r#"{"shape":"box","half_extents":[1.0,2.0,3.0]}"#).unwrap();
        assert!(matches!(aabb, Collider::Box { .. }));
    }
}
