use std::collections::{HashMap, HashSet};

use vantage_core::camera::{Camera, Ray, ViewportPoint};
use vantage_core::scene::{NodeId, SceneGraph};

/// Ray grid cast through the viewport. Deltas use `n + 2` in the denominator
/// so a one-delta border at every screen edge receives no rays.
#[derive(Clone, Copy, Debug)]
pub struct ScanGrid {
    pub num_x_rays: u32,
    pub num_y_rays: u32,
}

impl ScanGrid {
    pub fn new(num_x_rays: u32, num_y_rays: u32) -> Self {
        Self {
            num_x_rays,
            num_y_rays,
        }
    }

    /// Viewport sample points, row-major with y as the outer axis.
    pub fn sample_points(&self) -> Vec<ViewportPoint> {
        let delta_x = 1.0 / (self.num_x_rays + 2) as f32;
        let delta_y = 1.0 / (self.num_y_rays + 2) as f32;
        let mut points = Vec::with_capacity((self.num_x_rays * self.num_y_rays) as usize);

        let mut y = 0.0_f32;
        for _ in 0..self.num_y_rays {
            y += delta_y;
            let mut x = 0.0_f32;
            for _ in 0..self.num_x_rays {
                x += delta_x;
                points.push(ViewportPoint::new(x, y));
            }
        }
        points
    }
}

/// Nearest collider hit across the whole scene, described or not.
fn nearest_hit(scene: &SceneGraph, ray: &Ray) -> Option<NodeId> {
    let mut best: Option<(f32, NodeId)> = None;
    for (id, node) in scene.iter() {
        let Some(collider) = node.collider else {
            continue;
        };
        if let Some(t) = collider.intersect(ray, node.position) {
            if best.map_or(true, |(best_t, _)| t < best_t) {
                best = Some((t, id));
            }
        }
    }
    best.map(|(_, id)| id)
}

/// Scan for described nodes within the camera's view.
/// Undescribed geometry still occludes whatever is behind it.
pub fn scan(scene: &SceneGraph, camera: &Camera, grid: &ScanGrid) -> HashSet<NodeId> {
    let mut hits: HashSet<NodeId> = HashSet::new();
    for point in grid.sample_points() {
        let ray = camera.viewport_point_to_ray(point);
        if let Some(id) = nearest_hit(scene, &ray) {
            hits.insert(id);
        }
    }
    hits.retain(|id| scene.is_described(*id));
    hits
}

/// Scan variant that also reports where each node appeared: the mean
/// viewport position of the rays that hit it.
pub fn scan_with_positions(
    scene: &SceneGraph,
    camera: &Camera,
    grid: &ScanGrid,
) -> HashMap<NodeId, ViewportPoint> {
    let mut sums: HashMap<NodeId, (f32, f32, u32)> = HashMap::new();
    for point in grid.sample_points() {
        let ray = camera.viewport_point_to_ray(point);
        if let Some(id) = nearest_hit(scene, &ray) {
            let entry = sums.entry(id).or_insert((0.0, 0.0, 0));
            entry.0 += point.x;
            entry.1 += point.y;
            entry.2 += 1;
        }
    }

    sums.into_iter()
        .filter(|(id, _)| scene.is_described(*id))
        .map(|(id, (x_sum, y_sum, count))| {
            (
                id,
                ViewportPoint::new(x_sum / count as f32, y_sum / count as f32),
            )
        })
        .collect()
}
