use tracing::debug;

use vantage_core::camera::Camera;
use vantage_core::scene::{NodeId, SceneGraph};

use crate::categorize::{categorize_viewport_positions, BucketGrid};
use crate::scan::{scan, ScanGrid};

/// Render the bucketed scene into per-cell text.
///
/// Each cell emits `"{y_label} {x_label}: "` followed by either `"nothing"`
/// or the comma-joined in-order representations of its nodes, then `". "`.
/// Empty category lists are treated as a single empty placeholder label.
pub fn scene_description(
    scene: &SceneGraph,
    grid: &BucketGrid,
    y_categories: &[String],
    x_categories: &[String],
) -> String {
    let placeholder = [String::new()];
    let y_labels: &[String] = if y_categories.is_empty() {
        &placeholder
    } else {
        y_categories
    };
    let x_labels: &[String] = if x_categories.is_empty() {
        &placeholder
    } else {
        x_categories
    };
    debug_assert_eq!(grid.rows(), y_labels.len());
    debug_assert_eq!(grid.cols(), x_labels.len());

    let mut out = String::new();
    for (row, y_label) in y_labels.iter().enumerate() {
        for (col, x_label) in x_labels.iter().enumerate() {
            out.push_str(y_label);
            out.push(' ');
            out.push_str(x_label);
            out.push_str(": ");

            let cell = grid.cell(row, col);
            if cell.is_empty() {
                out.push_str("nothing");
            } else {
                for id in cell {
                    out.push_str(&scene.inorder_representation(*id));
                    out.push_str(", ");
                }
                out.truncate(out.len() - 2);
            }
            out.push_str(". ");
        }
    }
    out
}

/// Full pipeline: scan the view, reduce hits to their roots, bucket the root
/// positions, render the cells.
pub fn describe_scene(
    scene: &SceneGraph,
    camera: &Camera,
    grid: &ScanGrid,
    x_categories: &[String],
    y_categories: &[String],
) -> String {
    let hits = scan(scene, camera, grid);
    let mut roots: Vec<NodeId> = scene.reduce_to_roots(hits).into_iter().collect();
    // Arena order keeps the rendered description reproducible across runs.
    roots.sort();

    let mut positions = Vec::with_capacity(roots.len());
    for id in roots {
        match camera.world_to_viewport(scene.node(id).position) {
            Some(viewport) => positions.push((id, viewport)),
            None => debug!(node = %scene.node(id).name, "root projects behind the camera; skipped"),
        }
    }

    let buckets = categorize_viewport_positions(x_categories.len(), y_categories.len(), &positions);
    scene_description(scene, &buckets, y_categories, x_categories)
}

/// Full prompt text around the scene description.
pub fn scenario(prologue: &str, scene_description: &str, epilogue: &str) -> String {
    format!("{prologue} The scene is described as follows. {scene_description}{epilogue}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;
    use vantage_core::collider::Collider;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn camera() -> Camera {
        Camera::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, -1.0),
            60.0,
            1.0,
        )
    }

    #[test]
    fn empty_cells_say_nothing() {
        let scene = SceneGraph::new();
        let grid = categorize_viewport_positions(2, 1, &[]);
        let text = scene_description(&scene, &grid, &labels(&["ahead"]), &labels(&["left", "right"]));
        assert_eq!(text, "ahead left: nothing. ahead right: nothing. ");
    }

    #[test]
    fn placeholder_labels_for_empty_category_lists() {
        let scene = SceneGraph::new();
        let grid = categorize_viewport_positions(0, 0, &[]);
        let text = scene_description(&scene, &grid, &[], &[]);
        assert_eq!(text, " : nothing. ");
    }

    #[test]
    fn occupied_cell_joins_nodes_with_comma() {
        let mut scene = SceneGraph::new();
        let a = scene.add_node(
            None,
            "a",
            Some("a lamp".into()),
            Point3::new(0.0, 0.0, 0.0),
            None,
        );
        let b = scene.add_node(
            None,
            "b",
            Some("a desk".into()),
            Point3::new(0.0, 0.0, 0.0),
            None,
        );
        let positions = vec![
            (a, vantage_core::camera::ViewportPoint::new(0.2, 0.5)),
            (b, vantage_core::camera::ViewportPoint::new(0.3, 0.5)),
        ];
        let grid = categorize_viewport_positions(1, 1, &positions);
        let text = scene_description(&scene, &grid, &labels(&["ahead"]), &labels(&["here"]));
        assert_eq!(text, "ahead here: a lamp, a desk. ");
    }

    #[test]
    fn describe_scene_places_visible_node() {
        let mut scene = SceneGraph::new();
        scene.add_node(
            None,
            "door",
            Some("a red door".into()),
            Point3::new(0.0, 0.0, -10.0),
            Some(Collider::Sphere { radius: 2.0 }),
        );

        let text = describe_scene(
            &scene,
            &camera(),
            &ScanGrid::new(20, 20),
            &labels(&["left", "middle", "right"]),
            &labels(&["low", "level", "high"]),
        );
        // Centered sphere: middle column, eye-level row.
        assert!(text.contains("level middle: a red door. "), "got {text:?}");
        assert!(text.contains("low left: nothing. "), "got {text:?}");
    }

    #[test]
    fn describe_scene_renders_whole_tree_from_its_root() {
        let mut scene = SceneGraph::new();
        let table = scene.add_node(
            None,
            "table",
            Some("a table".into()),
            Point3::new(0.0, 0.0, -10.0),
            Some(Collider::Sphere { radius: 2.0 }),
        );
        scene.add_node(
            Some(table),
            "mug",
            Some("holding a mug".into()),
            Point3::new(0.0, 1.0, -10.0),
            None,
        );

        let text = describe_scene(&scene, &camera(), &ScanGrid::new(20, 20), &[], &[]);
        assert_eq!(text, " : a table holding a mug. ");
    }

    #[test]
    fn scenario_wraps_description() {
        let text = scenario("You stand in a room.", "ahead: nothing. ", "Pick an option.");
        assert_eq!(
            text,
            "You stand in a room. The scene is described as follows. ahead: nothing. Pick an option."
        );
    }
}
