use cgmath::{perspective, Deg, InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3, Vector4};
use serde::Deserialize;

const DEFAULT_FOV_Y_DEGREES: f32 = 60.0;
const DEFAULT_ASPECT: f32 = 16.0 / 9.0;
const ZNEAR: f32 = 0.1;
const ZFAR: f32 = 1000.0;

/// Normalized 2D position of a world point as projected through the camera.
/// On-screen points land in [0,1] on each axis; off-screen points fall
/// outside that range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportPoint {
    pub x: f32,
    pub y: f32,
}

impl ViewportPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// World-space ray with unit direction.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

/// Camera parameters as they appear in a scene file.
#[derive(Clone, Debug, Deserialize)]
pub struct CameraSpec {
    pub position: [f32; 3],
    pub target: [f32; 3],
    #[serde(default = "default_fov_y")]
    pub fov_y_degrees: f32,
    #[serde(default = "default_aspect")]
    pub aspect: f32,
}

fn default_fov_y() -> f32 {
    DEFAULT_FOV_Y_DEGREES
}

fn default_aspect() -> f32 {
    DEFAULT_ASPECT
}

/// Perspective camera used to project scene nodes into viewport space and to
/// cast scan rays back out through viewport points.
#[derive(Clone, Debug)]
pub struct Camera {
    view_proj: Matrix4<f32>,
    inv_view_proj: Matrix4<f32>,
}

impl Camera {
    pub fn new(eye: Point3<f32>, target: Point3<f32>, fov_y_degrees: f32, aspect: f32) -> Self {
        let view = Matrix4::look_at_rh(eye, target, Vector3::unit_y());
        let proj = perspective(Rad::from(Deg(fov_y_degrees)), aspect, ZNEAR, ZFAR);
        let view_proj = proj * view;
        let inv_view_proj = view_proj
            .invert()
            .expect("perspective view-projection is invertible");
        Self {
            view_proj,
            inv_view_proj,
        }
    }

    pub fn from_spec(spec: &CameraSpec) -> Self {
        Self::new(
            Point3::new(spec.position[0], spec.position[1], spec.position[2]),
            Point3::new(spec.target[0], spec.target[1], spec.target[2]),
            spec.fov_y_degrees,
            spec.aspect,
        )
    }

    /// Project a world point to normalized viewport coordinates.
    /// Returns `None` for points at or behind the camera plane.
    pub fn world_to_viewport(&self, world: Point3<f32>) -> Option<ViewportPoint> {
        let clip = self.view_proj * world.to_homogeneous();
        if clip.w <= 0.0 {
            return None;
        }
        Some(ViewportPoint::new(
            (clip.x / clip.w + 1.0) * 0.5,
            (clip.y / clip.w + 1.0) * 0.5,
        ))
    }

    /// Un-project a viewport point into a world-space ray from the near plane
    /// toward the far plane.
    pub fn viewport_point_to_ray(&self, point: ViewportPoint) -> Ray {
        let ndc_x = point.x * 2.0 - 1.0;
        let ndc_y = point.y * 2.0 - 1.0;
        let near = Point3::from_homogeneous(self.inv_view_proj * Vector4::new(ndc_x, ndc_y, -1.0, 1.0));
        let far = Point3::from_homogeneous(self.inv_view_proj * Vector4::new(ndc_x, ndc_y, 1.0, 1.0));
        Ray {
            origin: near,
            direction: (far - near).normalize(),
        }
    }
}
