//! Small 3D math for the scene: vectors, a perspective camera, pointer rays
//! and sphere hit-testing. Enough to place meshes, project them to the
//! viewport, and answer "what is under the pointer".

use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalized(self) -> Self {
        let length = self.length();
        if length <= f64::EPSILON {
            return Self::ZERO;
        }
        self * (1.0 / length)
    }

    pub fn lerp(self, target: Self, t: f64) -> Self {
        self + (target - self) * t
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    pub fn rotate_x(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x, self.y * cos - self.z * sin, self.y * sin + self.z * cos)
    }

    /// Rotation about the Y axis (right-handed, as in three.js).
    pub fn rotate_y(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos + self.z * sin, self.y, -self.x * sin + self.z * cos)
    }

    pub fn rotate_z(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos, self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Perspective camera looking down -Z from `position`, like the default
/// three.js camera the scenes are authored against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub fov_y_degrees: f64,
    pub aspect: f64,
}

impl Camera {
    pub fn new(position: Vec3, fov_y_degrees: f64, aspect: f64) -> Self {
        Self {
            position,
            fov_y_degrees,
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
        }
    }

    fn half_extents(&self) -> (f64, f64) {
        let half_height = (self.fov_y_degrees.to_radians() / 2.0).tan();
        (half_height * self.aspect, half_height)
    }

    /// Ray through a pointer position given in normalized device coordinates
    /// (`x` and `y` in -1..=1, `y` up).
    pub fn ray_from_ndc(&self, ndc_x: f64, ndc_y: f64) -> Ray {
        let (half_width, half_height) = self.half_extents();
        let direction = Vec3::new(ndc_x * half_width, ndc_y * half_height, -1.0).normalized();
        Ray {
            origin: self.position,
            direction,
        }
    }

    /// Projects a world point to NDC. `None` when the point is behind the camera.
    pub fn project(&self, point: Vec3) -> Option<(f64, f64)> {
        let relative = point - self.position;
        let depth = -relative.z;
        if depth <= f64::EPSILON {
            return None;
        }
        let (half_width, half_height) = self.half_extents();
        Some((
            relative.x / (depth * half_width),
            relative.y / (depth * half_height),
        ))
    }

    /// World-space size of one NDC unit at the given depth, used to scale
    /// sprites so they shrink with distance.
    pub fn perspective_scale(&self, point: Vec3) -> f64 {
        let depth = -(point - self.position).z;
        if depth <= f64::EPSILON {
            return 0.0;
        }
        let (_, half_height) = self.half_extents();
        1.0 / (depth * half_height)
    }
}

/// Converts a viewport pixel position to NDC.
pub fn pointer_to_ndc(client_x: f64, client_y: f64, width: f64, height: f64) -> (f64, f64) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    ((client_x / width) * 2.0 - 1.0, -(client_y / height) * 2.0 + 1.0)
}

/// A sphere tagged with a stable identifier so hits map straight back to the
/// thing they represent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitTarget<Id> {
    pub id: Id,
    pub center: Vec3,
    pub radius: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit<Id> {
    pub id: Id,
    pub distance: f64,
    pub point: Vec3,
}

fn intersect_sphere(ray: &Ray, center: Vec3, radius: f64) -> Option<f64> {
    let to_center = ray.origin - center;
    let b = to_center.dot(ray.direction);
    let c = to_center.dot(to_center) - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

/// Nearest target intersected by `ray`.
pub fn nearest_hit<Id: Copy>(ray: &Ray, targets: &[HitTarget<Id>]) -> Option<RayHit<Id>> {
    targets
        .iter()
        .filter_map(|target| {
            intersect_sphere(ray, target.center, target.radius).map(|distance| RayHit {
                id: target.id,
                distance,
                point: ray.origin + ray.direction * distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// The rendering collaborator's pointer query.
pub trait PointerHitTest<Id> {
    fn hit_test(&self, ndc_x: f64, ndc_y: f64) -> Option<RayHit<Id>>;
}

/// Hit-tester over a fixed set of tagged spheres seen through a camera.
pub struct SceneHitTester<Id> {
    pub camera: Camera,
    pub targets: Vec<HitTarget<Id>>,
}

impl<Id: Copy> PointerHitTest<Id> for SceneHitTester<Id> {
    fn hit_test(&self, ndc_x: f64, ndc_y: f64) -> Option<RayHit<Id>> {
        let ray = self.camera.ray_from_ndc(ndc_x, ndc_y);
        nearest_hit(&ray, &self.targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 8.0), 75.0, 1.0)
    }

    #[test]
    fn center_ray_points_down_negative_z() {
        let ray = camera().ray_from_ndc(0.0, 0.0);
        assert_eq!(ray.direction, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn project_inverts_ray_from_ndc() {
        let camera = camera();
        let ray = camera.ray_from_ndc(0.4, -0.3);
        let point = ray.origin + ray.direction * 6.0;
        let (x, y) = camera.project(point).expect("point is in front");
        assert!(approx(x, 0.4));
        assert!(approx(y, -0.3));
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        assert!(camera().project(Vec3::new(0.0, 0.0, 9.0)).is_none());
    }

    #[test]
    fn nearest_hit_prefers_closest_target() {
        let targets = [
            HitTarget { id: 1_u8, center: Vec3::new(0.0, 0.0, 0.0), radius: 0.5 },
            HitTarget { id: 2_u8, center: Vec3::new(0.0, 0.0, 3.0), radius: 0.5 },
            HitTarget { id: 3_u8, center: Vec3::new(4.0, 0.0, 0.0), radius: 0.5 },
        ];
        let hit = nearest_hit(&camera().ray_from_ndc(0.0, 0.0), &targets).expect("ray hits");

        assert_eq!(hit.id, 2);
        assert!(approx(hit.distance, 4.5));
        assert!(approx(hit.point.z, 3.5));
    }

    #[test]
    fn miss_returns_none() {
        let targets = [HitTarget { id: 0_u8, center: Vec3::new(5.0, 5.0, 0.0), radius: 0.3 }];
        assert!(nearest_hit(&camera().ray_from_ndc(0.0, 0.0), &targets).is_none());
    }

    #[test]
    fn scene_hit_tester_uses_pointer_ndc() {
        let camera = camera();
        let target_center = Vec3::new(2.0, 1.0, 0.0);
        let (ndc_x, ndc_y) = camera.project(target_center).expect("in front");
        let tester = SceneHitTester {
            camera,
            targets: vec![HitTarget { id: "github", center: target_center, radius: 0.3 }],
        };

        let hit = tester.hit_test(ndc_x, ndc_y).expect("pointer over target");
        assert_eq!(hit.id, "github");
        assert!(hit.distance < camera.position.distance(target_center));
    }

    #[test]
    fn quarter_turns_move_axes() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        let half_pi = std::f64::consts::FRAC_PI_2;

        let turned = x.rotate_z(half_pi);
        assert!(approx(turned.x, 0.0) && approx(turned.y, 1.0));
        let turned = y.rotate_x(half_pi);
        assert!(approx(turned.y, 0.0) && approx(turned.z, 1.0));
        let turned = x.rotate_y(half_pi);
        assert!(approx(turned.x, 0.0) && approx(turned.z, -1.0));
    }

    #[test]
    fn pointer_to_ndc_maps_corners() {
        assert_eq!(pointer_to_ndc(0.0, 0.0, 800.0, 600.0), (-1.0, 1.0));
        assert_eq!(pointer_to_ndc(800.0, 600.0, 800.0, 600.0), (1.0, -1.0));
        assert_eq!(pointer_to_ndc(400.0, 300.0, 800.0, 600.0), (0.0, 0.0));
    }
}
