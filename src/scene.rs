//! Decorative scene objects. Each one is static parameters plus a pure
//! function of elapsed time (and, for a few, hover/press flags) that yields
//! its transform and material for the current frame.

use std::f64::consts::TAU;

use crate::geometry::Vec3;

pub const ACCENT_PALETTE: [&str; 5] = ["#10b981", "#3b82f6", "#ef4444", "#f59e0b", "#8b5cf6"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f64,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Maps a local point to world space: scale, then XYZ Euler rotation,
    /// then translation.
    pub fn apply(&self, local: Vec3) -> Vec3 {
        (local * self.scale)
            .rotate_z(self.rotation.z)
            .rotate_y(self.rotation.y)
            .rotate_x(self.rotation.x)
            + self.position
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material<'a> {
    pub color: &'a str,
    pub opacity: f64,
    pub emissive_intensity: f64,
    pub wireframe: bool,
}

impl<'a> Material<'a> {
    const fn solid(color: &'a str, opacity: f64, emissive_intensity: f64) -> Self {
        Self {
            color,
            opacity,
            emissive_intensity,
            wireframe: false,
        }
    }
}

/// Pointer state for objects that react to the user.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Interaction {
    pub hovered: bool,
    /// Elapsed time at which the pointer went down, while it is held.
    pub pressed_at: Option<f64>,
}

/// Gentle bob and tilt applied on top of an object's own motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatMotion {
    pub speed: f64,
    pub rotation_intensity: f64,
    pub float_intensity: f64,
}

impl FloatMotion {
    pub const fn new(speed: f64, rotation_intensity: f64, float_intensity: f64) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
        }
    }

    pub fn apply(&self, transform: Transform, elapsed: f64, phase: f64) -> Transform {
        let t = (elapsed + phase) / 4.0 * self.speed;
        let tilt = Vec3::new(
            t.cos() / 8.0 * self.rotation_intensity,
            t.sin() / 8.0 * self.rotation_intensity,
            t.sin() / 20.0 * self.rotation_intensity,
        );
        let bob = (t.sin() / 10.0 * self.float_intensity).clamp(-0.1, 0.1);

        Transform {
            position: transform.position + Vec3::new(0.0, bob, 0.0),
            rotation: transform.rotation + tilt,
            scale: transform.scale,
        }
    }
}

/// Octahedra scattered behind the hero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingShape {
    pub position: Vec3,
    pub color: &'static str,
}

pub const HERO_SHAPES: [FloatingShape; 5] = [
    FloatingShape { position: Vec3::new(-4.0, 2.0, -2.0), color: "#10b981" },
    FloatingShape { position: Vec3::new(4.0, -2.0, -3.0), color: "#3b82f6" },
    FloatingShape { position: Vec3::new(2.0, 3.0, -1.0), color: "#ef4444" },
    FloatingShape { position: Vec3::new(-3.0, -1.0, -4.0), color: "#f59e0b" },
    FloatingShape { position: Vec3::new(0.0, -3.0, -2.0), color: "#8b5cf6" },
];

const HERO_FLOAT: FloatMotion = FloatMotion::new(2.0, 1.0, 2.0);

impl FloatingShape {
    pub fn transform(&self, elapsed: f64, index: usize) -> Transform {
        let base = Transform {
            position: self.position,
            rotation: Vec3::new(elapsed * 0.2, elapsed * 0.3, 0.0),
            scale: 1.0,
        };
        HERO_FLOAT.apply(base, elapsed, index as f64)
    }

    pub fn material(&self, dark: bool) -> Material<'static> {
        if dark {
            Material::solid(self.color, 0.8, 0.2)
        } else {
            Material::solid(self.color, 0.6, 0.1)
        }
    }
}

pub const TECH_ORBIT_SLOTS: usize = 16;
const TECH_ORBIT_RADIUS: f64 = 3.0;

/// Skill badge circling the tech-orbit core and always facing it.
pub fn orbiting_skill(index: usize, elapsed: f64) -> Transform {
    let angle = (index as f64 / TECH_ORBIT_SLOTS as f64) * TAU + elapsed * 0.3;
    let position = Vec3::new(
        angle.cos() * TECH_ORBIT_RADIUS,
        (elapsed + index as f64).sin() * 0.5,
        angle.sin() * TECH_ORBIT_RADIUS,
    );
    Transform {
        position,
        rotation: Vec3::new(0.0, (-position.x).atan2(-position.z), 0.0),
        scale: 1.0,
    }
}

pub fn orbiting_skill_material(index: usize) -> Material<'static> {
    let color = ACCENT_PALETTE[index % ACCENT_PALETTE.len()];
    Material::solid(color, 0.2, 0.1)
}

pub fn tech_orbit_core_rotation(elapsed: f64) -> f64 {
    elapsed * 0.1
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HologramRing {
    pub radius: f64,
    pub speed: f64,
    pub color: &'static str,
}

pub const HOLOGRAM_RINGS: [HologramRing; 3] = [
    HologramRing { radius: 1.5, speed: 0.5, color: "#10b981" },
    HologramRing { radius: 2.0, speed: -0.3, color: "#3b82f6" },
    HologramRing { radius: 2.5, speed: 0.2, color: "#ef4444" },
];

impl HologramRing {
    pub fn transform(&self, elapsed: f64) -> Transform {
        Transform {
            position: Vec3::ZERO,
            rotation: Vec3::new(0.0, 0.0, elapsed * self.speed),
            scale: 1.0,
        }
    }

    pub fn material(&self) -> Material<'static> {
        Material::solid(self.color, 0.7, 0.5)
    }
}

pub fn hologram_rotation(elapsed: f64) -> f64 {
    elapsed * 0.2
}

pub const DATA_NODE_COUNT: usize = 8;
const DATA_NODE_RADIUS: f64 = 2.0;
const DATA_NODE_COLORS: [&str; 4] = ["#10b981", "#3b82f6", "#ef4444", "#f59e0b"];
const DATA_NODE_FLOAT: FloatMotion = FloatMotion::new(2.0, 1.0, 2.0);

pub fn data_node(index: usize, elapsed: f64) -> (Transform, Material<'static>) {
    let angle = (index as f64 / DATA_NODE_COUNT as f64) * TAU;
    let base = Transform::at(Vec3::new(
        angle.cos() * DATA_NODE_RADIUS,
        angle.sin() * DATA_NODE_RADIUS,
        0.0,
    ));
    let color = DATA_NODE_COLORS[index % DATA_NODE_COLORS.len()];
    (
        DATA_NODE_FLOAT.apply(base, elapsed, index as f64),
        Material::solid(color, 0.9, 0.8),
    )
}

pub const SKILL_ORB_COUNT: usize = 8;
const SKILL_ORB_RADIUS: f64 = 4.0;

pub fn skill_orb(index: usize, elapsed: f64) -> Transform {
    let angle = (index as f64 / SKILL_ORB_COUNT as f64) * TAU;
    Transform {
        position: Vec3::new(
            angle.cos() * SKILL_ORB_RADIUS,
            (elapsed + index as f64).sin() * 0.5,
            angle.sin() * SKILL_ORB_RADIUS,
        ),
        rotation: Vec3::new(0.0, elapsed * 0.5 + index as f64, 0.0),
        scale: 1.0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Octahedron,
    Torus,
    Icosahedron,
}

impl ShapeKind {
    pub fn for_project(index: usize) -> Self {
        match index {
            1 => Self::Torus,
            2 => Self::Icosahedron,
            _ => Self::Octahedron,
        }
    }
}

/// Spinning preview shape on a project card.
pub fn project_shape(index: usize, elapsed: f64, interaction: Interaction) -> Transform {
    let phase = index as f64;
    Transform {
        position: Vec3::new(0.0, (elapsed + phase).sin() * 0.2, 0.0),
        rotation: Vec3::new(elapsed * 0.3 + phase, elapsed * 0.2 + phase, 0.0),
        scale: if interaction.hovered { 1.2 } else { 1.0 },
    }
}

pub fn project_shape_material(color: &str, interaction: Interaction) -> Material<'_> {
    if interaction.hovered {
        Material {
            color,
            opacity: 0.9,
            emissive_intensity: 0.4,
            wireframe: true,
        }
    } else {
        Material::solid(color, 0.7, 0.2)
    }
}

/// Row of cubes in the projects backdrop, centered on the middle project.
pub fn project_cube(index: usize, elapsed: f64) -> Transform {
    let phase = index as f64;
    Transform {
        position: Vec3::new((phase - 1.0) * 4.0, 0.0, -5.0),
        rotation: Vec3::new(elapsed * 0.3 + phase, elapsed * 0.2 + phase, 0.0),
        scale: 1.0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    Laptop,
    Smartphone,
    Server,
}

impl ModelKind {
    pub fn hover_hint(self) -> &'static str {
        match self {
            Self::Laptop => "Click and drag to rotate",
            Self::Smartphone => "Mobile-first development",
            Self::Server => "Scalable backend infrastructure",
        }
    }

    fn hover_scale(self) -> f64 {
        match self {
            Self::Laptop | Self::Smartphone => 1.1,
            Self::Server => 1.05,
        }
    }

    fn idle_pose(self, t: f64) -> (f64, f64) {
        match self {
            Self::Laptop => ((t * 0.5).sin() * 0.1, 0.0),
            Self::Smartphone => ((t * 0.3).sin() * 0.2, (t * 0.5).sin() * 0.1),
            Self::Server => ((t * 0.4).sin() * 0.15, 0.0),
        }
    }
}

/// Device mockup. Idles with a slow sway; while pressed the pose holds at the
/// moment the pointer went down.
pub fn interactive_model(kind: ModelKind, elapsed: f64, interaction: Interaction) -> Transform {
    let pose_time = interaction.pressed_at.unwrap_or(elapsed);
    let (yaw, lift) = kind.idle_pose(pose_time);
    Transform {
        position: Vec3::new(0.0, lift, 0.0),
        rotation: Vec3::new(0.0, yaw, 0.0),
        scale: if interaction.hovered { kind.hover_scale() } else { 1.0 },
    }
}

/// Emissive level of the blinking red LED on a server unit.
pub fn server_led_intensity(unit: usize, elapsed: f64) -> f64 {
    if (elapsed * 10.0 + unit as f64).sin() > 0.0 {
        0.5
    } else {
        0.1
    }
}

pub const TERMINAL_CUBES: [Vec3; 3] = [
    Vec3::new(-3.0, 0.0, -3.0),
    Vec3::new(3.0, 2.0, -5.0),
    Vec3::new(0.0, -2.0, -4.0),
];

const TERMINAL_CUBE_FLOAT: FloatMotion = FloatMotion::new(0.5, 0.1, 0.5);

pub fn terminal_cube(index: usize, elapsed: f64) -> Transform {
    let position = TERMINAL_CUBES[index % TERMINAL_CUBES.len()];
    let base = Transform {
        position,
        rotation: Vec3::new(elapsed * 0.05, elapsed * 0.08, 0.0),
        scale: 1.0,
    };
    TERMINAL_CUBE_FLOAT.apply(base, elapsed, index as f64)
}

/// Slow self-rotation of a social node about Y.
pub fn social_node_spin(elapsed: f64) -> f64 {
    (elapsed * 0.3).rem_euclid(TAU)
}

pub fn social_node_material(color: &str, hovered: bool) -> (f64, Material<'_>) {
    let scale = if hovered { 1.2 } else { 1.0 };
    let emissive = if hovered { 0.8 } else { 0.4 };
    (scale, Material::solid(color, 0.8, emissive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn transforms_are_pure_functions_of_time() {
        let shape = HERO_SHAPES[2];
        assert_eq!(shape.transform(3.25, 2), shape.transform(3.25, 2));
        assert_eq!(orbiting_skill(4, 10.0), orbiting_skill(4, 10.0));
        assert_eq!(terminal_cube(1, 7.0), terminal_cube(1, 7.0));
    }

    #[test]
    fn transform_scales_rotates_then_translates() {
        let transform = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2),
            scale: 2.0,
        };
        let world = transform.apply(Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(world.x, 1.0));
        assert!(approx(world.y, 4.0));
        assert!(approx(world.z, 3.0));
    }

    #[test]
    fn float_bob_is_bounded() {
        let motion = FloatMotion::new(2.0, 1.0, 50.0);
        for step in 0..200 {
            let t = step as f64 * 0.37;
            let moved = motion.apply(Transform::at(Vec3::ZERO), t, 0.0);
            assert!(moved.position.y.abs() <= 0.1);
        }
    }

    #[test]
    fn orbiting_skill_stays_on_radius_and_faces_center() {
        for index in 0..TECH_ORBIT_SLOTS {
            let transform = orbiting_skill(index, 5.5);
            let flat = Vec3::new(transform.position.x, 0.0, transform.position.z);
            assert!(approx(flat.length(), TECH_ORBIT_RADIUS));

            let facing = Vec3::new(0.0, 0.0, 1.0).rotate_y(transform.rotation.y);
            let toward_center = (flat * -1.0).normalized();
            assert!(approx(facing.dot(toward_center), 1.0));
        }
    }

    #[test]
    fn data_nodes_ring_the_hologram() {
        let (first, material) = data_node(0, 0.0);
        assert!(approx(first.position.x, 2.0));
        assert_eq!(material.color, "#10b981");
        let (_, fifth_material) = data_node(4, 0.0);
        assert_eq!(fifth_material.color, "#10b981");
    }

    #[test]
    fn hologram_rings_spin_in_their_own_direction() {
        let t = 2.0;
        assert!(HOLOGRAM_RINGS[0].transform(t).rotation.z > 0.0);
        assert!(HOLOGRAM_RINGS[1].transform(t).rotation.z < 0.0);
        assert!(approx(hologram_rotation(t), 0.4));
    }

    #[test]
    fn hovered_project_shape_grows_and_goes_wireframe() {
        let hovered = Interaction { hovered: true, pressed_at: None };
        assert_eq!(project_shape(0, 1.0, hovered).scale, 1.2);
        assert_eq!(project_shape(0, 1.0, Interaction::default()).scale, 1.0);
        assert!(project_shape_material("#10b981", hovered).wireframe);
        assert_eq!(ShapeKind::for_project(1), ShapeKind::Torus);
        assert_eq!(ShapeKind::for_project(9), ShapeKind::Octahedron);
    }

    #[test]
    fn pressed_model_holds_its_pose() {
        let pressed = Interaction { hovered: true, pressed_at: Some(2.0) };
        let at_press = interactive_model(ModelKind::Smartphone, 2.0, Interaction::default());
        let later = interactive_model(ModelKind::Smartphone, 9.0, pressed);

        assert_eq!(later.rotation, at_press.rotation);
        assert_eq!(later.position, at_press.position);
        assert_eq!(later.scale, 1.1);
        assert_eq!(
            interactive_model(ModelKind::Server, 0.0, Interaction { hovered: true, pressed_at: None }).scale,
            1.05
        );
    }

    #[test]
    fn server_led_blinks_between_two_levels() {
        let levels: Vec<f64> = (0..20)
            .map(|step| server_led_intensity(1, step as f64 * 0.05))
            .collect();
        assert!(levels.contains(&0.5));
        assert!(levels.contains(&0.1));
    }

    #[test]
    fn project_cubes_center_on_middle_index() {
        assert_eq!(project_cube(1, 0.0).position, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(project_cube(0, 0.0).position.x, -4.0);
    }

    #[test]
    fn social_node_feedback_levels() {
        let (scale, material) = social_node_material("#4195f6", true);
        assert_eq!(scale, 1.2);
        assert_eq!(material.emissive_intensity, 0.8);
        let (scale, material) = social_node_material("#4195f6", false);
        assert_eq!(scale, 1.0);
        assert_eq!(material.emissive_intensity, 0.4);
        assert!(social_node_spin(100.0) < TAU);
    }

    #[test]
    fn skill_orbs_bob_on_a_ring() {
        let transform = skill_orb(2, 0.0);
        assert!(approx(transform.position.z, SKILL_ORB_RADIUS));
        assert!(transform.position.y.abs() <= 0.5);
    }
}
