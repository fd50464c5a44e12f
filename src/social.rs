//! The social-links overlay: link nodes laid out around the avatar in one of
//! three arrangements, animated between them, with pointer proximity
//! feedback drawn as a connector from the avatar toward the hovered node.

use std::f64::consts::{PI, TAU};
use std::time::Duration;

use crate::config::RuntimeConfig;
use crate::geometry::{Camera, HitTarget, PointerHitTest, RayHit, SceneHitTester, Vec3};
use crate::motion::{Easing, Tween};

/// Index of a link in the content table. Hit targets carry it so a pointer
/// hit resolves straight to the link it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DockSide {
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    Arc,
    Docked(DockSide),
    Circle,
}

impl LayoutMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arc => "arc",
            Self::Docked(DockSide::Top) => "docked-top",
            Self::Docked(DockSide::Bottom) => "docked-bottom",
            Self::Circle => "circle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Compact,
    Medium,
    Wide,
}

impl Breakpoint {
    pub fn from_width(width_px: f64) -> Self {
        if width_px < 640.0 {
            Self::Compact
        } else if width_px < 1024.0 {
            Self::Medium
        } else {
            Self::Wide
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Medium => "medium",
            Self::Wide => "wide",
        }
    }

    pub fn metrics(self) -> LayoutMetrics {
        match self {
            Self::Compact => LayoutMetrics {
                arc_radius: 2.4,
                arc_span: 200_f64.to_radians(),
                circle_radius: 2.4,
                dock_offset: 3.6,
                dock_spacing: 0.9,
                node_radius: 0.22,
            },
            Self::Medium => LayoutMetrics {
                arc_radius: 3.0,
                arc_span: 200_f64.to_radians(),
                circle_radius: 3.0,
                dock_offset: 3.0,
                dock_spacing: 1.2,
                node_radius: 0.26,
            },
            Self::Wide => LayoutMetrics {
                arc_radius: 3.5,
                arc_span: 200_f64.to_radians(),
                circle_radius: 3.5,
                dock_offset: 3.0,
                dock_spacing: 1.4,
                node_radius: 0.3,
            },
        }
    }
}

/// World-space geometry for one breakpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    pub arc_radius: f64,
    /// Angular sweep of the arc, centred on straight up.
    pub arc_span: f64,
    pub circle_radius: f64,
    /// Distance of the docked row from the centre; up for `Top`, down for `Bottom`.
    pub dock_offset: f64,
    pub dock_spacing: f64,
    pub node_radius: f64,
}

/// Depth offset alternating by index in the circle layout.
const CIRCLE_DEPTH: f64 = 0.5;
/// Upper bound on the summed stagger so the last docked node still moves.
const MAX_TOTAL_STAGGER: f64 = 0.9;
const HOVER_SCALE: f64 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    Closed,
    InFlight,
    AlreadyThere,
    NotArc,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::InFlight => "in-flight",
            Self::AlreadyThere => "already-there",
            Self::NotArc => "not-arc",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionRequest {
    /// `via_arc` is set when the request was routed through the arc.
    Started { via_arc: bool },
    Rejected(RejectReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipRequest {
    Started,
    Rejected(RejectReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayEvent {
    /// An intermediate stop on a routed transition was reached.
    LegCompleted(LayoutMode),
    TransitionCompleted(LayoutMode),
    FlipCompleted,
}

/// What one call to [`SocialOverlay::sync_frame`] changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameUpdate {
    pub resized: Option<Breakpoint>,
    pub events: Vec<OverlayEvent>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Leg {
    from: LayoutMode,
    to: LayoutMode,
}

#[derive(Clone, Debug, PartialEq)]
struct Transition {
    legs: Vec<Leg>,
    leg_index: usize,
    tween: Tween,
}

impl Transition {
    fn leg(&self) -> Leg {
        self.legs[self.leg_index]
    }

    fn overall_progress(&self) -> f64 {
        (self.leg_index as f64 + self.tween.progress()) / self.legs.len() as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Flip {
    from: f64,
    tween: Tween,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SocialOverlay {
    link_count: usize,
    is_open: bool,
    layout_mode: LayoutMode,
    transition_progress: f64,
    rotation_offset: f64,
    hovered_link: Option<LinkId>,
    connector_end: Option<Vec3>,
    breakpoint: Breakpoint,
    metrics: LayoutMetrics,
    transition: Option<Transition>,
    flip: Option<Flip>,
    transition_duration: Duration,
    flip_duration: Duration,
    dock_stagger: f64,
    proximity_threshold: f64,
    max_interaction_distance: f64,
}

impl SocialOverlay {
    pub fn new(link_count: usize, config: &RuntimeConfig, viewport_width: f64) -> Self {
        let breakpoint = Breakpoint::from_width(viewport_width);
        Self {
            link_count,
            is_open: false,
            layout_mode: LayoutMode::Arc,
            transition_progress: 0.0,
            rotation_offset: 0.0,
            hovered_link: None,
            connector_end: None,
            breakpoint,
            metrics: breakpoint.metrics(),
            transition: None,
            flip: None,
            transition_duration: config.transition_duration,
            flip_duration: config.flip_duration,
            dock_stagger: config.dock_stagger,
            proximity_threshold: config.proximity_threshold,
            max_interaction_distance: config.max_interaction_distance,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    pub fn transition_progress(&self) -> f64 {
        self.transition_progress
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some() || self.flip.is_some()
    }

    /// Mode currently being animated toward, if any.
    pub fn transition_target(&self) -> Option<LayoutMode> {
        self.transition
            .as_ref()
            .and_then(|transition| transition.legs.last())
            .map(|leg| leg.to)
    }

    pub fn rotation_offset(&self) -> f64 {
        self.rotation_offset
    }

    pub fn hovered_link(&self) -> Option<LinkId> {
        self.hovered_link
    }

    pub fn connector_end(&self) -> Option<Vec3> {
        self.connector_end
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    pub fn link_count(&self) -> usize {
        self.link_count
    }

    /// Opens in the arc layout with every animation and hover state reset.
    pub fn open(&mut self) {
        self.is_open = true;
        self.layout_mode = LayoutMode::Arc;
        self.transition_progress = 0.0;
        self.rotation_offset = 0.0;
        self.clear_motion();
    }

    /// Closes and abandons any animation in flight.
    pub fn close(&mut self) {
        self.is_open = false;
        self.clear_motion();
    }

    fn clear_motion(&mut self) {
        self.transition = None;
        self.flip = None;
        self.hovered_link = None;
        self.connector_end = None;
    }

    /// Recomputes breakpoint geometry immediately. Returns the new breakpoint
    /// when it changed.
    pub fn set_viewport_width(&mut self, width_px: f64) -> Option<Breakpoint> {
        let breakpoint = Breakpoint::from_width(width_px);
        if breakpoint == self.breakpoint {
            return None;
        }
        self.breakpoint = breakpoint;
        self.metrics = breakpoint.metrics();
        Some(breakpoint)
    }

    pub fn request_transition(&mut self, target: LayoutMode, now_ms: f64) -> TransitionRequest {
        if !self.is_open {
            return TransitionRequest::Rejected(RejectReason::Closed);
        }
        if self.is_transitioning() {
            return TransitionRequest::Rejected(RejectReason::InFlight);
        }
        if target == self.layout_mode {
            return TransitionRequest::Rejected(RejectReason::AlreadyThere);
        }

        let from = self.layout_mode;
        let via_arc = from != LayoutMode::Arc && target != LayoutMode::Arc;
        let legs = if via_arc {
            vec![
                Leg {
                    from,
                    to: LayoutMode::Arc,
                },
                Leg {
                    from: LayoutMode::Arc,
                    to: target,
                },
            ]
        } else {
            vec![Leg { from, to: target }]
        };

        self.transition = Some(Transition {
            legs,
            leg_index: 0,
            tween: Tween::start(now_ms, self.transition_duration, Easing::EaseInOutCubic),
        });
        self.transition_progress = 0.0;

        TransitionRequest::Started { via_arc }
    }

    /// Turns the arc half a revolution. Only available on a settled arc.
    pub fn flip(&mut self, now_ms: f64) -> FlipRequest {
        if !self.is_open {
            return FlipRequest::Rejected(RejectReason::Closed);
        }
        if self.is_transitioning() {
            return FlipRequest::Rejected(RejectReason::InFlight);
        }
        if self.layout_mode != LayoutMode::Arc {
            return FlipRequest::Rejected(RejectReason::NotArc);
        }

        self.flip = Some(Flip {
            from: self.rotation_offset,
            tween: Tween::start(now_ms, self.flip_duration, Easing::EaseInOutCubic),
        });
        FlipRequest::Started
    }

    /// One display frame: applies the viewport width, samples animations and
    /// resolves the last pointer position (`None` once it left the overlay)
    /// against the current layout. Repeating a frame reports nothing new.
    pub fn sync_frame(
        &mut self,
        now_ms: f64,
        viewport_width: f64,
        camera: Camera,
        pointer_ndc: Option<(f64, f64)>,
    ) -> FrameUpdate {
        let resized = self.set_viewport_width(viewport_width);
        let events = self.advance(now_ms);
        let hit = pointer_ndc.and_then(|(x, y)| self.hit_tester(camera).hit_test(x, y));
        self.update_pointer(hit);
        FrameUpdate { resized, events }
    }

    /// Samples running animations at `now_ms`. A closed overlay is never
    /// written to.
    pub fn advance(&mut self, now_ms: f64) -> Vec<OverlayEvent> {
        let mut events = Vec::new();
        if !self.is_open {
            return events;
        }

        if let Some(mut flip) = self.flip.take() {
            flip.tween.sample(now_ms);
            if flip.tween.is_finished() {
                self.rotation_offset = (flip.from + PI).rem_euclid(TAU);
                events.push(OverlayEvent::FlipCompleted);
            } else {
                self.rotation_offset = flip.from + PI * flip.tween.eased();
                self.flip = Some(flip);
            }
        }

        if let Some(mut transition) = self.transition.take() {
            loop {
                transition.tween.sample(now_ms);
                if !transition.tween.is_finished() {
                    self.transition_progress = transition.overall_progress();
                    self.transition = Some(transition);
                    break;
                }

                let leg = transition.leg();
                self.layout_mode = leg.to;
                if transition.leg_index + 1 == transition.legs.len() {
                    self.transition_progress = 1.0;
                    events.push(OverlayEvent::TransitionCompleted(leg.to));
                    break;
                }

                events.push(OverlayEvent::LegCompleted(leg.to));
                transition.leg_index += 1;
                transition.tween = Tween::start(
                    transition.tween.end_ms(),
                    self.transition_duration,
                    Easing::EaseInOutCubic,
                );
            }
        }

        events
    }

    /// Settled position of a link in `mode`.
    pub fn resting_position(&self, mode: LayoutMode, link: LinkId) -> Vec3 {
        let count = self.link_count.max(1) as f64;
        let index = link.0 as f64;
        let metrics = &self.metrics;

        match mode {
            LayoutMode::Arc => {
                let step = if self.link_count > 1 {
                    metrics.arc_span / (count - 1.0)
                } else {
                    0.0
                };
                let start = if self.link_count > 1 {
                    PI / 2.0 + metrics.arc_span / 2.0
                } else {
                    PI / 2.0
                };
                let angle = start - step * index + self.rotation_offset;
                Vec3::new(
                    angle.cos() * metrics.arc_radius,
                    angle.sin() * metrics.arc_radius,
                    0.0,
                )
            }
            LayoutMode::Docked(side) => {
                let slot = dock_slot(side, link.0, self.link_count) as f64;
                let y = match side {
                    DockSide::Top => metrics.dock_offset,
                    DockSide::Bottom => -metrics.dock_offset,
                };
                Vec3::new((slot - (count - 1.0) / 2.0) * metrics.dock_spacing, y, 0.0)
            }
            LayoutMode::Circle => {
                let angle = TAU * index / count;
                let z = if link.0 % 2 == 0 {
                    CIRCLE_DEPTH
                } else {
                    -CIRCLE_DEPTH
                };
                Vec3::new(
                    angle.cos() * metrics.circle_radius,
                    angle.sin() * metrics.circle_radius,
                    z,
                )
            }
        }
    }

    /// Where a link is drawn right now, including any running transition.
    pub fn link_position(&self, link: LinkId) -> Vec3 {
        let Some(transition) = &self.transition else {
            return self.resting_position(self.layout_mode, link);
        };

        let leg = transition.leg();
        let raw = transition.tween.progress();
        let local = match leg.to {
            LayoutMode::Docked(side) => self.staggered(raw, dock_slot(side, link.0, self.link_count)),
            LayoutMode::Arc | LayoutMode::Circle => raw,
        };
        let eased = Easing::EaseInOutCubic.apply(local);

        self.resting_position(leg.from, link)
            .lerp(self.resting_position(leg.to, link), eased)
    }

    /// Per-link progress for a docking leg: each slot waits its share of the
    /// stagger, then catches up so every link lands at the end of the leg.
    fn staggered(&self, raw: f64, slot: usize) -> f64 {
        if self.link_count < 2 {
            return raw;
        }
        let total = (self.dock_stagger * (self.link_count - 1) as f64).min(MAX_TOTAL_STAGGER);
        let delay = total * slot as f64 / (self.link_count - 1) as f64;
        ((raw - delay) / (1.0 - total)).clamp(0.0, 1.0)
    }

    pub fn link_positions(&self) -> Vec<Vec3> {
        (0..self.link_count)
            .map(|index| self.link_position(LinkId(index)))
            .collect()
    }

    pub fn node_scale(&self, link: LinkId) -> f64 {
        if self.hovered_link == Some(link) {
            HOVER_SCALE
        } else {
            1.0
        }
    }

    pub fn hit_targets(&self) -> Vec<HitTarget<LinkId>> {
        (0..self.link_count)
            .map(LinkId)
            .map(|id| HitTarget {
                id,
                center: self.link_position(id),
                radius: self.metrics.node_radius * self.node_scale(id),
            })
            .collect()
    }

    pub fn hit_tester(&self, camera: Camera) -> SceneHitTester<LinkId> {
        SceneHitTester {
            camera,
            targets: self.hit_targets(),
        }
    }

    pub fn proximity(&self, distance: f64) -> f64 {
        (1.0 - distance / self.max_interaction_distance).max(0.0)
    }

    /// Applies the nearest pointer hit. Hover and connector are set only when
    /// the hit is close enough; otherwise both are cleared.
    pub fn update_pointer(&mut self, hit: Option<RayHit<LinkId>>) {
        if !self.is_open {
            return;
        }

        let feedback = hit
            .filter(|hit| hit.id.0 < self.link_count)
            .map(|hit| (hit.id, self.proximity(hit.distance)))
            .filter(|(_, proximity)| *proximity > self.proximity_threshold);

        match feedback {
            Some((id, proximity)) => {
                self.hovered_link = Some(id);
                self.connector_end = Some(Vec3::ZERO.lerp(self.link_position(id), proximity));
            }
            None => {
                self.hovered_link = None;
                self.connector_end = None;
            }
        }
    }
}

/// Left-to-right slot of a link in a docked row. The bottom dock reverses
/// the order, and the stagger follows the slot.
fn dock_slot(side: DockSide, index: usize, count: usize) -> usize {
    match side {
        DockSide::Top => index,
        DockSide::Bottom => count.saturating_sub(1).saturating_sub(index),
    }
}
