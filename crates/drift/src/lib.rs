#![deny(unsafe_code)]
//! Anti-gravity drift effect.
//!
//! A set of UI elements ("nodes") floats on idle sine drift, gets pulled
//! magnetically toward the cursor while hovered, and springs back with
//! damped physics when released. A lagged cursor follower trails the
//! pointer. Periodic micro-bounces nudge random un-hovered nodes so an idle
//! scene keeps breathing; the cadence is host-driven.
//!
//! The effect is headless: node transforms are queryable, and each frame
//! the nodes are painted as rectangle markers so the raster output shows
//! the motion.

pub mod tilt;

pub use tilt::{card_tilt, CardTilt};

use fx_engine_core::params::{param_f64, param_usize};
use fx_engine_core::{Effect, EffectError, Rgba, Surface, Xorshift64};
use glam::DVec2;
use serde_json::{json, Value};

/// Default damping factor applied to velocity each frame.
pub const DEFAULT_FRICTION: f64 = 0.12;
/// Default spring constant pulling a node toward its target offset.
pub const DEFAULT_SPRING: f64 = 0.08;
/// Default idle drift rate in radians per millisecond.
pub const DEFAULT_FLOAT_SPEED: f64 = 0.002;
/// Default cursor follower lag factor.
pub const DEFAULT_FOLLOWER_LAG: f64 = 0.15;

/// Idle drift amplitude in pixels.
const FLOAT_RANGE_PX: f64 = 4.0;
/// Pull factor toward the cursor for hovered magnetic nodes.
const MAGNETIC_PULL: f64 = 0.3;
/// Pull factor toward the cursor for hovered floating nodes.
const FLOATING_PULL: f64 = 0.15;
/// Tilt degrees at a full rect of pointer offset.
const HOVER_TILT_DEG: f64 = 15.0;
/// Easing factor for tilt per frame.
const TILT_EASE: f64 = 0.1;
/// Impulse range for a micro-bounce nudge, per axis.
const BOUNCE_IMPULSE: f64 = 5.0;

const BACKGROUND: Rgba = Rgba::opaque(25.0 / 255.0, 25.0 / 255.0, 25.0 / 255.0);
const MARKER: Rgba = Rgba {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 0.9,
};

/// Tunable physics constants.
#[derive(Debug, Clone, Copy)]
pub struct DriftParams {
    pub friction: f64,
    pub spring: f64,
    pub float_speed: f64,
    pub follower_lag: f64,
    /// Number of demo nodes synthesized at construction (hosts embedding
    /// the world add their own instead).
    pub node_count: usize,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            spring: DEFAULT_SPRING,
            float_speed: DEFAULT_FLOAT_SPEED,
            follower_lag: DEFAULT_FOLLOWER_LAG,
            node_count: 6,
        }
    }
}

impl DriftParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            friction: param_f64(params, "friction", d.friction),
            spring: param_f64(params, "spring", d.spring),
            float_speed: param_f64(params, "float_speed", d.float_speed),
            follower_lag: param_f64(params, "follower_lag", d.follower_lag),
            node_count: param_usize(params, "node_count", d.node_count),
        }
    }
}

/// Whether a node idles with sine drift or only reacts magnetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Drifts on idle and pulls moderately while hovered.
    Floating,
    /// Sits still on idle and pulls strongly while hovered (buttons).
    Magnetic,
}

/// A node's measured bounding box: center plus full width/height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRect {
    pub center: DVec2,
    pub size: DVec2,
}

/// One spring-driven element.
#[derive(Debug, Clone)]
pub struct DriftNode {
    rect: NodeRect,
    kind: NodeKind,
    offset: DVec2,
    velocity: DVec2,
    tilt: DVec2,
    float_phase: f64,
    float_speed: f64,
    hovered: bool,
}

impl DriftNode {
    /// The node's measured rect.
    pub fn rect(&self) -> NodeRect {
        self.rect
    }

    /// Floating or magnetic.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Current translation away from the resting position.
    pub fn offset(&self) -> DVec2 {
        self.offset
    }

    /// Current velocity.
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Current tilt in degrees: x is rotation about the horizontal axis,
    /// y about the vertical.
    pub fn tilt(&self) -> DVec2 {
        self.tilt
    }

    /// Whether the pointer is over this node.
    pub fn hovered(&self) -> bool {
        self.hovered
    }
}

/// The lagged cursor follower.
#[derive(Debug, Clone, Copy)]
pub struct CursorTracker {
    position: DVec2,
    target: DVec2,
}

impl CursorTracker {
    /// Where the follower currently is.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Where the pointer actually is.
    pub fn target(&self) -> DVec2 {
        self.target
    }
}

/// The drift world: nodes, cursor, physics constants, and the raster.
pub struct DriftWorld {
    surface: Surface,
    params: DriftParams,
    nodes: Vec<DriftNode>,
    cursor: CursorTracker,
    rng: Xorshift64,
    stopped: bool,
}

impl DriftWorld {
    /// Creates a world with `params.node_count` synthesized demo nodes
    /// scattered over the surface (five floating to one magnetic, the rough
    /// mix of a rendered page).
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        params: DriftParams,
    ) -> Result<Self, EffectError> {
        let surface = Surface::new(width, height, BACKGROUND)?;
        let center = DVec2::new(width as f64 / 2.0, height as f64 / 2.0);
        let mut world = Self {
            surface,
            params,
            nodes: Vec::new(),
            cursor: CursorTracker {
                position: center,
                target: center,
            },
            rng: Xorshift64::new(seed),
            stopped: false,
        };
        for i in 0..params.node_count {
            let cx = world.rng.next_range(0.1, 0.9) * width as f64;
            let cy = world.rng.next_range(0.1, 0.9) * height as f64;
            let w = world.rng.next_range(40.0, 160.0);
            let h = world.rng.next_range(30.0, 90.0);
            let kind = if i % 6 == 5 {
                NodeKind::Magnetic
            } else {
                NodeKind::Floating
            };
            world.add_node(
                NodeRect {
                    center: DVec2::new(cx, cy),
                    size: DVec2::new(w, h),
                },
                kind,
            );
        }
        Ok(world)
    }

    /// Creates a world from a JSON params object.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, EffectError> {
        Self::new(width, height, seed, DriftParams::from_json(json_params))
    }

    /// Registers a node and returns its index. Float phase and per-node
    /// drift rate are randomized here so every node breathes out of step.
    pub fn add_node(&mut self, rect: NodeRect, kind: NodeKind) -> usize {
        let float_phase = self.rng.next_f64() * 1000.0;
        let float_speed = self.params.float_speed * (0.8 + self.rng.next_f64() * 0.4);
        self.nodes.push(DriftNode {
            rect,
            kind,
            offset: DVec2::ZERO,
            velocity: DVec2::ZERO,
            tilt: DVec2::ZERO,
            float_phase,
            float_speed,
            hovered: false,
        });
        self.nodes.len() - 1
    }

    /// Moves the pointer; the follower catches up over subsequent frames.
    pub fn pointer_moved(&mut self, position: DVec2) {
        self.cursor.target = position;
    }

    /// Pointer entered node `index`.
    pub fn node_enter(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.hovered = true;
        }
    }

    /// Pointer left node `index`.
    pub fn node_leave(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.hovered = false;
        }
    }

    /// Adds a velocity kick to node `index`. Returns false for a bad index.
    pub fn apply_impulse(&mut self, index: usize, impulse: DVec2) -> bool {
        match self.nodes.get_mut(index) {
            Some(node) => {
                node.velocity += impulse;
                true
            }
            None => false,
        }
    }

    /// Nudges one to three random un-hovered nodes to keep an idle scene
    /// alive. Hovered picks are skipped, not re-rolled.
    pub fn micro_bounce(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        let count = self.rng.next_usize(3) + 1;
        for _ in 0..count {
            let idx = self.rng.next_usize(self.nodes.len());
            if self.nodes[idx].hovered {
                continue;
            }
            let vx = (self.rng.next_f64() - 0.5) * BOUNCE_IMPULSE;
            let vy = (self.rng.next_f64() - 0.5) * BOUNCE_IMPULSE;
            self.nodes[idx].velocity += DVec2::new(vx, vy);
        }
    }

    /// The node collection with current transforms.
    pub fn nodes(&self) -> &[DriftNode] {
        &self.nodes
    }

    /// The lagged cursor follower state.
    pub fn cursor(&self) -> CursorTracker {
        self.cursor
    }

    fn paint(&mut self) {
        self.surface.clear(BACKGROUND);
        for node in &self.nodes {
            let c = node.rect.center + node.offset;
            let half = node.rect.size / 2.0;
            let corners = [
                DVec2::new(c.x - half.x, c.y - half.y),
                DVec2::new(c.x + half.x, c.y - half.y),
                DVec2::new(c.x + half.x, c.y + half.y),
                DVec2::new(c.x - half.x, c.y + half.y),
            ];
            for i in 0..4 {
                self.surface.stroke_line(corners[i], corners[(i + 1) % 4], MARKER);
            }
        }
        let f = self.cursor.position;
        self.surface.stroke_line(
            DVec2::new(f.x - 2.0, f.y),
            DVec2::new(f.x + 2.0, f.y),
            MARKER,
        );
    }
}

impl Effect for DriftWorld {
    fn advance(&mut self, elapsed_ms: f64) -> Result<(), EffectError> {
        if self.stopped {
            return Ok(());
        }
        self.cursor.position += (self.cursor.target - self.cursor.position) * self.params.follower_lag;

        let cursor_target = self.cursor.target;
        let spring = self.params.spring;
        let friction = self.params.friction;
        for node in &mut self.nodes {
            let (target, tilt_target) = if node.hovered {
                let d = cursor_target - node.rect.center;
                let pull = match node.kind {
                    NodeKind::Magnetic => MAGNETIC_PULL,
                    NodeKind::Floating => FLOATING_PULL,
                };
                (
                    d * pull,
                    DVec2::new(
                        -(d.y / node.rect.size.y) * HOVER_TILT_DEG,
                        (d.x / node.rect.size.x) * HOVER_TILT_DEG,
                    ),
                )
            } else if node.kind == NodeKind::Floating {
                let time = elapsed_ms * node.float_speed + node.float_phase;
                (
                    DVec2::new(time.sin(), (time * 0.8).cos()) * FLOAT_RANGE_PX,
                    DVec2::ZERO,
                )
            } else {
                (DVec2::ZERO, DVec2::ZERO)
            };

            node.velocity += (target - node.offset) * spring;
            node.velocity *= 1.0 - friction;
            node.offset += node.velocity;
            node.tilt += (tilt_target - node.tilt) * TILT_EASE;
        }

        self.paint();
        Ok(())
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn params(&self) -> Value {
        json!({
            "friction": self.params.friction,
            "spring": self.params.spring,
            "float_speed": self.params.float_speed,
            "follower_lag": self.params.follower_lag,
            "node_count": self.nodes.len(),
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "friction": {
                "type": "number",
                "default": DEFAULT_FRICTION,
                "description": "Velocity damping factor per frame"
            },
            "spring": {
                "type": "number",
                "default": DEFAULT_SPRING,
                "description": "Return force toward the target offset"
            },
            "float_speed": {
                "type": "number",
                "default": DEFAULT_FLOAT_SPEED,
                "description": "Idle drift rate in radians per millisecond"
            },
            "follower_lag": {
                "type": "number",
                "default": DEFAULT_FOLLOWER_LAG,
                "description": "Cursor follower catch-up factor per frame"
            },
            "node_count": {
                "type": "integer",
                "default": 6,
                "description": "Demo nodes synthesized at construction"
            },
        })
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> DriftWorld {
        DriftWorld::new(400, 300, 42, DriftParams::default()).unwrap()
    }

    fn empty_world() -> DriftWorld {
        let params = DriftParams {
            node_count: 0,
            ..DriftParams::default()
        };
        DriftWorld::new(400, 300, 42, params).unwrap()
    }

    #[test]
    fn construction_synthesizes_requested_nodes() {
        let w = world();
        assert_eq!(w.nodes().len(), 6);
        assert!(w.nodes().iter().any(|n| n.kind() == NodeKind::Magnetic));
        assert!(w.nodes().iter().any(|n| n.kind() == NodeKind::Floating));
    }

    #[test]
    fn cursor_starts_at_surface_center() {
        let w = world();
        assert_eq!(w.cursor().position(), DVec2::new(200.0, 150.0));
        assert_eq!(w.cursor().target(), w.cursor().position());
    }

    #[test]
    fn follower_lerps_toward_the_pointer() {
        let mut w = empty_world();
        w.pointer_moved(DVec2::new(300.0, 150.0));
        let mut gap = (w.cursor().position() - w.cursor().target()).length();
        for frame in 1..=50 {
            w.advance(frame as f64 * 16.0).unwrap();
            let next = (w.cursor().position() - w.cursor().target()).length();
            assert!(next < gap, "follower stopped closing in at frame {frame}");
            gap = next;
        }
        assert!(gap < 1.0, "follower never caught up: {gap}px left");
    }

    #[test]
    fn hovered_magnetic_node_pulls_toward_the_cursor() {
        let mut w = empty_world();
        let idx = w.add_node(
            NodeRect {
                center: DVec2::new(100.0, 100.0),
                size: DVec2::new(80.0, 40.0),
            },
            NodeKind::Magnetic,
        );
        w.pointer_moved(DVec2::new(200.0, 100.0));
        w.node_enter(idx);
        for frame in 1..=300 {
            w.advance(frame as f64 * 16.0).unwrap();
        }
        let target = DVec2::new(100.0 * MAGNETIC_PULL, 0.0);
        let node = &w.nodes()[idx];
        assert!(
            (node.offset() - target).length() < 1.0,
            "offset {:?} did not settle at pull target {target:?}",
            node.offset()
        );
    }

    #[test]
    fn magnetic_pull_is_stronger_than_floating_pull() {
        let mut w = empty_world();
        let rect = NodeRect {
            center: DVec2::new(100.0, 100.0),
            size: DVec2::new(80.0, 40.0),
        };
        let m = w.add_node(rect, NodeKind::Magnetic);
        let f = w.add_node(rect, NodeKind::Floating);
        w.pointer_moved(DVec2::new(200.0, 100.0));
        w.node_enter(m);
        w.node_enter(f);
        for frame in 1..=300 {
            w.advance(frame as f64 * 16.0).unwrap();
        }
        assert!(
            w.nodes()[m].offset().x > w.nodes()[f].offset().x + 5.0,
            "magnetic node should sit closer to the cursor"
        );
    }

    #[test]
    fn hover_tilt_eases_toward_pointer_derived_angles() {
        let mut w = empty_world();
        let idx = w.add_node(
            NodeRect {
                center: DVec2::new(100.0, 100.0),
                size: DVec2::new(100.0, 50.0),
            },
            NodeKind::Floating,
        );
        // Pointer right of and below center: positive dx and dy.
        w.pointer_moved(DVec2::new(150.0, 125.0));
        w.node_enter(idx);
        for frame in 1..=200 {
            w.advance(frame as f64 * 16.0).unwrap();
        }
        let tilt = w.nodes()[idx].tilt();
        let expected = DVec2::new(-(25.0 / 50.0) * 15.0, (50.0 / 100.0) * 15.0);
        assert!((tilt - expected).length() < 0.1, "tilt {tilt:?} != {expected:?}");
    }

    #[test]
    fn idle_floating_node_stays_within_drift_bounds() {
        let mut w = empty_world();
        let idx = w.add_node(
            NodeRect {
                center: DVec2::new(200.0, 150.0),
                size: DVec2::new(60.0, 60.0),
            },
            NodeKind::Floating,
        );
        let mut max_offset: f64 = 0.0;
        for frame in 1..=1000 {
            w.advance(frame as f64 * 16.0).unwrap();
            max_offset = max_offset.max(w.nodes()[idx].offset().length());
        }
        assert!(max_offset > 0.5, "floating node never drifted");
        assert!(
            max_offset < 4.0 * FLOAT_RANGE_PX,
            "idle drift blew past its amplitude: {max_offset}px"
        );
    }

    #[test]
    fn idle_magnetic_node_settles_flat() {
        let mut w = empty_world();
        let idx = w.add_node(
            NodeRect {
                center: DVec2::new(200.0, 150.0),
                size: DVec2::new(60.0, 60.0),
            },
            NodeKind::Magnetic,
        );
        for frame in 1..=200 {
            w.advance(frame as f64 * 16.0).unwrap();
        }
        assert!(w.nodes()[idx].offset().length() < 1e-6);
        assert!(w.nodes()[idx].velocity().length() < 1e-6);
    }

    #[test]
    fn impulse_sets_a_node_moving_and_friction_damps_it_out() {
        let mut w = empty_world();
        let idx = w.add_node(
            NodeRect {
                center: DVec2::new(200.0, 150.0),
                size: DVec2::new(60.0, 60.0),
            },
            NodeKind::Magnetic,
        );
        assert!(w.apply_impulse(idx, DVec2::new(5.0, -3.0)));
        w.advance(16.0).unwrap();
        assert!(w.nodes()[idx].offset().length() > 0.5);
        for frame in 2..=400 {
            w.advance(frame as f64 * 16.0).unwrap();
        }
        assert!(
            w.nodes()[idx].offset().length() < 0.01,
            "spring never recentered the node"
        );
    }

    #[test]
    fn impulse_on_bad_index_is_rejected() {
        let mut w = empty_world();
        assert!(!w.apply_impulse(7, DVec2::new(1.0, 1.0)));
    }

    #[test]
    fn micro_bounce_skips_hovered_nodes() {
        let mut w = world();
        for i in 0..w.nodes().len() {
            w.node_enter(i);
        }
        for _ in 0..50 {
            w.micro_bounce();
        }
        for node in w.nodes() {
            assert_eq!(node.velocity(), DVec2::ZERO);
        }
    }

    #[test]
    fn micro_bounce_eventually_nudges_something() {
        let mut w = world();
        for _ in 0..10 {
            w.micro_bounce();
        }
        assert!(
            w.nodes().iter().any(|n| n.velocity() != DVec2::ZERO),
            "ten bounces moved nothing"
        );
    }

    #[test]
    fn micro_bounce_on_empty_world_is_a_noop() {
        let mut w = empty_world();
        w.micro_bounce();
        assert!(w.advance(16.0).is_ok());
    }

    #[test]
    fn advance_paints_node_markers() {
        let mut w = world();
        w.advance(16.0).unwrap();
        let lit = w.surface().data().iter().filter(|px| px.r > 0.5).count();
        assert!(lit > 0, "no markers painted");
    }

    #[test]
    fn same_seed_is_deterministic() {
        let mut a = world();
        let mut b = world();
        for frame in 1..=20 {
            let at = frame as f64 * 16.0;
            a.micro_bounce();
            b.micro_bounce();
            a.advance(at).unwrap();
            b.advance(at).unwrap();
        }
        for (na, nb) in a.nodes().iter().zip(b.nodes()) {
            assert_eq!(na.offset().x.to_bits(), nb.offset().x.to_bits());
            assert_eq!(na.offset().y.to_bits(), nb.offset().y.to_bits());
        }
    }

    #[test]
    fn stopped_world_ignores_advance() {
        let mut w = world();
        w.advance(16.0).unwrap();
        w.stop();
        w.stop();
        assert!(w.is_stopped());
        let offsets: Vec<DVec2> = w.nodes().iter().map(|n| n.offset()).collect();
        w.advance(5000.0).unwrap();
        let after: Vec<DVec2> = w.nodes().iter().map(|n| n.offset()).collect();
        assert_eq!(offsets, after);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            DriftWorld::new(0, 100, 1, DriftParams::default()),
            Err(EffectError::InvalidDimensions)
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(24))]

            #[test]
            fn idle_worlds_never_explode(seed: u64) {
                let mut w = DriftWorld::new(200, 200, seed, DriftParams::default()).unwrap();
                for frame in 1..=100 {
                    w.advance(frame as f64 * 16.0).unwrap();
                }
                for node in w.nodes() {
                    prop_assert!(node.offset().length() < 100.0);
                    prop_assert!(node.offset().is_finite());
                }
            }
        }
    }
}
