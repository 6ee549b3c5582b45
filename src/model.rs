//! Core data models for the swipe card demo.
//! Geometry is in CSS pixels, angles in radians.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, v: Vector) -> Self {
        Self {
            x: self.x + v.dx,
            y: self.y + v.dy,
        }
    }

    /// Translation needed to get from `from` to `self`.
    pub fn since(self, from: Point) -> Vector {
        Vector::new(self.x - from.x, self.y - from.y)
    }
}

/// A displacement, e.g. the total translation of a drag session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn length(self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Opaque color, channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Builds a color from three draws of `next`, each expected in `[0, 1)`.
    pub fn from_source(mut next: impl FnMut() -> f64) -> Self {
        let r = next().clamp(0.0, 1.0);
        let g = next().clamp(0.0, 1.0);
        let b = next().clamp(0.0, 1.0);
        Self { r, g, b }
    }

    pub fn random() -> Self {
        Self::from_source(js_sys::Math::random)
    }

    pub fn to_css(self) -> String {
        let ch = |v: f64| (v * 255.0).round() as u8;
        format!("rgb({}, {}, {})", ch(self.r), ch(self.g), ch(self.b))
    }
}

/// Rotation followed by a uniform scale, both about the card center.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardTransform {
    /// Radians, positive is clockwise on screen.
    pub rotation: f64,
    pub scale: f64,
}

impl CardTransform {
    pub const IDENTITY: CardTransform = CardTransform {
        rotation: 0.0,
        scale: 1.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Affine matrix `[a, b, c, d, tx, ty]` in canvas/CSS `matrix()` order.
    pub fn matrix(&self) -> [f64; 6] {
        let (sin, cos) = self.rotation.sin_cos();
        let s = self.scale;
        [s * cos, s * sin, -s * sin, s * cos, 0.0, 0.0]
    }

    pub fn to_css(&self) -> String {
        let [a, b, c, d, tx, ty] = self.matrix();
        format!("matrix({a}, {b}, {c}, {d}, {tx}, {ty})")
    }
}

impl Default for CardTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// Discrete states reported by the pan recognizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanPhase {
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl fmt::Display for PanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PanPhase::Possible => "possible",
            PanPhase::Began => "began",
            PanPhase::Changed => "changed",
            PanPhase::Ended => "ended",
            PanPhase::Cancelled => "cancelled",
            PanPhase::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanEvent {
    pub phase: PanPhase,
    /// Cumulative translation since the press point.
    pub translation: Vector,
}

impl PanEvent {
    pub const fn new(phase: PanPhase, translation: Vector) -> Self {
        Self { phase, translation }
    }
}

/// Lifecycle of a single card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfacePhase {
    Idle,
    Dragging,
    /// Thrown off-screen, waiting for the throw animation to finish.
    Dismissing,
    /// Snapping back to the rest center.
    Resetting,
    Removed,
}

impl SurfacePhase {
    pub fn accepts_input(self) -> bool {
        matches!(self, SurfacePhase::Idle | SurfacePhase::Dragging)
    }

    pub fn is_animating(self) -> bool {
        matches!(self, SurfacePhase::Dismissing | SurfacePhase::Resetting)
    }
}

impl fmt::Display for SurfacePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SurfacePhase::Idle => "idle",
            SurfacePhase::Dragging => "dragging",
            SurfacePhase::Dismissing => "dismissing",
            SurfacePhase::Resetting => "resetting",
            SurfacePhase::Removed => "removed",
        };
        f.write_str(s)
    }
}

/// Drag bookkeeping; `origin` is the card center when the pan began.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum DragSession {
    #[default]
    NoSession,
    Active { origin: Point },
}

impl DragSession {
    pub fn origin(&self) -> Option<Point> {
        match self {
            DragSession::NoSession => None,
            DragSession::Active { origin } => Some(*origin),
        }
    }
}
