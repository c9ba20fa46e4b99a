//! Turtle state and operations for 2D interpretation.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Where the turtle is and which way it faces.
///
/// Headings are in degrees, counter-clockwise from the +X axis, and are kept
/// in `[0, 360)`. So 90 faces "north" (+Y).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World-space position of the pen tip.
    pub position: DVec2,

    /// Heading in degrees.
    pub heading: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(DVec2::ZERO, 90.0)
    }
}

impl Pose {
    pub fn new(position: DVec2, heading: f64) -> Self {
        Self {
            position,
            heading: heading.rem_euclid(360.0),
        }
    }

    /// Unit vector along the current heading.
    pub fn direction(&self) -> DVec2 {
        DVec2::from_angle(self.heading.to_radians())
    }

    /// The pose `distance` units further along the heading.
    pub fn advanced(self, distance: f64) -> Self {
        Self {
            position: self.position + self.direction() * distance,
            ..self
        }
    }

    /// The pose turned by `degrees` (positive is left).
    pub fn turned(self, degrees: f64) -> Self {
        Self::new(self.position, self.heading + degrees)
    }
}

/// Whether moving the turtle leaves a line behind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pen {
    Up,
    #[default]
    Down,
}

/// The mutable state of one interpretation run.
///
/// Created fresh for each run and owned by it; the branch stack holds copies of
/// poses, never references.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurtleState {
    pub pose: Pose,
    pub pen: Pen,
    pub stack: Vec<Pose>,
}

impl TurtleState {
    pub fn new(start: Pose) -> Self {
        Self {
            pose: start,
            pen: Pen::Down,
            stack: Vec::new(),
        }
    }

    /// Current branch nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self) {
        self.stack.push(self.pose);
    }

    /// Pops the most recent saved pose without applying it.
    pub fn pop(&mut self) -> Option<Pose> {
        self.stack.pop()
    }
}

/// Operations that can be performed by the turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Move forward with the pen down, drawing a line (`F`).
    Forward,
    /// Move forward with the pen up (`f`).
    Move,
    /// Turn by `angle_step` times the factor: `+` is `Turn(1.0)`, `-` is `Turn(-1.0)`.
    Turn(f64),
    /// Turn 180 degrees (`|`).
    TurnAround,
    /// Turn right by `curl_step` times the branch depth. Never moves or draws.
    Curl,
    /// Save the pose onto the stack (`[`).
    Push,
    /// Restore the most recently pushed pose (`]`).
    Pop,
    /// Known symbol with no effect on the turtle (`X`, `Y`, ...).
    Ignore,
}
