//! Interpreter that walks an instruction string and drives a [`TurtleSink`].
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a
//! [`TurtleConfig`], register symbol-to-operation mappings via
//! [`TurtleInterpreter::set_op`] or
//! [`TurtleInterpreter::populate_standard_symbols`], then call
//! [`TurtleInterpreter::run`]. The free function [`interpret`] does all of this
//! with the standard symbols.

use crate::error::TurtleError;
use crate::sink::TurtleSink;
use crate::turtle::{Pen, Pose, TurtleOp, TurtleState};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for turtle interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Distance covered by `F` and `f`.
    pub forward_distance: f64,
    /// Turn angle (degrees) for `+` and `-`.
    pub angle_step: f64,
    /// Where every run starts.
    pub start_position: DVec2,
    /// Heading (degrees) every run starts with. Default: 90 (north).
    pub start_heading: f64,
    /// When set, `X` turns right by `curl_step * depth` degrees.
    pub curl_step: Option<f64>,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            forward_distance: 10.0,
            angle_step: 25.0,
            start_position: DVec2::ZERO,
            start_heading: 90.0,
            curl_step: None,
        }
    }
}

impl TurtleConfig {
    pub fn start_pose(&self) -> Pose {
        Pose::new(self.start_position, self.start_heading)
    }
}

/// What a completed run did.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleSummary {
    /// Pose after the last symbol.
    pub final_pose: Pose,
    /// Number of `line_to` commands emitted.
    pub lines: usize,
    /// Number of `move_to` commands emitted, including the initial one.
    pub moves: usize,
    /// Deepest branch nesting reached.
    pub max_depth: usize,
    /// Poses still on the stack at the end. Non-zero means unbalanced `[`.
    pub open_branches: usize,
}

/// Interprets L-System output as 2D turtle commands.
#[derive(Clone, Debug)]
pub struct TurtleInterpreter {
    op_map: HashMap<char, TurtleOp>,
    config: TurtleConfig,
}

impl Default for TurtleInterpreter {
    fn default() -> Self {
        let mut interpreter = Self::new(TurtleConfig::default());
        interpreter.populate_standard_symbols();
        interpreter
    }
}

impl TurtleInterpreter {
    /// Creates a new interpreter with the given configuration and an empty symbol map.
    ///
    /// Register operations with [`set_op`](Self::set_op) or
    /// [`populate_standard_symbols`](Self::populate_standard_symbols) before calling
    /// [`run`](Self::run). Symbols without a mapping are errors.
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            op_map: HashMap::new(),
            config,
        }
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    pub fn with_map(mut self, map: impl IntoIterator<Item = (char, TurtleOp)>) -> Self {
        self.op_map = map.into_iter().collect();
        self
    }

    /// Assigns a single [`TurtleOp`] to a symbol, replacing any previous mapping.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    /// Returns the operation mapped to `symbol`, if any.
    pub fn op(&self, symbol: char) -> Option<TurtleOp> {
        self.op_map.get(&symbol).copied()
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// Registers the conventional 2D symbols.
    ///
    /// `X` maps to [`TurtleOp::Curl`] when the config has a `curl_step`, and to
    /// [`TurtleOp::Ignore`] otherwise. Existing mappings for other symbols are kept.
    pub fn populate_standard_symbols(&mut self) {
        let curl = if self.config.curl_step.is_some() {
            TurtleOp::Curl
        } else {
            TurtleOp::Ignore
        };
        let mappings = [
            // Drawing
            ('F', TurtleOp::Forward),
            ('f', TurtleOp::Move),
            // Heading
            ('+', TurtleOp::Turn(1.0)),
            ('-', TurtleOp::Turn(-1.0)),
            ('|', TurtleOp::TurnAround),
            // Flow
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
            // Grammar variables
            ('X', curl),
            ('Y', TurtleOp::Ignore),
        ];

        for (symbol, op) in mappings {
            self.set_op(symbol, op);
        }
    }

    /// Interprets `instructions` left to right, emitting commands to `sink`.
    ///
    /// The turtle starts at the configured start pose with the pen down and an
    /// empty stack; the first commands are `move_to(start)` and `set_style(0)`.
    ///
    /// # Push / Pop
    ///
    /// `[` saves a copy of the pose and reports the new depth through
    /// `set_style`. `]` restores the position with the pen lifted (a
    /// `move_to`, no line), then the heading, lowers the pen, and reports the
    /// new depth. A `]` with nothing to restore is a
    /// [`TurtleError::StackUnderflow`].
    ///
    /// # Errors
    ///
    /// Stops at the first unmapped symbol or unmatched `]`. Commands emitted
    /// before the error are not a complete render.
    pub fn run<S: TurtleSink>(
        &self,
        instructions: &str,
        mut sink: S,
    ) -> Result<TurtleSummary, TurtleError> {
        let mut turtle = TurtleState::new(self.config.start_pose());
        let mut lines = 0;
        let mut moves = 1;
        let mut max_depth: usize = 0;

        sink.move_to(turtle.pose.position);
        sink.set_style(0);

        for (index, symbol) in instructions.chars().enumerate() {
            let op = self
                .op(symbol)
                .ok_or(TurtleError::UnknownInstruction { symbol, index })?;

            match op {
                TurtleOp::Forward => {
                    turtle.pose = turtle.pose.advanced(self.config.forward_distance);
                    sink.line_to(turtle.pose.position);
                    lines += 1;
                }
                TurtleOp::Move => {
                    turtle.pen = Pen::Up;
                    turtle.pose = turtle.pose.advanced(self.config.forward_distance);
                    sink.move_to(turtle.pose.position);
                    turtle.pen = Pen::Down;
                    moves += 1;
                }
                TurtleOp::Turn(factor) => {
                    turtle.pose = turtle.pose.turned(self.config.angle_step * factor);
                }
                TurtleOp::TurnAround => turtle.pose = turtle.pose.turned(180.0),
                TurtleOp::Curl => {
                    let step = self.config.curl_step.unwrap_or(0.0);
                    turtle.pose = turtle.pose.turned(-step * turtle.depth() as f64);
                }
                TurtleOp::Push => {
                    turtle.push();
                    max_depth = max_depth.max(turtle.depth());
                    tracing::trace!(index, depth = turtle.depth(), "push");
                    sink.set_style(turtle.depth());
                }
                TurtleOp::Pop => {
                    let saved = turtle.pop().ok_or(TurtleError::StackUnderflow { index })?;
                    turtle.pen = Pen::Up;
                    turtle.pose.position = saved.position;
                    sink.move_to(saved.position);
                    moves += 1;
                    turtle.pose.heading = saved.heading;
                    turtle.pen = Pen::Down;
                    tracing::trace!(index, depth = turtle.depth(), "pop");
                    sink.set_style(turtle.depth());
                }
                TurtleOp::Ignore => {}
            }
        }

        let summary = TurtleSummary {
            final_pose: turtle.pose,
            lines,
            moves,
            max_depth,
            open_branches: turtle.depth(),
        };
        if summary.open_branches > 0 {
            tracing::warn!(
                open_branches = summary.open_branches,
                "instructions ended with unbalanced `[`"
            );
        }
        tracing::debug!(
            symbols = instructions.len(),
            lines,
            moves,
            max_depth,
            "turtle run finished"
        );
        Ok(summary)
    }
}

/// Interprets `instructions` with the standard symbols, starting at the origin
/// facing north.
pub fn interpret<S: TurtleSink>(
    instructions: &str,
    angle_step: f64,
    forward_distance: f64,
    sink: S,
) -> Result<TurtleSummary, TurtleError> {
    let mut interpreter = TurtleInterpreter::new(TurtleConfig {
        angle_step,
        forward_distance,
        ..TurtleConfig::default()
    });
    interpreter.populate_standard_symbols();
    interpreter.run(instructions, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::DrawCommand;

    fn close(a: DVec2, b: DVec2) -> bool {
        a.abs_diff_eq(b, 1e-9)
    }

    #[test]
    fn standard_symbols_cover_tree_alphabet() {
        let interp = TurtleInterpreter::default();
        for c in "F+-[]X".chars() {
            assert!(interp.op(c).is_some(), "{c} unmapped");
        }
        assert_eq!(interp.op('X'), Some(TurtleOp::Ignore));
        assert_eq!(interp.op('Q'), None);
    }

    #[test]
    fn curl_step_enables_curl_op() {
        let mut interp = TurtleInterpreter::new(TurtleConfig {
            curl_step: Some(5.0),
            ..Default::default()
        });
        interp.populate_standard_symbols();
        assert_eq!(interp.op('X'), Some(TurtleOp::Curl));
    }

    #[test]
    fn turns_follow_angle_step() {
        let mut log: Vec<DrawCommand> = Vec::new();
        let summary = interpret("+F", 90.0, 1.0, &mut log).unwrap();
        assert!(close(summary.final_pose.position, DVec2::new(-1.0, 0.0)));
        assert_eq!(summary.final_pose.heading, 180.0);

        let summary = interpret("--F", 45.0, 2.0, &mut log).unwrap();
        assert!(close(summary.final_pose.position, DVec2::new(2.0, 0.0)));
    }

    #[test]
    fn move_relocates_without_drawing() {
        let mut log: Vec<DrawCommand> = Vec::new();
        let summary = interpret("fF", 25.0, 10.0, &mut log).unwrap();
        assert_eq!(summary.lines, 1);
        assert_eq!(summary.moves, 2);
        match log.as_slice() {
            [
                DrawCommand::MoveTo(start),
                DrawCommand::SetStyle(0),
                DrawCommand::MoveTo(mid),
                DrawCommand::LineTo(end),
            ] => {
                assert!(close(*start, DVec2::ZERO));
                assert!(close(*mid, DVec2::new(0.0, 10.0)));
                assert!(close(*end, DVec2::new(0.0, 20.0)));
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn turn_around_reverses_heading() {
        let summary = interpret("F|F", 25.0, 10.0, Vec::<DrawCommand>::new()).unwrap();
        assert!(close(summary.final_pose.position, DVec2::ZERO));
        assert_eq!(summary.final_pose.heading, 270.0);
    }

    #[test]
    fn custom_map_replaces_standard_symbols() {
        let interp = TurtleInterpreter::new(TurtleConfig::default())
            .with_map([('A', TurtleOp::Forward), ('B', TurtleOp::Forward)]);
        let summary = interp.run("AB", Vec::<DrawCommand>::new()).unwrap();
        assert_eq!(summary.lines, 2);
        assert_eq!(
            interp.run("F", Vec::<DrawCommand>::new()),
            Err(TurtleError::UnknownInstruction {
                symbol: 'F',
                index: 0
            })
        );
    }

    #[test]
    fn start_pose_comes_from_config() {
        let interp = TurtleInterpreter::new(TurtleConfig {
            start_position: DVec2::new(5.0, -5.0),
            start_heading: 0.0,
            ..Default::default()
        })
        .with_map([('F', TurtleOp::Forward)]);
        let mut log: Vec<DrawCommand> = Vec::new();
        let summary = interp.run("F", &mut log).unwrap();
        assert_eq!(log[0], DrawCommand::MoveTo(DVec2::new(5.0, -5.0)));
        assert!(close(summary.final_pose.position, DVec2::new(15.0, -5.0)));
    }
}
