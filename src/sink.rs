//! Output side of the interpreter.
//!
//! The interpreter never draws. It pushes commands into a [`TurtleSink`],
//! which a renderer implements however it likes (GPU line buffer, SVG path,
//! plotter G-code). Two in-memory sinks ship with the crate.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Receiver of turtle drawing commands.
pub trait TurtleSink {
    /// Relocate the pen without drawing.
    fn move_to(&mut self, to: DVec2);

    /// Draw a line from the current pen position to `to`.
    fn line_to(&mut self, to: DVec2);

    /// Style hint: the current branch depth. Renderers typically index a
    /// colour or width palette with it.
    fn set_style(&mut self, _depth: usize) {}
}

impl<S: TurtleSink + ?Sized> TurtleSink for &mut S {
    fn move_to(&mut self, to: DVec2) {
        (**self).move_to(to);
    }

    fn line_to(&mut self, to: DVec2) {
        (**self).line_to(to);
    }

    fn set_style(&mut self, depth: usize) {
        (**self).set_style(depth);
    }
}

/// A single recorded sink call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
    SetStyle(usize),
}

/// A `Vec<DrawCommand>` records every call verbatim.
impl TurtleSink for Vec<DrawCommand> {
    fn move_to(&mut self, to: DVec2) {
        self.push(DrawCommand::MoveTo(to));
    }

    fn line_to(&mut self, to: DVec2) {
        self.push(DrawCommand::LineTo(to));
    }

    fn set_style(&mut self, depth: usize) {
        self.push(DrawCommand::SetStyle(depth));
    }
}

/// A drawn line together with the branch depth it was drawn at.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: DVec2,
    pub to: DVec2,
    pub depth: usize,
}

/// Collects drawn segments, ready to upload as a line list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineBuffer {
    pub segments: Vec<Segment>,
    cursor: DVec2,
    depth: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Flat `x1, y1, x2, y2` vertex array, one line per four floats.
    pub fn vertices(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.segments.len() * 4);
        for s in &self.segments {
            out.extend_from_slice(&[
                s.from.x as f32,
                s.from.y as f32,
                s.to.x as f32,
                s.to.y as f32,
            ]);
        }
        out
    }

    /// Axis-aligned bounds `(min, max)` of every segment endpoint, or `None`
    /// if nothing was drawn.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        let mut points = self.segments.iter().flat_map(|s| [s.from, s.to]);
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

impl TurtleSink for LineBuffer {
    fn move_to(&mut self, to: DVec2) {
        self.cursor = to;
    }

    fn line_to(&mut self, to: DVec2) {
        self.segments.push(Segment {
            from: self.cursor,
            to,
            depth: self.depth,
        });
        self.cursor = to;
    }

    fn set_style(&mut self, depth: usize) {
        self.depth = depth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_buffer_tracks_cursor_and_depth() {
        let mut buf = LineBuffer::new();
        buf.move_to(DVec2::new(1.0, 1.0));
        buf.line_to(DVec2::new(1.0, 2.0));
        buf.set_style(2);
        buf.line_to(DVec2::new(3.0, 2.0));
        buf.move_to(DVec2::ZERO);
        buf.line_to(DVec2::new(-1.0, 0.0));

        assert_eq!(buf.len(), 3);
        assert_eq!(buf.segments[1].from, DVec2::new(1.0, 2.0));
        assert_eq!(buf.segments[1].depth, 2);
        assert_eq!(buf.segments[2].from, DVec2::ZERO);
        assert_eq!(
            buf.vertices(),
            vec![1.0, 1.0, 1.0, 2.0, 1.0, 2.0, 3.0, 2.0, 0.0, 0.0, -1.0, 0.0]
        );
        assert_eq!(
            buf.bounds(),
            Some((DVec2::new(-1.0, 0.0), DVec2::new(3.0, 2.0)))
        );
    }

    #[test]
    fn empty_buffer_has_no_bounds() {
        let mut buf = LineBuffer::new();
        buf.move_to(DVec2::new(5.0, 5.0));
        assert!(buf.is_empty());
        assert_eq!(buf.bounds(), None);
    }

    #[test]
    fn sink_by_mut_reference() {
        fn feed(mut sink: impl TurtleSink) {
            sink.move_to(DVec2::X);
            sink.line_to(DVec2::Y);
        }
        let mut log: Vec<DrawCommand> = Vec::new();
        feed(&mut log);
        assert_eq!(
            log,
            vec![DrawCommand::MoveTo(DVec2::X), DrawCommand::LineTo(DVec2::Y)]
        );
    }
}
