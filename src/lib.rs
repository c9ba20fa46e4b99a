//! # lsystem-turtle
//!
//! Deterministic L-System expansion and a 2D stack turtle that interprets the
//! result.
//!
//! The pipeline has two stages. A [`Grammar`] is rewritten for a number of
//! passes into an instruction string, then a [`TurtleInterpreter`] walks that
//! string and streams `move_to` / `line_to` / `set_style` commands into any
//! [`TurtleSink`]. Rendering, windowing and colour palettes live behind the
//! sink.
//!
//! ```
//! use lsystem_turtle::{Grammar, LineBuffer, STRUCTURAL_CONSTANTS, interpret};
//!
//! let grammar = Grammar::from_strs(
//!     "X",
//!     &[('X', "F+[[X]-X]-F[-FX]+X"), ('F', "FF")],
//!     &STRUCTURAL_CONSTANTS,
//! )?;
//! let instructions = grammar.expand(3)?;
//!
//! let mut lines = LineBuffer::new();
//! let summary = interpret(&instructions, 25.0, 10.0, &mut lines)?;
//! assert_eq!(summary.lines, lines.len());
//! assert_eq!(summary.open_branches, 0);
//! # Ok::<(), lsystem_turtle::Error>(())
//! ```

pub mod error;
pub mod expander;
pub mod grammar;
pub mod interpreter;
pub mod presets;
pub mod sink;
pub mod system;
pub mod turtle;

pub use error::*;
pub use expander::*;
pub use grammar::*;
pub use interpreter::*;
pub use sink::*;
pub use system::*;
pub use turtle::*;
