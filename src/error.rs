//! Error types for expansion and interpretation.
//!
//! Every variant is a structural problem with the input, so none of them is
//! retried. They carry `miette` diagnostic codes for callers that report
//! through a `miette` handler.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while building or expanding a [`Grammar`](crate::Grammar).
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("unknown symbol `{symbol}` at index {index} (pass {pass})")]
    #[diagnostic(
        code(lsystem::grammar::unknown_symbol),
        help("declare the symbol as a constant or give it a production rule")
    )]
    UnknownSymbol {
        symbol: char,
        /// Position of the symbol in the string being rewritten.
        index: usize,
        /// Zero-based rewrite pass; closure checks report pass 0.
        pass: usize,
    },

    #[error("constant `{symbol}` also has a production rule")]
    #[diagnostic(
        code(lsystem::grammar::constant_rewritten),
        help("constants are never rewritten; remove the rule or the constant")
    )]
    ConstantRewritten { symbol: char },
}

/// Errors raised by the turtle interpreter.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum TurtleError {
    #[error("unknown instruction `{symbol}` at index {index}")]
    #[diagnostic(
        code(lsystem::turtle::unknown_instruction),
        help("register the symbol with `TurtleInterpreter::set_op`")
    )]
    UnknownInstruction { symbol: char, index: usize },

    #[error("`]` at index {index} has no matching `[`")]
    #[diagnostic(code(lsystem::turtle::stack_underflow))]
    StackUnderflow { index: usize },
}

/// Any error from the full expand-then-draw pipeline.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Turtle(#[from] TurtleError),
}
