//! A grammar bundled with the parameters needed to draw it.

use crate::error::{Error, GrammarError};
use crate::grammar::Grammar;
use crate::interpreter::{TurtleConfig, TurtleInterpreter, TurtleSummary};
use crate::sink::TurtleSink;
use serde::{Deserialize, Serialize};

/// Everything needed to turn a grammar into a drawing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LSystem {
    pub name: String,
    pub grammar: Grammar,
    /// Rewrite passes applied to the axiom.
    pub iterations: usize,
    /// Turn angle (degrees) for `+` and `-`.
    pub angle: f64,
    pub forward_distance: f64,
    /// Optional `X` curl, see [`TurtleConfig::curl_step`].
    #[serde(default)]
    pub curl_step: Option<f64>,
}

impl LSystem {
    pub fn new(name: impl Into<String>, grammar: Grammar, angle: f64) -> Self {
        Self {
            name: name.into(),
            grammar,
            iterations: 1,
            angle,
            forward_distance: 10.0,
            curl_step: None,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_forward_distance(mut self, distance: f64) -> Self {
        self.forward_distance = distance;
        self
    }

    pub fn with_curl_step(mut self, step: f64) -> Self {
        self.curl_step = Some(step);
        self
    }

    /// The expanded instruction string.
    pub fn instructions(&self) -> Result<String, GrammarError> {
        self.grammar.expand(self.iterations)
    }

    /// Interpreter configured for this system with the standard symbols.
    pub fn interpreter(&self) -> TurtleInterpreter {
        let mut interpreter = TurtleInterpreter::new(TurtleConfig {
            forward_distance: self.forward_distance,
            angle_step: self.angle,
            curl_step: self.curl_step,
            ..TurtleConfig::default()
        });
        interpreter.populate_standard_symbols();
        interpreter
    }

    /// Expands the grammar, then draws the result into `sink`.
    ///
    /// The grammar is validated and fully expanded before the first command
    /// reaches the sink, so grammar errors never produce partial output.
    pub fn render<S: TurtleSink>(&self, sink: S) -> Result<TurtleSummary, Error> {
        self.grammar.validate()?;
        let instructions = self.instructions()?;
        tracing::debug!(
            name = %self.name,
            iterations = self.iterations,
            len = instructions.len(),
            "rendering l-system"
        );
        Ok(self.interpreter().run(&instructions, sink)?)
    }
}
