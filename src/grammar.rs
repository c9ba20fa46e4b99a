//! Grammar data: axiom, production rules and constants.

use crate::error::GrammarError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The symbols `+ - [ ]`, constant in almost every 2D grammar.
pub const STRUCTURAL_CONSTANTS: [char; 4] = ['+', '-', '[', ']'];

/// A deterministic, context-free L-System grammar over `char` symbols.
///
/// Every symbol that appears in the axiom or in a rule body must either be a
/// constant or have a rule of its own (the closure invariant). A constant may
/// not also have a rule.
///
/// The fields are public so the grammar can be built from any serde format;
/// call [`Grammar::validate`] on values that did not come from
/// [`Grammar::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    /// The starting string.
    pub axiom: String,

    /// Production rules: variable -> replacement.
    pub rules: BTreeMap<char, String>,

    /// Symbols that are copied through every pass unchanged.
    #[serde(default)]
    pub constants: BTreeSet<char>,
}

impl Grammar {
    /// Builds a grammar and checks its closure invariant.
    pub fn new<R, C>(
        axiom: impl Into<String>,
        rules: R,
        constants: C,
    ) -> Result<Self, GrammarError>
    where
        R: IntoIterator<Item = (char, String)>,
        C: IntoIterator<Item = char>,
    {
        let grammar = Self {
            axiom: axiom.into(),
            rules: rules.into_iter().collect(),
            constants: constants.into_iter().collect(),
        };
        grammar.validate()?;
        Ok(grammar)
    }

    /// Convenience for the common case of `&str` rule bodies.
    pub fn from_strs(
        axiom: &str,
        rules: &[(char, &str)],
        constants: &[char],
    ) -> Result<Self, GrammarError> {
        Self::new(
            axiom,
            rules.iter().map(|&(var, body)| (var, body.to_owned())),
            constants.iter().copied(),
        )
    }

    /// Returns `true` if `symbol` is copied through unchanged.
    pub fn is_constant(&self, symbol: char) -> bool {
        self.constants.contains(&symbol)
    }

    /// Returns the replacement for `symbol`, if it is a variable.
    pub fn rule(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    /// Checks that constants and variables are disjoint and that every symbol
    /// in the axiom and in each rule body is known.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if let Some(&symbol) = self.rules.keys().find(|&&k| self.constants.contains(&k)) {
            return Err(GrammarError::ConstantRewritten { symbol });
        }

        let bodies =
            std::iter::once(self.axiom.as_str()).chain(self.rules.values().map(String::as_str));
        for body in bodies {
            if let Some((index, symbol)) = body
                .chars()
                .enumerate()
                .find(|&(_, c)| !self.is_constant(c) && !self.rules.contains_key(&c))
            {
                return Err(GrammarError::UnknownSymbol {
                    symbol,
                    index,
                    pass: 0,
                });
            }
        }
        Ok(())
    }
}
