//! Parallel-rewrite expansion of a [`Grammar`].
//!
//! One pass walks the current string left to right and replaces every
//! variable by its rule body; constants are copied. Symbols produced by a pass
//! are only rewritten by the next pass.
//!
//! Output grows geometrically with the pass count, so each pass measures the
//! exact size of its result before writing anything and then fills a buffer
//! allocated once at that size. Measuring also validates every symbol, so a
//! failing pass never yields a partial string.

use crate::error::GrammarError;
use crate::grammar::Grammar;
use std::collections::{BTreeMap, BTreeSet};

/// Rewrites `axiom` `iterations` times with `rules`, copying `constants`.
///
/// `iterations == 0` returns the axiom unchanged. Symbols are only checked
/// when a pass reaches them, so an unknown symbol in the axiom is not an error
/// until the first pass.
pub fn expand(
    rules: &BTreeMap<char, String>,
    axiom: &str,
    constants: &BTreeSet<char>,
    iterations: usize,
) -> Result<String, GrammarError> {
    let mut current = axiom.to_owned();
    for pass in 0..iterations {
        current = rewrite(rules, constants, &current, pass)?;
        tracing::debug!(pass, len = current.len(), "expansion pass");
    }
    Ok(current)
}

impl Grammar {
    /// Expands the axiom `iterations` times.
    pub fn expand(&self, iterations: usize) -> Result<String, GrammarError> {
        self.expand_from(&self.axiom, iterations)
    }

    /// Expands an arbitrary start string with this grammar's rules.
    ///
    /// `expand_from(&expand(n)?, m) == expand(n + m)`.
    pub fn expand_from(&self, start: &str, iterations: usize) -> Result<String, GrammarError> {
        expand(&self.rules, start, &self.constants, iterations)
    }

    /// Iterates over the generations of this grammar, starting with the axiom.
    ///
    /// The iterator is unbounded; stop it with `take` or `nth`. After an error
    /// it yields nothing more.
    pub fn generations(&self) -> Generations<'_> {
        Generations {
            grammar: self,
            last: None,
            pass: 0,
            failed: false,
        }
    }
}

/// Iterator returned by [`Grammar::generations`].
#[derive(Debug, Clone)]
pub struct Generations<'g> {
    grammar: &'g Grammar,
    last: Option<String>,
    pass: usize,
    failed: bool,
}

impl Iterator for Generations<'_> {
    type Item = Result<String, GrammarError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = match &self.last {
            None => Ok(self.grammar.axiom.clone()),
            Some(prev) => {
                let result =
                    rewrite(&self.grammar.rules, &self.grammar.constants, prev, self.pass);
                self.pass += 1;
                result
            }
        };
        match next {
            Ok(s) => {
                self.last = Some(s.clone());
                Some(Ok(s))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Runs a single rewrite pass over `current`.
fn rewrite(
    rules: &BTreeMap<char, String>,
    constants: &BTreeSet<char>,
    current: &str,
    pass: usize,
) -> Result<String, GrammarError> {
    let replacement = |index: usize, symbol: char| {
        if constants.contains(&symbol) {
            Ok(None)
        } else {
            rules
                .get(&symbol)
                .map(|body| Some(body.as_str()))
                .ok_or(GrammarError::UnknownSymbol {
                    symbol,
                    index,
                    pass,
                })
        }
    };

    let mut capacity = 0;
    for (index, symbol) in current.chars().enumerate() {
        capacity += match replacement(index, symbol)? {
            Some(body) => body.len(),
            None => symbol.len_utf8(),
        };
    }

    let mut out = String::with_capacity(capacity);
    for (index, symbol) in current.chars().enumerate() {
        match replacement(index, symbol)? {
            Some(body) => out.push_str(body),
            None => out.push(symbol),
        }
    }
    debug_assert_eq!(out.len(), capacity);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::STRUCTURAL_CONSTANTS;

    fn tree() -> Grammar {
        Grammar::from_strs(
            "X",
            &[('X', "F+[[X]-X]-F[-FX]+X"), ('F', "FF")],
            &STRUCTURAL_CONSTANTS,
        )
        .unwrap()
    }

    #[test]
    fn zero_iterations_is_identity() {
        let g = tree();
        assert_eq!(g.expand(0).unwrap(), "X");
        assert_eq!(g.expand_from("F[+X]", 0).unwrap(), "F[+X]");
    }

    #[test]
    fn one_pass_of_tree() {
        let s = tree().expand(1).unwrap();
        assert_eq!(s, "F+[[X]-X]-F[-FX]+X");
        assert_eq!(s.len(), 18);
    }

    #[test]
    fn second_pass_does_not_recurse_within_a_pass() {
        let g = Grammar::from_strs("A", &[('A', "AB"), ('B', "A")], &[]).unwrap();
        let gens: Vec<String> = g.generations().take(6).map(Result::unwrap).collect();
        assert_eq!(gens, ["A", "AB", "ABA", "ABAAB", "ABAABABA", "ABAABABAABAAB"]);
    }

    #[test]
    fn expansion_composes() {
        let g = tree();
        for n in 0..=3 {
            for m in 0..=3 {
                let whole = g.expand(n + m).unwrap();
                let split = g.expand_from(&g.expand(n).unwrap(), m).unwrap();
                assert_eq!(whole, split, "n={n} m={m}");
            }
        }
    }

    #[test]
    fn constants_survive_every_pass() {
        let g = tree();
        let start = "+-[]";
        for n in 0..5 {
            assert_eq!(g.expand_from(start, n).unwrap(), start);
        }
        for c in &g.constants {
            assert!(!g.rules.contains_key(c));
        }
    }

    #[test]
    fn brackets_stay_balanced() {
        let s = tree().expand(4).unwrap();
        let opens = s.chars().filter(|&c| c == '[').count();
        let closes = s.chars().filter(|&c| c == ']').count();
        assert_eq!(opens, closes);
    }

    #[test]
    fn unknown_symbol_reports_pass_and_index() {
        let rules = BTreeMap::from([('X', "F-Q".to_owned()), ('F', "F".to_owned())]);
        let constants = BTreeSet::from(['-']);
        let err = expand(&rules, "X", &constants, 2).unwrap_err();
        assert_eq!(
            err,
            GrammarError::UnknownSymbol {
                symbol: 'Q',
                index: 2,
                pass: 1
            }
        );
    }

    #[test]
    fn unknown_symbol_in_axiom_only_fails_once_rewritten() {
        let rules = BTreeMap::from([('X', "X".to_owned())]);
        let constants = BTreeSet::new();
        assert_eq!(expand(&rules, "XQ", &constants, 0).unwrap(), "XQ");
        assert!(expand(&rules, "XQ", &constants, 1).is_err());
    }

    #[test]
    fn generations_stop_after_error() {
        let g = Grammar {
            axiom: "A".into(),
            rules: BTreeMap::from([('A', "AZ".to_owned())]),
            constants: BTreeSet::new(),
        };
        let mut gens = g.generations();
        assert_eq!(gens.next(), Some(Ok("A".to_owned())));
        assert_eq!(gens.next(), Some(Ok("AZ".to_owned())));
        assert!(matches!(
            gens.next(),
            Some(Err(GrammarError::UnknownSymbol { symbol: 'Z', .. }))
        ));
        assert_eq!(gens.next(), None);
    }
}
