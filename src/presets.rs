//! Well-known fractal plants and curves.

use crate::grammar::{Grammar, STRUCTURAL_CONSTANTS};
use crate::system::LSystem;

const WITH_F: [char; 5] = ['+', '-', '[', ']', 'F'];

fn preset(
    name: &str,
    axiom: &str,
    rules: &[(char, &str)],
    constants: &[char],
    angle: f64,
) -> LSystem {
    let grammar = Grammar {
        axiom: axiom.to_owned(),
        rules: rules
            .iter()
            .map(|&(var, body)| (var, body.to_owned()))
            .collect(),
        constants: constants.iter().copied().collect(),
    };
    LSystem::new(name, grammar, angle)
}

/// Branching plant, 25 degrees, with the depth curl on `X`. Drawn at 5 passes.
pub fn pretty_tree() -> LSystem {
    preset(
        "pretty_tree",
        "X",
        &[('X', "F+[[X]-X]-F[-FX]+X"), ('F', "FF")],
        &STRUCTURAL_CONSTANTS,
        25.0,
    )
    .with_iterations(5)
    .with_curl_step(5.0)
}

/// The same plant opened up to 45 degrees, without the curl.
pub fn bushy_tree() -> LSystem {
    preset(
        "bushy_tree",
        "X",
        &[('X', "F+[[X]-X]-F[-FX]+X"), ('F', "FF")],
        &STRUCTURAL_CONSTANTS,
        45.0,
    )
    .with_iterations(5)
}

/// Six-fold star pattern.
pub fn hexperiment() -> LSystem {
    preset(
        "hexperiment",
        "F",
        &[('F', "F++F++F++F++F++F-F")],
        &STRUCTURAL_CONSTANTS,
        30.0,
    )
    .with_iterations(3)
}

pub fn conifer() -> LSystem {
    preset(
        "conifer",
        "Y",
        &[('X', "X[-FFF][+FFF]FX"), ('Y', "YFX[+Y][-Y]")],
        &WITH_F,
        25.7,
    )
    .with_iterations(5)
}

pub fn prong_bush() -> LSystem {
    preset(
        "prong_bush",
        "F",
        &[('F', "FF+[+F-F-F]-[-F+F+F]")],
        &STRUCTURAL_CONSTANTS,
        22.5,
    )
    .with_iterations(4)
}

/// Hilbert space-filling curve.
pub fn hilbert() -> LSystem {
    preset(
        "hilbert",
        "X",
        &[('X', "-YF+XFX+FY-"), ('Y', "+XF-YFY-FX+")],
        &WITH_F,
        90.0,
    )
    .with_iterations(5)
}

pub fn tile() -> LSystem {
    preset(
        "tile",
        "F+F+F+F",
        &[('F', "FF+F-F+F+FF")],
        &STRUCTURAL_CONSTANTS,
        90.0,
    )
    .with_iterations(3)
}

/// All presets, in display order.
pub fn all() -> Vec<LSystem> {
    vec![
        pretty_tree(),
        hexperiment(),
        bushy_tree(),
        conifer(),
        prong_bush(),
        hilbert(),
        tile(),
    ]
}

pub fn by_name(name: &str) -> Option<LSystem> {
    all().into_iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_closed() {
        for system in all() {
            assert!(system.grammar.validate().is_ok(), "{}", system.name);
        }
    }

    #[test]
    fn names_are_unique() {
        let systems = all();
        for (i, a) in systems.iter().enumerate() {
            for b in &systems[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(by_name("hilbert").map(|s| s.angle), Some(90.0));
        assert!(by_name("fern").is_none());
    }
}
