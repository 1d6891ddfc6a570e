//! Text artifact of a potential heuristic.
//!
//! The first line holds the number of functions. Each function follows as
//!
//! ```text
//! begin_potentials
//! <var_id> <value_id> <weight>
//! ...
//! end_potentials
//! ```
//!
//! with one line per fact in global fact order and the weight printed with
//! 20 fractional digits.

use std::io::Write;

use potforge_core::{FdrVars, PotForgeError, Result};

use crate::heuristic::{PotentialFunction, PotentialHeuristic};

const BEGIN: &str = "begin_potentials";
const END: &str = "end_potentials";

/// Writes every function of `heuristic` to `out`.
pub fn write_potentials<W: Write>(
    out: &mut W,
    vars: &FdrVars,
    heuristic: &PotentialHeuristic,
) -> Result<()> {
    writeln!(out, "{}", heuristic.len())?;
    for function in heuristic.functions() {
        if function.fact_count() != vars.fact_count() {
            return Err(PotForgeError::InvalidInput(format!(
                "function has {} weights, task has {} facts",
                function.fact_count(),
                vars.fact_count()
            )));
        }
        writeln!(out, "{}", BEGIN)?;
        for (var_id, var) in vars.iter().enumerate() {
            for (val_id, &fact) in var.fact_ids.iter().enumerate() {
                writeln!(out, "{} {} {:.20}", var_id, val_id, function.weight(fact))?;
            }
        }
        writeln!(out, "{}", END)?;
    }
    Ok(())
}

/// Renders the artifact into a string.
pub fn potentials_to_string(vars: &FdrVars, heuristic: &PotentialHeuristic) -> Result<String> {
    let mut buf = Vec::new();
    write_potentials(&mut buf, vars, heuristic)?;
    String::from_utf8(buf).map_err(|e| PotForgeError::InvalidInput(e.to_string()))
}

/// Parses an artifact written for a task with variables `vars`.
///
/// Every fact must receive exactly one weight per function. Blank lines
/// are ignored.
pub fn read_potentials(input: &str, vars: &FdrVars) -> Result<PotentialHeuristic> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line_no, header) = lines.next().ok_or_else(|| parse_error(1, "empty input"))?;
    let count: usize = header
        .parse()
        .map_err(|_| parse_error(line_no, format!("expected function count, found '{}'", header)))?;

    let mut heuristic = PotentialHeuristic::new();
    let mut last_line = line_no;
    for _ in 0..count {
        let (line_no, begin) = lines
            .next()
            .ok_or_else(|| parse_error(last_line + 1, format!("expected '{}'", BEGIN)))?;
        if begin != BEGIN {
            return Err(parse_error(
                line_no,
                format!("expected '{}', found '{}'", BEGIN, begin),
            ));
        }

        let mut weights: Vec<Option<f64>> = vec![None; vars.fact_count()];
        last_line = line_no;
        loop {
            let (line_no, line) = lines
                .next()
                .ok_or_else(|| parse_error(last_line + 1, format!("expected '{}'", END)))?;
            last_line = line_no;
            if line == END {
                break;
            }
            let (fact, weight) = parse_weight_line(line_no, line, vars)?;
            if weights[fact].replace(weight).is_some() {
                return Err(parse_error(line_no, "duplicate weight for fact"));
            }
        }

        let weights = weights
            .into_iter()
            .enumerate()
            .map(|(fact, w)| {
                w.ok_or_else(|| {
                    let (var, val) = vars.var_val(fact);
                    parse_error(last_line, format!("missing weight for {} {}", var, val))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        heuristic.add(PotentialFunction::new(weights));
    }

    if let Some((line_no, line)) = lines.next() {
        return Err(parse_error(
            line_no,
            format!("unexpected trailing content '{}'", line),
        ));
    }
    Ok(heuristic)
}

fn parse_weight_line(line_no: usize, line: &str, vars: &FdrVars) -> Result<(usize, f64)> {
    let mut fields = line.split_whitespace();
    let (Some(var), Some(val), Some(weight), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(parse_error(
            line_no,
            format!("expected '<var> <value> <weight>', found '{}'", line),
        ));
    };

    let var: usize = var
        .parse()
        .map_err(|_| parse_error(line_no, format!("invalid variable id '{}'", var)))?;
    let val: usize = val
        .parse()
        .map_err(|_| parse_error(line_no, format!("invalid value id '{}'", val)))?;
    let weight: f64 = weight
        .parse()
        .map_err(|_| parse_error(line_no, format!("invalid weight '{}'", weight)))?;
    if weight.is_nan() {
        return Err(parse_error(line_no, "weight is NaN"));
    }
    let fact = vars
        .try_fact_id(var, val)
        .ok_or_else(|| parse_error(line_no, format!("unknown fact {} {}", var, val)))?;
    Ok((fact, weight))
}

fn parse_error(line: usize, message: impl Into<String>) -> PotForgeError {
    PotForgeError::Parse {
        line,
        message: message.into(),
    }
}

#[cfg(test)]
#[path = "io_tests.rs"]
mod tests;
