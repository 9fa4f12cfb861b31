// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Convergent classes and paths, grouped by length.

use super::{blip, SweepError, SweepRange};
use crate::arith::CollatzInt;
use crate::config::CollatzParams;
use crate::orbit::OrbitSequence;
use crate::path::Path;
use crate::tree::FrequencyTree;

/// Aggregate for one length: how many distinct keys and how many starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRow {
    pub length: usize,
    pub nodes: usize,
    pub frequency: u64,
}

fn rows_of<K>(trees: &[FrequencyTree<K>]) -> Vec<LengthRow> {
    trees
        .iter()
        .enumerate()
        .filter(|(_, tree)| !tree.is_empty())
        .map(|(length, tree)| LengthRow {
            length,
            nodes: tree.nodes(),
            frequency: tree.total(),
        })
        .collect()
}

/// Equivalence classes of convergent starts, keyed by path factors.
#[derive(Debug)]
pub struct ClassSummary {
    range: SweepRange,
    by_factors: Vec<FrequencyTree<String>>,
    found: u64,
}

impl ClassSummary {
    /// The range swept.
    pub fn range(&self) -> &SweepRange {
        &self.range
    }

    /// Class strings of starts converging with exactly `factors` factors.
    pub fn classes(&self, factors: usize) -> Option<&FrequencyTree<String>> {
        self.by_factors.get(factors)
    }

    /// Every factor count with its tree, ascending.
    pub fn trees(&self) -> impl Iterator<Item = (usize, &FrequencyTree<String>)> {
        self.by_factors.iter().enumerate()
    }

    /// One row per non-empty factor count, ascending.
    pub fn rows(&self) -> Vec<LengthRow> {
        rows_of(&self.by_factors)
    }

    /// Starts that converged within the digit limit.
    pub fn found(&self) -> u64 {
        self.found
    }
}

/// For every start in `1..=find_range(|digits|)` (negated for negative
/// `digits`) converging with at most `|digits|` factors, count its class
/// string truncated to its path factors.
pub fn convergent_classes<T: CollatzInt>(
    digits: i32,
    params: &CollatzParams,
) -> Result<ClassSummary, SweepError> {
    let range = SweepRange::exponent(digits, params)?;
    let limit = digits.unsigned_abs() as usize;
    range.check::<T>()?;
    let width = range.width();
    let mut by_factors: Vec<FrequencyTree<String>> =
        std::iter::repeat_with(FrequencyTree::new).take(limit + 1).collect();
    let mut found = 0;

    for index in 0..range.len() {
        blip(index, &range);
        let path = Path::new(range.value::<T>(index)?, params);
        tracing::trace!("{}", path.report_class(width));
        let factors = path.path_factors() as usize;
        if factors <= limit {
            found += 1;
            by_factors[factors].insert(path.flow(factors));
        }
    }

    tracing::debug!(found, range = range.len(), "convergent classes");
    Ok(ClassSummary {
        range,
        by_factors,
        found,
    })
}

/// Largest magnitude met during a sweep, and the start that reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Largest<T> {
    pub value: T,
    pub start: T,
}

/// Convergent orbits keyed by orbit length.
#[derive(Debug)]
pub struct PathSummary<T> {
    range: SweepRange,
    swept: u64,
    by_length: Vec<FrequencyTree<OrbitSequence>>,
    synthesized: Vec<LengthRow>,
    largest: Option<Largest<T>>,
    errors: u64,
}

impl<T> PathSummary<T> {
    /// The full range the summary stands for.
    pub fn range(&self) -> &SweepRange {
        &self.range
    }

    /// Starts actually computed; fewer than the range in speed mode.
    pub fn swept(&self) -> u64 {
        self.swept
    }

    /// Convergent orbits with exactly `length` legs.
    pub fn orbits(&self, length: usize) -> Option<&FrequencyTree<OrbitSequence>> {
        self.by_length.get(length)
    }

    /// Every orbit length with its tree, ascending.
    pub fn trees(&self) -> impl Iterator<Item = (usize, &FrequencyTree<OrbitSequence>)> {
        self.by_length.iter().enumerate()
    }

    /// Largest magnitude visited; not tracked in speed mode.
    pub fn largest(&self) -> Option<&Largest<T>> {
        self.largest.as_ref()
    }

    /// Starts whose path recorded an error.
    pub fn errors(&self) -> u64 {
        self.errors
    }

    /// One row per orbit length, ascending, including the rows speed mode
    /// fills in without computing them.
    pub fn rows(&self) -> Vec<LengthRow> {
        let mut rows = rows_of(&self.by_length);
        for extra in &self.synthesized {
            match rows.iter_mut().find(|row| row.length == extra.length) {
                Some(row) => {
                    row.nodes += extra.nodes;
                    row.frequency += extra.frequency;
                }
                None => rows.push(*extra),
            }
        }
        rows.sort_by_key(|row| row.length);
        rows
    }

    /// Convergent starts over the whole range.
    pub fn total(&self) -> u64 {
        self.rows().iter().map(|row| row.frequency).sum()
    }
}

/// For every start in `1..=find_range(|path_length|)` converging with at most
/// `|path_length|` factors, count its orbit under its orbit length.
///
/// In speed mode each path stops once it exceeds the factor limit and the
/// largest value is not tracked. For a positive range with a limit of at
/// least two, only starts `3 (mod 4)` are computed and the orbits `1` (every
/// even start) and `0 2` (every start `1 (mod 4)`) are filled in as
/// `range/2` and `range/4`. Other ranges are swept in full.
pub fn convergent_paths<T: CollatzInt>(
    path_length: i32,
    params: &CollatzParams,
) -> Result<PathSummary<T>, SweepError> {
    let full = SweepRange::exponent(path_length, params)?;
    let limit = path_length.unsigned_abs() as usize;
    // Even starts and starts 1 (mod 4) only have the orbits `1` and `0 2`
    // when the range is positive and both fit under the factor limit.
    let shortcut = params.speed() && !full.is_negative() && limit >= 2;
    let range = if shortcut {
        SweepRange::new(3, full.last(), 4)
    } else {
        full
    };
    range.check::<T>()?;
    let width = full.width();

    let mut by_length: Vec<FrequencyTree<OrbitSequence>> = Vec::new();
    let mut largest: Option<Largest<T>> = None;
    let mut errors = 0;

    for index in 0..range.len() {
        blip(index, &range);
        let start: T = range.value(index)?;
        let path = Path::with_class_len(start.clone(), limit, params);
        tracing::trace!("{}", path.report_path(width));

        if !path.errors().is_empty() {
            errors += 1;
            tracing::warn!(start = %start, errors = %path.errors(), "error building path");
        }

        if !params.speed() {
            let bigger = match &largest {
                Some(seen) => path.peak().abs_value() > seen.value.abs_value(),
                None => true,
            };
            if bigger {
                largest = Some(Largest {
                    value: path.peak().clone(),
                    start,
                });
            }
        }

        if path.path_factors() as usize <= limit {
            let length = path.path_length();
            if by_length.len() <= length {
                by_length.resize_with(length + 1, FrequencyTree::new);
            }
            by_length[length].insert(path.into_orbit());
        }
    }

    let synthesized = if shortcut {
        vec![
            LengthRow {
                length: 1,
                nodes: 1,
                frequency: full.len() / 2,
            },
            LengthRow {
                length: 2,
                nodes: 1,
                frequency: full.len() / 4,
            },
        ]
    } else {
        Vec::new()
    };

    Ok(PathSummary {
        range: full,
        swept: range.len(),
        by_length,
        synthesized,
        largest,
        errors,
    })
}
