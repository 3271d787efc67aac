//! Choosing the best feasible solution.

use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{Result, SearchError};

use super::types::Solution;

/// Metric a solution is ranked by (smaller is better).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub enum Objective {
    /// Distance of the estimated duty ratio from the wanted one
    #[default]
    DutyDeviation,
    /// Width of the design frequency window
    FrequencySpread,
    /// Nominal discharge-pin current
    DischargeCurrent,
    /// Distance of the design window's centre from the target frequency
    CenterOffset { target_frequency: f64 },
}

impl Objective {
    /// Key of `solution` under this objective.
    pub fn key(&self, solution: &Solution) -> f64 {
        match self {
            Objective::DutyDeviation => solution.duty_deviation,
            Objective::FrequencySpread => solution.frequency_spread,
            Objective::DischargeCurrent => solution.discharge_design,
            Objective::CenterOffset { target_frequency } => {
                ((solution.frequency_max + solution.frequency_min) / 2.0 - target_frequency).abs()
            }
        }
    }
}

/// Solution with the smallest key; the earliest one wins ties.
///
/// Returns `None` for an empty slice. Unordered keys (NaN) lose against
/// every ordered key.
pub fn select_by<K, F>(solutions: &[Solution], key: F) -> Option<&Solution>
where
    K: PartialOrd,
    F: Fn(&Solution) -> K,
{
    let mut iter = solutions.iter();
    let first = iter.next()?;
    let mut best = (first, key(first));
    for solution in iter {
        let k = key(solution);
        let better = match k.partial_cmp(&best.1) {
            Some(Ordering::Less) => true,
            Some(_) => false,
            None => best.1.partial_cmp(&best.1).is_none() && k.partial_cmp(&k).is_some(),
        };
        if better {
            best = (solution, k);
        }
    }
    Some(best.0)
}

/// Best solution under `objective`, or [`SearchError::NoSolution`].
pub fn select(solutions: &[Solution], objective: Objective, evaluated: usize) -> Result<&Solution> {
    let best = select_by(solutions, |s| objective.key(s)).ok_or(SearchError::NoSolution { evaluated })?;
    tracing::info!(
        "Selected {} by {:?} (key {}) out of {} feasible",
        best.candidate,
        objective,
        objective.key(best),
        solutions.len()
    );
    Ok(best)
}

/// Up to `n` best solutions under `objective`, ties kept in enumeration order.
pub fn rank(solutions: &[Solution], objective: Objective, n: usize) -> Vec<Solution> {
    let mut ranked: Vec<(OrderedKey, &Solution)> = solutions
        .iter()
        .map(|s| (OrderedKey(objective.key(s)), s))
        .collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0));
    ranked.into_iter().take(n).map(|(_, s)| *s).collect()
}

/// Total order over keys with NaN sorted last.
#[derive(Debug, Clone, Copy)]
struct OrderedKey(f64);

impl PartialEq for OrderedKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedKey {}

impl PartialOrd for OrderedKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0.is_nan(), other.0.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::types::Candidate;

    fn solution(index: usize, duty_deviation: f64, frequency_spread: f64) -> Solution {
        Solution {
            index,
            candidate: Candidate::new(1000.0 + index as f64, 5000.0, 1000.0, 1e-9),
            frequency_spread,
            frequency_max: 60_000.0,
            frequency_min: 20_000.0,
            discharge_design: 1e-3 * (index + 1) as f64,
            discharge_low: 1e-3,
            duty_deviation,
            pot_setting: 2000.0,
        }
    }

    #[test]
    fn test_empty_is_no_solution() {
        assert!(select_by(&[], |s: &Solution| s.duty_deviation).is_none());
        assert_eq!(
            select(&[], Objective::DutyDeviation, 42),
            Err(SearchError::NoSolution { evaluated: 42 })
        );
    }

    #[test]
    fn test_min_with_first_occurrence_tie_break() {
        let solutions = vec![
            solution(0, 0.053, 40_000.0),
            solution(1, 0.001, 47_000.0),
            solution(2, 0.031, 45_000.0),
            solution(3, 0.001, 47_000.0),
        ];
        let best = select(&solutions, Objective::DutyDeviation, 4).unwrap();
        assert_eq!(best.index, 1);

        let narrowest = select(&solutions, Objective::FrequencySpread, 4).unwrap();
        assert_eq!(narrowest.index, 0);

        let lowest_current = select(&solutions, Objective::DischargeCurrent, 4).unwrap();
        assert_eq!(lowest_current.index, 0);
    }

    #[test]
    fn test_custom_key() {
        let solutions = vec![solution(0, 0.01, 1.0), solution(1, 0.02, 2.0)];
        let best = select_by(&solutions, |s| std::cmp::Reverse(s.index)).unwrap();
        assert_eq!(best.index, 1);
    }

    #[test]
    fn test_nan_never_wins() {
        let solutions = vec![solution(0, f64::NAN, 1.0), solution(1, 0.5, 1.0)];
        let best = select(&solutions, Objective::DutyDeviation, 2).unwrap();
        assert_eq!(best.index, 1);

        let ranked = rank(&solutions, Objective::DutyDeviation, 2);
        assert_eq!(ranked[0].index, 1);
        assert_eq!(ranked[1].index, 0);
    }

    #[test]
    fn test_center_offset() {
        let s = solution(0, 0.0, 0.0);
        let objective = Objective::CenterOffset {
            target_frequency: 38_000.0,
        };
        assert_eq!(objective.key(&s), 2000.0);
    }

    #[test]
    fn test_rank_is_stable() {
        let solutions = vec![
            solution(0, 0.053, 0.0),
            solution(1, 0.001, 0.0),
            solution(2, 0.031, 0.0),
            solution(3, 0.001, 0.0),
        ];
        let ranked: Vec<usize> = rank(&solutions, Objective::DutyDeviation, 3)
            .iter()
            .map(|s| s.index)
            .collect();
        assert_eq!(ranked, vec![1, 3, 2]);
    }
}
