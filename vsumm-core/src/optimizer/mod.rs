// ============================================================================
// vsumm-core/src/optimizer/mod.rs
// ============================================================================
//
// OPTIMIZER: Greedy Maximization of Submodular Objectives
//
// This module hosts the four selection algorithms and the types they share.
// Every algorithm is generic over `SetFunction`, so callers holding an
// `Objective` dispatch once with `with_objective!` and the inner loops run on
// the concrete objective type.
//
// KEY COMPONENTS:
// - naive_greedy_max_knapsack: exhaustive gain-per-cost greedy under a budget
// - lazy_greedy_max_knapsack: same selection via stale upper bounds
// - lazy_greedy_max_sc: smallest greedy prefix reaching a coverage target
// - stream_greedy: single irrevocable pass against a threshold
//
// AI-ASSISTANT-INFO: Greedy submodular optimizers and selection results

// ---- External crate imports ----
use log::warn;
use serde::{Deserialize, Serialize};

// ---- Standard library imports ----
use std::fmt;

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::objectives::{SelectionState, SetFunction};

// ============================================================================
// SUBMODULES
// ============================================================================

mod coverage;
mod lazy;
mod naive;
mod stream;

// ============================================================================
// PUBLIC EXPORTS
// ============================================================================

pub use coverage::lazy_greedy_max_sc;
pub use lazy::lazy_greedy_max_knapsack;
pub use naive::naive_greedy_max_knapsack;
pub use stream::{stream_greedy, StreamDecision, StreamResult, StreamVerdict};

// ============================================================================
// SHARED TYPES
// ============================================================================

/// Non-fatal conditions encountered while selecting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionWarning {
    /// No item fits the budget, so the selection is empty.
    BudgetTooSmall { budget: f64, cheapest: f64 },
    /// A seed element did not fit the remaining budget and was skipped.
    SeedDropped { item: usize, cost: f64, budget: f64 },
}

impl fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionWarning::BudgetTooSmall { budget, cheapest } => write!(
                f,
                "budget {} is smaller than the cheapest segment cost {}",
                budget, cheapest
            ),
            SelectionWarning::SeedDropped { item, cost, budget } => write!(
                f,
                "seed segment {} (cost {}) does not fit the budget {}",
                item, cost, budget
            ),
        }
    }
}

/// Outcome of a selection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Selected indices in the order they were added
    pub selected: Vec<usize>,
    /// Sum of the costs of the selected items
    pub total_cost: f64,
    /// Objective value of the selected set
    pub value: f64,
    /// Number of marginal gain evaluations performed
    pub evaluations: usize,
    /// Non-fatal conditions encountered along the way
    pub warnings: Vec<SelectionWarning>,
}

impl SelectionResult {
    /// Selected indices in ascending order.
    pub fn sorted(&self) -> Vec<usize> {
        let mut indices = self.selected.clone();
        indices.sort_unstable();
        indices
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    fn from_state(state: &SelectionState, costs: &[f64], evaluations: usize, warnings: Vec<SelectionWarning>) -> Self {
        Self {
            selected: state.members().to_vec(),
            total_cost: state.members().iter().map(|&i| costs[i]).sum(),
            value: state.value(),
            evaluations,
            warnings,
        }
    }
}

/// Constraint under which a summary is selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionMode {
    /// Maximize the objective with total cost at most `budget`
    Budget { budget: f64 },
    /// Reach `threshold × f(V)` with as few greedy steps as possible
    Coverage { threshold: f64 },
    /// One pass with acceptance threshold scaled by `epsilon`
    Streaming { epsilon: f64 },
}

impl SelectionMode {
    pub fn name(&self) -> &'static str {
        match self {
            SelectionMode::Budget { .. } => "budget",
            SelectionMode::Coverage { .. } => "coverage",
            SelectionMode::Streaming { .. } => "streaming",
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        match *self {
            SelectionMode::Budget { budget } => validate_budget(budget),
            SelectionMode::Coverage { threshold } => validate_coverage(threshold),
            SelectionMode::Streaming { epsilon } => validate_epsilon(epsilon),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Budget { budget } => write!(f, "budget {}", budget),
            SelectionMode::Coverage { threshold } => write!(f, "coverage {}", threshold),
            SelectionMode::Streaming { epsilon } => write!(f, "streaming epsilon {}", epsilon),
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Checks that there is one finite positive cost per ground-set item.
pub(crate) fn validate_costs<F: SetFunction + ?Sized>(f: &F, costs: &[f64]) -> CoreResult<()> {
    let n = f.ground_set_size();
    if n == 0 {
        return Err(CoreError::EmptyInput("ground set is empty".to_string()));
    }
    if costs.len() != n {
        return Err(CoreError::InvalidConfig(format!(
            "expected {} costs, found {}",
            n,
            costs.len()
        )));
    }
    if let Some((i, c)) = costs
        .iter()
        .enumerate()
        .find(|&(_, &c)| !(c.is_finite() && c > 0.0))
    {
        return Err(CoreError::InvalidConfig(format!(
            "cost of item {} must be positive and finite, got {}",
            i, c
        )));
    }
    Ok(())
}

pub(crate) fn validate_budget(budget: f64) -> CoreResult<()> {
    if !(budget.is_finite() && budget >= 0.0) {
        return Err(CoreError::InvalidConfig(format!(
            "budget must be non-negative, got {}",
            budget
        )));
    }
    Ok(())
}

pub(crate) fn validate_coverage(threshold: f64) -> CoreResult<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(CoreError::InvalidConfig(format!(
            "coverage threshold must lie in [0, 1], got {}",
            threshold
        )));
    }
    Ok(())
}

pub(crate) fn validate_epsilon(epsilon: f64) -> CoreResult<()> {
    if !(epsilon.is_finite() && epsilon >= 0.0) {
        return Err(CoreError::InvalidConfig(format!(
            "epsilon must be non-negative, got {}",
            epsilon
        )));
    }
    Ok(())
}

pub(crate) fn validate_items(n: usize, items: &[usize], what: &str) -> CoreResult<()> {
    if let Some(&item) = items.iter().find(|&&i| i >= n) {
        return Err(CoreError::InvalidConfig(format!(
            "{} index {} is out of range for {} items",
            what, item, n
        )));
    }
    Ok(())
}

// ============================================================================
// SEEDING
// ============================================================================

/// Inserts the seed elements that fit the budget, in order, and returns the
/// cost spent on them. Seeds that do not fit are reported and skipped.
pub(crate) fn apply_seeds<F: SetFunction + ?Sized>(
    f: &F,
    state: &mut SelectionState,
    costs: &[f64],
    budget: f64,
    seeds: &[usize],
    warnings: &mut Vec<SelectionWarning>,
) -> f64 {
    let mut spent = 0.0;
    for &item in seeds {
        if state.contains(item) {
            continue;
        }
        if spent + costs[item] <= budget {
            state.insert(f, item);
            spent += costs[item];
        } else {
            warn!(
                "Seed segment {} (cost {:.3}) does not fit the budget {:.3}; skipping it",
                item, costs[item], budget
            );
            warnings.push(SelectionWarning::SeedDropped {
                item,
                cost: costs[item],
                budget,
            });
        }
    }
    spent
}

/// Emits `BudgetTooSmall` when the run ended with nothing selected.
pub(crate) fn check_empty_selection(
    state: &SelectionState,
    costs: &[f64],
    budget: f64,
    warnings: &mut Vec<SelectionWarning>,
) {
    if !state.is_empty() {
        return;
    }
    let cheapest = costs.iter().copied().fold(f64::INFINITY, f64::min);
    if cheapest > budget {
        warn!(
            "Budget {:.3} is smaller than the cheapest segment ({:.3}); summary is empty",
            budget, cheapest
        );
        warnings.push(SelectionWarning::BudgetTooSmall { budget, cheapest });
    }
}
