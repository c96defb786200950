// ============================================================================
// vsumm-core/src/optimizer/naive.rs
// ============================================================================
//
// NAIVE GREEDY: Exhaustive Cost-Scaled Greedy under a Knapsack Budget
//
// Each round evaluates every unselected item that still fits the remaining
// budget and adds the one with the largest gain per unit cost. Ties go to the
// lowest index. Gains of zero or below are still taken while anything fits,
// so non-monotone objectives keep filling the budget.
//
// AI-ASSISTANT-INFO: Naive greedy knapsack maximization

use log::{debug, info};

use super::{
    apply_seeds, check_empty_selection, validate_budget, validate_costs, validate_items,
    SelectionResult,
};
use crate::error::CoreResult;
use crate::objectives::{SelectionState, SetFunction};

/// Greedily maximizes `f` subject to `Σ cost ≤ budget`.
///
/// # Arguments
///
/// * `f` - The objective to maximize
/// * `costs` - Positive cost per item
/// * `budget` - Maximum total cost
/// * `initial` - Seed items inserted before the first round
///
/// # Returns
///
/// * `Ok(SelectionResult)` - Items in insertion order; empty with a
///   `BudgetTooSmall` warning when nothing fits
/// * `Err(CoreError::InvalidConfig)` - On malformed costs, budget or seeds
pub fn naive_greedy_max_knapsack<F: SetFunction + ?Sized>(
    f: &F,
    costs: &[f64],
    budget: f64,
    initial: &[usize],
) -> CoreResult<SelectionResult> {
    validate_costs(f, costs)?;
    validate_budget(budget)?;
    let n = f.ground_set_size();
    validate_items(n, initial, "seed")?;

    let mut state = SelectionState::new(f);
    let mut warnings = Vec::new();
    let mut spent = apply_seeds(f, &mut state, costs, budget, initial, &mut warnings);
    let mut evaluations = 0;

    loop {
        let mut best: Option<(usize, f64)> = None;
        for item in 0..n {
            if state.contains(item) || spent + costs[item] > budget {
                continue;
            }
            let ratio = state.gain(f, item) / costs[item];
            evaluations += 1;
            if best.is_none_or(|(_, best_ratio)| ratio > best_ratio) {
                best = Some((item, ratio));
            }
        }

        let Some((item, ratio)) = best else {
            break;
        };
        let gain = state.insert(f, item);
        spent += costs[item];
        debug!(
            "Greedy round {}: added segment {} (gain {:.4}, gain/cost {:.4}, spent {:.3}/{:.3})",
            state.len(),
            item,
            gain,
            ratio,
            spent,
            budget
        );
    }

    check_empty_selection(&state, costs, budget, &mut warnings);
    info!(
        "Naive greedy ({}) selected {} of {} segments, value {:.4}, {} evaluations",
        f.name(),
        state.len(),
        n,
        state.value(),
        evaluations
    );
    Ok(SelectionResult::from_state(&state, costs, evaluations, warnings))
}
