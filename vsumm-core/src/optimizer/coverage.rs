// ============================================================================
// vsumm-core/src/optimizer/coverage.rs
// ============================================================================
//
// COVERAGE GREEDY: Smallest Greedy Prefix Reaching a Value Target
//
// Runs the lazy cost-scaled greedy from the empty set and stops as soon as the
// selection reaches `coverage × f(V)`. Only meaningful for monotone
// submodular objectives, where f(V) is the maximum; other objectives are
// rejected before any gain is evaluated. Whether GraphCut and SaturateCoverage
// qualify depends on the kernel having no negative entries.
//
// AI-ASSISTANT-INFO: Lazy greedy submodular cover

use log::{debug, info};

use super::lazy::LazyQueue;
use super::{validate_costs, validate_coverage, SelectionResult};
use crate::error::{CoreError, CoreResult};
use crate::objectives::{SelectionState, SetFunction};

/// Relative slack when comparing the running value against the target.
const COVERAGE_TOLERANCE: f64 = 1e-9;

/// Greedily grows a selection until `f(S) ≥ coverage · f(V)`.
///
/// # Errors
///
/// * `CoreError::UnsupportedConstraint` - If `f` is not monotone and submodular
/// * `CoreError::InvalidConfig` - If `coverage` is outside [0, 1] or costs are malformed
pub fn lazy_greedy_max_sc<F: SetFunction + ?Sized>(
    f: &F,
    costs: &[f64],
    coverage: f64,
) -> CoreResult<SelectionResult> {
    if !f.is_monotone() || !f.is_submodular() {
        return Err(CoreError::UnsupportedConstraint {
            objective: f.name().to_string(),
            mode: "coverage".to_string(),
        });
    }
    validate_coverage(coverage)?;
    validate_costs(f, costs)?;

    let n = f.ground_set_size();
    let everything: Vec<usize> = (0..n).collect();
    let full_value = f.evaluate(&everything);
    let target = coverage * full_value;
    let slack = COVERAGE_TOLERANCE * full_value.abs();
    debug!(
        "Coverage target {:.4} ({:.1}% of full value {:.4})",
        target,
        coverage * 100.0,
        full_value
    );

    let mut state = SelectionState::new(f);
    let mut queue = LazyQueue::new(f, &state, costs);
    while state.value() < target - slack {
        let Some((item, ratio)) = queue.next_best(f, &state, costs, |_| true) else {
            break;
        };
        let gain = state.insert(f, item);
        debug!(
            "Coverage round {}: added segment {} (gain {:.4}, gain/cost {:.4}, value {:.4})",
            state.len(),
            item,
            gain,
            ratio,
            state.value()
        );
    }

    info!(
        "Coverage greedy ({}) reached {:.4} of target {:.4} with {} of {} segments",
        f.name(),
        state.value(),
        target,
        state.len(),
        n
    );
    Ok(SelectionResult::from_state(&state, costs, queue.evaluations(), Vec::new()))
}
