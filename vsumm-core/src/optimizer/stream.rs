// ============================================================================
// vsumm-core/src/optimizer/stream.rs
// ============================================================================
//
// STREAM GREEDY: Single-Pass Threshold Selection
//
// Items arrive in a fixed order and are each examined exactly once. An item is
// kept when its marginal gain against the current selection reaches
// τ_t = epsilon × m_t, where m_t is the largest singleton value seen so far
// (including the current item). Decisions are irrevocable.
//
// AI-ASSISTANT-INFO: Streaming threshold greedy with a per-item decision log

use log::{info, trace};
use serde::{Deserialize, Serialize};

use super::{validate_costs, validate_epsilon, validate_items, SelectionResult};
use crate::error::{CoreError, CoreResult};
use crate::objectives::{SelectionState, SetFunction};

/// What happened to one item of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamVerdict {
    Accepted,
    Rejected,
    /// Already part of the selection when the stream reached it
    AlreadySelected,
}

/// Decision record for one position of the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDecision {
    pub item: usize,
    /// Marginal gain at arrival; `None` when the item was already selected
    pub gain: Option<f64>,
    pub threshold: f64,
    pub verdict: StreamVerdict,
}

/// Selection plus the in-order decision log of a streaming pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamResult {
    pub selection: SelectionResult,
    pub decisions: Vec<StreamDecision>,
}

/// Makes one pass over `order`, irrevocably keeping items whose gain reaches
/// the running threshold.
///
/// # Arguments
///
/// * `f` - The objective to maximize
/// * `costs` - Positive cost per item, used for reporting the total cost
/// * `epsilon` - Threshold scale; 0 keeps every non-negative gain
/// * `initial` - Items inserted before the pass begins
/// * `order` - Arrival order; each index at most once
pub fn stream_greedy<F: SetFunction + ?Sized>(
    f: &F,
    costs: &[f64],
    epsilon: f64,
    initial: &[usize],
    order: &[usize],
) -> CoreResult<StreamResult> {
    validate_costs(f, costs)?;
    validate_epsilon(epsilon)?;
    let n = f.ground_set_size();
    validate_items(n, initial, "initial item")?;
    validate_items(n, order, "stream order")?;

    let mut seen = vec![false; n];
    for &item in order {
        if std::mem::replace(&mut seen[item], true) {
            return Err(CoreError::InvalidConfig(format!(
                "stream order lists item {} more than once",
                item
            )));
        }
    }

    let mut state = SelectionState::new(f);
    for &item in initial {
        state.insert(f, item);
    }

    let empty = f.empty_cache();
    let mut best_singleton = 0.0_f64;
    let mut evaluations = 0;
    let mut decisions = Vec::with_capacity(order.len());

    for &item in order {
        if state.contains(item) {
            decisions.push(StreamDecision {
                item,
                gain: None,
                threshold: epsilon * best_singleton,
                verdict: StreamVerdict::AlreadySelected,
            });
            continue;
        }

        best_singleton = best_singleton.max(f.gain_with_cache(&empty, item));
        let threshold = epsilon * best_singleton;
        let gain = state.gain(f, item);
        evaluations += 2;

        let verdict = if gain >= threshold {
            state.insert(f, item);
            StreamVerdict::Accepted
        } else {
            StreamVerdict::Rejected
        };
        trace!(
            "Stream item {}: gain {:.4} vs threshold {:.4} -> {:?}",
            item, gain, threshold, verdict
        );
        decisions.push(StreamDecision {
            item,
            gain: Some(gain),
            threshold,
            verdict,
        });
    }

    info!(
        "Stream greedy ({}) kept {} of {} streamed segments, value {:.4}",
        f.name(),
        state.len(),
        order.len(),
        state.value()
    );
    Ok(StreamResult {
        selection: SelectionResult::from_state(&state, costs, evaluations, Vec::new()),
        decisions,
    })
}
