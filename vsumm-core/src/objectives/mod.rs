// ============================================================================
// vsumm-core/src/objectives/mod.rs
// ============================================================================
//
// OBJECTIVES: Submodular Set Functions over the Similarity Kernel
//
// This module defines the set-function contract shared by every objective and
// the closed family of objectives used for summarization. Each objective
// borrows the kernel matrix and keeps only O(n) precomputed vectors of its
// own; the matrix is never copied or mutated.
//
// KEY COMPONENTS:
// - SetFunction: evaluate / incremental gain / cache update contract
// - SelectionState: a growing set plus the objective's per-item cache
// - ObjectiveKind: the objective selector (parsed from names or legacy codes)
// - Objective: the constructed variant, dispatched once per optimizer call
//
// WORKFLOW:
// 1. Build an Objective from a kind, the kernel and ObjectiveParams
// 2. Dispatch to the concrete type with `with_objective!`
// 3. Optimizers grow a SelectionState, querying gains from its cache
//
// AI-ASSISTANT-INFO: Submodular objective family and incremental gain contract

// ---- External crate imports ----
use serde::{Deserialize, Serialize};

// ---- Standard library imports ----
use std::fmt;
use std::str::FromStr;

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::kernel::KernelMatrix;

// ============================================================================
// SUBMODULES
// ============================================================================

mod disparity_min;
mod facility_location;
mod graph_cut;
mod mmr;
mod saturate_coverage;

// ============================================================================
// PUBLIC EXPORTS
// ============================================================================

pub use disparity_min::DisparityMin;
pub use facility_location::FacilityLocation;
pub use graph_cut::GraphCut;
pub use mmr::Mmr;
pub use saturate_coverage::SaturateCoverage;

// ============================================================================
// SET FUNCTION CONTRACT
// ============================================================================

/// A set function over the indices `0..n` of a ground set.
///
/// Implementations keep a per-item cache (best similarity, coverage sum, or
/// similarity-to-set sum, depending on the objective) so that a marginal gain
/// costs O(n) or O(1) instead of a full re-evaluation. `evaluate` is the
/// independent from-scratch definition the cache must agree with.
pub trait SetFunction {
    /// Short human-readable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Size `n` of the ground set.
    fn ground_set_size(&self) -> usize;

    /// Whether `evaluate(S) <= evaluate(T)` holds for all `S ⊆ T`.
    fn is_monotone(&self) -> bool;

    /// Whether gains never grow as the set grows. Lazy evaluation returns the
    /// naive greedy's selection only when this holds.
    fn is_submodular(&self) -> bool {
        true
    }

    /// Whether a greedy run must start from a seed element.
    fn requires_seed(&self) -> bool {
        false
    }

    /// Value of the function on `set`, computed from scratch.
    fn evaluate(&self, set: &[usize]) -> f64;

    /// Cache contents for the empty set.
    fn empty_cache(&self) -> Vec<f64>;

    /// Gain of adding `item` to the set summarized by `cache`.
    fn gain_with_cache(&self, cache: &[f64], item: usize) -> f64;

    /// Updates `cache` to account for `item` joining the set.
    fn update_cache(&self, cache: &mut [f64], item: usize);

    /// `evaluate(set ∪ {item}) - evaluate(set)` for `item ∉ set`.
    fn marginal_gain(&self, item: usize, set: &[usize]) -> f64 {
        let mut state = SelectionState::new(self);
        for &member in set {
            state.insert(self, member);
        }
        state.gain(self, item)
    }
}

/// A set under construction together with the objective's cache for it.
///
/// The state does not hold the objective; every call takes it explicitly so a
/// state can only be advanced by the function it was created for.
#[derive(Debug, Clone)]
pub struct SelectionState {
    members: Vec<usize>,
    in_set: Vec<bool>,
    cache: Vec<f64>,
    value: f64,
}

impl SelectionState {
    /// Empty selection for `f`.
    pub fn new<F: SetFunction + ?Sized>(f: &F) -> Self {
        Self {
            members: Vec::new(),
            in_set: vec![false; f.ground_set_size()],
            cache: f.empty_cache(),
            value: f.evaluate(&[]),
        }
    }

    /// Selected items in insertion order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn contains(&self, item: usize) -> bool {
        self.in_set[item]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Objective value of the current set, accumulated from gains.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Marginal gain of `item` against the current set.
    #[inline]
    pub fn gain<F: SetFunction + ?Sized>(&self, f: &F, item: usize) -> f64 {
        f.gain_with_cache(&self.cache, item)
    }

    /// Adds `item` and returns the gain it contributed. Re-inserting a member
    /// is a no-op returning 0.
    pub fn insert<F: SetFunction + ?Sized>(&mut self, f: &F, item: usize) -> f64 {
        if self.in_set[item] {
            return 0.0;
        }
        let gain = f.gain_with_cache(&self.cache, item);
        f.update_cache(&mut self.cache, item);
        self.value += gain;
        self.members.push(item);
        self.in_set[item] = true;
        gain
    }
}

/// Symmetrized kernel entry `(k[i][j] + k[j][i]) / 2`.
#[inline]
pub(crate) fn symmetric_entry(kernel: &KernelMatrix, i: usize, j: usize) -> f64 {
    0.5 * (kernel.get(i, j) + kernel.get(j, i))
}

/// `Σ_{i<j ∈ set} (k[i][j] + k[j][i]) / 2`, shared by the pairwise objectives.
pub(crate) fn pairwise_similarity(kernel: &KernelMatrix, set: &[usize]) -> f64 {
    let mut total = 0.0;
    for (a, &i) in set.iter().enumerate() {
        for &j in &set[a + 1..] {
            total += symmetric_entry(kernel, i, j);
        }
    }
    total
}

// ============================================================================
// OBJECTIVE SELECTION
// ============================================================================

/// Selector for the objective family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    DisparityMin,
    Mmr,
    FacilityLocation,
    GraphCut,
    SaturateCoverage,
}

impl ObjectiveKind {
    pub const ALL: [ObjectiveKind; 5] = [
        ObjectiveKind::DisparityMin,
        ObjectiveKind::Mmr,
        ObjectiveKind::FacilityLocation,
        ObjectiveKind::GraphCut,
        ObjectiveKind::SaturateCoverage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveKind::DisparityMin => "disparity_min",
            ObjectiveKind::Mmr => "mmr",
            ObjectiveKind::FacilityLocation => "facility_location",
            ObjectiveKind::GraphCut => "graph_cut",
            ObjectiveKind::SaturateCoverage => "saturate_coverage",
        }
    }
}

impl fmt::Display for ObjectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectiveKind {
    type Err = CoreError;

    /// Accepts snake_case or kebab-case names, short aliases, and the numeric
    /// codes 0-4 used by older summarizer configurations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "disparity_min" | "disparitymin" | "dm" | "0" => Ok(ObjectiveKind::DisparityMin),
            "mmr" | "1" => Ok(ObjectiveKind::Mmr),
            "facility_location" | "facilitylocation" | "fl" | "2" => Ok(ObjectiveKind::FacilityLocation),
            "graph_cut" | "graphcut" | "gc" | "3" => Ok(ObjectiveKind::GraphCut),
            "saturate_coverage" | "saturatecoverage" | "sc" | "4" => Ok(ObjectiveKind::SaturateCoverage),
            _ => Err(CoreError::UnsupportedObjective(s.trim().to_string())),
        }
    }
}

/// Hyperparameters of the objective family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveParams {
    pub mmr_relevance_weight: f64,
    pub graph_cut_lambda: f64,
    pub saturation_alpha: f64,
}

impl Default for ObjectiveParams {
    fn default() -> Self {
        Self {
            mmr_relevance_weight: crate::config::DEFAULT_MMR_RELEVANCE_WEIGHT,
            graph_cut_lambda: crate::config::DEFAULT_GRAPH_CUT_LAMBDA,
            saturation_alpha: crate::config::DEFAULT_SATURATION_ALPHA,
        }
    }
}

impl ObjectiveParams {
    pub fn validate(&self) -> CoreResult<()> {
        let w = self.mmr_relevance_weight;
        if !(0.0..=1.0).contains(&w) {
            return Err(CoreError::InvalidConfig(format!(
                "MMR relevance weight must lie in [0, 1], got {}",
                w
            )));
        }
        let lambda = self.graph_cut_lambda;
        if !(lambda.is_finite() && lambda >= 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "graph cut lambda must be non-negative, got {}",
                lambda
            )));
        }
        let alpha = self.saturation_alpha;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(CoreError::InvalidConfig(format!(
                "saturation alpha must lie in (0, 1], got {}",
                alpha
            )));
        }
        Ok(())
    }
}

/// A constructed objective bound to a borrowed kernel.
#[derive(Debug, Clone)]
pub enum Objective<'k> {
    DisparityMin(DisparityMin<'k>),
    Mmr(Mmr<'k>),
    FacilityLocation(FacilityLocation<'k>),
    GraphCut(GraphCut<'k>),
    SaturateCoverage(SaturateCoverage<'k>),
}

impl<'k> Objective<'k> {
    pub fn new(kind: ObjectiveKind, kernel: &'k KernelMatrix, params: &ObjectiveParams) -> CoreResult<Self> {
        params.validate()?;
        if kernel.is_empty() {
            return Err(CoreError::EmptyInput("kernel matrix is empty".to_string()));
        }
        Ok(match kind {
            ObjectiveKind::DisparityMin => Objective::DisparityMin(DisparityMin::new(kernel)),
            ObjectiveKind::Mmr => Objective::Mmr(Mmr::new(kernel, params.mmr_relevance_weight)),
            ObjectiveKind::FacilityLocation => Objective::FacilityLocation(FacilityLocation::new(kernel)),
            ObjectiveKind::GraphCut => Objective::GraphCut(GraphCut::new(kernel, params.graph_cut_lambda)),
            ObjectiveKind::SaturateCoverage => {
                Objective::SaturateCoverage(SaturateCoverage::new(kernel, params.saturation_alpha))
            }
        })
    }

    pub fn kind(&self) -> ObjectiveKind {
        match self {
            Objective::DisparityMin(_) => ObjectiveKind::DisparityMin,
            Objective::Mmr(_) => ObjectiveKind::Mmr,
            Objective::FacilityLocation(_) => ObjectiveKind::FacilityLocation,
            Objective::GraphCut(_) => ObjectiveKind::GraphCut,
            Objective::SaturateCoverage(_) => ObjectiveKind::SaturateCoverage,
        }
    }
}

/// Binds the concrete objective inside an [`Objective`] to `$f` and evaluates
/// `$body` with it, so generic optimizers are monomorphized per variant and
/// the variant match happens once per call.
macro_rules! with_objective {
    ($objective:expr, $f:ident => $body:expr) => {
        match $objective {
            $crate::objectives::Objective::DisparityMin($f) => $body,
            $crate::objectives::Objective::Mmr($f) => $body,
            $crate::objectives::Objective::FacilityLocation($f) => $body,
            $crate::objectives::Objective::GraphCut($f) => $body,
            $crate::objectives::Objective::SaturateCoverage($f) => $body,
        }
    };
}
pub(crate) use with_objective;

/// Delegating implementation for callers that prefer a single type. Each
/// call re-dispatches; optimizers invoked through the summarizer use
/// `with_objective!` instead.
impl SetFunction for Objective<'_> {
    fn name(&self) -> &'static str {
        with_objective!(self, f => f.name())
    }

    fn ground_set_size(&self) -> usize {
        with_objective!(self, f => f.ground_set_size())
    }

    fn is_monotone(&self) -> bool {
        with_objective!(self, f => f.is_monotone())
    }

    fn is_submodular(&self) -> bool {
        with_objective!(self, f => f.is_submodular())
    }

    fn requires_seed(&self) -> bool {
        with_objective!(self, f => f.requires_seed())
    }

    fn evaluate(&self, set: &[usize]) -> f64 {
        with_objective!(self, f => f.evaluate(set))
    }

    fn empty_cache(&self) -> Vec<f64> {
        with_objective!(self, f => f.empty_cache())
    }

    fn gain_with_cache(&self, cache: &[f64], item: usize) -> f64 {
        with_objective!(self, f => f.gain_with_cache(cache, item))
    }

    fn update_cache(&self, cache: &mut [f64], item: usize) {
        with_objective!(self, f => f.update_cache(cache, item))
    }
}
