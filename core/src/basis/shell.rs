use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One primitive of a contracted shell: an exponent paired with its
/// contraction coefficient (normalization folded in upstream).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaussianPrimitive {
    pub exponent: f64,
    pub coefficient: f64,
}

/// Linear combination of primitives sharing one angular momentum.
/// Must hold at least one primitive; a single primitive is an
/// uncontracted shell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractedShell(pub SmallVec<[GaussianPrimitive; 6]>);

impl ContractedShell {
    /// The degree of contraction.
    pub fn n_primitives(&self) -> usize {
        self.0.len()
    }

    pub fn primitives(&self) -> impl Iterator<Item = &GaussianPrimitive> {
        self.0.iter()
    }
}
