use serde::{Deserialize, Serialize};

use super::ContractedShell;
use crate::fchk::shell_type_code;

/// All shells of one angular momentum placed on a center.
/// Every shell in `shells` shares `angular_momentum`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngularBlock {
    /// 0 = s, 1 = p, 2 = d, ...
    pub angular_momentum: i32,
    pub shells: Vec<ContractedShell>,
}

/// The basis functions placed on a single atom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasisCenter {
    /// 1-based index of the owning atom, matching the atom numbering used
    /// throughout the document. Unique across the basis set.
    pub atom: usize,
    pub blocks: Vec<AngularBlock>,
}

/// Ordered hierarchical basis set: centers, angular-momentum blocks within
/// a center, contracted shells within a block. That iteration order fixes
/// the shell index of every flat record derived from it, so it is never
/// sorted or deduplicated here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BasisSet {
    pub centers: Vec<BasisCenter>,
}

impl BasisSet {
    /// Number of basis functions the shells expand to. Pure shells
    /// (negative type code) span 2l+1 functions, Cartesian shells
    /// (non-negative code) span (l+1)(l+2)/2.
    pub fn n_functions(&self) -> usize {
        self.centers
            .iter()
            .flat_map(|center| &center.blocks)
            .map(|block| {
                let l = block.angular_momentum;
                let per_shell = if shell_type_code(l) < -1 {
                    2 * l + 1
                } else {
                    (l + 1) * (l + 2) / 2
                };
                per_shell as usize * block.shells.len()
            })
            .sum()
    }
}
