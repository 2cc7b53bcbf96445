mod set;
mod shell;

pub use set::{AngularBlock, BasisCenter, BasisSet};
pub use shell::{ContractedShell, GaussianPrimitive};
