use crate::{atom::Atom, basis::BasisSet, orbitals::ElectronicStructure};

/// Everything the checkpoint document is written from.
#[derive(Clone, Debug, PartialEq)]
pub struct Wavefunction {
    pub atoms: Vec<Atom>,
    pub basis: BasisSet,
    pub multiplicity: u32,
    pub n_alpha: usize,
    pub n_beta: usize,
    pub orbitals: ElectronicStructure,
}

impl Wavefunction {
    pub fn n_electrons(&self) -> usize {
        self.n_alpha + self.n_beta
    }

    /// Total nuclear charge of the geometry.
    pub fn nuclear_charge(&self) -> f64 {
        self.atoms.iter().map(|atom| atom.nuclear_charge).sum()
    }

    /// Net charge: nuclear charge plus electronic charge (one negative unit
    /// per electron).
    pub fn total_charge(&self) -> i64 {
        self.nuclear_charge().round() as i64 - self.n_electrons() as i64
    }
}
