use nalgebra::{DMatrix, DVector};

/// One set of molecular orbitals. Columns of `coefficients` are orbitals;
/// rows follow the basis-function ordering the checkpoint consumer expects
/// (reordering from the producing program's ordering happens upstream).
#[derive(Clone, Debug, PartialEq)]
pub struct Orbitals {
    pub energies: DVector<f64>,
    pub coefficients: DMatrix<f64>,
}

impl Orbitals {
    /// The basis dimension.
    pub fn n_basis(&self) -> usize {
        self.coefficients.nrows()
    }
}

/// Which spin manifold a set of orbitals belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpinChannel {
    Restricted,
    Alpha,
    Beta,
}

impl SpinChannel {
    /// Record-name prefix for this channel. Restricted orbitals go into the
    /// alpha records, which is where consumers look for closed-shell data.
    pub fn label(&self) -> &'static str {
        match self {
            SpinChannel::Restricted | SpinChannel::Alpha => "Alpha ",
            SpinChannel::Beta => "Beta ",
        }
    }
}

/// The orbital blocks present in a wavefunction: a single restricted set,
/// or an alpha/beta pair.
#[derive(Clone, Debug, PartialEq)]
pub enum ElectronicStructure {
    Restricted(Orbitals),
    Unrestricted { alpha: Orbitals, beta: Orbitals },
}

impl ElectronicStructure {
    /// The orbital blocks in document order, one per spin channel present.
    pub fn channels(&self) -> impl Iterator<Item = (SpinChannel, &Orbitals)> {
        match self {
            ElectronicStructure::Restricted(orbitals) => {
                vec![(SpinChannel::Restricted, orbitals)]
            }
            ElectronicStructure::Unrestricted { alpha, beta } => {
                vec![(SpinChannel::Alpha, alpha), (SpinChannel::Beta, beta)]
            }
        }
        .into_iter()
    }
}
