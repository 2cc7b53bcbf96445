use nalgebra::Vector3;

/// Represents an atom in the exported geometry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Atom {
    /// Position in bohr.
    pub position: Vector3<f64>,
    /// Kept as a real: effective-core-potential charges are not integral.
    pub nuclear_charge: f64,
}

impl Atom {
    /// Returns the nuclear charge truncated to an integer, which is what the
    /// `Atomic numbers` record carries.
    pub fn atomic_number(&self) -> i64 {
        self.nuclear_charge as i64
    }
}
