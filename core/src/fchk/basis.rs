use std::io::{self, Write};

use nalgebra::Vector3;

use super::record::RecordWriter;
use crate::basis::BasisSet;

/// Signed shell-type code for angular momentum `l`: `l * (-1)^(l / 2)`.
/// The sign alternates every two steps (s=0, p=1, d=-2, f=-3, g=4, h=5,
/// i=-6), which is how the consumer tells pure shells from
/// Cartesian-ordered shells of the same magnitude.
pub fn shell_type_code(angular_momentum: i32) -> i64 {
    let sign = if (angular_momentum / 2) % 2 == 0 { 1 } else { -1 };
    (angular_momentum * sign) as i64
}

/// Totals gathered in the first pass over the basis hierarchy. Scanned once
/// and reused both for the printed scalars and for sizing the flat arrays,
/// so the two can never disagree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct BasisSummary {
    pub contracted_shells: usize,
    /// Sum of primitive counts across all shells.
    pub primitive_shells: usize,
    pub highest_angular_momentum: i32,
    pub largest_contraction: usize,
}

impl BasisSummary {
    pub fn scan(basis: &BasisSet) -> Self {
        let mut summary = Self::default();
        for center in &basis.centers {
            for block in &center.blocks {
                summary.highest_angular_momentum = summary
                    .highest_angular_momentum
                    .max(block.angular_momentum);
                summary.contracted_shells += block.shells.len();
                for shell in &block.shells {
                    summary.primitive_shells += shell.n_primitives();
                    summary.largest_contraction =
                        summary.largest_contraction.max(shell.n_primitives());
                }
            }
        }
        summary
    }
}

/// The flat, parallel shell arrays of the basis block. Every per-shell
/// vector is indexed by the shell's position in the fixed traversal order
/// (center, then angular block within the center, then shell within the
/// block); `exponents` and `coefficients` run over primitives at a shared
/// running offset. Rebuilt from the hierarchy on every write.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct FlatBasis {
    pub summary: BasisSummary,
    pub shell_types: Vec<i64>,
    pub primitives_per_shell: Vec<i64>,
    /// 1-based atom index per shell.
    pub shell_to_atom: Vec<i64>,
    pub exponents: Vec<f64>,
    pub coefficients: Vec<f64>,
    /// Shell-major x, y, z triples.
    pub shell_coordinates: Vec<f64>,
}

impl FlatBasis {
    /// Second pass over the same hierarchy, in the same order as the scan.
    /// `coordinates` is indexed by atom, 0-based; the 1-based center ids
    /// are shifted down to look positions up.
    pub fn flatten(basis: &BasisSet, coordinates: &[Vector3<f64>]) -> Self {
        let summary = BasisSummary::scan(basis);
        let mut flat = Self {
            summary,
            shell_types: Vec::with_capacity(summary.contracted_shells),
            primitives_per_shell: Vec::with_capacity(summary.contracted_shells),
            shell_to_atom: Vec::with_capacity(summary.contracted_shells),
            exponents: Vec::with_capacity(summary.primitive_shells),
            coefficients: Vec::with_capacity(summary.primitive_shells),
            shell_coordinates: Vec::with_capacity(3 * summary.contracted_shells),
        };
        for center in &basis.centers {
            let position = center
                .atom
                .checked_sub(1)
                .and_then(|index| coordinates.get(index))
                .unwrap_or_else(|| {
                    panic!(
                        "basis center references atom {} outside the geometry",
                        center.atom
                    )
                });
            for block in &center.blocks {
                for shell in &block.shells {
                    flat.shell_types.push(shell_type_code(block.angular_momentum));
                    flat.shell_to_atom.push(center.atom as i64);
                    flat.shell_coordinates
                        .extend([position.x, position.y, position.z]);
                    flat.primitives_per_shell.push(shell.n_primitives() as i64);
                    for primitive in shell.primitives() {
                        flat.exponents.push(primitive.exponent);
                        flat.coefficients.push(primitive.coefficient);
                    }
                }
            }
        }
        flat
    }
}

/// Emits the basis block: four summary scalars, then the six flat arrays,
/// in the field order consumers expect.
pub(crate) fn write_basis_block<W: Write>(
    writer: &mut RecordWriter<W>,
    basis: &BasisSet,
    coordinates: &[Vector3<f64>],
) -> io::Result<()> {
    let flat = FlatBasis::flatten(basis, coordinates);
    let summary = flat.summary;
    log::debug!(
        "basis block: {} contracted shells, {} primitive shells, highest l = {}",
        summary.contracted_shells,
        summary.primitive_shells,
        summary.highest_angular_momentum
    );

    writer.scalar_int("Number of contracted shells", summary.contracted_shells as i64)?;
    writer.scalar_int("Number of primitive shells", summary.primitive_shells as i64)?;
    writer.scalar_int("Highest angular momentum", summary.highest_angular_momentum as i64)?;
    writer.scalar_int(
        "Largest degree of contraction",
        summary.largest_contraction as i64,
    )?;
    writer.array_int("Shell types", &flat.shell_types)?;
    writer.array_int("Number of primitives per shell", &flat.primitives_per_shell)?;
    writer.array_int("Shell to atom map", &flat.shell_to_atom)?;
    writer.array_real("Primitive exponents", &flat.exponents)?;
    writer.array_real("Contraction coefficients", &flat.coefficients)?;
    writer.array_real("Coordinates of each shell", &flat.shell_coordinates)?;
    Ok(())
}
