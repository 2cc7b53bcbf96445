//! Formatted-checkpoint serialization: the record encoder, the basis
//! flattener, and the document writer that sequences the blocks.

mod basis;
mod record;

pub use basis::shell_type_code;
pub use record::RecordWriter;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use nalgebra::Vector3;

use crate::atom::Atom;
use crate::orbitals::{Orbitals, SpinChannel};
use crate::wavefunction::Wavefunction;

/// Writes a wavefunction as one formatted-checkpoint document: header,
/// summary scalars, atom block, basis block, then one orbital block per
/// spin channel. A single forward pass; nothing written is read back.
pub struct FchkExport<'a> {
    pub wavefunction: &'a Wavefunction,
    /// First line of the document, left-justified in 72 columns.
    pub title: String,
    pub calc_type: String,
    pub method: String,
    pub basis_label: String,
}

impl FchkExport<'_> {
    /// Creates `path` and writes the document through a buffered writer.
    /// The file handle lives in this frame only and is closed on every
    /// exit path; on error a partial file may remain.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.write(&mut out)?;
        out.flush()
    }

    pub fn write<W: Write>(&self, out: W) -> io::Result<()> {
        let wavefunction = self.wavefunction;
        let mut writer = RecordWriter::new(out);

        writer.title(&self.title)?;
        writer.method_line(&self.calc_type, &self.method, &self.basis_label)?;

        writer.scalar_int("Number of atoms", wavefunction.atoms.len() as i64)?;
        writer.scalar_int("Charge", wavefunction.total_charge())?;
        writer.scalar_int("Multiplicity", wavefunction.multiplicity as i64)?;
        writer.scalar_int("Number of electrons", wavefunction.n_electrons() as i64)?;
        writer.scalar_int("Number of alpha electrons", wavefunction.n_alpha as i64)?;
        writer.scalar_int("Number of beta electrons", wavefunction.n_beta as i64)?;
        writer.scalar_int(
            "Number of basis functions",
            wavefunction.basis.n_functions() as i64,
        )?;

        write_atom_block(&mut writer, &wavefunction.atoms)?;

        let coordinates: Vec<Vector3<f64>> = wavefunction
            .atoms
            .iter()
            .map(|atom| atom.position)
            .collect();
        basis::write_basis_block(&mut writer, &wavefunction.basis, &coordinates)?;

        for (channel, orbitals) in wavefunction.orbitals.channels() {
            write_orbital_block(&mut writer, channel, orbitals)?;
        }

        log::info!(
            "wrote checkpoint document for {} atoms, {} basis functions",
            wavefunction.atoms.len(),
            wavefunction.basis.n_functions()
        );
        Ok(())
    }
}

/// Atomic numbers, nuclear charges, and coordinates with each atom's
/// x, y, z contiguous.
fn write_atom_block<W: Write>(writer: &mut RecordWriter<W>, atoms: &[Atom]) -> io::Result<()> {
    let atomic_numbers: Vec<i64> = atoms.iter().map(Atom::atomic_number).collect();
    let charges: Vec<f64> = atoms.iter().map(|atom| atom.nuclear_charge).collect();
    let coordinates: Vec<f64> = atoms
        .iter()
        .flat_map(|atom| [atom.position.x, atom.position.y, atom.position.z])
        .collect();

    writer.array_int("Atomic numbers", &atomic_numbers)?;
    writer.array_real("Nuclear charges", &charges)?;
    writer.array_real("Current cartesian coordinates", &coordinates)
}

/// Basis dimension, orbital energies, and the coefficient matrix flattened
/// orbital by orbital. The matrix backing storage is column-major, which is
/// exactly the order the record wants.
fn write_orbital_block<W: Write>(
    writer: &mut RecordWriter<W>,
    channel: SpinChannel,
    orbitals: &Orbitals,
) -> io::Result<()> {
    let label = channel.label();
    writer.scalar_int("Number of basis functions", orbitals.n_basis() as i64)?;
    writer.array_real(
        &format!("{label}Orbital Energies"),
        orbitals.energies.as_slice(),
    )?;
    writer.array_real(
        &format!("{label}MO coefficients"),
        orbitals.coefficients.as_slice(),
    )
}

#[cfg(test)]
mod tests {
    use nalgebra::{DMatrix, DVector};
    use smallvec::smallvec;

    use super::*;
    use crate::basis::{AngularBlock, BasisCenter, BasisSet, ContractedShell, GaussianPrimitive};
    use crate::orbitals::ElectronicStructure;

    fn hydrogen() -> Wavefunction {
        Wavefunction {
            atoms: vec![Atom {
                position: Vector3::zeros(),
                nuclear_charge: 1.0,
            }],
            basis: BasisSet {
                centers: vec![BasisCenter {
                    atom: 1,
                    blocks: vec![AngularBlock {
                        angular_momentum: 0,
                        shells: vec![ContractedShell(smallvec![GaussianPrimitive {
                            exponent: 1.0,
                            coefficient: 1.0,
                        }])],
                    }],
                }],
            },
            multiplicity: 2,
            n_alpha: 1,
            n_beta: 0,
            orbitals: ElectronicStructure::Restricted(Orbitals {
                energies: DVector::from_vec(vec![-0.5]),
                coefficients: DMatrix::from_element(1, 1, 1.0),
            }),
        }
    }

    fn export_to_string(wavefunction: &Wavefunction) -> String {
        let export = FchkExport {
            wavefunction,
            title: "hydrogen atom".to_string(),
            calc_type: "SP".to_string(),
            method: "ROHF".to_string(),
            basis_label: "custom".to_string(),
        };
        let mut buffer = Vec::new();
        export.write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn hydrogen_document_matches_byte_for_byte() {
        let expected = [
            "hydrogen atom                                                           ",
            "SP        ROHF                          custom                        ",
            "Number of atoms                            I                1",
            "Charge                                     I                0",
            "Multiplicity                               I                2",
            "Number of electrons                        I                1",
            "Number of alpha electrons                  I                1",
            "Number of beta electrons                   I                0",
            "Number of basis functions                  I                1",
            "Atomic numbers                             I   N=           1",
            "           1",
            "Nuclear charges                            R   N=           1",
            "  1.00000000e+00",
            "Current cartesian coordinates              R   N=           3",
            "  0.00000000e+00  0.00000000e+00  0.00000000e+00",
            "Number of contracted shells                I                1",
            "Number of primitive shells                 I                1",
            "Highest angular momentum                   I                0",
            "Largest degree of contraction              I                1",
            "Shell types                                I   N=           1",
            "           0",
            "Number of primitives per shell             I   N=           1",
            "           1",
            "Shell to atom map                          I   N=           1",
            "           1",
            "Primitive exponents                        R   N=           1",
            "  1.00000000e+00",
            "Contraction coefficients                   R   N=           1",
            "  1.00000000e+00",
            "Coordinates of each shell                  R   N=           3",
            "  0.00000000e+00  0.00000000e+00  0.00000000e+00",
            "Number of basis functions                  I                1",
            "Alpha Orbital Energies                     R   N=           1",
            " -5.00000000e-01",
            "Alpha MO coefficients                      R   N=           1",
            "  1.00000000e+00",
        ];

        let output = export_to_string(&hydrogen());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, expected);
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn unrestricted_wavefunctions_get_both_orbital_blocks() {
        let mut wavefunction = hydrogen();
        let orbitals = Orbitals {
            energies: DVector::from_vec(vec![-0.5]),
            coefficients: DMatrix::from_element(1, 1, 1.0),
        };
        wavefunction.orbitals = ElectronicStructure::Unrestricted {
            alpha: orbitals.clone(),
            beta: orbitals,
        };

        let output = export_to_string(&wavefunction);
        assert!(output.contains("Alpha Orbital Energies"));
        assert!(output.contains("Beta Orbital Energies"));
        assert!(output.contains("Beta MO coefficients"));
    }

    #[test]
    fn coordinates_are_written_atom_major() {
        let atoms = [
            Atom {
                position: Vector3::new(1.0, 2.0, 3.0),
                nuclear_charge: 6.0,
            },
            Atom {
                position: Vector3::new(4.0, 5.0, 6.0),
                nuclear_charge: 8.0,
            },
        ];
        let mut writer = RecordWriter::new(Vec::new());
        write_atom_block(&mut writer, &atoms).unwrap();
        let output = String::from_utf8(writer.into_inner()).unwrap();

        let coordinate_line = output
            .lines()
            .skip_while(|line| !line.starts_with("Current cartesian coordinates"))
            .nth(1)
            .unwrap();
        assert_eq!(
            coordinate_line,
            "  1.00000000e+00  2.00000000e+00  3.00000000e+00  4.00000000e+00  5.00000000e+00"
        );
    }

    #[test]
    fn coefficient_columns_are_flattened_orbital_by_orbital() {
        // column k holds orbital k; the record runs over orbital 0 first
        let coefficients = DMatrix::from_columns(&[
            DVector::from_vec(vec![1.0, 2.0]),
            DVector::from_vec(vec![3.0, 4.0]),
        ]);
        let orbitals = Orbitals {
            energies: DVector::from_vec(vec![-1.0, 1.0]),
            coefficients,
        };

        let mut writer = RecordWriter::new(Vec::new());
        write_orbital_block(&mut writer, SpinChannel::Restricted, &orbitals).unwrap();
        let output = String::from_utf8(writer.into_inner()).unwrap();

        let coefficient_line = output
            .lines()
            .skip_while(|line| !line.starts_with("Alpha MO coefficients"))
            .nth(1)
            .unwrap();
        assert_eq!(
            coefficient_line,
            "  1.00000000e+00  2.00000000e+00  3.00000000e+00  4.00000000e+00"
        );
    }

    #[test]
    fn atomic_numbers_truncate_fractional_charges() {
        let atoms = [Atom {
            position: Vector3::zeros(),
            nuclear_charge: 16.8,
        }];
        let mut writer = RecordWriter::new(Vec::new());
        write_atom_block(&mut writer, &atoms).unwrap();
        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[1], "          16");
        assert_eq!(lines[3], "  1.68000000e+01");
    }
}
