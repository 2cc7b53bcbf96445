use std::{error::Error, fs, path::Path};

use itertools::Itertools;
use nalgebra::{DMatrix, DVector, Vector3};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    atom::Atom,
    basis::{AngularBlock, BasisCenter, BasisSet, ContractedShell, GaussianPrimitive},
    orbitals::{ElectronicStructure, Orbitals},
    wavefunction::Wavefunction,
};

/// A wavefunction as it arrives on disk. Orbital coefficients are stored
/// as a list of columns (column = orbital) and are expected to already be
/// ordered the way the checkpoint consumer wants them.
#[derive(Deserialize)]
pub struct ConfigWavefunction {
    atoms: Vec<ConfigAtom>,
    multiplicity: u32,
    n_alpha: usize,
    n_beta: usize,
    basis: Vec<ConfigBasisCenter>,
    orbitals: ConfigOrbitals,
}

#[derive(Deserialize)]
struct ConfigAtom {
    nuclear_charge: f64,
    position: Vec<f64>,
}

#[derive(Deserialize)]
struct ConfigBasisCenter {
    /// 1-based atom index.
    atom: usize,
    blocks: Vec<ConfigAngularBlock>,
}

#[derive(Deserialize)]
struct ConfigAngularBlock {
    angular_momentum: i32,
    shells: Vec<ConfigShell>,
}

#[derive(Deserialize)]
struct ConfigShell {
    exponents: Vec<f64>,
    coefficients: Vec<f64>,
}

/// Either `restricted` alone, or `alpha` together with `beta`.
#[derive(Deserialize)]
struct ConfigOrbitals {
    #[serde(default)]
    restricted: Option<ConfigOrbitalSet>,
    #[serde(default)]
    alpha: Option<ConfigOrbitalSet>,
    #[serde(default)]
    beta: Option<ConfigOrbitalSet>,
}

#[derive(Deserialize)]
struct ConfigOrbitalSet {
    energies: Vec<f64>,
    coefficients: Vec<Vec<f64>>,
}

impl TryFrom<ConfigWavefunction> for Wavefunction {
    type Error = Box<dyn Error>;

    fn try_from(value: ConfigWavefunction) -> Result<Self, Self::Error> {
        let mut atoms = Vec::with_capacity(value.atoms.len());
        for atom in &value.atoms {
            let &[x, y, z] = atom.position.as_slice() else {
                return Err(format!(
                    "atom position needs x, y, z coordinates, got {} values",
                    atom.position.len()
                )
                .into());
            };
            atoms.push(Atom {
                position: Vector3::new(x, y, z),
                nuclear_charge: atom.nuclear_charge,
            });
        }

        let basis = convert_basis(&value.basis, atoms.len())?;
        let orbitals = convert_orbitals(value.orbitals)?;

        Ok(Wavefunction {
            atoms,
            basis,
            multiplicity: value.multiplicity,
            n_alpha: value.n_alpha,
            n_beta: value.n_beta,
            orbitals,
        })
    }
}

/// Reads a wavefunction from a JSON document on disk.
pub fn load_wavefunction(path: impl AsRef<Path>) -> Result<Wavefunction, Box<dyn Error>> {
    let data = fs::read_to_string(path)?;
    let config: ConfigWavefunction = serde_json::from_str(&data)?;
    Wavefunction::try_from(config)
}

fn convert_basis(
    centers: &[ConfigBasisCenter],
    n_atoms: usize,
) -> Result<BasisSet, Box<dyn Error>> {
    if let Some(duplicate) = centers.iter().map(|center| center.atom).duplicates().next() {
        return Err(format!("basis lists atom {duplicate} more than once").into());
    }

    let mut converted = Vec::with_capacity(centers.len());
    for center in centers {
        if center.atom == 0 || center.atom > n_atoms {
            return Err(format!(
                "basis center references atom {} outside the geometry (1..={n_atoms})",
                center.atom
            )
            .into());
        }
        let mut blocks = Vec::with_capacity(center.blocks.len());
        for block in &center.blocks {
            let mut shells = Vec::with_capacity(block.shells.len());
            for shell in &block.shells {
                if shell.exponents.len() != shell.coefficients.len() {
                    return Err(format!(
                        "shell on atom {} has {} exponents but {} coefficients",
                        center.atom,
                        shell.exponents.len(),
                        shell.coefficients.len()
                    )
                    .into());
                }
                if shell.exponents.is_empty() {
                    return Err(format!("shell on atom {} has no primitives", center.atom).into());
                }
                let primitives: SmallVec<[GaussianPrimitive; 6]> = shell
                    .exponents
                    .iter()
                    .zip(&shell.coefficients)
                    .map(|(&exponent, &coefficient)| GaussianPrimitive {
                        exponent,
                        coefficient,
                    })
                    .collect();
                shells.push(ContractedShell(primitives));
            }
            blocks.push(AngularBlock {
                angular_momentum: block.angular_momentum,
                shells,
            });
        }
        converted.push(BasisCenter {
            atom: center.atom,
            blocks,
        });
    }
    Ok(BasisSet { centers: converted })
}

fn convert_orbitals(config: ConfigOrbitals) -> Result<ElectronicStructure, Box<dyn Error>> {
    match (config.restricted, config.alpha, config.beta) {
        (Some(restricted), None, None) => Ok(ElectronicStructure::Restricted(convert_orbital_set(
            restricted,
        )?)),
        (None, Some(alpha), Some(beta)) => Ok(ElectronicStructure::Unrestricted {
            alpha: convert_orbital_set(alpha)?,
            beta: convert_orbital_set(beta)?,
        }),
        (Some(_), _, _) => {
            Err("restricted orbitals cannot be combined with alpha/beta channels".into())
        }
        _ => Err("orbitals need either a restricted set or both alpha and beta sets".into()),
    }
}

fn convert_orbital_set(set: ConfigOrbitalSet) -> Result<Orbitals, Box<dyn Error>> {
    let n_basis = set.energies.len();
    if set.coefficients.len() != n_basis {
        return Err(format!(
            "{n_basis} orbital energies but {} orbital columns",
            set.coefficients.len()
        )
        .into());
    }
    for (index, column) in set.coefficients.iter().enumerate() {
        if column.len() != n_basis {
            return Err(format!(
                "orbital {index} has {} coefficients, expected {n_basis}",
                column.len()
            )
            .into());
        }
    }

    let coefficients = DMatrix::from_fn(n_basis, n_basis, |row, column| {
        set.coefficients[column][row]
    });
    Ok(Orbitals {
        energies: DVector::from_vec(set.energies),
        coefficients,
    })
}
