//! WebAssembly bindings for the SwiftyProtein ligand pipeline.
//!
//! Viewers running in the browser use these bindings to parse the PDB text served by the
//! ligand endpoint into atoms and bonds, to convert raw mmCIF locally, and to look up the
//! colors and camera target used when rendering.

use serde::{Deserialize, Serialize};
use swifty_protein::io::{ConvertOptions, convert_mmcif_to_pdb, read_pdb_str};
use swifty_protein::ops::{center_of_mass, cpk_color};
use swifty_protein::{Atom as CoreAtom, Molecule as CoreMolecule};
use tsify::Tsify;
use wasm_bindgen::prelude::*;

// ============================================================================
// Initialization
// ============================================================================

/// Installs the panic hook so panics surface as readable console errors.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

// ============================================================================
// Error Handling
// ============================================================================

fn to_js_error<E: std::fmt::Display>(e: E) -> JsError {
    JsError::new(&e.to_string())
}

// ============================================================================
// Configuration: ConvertConfig
// ============================================================================

/// Options for mmCIF to PDB conversion.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ConvertConfig {
    /// Emit CONECT records for declared bonds. Default: `true`
    #[serde(default = "default_true")]
    pub include_conect: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            include_conect: true,
        }
    }
}

impl From<ConvertConfig> for ConvertOptions {
    fn from(cfg: ConvertConfig) -> Self {
        ConvertOptions {
            include_conect: cfg.include_conect,
        }
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// One atom as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct AtomData {
    /// Record tag.
    #[tsify(type = "\"ATOM\" | \"HETATM\"")]
    pub record: String,
    pub serial: u32,
    pub name: String,
    pub element: String,
    pub res_name: String,
    pub chain_id: String,
    pub res_seq: i32,
    /// Cartesian position `[x, y, z]` in Å.
    pub position: [f64; 3],
    /// Occupancy as written in the source line.
    pub occupancy: String,
    /// Temperature factor as written in the source line.
    pub temp_factor: String,
    /// CPK color as `#RRGGBB`.
    pub color: String,
}

impl From<&CoreAtom> for AtomData {
    fn from(atom: &CoreAtom) -> Self {
        Self {
            record: atom.record.tag().to_string(),
            serial: atom.serial,
            name: atom.name.to_string(),
            element: atom.element.to_string(),
            res_name: atom.res_name.to_string(),
            chain_id: atom.chain_id.to_string(),
            res_seq: atom.res_seq,
            position: [atom.pos.x, atom.pos.y, atom.pos.z],
            occupancy: atom.occupancy.to_string(),
            temp_factor: atom.temp_factor.to_string(),
            color: cpk_color(&atom.element).to_string(),
        }
    }
}

/// Atoms, bonds, and the render target of a parsed ligand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct MoleculeData {
    pub atoms: Vec<AtomData>,
    /// Bonds as `[atom1, atom2]` serial pairs with `atom1 < atom2`.
    pub bonds: Vec<[u32; 2]>,
    /// Arithmetic mean of the atom positions.
    pub center: [f64; 3],
}

// ============================================================================
// Class: Molecule
// ============================================================================

/// A parsed ligand with its bond graph.
#[wasm_bindgen]
pub struct Molecule {
    inner: CoreMolecule,
}

#[wasm_bindgen]
impl Molecule {
    /// Parses PDB text, inferring bonds when no CONECT records are present.
    #[wasm_bindgen(js_name = fromPdb)]
    pub fn from_pdb(content: &str) -> Result<Molecule, JsError> {
        let inner = read_pdb_str(content).map_err(to_js_error)?;
        Ok(Molecule { inner })
    }

    /// Converts mmCIF text and parses the result.
    #[wasm_bindgen(js_name = fromMmcif)]
    pub fn from_mmcif(content: &str, config: Option<ConvertConfig>) -> Result<Molecule, JsError> {
        let pdb = convert_mmcif_to_pdb(content, &config.unwrap_or_default().into())
            .map_err(to_js_error)?;
        Self::from_pdb(&pdb)
    }

    /// Returns every atom, bond, and the center of mass.
    #[wasm_bindgen(js_name = toData)]
    pub fn to_data(&self) -> MoleculeData {
        let center = center_of_mass(self.inner.atoms());
        MoleculeData {
            atoms: self.inner.atoms().iter().map(AtomData::from).collect(),
            bonds: self
                .inner
                .bonds()
                .iter()
                .map(|bond| [bond.atom1, bond.atom2])
                .collect(),
            center: [center.x, center.y, center.z],
        }
    }

    #[wasm_bindgen(js_name = atomCount, getter)]
    pub fn atom_count(&self) -> usize {
        self.inner.atom_count()
    }

    #[wasm_bindgen(js_name = bondCount, getter)]
    pub fn bond_count(&self) -> usize {
        self.inner.bond_count()
    }

    /// Serials of the atoms bonded to `serial`.
    #[wasm_bindgen(js_name = neighborsOf)]
    pub fn neighbors_of(&self, serial: u32) -> Vec<u32> {
        self.inner.neighbors_of(serial).collect()
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Converts mmCIF text to fixed-column PDB text.
#[wasm_bindgen(js_name = convertMmcifToPdb)]
pub fn convert_mmcif(content: &str, config: Option<ConvertConfig>) -> Result<String, JsError> {
    convert_mmcif_to_pdb(content, &config.unwrap_or_default().into()).map_err(to_js_error)
}

/// CPK color for an element symbol, `#FF1493` when unknown.
#[wasm_bindgen(js_name = atomColor)]
pub fn atom_color(element: &str) -> String {
    cpk_color(element).to_string()
}
