use crate::io::error::Error;
use crate::io::{mmcif, pdb};

/// Options controlling mmCIF → PDB conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Emit `CONECT` records when the source document carries explicit bonds.
    pub include_conect: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            include_conect: true,
        }
    }
}

/// Converts mmCIF text into fixed-column PDB text terminated by `END`.
///
/// Parsing completes before any output is produced, so a failure never yields a partial
/// document.
///
/// # Errors
///
/// Returns [`Error::NoAtomData`] when the input has no `_atom_site` rows,
/// [`Error::MissingColumn`] when a required column is undeclared, and [`Error::Parse`] for
/// malformed rows.
pub fn convert_mmcif_to_pdb(mmcif_text: &str, options: &ConvertOptions) -> Result<String, Error> {
    let data = mmcif::reader::read_str(mmcif_text)?;

    let mut buffer = Vec::new();
    if options.include_conect && !data.bonds.is_empty() {
        pdb::writer::write_records_with_bonds(&mut buffer, &data.records, &data.bonds)?;
    } else {
        pdb::writer::write_records(&mut buffer, &data.records)?;
    }

    String::from_utf8(buffer).map_err(|e| Error::inconsistent_data("PDB", e.to_string()))
}
