use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error while reading structure stream: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {format} input: {details} (line {line_number})")]
    Parse {
        format: &'static str,
        line_number: usize,
        details: String,
    },

    #[error("no atom data found in {format} input")]
    NoAtomData { format: &'static str },

    #[error("required column '{column}' is missing from the _atom_site loop")]
    MissingColumn { column: &'static str },

    #[error("inconsistent data in {format} input: {details}")]
    InconsistentData {
        format: &'static str,
        details: String,
    },
}

impl Error {
    pub fn from_io(source: std::io::Error) -> Self {
        Self::Io { source }
    }

    pub fn parse(format: &'static str, line_number: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line_number,
            details: details.into(),
        }
    }

    pub fn no_atom_data(format: &'static str) -> Self {
        Self::NoAtomData { format }
    }

    pub fn missing_column(column: &'static str) -> Self {
        Self::MissingColumn { column }
    }

    pub fn inconsistent_data(format: &'static str, details: impl Into<String>) -> Self {
        Self::InconsistentData {
            format,
            details: details.into(),
        }
    }
}
