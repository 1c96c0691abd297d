use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no properties to export")]
    NoProperties,

    #[error("no unit details found in comparables data")]
    NoUnits,

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, ExportError>;
