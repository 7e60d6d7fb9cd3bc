use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("DataTypeError: {}", source))]
    DataType {
        source: plotkit_datatypes::error::Error,
    },

    #[snafu(display("InvalidOperatorSpec: {}", reason))]
    InvalidOperatorSpec { reason: String },
}

impl From<plotkit_datatypes::error::Error> for Error {
    fn from(datatype_error: plotkit_datatypes::error::Error) -> Self {
        Self::DataType {
            source: datatype_error,
        }
    }
}
