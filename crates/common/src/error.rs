use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A sample source produced no values.
    EmptySample,

    /// Both compared values are exactly zero, so the normalized discrepancy is undefined.
    DegenerateComparison,

    /// The discrepancy could not be computed as a finite number (NaN or infinite input).
    NonFinite(f64),

    /// A routine disagreed with the reference by more than the allowed tolerance.
    ToleranceExceeded { discrepancy: f64, tolerance: f64 },

    /// The timing policy cannot be executed as configured.
    InvalidPolicy(String),

    /// A dynamic addition was attempted between incompatible runtime types.
    TypeMismatch {
        left: &'static str,
        right: &'static str,
    },

    /// Integer addition on dynamic values overflowed.
    IntegerOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EmptySample => write!(f, "Sample array is empty."),

            Error::DegenerateComparison => write!(
                f,
                "Discrepancy is undefined: both compared values are exactly zero."
            ),

            Error::NonFinite(v) => write!(f, "Discrepancy is not finite: {}.", v),

            Error::ToleranceExceeded {
                discrepancy,
                tolerance,
            } => write!(
                f,
                "Relative discrepancy {:e} is not below tolerance {:e}.",
                discrepancy, tolerance
            ),

            Error::InvalidPolicy(reason) => write!(f, "Invalid benchmark policy: {}.", reason),

            Error::TypeMismatch { left, right } => write!(
                f,
                "Unsupported operand types for +: '{}' and '{}'.",
                left, right
            ),

            Error::IntegerOverflow => write!(f, "Integer overflow in dynamic addition."),
        }
    }
}

impl std::error::Error for Error {}
