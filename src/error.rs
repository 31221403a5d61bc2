//! Error types for the minimizer
//!
//! Errors are organized by source and by operation. Each error source has
//! its own enum with specific variants; operations expose wrapper enums
//! that combine only the errors they can produce. Everything converts into
//! `std::io::Error` for callers that funnel failures through IO results.

use std::fmt;
use std::io;

// ============================================================================
// Source-Level Error Enums
// ============================================================================

/// Errors in the problem geometry.
///
/// Raised when a cube context is built with dimensions that make no sense,
/// or when covers of different widths are combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A context needs at least one variable.
    NoVariables,
    /// More binary variables than variables altogether.
    BinaryCountOutOfRange {
        /// The requested number of binary variables
        num_binary_vars: usize,
        /// The total number of variables
        num_vars: usize,
    },
    /// A part size that no variable can have (zero, or a binary variable
    /// with a size other than two).
    InvalidPartSize {
        /// The offending variable
        var: usize,
        /// The requested part size
        part_size: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoVariables => {
                write!(f, "A cube context requires at least one variable")
            }
            ConfigError::BinaryCountOutOfRange {
                num_binary_vars,
                num_vars,
            } => write!(
                f,
                "Number of binary variables ({}) exceeds the total variable count ({})",
                num_binary_vars, num_vars
            ),
            ConfigError::InvalidPartSize { var, part_size } => write!(
                f,
                "Invalid part size {} for variable {} (binary variables take exactly 2, \
                 multiple-valued variables at least 1)",
                part_size, var
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for io::Error {
    fn from(err: ConfigError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

/// Errors in cube data supplied through the binding-layer API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// Invalid input value; inputs must be 0 (low), 1 (high) or 2 (don't
    /// care).
    InvalidValue {
        /// The invalid value that was encountered
        value: u8,
        /// The position in the input vector where it occurred
        position: usize,
    },
    /// A cube whose input or output tuple does not match the declared
    /// dimensions.
    WrongLength {
        /// "input" or "output"
        kind: &'static str,
        /// Expected tuple length
        expected: usize,
        /// Actual tuple length
        actual: usize,
    },
}

impl fmt::Display for CubeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CubeError::InvalidValue { value, position } => write!(
                f,
                "Invalid cube value {} at position {}. Expected 0 (low), 1 (high), or 2 (don't care).",
                value, position
            ),
            CubeError::WrongLength {
                kind,
                expected,
                actual,
            } => write!(
                f,
                "Cube {} tuple has length {} but the cover declares {}",
                kind, actual, expected
            ),
        }
    }
}

impl std::error::Error for CubeError {}

impl From<CubeError> for io::Error {
    fn from(err: CubeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// A single defect in PLA text.
///
/// Variants carry column positions where they apply; the enclosing
/// [`PLAReadError::Syntax`] supplies the line number, so these stay
/// position-free otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PLAError {
    /// A required directive (`.i` or `.o`) never appeared and the body
    /// gave no chance to infer it.
    MissingDirective {
        /// The absent directive
        directive: &'static str,
    },
    /// A directive argument that does not parse.
    BadDirective {
        /// The directive in question
        directive: &'static str,
        /// Its unparsable argument
        value: String,
    },
    /// A character in the input half of a cube line outside `0 1 - ~ ? x`.
    BadInputCharacter {
        /// The offending character
        character: char,
        /// Zero-based column within the input field
        column: usize,
    },
    /// A character in the output half of a cube line outside
    /// `0 1 2 3 4 - ~`.
    BadOutputCharacter {
        /// The offending character
        character: char,
        /// Zero-based column within the output field
        column: usize,
    },
    /// A cube line whose width disagrees with the declared dimensions.
    WrongCubeWidth {
        /// Characters found on the line (whitespace stripped)
        found: usize,
        /// Declared input count
        want_inputs: usize,
        /// Declared output count
        want_outputs: usize,
    },
    /// `.ilb`/`.ob` naming a different number of variables than declared.
    LabelCount {
        /// The label directive
        directive: &'static str,
        /// How many names it listed
        labels: usize,
        /// How many the dimensions call for
        declared: usize,
    },
    /// A cube line arrived before any dimensions were known and could not
    /// be split into input and output fields.
    UnknownDimensions,
}

impl fmt::Display for PLAError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PLAError::MissingDirective { directive } => {
                write!(f, "no {} directive, and nothing to infer it from", directive)
            }
            PLAError::BadDirective { directive, value } => {
                write!(f, "cannot parse {} argument {:?}", directive, value)
            }
            PLAError::BadInputCharacter { character, column } => write!(
                f,
                "input column {} holds {:?}; expected one of 0 1 - ~ ? x",
                column, character
            ),
            PLAError::BadOutputCharacter { character, column } => write!(
                f,
                "output column {} holds {:?}; expected one of 0 1 2 3 4 - ~",
                column, character
            ),
            PLAError::WrongCubeWidth {
                found,
                want_inputs,
                want_outputs,
            } => write!(
                f,
                "cube line is {} characters wide; {} inputs plus {} outputs were declared",
                found, want_inputs, want_outputs
            ),
            PLAError::LabelCount {
                directive,
                labels,
                declared,
            } => write!(
                f,
                "{} names {} labels for {} declared variables",
                directive, labels, declared
            ),
            PLAError::UnknownDimensions => {
                write!(f, "cube line before any dimensions were declared or inferable")
            }
        }
    }
}

impl std::error::Error for PLAError {}

/// The minimized cover failed the equivalence post-check.
///
/// This means the minimizer violated an invariant; the original cover is
/// unharmed, but the result must not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    /// A cube of the original ON-set is no longer covered.
    CoverageLost {
        /// Index of the uncovered cube in the original cover
        cube: usize,
    },
    /// A cube of the result reaches outside the original ON-set plus
    /// don't-cares.
    CoverageGained {
        /// Index of the offending cube in the result
        cube: usize,
    },
    /// A cube of the result intersects the OFF-set.
    OffSetHit {
        /// Index of the offending cube in the result
        cube: usize,
        /// Index of the OFF-set cube it touches
        off_cube: usize,
    },
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Espresso result verify failed: ")?;
        match self {
            VerifyError::CoverageLost { cube } => {
                write!(f, "minterm coverage of ON-set cube {} was lost", cube)
            }
            VerifyError::CoverageGained { cube } => {
                write!(f, "result cube {} covers minterms outside the function", cube)
            }
            VerifyError::OffSetHit { cube, off_cube } => write!(
                f,
                "result cube {} intersects OFF-set cube {}",
                cube, off_cube
            ),
        }
    }
}

impl std::error::Error for VerifyError {}

impl From<VerifyError> for io::Error {
    fn from(err: VerifyError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

// ============================================================================
// Operation-Level Error Enums
// ============================================================================

/// Errors that can occur during minimization operations.
///
/// Returned by `Cover::minimize()` and the driver entry points.
#[derive(Debug)]
pub enum MinimizationError {
    /// Problem geometry error
    Config(ConfigError),
    /// Cube validation error
    Cube(CubeError),
    /// Result verification failure
    Verify(VerifyError),
}

impl fmt::Display for MinimizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimizationError::Config(e) => write!(f, "Configuration error: {}", e),
            MinimizationError::Cube(e) => write!(f, "Cube error: {}", e),
            MinimizationError::Verify(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MinimizationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MinimizationError::Config(e) => Some(e),
            MinimizationError::Cube(e) => Some(e),
            MinimizationError::Verify(e) => Some(e),
        }
    }
}

impl From<ConfigError> for MinimizationError {
    fn from(err: ConfigError) -> Self {
        MinimizationError::Config(err)
    }
}

impl From<CubeError> for MinimizationError {
    fn from(err: CubeError) -> Self {
        MinimizationError::Cube(err)
    }
}

impl From<VerifyError> for MinimizationError {
    fn from(err: VerifyError) -> Self {
        MinimizationError::Verify(err)
    }
}

impl From<MinimizationError> for io::Error {
    fn from(err: MinimizationError) -> Self {
        match err {
            MinimizationError::Config(e) => io::Error::new(io::ErrorKind::InvalidInput, e),
            MinimizationError::Cube(e) => io::Error::new(io::ErrorKind::InvalidData, e),
            MinimizationError::Verify(e) => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}

/// What went wrong while reading PLA text.
///
/// Format defects come back as [`PLAReadError::Syntax`] with the
/// one-based line they were found on (end-of-input checks report the last
/// line). Writing needs no counterpart wrapper: the PLA writer can only
/// fail on IO and returns `io::Error` directly.
#[derive(Debug)]
pub enum PLAReadError {
    /// The text is not valid PLA format.
    Syntax {
        /// One-based line number
        line: usize,
        /// The defect itself
        source: PLAError,
    },
    /// The underlying reader failed.
    Io(io::Error),
}

impl PLAReadError {
    /// Attach a line number to a format defect.
    pub(crate) fn at(line: usize, source: PLAError) -> Self {
        PLAReadError::Syntax { line, source }
    }
}

impl fmt::Display for PLAReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PLAReadError::Syntax { line, source } => {
                write!(f, "PLA line {}: {}", line, source)
            }
            PLAReadError::Io(e) => write!(f, "reading PLA input: {}", e),
        }
    }
}

impl std::error::Error for PLAReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PLAReadError::Syntax { source, .. } => Some(source),
            PLAReadError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for PLAReadError {
    fn from(err: io::Error) -> Self {
        PLAReadError::Io(err)
    }
}

impl From<PLAReadError> for io::Error {
    fn from(err: PLAReadError) -> Self {
        match err {
            // keep the original kind when IO already failed; a syntax
            // defect maps to InvalidData with the line baked into the
            // message
            PLAReadError::Io(e) => e,
            syntax => io::Error::new(io::ErrorKind::InvalidData, syntax.to_string()),
        }
    }
}
