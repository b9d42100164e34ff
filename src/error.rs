use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the simulator
#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Trace error: {0}")]
    TraceError(#[from] TraceError),

    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Malformed access: {0}")]
    AccessError(#[from] AccessError),

    #[error("Invariant violation (internal defect): {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Errors raised when validating a cache configuration.
/// All of these are fatal before any simulation run starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cache size {0} is not a nonzero power of two")]
    CacheSizeNotPow2(usize),

    #[error("Cache size {0} exceeds the 32-bit address space")]
    CacheTooLarge(usize),

    #[error("Block size {0} is not a nonzero power of two")]
    BlockSizeNotPow2(usize),

    #[error("Cache size {0} is not a multiple of block size {1}")]
    SizeNotMultipleOfBlock(usize, usize),

    #[error("Associativity {0} is not between 1 and the total line count {1}")]
    BadAssociativity(usize, usize),

    #[error("Line count {0} is not a multiple of associativity {1}")]
    UnevenSets(usize, usize),

    #[error("Offset and index bits ({0}) exceed the {1}-bit address width")]
    AddressWidthTooSmall(usize, usize),
}

/// Errors related to trace file operations
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to read trace file '{0}': {1}")]
    FileReadError(PathBuf, #[source] std::io::Error),

    #[error("Parse error in '{path}' at line {line}: {detail}")]
    ParseError {
        path: PathBuf,
        line: usize,
        detail: String,
    },
}

/// Errors raised for a malformed access during replay.
/// Fatal for the whole run; the driver never skips an access.
#[derive(Error, Debug)]
pub enum AccessError {
    #[error(
        "Access #{index}: address {address:#010x} exceeds the {width}-bit address width"
    )]
    AddressOutOfRange {
        index: usize,
        address: u32,
        width: usize,
    },
}

/// Type alias for Result with SimulatorError
pub type SimulatorResult<T> = Result<T, SimulatorError>;
