//! Error types
//!
//! All errors are small `Copy` enums so they can cross the control channel and
//! be returned from the render loop without allocation.

use core::fmt;

/// Rejected control write. The previous value is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// Select value is not one of the enumerated options
    UnknownOption,
    /// Number value is outside its configured bounds
    OutOfRange,
    /// Value variant does not match the control kind
    TypeMismatch,
    /// Pending update queue is full
    QueueFull,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOption => f.write_str("unknown select option"),
            Self::OutOfRange => f.write_str("number out of range"),
            Self::TypeMismatch => f.write_str("value does not match control type"),
            Self::QueueFull => f.write_str("control queue is full"),
        }
    }
}

impl core::error::Error for ControlError {}

/// LED strip driver failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripError {
    /// The frame could not be pushed to the strip
    WriteFailed,
}

impl fmt::Display for StripError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed => f.write_str("failed to write frame to led strip"),
        }
    }
}

impl core::error::Error for StripError {}

/// Invalid setup-time configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Layout is longer than the frame buffer
    TooManyLeds,
    /// Tick interval must be positive
    ZeroTickInterval,
    /// Number bounds have min > max or a non-positive step
    InvalidNumberBounds,
    /// Brightness range has min > max or leaves 0.0..=1.0
    InvalidBrightnessRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyLeds => f.write_str("layout exceeds frame buffer size"),
            Self::ZeroTickInterval => f.write_str("tick interval must be positive"),
            Self::InvalidNumberBounds => f.write_str("invalid number bounds"),
            Self::InvalidBrightnessRange => f.write_str("invalid brightness range"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Settings store failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The backing storage rejected the write
    WriteFailed,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed => f.write_str("failed to persist setting"),
        }
    }
}

impl core::error::Error for StoreError {}
