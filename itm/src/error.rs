//! Hard errors raised by input validation.
//!
//! Each variant carries the stable numeric code used by other ITM frontends,
//! so results can be compared across implementations.

use thiserror::Error;

/// ITM error codes (values ≥ 1000).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ItmError {
    #[error("TX terminal height is out of range [0.5, 3000] m")]
    TxHeightOutOfRange,

    #[error("RX terminal height is out of range [0.5, 3000] m")]
    RxHeightOutOfRange,

    #[error("invalid radio climate code")]
    InvalidClimate,

    #[error("time percentage is out of range (0, 100)")]
    TimeOutOfRange,

    #[error("location percentage is out of range (0, 100)")]
    LocationOutOfRange,

    #[error("situation percentage is out of range (0, 100)")]
    SituationOutOfRange,

    #[error("confidence percentage is out of range (0, 100)")]
    ConfidenceOutOfRange,

    #[error("reliability percentage is out of range (0, 100)")]
    ReliabilityOutOfRange,

    #[error("surface refractivity is out of range [250, 400] N-units")]
    RefractivityOutOfRange,

    #[error("frequency is out of range [20, 20000] MHz")]
    FrequencyOutOfRange,

    #[error("invalid polarisation code")]
    InvalidPolarisation,

    #[error("relative permittivity must be at least 1")]
    InvalidEpsilon,

    #[error("ground conductivity must be positive")]
    InvalidSigma,

    #[error("ground transfer impedance has a real part smaller than its imaginary magnitude")]
    InvalidGroundImpedance,

    #[error("invalid mode of variability code")]
    InvalidMdvar,

    #[error("effective earth curvature is out of range")]
    EffectiveEarthOutOfRange,

    #[error("path distance must be positive and finite")]
    DistanceOutOfRange,

    #[error("terrain irregularity must be non-negative and finite")]
    DeltaHOutOfRange,

    #[error("invalid TX siting criteria code")]
    InvalidTxSitingCriteria,

    #[error("invalid RX siting criteria code")]
    InvalidRxSitingCriteria,

    #[error("unknown ITM error code: {0}")]
    Unknown(i32),
}

impl ItmError {
    /// Creates an error from its numeric code.
    pub fn from_code(code: i32) -> Self {
        match code {
            1000 => ItmError::TxHeightOutOfRange,
            1001 => ItmError::RxHeightOutOfRange,
            1002 => ItmError::InvalidClimate,
            1003 => ItmError::TimeOutOfRange,
            1004 => ItmError::LocationOutOfRange,
            1005 => ItmError::SituationOutOfRange,
            1006 => ItmError::ConfidenceOutOfRange,
            1007 => ItmError::ReliabilityOutOfRange,
            1008 => ItmError::RefractivityOutOfRange,
            1009 => ItmError::FrequencyOutOfRange,
            1010 => ItmError::InvalidPolarisation,
            1011 => ItmError::InvalidEpsilon,
            1012 => ItmError::InvalidSigma,
            1013 => ItmError::InvalidGroundImpedance,
            1014 => ItmError::InvalidMdvar,
            1015 => ItmError::EffectiveEarthOutOfRange,
            1016 => ItmError::DistanceOutOfRange,
            1017 => ItmError::DeltaHOutOfRange,
            1018 => ItmError::InvalidTxSitingCriteria,
            1019 => ItmError::InvalidRxSitingCriteria,
            _ => ItmError::Unknown(code),
        }
    }

    /// The numeric error code.
    pub fn code(&self) -> i32 {
        match self {
            ItmError::TxHeightOutOfRange => 1000,
            ItmError::RxHeightOutOfRange => 1001,
            ItmError::InvalidClimate => 1002,
            ItmError::TimeOutOfRange => 1003,
            ItmError::LocationOutOfRange => 1004,
            ItmError::SituationOutOfRange => 1005,
            ItmError::ConfidenceOutOfRange => 1006,
            ItmError::ReliabilityOutOfRange => 1007,
            ItmError::RefractivityOutOfRange => 1008,
            ItmError::FrequencyOutOfRange => 1009,
            ItmError::InvalidPolarisation => 1010,
            ItmError::InvalidEpsilon => 1011,
            ItmError::InvalidSigma => 1012,
            ItmError::InvalidGroundImpedance => 1013,
            ItmError::InvalidMdvar => 1014,
            ItmError::EffectiveEarthOutOfRange => 1015,
            ItmError::DistanceOutOfRange => 1016,
            ItmError::DeltaHOutOfRange => 1017,
            ItmError::InvalidTxSitingCriteria => 1018,
            ItmError::InvalidRxSitingCriteria => 1019,
            ItmError::Unknown(code) => *code,
        }
    }
}

/// Result type for ITM operations.
pub type ItmResult<T> = Result<T, ItmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in 1000..=1019 {
            assert_eq!(ItmError::from_code(code).code(), code);
        }
    }

    #[test]
    fn unknown_code_is_preserved() {
        let err = ItmError::from_code(1234);
        assert_eq!(err, ItmError::Unknown(1234));
        assert_eq!(err.code(), 1234);
    }

    #[test]
    fn messages_name_the_problem() {
        assert!(ItmError::InvalidClimate.to_string().contains("climate"));
        assert!(ItmError::FrequencyOutOfRange.to_string().contains("MHz"));
    }
}
