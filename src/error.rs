use thiserror::Error;

/// Failure modes of the rMQR encoding pipeline.
///
/// Every variant is a terminal failure of the encoding call in progress:
/// there is no partial success and no internal retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RmqrError {
    /// The encoded bit length exceeds the chosen version's capacity, fit
    /// selection found no version that fits, or the input exceeds the
    /// 360-character bound of the segmentation optimizer.
    #[error("data too long to fit in the selected version/ECC level")]
    DataTooLong,

    /// A requested version name is not one of the 32 legal rMQR versions.
    #[error("illegal rMQR version: {0}")]
    IllegalVersion(String),

    /// `make` was called with no segments appended.
    #[error("no segment to encode")]
    NoSegment,

    /// A character failed a mode's validity predicate for an explicitly
    /// selected mode.
    #[error("illegal character {character:?} for mode {mode}")]
    IllegalCharacter { character: char, mode: &'static str },
}

pub type Result<T> = std::result::Result<T, RmqrError>;
