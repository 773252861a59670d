//! Account decoding errors.

use core::fmt;

/// Failure to decode fetched account data into a typed schema.
///
/// Codes are stable so clients can report them alongside the account address.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountDecodeError {
    /// Account data shorter than the discriminator
    TooShort = 0,

    /// Discriminator belongs to another account type
    DiscriminatorMismatch = 1,

    /// Body failed Borsh deserialization
    InvalidData = 2,
}

impl AccountDecodeError {
    /// Convert to error code
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    /// Create from error code
    pub fn from_u32(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::TooShort),
            1 => Some(Self::DiscriminatorMismatch),
            2 => Some(Self::InvalidData),
            _ => None,
        }
    }
}

impl fmt::Display for AccountDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => f.write_str("account data too short"),
            Self::DiscriminatorMismatch => f.write_str("account discriminator mismatch"),
            Self::InvalidData => f.write_str("account data failed to deserialize"),
        }
    }
}

impl std::error::Error for AccountDecodeError {}
