use crate::error::TypesError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Validated identity token for a participant: exactly 12 ASCII digits.
///
/// Tokens come from validated user input or from the external identity
/// verifier; the digits themselves are opaque to the core. Parsing is the
/// only way to construct one, so a `VoterId` in hand is always well-formed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VoterId([u8; 12]);

impl VoterId {
    pub const LEN: usize = 12;

    /// The raw ASCII digit bytes.
    pub const fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }
}

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // All bytes are ASCII digits, so this never fails
        let s = std::str::from_utf8(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(s)
    }
}

impl fmt::Debug for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoterId({})", self)
    }
}

impl FromStr for VoterId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::LEN {
            return Err(TypesError::InvalidVoterIdLength(s.len()));
        }
        let mut digits = [0u8; 12];
        for (i, c) in s.chars().enumerate() {
            if !c.is_ascii_digit() {
                return Err(TypesError::InvalidVoterIdDigit(c));
            }
            digits[i] = c as u8;
        }
        Ok(Self(digits))
    }
}

impl Serialize for VoterId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VoterId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        VoterId::from_str(&s).map_err(serde::de::Error::custom)
    }
}
