//! Single named flag values.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::sync::Arc;

/// A single named bit produced by an [`Enumeration`](crate::Enumeration).
///
/// A `Flag` pairs a power-of-two `u64` with the symbolic name it was defined
/// under. The name travels with the value rather than being derived from it,
/// because once flags are OR-ed together the numeric value alone can no
/// longer tell two vocabularies' bits apart. Formatting a `Flag` for humans
/// therefore yields the name, while the bitwise operators work on the raw
/// integer:
///
/// ```
/// use flags::Enumeration;
///
/// let messages = Enumeration::new(["OPEN", "UPDATE"])?;
/// let open = &messages["OPEN"];
///
/// assert_eq!(open.bits(), 1);
/// assert_eq!(open.to_string(), "OPEN");
/// assert_eq!(open | &messages["UPDATE"], 3);
/// # Ok::<(), flags::DefinitionError>(())
/// ```
///
/// Combining flags produces a plain `u64`; composites do not carry a single
/// display name. Use [`Enumeration::display`](crate::Enumeration::display)
/// to render a composite for trace output.
///
/// The name is stored behind an [`Arc`], so cloning a `Flag` out of its
/// vocabulary is cheap and the value stays `Send + Sync`.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Flag {
    bits: u64,
    name: Arc<str>,
}

impl Flag {
    /// Callers guarantee `position < u64::BITS`; the factory checks the
    /// vocabulary size before any flag is built.
    pub(crate) fn new(position: u32, name: Arc<str>) -> Self {
        Self {
            bits: 1u64 << position,
            name,
        }
    }

    /// Returns the raw power-of-two value of the flag.
    #[must_use]
    pub const fn bits(&self) -> u64 {
        self.bits
    }

    /// Returns the symbolic name attached to the flag at definition time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the 0-based bit position the flag occupies.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.bits.trailing_zeros()
    }

    /// Checks whether this flag's bit is set within a combined value.
    ///
    /// ```
    /// use flags::Enumeration;
    ///
    /// let messages = Enumeration::new(["OPEN", "UPDATE", "NOTIFICATION"])?;
    /// let session = &messages["OPEN"] | &messages["UPDATE"];
    ///
    /// assert!(messages["OPEN"].is_set_in(session));
    /// assert!(!messages["NOTIFICATION"].is_set_in(session));
    /// # Ok::<(), flags::DefinitionError>(())
    /// ```
    #[must_use]
    pub const fn is_set_in(&self, combined: u64) -> bool {
        combined & self.bits == self.bits
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("bits", &format_args!("{:#x}", self.bits))
            .finish()
    }
}

impl From<Flag> for u64 {
    fn from(flag: Flag) -> Self {
        flag.bits
    }
}

impl From<&Flag> for u64 {
    fn from(flag: &Flag) -> Self {
        flag.bits
    }
}

impl PartialEq<u64> for Flag {
    fn eq(&self, other: &u64) -> bool {
        self.bits == *other
    }
}

impl PartialEq<Flag> for u64 {
    fn eq(&self, other: &Flag) -> bool {
        *self == other.bits
    }
}

impl BitOr for &Flag {
    type Output = u64;

    fn bitor(self, rhs: &Flag) -> u64 {
        self.bits | rhs.bits
    }
}

impl BitOr for Flag {
    type Output = u64;

    fn bitor(self, rhs: Flag) -> u64 {
        self.bits | rhs.bits
    }
}

impl BitOr<u64> for &Flag {
    type Output = u64;

    fn bitor(self, rhs: u64) -> u64 {
        self.bits | rhs
    }
}

impl BitOr<u64> for Flag {
    type Output = u64;

    fn bitor(self, rhs: u64) -> u64 {
        self.bits | rhs
    }
}

impl BitOr<&Flag> for u64 {
    type Output = u64;

    fn bitor(self, rhs: &Flag) -> u64 {
        self | rhs.bits
    }
}

impl BitOr<Flag> for u64 {
    type Output = u64;

    fn bitor(self, rhs: Flag) -> u64 {
        self | rhs.bits
    }
}

impl BitAnd for &Flag {
    type Output = u64;

    fn bitand(self, rhs: &Flag) -> u64 {
        self.bits & rhs.bits
    }
}

impl BitAnd for Flag {
    type Output = u64;

    fn bitand(self, rhs: Flag) -> u64 {
        self.bits & rhs.bits
    }
}

impl BitAnd<u64> for &Flag {
    type Output = u64;

    fn bitand(self, rhs: u64) -> u64 {
        self.bits & rhs
    }
}

impl BitAnd<u64> for Flag {
    type Output = u64;

    fn bitand(self, rhs: u64) -> u64 {
        self.bits & rhs
    }
}

impl BitAnd<&Flag> for u64 {
    type Output = u64;

    fn bitand(self, rhs: &Flag) -> u64 {
        self & rhs.bits
    }
}

impl BitAnd<Flag> for u64 {
    type Output = u64;

    fn bitand(self, rhs: Flag) -> u64 {
        self & rhs.bits
    }
}

impl BitXor for &Flag {
    type Output = u64;

    fn bitxor(self, rhs: &Flag) -> u64 {
        self.bits ^ rhs.bits
    }
}

impl BitXor for Flag {
    type Output = u64;

    fn bitxor(self, rhs: Flag) -> u64 {
        self.bits ^ rhs.bits
    }
}

impl BitXor<u64> for &Flag {
    type Output = u64;

    fn bitxor(self, rhs: u64) -> u64 {
        self.bits ^ rhs
    }
}

impl BitXor<u64> for Flag {
    type Output = u64;

    fn bitxor(self, rhs: u64) -> u64 {
        self.bits ^ rhs
    }
}

impl BitXor<&Flag> for u64 {
    type Output = u64;

    fn bitxor(self, rhs: &Flag) -> u64 {
        self ^ rhs.bits
    }
}

impl BitXor<Flag> for u64 {
    type Output = u64;

    fn bitxor(self, rhs: Flag) -> u64 {
        self ^ rhs.bits
    }
}

impl Not for &Flag {
    type Output = u64;

    fn not(self) -> u64 {
        !self.bits
    }
}

impl Not for Flag {
    type Output = u64;

    fn not(self) -> u64 {
        !self.bits
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Flag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(position: u32, name: &str) -> Flag {
        Flag::new(position, Arc::from(name))
    }

    #[test]
    fn display_yields_the_name_not_the_value() {
        let open = flag(0, "OPEN");

        assert_eq!(open.to_string(), "OPEN");
        assert_eq!(format!("{open}"), "OPEN");
    }

    #[test]
    fn debug_shows_name_and_hex_bits() {
        let update = flag(1, "UPDATE");

        assert_eq!(
            format!("{update:?}"),
            "Flag { name: \"UPDATE\", bits: 0x2 }"
        );
    }

    #[test]
    fn bits_are_powers_of_two_at_the_given_position() {
        for position in [0, 1, 7, 31, 63] {
            let value = flag(position, "X");
            assert_eq!(value.bits(), 1u64 << position);
            assert_eq!(value.position(), position);
        }
    }

    #[test]
    fn operators_combine_into_plain_integers() {
        let open = flag(0, "OPEN");
        let update = flag(1, "UPDATE");

        assert_eq!(&open | &update, 3);
        assert_eq!(&open & &update, 0);
        assert_eq!(&open ^ &update, 3);
        assert_eq!(open.clone() | 0b100, 0b101);
        assert_eq!(0b11 & &update, 0b10);
        assert_eq!(!&open, !1u64);
    }

    #[test]
    fn compares_against_raw_integers() {
        let notification = flag(2, "NOTIFICATION");

        assert_eq!(notification, 4u64);
        assert_eq!(4u64, notification);
        assert_eq!(u64::from(&notification), 4);
    }

    #[test]
    fn membership_probe_matches_only_its_own_bit() {
        let open = flag(0, "OPEN");
        let update = flag(1, "UPDATE");
        let combined = &open | &update;

        assert!(open.is_set_in(combined));
        assert!(update.is_set_in(combined));
        assert!(!flag(2, "NOTIFICATION").is_set_in(combined));
    }
}
