//! Vocabulary construction and name-keyed lookup.

use std::collections::hash_map::Entry;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::Index;
use std::slice;
use std::sync::Arc;

use rustc_hash::FxHashMap;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::{DefinitionError, UnknownNameError};
use crate::flag::Flag;

/// An immutable set of named bit flags built from an ordered name list.
///
/// Each name is bound to the value `2^i`, where `i` is its 0-based position
/// in the definition order, so any subset of the vocabulary can be OR-ed
/// into a single `u64` without collisions. The set is fixed once built:
/// bindings are never added, renamed, or removed afterwards, which makes a
/// shared `Enumeration` safe to read from any number of threads.
///
/// ```
/// use flags::Enumeration;
///
/// let messages = Enumeration::new(["OPEN", "UPDATE", "NOTIFICATION"])?;
///
/// assert_eq!(messages["OPEN"], 1u64);
/// assert_eq!(messages["UPDATE"], 2u64);
/// assert_eq!(messages["NOTIFICATION"], 4u64);
/// assert_eq!(&messages["OPEN"] | &messages["UPDATE"], 3);
/// # Ok::<(), flags::DefinitionError>(())
/// ```
#[derive(Clone)]
pub struct Enumeration {
    /// Bindings in definition order; `flags[i]` always owns bit `i`.
    flags: Vec<Flag>,
    index: FxHashMap<Arc<str>, usize>,
}

impl Enumeration {
    /// Maximum number of flags a vocabulary can hold.
    pub const CAPACITY: u32 = u64::BITS;

    /// Builds a vocabulary from an ordered sequence of names.
    ///
    /// Position `i` in the sequence receives the value `2^i`. The factory
    /// imposes no syntax on the names themselves, but it rejects two kinds
    /// of definition outright:
    ///
    /// - more than [`Self::CAPACITY`] names
    ///   ([`DefinitionError::FlagOverflow`]), because a 65th bit cannot be
    ///   represented without aliasing an existing flag, and
    /// - a name that appears twice
    ///   ([`DefinitionError::DuplicateName`]). A repeated name would leave
    ///   only its last binding reachable through lookup, so the factory
    ///   rejects the definition instead of letting one binding shadow
    ///   another.
    ///
    /// ```
    /// use flags::{DefinitionError, Enumeration};
    ///
    /// let err = Enumeration::new(["OPEN", "UPDATE", "OPEN"]).unwrap_err();
    /// assert!(matches!(err, DefinitionError::DuplicateName { .. }));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] when the definition overflows the bit
    /// width or repeats a name.
    #[cfg_attr(feature = "tracing", instrument(name = "define_flags", skip(names)))]
    pub fn new<I, S>(names: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();
        if names.len() > Self::CAPACITY as usize {
            return Err(DefinitionError::FlagOverflow {
                requested: names.len(),
                capacity: Self::CAPACITY,
            });
        }

        let mut flags = Vec::with_capacity(names.len());
        let mut index = FxHashMap::default();
        index.reserve(names.len());

        for (position, name) in names.iter().enumerate() {
            let name: Arc<str> = Arc::from(name.as_ref());
            match index.entry(Arc::clone(&name)) {
                Entry::Occupied(existing) => {
                    return Err(DefinitionError::DuplicateName {
                        name: name.as_ref().to_owned(),
                        first: *existing.get(),
                        second: position,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }
            flags.push(Flag::new(position as u32, name));
        }

        Ok(Self { flags, index })
    }

    /// Looks up a flag by name, returning `None` for undefined names.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Flag> {
        self.index.get(name).map(|&position| &self.flags[position])
    }

    /// Looks up a flag by name, reporting undefined names as a typed error.
    ///
    /// ```
    /// use flags::Enumeration;
    ///
    /// let messages = Enumeration::new(["OPEN", "UPDATE"])?;
    ///
    /// assert_eq!(messages.flag("OPEN")?.bits(), 1);
    /// assert_eq!(messages.flag("KEEPALIVE").unwrap_err().name(), "KEEPALIVE");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`UnknownNameError`] when `name` was not part of the
    /// definition list.
    pub fn flag(&self, name: &str) -> Result<&Flag, UnknownNameError> {
        self.get(name).ok_or_else(|| UnknownNameError::new(name))
    }

    /// Reports whether `name` is part of the vocabulary.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the number of flags in the vocabulary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns `true` when the vocabulary holds no flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterates the flags in ascending bit order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.flags.iter(),
        }
    }

    /// Returns the union of every bit the vocabulary defines.
    #[must_use]
    pub fn mask(&self) -> u64 {
        self.flags.iter().fold(0, |mask, flag| mask | flag.bits())
    }

    /// Returns the bits of `combined` that fall outside the vocabulary.
    #[must_use]
    pub fn undefined_bits(&self, combined: u64) -> u64 {
        combined & !self.mask()
    }

    /// Iterates the flags whose bits are set in `combined`, in ascending
    /// bit order.
    ///
    /// Bits outside the vocabulary are skipped; use
    /// [`undefined_bits`](Self::undefined_bits) to inspect the residue.
    ///
    /// ```
    /// use flags::Enumeration;
    ///
    /// let messages = Enumeration::new(["OPEN", "UPDATE", "NOTIFICATION"])?;
    /// let session = &messages["NOTIFICATION"] | &messages["OPEN"];
    ///
    /// let names: Vec<&str> = messages.decompose(session).map(|f| f.name()).collect();
    /// assert_eq!(names, ["OPEN", "NOTIFICATION"]);
    /// # Ok::<(), flags::DefinitionError>(())
    /// ```
    #[must_use]
    pub fn decompose(&self, combined: u64) -> Decompose<'_> {
        Decompose {
            flags: &self.flags,
            remaining: combined & self.mask(),
        }
    }

    /// Returns an adaptor that formats `combined` for trace output.
    ///
    /// Defined bits render as their names joined with `|`; any residue
    /// outside the vocabulary is appended in hex. A composite has no single
    /// canonical name, so this rendering is a debugging aid rather than a
    /// reversible encoding.
    ///
    /// ```
    /// use flags::Enumeration;
    ///
    /// let messages = Enumeration::new(["OPEN", "UPDATE"])?;
    ///
    /// assert_eq!(messages.display(3).to_string(), "OPEN|UPDATE");
    /// assert_eq!(messages.display(0b110).to_string(), "UPDATE|0x4");
    /// assert_eq!(messages.display(0).to_string(), "0x0");
    /// # Ok::<(), flags::DefinitionError>(())
    /// ```
    #[must_use]
    pub fn display(&self, combined: u64) -> DisplayBits<'_> {
        DisplayBits {
            set: self,
            bits: combined,
        }
    }
}

impl fmt::Debug for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumeration")
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Enumeration {
    fn eq(&self, other: &Self) -> bool {
        // The name index is derived from the binding list, so comparing the
        // lists compares the vocabularies.
        self.flags == other.flags
    }
}

impl Eq for Enumeration {}

impl Index<&str> for Enumeration {
    type Output = Flag;

    /// Attribute-style lookup sugar.
    ///
    /// # Panics
    ///
    /// Panics when `name` was not part of the definition list. Use
    /// [`Enumeration::get`] or [`Enumeration::flag`] for fallible lookup.
    fn index(&self, name: &str) -> &Flag {
        match self.get(name) {
            Some(flag) => flag,
            None => panic!("unknown flag name \"{name}\""),
        }
    }
}

impl<'a> IntoIterator for &'a Enumeration {
    type Item = &'a Flag;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a vocabulary's flags in ascending bit order.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, Flag>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Flag;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl FusedIterator for Iter<'_> {}

/// Iterator over the defined flags set within a combined value.
///
/// Returned by [`Enumeration::decompose`]. Yields flags in ascending bit
/// order and never visits bits outside the vocabulary.
#[derive(Clone, Debug)]
pub struct Decompose<'a> {
    flags: &'a [Flag],
    remaining: u64,
}

impl<'a> Iterator for Decompose<'a> {
    type Item = &'a Flag;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let position = self.remaining.trailing_zeros();
        self.remaining &= !(1u64 << position);
        // `remaining` is pre-masked to defined bits and bit `i` always
        // belongs to `flags[i]`, so the position is in range.
        self.flags.get(position as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Decompose<'_> {
    fn len(&self) -> usize {
        self.remaining.count_ones() as usize
    }
}

impl FusedIterator for Decompose<'_> {}

/// Formatting adaptor returned by [`Enumeration::display`].
#[derive(Clone, Debug)]
pub struct DisplayBits<'a> {
    set: &'a Enumeration,
    bits: u64,
}

impl fmt::Display for DisplayBits<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separate = false;
        for flag in self.set.decompose(self.bits) {
            if separate {
                f.write_str("|")?;
            }
            f.write_str(flag.name())?;
            separate = true;
        }

        let residue = self.set.undefined_bits(self.bits);
        if residue != 0 || !separate {
            if separate {
                f.write_str("|")?;
            }
            write!(f, "{residue:#x}")?;
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Enumeration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.flags.iter().map(Flag::name))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Enumeration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        Self::new(names).map_err(serde::de::Error::custom)
    }
}
