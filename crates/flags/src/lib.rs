#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Named bit-flag vocabularies for protocol tracing and debugging.
//!
//! Protocol code tends to accumulate small sets of capability bits whose
//! raw values mean nothing in a log line. This crate builds such sets from
//! an ordered name list: position `i` becomes the value `2^i`, and every
//! produced [`Flag`] keeps its symbolic name attached so it prints as
//! `OPEN` rather than `1`. Flags combine through the ordinary bitwise
//! operators into plain `u64` masks, exactly as hand-numbered constants
//! would.
//!
//! # Examples
//!
//! Define a message vocabulary once at startup and combine flags freely:
//!
//! ```
//! use flags::Enumeration;
//!
//! let messages = Enumeration::new(["OPEN", "UPDATE", "NOTIFICATION"])?;
//!
//! let open = &messages["OPEN"];
//! assert_eq!(open.bits(), 1);
//! assert_eq!(open.to_string(), "OPEN");
//!
//! let session = open | &messages["UPDATE"];
//! assert_eq!(session, 3);
//! assert_eq!(messages.display(session).to_string(), "OPEN|UPDATE");
//! # Ok::<(), flags::DefinitionError>(())
//! ```
//!
//! Definitions that cannot produce distinct bits are rejected instead of
//! silently aliasing flags:
//!
//! ```
//! use flags::{DefinitionError, Enumeration};
//!
//! let too_many: Vec<String> = (0..=64).map(|i| format!("FLAG_{i}")).collect();
//! assert!(matches!(
//!     Enumeration::new(&too_many),
//!     Err(DefinitionError::FlagOverflow { requested: 65, .. })
//! ));
//! ```
//!
//! # Design
//!
//! The factory trades minimal representation for debuggable representation:
//! a [`Flag`] is a `{bits, name}` value pair, never a bare integer patched
//! with a display field after the fact. The [`Enumeration`] holding the
//! bindings is immutable once constructed and `Send + Sync`, so a single
//! set defined at module initialization can serve every thread for the
//! life of the process.
//!
//! Composites built by OR-ing flags are plain `u64` values with no single
//! canonical name; [`Enumeration::display`] renders them for trace output
//! on a best-effort basis, and [`Enumeration::decompose`] recovers the
//! individual defined flags.
//!
//! # Feature flags
//!
//! - `serde`: serialize a vocabulary as its ordered name list (and a
//!   [`Flag`] as its name); deserializing re-runs the factory checks.
//! - `tracing`: instrument vocabulary construction.

mod error;
mod flag;
mod set;

pub use error::{DefinitionError, UnknownNameError};
pub use flag::Flag;
pub use set::{Decompose, DisplayBits, Enumeration, Iter};
