//! Setpoint Payload Codec
//!
//! Decoding and encoding of Setpoint mailbox message payloads. A payload is
//! a textual numeric sequence whose first element is a simulated timestamp
//! and whose remaining elements are signal values.
//!
//! # Wire format
//!
//! The canonical form is a bracketed, comma-separated literal:
//!
//! ```text
//! [12, 0.5, -1.25]
//! ```
//!
//! Payloads produced by foreign ecosystems may wrap values in constructor
//! calls (`np.float64(1.5)`, `np.array([...])`) and spell booleans and the
//! absent value as `True` / `False` / `None`. The decoder tolerates all of
//! these; the encoder emits only the canonical form.
//!
//! # Decoding pipeline
//!
//! 1. [`normalize`] strips annotation wrappers and rewrites foreign
//!    literal spellings, repeating until the text stops changing.
//! 2. [`decode`] parses the result with a restricted recursive-descent
//!    grammar — numbers, nested brackets, commas, and the three neutral
//!    tokens. Nothing is evaluated; untrusted channel text cannot smuggle
//!    code through the decoder.
//!
//! Non-numeric leaves are rejected by default; [`decode_with_policy`] with
//! [`LeafPolicy::Coerce`] opts into numeric placeholders for senders that
//! emit booleans or nulls.

pub mod encode;
pub mod error;
pub mod normalize;
pub mod parse;

pub use encode::encode;
pub use error::{Error, Result};
pub use normalize::normalize;
pub use parse::{decode, decode_with_policy, LeafPolicy};
