//! Document Codec subsystem for recordledger
//!
//! Two closed record shapes, `User` and `Alert`, stored as JSON objects
//! under their caller-supplied `id`.
//!
//! # Design Principles
//!
//! - Every document self-describes its kind through `docType`
//! - Keys carry no type information
//! - Field names and order are fixed (existing deployments read them)
//! - Decoding checks the discriminator against the requested kind

mod codec;
mod errors;
mod types;

pub use codec::{decode, decode_collection, encode, encode_collection};
pub use errors::{CodecError, CodecResult};
pub use types::{fold_email, format_timestamp, Alert, DocType, Document, User, ALERT_STATUS_ACTIVE};
