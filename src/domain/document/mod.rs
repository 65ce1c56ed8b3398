//! Document domain module.
//!
//! Uploaded documents, reusable templates, and e-signatures.

pub(crate) mod record;
mod signature;

pub use record::{Document, DocumentCategory, DocumentRole, DocumentUpdate, NewDocument};
pub use signature::{NewSignature, SignRequest, Signature};
