//! HTTP adapter for document and e-signature endpoints.
//!
//! - `GET /api/properties/:id/documents` - Documents attached to a listing
//! - `GET /api/user/documents?role=uploader|signer` - The caller's documents
//! - `GET /api/documents/templates` - Reusable templates
//! - `POST /api/documents` - Register an uploaded file
//! - `GET|PUT|DELETE /api/documents/:id` - Single document, uploader-only writes
//! - `GET /api/documents/:id/signatures` - Who signed
//! - `POST /api/documents/:id/sign` - Sign, recording IP and user agent

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::DocumentsAppState;
pub use routes::documents_router;
