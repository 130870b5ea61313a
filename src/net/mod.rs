//! External collaborators consumed by the auth logic.
//!
//! SYSTEM CONTEXT
//! ==============
//! `storage` is page-local key/value persistence shared with the host app,
//! `bridge` is the native host's message channel, and `backend` is the
//! identity provider SDK. `types` holds the user payload shapes both sources
//! send, and `registration` is the release handle every listener and
//! subscription hands back. Browser implementations live in `crate::web`.

pub mod backend;
pub mod bridge;
pub mod registration;
pub mod storage;
pub mod types;
