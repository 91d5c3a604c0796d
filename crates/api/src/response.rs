//! Shared response envelope for the read endpoints.
//!
//! Catalog and session lookups answer with a `{ "data": ... }` envelope.
//! The two calibration POST endpoints have their own bespoke bodies
//! (`{success, sessionId, data}` and `{success, session}`), defined next
//! to their handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
