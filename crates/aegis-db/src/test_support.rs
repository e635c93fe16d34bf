//! Shared helpers for tests that need a live in-memory database.

use crate::service::AegisService;

/// Open an in-memory database with migrations applied.
///
/// # Panics
///
/// Panics if the in-memory database cannot be opened. Only for tests.
#[must_use]
pub async fn memory_service() -> AegisService {
    AegisService::new_local(":memory:")
        .await
        .expect("in-memory database opens")
}
