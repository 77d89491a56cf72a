use async_trait::async_trait;

use crate::error::AdapterError;
use crate::models::observation::{Observation, SourceKind};

/// A black box that polls one external system.
///
/// Implementations collapse any source-specific field naming (for example a
/// hostname reported under two different keys) before emitting observations.
/// They do not need to time themselves out: the orchestrator bounds every call.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn source_id(&self) -> &str;

    fn source_kind(&self) -> SourceKind;

    async fn fetch(&self) -> Result<Vec<Observation>, AdapterError>;
}
