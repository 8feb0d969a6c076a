//! Legacy asset entry point

use crate::observability::Event;

use super::{Clock, ContractResult, RecordContract};

impl<C: Clock> RecordContract<C> {
    /// Accepted for callers of the old asset schema. Touches no state and
    /// never fails.
    #[deprecated(note = "asset records are no longer stored; this call does nothing")]
    pub fn create_asset(
        &self,
        id: &str,
        _color: &str,
        _size: i64,
        _owner: &str,
        _appraised_value: i64,
    ) -> ContractResult<()> {
        tracing::debug!(event = %Event::DeprecatedCall, function = "CreateAsset", id, "ignored");
        Ok(())
    }
}
