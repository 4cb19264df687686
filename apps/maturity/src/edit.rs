//! # Edit Gate
//!
//! Every write from the CLI and the HTTP API goes through here:
//! the dimension must have reference data, the levels must be on the scale
//! with desired >= current, and the gap is recomputed before the upsert.
//! A rejected edit never reaches the store.

use maturity_core::reference::is_supported;
use maturity_core::{BlobStore, Dimension, DimensionRepository, MaturityError, UpsertOutcome};

/// Reject names that have no reference data.
pub fn require_supported(name: &str) -> Result<(), MaturityError> {
    if is_supported(name) {
        Ok(())
    } else {
        Err(MaturityError::UnknownDimension(name.to_string()))
    }
}

/// Load a dimension for editing.
///
/// Returns the stored record, or a fresh `(1, 1, LOW, [])` record when the
/// dimension has never been edited.
pub fn load_for_edit<S: BlobStore>(
    repo: &DimensionRepository<S>,
    name: &str,
) -> Result<Dimension, MaturityError> {
    require_supported(name)?;
    Ok(repo
        .fetch_one(name)?
        .unwrap_or_else(|| Dimension::new(name)))
}

/// Find a dimension for display.
///
/// Returns the stored record, or the default record for a supported
/// dimension that has not been assessed yet. The flag tells which.
pub fn lookup<S: BlobStore>(
    repo: &DimensionRepository<S>,
    name: &str,
) -> Result<(Dimension, bool), MaturityError> {
    match repo.fetch_one(name)? {
        Some(dimension) => Ok((dimension, true)),
        None => {
            require_supported(name)?;
            Ok((Dimension::new(name), false))
        }
    }
}

/// Validate, recompute the gap and upsert.
///
/// On success `dimension` holds exactly what was stored.
pub fn save_dimension<S: BlobStore>(
    repo: &mut DimensionRepository<S>,
    dimension: &mut Dimension,
) -> Result<UpsertOutcome, MaturityError> {
    require_supported(dimension.name())?;
    if let Err(e) = dimension.validate() {
        tracing::warn!(dimension = dimension.name(), "Edit rejected: {}", e);
        return Err(e);
    }
    dimension.recompute_gap();

    match repo.upsert(dimension.clone()) {
        Ok(outcome) => {
            tracing::info!(
                dimension = dimension.name(),
                current = dimension.current_state(),
                desired = dimension.desired_state(),
                gap = %dimension.gap(),
                index = outcome.index(),
                "Dimension saved"
            );
            Ok(outcome)
        }
        Err(e) => {
            tracing::error!(dimension = dimension.name(), "Save failed: {}", e);
            Err(e)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
