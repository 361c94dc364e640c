//! Authorization helpers for frontends.
//!
//! Screens normally branch on [`CapabilityMap::can`]. These helpers turn a
//! denial into a [`VerdantError::PermissionDenied`] for callers that prefer
//! `?` propagation, e.g. command handlers.

use crate::policies::{Capability, CapabilityMap};
use verdant_core::{Result, VerdantError};

/// Require a single capability.
pub fn require_capability(
    capabilities: &CapabilityMap,
    capability: Capability,
    operation: &str,
) -> Result<()> {
    if capabilities.can(capability) {
        Ok(())
    } else {
        Err(VerdantError::permission_denied(format!(
            "{operation} requires '{capability}'"
        )))
    }
}

/// Capabilities from `required` that are not granted, in the given order.
pub fn missing_capabilities(
    capabilities: &CapabilityMap,
    required: &[Capability],
) -> Vec<Capability> {
    required
        .iter()
        .copied()
        .filter(|capability| !capabilities.can(*capability))
        .collect()
}

/// Require every capability in `required`.
pub fn require_all(
    capabilities: &CapabilityMap,
    required: &[Capability],
    operation: &str,
) -> Result<()> {
    let missing = missing_capabilities(capabilities, required);
    if missing.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = missing.iter().map(Capability::key).collect();
    Err(VerdantError::permission_denied(format!(
        "{operation} requires {}",
        names.join(", ")
    )))
}

/// Require at least one capability in `required`. An empty list denies.
pub fn require_any(
    capabilities: &CapabilityMap,
    required: &[Capability],
    operation: &str,
) -> Result<()> {
    if required.iter().any(|capability| capabilities.can(*capability)) {
        Ok(())
    } else {
        Err(VerdantError::permission_denied(format!(
            "{operation} requires one of the listed capabilities"
        )))
    }
}
