// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Finalizer tokens owned by this controller
pub mod finalizers {
    /// Set on every live SecretBinding
    pub const BINDING: &str = "gardener";
    /// Set on every Secret referenced by a live SecretBinding
    pub const SECRET: &str = "gardener.cloud/gardener";
}

/// Event reasons and actions surfaced on SecretBindings
pub mod events {
    /// Deletion is blocked by Shoots still referencing the binding
    pub const RESOURCE_REFERENCED: &str = "ResourceReferenced";
    pub const ACTION_DELETE: &str = "Delete";
}

/// The controller name reported on Events
pub const CONTROLLER_NAME: &str = "secretbinding-controller";

/// Controller defaults
pub mod controller {
    /// Delay before a failed key is reconciled again
    pub const RETRY_DELAY_SECS: u64 = 60;
    /// Number of SecretBindings reconciled at the same time
    pub const CONCURRENT_SYNCS: u16 = 5;
}

/// CRD polling configuration
pub mod crd {
    pub const GROUP: &str = "core.gardener.cloud";
    pub const VERSION: &str = "v1beta1";
    /// Initial polling interval in seconds when waiting for CRDs
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}
