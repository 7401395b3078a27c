// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for CRD discovery, finalizer updates, and Events.

pub mod crd;
pub mod events;
pub mod objects;

pub use crd::wait_for_crds;
pub use events::{EventPublisher, KubeEventPublisher};
pub use objects::{ensure_finalizer, has_finalizer, remove_finalizer};
