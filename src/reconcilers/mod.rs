// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconciliation logic for SecretBindings.

pub mod associations;
pub mod secret_binding;

pub use associations::determine_shoot_associations;
pub use secret_binding::SecretBindingReconciler;
