// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Controllers wiring watches, retry policies, and reconcilers together.

pub mod retry;
pub mod secret_binding;

pub use retry::{RetryPolicy, RetryTracker};
pub use secret_binding::SecretBindingController;
