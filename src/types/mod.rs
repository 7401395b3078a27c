// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Gardener resource types watched and read by the controller.

pub mod secret_binding;
pub mod shoot;

pub use secret_binding::SecretBinding;
pub use shoot::{Shoot, ShootSpec};
