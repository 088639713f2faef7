// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bundled collaborator implementations.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(feature = "flat_scene_adapter")]
pub mod flat_scene;
