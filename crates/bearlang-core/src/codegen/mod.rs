// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Code generation for BearLang.
//!
//! This module contains code generators for different target formats:
//! - **`cpp`**: C++ source generation (compiled by an external host compiler)

pub mod cpp;
