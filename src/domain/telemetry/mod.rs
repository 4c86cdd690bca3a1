// SPDX-License-Identifier: MPL-2.0
//! Telemetry domain types.
//!
//! - [`BufferCapacity`]: Record buffer and ingest channel sizing

mod newtypes;

pub use newtypes::{record_capacity_bounds, BufferCapacity};
