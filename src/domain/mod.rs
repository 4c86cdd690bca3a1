// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects with ZERO external dependencies.
//!
//! # Modules
//!
//! - [`notifications`]: Toast limits ([`ToastLimit`](notifications::ToastLimit),
//!   [`RemoveDelay`](notifications::RemoveDelay))
//! - [`telemetry`]: Telemetry types ([`BufferCapacity`](telemetry::BufferCapacity))

pub mod notifications;
pub mod telemetry;
