// SPDX-License-Identifier: MPL-2.0
//! `alitheia_workbench` is the state core of the alitheia Labs underwriting
//! workbench demo.
//!
//! It provides a bounded toast notification store with delayed removal,
//! best-effort interaction telemetry, and the static case fixture the
//! review screens display.

#![doc(html_root_url = "https://docs.rs/alitheia_workbench/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod fixtures;
pub mod notifications;
pub mod telemetry;
