//! Paywall - Content Paywall Backend
//!
//! This crate implements a content paywall: users browse articles and unlock
//! premium ones via a one-time payment, reconciled through payment provider
//! webhooks into durable unlock records.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
