//! Statutory Entitlement Engine for insolvency employee claims
//!
//! This crate computes what a former employee of an insolvent employer may claim
//! (wage arrears, holiday pay, notice pay, redundancy pay and unpaid pension
//! contributions) and splits every amount into preferential and unsecured claims.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
