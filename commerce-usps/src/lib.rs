//! USPS shipping rates for a commerce platform.
//!
//! Turns a shipment into a USPS rate request and the carrier's answer into
//! a filtered list of priced shipping services.

pub mod config;
pub mod domain;
pub mod package;
pub mod rates;
pub mod shipping_method;
pub mod usps;
pub mod web;
