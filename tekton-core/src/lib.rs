//! Tekton Core
//!
//! Core types for the IBM Cloud Continuous Delivery Tekton Pipeline API.
//!
//! This crate contains:
//! - Domain types: resources returned by the service (pipelines, runs, triggers, etc.)
//! - DTOs: request bodies and list options sent to the service

pub mod domain;
pub mod dto;
