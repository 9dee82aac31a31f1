//! Strata Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Strata layout
//! engine and its front ends. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Integer geometric types ([`geometry`] module)
//! - **Direction**: The four layout directions and their anchor sides ([`direction`] module)
//! - **Model**: The architecture model consumed by the layout engine ([`model`] module)

pub mod direction;
pub mod geometry;
pub mod identifier;
pub mod model;
