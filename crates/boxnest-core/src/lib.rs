//! Boxnest Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Boxnest
//! layout-reconstruction pipeline. It includes:
//!
//! - **Geometry**: Bounding boxes and the containment test ([`geometry`] module)
//! - **Elements**: Detected UI elements and their classes ([`element`] module)

pub mod element;
pub mod geometry;
