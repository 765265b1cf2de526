//! The conversion pipeline stages.
//!
//! A conversion flows through at most three stages, picked by input kind:
//!
//! ```text
//!                    ┌─────────┐   ┌────────┐   ┌────────┐
//!  .docx bytes ────▶ │ extract │ ─▶│ layout │ ─▶│ render │ ─▶ PDF bytes
//!                    └─────────┘   └────────┘   └────────┘
//!                    ┌─────────┐                ┌────────┐
//!  image bytes ────▶ │ decode  │ ─────────────▶ │ render │ ─▶ PDF bytes
//!                    └─────────┘                └────────┘
//! ```
//!
//! Every stage is a plain function over owned data: extraction and decoding
//! validate the bytes they are given, layout is pure geometry, and the
//! renderer consumes an explicit page model. The dispatcher in
//! [`crate::convert`] owns sequencing, timing, and error propagation.

pub mod extract;
pub mod image;
pub mod input;
pub mod layout;
pub mod render;
