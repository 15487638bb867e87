//! # Moon Widget Core Library
//!
//! This library provides the moon-phase rendering engine behind two small
//! hosts: a once-per-second clock widget (120×120 disc plus a `HH:MM:SS`
//! readout) and a batch generator that bakes the site's 1200×630 share
//! preview image. Both hosts share the exact same phase math and shader so
//! they always agree on what the moon looks like for a given instant.
//!
//! ## Design Philosophy
//!
//! ### Pure, stateless rendering
//! - **PhaseClock** ([`lunar`]): a total function from a UTC instant to a
//!   lunar age in days. One reference epoch constant, no state, no I/O.
//! - **SphereShader** ([`shader`]): a pure function of `(radius, phase,
//!   optional texture)` to a tightly packed RGBA disc. Every tick's render
//!   is independent; a slow or skipped tick only delays the next redraw.
//!
//! ### Graceful degradation
//! The textured high-resolution path falls back to the procedural crater
//! model when the surface texture cannot be read or decoded. A missing
//! asset dims the output quality, it never fails the render.
//!
//! ### Bounded arithmetic
//! All per-pixel brightness and darkening terms are clamped before they are
//! converted to channel bytes, so a pathological crater record or an extreme
//! phase degrades to visually clamped output rather than wrapped colors.
//!
//! ## Core Modules
//!
//! - [`lunar`]: calendar instant → lunar age / normalized phase
//! - [`surface`]: the fixed crater/mare catalog and its darkening model
//! - [`shader`]: per-pixel sphere illumination, procedural and textured
//! - [`texture`]: surface texture loading and sampling
//! - [`renderer`]: RGBA frame compositing and the ASCII development preview
//! - [`ogp`]: the batch share-image generator
//! - [`config`]: TOML configuration with sane defaults

pub mod config;
pub mod lunar;
pub mod ogp;
pub mod renderer;
pub mod shader;
pub mod surface;
pub mod texture;
