// SPDX-License-Identifier: GPL-3.0-or-later
//! Visual regression checks for images rendered on an Android target.
//!
//! The comparison itself lives in [`compare::compare`], and the diff image drawn for failed
//! comparisons in [`render::render`]. Both are plain functions over decoded images. Everything
//! else (copying images off a target, scheduling, reporting) builds on top of those two.
pub mod compare;
pub mod error;
pub mod image_buffer;
pub mod render;
pub mod runner;
pub mod settings;
pub mod target;
pub mod task;
