//! Serial command interpreter for HUB75 LED matrix illumination.
//!
//! ## What it does
//!
//! An LED matrix behind a microscope sample makes a programmable light
//! source: a centered disc gives brightfield illumination, a dark disc on a
//! lit background gives darkfield, and half discs give the asymmetric
//! illumination used for phase contrast. This crate accepts one text command
//! per line over a serial link and draws the matching pattern.
//!
//! ```text
//! draw 10 20 50        one green pixel at (10, 20), 50% brightness
//! fill 75 B            whole panel blue, 75%
//! brightfield 0 0 8 100 R
//! darkfield 0 0 8 100
//! phaseTop 0 0 12 60 G
//! help
//! ```
//!
//! ## Pipeline
//!
//! 1. [`reader::LineReader`] frames the serial byte stream into lines. A line
//!    ends at `\n`, at 30 bytes, or after one second without a byte.
//! 2. [`parser`] turns a line into a [`command::Command`]. Bad lines are
//!    marked invalid, never panicked on.
//! 3. [`render::Renderer`] clears the panel and draws the command through
//!    [`panel::PanelSurface`].
//!
//! [`controller::Controller`] ties the three together in a non-blocking
//! `poll()` meant to be called from the firmware's main loop.
//!
//! ## Color
//!
//! Every command lights a single channel. The brightness percentage is clamped
//! to 0–100, scaled to 0–255 and packed into RGB565, see
//! [`color::color_from_level`].
//!
//! ## Hardware
//!
//! The crate has no hardware dependencies. The serial port is anything
//! implementing `embedded-io`'s `Read + ReadReady` (through
//! [`reader::IoSource`]) or [`reader::ByteSource`] directly; the panel is
//! any `embedded-graphics` draw target (through [`panel::GraphicsPanel`]), such
//! as a HUB75 DMA framebuffer; the clock is any `Fn() -> u32` returning
//! milliseconds.
//!
//! ## Available Feature Flags
//!
//! ### `defmt` Feature
//! Implements `defmt::Format` for the public types and logs completed,
//! rejected and rendered lines with the `defmt` logging framework.
#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod color;
pub mod command;
pub mod controller;
pub mod panel;
pub mod parser;
pub mod reader;
pub mod render;

pub use color::{color_from_level, Color};
pub use command::{Command, CommandError, CommandKind};
pub use controller::{Controller, Outcome};
pub use panel::{GraphicsPanel, PanelSurface};
pub use render::{clip_radius, Renderer};

/// Byte that ends a command line
pub const LINE_TERMINATOR: u8 = b'\n';

/// Longest line, in bytes, before it is forced complete
pub const LINE_CAPACITY: usize = 30;

/// Silence after which a partial line is treated as complete
pub const IDLE_TIMEOUT_MS: u32 = 1000;
