//! Glint Desktop Platform
//!
//! Native windowing for macOS, Windows, and Linux using winit.
//!
//! This crate implements the `glint_platform` native traits for desktop
//! platforms. winit's typed input is re-expressed as the raw callback
//! surface the event bridge expects: X11-style button codes (1-3 for the
//! buttons, 4-7 for wheel directions) and modifier state masks.
//!
//! # Example
//!
//! ```ignore
//! use glint_app::Shell;
//! use glint_platform_desktop::DesktopNative;
//!
//! fn main() -> glint_app::Result<()> {
//!     let native = DesktopNative::new()?;
//!     Shell::new(native).run(|mut app| {
//!         while let Some(event) = app.next_event() {
//!             if event == glint_platform::Event::Stop {
//!                 break;
//!             }
//!             // Handle events, publish frames
//!         }
//!     })
//! }
//! ```

pub mod input;
pub mod native;

pub use native::{DesktopNative, PresentHook};
