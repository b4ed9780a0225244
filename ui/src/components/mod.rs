//! Shared building blocks used by more than one screen.
pub mod error_modal;
pub mod loading_overlay;
pub mod map_surface;
pub mod pico;
