//! Retro grid snake on a toroidal board, rendered with macroquad.
//!
//! [`session::GameSession`] holds all game state. The frame loop in the
//! binary feeds it input through [`platform`], pumps its scheduler, and paints
//! it onto a [`render::Surface`].

pub mod assets;
pub mod audio;
pub mod board;
pub mod engine;
pub mod input;
pub mod platform;
pub mod render;
pub mod schedule;
pub mod session;
pub mod settings;
