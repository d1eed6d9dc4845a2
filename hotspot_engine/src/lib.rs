#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! Hotspot: a small point-and-click adventure engine.
//!
//! Rooms, items, exit arrows and an inventory are declared as data (or in
//! code), behaviors are plain Rust closures, and [`MainLoop`] resolves pointer
//! input into context menus, item use and room switches.

pub const HOTSPOT_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod arrow;
pub mod geometry;
pub mod hover;
pub mod interaction;
pub mod inventory;
pub mod item;
pub mod main_loop;
pub mod menu;
pub mod render;
pub mod room;
pub mod sprite;
pub mod world;

// Loading and platform
pub mod backend;
pub mod config;
pub mod data_paths;
pub mod loader;

pub use hotspot_data::Id;

// Re-exports for convenience
pub use arrow::{Arrow, ArrowSide};
pub use config::{EngineConfig, load_config};
pub use geometry::{Point, Rect};
pub use hover::Hoverable;
pub use interaction::ActiveRoom;
pub use inventory::Inventory;
pub use item::{Item, ItemConfig, ItemHolder, MenuAction};
pub use loader::{build_world, load_world};
pub use main_loop::{Flow, MainLoop};
pub use menu::ItemMenu;
pub use render::{HeadlessRenderer, InputEvent, Platform, PointerButton, Renderer};
pub use room::Room;
pub use sprite::{AssetError, Sprite};
pub use world::{Location, World};
