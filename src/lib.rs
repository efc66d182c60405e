#![allow(clippy::collapsible_if)]

pub mod config;
pub mod defaults;
pub mod grouping;
pub mod logging;
pub mod roster;
pub mod session;
pub mod theme;
pub mod tui;
