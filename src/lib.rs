pub mod action;
pub mod args;
pub mod board;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod moves;
pub mod notation;
pub mod position;
pub mod render;
pub mod replay;
pub mod resolver;
pub mod slot;
