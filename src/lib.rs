pub mod config;
pub mod error;
pub mod markup;
pub mod net;
pub mod panel;
pub mod render;
