pub mod consts;
pub mod model;
pub mod render;
pub mod roster;
pub mod service;
