pub mod frames;
pub mod manifest;
pub mod registry;
