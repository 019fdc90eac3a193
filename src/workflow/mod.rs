pub mod draft;
pub mod predict;
