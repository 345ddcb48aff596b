//! Infrastructure layer: file loaders

pub mod crsp_loader;

pub use crsp_loader::load_crsp_file;
