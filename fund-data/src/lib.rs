pub mod export;
pub mod profile;

pub use export::{ExportError, export_to_file, write_results};
pub use profile::{Profile, ProfileError, SweepSettings};
