pub mod builder;
pub mod report;
pub mod writer;

pub use builder::{build_manifest, Manifest};
pub use report::GenerationReport;
pub use writer::{render_manifest, write_manifest};
