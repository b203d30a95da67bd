pub mod constants;
pub mod document;
pub mod options;
pub mod string_safety;
pub mod transform;
pub mod types;
pub mod utils;
pub mod xml;

pub use document::{AttributeValue, Node, NodeKind};
pub use options::{RawOptions, ReportOptions};
pub use transform::build_junit_document;
pub use types::TestRunReport;
