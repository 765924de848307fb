// file: src/analyzer/mod.rs
// description: analysis run drivers, one per subcommand
// reference: internal module structure

pub mod afd;
pub mod citations;
pub mod foundation;
pub mod governance;
pub mod orgs;
pub mod projects;

pub use afd::AfdAnalyzer;
pub use citations::CitationsAnalyzer;
pub use foundation::FoundationAnalyzer;
pub use governance::GovernanceAnalyzer;
pub use orgs::OrgsAnalyzer;
pub use projects::ProjectsAnalyzer;

use crate::analysis::Report;

/// What a finished run hands back to the binary: the sealed report plus
/// the rows for the flat CSV rendering of the same run.
pub struct RunOutput {
    pub report: Report,
    pub file_prefix: &'static str,
    pub csv_header: Vec<&'static str>,
    pub csv_rows: Vec<Vec<String>>,
}
