//! Smart Medical Card Common Library
//!
//! CLIと他のフロントエンドで共有される型と画面ロジック。
//! ネットワークやファイルI/Oはここに置かない。

pub mod types;
pub mod error;
pub mod scan_type;
pub mod request;
pub mod session;
pub mod view;
pub mod intake;
pub mod render;
pub mod export;

pub use types::{AnalysisResult, ReportAnalysis, ReportData};
pub use error::{Error, Result};
pub use scan_type::{Endpoint, ScanType};
pub use request::{FormField, MultipartRequest, PatientIdentity};
pub use session::SessionState;
pub use view::{TabController, View};
pub use intake::SelectedFile;
pub use render::{ReportView, ResultsView};
