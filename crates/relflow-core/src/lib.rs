//! relflow のコア機能
//!
//! 設定モデル、KDLパーサー、設定ファイルの自動発見を提供します。

pub mod discovery;
pub mod error;
pub mod loader;
pub mod model;
pub mod parser;

pub use discovery::{CONFIG_FILE, LOCAL_CONFIG_FILE, find_project_root, resolve_config_files};
pub use error::{FlowError, Result};
pub use loader::{load_project, load_project_from_root};
pub use model::*;
pub use parser::{parse_kdl_file, parse_kdl_string};
