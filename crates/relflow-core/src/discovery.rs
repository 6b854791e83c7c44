//! 設定ファイルの自動発見
//!
//! カレントディレクトリから上に向かって relflow.kdl を探します。

use crate::error::{FlowError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// ルート設定ファイル名
pub const CONFIG_FILE: &str = "relflow.kdl";
/// ローカルオーバーライドファイル名
pub const LOCAL_CONFIG_FILE: &str = "relflow.local.kdl";
/// 設定ファイルを置ける隠しディレクトリ
pub const CONFIG_DIR: &str = ".relflow";

/// 発見された設定ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFiles {
    /// ルートファイル (relflow.kdl)
    pub root: PathBuf,
    /// ローカルオーバーライドファイル (relflow.local.kdl)
    pub local_override: Option<PathBuf>,
}

/// プロジェクトルートを検出
///
/// 以下の優先順位で検索:
/// 1. 環境変数 RELFLOW_PROJECT_ROOT
/// 2. カレントディレクトリから上に向かって以下を探す:
///    - relflow.kdl
///    - .relflow/relflow.kdl
#[tracing::instrument]
pub fn find_project_root() -> Result<PathBuf> {
    if let Ok(root) = std::env::var("RELFLOW_PROJECT_ROOT") {
        let path = PathBuf::from(&root);
        debug!(env_root = %root, "Checking RELFLOW_PROJECT_ROOT");
        if root_config_file(&path).is_some() {
            info!(project_root = %path.display(), "Found project root from environment variable");
            return Ok(path);
        }
    }

    let start_dir = current_dir()?;
    find_project_root_from(&start_dir)
}

/// カレントディレクトリを取得
pub(crate) fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| FlowError::IoError {
        path: PathBuf::from("."),
        message: e.to_string(),
    })
}

/// 指定ディレクトリから上に向かってプロジェクトルートを探す
pub fn find_project_root_from(start_dir: &Path) -> Result<PathBuf> {
    let mut current = start_dir.to_path_buf();
    debug!(start_dir = %start_dir.display(), "Searching for project root");

    loop {
        if let Some(file) = root_config_file(&current) {
            info!(project_root = %current.display(), file = %file.display(), "Found project root");
            return Ok(current);
        }

        // 親ディレクトリへ
        if !current.pop() {
            break;
        }
    }

    warn!(start_dir = %start_dir.display(), "Project root not found");
    Err(FlowError::ProjectRootNotFound(start_dir.to_path_buf()))
}

/// プロジェクトルートから設定ファイル一式を解決
#[tracing::instrument(skip(project_root), fields(project_root = %project_root.display()))]
pub fn resolve_config_files(project_root: &Path) -> Result<ConfigFiles> {
    let root = root_config_file(project_root)
        .ok_or_else(|| FlowError::ConfigFileNotFound(project_root.join(CONFIG_FILE)))?;

    // オーバーライドはルートファイルと同じディレクトリに置く
    let local_override = root
        .parent()
        .map(|dir| dir.join(LOCAL_CONFIG_FILE))
        .filter(|path| path.exists());

    if let Some(path) = &local_override {
        debug!(file = %path.display(), "Found local override");
    }

    Ok(ConfigFiles {
        root,
        local_override,
    })
}

fn root_config_file(dir: &Path) -> Option<PathBuf> {
    let direct = dir.join(CONFIG_FILE);
    if direct.exists() {
        return Some(direct);
    }
    let hidden = dir.join(CONFIG_DIR).join(CONFIG_FILE);
    if hidden.exists() {
        return Some(hidden);
    }
    None
}
