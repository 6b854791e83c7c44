use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("KDLパースエラー: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("IO エラー: {path}\n理由: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("無効な設定: {0}")]
    InvalidConfig(String),

    #[error("'{key}' には文字列を指定してください")]
    ExpectedString { key: String },

    #[error(
        "プロジェクトルートが見つかりません\n探索開始位置: {0}\nヒント: relflow.kdl ファイルを含むディレクトリで実行してください"
    )]
    ProjectRootNotFound(PathBuf),

    #[error("設定ファイルが見つかりません: {0}")]
    ConfigFileNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, FlowError>;
