use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("ファイル書き込みエラー: {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ビルドツール '{program}' を起動できません: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ビルドが失敗しました (exit code: {})", display_code(.code))]
    BuildFailed { code: Option<i32> },

    #[error("ビルドプロセスの終了を受け取る前に出力が閉じられました")]
    RelayClosed,

    #[error("Invalid build configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

impl BuildError {
    /// ユーザー向けの分かりやすいエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            BuildError::Spawn { program, .. } => {
                format!(
                    "{}\n\
                     \n\
                     解決方法:\n\
                     1. {} がインストールされ PATH に含まれているか確認してください\n\
                     2. relflow.kdl で別のツールを指定できます:\n\
                        docker {{ build_tool \"podman\" }}",
                    self, program
                )
            }
            BuildError::BuildFailed { .. } => {
                format!(
                    "{}\n\
                     \n\
                     上記のビルド出力と生成された Dockerfile を確認してください。",
                    self
                )
            }
            BuildError::Filesystem { path, .. } => {
                format!(
                    "{}\n\
                     \n\
                     {} への書き込み権限とディスクの空き容量を確認してください。",
                    self,
                    path.display()
                )
            }
            _ => format!("{}", self),
        }
    }
}

pub type BuildResult<T> = std::result::Result<T, BuildError>;
