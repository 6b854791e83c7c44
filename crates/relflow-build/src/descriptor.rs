//! Dockerfile（ビルド記述子）の生成
//!
//! 設定から6行固定の Dockerfile を組み立てます。行の順序は
//! FROM, MAINTAINER, pre_copy, COPY, post_copy, ENTRYPOINT で固定です。
//! 省略された項目は空行として出力されます。

use crate::error::{BuildError, BuildResult};
use relflow_core::{DockerConfig, StringOrList};
use std::fs;
use std::path::{Path, PathBuf};

/// ビルドコンテキストディレクトリ（プロジェクトルートからの相対パス）
pub const BUILD_CONTEXT_DIR: &str = "_build/docker";
/// 生成する Dockerfile のファイル名
pub const DESCRIPTOR_FILE: &str = "Dockerfile";

const MAINTAINER_KEYWORD: &str = "MAINTAINER";
const ENTRYPOINT_KEYWORD: &str = "ENTRYPOINT";

/// ENTRYPOINT 行の生成方法
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entrypoint {
    /// `/rel/<project>/bin/<project>` に引数を続けたもの
    Default { project: String, args: Vec<String> },
    /// 設定で明示されたもの
    Custom(StringOrList),
}

/// 1回のレンダリングのために設定から組み立てる不変レコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorSpec {
    pub base_image: String,
    pub base_version: Option<String>,
    pub maintainer: Option<String>,
    pub pre_copy: Option<String>,
    pub copy_instruction: String,
    pub post_copy: Option<String>,
    pub entrypoint: Entrypoint,
}

impl DescriptorSpec {
    /// 設定とプロジェクト名から組み立てる
    pub fn from_config(config: &DockerConfig, project_name: &str) -> Self {
        let entrypoint = match &config.entrypoint {
            Some(custom) => Entrypoint::Custom(custom.clone()),
            None => Entrypoint::Default {
                project: project_name.to_string(),
                args: config
                    .entrypoint_args
                    .as_ref()
                    .map(StringOrList::to_list)
                    .unwrap_or_default(),
            },
        };

        Self {
            base_image: config.image().to_string(),
            base_version: config.version.clone(),
            maintainer: config.maintainer.clone(),
            pre_copy: config.pre_copy.clone(),
            copy_instruction: config.copy_rel().to_string(),
            post_copy: config.post_copy.clone(),
            entrypoint,
        }
    }

    /// Dockerfile のテキストを生成
    pub fn render(&self) -> String {
        let lines = [
            self.from_line(),
            self.maintainer_line(),
            self.pre_copy.clone().unwrap_or_default(),
            self.copy_instruction.clone(),
            self.post_copy.clone().unwrap_or_default(),
            self.entrypoint_line(),
        ];

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    fn from_line(&self) -> String {
        match &self.base_version {
            Some(version) => format!("FROM {}:{}", self.base_image, version),
            None => format!("FROM {}", self.base_image),
        }
    }

    fn maintainer_line(&self) -> String {
        match &self.maintainer {
            Some(maintainer) => with_keyword(MAINTAINER_KEYWORD, maintainer),
            None => String::new(),
        }
    }

    fn entrypoint_line(&self) -> String {
        match &self.entrypoint {
            Entrypoint::Default { project, args } => {
                let mut items = vec![format!("/rel/{project}/bin/{project}")];
                items.extend(args.iter().cloned());
                format!("{} {}", ENTRYPOINT_KEYWORD, exec_form(&items))
            }
            Entrypoint::Custom(StringOrList::Single(entrypoint)) => {
                with_keyword(ENTRYPOINT_KEYWORD, entrypoint)
            }
            Entrypoint::Custom(StringOrList::List(items)) => {
                format!("{} {}", ENTRYPOINT_KEYWORD, exec_form(items))
            }
        }
    }
}

/// 既にキーワードで始まっていればそのまま、そうでなければ前置する
///
/// 大文字小文字は区別する。命令として解析はしない。
fn with_keyword(keyword: &str, value: &str) -> String {
    if value.starts_with(keyword) {
        value.to_string()
    } else {
        format!("{} {}", keyword, value)
    }
}

/// `["a", "b"]` 形式（exec form）の配列
fn exec_form(items: &[String]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| serde_json::Value::String(item.clone()).to_string())
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// 設定とプロジェクト名から Dockerfile のテキストを生成
///
/// 同じ入力に対しては常にバイト単位で同じ出力を返します。
pub fn render(config: &DockerConfig, project_name: &str) -> BuildResult<String> {
    if project_name.is_empty() {
        return Err(BuildError::InvalidConfig(
            "project name must not be empty".to_string(),
        ));
    }
    Ok(DescriptorSpec::from_config(config, project_name).render())
}

/// プロジェクトルートに対する Dockerfile のパス
pub fn descriptor_path(project_root: &Path) -> PathBuf {
    project_root.join(BUILD_CONTEXT_DIR).join(DESCRIPTOR_FILE)
}

/// Dockerfile をビルドコンテキストディレクトリに書き込む
///
/// ディレクトリがなければ作成し、既存のファイルは上書きします。
/// 書き込みはプラットフォームの write/close 以上のアトミック性を持ちません。
pub fn write_descriptor(project_root: &Path, text: &str) -> BuildResult<PathBuf> {
    let dir = project_root.join(BUILD_CONTEXT_DIR);
    fs::create_dir_all(&dir).map_err(|source| BuildError::Filesystem {
        path: dir.clone(),
        source,
    })?;

    let path = dir.join(DESCRIPTOR_FILE);
    fs::write(&path, text).map_err(|source| BuildError::Filesystem {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), bytes = text.len(), "Wrote Dockerfile");
    Ok(path)
}
