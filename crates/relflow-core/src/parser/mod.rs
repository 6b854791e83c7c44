//! KDLパーサー
//!
//! relflow.kdl をパースして [`Project`] を生成します。

mod docker;

use docker::parse_docker;

use crate::error::{FlowError, Result};
use crate::model::Project;
use kdl::{KdlDocument, KdlNode};
use std::fs;
use std::path::Path;

/// KDLファイルをパースしてProjectを生成
///
/// `project` ノードがない場合は、設定ファイルを含むディレクトリ名を
/// プロジェクト名として使用します。
pub fn parse_kdl_file<P: AsRef<Path>>(path: P) -> Result<Project> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| FlowError::IoError {
        path: path.as_ref().to_path_buf(),
        message: e.to_string(),
    })?;
    let name = project_dir_name(path.as_ref());
    parse_kdl_string(&content, name)
}

/// KDL文字列をパース
pub fn parse_kdl_string(content: &str, default_name: String) -> Result<Project> {
    let doc: KdlDocument = content.parse()?;

    let mut project = Project {
        name: default_name,
        ..Default::default()
    };

    for node in doc.nodes() {
        match node.name().value() {
            "project" => {
                let name = first_string(node).ok_or_else(|| {
                    FlowError::InvalidConfig("project requires a name".to_string())
                })?;
                if name.is_empty() {
                    return Err(FlowError::InvalidConfig(
                        "project name must not be empty".to_string(),
                    ));
                }
                project.name = name.to_string();
            }
            "docker" => {
                // 複数の docker ブロックは後勝ちでマージ
                project.docker.merge(parse_docker(node)?);
            }
            _ => {
                // 不明なノードはスキップ
            }
        }
    }

    Ok(project)
}

/// 設定ファイルのディレクトリ名（`.relflow/` 配下ならその親）
fn project_dir_name(path: &Path) -> String {
    let mut dir = path.parent();
    if dir.and_then(|d| d.file_name()).and_then(|n| n.to_str()) == Some(".relflow") {
        dir = dir.and_then(|d| d.parent());
    }
    dir.and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string()
}

/// 最初の位置引数を文字列として取得
pub(crate) fn first_string(node: &KdlNode) -> Option<&str> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
}

#[cfg(test)]
mod tests;
