//! パッケージング処理から呼ばれるフック
//!
//! `docker.enabled` が有効な場合のみ、パッケージング前に Dockerfile を生成し、
//! パッケージング後にイメージをビルドします。無効な場合は何もしません。

use crate::descriptor::{render, write_descriptor};
use crate::error::BuildResult;
use crate::invoker::BuildInvoker;
use relflow_core::Project;
use std::path::{Path, PathBuf};

/// パッケージング前: Dockerfile を生成して書き込む
///
/// 無効な場合は `None` を返す。
pub fn before_package(project: &Project, project_root: &Path) -> BuildResult<Option<PathBuf>> {
    if !project.docker.is_enabled() {
        tracing::debug!(project = %project.name, "Docker disabled, skipping Dockerfile generation");
        return Ok(None);
    }

    let text = render(&project.docker, &project.name)?;
    let path = write_descriptor(project_root, &text)?;
    Ok(Some(path))
}

/// パッケージング後: イメージをビルドする
///
/// タグの優先順位: 引数 > docker.tag > `<project>:latest`。
/// ビルドした場合は `true`、無効でスキップした場合は `false` を返す。
pub async fn after_package(
    project: &Project,
    project_root: &Path,
    tag: Option<&str>,
) -> BuildResult<bool> {
    if !project.docker.is_enabled() {
        tracing::debug!(project = %project.name, "Docker disabled, skipping image build");
        return Ok(false);
    }

    let tag = resolve_tag(project, tag);
    BuildInvoker::new(project_root)
        .build_tool(project.docker.build_tool())
        .build(&tag)
        .await?;
    Ok(true)
}

/// ビルドに使うイメージタグを決定
pub fn resolve_tag(project: &Project, tag: Option<&str>) -> String {
    tag.map(str::to_string)
        .or_else(|| project.docker.tag.clone())
        .unwrap_or_else(|| format!("{}:latest", project.name))
}
