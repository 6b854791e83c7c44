use super::write::write_for;
use colored::Colorize;
use relflow_build::BuildInvoker;
use relflow_build::hooks::resolve_tag;
use relflow_core::Project;
use std::path::Path;

/// ビルドコマンドを処理
///
/// `docker.enabled` に関係なく、Dockerfile を書き込んでからビルドする。
pub async fn handle(
    project: &Project,
    project_root: &Path,
    cli_tag: Option<&str>,
    cli_build_tool: Option<&str>,
) -> anyhow::Result<()> {
    let dockerfile = write_for(project, project_root)?;
    let tag = resolve_tag(project, cli_tag);
    let build_tool = cli_build_tool.unwrap_or(project.docker.build_tool());

    println!("{}", "Dockerイメージをビルド中...".green());
    println!("  → Dockerfile: {}", dockerfile.display().to_string().cyan());
    println!("  → Image: {}", tag.cyan());
    println!("  → Tool: {}", build_tool.cyan());
    println!();

    BuildInvoker::new(project_root)
        .build_tool(build_tool)
        .descriptor(dockerfile)
        .build(&tag)
        .await?;

    println!();
    println!("{} {}", "✓ ビルド完了:".green().bold(), tag.cyan());
    Ok(())
}
