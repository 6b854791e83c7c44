use colored::Colorize;
use relflow_build::hooks;
use relflow_core::Project;
use std::path::Path;

pub fn handle_pre_package(project: &Project, project_root: &Path) -> anyhow::Result<()> {
    match hooks::before_package(project, project_root)? {
        Some(path) => println!(
            "{} Dockerfile: {}",
            "✓".green(),
            path.display().to_string().cyan()
        ),
        None => println!("{}", "docker が無効なためスキップしました".yellow()),
    }
    Ok(())
}

pub async fn handle_post_package(
    project: &Project,
    project_root: &Path,
    tag: Option<&str>,
) -> anyhow::Result<()> {
    if hooks::after_package(project, project_root, tag).await? {
        println!("{}", "✓ ビルド完了".green().bold());
    } else {
        println!("{}", "docker が無効なためスキップしました".yellow());
    }
    Ok(())
}
