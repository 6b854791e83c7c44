use colored::Colorize;
use relflow_core::Project;
use std::path::Path;

/// Dockerfile を生成して書き込む
pub fn handle(project: &Project, project_root: &Path) -> anyhow::Result<()> {
    let path = write_for(project, project_root)?;
    println!("{} {}", "✓".green(), path.display().to_string().cyan());
    Ok(())
}

pub fn write_for(project: &Project, project_root: &Path) -> anyhow::Result<std::path::PathBuf> {
    let text = relflow_build::render(&project.docker, &project.name)?;
    Ok(relflow_build::write_descriptor(project_root, &text)?)
}
