use relflow_core::Project;
use std::path::Path;

/// 解決済みの設定を JSON で表示
pub fn handle(project: &Project, project_root: &Path) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "root": project_root.display().to_string(),
        "project": project,
        "dockerfile": relflow_build::descriptor_path(project_root).display().to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
