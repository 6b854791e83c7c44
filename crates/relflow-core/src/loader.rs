//! プロジェクト設定のロード
//!
//! 設定ファイルの発見、パース、ローカルオーバーライドのマージをまとめて行います。

use crate::discovery::{current_dir, find_project_root, resolve_config_files};
use crate::error::{FlowError, Result};
use crate::model::Project;
use crate::parser::{parse_kdl_file, parse_kdl_string};
use std::path::{Path, PathBuf};
use tracing::debug;

/// プロジェクト設定をロードし、プロジェクトルートと共に返す
///
/// 環境変数 RELFLOW_CONFIG_PATH が指定されている場合はそのファイルのみを読み込み、
/// ルートはファイルのあるディレクトリになります。
pub fn load_project() -> Result<(Project, PathBuf)> {
    if let Ok(config_path) = std::env::var("RELFLOW_CONFIG_PATH") {
        let mut path = PathBuf::from(config_path);
        // 相対パスはカレントディレクトリ基準で絶対パスにする
        if path.is_relative() {
            path = current_dir()?.join(path);
        }
        if !path.exists() {
            return Err(FlowError::ConfigFileNotFound(path));
        }
        debug!(file = %path.display(), "Loading config from RELFLOW_CONFIG_PATH");
        let project = parse_kdl_file(&path)?;
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        return Ok((project, root));
    }

    let root = find_project_root()?;
    let project = load_project_from_root(&root)?;
    Ok((project, root))
}

/// プロジェクトルートから設定をロード（relflow.kdl + relflow.local.kdl）
pub fn load_project_from_root(project_root: &Path) -> Result<Project> {
    let files = resolve_config_files(project_root)?;
    let mut project = parse_kdl_file(&files.root)?;

    if let Some(local) = files.local_override {
        debug!(file = %local.display(), "Applying local override");
        let content = std::fs::read_to_string(&local).map_err(|e| FlowError::IoError {
            path: local.clone(),
            message: e.to_string(),
        })?;
        // オーバーライド側で project を書かなければ名前は変えない
        let overrides = parse_kdl_string(&content, String::new())?;
        project.merge(overrides);
    }

    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{CONFIG_FILE, LOCAL_CONFIG_FILE};
    use serial_test::serial;
    use std::fs;

    #[test]
    fn test_load_project_from_root_with_local_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE),
            r#"
project "myapp"
docker {
    enabled #true
    image "alpine"
    version "3.18"
}
"#,
        )
        .unwrap();
        fs::write(
            temp_dir.path().join(LOCAL_CONFIG_FILE),
            r#"
docker {
    version "3.19"
    maintainer "local dev"
}
"#,
        )
        .unwrap();

        let project = load_project_from_root(temp_dir.path()).unwrap();
        assert_eq!(project.name, "myapp");
        assert!(project.docker.is_enabled());
        assert_eq!(project.docker.image(), "alpine");
        assert_eq!(project.docker.version.as_deref(), Some("3.19"));
        assert_eq!(project.docker.maintainer.as_deref(), Some("local dev"));
    }

    #[test]
    fn test_load_project_from_root_override_renames_project() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE), "project \"myapp\"").unwrap();
        fs::write(
            temp_dir.path().join(LOCAL_CONFIG_FILE),
            "project \"myapp_dev\"",
        )
        .unwrap();

        let project = load_project_from_root(temp_dir.path()).unwrap();
        assert_eq!(project.name, "myapp_dev");
    }

    #[test]
    #[serial]
    fn test_load_project_config_path_env() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = temp_dir.path().join("custom.kdl");
        fs::write(&config, "project \"custom\"\ndocker { image \"debian\" }").unwrap();

        temp_env::with_var("RELFLOW_CONFIG_PATH", Some(config.as_os_str()), || {
            let (project, root) = load_project().unwrap();
            assert_eq!(project.name, "custom");
            assert_eq!(project.docker.image(), "debian");
            assert_eq!(root, temp_dir.path());
        });
    }

    #[test]
    #[serial]
    fn test_load_project_relative_config_path_env() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE),
            "project \"relative\"\ndocker { enabled #true }",
        )
        .unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let result = temp_env::with_var("RELFLOW_CONFIG_PATH", Some(CONFIG_FILE), load_project);

        std::env::set_current_dir(original_dir).unwrap();

        let (project, root) = result.unwrap();
        assert_eq!(project.name, "relative");
        assert!(root.is_absolute());
        assert_eq!(
            fs::canonicalize(&root).unwrap(),
            fs::canonicalize(temp_dir.path()).unwrap()
        );
    }

    #[test]
    #[serial]
    fn test_load_project_config_path_env_missing_file() {
        temp_env::with_var(
            "RELFLOW_CONFIG_PATH",
            Some("/nonexistent/relflow/custom.kdl"),
            || {
                let result = load_project();
                assert!(matches!(result, Err(FlowError::ConfigFileNotFound(_))));
            },
        );
    }
}
