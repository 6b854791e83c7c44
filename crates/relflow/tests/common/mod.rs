use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_relflow_kdl(&self, content: &str) {
        let path = self.root.path().join("relflow.kdl");
        fs::write(path, content).unwrap();
    }

    #[allow(dead_code)]
    pub fn write_local_kdl(&self, content: &str) {
        let path = self.root.path().join("relflow.local.kdl");
        fs::write(path, content).unwrap();
    }

    /// `--build-tool sh` で実行される偽のビルドスクリプト
    #[allow(dead_code)]
    pub fn write_fake_build_tool(&self, script: &str) {
        fs::write(self.root.path().join("build"), script).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// プロジェクト内で実行する relflow コマンド
    #[allow(deprecated)]
    pub fn relflow(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("relflow").unwrap();
        cmd.current_dir(self.path())
            .env_remove("RELFLOW_CONFIG_PATH")
            .env_remove("RELFLOW_PROJECT_ROOT")
            .env_remove("RELFLOW_BUILD_TOOL");
        cmd
    }
}
