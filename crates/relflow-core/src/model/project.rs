//! プロジェクト定義

use super::docker::DockerConfig;
use serde::{Deserialize, Serialize};

/// relflow.kdl 全体を表すプロジェクト設定
///
/// KDL形式：
/// ```kdl
/// project "myapp"
///
/// docker {
///     enabled #true
///     image "alpine"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// プロジェクト名（リリース名）
    pub name: String,
    #[serde(default)]
    pub docker: DockerConfig,
}

impl Project {
    /// ローカルオーバーライドをマージ
    pub fn merge(&mut self, other: Project) {
        if !other.name.is_empty() {
            self.name = other.name;
        }
        self.docker.merge(other.docker);
    }
}
