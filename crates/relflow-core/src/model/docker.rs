//! docker ブロックの設定

use super::value::StringOrList;
use serde::{Deserialize, Serialize};

/// ベースイメージのデフォルト
pub const DEFAULT_IMAGE: &str = "centos";
/// リリースツリーをコピーするデフォルト命令
pub const DEFAULT_COPY_REL: &str = "COPY rel /rel";
/// デフォルトのビルドツール
pub const DEFAULT_BUILD_TOOL: &str = "docker";

/// Dockerfile 生成とイメージビルドの設定
///
/// 値の検証は行わず、有無のみを扱います。
/// デフォルト値を持つ項目はアクセサ経由で参照してください。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerConfig {
    /// パッケージング時に Dockerfile 生成とビルドを行うか
    pub enabled: Option<bool>,
    pub image: Option<String>,
    pub version: Option<String>,
    pub maintainer: Option<String>,
    pub copy_rel: Option<String>,
    pub pre_copy: Option<String>,
    pub post_copy: Option<String>,
    pub entrypoint: Option<StringOrList>,
    pub entrypoint_args: Option<StringOrList>,
    /// ビルド時のデフォルトタグ
    pub tag: Option<String>,
    /// ビルドツール (docker, podman など)
    pub build_tool: Option<String>,
}

impl DockerConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    pub fn image(&self) -> &str {
        self.image.as_deref().unwrap_or(DEFAULT_IMAGE)
    }

    pub fn copy_rel(&self) -> &str {
        self.copy_rel.as_deref().unwrap_or(DEFAULT_COPY_REL)
    }

    pub fn build_tool(&self) -> &str {
        self.build_tool.as_deref().unwrap_or(DEFAULT_BUILD_TOOL)
    }

    /// 別の設定をマージ（otherでSomeの項目が優先）
    pub fn merge(&mut self, other: DockerConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.image.is_some() {
            self.image = other.image;
        }
        if other.version.is_some() {
            self.version = other.version;
        }
        if other.maintainer.is_some() {
            self.maintainer = other.maintainer;
        }
        if other.copy_rel.is_some() {
            self.copy_rel = other.copy_rel;
        }
        if other.pre_copy.is_some() {
            self.pre_copy = other.pre_copy;
        }
        if other.post_copy.is_some() {
            self.post_copy = other.post_copy;
        }
        if other.entrypoint.is_some() {
            self.entrypoint = other.entrypoint;
        }
        if other.entrypoint_args.is_some() {
            self.entrypoint_args = other.entrypoint_args;
        }
        if other.tag.is_some() {
            self.tag = other.tag;
        }
        if other.build_tool.is_some() {
            self.build_tool = other.build_tool;
        }
    }
}
