//! docker ノードのパース

use super::first_string;
use crate::error::{FlowError, Result};
use crate::model::{DockerConfig, StringOrList};
use kdl::KdlNode;

/// docker ノードをパース
pub fn parse_docker(node: &KdlNode) -> Result<DockerConfig> {
    let mut config = DockerConfig::default();

    let Some(children) = node.children() else {
        return Ok(config);
    };

    for child in children.nodes() {
        let key = child.name().value();
        match key {
            "enabled" => {
                config.enabled = Some(
                    child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_bool())
                        .ok_or_else(|| {
                            FlowError::InvalidConfig(
                                "'enabled' には #true または #false を指定してください"
                                    .to_string(),
                            )
                        })?,
                );
            }
            "image" => config.image = Some(string_value(child)?),
            "version" => config.version = Some(string_value(child)?),
            "maintainer" => config.maintainer = Some(string_value(child)?),
            "copy_rel" => config.copy_rel = Some(string_value(child)?),
            "pre_copy" => config.pre_copy = Some(string_value(child)?),
            "post_copy" => config.post_copy = Some(string_value(child)?),
            "entrypoint" => config.entrypoint = Some(string_or_list(child)?),
            "entrypoint_args" => config.entrypoint_args = Some(string_or_list(child)?),
            "tag" => config.tag = Some(string_value(child)?),
            "build_tool" => config.build_tool = Some(string_value(child)?),
            other => {
                tracing::debug!(key = other, "Ignoring unknown docker setting");
            }
        }
    }

    Ok(config)
}

fn string_value(node: &KdlNode) -> Result<String> {
    first_string(node)
        .map(|s| s.to_string())
        .ok_or_else(|| FlowError::ExpectedString {
            key: node.name().value().to_string(),
        })
}

/// 引数1つなら文字列、2つ以上ならリスト
fn string_or_list(node: &KdlNode) -> Result<StringOrList> {
    let mut values = node
        .entries()
        .iter()
        .filter(|e| e.name().is_none())
        .map(|e| e.value().as_string().map(|s| s.to_string()))
        .collect::<Option<Vec<String>>>()
        .ok_or_else(|| FlowError::ExpectedString {
            key: node.name().value().to_string(),
        })?;

    match values.len() {
        0 => Err(FlowError::ExpectedString {
            key: node.name().value().to_string(),
        }),
        1 => Ok(StringOrList::Single(values.remove(0))),
        _ => Ok(StringOrList::List(values)),
    }
}
