//! 文字列またはリストを取る設定値

use serde::{Deserialize, Serialize};

/// 単一の文字列、または文字列のリスト
///
/// KDLでは引数が1つなら `Single`、2つ以上なら `List` になります。
/// ```kdl
/// entrypoint "/bin/sh"              // Single
/// entrypoint "/bin/sh" "-c" "run"   // List
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    Single(String),
    List(Vec<String>),
}

impl StringOrList {
    /// リストとして取り出す（単一の文字列は要素1つのリストになる）
    pub fn to_list(&self) -> Vec<String> {
        match self {
            StringOrList::Single(s) => vec![s.clone()],
            StringOrList::List(items) => items.clone(),
        }
    }
}

impl From<&str> for StringOrList {
    fn from(value: &str) -> Self {
        StringOrList::Single(value.to_string())
    }
}

impl From<Vec<String>> for StringOrList {
    fn from(value: Vec<String>) -> Self {
        StringOrList::List(value)
    }
}
