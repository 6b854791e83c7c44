//! モデル定義
//!
//! relflow で使用される設定モデルを定義します。

mod docker;
mod project;
mod value;

// Re-exports
pub use docker::*;
pub use project::*;
pub use value::*;
