//! relflow のイメージビルド機能
//!
//! リリースツリー用の Dockerfile 生成、外部ビルドツールの起動、
//! ビルド出力のリアルタイム中継を提供します。

pub mod descriptor;
pub mod error;
pub mod hooks;
pub mod invoker;
pub mod relay;

pub use descriptor::{
    BUILD_CONTEXT_DIR, DESCRIPTOR_FILE, DescriptorSpec, descriptor_path, render,
    write_descriptor,
};
pub use error::{BuildError, BuildResult};
pub use invoker::BuildInvoker;
pub use relay::{ChunkSplitter, OutputRelay, RelayEvent};
