//! 外部ビルドツールの起動
//!
//! `<build-tool> build -f <Dockerfile> -t <tag> .` を子プロセスとして起動し、
//! stdout と stderr をまとめてコンソールへ中継します。

use crate::descriptor::descriptor_path;
use crate::error::{BuildError, BuildResult};
use crate::relay::{ChunkSplitter, OutputRelay, RelayEvent};
use futures_util::stream::{self, Stream};
use relflow_core::DEFAULT_BUILD_TOOL;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;

const READ_BUFFER_SIZE: usize = 8 * 1024;

pub struct BuildInvoker {
    build_tool: String,
    working_dir: PathBuf,
    descriptor: PathBuf,
}

impl BuildInvoker {
    /// プロジェクトルートで `docker` を使うビルダー
    pub fn new(project_root: &Path) -> Self {
        Self {
            build_tool: DEFAULT_BUILD_TOOL.to_string(),
            working_dir: project_root.to_path_buf(),
            descriptor: descriptor_path(project_root),
        }
    }

    pub fn build_tool(mut self, tool: impl Into<String>) -> Self {
        self.build_tool = tool.into();
        self
    }

    pub fn descriptor(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptor = path.into();
        self
    }

    /// ビルドツールに渡す引数
    pub fn command_args(&self, tag: &str) -> Vec<OsString> {
        vec![
            "build".into(),
            "-f".into(),
            self.descriptor.clone().into_os_string(),
            "-t".into(),
            tag.into(),
            ".".into(),
        ]
    }

    /// イメージをビルドし、出力を stdout へ中継
    pub async fn build(&self, tag: &str) -> BuildResult<()> {
        self.build_with_output(tag, std::io::stdout()).await
    }

    /// イメージをビルドし、出力を任意の Writer へ中継
    ///
    /// プロセスが終了するまで戻らない。終了コードが 0 以外なら
    /// [`BuildError::BuildFailed`] を返す。
    pub async fn build_with_output<W: Write>(&self, tag: &str, out: W) -> BuildResult<()> {
        tracing::info!(tool = %self.build_tool, tag, "Building image");

        let args = self.command_args(tag);
        tracing::debug!(?args, cwd = %self.working_dir.display(), "Spawning build tool");

        let mut child = Command::new(&self.build_tool)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BuildError::Spawn {
                program: self.build_tool.clone(),
                source,
            })?;

        let (tx, rx) = mpsc::unbounded_channel();

        let stdout = child.stdout.take().map(|s| forward_chunks(s, tx.clone()));
        let stderr = child.stderr.take().map(|s| forward_chunks(s, tx.clone()));

        // 出力を読み切ってから終了を通知する
        let waiter = tokio::spawn(async move {
            if let Some(task) = stdout {
                let _ = task.await;
            }
            if let Some(task) = stderr {
                let _ = task.await;
            }
            let code = match child.wait().await {
                Ok(status) => status.code(),
                Err(e) => {
                    tracing::warn!("Failed to wait for build process: {}", e);
                    None
                }
            };
            let _ = tx.send(RelayEvent::Exit(code));
        });

        let result = OutputRelay::new(out).run(receiver_stream(rx)).await;
        // 中継が途中で失敗した場合はプロセスも止める
        if result.is_err() {
            waiter.abort();
        }

        match result? {
            Some(0) => {
                tracing::info!(tag, "Successfully built");
                Ok(())
            }
            code => Err(BuildError::BuildFailed { code }),
        }
    }
}

fn receiver_stream(rx: mpsc::UnboundedReceiver<RelayEvent>) -> impl Stream<Item = RelayEvent> {
    stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|event| (event, rx)) })
}

/// 読み込んだ出力をチャンクに分割して送るタスクを起動
fn forward_chunks<R>(
    mut reader: R,
    tx: mpsc::UnboundedSender<RelayEvent>,
) -> tokio::task::JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut splitter = ChunkSplitter::new();
        let mut buf = vec![0u8; READ_BUFFER_SIZE];

        loop {
            let n = match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    tracing::warn!("Failed to read build output: {}", e);
                    break;
                }
            };
            for chunk in splitter.push(&buf[..n]) {
                if tx.send(RelayEvent::Output(chunk)).is_err() {
                    return;
                }
            }
        }

        if let Some(rest) = splitter.finish() {
            let _ = tx.send(RelayEvent::Output(rest));
        }
    })
}
