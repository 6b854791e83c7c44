//! ビルド出力の中継
//!
//! 子プロセスの出力を「行」と「キャリッジリターンで終わる断片」に分割し、
//! プログレスバーの上書き表示を保ったままコンソールへ流します。

use crate::error::{BuildError, BuildResult};
use futures_util::stream::{Stream, StreamExt};
use std::io::Write;

/// 中継ループが受け取るイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// 出力チャンク（`\n` で終わる行、または `\r` で終わる断片）
    Output(String),
    /// プロセス終了（シグナル終了の場合は `None`）
    Exit(Option<i32>),
}

/// バイト列をチャンクに分割する
///
/// チャンクは `\n` か `\r` で終わる。`\r\n` は行末として扱い `\n` に正規化する。
/// `\r` がバッファ末尾にある場合は次のバイトを待たずに断片として確定する。
/// 次の読み込みが `\n` で始まれば、その `\n` は確定済みの断片の行末として捨てる。
#[derive(Debug, Default)]
pub struct ChunkSplitter {
    pending: Vec<u8>,
    after_cr: bool,
}

impl ChunkSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み込んだバイト列を追加し、確定したチャンクを返す
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut chunks = Vec::new();
        if bytes.is_empty() {
            return chunks;
        }

        // 前回の読み込みが `\r` で終わっていた `\r\n`
        let mut i = usize::from(self.after_cr && bytes[0] == b'\n');
        self.after_cr = false;

        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    self.pending.push(b'\n');
                    chunks.push(self.take());
                }
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    self.pending.push(b'\n');
                    chunks.push(self.take());
                    i += 1;
                }
                b'\r' => {
                    self.pending.push(b'\r');
                    chunks.push(self.take());
                    self.after_cr = i + 1 == bytes.len();
                }
                byte => self.pending.push(byte),
            }
            i += 1;
        }

        chunks
    }

    /// EOF 時に残っているバイト列を最後の行として返す
    pub fn finish(&mut self) -> Option<String> {
        self.after_cr = false;
        if self.pending.is_empty() {
            None
        } else {
            Some(self.take())
        }
    }

    fn take(&mut self) -> String {
        let bytes = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

/// チャンクをコンソールへ中継する
///
/// - `\r` を含むチャンクは改行を付けずにすぐ書き出し、`last` として保持する
/// - それ以外のチャンクは完了した行として扱う。保留中の断片があれば
///   先に改行で確定させてから、行を改行付きで書き出す
pub struct OutputRelay<W: Write> {
    out: W,
    last: Option<String>,
}

impl<W: Write> OutputRelay<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    /// チャンク1つを処理
    pub fn feed(&mut self, chunk: &str) -> std::io::Result<()> {
        if chunk.contains('\r') {
            self.out.write_all(chunk.as_bytes())?;
            self.last = Some(chunk.to_string());
        } else {
            if self.last.take().is_some() {
                // 断片は表示済みなので改行だけで確定する
                self.out.write_all(b"\n")?;
            }
            let line = chunk.strip_suffix('\n').unwrap_or(chunk);
            self.out.write_all(line.as_bytes())?;
            self.out.write_all(b"\n")?;
        }
        self.out.flush()
    }

    /// 保留中の断片（まだ改行で確定していないもの）
    pub fn pending(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// 終了通知を受け取るまでイベントを中継し、終了コードを返す
    ///
    /// 終了通知以降のイベントは読まない。タイムアウトはない。
    pub async fn run<S>(mut self, events: S) -> BuildResult<Option<i32>>
    where
        S: Stream<Item = RelayEvent>,
    {
        let mut events = std::pin::pin!(events);

        while let Some(event) = events.next().await {
            match event {
                RelayEvent::Output(chunk) => self.feed(&chunk)?,
                RelayEvent::Exit(code) => {
                    tracing::debug!(?code, "Build process exited");
                    return Ok(code);
                }
            }
        }

        Err(BuildError::RelayClosed)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
