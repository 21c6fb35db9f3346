use std::path::PathBuf;
use thiserror::Error;

/// 分割処理のエラー分類
///
/// すべてのエラーは終了ステータス1として扱われ、リトライは行わない。
/// 種別の違いはメッセージにのみ現れる。
#[derive(Debug, Error)]
pub enum SegmentError {
    /// ffmpeg がPATH上に存在しない
    ///
    /// 処理を始める前のチェックで検出し、即座に中断する。
    #[error(
        "ffmpeg が見つかりません。先にインストールしてください (https://ffmpeg.org/download.html)"
    )]
    MissingDependency,

    /// 入力ファイルが存在しない
    #[error("入力ファイルが見つかりません: {path:?}")]
    NotFound {
        /// 指定された入力パス
        path: PathBuf,
    },

    /// 入力ファイルのデコードに失敗
    ///
    /// 壊れたファイルや ffmpeg が対応していない形式など。
    #[error("入力ファイルのデコードに失敗: {reason}")]
    Decode {
        /// ffmpeg またはWAV読み込みからのエラー内容
        reason: String,
    },

    /// チャンクのMP3エンコードに失敗
    #[error("MP3エンコードに失敗: {reason}")]
    Encode {
        /// ffmpeg またはWAV書き込みからのエラー内容
        reason: String,
    },

    /// 出力ディレクトリや一時ファイルなどのI/Oエラー
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
