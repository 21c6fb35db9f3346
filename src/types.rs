/// 16ビット整数型のオーディオサンプル
///
/// PCM形式の音声データを表現するための型エイリアス。
/// -32768 から 32767 の範囲の値を取る。
pub type SampleI16 = i16;

/// ミリ秒をフレーム数に変換
///
/// 1フレーム = 全チャンネル分の1サンプル。
pub fn ms_to_frames(ms: u32, sample_rate: u32) -> usize {
    (ms as u64 * sample_rate as u64 / 1000) as usize
}

/// オーディオフォーマット情報
///
/// 音声データのサンプリングレートとチャンネル数を保持する。
///
/// # Examples
///
/// ```
/// # use diary_split::types::AudioFormat;
/// let format = AudioFormat {
///     sample_rate: 44100, // 44.1kHz
///     channels: 2,        // ステレオ
/// };
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioFormat {
    /// サンプリングレート (Hz)
    ///
    /// 典型的な値: 8000, 16000, 44100, 48000
    pub sample_rate: u32,

    /// チャンネル数
    ///
    /// 1: モノラル, 2: ステレオ
    pub channels: u16,
}

/// デコード済みのオーディオバッファ
///
/// 入力ファイル全体をデコードした結果を保持する。
/// サンプルはチャンネルインターリーブ形式で、
/// 位置の単位は常にフレーム（全チャンネル分の1サンプル）とする。
///
/// # Examples
///
/// ```
/// # use diary_split::types::{AudioBuffer, AudioFormat};
/// let buffer = AudioBuffer {
///     samples: vec![0i16; 32000], // 1秒分 @ 16kHz ステレオ
///     format: AudioFormat { sample_rate: 16000, channels: 2 },
/// };
/// assert_eq!(buffer.total_frames(), 16000);
/// assert_eq!(buffer.duration_seconds(), 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct AudioBuffer {
    /// PCM音声サンプルの配列（チャンネルインターリーブ）
    pub samples: Vec<SampleI16>,

    /// オーディオフォーマット情報
    pub format: AudioFormat,
}

impl AudioBuffer {
    /// 総フレーム数
    pub fn total_frames(&self) -> usize {
        self.samples.len() / self.format.channels as usize
    }

    /// 総再生時間（秒）
    pub fn duration_seconds(&self) -> f64 {
        self.total_frames() as f64 / self.format.sample_rate as f64
    }

    /// フレーム範囲 `[start, end)` に対応するサンプルスライスを取得
    pub fn frame_slice(&self, start: usize, end: usize) -> &[SampleI16] {
        let channels = self.format.channels as usize;
        &self.samples[start * channels..end * channels]
    }
}

/// 検出された無音区間
///
/// RMSが閾値以下のまま最小無音長以上続いたフレーム範囲 `[start, end)`。
/// 走査のたびに再計算される読み取り専用の値。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SilenceWindow {
    /// 開始フレーム（含む）
    pub start: usize,

    /// 終了フレーム（含まない）
    pub end: usize,
}

impl SilenceWindow {
    /// 区間のフレーム数
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// 区間が空かどうか
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// 出力対象のチャンク
///
/// 無音境界に挟まれた非無音区間に、端の保持無音を足したフレーム範囲
/// `[start, end)`。開始フレーム順に並び、その順序が出力ファイルの
/// 番号を決める。
///
/// # Examples
///
/// ```
/// # use diary_split::types::Chunk;
/// let chunk = Chunk { start: 0, end: 16000 };
/// assert_eq!(chunk.duration_seconds(16000), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// 開始フレーム（含む）
    pub start: usize,

    /// 終了フレーム（含まない）
    pub end: usize,
}

impl Chunk {
    /// チャンクのフレーム数
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// チャンクが空かどうか
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// チャンクの再生時間（秒）
    pub fn duration_seconds(&self, sample_rate: u32) -> f64 {
        self.len() as f64 / sample_rate as f64
    }
}
