use crate::config::SegmentConfig;
use crate::error::SegmentError;
use crate::ffmpeg;
use crate::silence;
use crate::types::{ms_to_frames, Chunk, SilenceWindow};
use std::fs;
use std::path::Path;

/// 無音分割の実行本体
///
/// 入力ファイル全体をデコードし、無音区間を走査して分割位置を決め、
/// チャンクごとに連番のMP3ファイルとして書き出す。
///
/// # 処理の流れ
///
/// 1. 入力ファイル全体を ffmpeg でデコードしてメモリ上に展開
/// 2. RMSベースの走査で分割境界となる無音区間を検出
/// 3. 無音区間の補集合に保持無音を足してチャンクを計画
/// 4. 各チャンクを `entry_001.mp3` からの連番で書き出し
///
/// 1回の実行は (入力ファイル, 設定) の純関数で、実行間で状態を
/// 持たない。途中で失敗した場合、書き出し済みのファイルはそのまま残る。
///
/// # Examples
///
/// ```no_run
/// # use diary_split::config::SegmentConfig;
/// # use diary_split::segmenter::Segmenter;
/// # use std::path::Path;
/// let segmenter = Segmenter::new(SegmentConfig::default());
/// let count = segmenter
///     .segment(Path::new("diary.mp3"), Path::new("output"))
///     .unwrap();
/// println!("{} files", count);
/// ```
pub struct Segmenter {
    config: SegmentConfig,
}

impl Segmenter {
    pub fn new(config: SegmentConfig) -> Self {
        Self { config }
    }

    /// 入力ファイルを無音で分割し、書き出したファイル数を返す
    ///
    /// # Arguments
    ///
    /// * `input` - 入力音声ファイルのパス
    /// * `output_dir` - 出力ディレクトリ（なければ作成する）
    ///
    /// # Errors
    ///
    /// 入力が存在しない、デコードできない、出力先に書き込めない、
    /// エンコードに失敗した、のいずれかで [`SegmentError`] を返す。
    /// どのエラーでも実行全体を中断し、チャンク単位のリトライはしない。
    pub fn segment(&self, input: &Path, output_dir: &Path) -> Result<usize, SegmentError> {
        // 出力ディレクトリを作る前に入力を検証する
        if !input.exists() {
            return Err(SegmentError::NotFound {
                path: input.to_path_buf(),
            });
        }

        let buffer = ffmpeg::decode_to_buffer(input)?;
        log::info!(
            "読み込み完了: {:.1}秒 ({} Hz, {}ch)",
            buffer.duration_seconds(),
            buffer.format.sample_rate,
            buffer.format.channels
        );

        let silences = silence::detect_silence(
            &buffer,
            self.config.threshold_db,
            self.config.min_silence_ms,
        );
        log::debug!("無音区間: {}件", silences.len());

        let keep_frames = ms_to_frames(self.config.keep_silence_ms, buffer.format.sample_rate);
        let chunks = plan_chunks(buffer.total_frames(), &silences, keep_frames);

        fs::create_dir_all(output_dir)?;

        for (i, chunk) in chunks.iter().enumerate() {
            let path = output_dir.join(format!("entry_{:03}.mp3", i + 1));
            let samples = buffer.frame_slice(chunk.start, chunk.end);
            ffmpeg::encode_mp3(samples, buffer.format, &path)?;
            log::info!(
                "保存: {:.1}秒 -> {:?}",
                chunk.duration_seconds(buffer.format.sample_rate),
                path
            );
        }

        log::info!(
            "完了: {}ファイルを {:?} に作成しました",
            chunks.len(),
            output_dir
        );

        Ok(chunks.len())
    }
}

/// 無音区間と保持無音からチャンクを計画する
///
/// 非無音レンジの両端に `keep_frames` 分の無音を足す。隣接する
/// チャンクが短い無音区間の中で重なる場合は、その区間の中点で
/// 分割する（保持無音を伸ばすのではなく詰める）。結果として
/// 2×keep より短い無音区間では、両側がそれぞれ区間長の半分だけ
/// 無音を保持する。
///
/// チャンクは開始フレーム順で互いに重ならない。全体が無音の
/// 入力からはチャンクが生成されない。
pub fn plan_chunks(
    total_frames: usize,
    silences: &[SilenceWindow],
    keep_frames: usize,
) -> Vec<Chunk> {
    let ranges = silence::nonsilent_ranges(total_frames, silences);

    let mut chunks: Vec<Chunk> = ranges
        .iter()
        .map(|&(start, end)| Chunk {
            start: start.saturating_sub(keep_frames),
            end: (end + keep_frames).min(total_frames),
        })
        .collect();

    // 重なった隣接チャンクは無音区間の中点で分割
    for i in 1..chunks.len() {
        if chunks[i].start < chunks[i - 1].end {
            let mid = (chunks[i - 1].end + chunks[i].start) / 2;
            chunks[i - 1].end = mid;
            chunks[i].start = mid;
        }
    }

    chunks.retain(|chunk| !chunk.is_empty());
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn window(start: usize, end: usize) -> SilenceWindow {
        SilenceWindow { start, end }
    }

    #[test]
    fn test_plan_no_silence_single_chunk() {
        // 分割境界がなければ入力全体が1チャンク
        let chunks = plan_chunks(160000, &[], 8000);
        assert_eq!(chunks, vec![Chunk { start: 0, end: 160000 }]);
    }

    #[test]
    fn test_plan_all_silence_no_chunks() {
        let silences = vec![window(0, 160000)];
        let chunks = plan_chunks(160000, &silences, 8000);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_plan_empty_input() {
        let chunks = plan_chunks(0, &[], 8000);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_plan_two_gaps_three_chunks() {
        // 10分の入力に2000msのギャップが2つ (16kHz換算)
        // keep = 500ms = 8000フレーム
        let total = 600 * 16000;
        let silences = vec![
            window(100 * 16000, 102 * 16000),
            window(300 * 16000, 302 * 16000),
        ];
        let chunks = plan_chunks(total, &silences, 8000);

        assert_eq!(chunks.len(), 3);

        // ギャップは2000ms > 2×500ms なので中点分割は起きず、
        // 各チャンクは境界側にちょうど500ms分の無音を保持する
        assert_eq!(chunks[0], Chunk { start: 0, end: 100 * 16000 + 8000 });
        assert_eq!(
            chunks[1],
            Chunk {
                start: 102 * 16000 - 8000,
                end: 300 * 16000 + 8000,
            }
        );
        assert_eq!(
            chunks[2],
            Chunk {
                start: 302 * 16000 - 8000,
                end: total,
            }
        );
    }

    #[test]
    fn test_plan_monotonic_and_nonoverlapping() {
        let total = 1_000_000;
        let silences = vec![
            window(100_000, 150_000),
            window(400_000, 430_000),
            window(700_000, 800_000),
        ];
        let chunks = plan_chunks(total, &silences, 20_000);

        for pair in chunks.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_plan_short_silence_midpoint_split() {
        // 無音区間1000フレーム < 2×keep(1600) の場合は中点で分割し、
        // 両側が区間長の半分(500)ずつ無音を保持する
        let total = 20_000;
        let silences = vec![window(10_000, 11_000)];
        let chunks = plan_chunks(total, &silences, 800);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].end, 10_500);
        assert_eq!(chunks[1].start, 10_500);
    }

    #[test]
    fn test_plan_keep_does_not_extend_past_edges() {
        // 先頭・末尾ではバッファの外にはみ出さない
        let total = 50_000;
        let silences = vec![window(20_000, 45_000)];
        let chunks = plan_chunks(total, &silences, 10_000);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].start, 0);
        assert_eq!(chunks[1].end, total);
    }

    #[test]
    fn test_plan_leading_and_trailing_silence() {
        // 先頭・末尾の純粋な無音領域からはチャンクを作らない
        let total = 100_000;
        let silences = vec![window(0, 30_000), window(70_000, 100_000)];
        let chunks = plan_chunks(total, &silences, 1_600);

        assert_eq!(chunks.len(), 1);
        assert_eq!(
            chunks[0],
            Chunk {
                start: 30_000 - 1_600,
                end: 70_000 + 1_600,
            }
        );
    }

    #[test]
    fn test_plan_zero_keep() {
        let total = 100_000;
        let silences = vec![window(40_000, 70_000)];
        let chunks = plan_chunks(total, &silences, 0);

        assert_eq!(
            chunks,
            vec![
                Chunk { start: 0, end: 40_000 },
                Chunk { start: 70_000, end: total },
            ]
        );
    }

    #[test]
    fn test_segment_missing_input() {
        // 入力が存在しない場合は出力ディレクトリを作らずに失敗する
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("entries");
        let segmenter = Segmenter::new(SegmentConfig::default());

        let result = segmenter.segment(Path::new("/nonexistent/diary.mp3"), &output_dir);

        assert!(matches!(result, Err(SegmentError::NotFound { .. })));
        assert!(!output_dir.exists());
    }
}
