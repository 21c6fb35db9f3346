use crate::types::{ms_to_frames, AudioBuffer, SampleI16, SilenceWindow};

/// 解析ウィンドウ幅（ミリ秒）
///
/// この単位でRMSを計算して無音判定する。分割境界の分解能でもある。
const WINDOW_MS: u32 = 10;

/// RMS (Root Mean Square) を計算
///
/// サンプルを -1.0〜1.0 に正規化してから二乗平均平方根を取る。
pub fn calculate_rms(samples: &[SampleI16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_of_squares: f64 = samples
        .iter()
        .map(|&s| {
            let normalized = s as f64 / i16::MAX as f64;
            normalized * normalized
        })
        .sum();

    let mean_square = sum_of_squares / samples.len() as f64;
    mean_square.sqrt() as f32
}

/// RMSをデシベル (dB) に変換
pub fn rms_to_db(rms: f32) -> f32 {
    if rms <= 0.0 {
        return -100.0; // 無音の場合の最小値
    }
    20.0 * rms.log10()
}

/// バッファ全体を走査して無音区間を検出
///
/// 10msのウィンドウごとにRMSを計算し、閾値以下のウィンドウが
/// `min_silence_ms` 以上連続した極大区間を無音区間として返す。
/// 返される区間は開始フレーム順で、互いに重ならない。
///
/// # Arguments
///
/// * `buffer` - デコード済みのオーディオバッファ
/// * `threshold_db` - 無音判定の閾値 (dB)。この値以下を無音とみなす
/// * `min_silence_ms` - 分割境界として扱う最小無音長（ミリ秒）
///
/// # Examples
///
/// ```
/// # use diary_split::silence::detect_silence;
/// # use diary_split::types::{AudioBuffer, AudioFormat};
/// let buffer = AudioBuffer {
///     samples: vec![0i16; 32000], // 2秒の完全な無音 @ 16kHz
///     format: AudioFormat { sample_rate: 16000, channels: 1 },
/// };
/// let windows = detect_silence(&buffer, -40.0, 1500);
/// assert_eq!(windows.len(), 1);
/// assert_eq!(windows[0].start, 0);
/// assert_eq!(windows[0].end, 32000);
/// ```
pub fn detect_silence(
    buffer: &AudioBuffer,
    threshold_db: f32,
    min_silence_ms: u32,
) -> Vec<SilenceWindow> {
    let channels = buffer.format.channels as usize;
    let total_frames = buffer.total_frames();
    let window_frames = ms_to_frames(WINDOW_MS, buffer.format.sample_rate).max(1);
    let min_silence_frames = ms_to_frames(min_silence_ms, buffer.format.sample_rate);

    let mut windows = Vec::new();
    let mut run_start: Option<usize> = None;
    let mut frame = 0;

    while frame < total_frames {
        let window_end = (frame + window_frames).min(total_frames);
        let slice = &buffer.samples[frame * channels..window_end * channels];
        let db = rms_to_db(calculate_rms(slice));

        if db <= threshold_db {
            if run_start.is_none() {
                run_start = Some(frame);
            }
        } else if let Some(start) = run_start.take() {
            if frame - start >= min_silence_frames {
                log::debug!("無音区間を検出: フレーム {}..{}", start, frame);
                windows.push(SilenceWindow { start, end: frame });
            }
        }

        frame = window_end;
    }

    // 末尾まで無音が続いた場合
    if let Some(start) = run_start {
        if total_frames - start >= min_silence_frames {
            log::debug!("無音区間を検出: フレーム {}..{}", start, total_frames);
            windows.push(SilenceWindow {
                start,
                end: total_frames,
            });
        }
    }

    windows
}

/// 無音区間の補集合として非無音レンジを求める
///
/// 無音区間が1つもなければ入力全体が1つのレンジになる。
/// 入力全体が無音ならレンジは空になる。
///
/// # Arguments
///
/// * `total_frames` - バッファの総フレーム数
/// * `silences` - [`detect_silence`] が返した無音区間（開始順）
pub fn nonsilent_ranges(total_frames: usize, silences: &[SilenceWindow]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut cursor = 0;

    for window in silences {
        if window.start > cursor {
            ranges.push((cursor, window.start));
        }
        cursor = window.end;
    }

    if cursor < total_frames {
        ranges.push((cursor, total_frames));
    }

    ranges
}
