use crate::error::SegmentError;
use crate::types::{AudioBuffer, AudioFormat, SampleI16};
use crate::wav;
use std::path::Path;
use std::process::{Command, Stdio};

/// ffmpeg がPATH上に存在するか確認
///
/// `ffmpeg -version` を実行し、正常終了すれば利用可能とみなす。
/// 処理を始める前に必ず呼び出すこと。
pub fn is_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// 入力ファイルをデコードしてオーディオバッファを生成
///
/// フォーマット判定は ffmpeg に任せる。ffmpeg で一時WAV (pcm_s16le) に
/// 変換し、それを読み込む。サンプリングレートとチャンネル数は入力の
/// ものを維持する。
///
/// # Arguments
///
/// * `input` - 入力音声ファイルのパス (MP3/WAV など ffmpeg が扱える形式)
///
/// # Errors
///
/// ffmpeg が入力をパースできない場合に [`SegmentError::Decode`] を返す。
pub fn decode_to_buffer(input: &Path) -> Result<AudioBuffer, SegmentError> {
    let temp = tempfile::Builder::new()
        .prefix("diary-split-decode-")
        .suffix(".wav")
        .tempfile()?;

    let output = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(input)
        .args(["-vn", "-acodec", "pcm_s16le"])
        .arg(temp.path())
        .output()?;

    if !output.status.success() {
        return Err(SegmentError::Decode {
            reason: last_stderr_line(&output.stderr),
        });
    }

    wav::read_wav(temp.path()).map_err(|e| SegmentError::Decode {
        reason: format!("{:#}", e),
    })
}

/// サンプル列をMP3ファイルとしてエンコード
///
/// 一時WAVに書き出してから ffmpeg (libmp3lame, VBR品質2) で変換する。
///
/// # Arguments
///
/// * `samples` - PCM音声サンプル（チャンネルインターリーブ）
/// * `format` - オーディオフォーマット情報
/// * `output` - 出力先のMP3パス
///
/// # Errors
///
/// WAV書き出しまたは ffmpeg の変換に失敗した場合に
/// [`SegmentError::Encode`] を返す。
pub fn encode_mp3(
    samples: &[SampleI16],
    format: AudioFormat,
    output: &Path,
) -> Result<(), SegmentError> {
    let temp = tempfile::Builder::new()
        .prefix("diary-split-encode-")
        .suffix(".wav")
        .tempfile()?;

    wav::write_wav(temp.path(), samples, format).map_err(|e| SegmentError::Encode {
        reason: format!("{:#}", e),
    })?;

    let result = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(temp.path())
        .args(["-codec:a", "libmp3lame", "-q:a", "2"])
        .arg(output)
        .output()?;

    if !result.status.success() {
        return Err(SegmentError::Encode {
            reason: last_stderr_line(&result.stderr),
        });
    }

    Ok(())
}

/// ffmpeg の標準エラー出力から最後の意味のある行を取り出す
///
/// ffmpeg はバナーや進捗も標準エラーに出すため、全文ではなく
/// エラー原因が書かれる最終行だけをメッセージに使う。
fn last_stderr_line(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "不明なエラー".to_string())
}
