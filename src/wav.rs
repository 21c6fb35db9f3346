use crate::types::{AudioBuffer, AudioFormat, SampleI16};
use anyhow::{Context, Result};
use std::path::Path;

/// WAVファイルを読み込んでオーディオバッファを生成
///
/// 16bit PCM (pcm_s16le) を前提とする。ffmpeg 側のデコードで
/// このフォーマットに揃えてから渡すこと。
///
/// # Arguments
///
/// * `path` - WAVファイルのパス
///
/// # Errors
///
/// ファイルが開けない場合、または16bit整数PCM以外の場合にエラーを返す。
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<AudioBuffer> {
    let mut reader = hound::WavReader::open(path.as_ref())
        .with_context(|| format!("WAVファイルのオープンに失敗: {:?}", path.as_ref()))?;

    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        anyhow::bail!(
            "未対応のWAVフォーマット: {}bit {:?}",
            spec.bits_per_sample,
            spec.sample_format
        );
    }

    let samples: Vec<SampleI16> = reader
        .samples::<i16>()
        .collect::<std::result::Result<_, _>>()
        .with_context(|| "WAVサンプルの読み込みに失敗")?;

    Ok(AudioBuffer {
        samples,
        format: AudioFormat {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
        },
    })
}

/// サンプル列をWAVファイルとして書き出し
///
/// # Arguments
///
/// * `path` - 出力先のパス
/// * `samples` - PCM音声サンプル（チャンネルインターリーブ）
/// * `format` - オーディオフォーマット情報
///
/// # Errors
///
/// ファイルの作成または書き込みに失敗した場合にエラーを返す。
pub fn write_wav<P: AsRef<Path>>(
    path: P,
    samples: &[SampleI16],
    format: AudioFormat,
) -> Result<()> {
    let spec = hound::WavSpec {
        channels: format.channels,
        sample_rate: format.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path.as_ref(), spec)
        .with_context(|| format!("WAVファイルの作成に失敗: {:?}", path.as_ref()))?;

    for &sample in samples {
        writer
            .write_sample(sample)
            .with_context(|| "WAVファイルへのサンプル書き込みに失敗")?;
    }

    writer
        .finalize()
        .with_context(|| "WAVファイルのファイナライズに失敗")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_wav_roundtrip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("roundtrip.wav");

        // サンプルデータを生成
        let samples: Vec<i16> = (0..16000)
            .map(|i| ((i as f32 * 0.1).sin() * 10000.0) as i16)
            .collect();
        let format = AudioFormat {
            sample_rate: 16000,
            channels: 1,
        };

        write_wav(&path, &samples, format)?;
        let buffer = read_wav(&path)?;

        assert_eq!(buffer.format, format);
        assert_eq!(buffer.samples, samples);
        assert_eq!(buffer.total_frames(), 16000);

        Ok(())
    }

    #[test]
    fn test_wav_roundtrip_stereo() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("stereo.wav");

        let samples: Vec<i16> = (0..8000).map(|i| (i % 256) as i16).collect();
        let format = AudioFormat {
            sample_rate: 44100,
            channels: 2,
        };

        write_wav(&path, &samples, format)?;
        let buffer = read_wav(&path)?;

        assert_eq!(buffer.format.channels, 2);
        assert_eq!(buffer.total_frames(), 4000);
        assert_eq!(buffer.samples, samples);

        Ok(())
    }

    #[test]
    fn test_read_wav_missing_file() {
        let result = read_wav("/nonexistent/missing.wav");
        assert!(result.is_err());
    }
}
