mod config;
mod error;
mod ffmpeg;
mod segmenter;
mod silence;
mod types;
mod wav;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use env_logger::Env;
use error::SegmentError;
use segmenter::Segmenter;
use std::path::PathBuf;
use std::process::ExitCode;

/// 音声日記を無音区間でエントリーごとに分割する
#[derive(Debug, Parser)]
#[command(name = "diary-split", version)]
struct Args {
    /// 入力音声ファイル (MP3/WAV など ffmpeg が扱える形式)
    #[arg(required_unless_present = "generate_config")]
    input_file: Option<PathBuf>,

    /// 出力ディレクトリ
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 無音判定の閾値 (dB)
    #[arg(short = 't', long = "threshold")]
    threshold: Option<f32>,

    /// 分割境界とみなす最小無音長 (ミリ秒)
    #[arg(short = 'l', long = "length")]
    length: Option<u32>,

    /// チャンク端に残す無音の長さ (ミリ秒)
    #[arg(short = 'k', long = "keep-silence")]
    keep_silence: Option<u32>,

    /// 設定ファイルのパス
    #[arg(short = 'c', long = "config", default_value = "config.toml")]
    config: PathBuf,

    /// デフォルト設定ファイルを生成して終了
    #[arg(long = "generate-config")]
    generate_config: bool,
}

fn main() -> ExitCode {
    // ロガーを初期化
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    // 設定ファイル生成モード
    if args.generate_config {
        Config::write_default(&args.config)?;
        println!("設定ファイルを生成しました: {:?}", args.config);
        return Ok(());
    }

    let input = args
        .input_file
        .context("入力ファイルを指定してください")?;

    // 処理を始める前に ffmpeg の存在を確認する
    if !ffmpeg::is_available() {
        return Err(SegmentError::MissingDependency.into());
    }

    // 設定を読み込み、CLI引数で上書き
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(threshold) = args.threshold {
        config.segment.threshold_db = threshold;
    }
    if let Some(length) = args.length {
        config.segment.min_silence_ms = length;
    }
    if let Some(keep) = args.keep_silence {
        config.segment.keep_silence_ms = keep;
    }
    let output_dir = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.dir));

    log::debug!("設定: {:?}", config.segment);

    let segmenter = Segmenter::new(config.segment);
    segmenter.segment(&input, &output_dir)?;

    Ok(())
}
