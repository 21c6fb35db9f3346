//! diary-split - 音声日記の無音分割ツール
//!
//! このクレートは、長時間の音声日記を無音区間で区切り、
//! エントリーごとに連番のMP3ファイルとして書き出すツールを提供します。
//! デコードとエンコードは外部の ffmpeg バイナリに委譲します。
//!
//! # 主な機能
//!
//! - **自動フォーマット判定**: ffmpeg が扱える形式 (MP3/WAV など) をそのまま入力可能
//! - **RMSベースの無音検出**: 閾値 (dB) と最小無音長で分割境界を決定
//! - **保持無音**: チャンク端に一定量の無音を残して自然な切れ目にする
//! - **連番出力**: `entry_001.mp3` からの連番で時系列順に書き出し
//!
//! # アーキテクチャ
//!
//! ```text
//! [Input File] → [ffmpeg decode] → [AudioBuffer]
//!                                       ↓
//!                                 [SilenceScan]
//!                                       ↓
//!                                 [Chunk Plan]
//!                                       ↓
//!                      [ffmpeg encode] → [entry_XXX.mp3]
//! ```
//!
//! # 使用例
//!
//! ```no_run
//! use diary_split::config::SegmentConfig;
//! use diary_split::segmenter::Segmenter;
//! use std::path::Path;
//!
//! let segmenter = Segmenter::new(SegmentConfig::default());
//! let count = segmenter
//!     .segment(Path::new("diary.mp3"), Path::new("output"))
//!     .unwrap();
//! println!("{} entries", count);
//! ```

pub mod config;
pub mod error;
pub mod ffmpeg;
pub mod segmenter;
pub mod silence;
pub mod types;
pub mod wav;
