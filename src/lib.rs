//! Smart Medical Card client
//!
//! スキャン画像を解析サービスへ送り、結果とレポートを表示・PDF出力する。

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod intake;
pub mod interactive;
pub mod presenter;
