//! 画面（タブ）切り替え
//!
//! upload / results / report の3画面のうち、常に1つだけを表示する。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum View {
    #[default]
    Upload,
    Results,
    Report,
}

impl View {
    pub const ALL: [View; 3] = [View::Upload, View::Results, View::Report];

    pub fn label(&self) -> &'static str {
        match self {
            View::Upload => "Upload Scan",
            View::Results => "Analysis Results",
            View::Report => "Medical Report",
        }
    }

    /// 解析結果がないと表示できない画面か
    pub fn requires_analysis(&self) -> bool {
        !matches!(self, View::Upload)
    }
}

/// 表示中の画面を管理する
#[derive(Debug, Clone, Default)]
pub struct TabController {
    active: View,
}

impl TabController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> View {
        self.active
    }

    /// 無条件に切り替える
    pub fn switch_to(&mut self, view: View) {
        self.active = view;
    }

    /// ナビゲーション操作からの切り替え要求
    ///
    /// upload 以外は解析結果を保持しているときのみ許可。拒否時は表示を変えない。
    pub fn request_switch(&mut self, view: View, has_analysis: bool) -> Result<View> {
        if view.requires_analysis() && !has_analysis {
            return Err(Error::NavigationRefused(view));
        }
        self.switch_to(view);
        Ok(view)
    }
}
