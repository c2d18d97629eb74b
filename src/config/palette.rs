// ==========================================
// 多区域门店排班系统 - 调色板
// ==========================================

use crate::domain::CellTone;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 色调 → 十六进制颜色
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPalette {
    overrides: HashMap<CellTone, String>,
}

impl CellPalette {
    /// 色调对应颜色（无覆写时取默认颜色）
    pub fn hex(&self, tone: CellTone) -> &str {
        self.overrides
            .get(&tone)
            .map(|s| s.as_str())
            .unwrap_or_else(|| tone.default_hex())
    }

    pub fn set(&mut self, tone: CellTone, hex: &str) {
        self.overrides.insert(tone, hex.to_string());
    }
}

/// 校验 #rgb / #rrggbb
pub fn is_valid_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => {
            (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}
