//! Localized date strings and tooltip labels.

use crate::model::grid::DayCell;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Suffix appended to tooltip counts ("contributions").
pub const TOOLTIP_SUFFIX: &str = "次贡献";

/// Date display convention for cell labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum DisplayLocale {
    /// `2024/1/10`
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    /// `1/10/2024`
    #[serde(rename = "en-US")]
    EnUs,
    /// `2024-01-10`
    #[serde(rename = "iso")]
    Iso,
}

impl DisplayLocale {
    pub fn format_date(self, date: NaiveDate) -> String {
        match self {
            Self::ZhCn => format!("{}/{}/{}", date.year(), date.month(), date.day()),
            Self::EnUs => format!("{}/{}/{}", date.month(), date.day(), date.year()),
            Self::Iso => date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::EnUs => "en-US",
            Self::Iso => "iso",
        }
    }
}

impl Display for DisplayLocale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayLocale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "zh-cn" | "zh" => Ok(Self::ZhCn),
            "en-us" | "en" => Ok(Self::EnUs),
            "iso" => Ok(Self::Iso),
            other => Err(format!(
                "unsupported locale `{other}`; expected zh-CN|en-US|iso"
            )),
        }
    }
}

/// Hover label for one cell: `"<display date>: <count> 次贡献"`.
pub fn tooltip_label(cell: &DayCell) -> String {
    format!("{}: {} {}", cell.display_date, cell.count, TOOLTIP_SUFFIX)
}
