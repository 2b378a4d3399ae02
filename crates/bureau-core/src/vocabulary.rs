use serde::{Deserialize, Serialize};

pub const VALID_BUREAUS: &[&str] = &[
    "政策企画局",
    "子供政策連携室",
    "総務局",
    "財務局",
    "デジタルサービス局",
    "主税局",
    "生活文化局",
    "都民安全総合対策本部",
    "スポーツ推進本部",
    "都市整備局",
    "住宅政策本部",
    "環境局",
    "福祉局",
    "保健医療局",
    "産業労働局",
    "中央卸売市場",
    "スタートアップ戦略推進本部",
    "建設局",
    "港湾局",
    "会計管理局",
    "交通局",
    "水道局",
    "下水道局",
    "教育庁",
    "選挙管理委員会事務局",
    "人事委員会事務局",
    "監査事務局",
    "労働委員会事務局",
    "収用委員会事務局",
    "警視庁",
    "東京消防庁",
];

pub const VALID_CATEGORIES: &[&str] = &[
    "答申･報告･調査結果",
    "事業、計画",
    "会議等",
    "募集",
    "ｲﾍﾞﾝﾄ･講演",
    "事件･事故･処分",
    "動物",
    "人事･訃報･表彰",
    "資料",
    "ｺﾒﾝﾄ･声明･談話",
    "選挙関係",
    "入試関係",
    "広報紙・ﾊﾟﾝﾌﾚｯﾄ・定期刊行物",
    "統計",
    "議会",
    "報道官",
    "取材案内",
    "デフリンピック・世界陸上",
    "その他",
    "災害関係",
];

/// Closed lists of bureaus and categories offered to the model.
///
/// The lists are only advisory: extracted values outside them are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub bureaus: Vec<String>,
    pub categories: Vec<String>,
}

impl Vocabulary {
    pub fn new(bureaus: Vec<String>, categories: Vec<String>) -> Self {
        Self {
            bureaus,
            categories,
        }
    }

    pub fn contains_bureau(&self, bureau: &str) -> bool {
        self.bureaus.iter().any(|b| b == bureau)
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            bureaus: VALID_BUREAUS.iter().map(|s| s.to_string()).collect(),
            categories: VALID_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
