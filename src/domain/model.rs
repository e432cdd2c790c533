use crate::utils::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

/// 球員目錄中的一筆資料，建立後不可變
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    id: String,
    link: String,
    name: String,
    first_year: i32,
    last_year: i32,
}

impl PlayerRecord {
    /// 生涯年份顛倒時回傳錯誤，不會建立紀錄
    pub fn new(
        id: impl Into<String>,
        link: impl Into<String>,
        name: impl Into<String>,
        first_year: i32,
        last_year: i32,
    ) -> Result<Self> {
        let id = id.into();
        if first_year > last_year {
            return Err(SearchError::InvalidPlayerRecord {
                id,
                first: first_year,
                last: last_year,
            });
        }
        Ok(Self {
            id,
            link: link.into(),
            name: name.into(),
            first_year,
            last_year,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    pub fn last_year(&self) -> i32 {
        self.last_year
    }
}

/// id → PlayerRecord，依 id 排序
pub type PlayerDirectory = BTreeMap<String, PlayerRecord>;

/// 同一支球隊的某個城市時期（設定值）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FranchiseEra {
    pub code: String,
    pub city: String,
}

impl FranchiseEra {
    pub fn new(code: &str, city: &str) -> Self {
        Self {
            code: code.to_string(),
            city: city.to_string(),
        }
    }
}

/// 要掃描的城市時期與賽季區間 `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEra {
    pub code: String,
    pub city: String,
    pub years: Range<i32>,
}

/// 投手 id → 擊敗過的時期代碼
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WinLedger {
    wins: BTreeMap<String, BTreeSet<String>>,
}

impl WinLedger {
    /// 每位候選投手都先放一個空集合，零勝的投手也會出現在報表
    pub fn seeded<'a, I>(candidate_ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            wins: candidate_ids
                .into_iter()
                .map(|id| (id.to_string(), BTreeSet::new()))
                .collect(),
        }
    }

    /// 只記錄候選投手；回傳是否為新的時期
    pub fn record_win(&mut self, pitcher_id: &str, era_code: &str) -> bool {
        match self.wins.get_mut(pitcher_id) {
            Some(eras) => eras.insert(era_code.to_string()),
            None => false,
        }
    }

    pub fn is_candidate(&self, pitcher_id: &str) -> bool {
        self.wins.contains_key(pitcher_id)
    }

    pub fn eras_for(&self, pitcher_id: &str) -> Option<&BTreeSet<String>> {
        self.wins.get(pitcher_id)
    }

    pub fn candidate_ids(&self) -> impl Iterator<Item = &str> {
        self.wins.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.wins.iter().map(|(id, eras)| (id.as_str(), eras))
    }

    pub fn len(&self) -> usize {
        self.wins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wins.is_empty()
    }

    /// 擊敗過所有指定時期的投手
    pub fn sweepers<'a>(&'a self, era_codes: &'a [&'a str]) -> impl Iterator<Item = &'a str> + 'a {
        self.wins
            .iter()
            .filter(move |(_, eras)| era_codes.iter().all(|code| eras.contains(*code)))
            .map(|(id, _)| id.as_str())
    }
}

/// 無法判讀的頁面片段，只記錄不中斷
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanIssue {
    ParseAmbiguity { context: String, detail: String },
    MissingTable { url: String },
}

impl ScanIssue {
    pub fn ambiguity(context: impl Into<String>, detail: impl Into<String>) -> Self {
        ScanIssue::ParseAmbiguity {
            context: context.into(),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanIssue::ParseAmbiguity { context, detail } => {
                write!(f, "unrecognized {}: {}", context, detail)
            }
            ScanIssue::MissingTable { url } => write!(f, "no schedule table at {}", url),
        }
    }
}

/// 一個賽季賽程頁的解析結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonScan {
    pub losses: usize,
    pub winning_pitchers: Vec<String>,
    pub issues: Vec<ScanIssue>,
}

/// extract 階段的輸出
#[derive(Debug, Clone)]
pub struct CandidatePool {
    pub candidates: PlayerDirectory,
    pub directory_size: usize,
    pub pages_fetched: usize,
}

/// transform 階段的輸出
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub candidates: PlayerDirectory,
    pub eras: Vec<TeamEra>,
    pub ledger: WinLedger,
    pub issues: Vec<ScanIssue>,
    pub seasons_scanned: usize,
    pub loss_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Pitcher")]
    pub pitcher: String,
    #[serde(rename = "Opponents")]
    pub opponents: String,
}
