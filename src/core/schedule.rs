use crate::config::search_config::{ScheduleLayout, SearchConfig};
use crate::core::directory::player_id_from_link;
use crate::core::ledger::apply_season;
use crate::core::markup::{Markup, Node};
use crate::domain::model::{ScanIssue, SeasonScan, TeamEra, WinLedger};
use crate::domain::ports::PageFetcher;
use crate::utils::error::Result;

pub fn schedule_url(base_url: &str, team_code: &str, year: i32) -> String {
    format!(
        "{}/teams/{}/{}-schedule-scores.shtml",
        base_url.trim_end_matches('/'),
        team_code,
        year
    )
}

/// 一列比賽的判讀結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameRow {
    /// 欄位不足 (表頭、月份分隔列等)
    Incomplete,
    NotALoss,
    Loss { winning_pitcher: String },
}

/// 球隊輸球時取出對方勝投的 id；輸球卻沒有勝投連結視為無法判讀
pub fn classify_row(
    row: Node<'_>,
    layout: &ScheduleLayout,
) -> std::result::Result<GameRow, ScanIssue> {
    let cells = row.find_all("td");
    if cells.len() < layout.min_cells() {
        return Ok(GameRow::Incomplete);
    }

    let result = cells[layout.result_column].text();
    if !result.trim_start().starts_with(layout.loss_marker.as_str()) {
        return Ok(GameRow::NotALoss);
    }

    let pitcher_cell = cells[layout.winning_pitcher_column];
    let href = pitcher_cell
        .find_first("a")
        .and_then(|link| link.attr("href"))
        .ok_or_else(|| {
            ScanIssue::ambiguity(
                "schedule row",
                format!("loss without winning pitcher link ({})", pitcher_cell.text().trim()),
            )
        })?;
    let winning_pitcher = player_id_from_link(href).ok_or_else(|| {
        ScanIssue::ambiguity("schedule row", format!("no pitcher id in {}", href))
    })?;

    Ok(GameRow::Loss {
        winning_pitcher: winning_pitcher.to_string(),
    })
}

/// 解析一季賽程頁。沒有賽程表時回報 MissingTable，視為零場比賽
pub fn parse_schedule_page(html: &str, url: &str, layout: &ScheduleLayout) -> SeasonScan {
    let markup = Markup::parse(html);
    let Some(table) = markup.find_by_id("table", &layout.table_id) else {
        return SeasonScan {
            issues: vec![ScanIssue::MissingTable {
                url: url.to_string(),
            }],
            ..SeasonScan::default()
        };
    };

    let body = table.find_first("tbody").unwrap_or(table);
    body.find_all("tr")
        .into_iter()
        .map(|row| classify_row(row, layout))
        .fold(SeasonScan::default(), |mut scan, row| {
            match row {
                Ok(GameRow::Loss { winning_pitcher }) => {
                    scan.losses += 1;
                    scan.winning_pitchers.push(winning_pitcher);
                }
                Ok(GameRow::Incomplete | GameRow::NotALoss) => {}
                Err(issue) => scan.issues.push(issue),
            }
            scan
        })
}

/// 掃描結果與統計
#[derive(Debug, Clone)]
pub struct ScheduleScan {
    pub ledger: WinLedger,
    pub seasons_scanned: usize,
    pub loss_rows: usize,
    pub issues: Vec<ScanIssue>,
}

/// 逐一抓取每個時期每個賽季的賽程頁並更新帳本。抓取失敗即中止，
/// 頁面結構問題只記錄
pub async fn scan_schedules<F>(
    fetcher: &F,
    config: &SearchConfig,
    eras: &[TeamEra],
    ledger: WinLedger,
) -> Result<ScheduleScan>
where
    F: PageFetcher + ?Sized,
{
    let mut scan = ScheduleScan {
        ledger,
        seasons_scanned: 0,
        loss_rows: 0,
        issues: Vec::new(),
    };

    if scan.ledger.is_empty() {
        tracing::info!("No candidate pitchers, skipping schedule scan");
        return Ok(scan);
    }

    for era in eras {
        tracing::info!(
            "📅 Scanning {} ({}) seasons {}-{}",
            era.city,
            era.code,
            era.years.start,
            era.years.end - 1
        );

        for year in era.years.clone() {
            let url = schedule_url(&config.source.base_url, &era.code, year);
            let html = fetcher.fetch(&url).await?;
            let season = parse_schedule_page(&html, &url, &config.schedule);

            for issue in &season.issues {
                match issue {
                    ScanIssue::MissingTable { .. } => tracing::warn!("⚠️ {} {}: {}", era.code, year, issue),
                    ScanIssue::ParseAmbiguity { .. } => tracing::debug!("{} {}: {}", era.code, year, issue),
                }
            }
            tracing::debug!("{} {}: {} losses", era.code, year, season.losses);

            scan.seasons_scanned += 1;
            scan.loss_rows += season.losses;
            scan.issues.extend(season.issues);
            scan.ledger = apply_season(scan.ledger, &era.code, &season.winning_pitchers);
        }
    }

    Ok(scan)
}
