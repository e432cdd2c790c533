use crate::config::search_config::SearchConfig;
use crate::core::markup::{Child, Markup, Node};
use crate::domain::model::{PlayerDirectory, PlayerRecord, ScanIssue};
use crate::domain::ports::PageFetcher;
use crate::utils::error::Result;
use regex::Regex;
use std::sync::LazyLock;

const PLAYER_PATH_PREFIX: &str = "/players/";
const PLAYER_PAGE_SUFFIX: &str = ".shtml";

static CAREER_YEARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\d{4})\s*-\s*(\d{4})\)").expect("valid career years pattern")
});

pub fn directory_url(base_url: &str, letter: char) -> String {
    format!("{}/players/{}/", base_url.trim_end_matches('/'), letter)
}

/// `/players/r/roberro01.shtml` → `roberro01`
pub fn player_id_from_link(link: &str) -> Option<&str> {
    let segment = link.rsplit('/').next()?;
    let id = segment.split('.').next()?;
    (!id.is_empty()).then_some(id)
}

/// `" (1948-1966)"` 或名人堂的 `"+ (1948-1966)"` → `(1948, 1966)`；年份顛倒視為無法判讀
pub fn parse_career_years(text: &str) -> Option<(i32, i32)> {
    let caps = CAREER_YEARS.captures(text)?;
    let first = caps[1].parse().ok()?;
    let last = caps[2].parse().ok()?;
    (first <= last).then_some((first, last))
}

fn skip(detail: impl Into<String>) -> ScanIssue {
    ScanIssue::ambiguity("directory entry", detail)
}

/// 一個 `<p>` 目錄項目：`<a href="/players/x/id.shtml">Name</a> (start-end)`，
/// 名人堂球員在連結後多一個 `+`
pub fn parse_directory_entry(entry: Node<'_>) -> std::result::Result<PlayerRecord, ScanIssue> {
    let children: Vec<Child<'_>> = entry
        .children()
        .into_iter()
        .filter(|child| !child.is_blank())
        .collect();
    if children.len() < 2 {
        return Err(skip("fewer than two children"));
    }

    let name_link = entry
        .first_with_attr("href")
        .ok_or_else(|| skip("no link"))?;

    // 現役球員包在 <b> 裡，第一個子節點不是連結
    let link = children[0]
        .as_element()
        .and_then(|node| node.attr("href"))
        .ok_or_else(|| skip("first child is not a link"))?;
    if !link.starts_with(PLAYER_PATH_PREFIX) || !link.ends_with(PLAYER_PAGE_SUFFIX) {
        return Err(skip(format!("not a player page: {}", link)));
    }

    let years_text = children[1]
        .as_text()
        .ok_or_else(|| skip(format!("no career years after {}", link)))?;
    let (first_year, last_year) = parse_career_years(years_text)
        .ok_or_else(|| skip(format!("bad career years '{}' for {}", years_text.trim(), link)))?;

    let id = player_id_from_link(link).ok_or_else(|| skip(format!("no id in {}", link)))?;
    let name = name_link.text();
    let name = name.trim();
    if name.is_empty() {
        return Err(skip(format!("empty name for {}", link)));
    }

    PlayerRecord::new(id, link, name, first_year, last_year).map_err(|e| skip(e.to_string()))
}

/// 解析一頁字母索引，無法判讀的項目直接略過
pub fn parse_directory_page(html: &str) -> Vec<PlayerRecord> {
    let markup = Markup::parse(html);
    markup
        .find_all("p")
        .into_iter()
        .map(parse_directory_entry)
        .filter_map(|parsed| match parsed {
            Ok(record) => Some(record),
            Err(issue) => {
                tracing::debug!("Skipping {}", issue);
                None
            }
        })
        .collect()
}

/// 同一 id 出現多次時以最後一筆為準
pub fn merge_records(mut directory: PlayerDirectory, records: Vec<PlayerRecord>) -> PlayerDirectory {
    for record in records {
        directory.insert(record.id().to_string(), record);
    }
    directory
}

/// 逐一抓取每個字母的索引頁；任何一頁抓取失敗即中止
pub async fn scan_directory<F>(fetcher: &F, config: &SearchConfig) -> Result<PlayerDirectory>
where
    F: PageFetcher + ?Sized,
{
    let mut directory = PlayerDirectory::new();

    for letter in config.letters() {
        let url = directory_url(&config.source.base_url, letter);
        let html = fetcher.fetch(&url).await?;
        let records = parse_directory_page(&html);
        tracing::debug!("🔤 {}: {} inactive players", letter, records.len());
        directory = merge_records(directory, records);
    }

    tracing::info!("📇 Directory scan found {} players", directory.len());
    Ok(directory)
}
