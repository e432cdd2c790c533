use crate::domain::model::{PlayerDirectory, ReportRow, TeamEra, WinLedger};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub const NO_OPPONENTS: &str = "None";

/// 每次執行產生不同的檔名，避免覆蓋之前的報表
pub fn report_file_stem() -> String {
    format!("pitchers-{}", Uuid::new_v4())
}

/// 城市依時期先後排列；沒有任何勝場時為 "None"
pub fn opponents_cell(ledger: &WinLedger, pitcher_id: &str, eras: &[TeamEra]) -> String {
    let cities: Vec<&str> = match ledger.eras_for(pitcher_id) {
        Some(beaten) => eras
            .iter()
            .filter(|era| beaten.contains(&era.code))
            .map(|era| era.city.as_str())
            .collect(),
        None => Vec::new(),
    };

    if cities.is_empty() {
        NO_OPPONENTS.to_string()
    } else {
        cities.join(", ")
    }
}

pub fn build_report_rows(
    ledger: &WinLedger,
    candidates: &PlayerDirectory,
    eras: &[TeamEra],
) -> Vec<ReportRow> {
    ledger
        .candidate_ids()
        .map(|id| ReportRow {
            pitcher: candidates
                .get(id)
                .map(|record| record.name().to_string())
                .unwrap_or_else(|| id.to_string()),
            opponents: opponents_cell(ledger, id, eras),
        })
        .collect()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_html(rows: &[ReportRow], eras: &[TeamEra], generated_at: DateTime<Utc>) -> String {
    let title = eras
        .iter()
        .map(|era| era.city.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>Pitchers with wins against {}</title>\n</head>\n<body>\n",
        escape_html(&title)
    ));
    html.push_str("<table border=\"1\" class=\"dataframe\">\n");
    html.push_str(&format!(
        "  <caption>Generated {}</caption>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("  <thead>\n    <tr><th>Pitcher</th><th>Opponents</th></tr>\n  </thead>\n");
    html.push_str("  <tbody>\n");
    for row in rows {
        html.push_str(&format!(
            "    <tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(&row.pitcher),
            escape_html(&row.opponents)
        ));
    }
    html.push_str("  </tbody>\n</table>\n</body>\n</html>\n");
    html
}

pub fn render_csv(rows: &[ReportRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

#[derive(Serialize)]
struct JsonEra<'a> {
    code: &'a str,
    city: &'a str,
    first_season: i32,
    last_season: i32,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    eras: Vec<JsonEra<'a>>,
    pitchers: &'a [ReportRow],
}

pub fn render_json(rows: &[ReportRow], eras: &[TeamEra], generated_at: DateTime<Utc>) -> Result<String> {
    let report = JsonReport {
        generated_at,
        eras: eras
            .iter()
            .map(|era| JsonEra {
                code: &era.code,
                city: &era.city,
                first_season: era.years.start,
                last_season: era.years.end - 1,
            })
            .collect(),
        pitchers: rows,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PlayerRecord;

    fn eras() -> Vec<TeamEra> {
        vec![
            TeamEra { code: "BSN".into(), city: "Boston".into(), years: 1944..1953 },
            TeamEra { code: "MLN".into(), city: "Milwaukee".into(), years: 1953..1966 },
            TeamEra { code: "ATL".into(), city: "Atlanta".into(), years: 1966..1967 },
        ]
    }

    fn candidates() -> PlayerDirectory {
        [("roberro01", "Robin Roberts"), ("zeroes01", "Zero Wins")]
            .into_iter()
            .map(|(id, name)| {
                let link = format!("/players/x/{}.shtml", id);
                (id.to_string(), PlayerRecord::new(id, link, name, 1948, 1966).unwrap())
            })
            .collect()
    }

    fn ledger() -> WinLedger {
        let mut ledger = WinLedger::seeded(["roberro01", "zeroes01"]);
        ledger.record_win("roberro01", "ATL");
        ledger.record_win("roberro01", "BSN");
        ledger.record_win("roberro01", "MLN");
        ledger
    }

    #[test]
    fn test_rows_list_cities_in_era_order_and_none() {
        let rows = build_report_rows(&ledger(), &candidates(), &eras());

        assert_eq!(
            rows,
            vec![
                ReportRow {
                    pitcher: "Robin Roberts".to_string(),
                    opponents: "Boston, Milwaukee, Atlanta".to_string(),
                },
                ReportRow {
                    pitcher: "Zero Wins".to_string(),
                    opponents: "None".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_report_file_stem_is_unique() {
        let a = report_file_stem();
        let b = report_file_stem();
        assert!(a.starts_with("pitchers-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_render_html_escapes_names() {
        let rows = vec![ReportRow {
            pitcher: "Bobo <Newsom> & Co".to_string(),
            opponents: NO_OPPONENTS.to_string(),
        }];
        let html = render_html(&rows, &eras(), Utc::now());

        assert!(html.contains("<th>Pitcher</th><th>Opponents</th>"));
        assert!(html.contains("<td>Bobo &lt;Newsom&gt; &amp; Co</td><td>None</td>"));
        assert!(html.contains("Boston, Milwaukee, Atlanta"));
    }

    #[test]
    fn test_render_csv_has_header_and_quotes() {
        let rows = build_report_rows(&ledger(), &candidates(), &eras());
        let csv = render_csv(&rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Pitcher,Opponents");
        assert_eq!(lines[1], "Robin Roberts,\"Boston, Milwaukee, Atlanta\"");
        assert_eq!(lines[2], "Zero Wins,None");
    }

    #[test]
    fn test_render_json_includes_eras() {
        let rows = build_report_rows(&ledger(), &candidates(), &eras());
        let json = render_json(&rows, &eras(), Utc::now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["eras"][0]["first_season"], 1944);
        assert_eq!(value["eras"][2]["last_season"], 1966);
        assert_eq!(value["pitchers"][1]["Opponents"], "None");
    }
}
