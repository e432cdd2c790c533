use crate::config::search_config::SearchSettings;
use crate::domain::model::{FranchiseEra, PlayerDirectory, TeamEra};

/// 需要掃描的賽季範圍 `[earliest, latest]`：涵蓋所有候選投手的生涯，且至少包含
/// first_cutoff - 1 與 last_cutoff 兩個賽季
pub fn season_bounds(candidates: &PlayerDirectory, settings: &SearchSettings) -> (i32, i32) {
    candidates.values().fold(
        (settings.first_cutoff - 1, settings.last_cutoff),
        |(earliest, latest), record| {
            (earliest.min(record.first_year()), latest.max(record.last_year()))
        },
    )
}

/// 三個連續的時期：cutoff 前、兩個 cutoff 之間、cutoff 後
pub fn derive_eras(
    franchise: &[FranchiseEra],
    candidates: &PlayerDirectory,
    settings: &SearchSettings,
) -> Vec<TeamEra> {
    let (earliest, latest) = season_bounds(candidates, settings);
    let ranges = [
        earliest..settings.first_cutoff,
        settings.first_cutoff..settings.last_cutoff,
        settings.last_cutoff..latest + 1,
    ];

    franchise
        .iter()
        .zip(ranges)
        .map(|(era, years)| TeamEra {
            code: era.code.clone(),
            city: era.city.clone(),
            years,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::search_config::default_eras;
    use crate::domain::model::PlayerRecord;

    fn candidates(careers: &[(&str, i32, i32)]) -> PlayerDirectory {
        careers
            .iter()
            .map(|(id, first, last)| {
                let link = format!("/players/x/{}.shtml", id);
                (
                    id.to_string(),
                    PlayerRecord::new(*id, link, *id, *first, *last).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_eras_are_contiguous_and_cover_careers() {
        let settings = SearchSettings::default();
        let pool = candidates(&[("a", 1944, 1966), ("b", 1948, 1968)]);

        let eras = derive_eras(&default_eras(), &pool, &settings);

        assert_eq!(eras.len(), 3);
        assert_eq!(eras[0].code, "BSN");
        assert_eq!(eras[0].years, 1944..1953);
        assert_eq!(eras[1].years, 1953..1966);
        assert_eq!(eras[2].code, "ATL");
        assert_eq!(eras[2].years, 1966..1969);
        assert_eq!(eras[0].years.end, eras[1].years.start);
        assert_eq!(eras[1].years.end, eras[2].years.start);
    }

    #[test]
    fn test_empty_pool_still_spans_window() {
        let settings = SearchSettings::default();
        let eras = derive_eras(&default_eras(), &PlayerDirectory::new(), &settings);

        assert_eq!(eras[0].years, 1952..1953);
        assert_eq!(eras[1].years, 1953..1966);
        assert_eq!(eras[2].years, 1966..1967);
    }

    #[test]
    fn test_bounds_never_shrink_below_window() {
        let settings = SearchSettings::default();
        let pool = candidates(&[("edge", 1952, 1966)]);
        assert_eq!(season_bounds(&pool, &settings), (1952, 1966));
    }
}
