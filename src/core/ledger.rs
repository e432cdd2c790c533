use crate::domain::model::{PlayerDirectory, WinLedger};

/// 掃描前先把每位候選投手放進帳本
pub fn seed_ledger(candidates: &PlayerDirectory) -> WinLedger {
    WinLedger::seeded(candidates.keys().map(String::as_str))
}

/// 把一季中的勝投者併入帳本；非候選投手忽略，同一時期只記一次
pub fn apply_season<I, S>(mut ledger: WinLedger, era_code: &str, winning_pitchers: I) -> WinLedger
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for pitcher in winning_pitchers {
        let pitcher = pitcher.as_ref();
        if ledger.record_win(pitcher, era_code) {
            tracing::debug!("🏆 {} beat {}", pitcher, era_code);
        }
    }
    ledger
}
