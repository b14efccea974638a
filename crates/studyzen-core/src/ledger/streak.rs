//! Calendar-day streak continuation logic.
//!
//! Streaks count consecutive local calendar days containing at least one
//! completed session. Comparison is date-only; time of day never matters.

use chrono::NaiveDate;

use super::types::UserStats;

/// Fold a newly completed study day into the streak counters.
///
/// - Same day as the last study: no change, so multiple sessions in one
///   day cannot inflate the streak.
/// - Exactly one day after the last study: the streak continues.
/// - Anything else, including a first-ever session: the streak restarts
///   at 1 (never 0).
///
/// `longest_streak` only ever ratchets upward. The caller is responsible
/// for recording `today` as the new last-study date afterwards.
pub(crate) fn advance(stats: &mut UserStats, last_study: Option<NaiveDate>, today: NaiveDate) {
    match last_study {
        Some(day) if day == today => return,
        Some(day) if Some(day) == today.pred_opt() => stats.current_streak += 1,
        _ => stats.current_streak = 1,
    }

    if stats.current_streak > stats.longest_streak {
        stats.longest_streak = stats.current_streak;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn first_session_starts_at_one() {
        let mut stats = UserStats::default();
        advance(&mut stats, None, day(10));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 1);
    }

    #[test]
    fn same_day_is_idempotent() {
        let mut stats = UserStats {
            current_streak: 4,
            longest_streak: 6,
            ..Default::default()
        };
        advance(&mut stats, Some(day(10)), day(10));
        assert_eq!(stats.current_streak, 4);
        assert_eq!(stats.longest_streak, 6);
    }

    #[test]
    fn consecutive_day_increments() {
        let mut stats = UserStats {
            current_streak: 4,
            longest_streak: 4,
            ..Default::default()
        };
        advance(&mut stats, Some(day(10)), day(11));
        assert_eq!(stats.current_streak, 5);
        assert_eq!(stats.longest_streak, 5);
    }

    #[test]
    fn gap_resets_to_one() {
        let mut stats = UserStats {
            current_streak: 9,
            longest_streak: 9,
            ..Default::default()
        };
        advance(&mut stats, Some(day(10)), day(13));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 9);
    }

    #[test]
    fn longest_never_decreases() {
        let mut stats = UserStats::default();
        for d in 10..15 {
            advance(&mut stats, Some(day(d - 1)), day(d));
        }
        assert_eq!(stats.longest_streak, 5);
        advance(&mut stats, Some(day(14)), day(20));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 5);
    }

    #[test]
    fn crosses_month_boundary() {
        let mut stats = UserStats::default();
        let last = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        advance(&mut stats, None, last);
        advance(&mut stats, Some(last), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(stats.current_streak, 2);
    }
}
