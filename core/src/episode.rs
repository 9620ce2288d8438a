//! Pure helpers over episode locators and episode codes.
//!
//! Characters reference episodes by locator strings whose final path segment
//! is the numeric episode id. That encoding is fragile, so every parse lives
//! here with one policy: anything that does not yield a positive integer is
//! dropped.

use crate::types::Episode;

/// Approximate number of episodes in the series, used as the fixed
/// denominator of the completion percentage.
pub const TOTAL_SERIES_EPISODES: u32 = 51;

/// Extract the trailing numeric id from an episode locator.
///
/// Splits on `/`, takes the last non-empty segment and parses it as a
/// positive integer. Returns `None` for an empty tail, a non-numeric tail,
/// or zero.
pub fn episode_id_from_locator(locator: &str) -> Option<u64> {
    let segment = locator.split('/').rev().find(|s| !s.is_empty())?;
    segment.parse::<u64>().ok().filter(|id| *id > 0)
}

/// Ids of every locator that parses, in locator order.
pub fn episode_ids<S: AsRef<str>>(locators: &[S]) -> Vec<u64> {
    locators
        .iter()
        .filter_map(|l| episode_id_from_locator(l.as_ref()))
        .collect()
}

/// Number following the `E` in an episode code (`"S01E07"` gives 7).
pub fn episode_number(code: &str) -> Option<u32> {
    let (_, tail) = code.split_once('E')?;
    let digits: String = tail.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Sort ascending by episode number. The sort is stable, so ties keep input
/// order; codes without a number sort as 0.
pub fn sort_episodes(episodes: &mut [Episode]) {
    episodes.sort_by_key(|e| episode_number(&e.episode).unwrap_or(0));
}

/// `round(count / 51 * 100)`, rounding half away from zero.
pub fn completion_percentage(episode_count: usize) -> u32 {
    let pct = episode_count as f64 / f64::from(TOTAL_SERIES_EPISODES) * 100.0;
    pct.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(id: u64, code: &str) -> Episode {
        Episode {
            id,
            name: format!("Episode {id}"),
            air_date: String::new(),
            episode: code.to_string(),
            characters: Vec::new(),
            url: String::new(),
            created: String::new(),
        }
    }

    #[test]
    fn id_from_full_locator() {
        assert_eq!(
            episode_id_from_locator("https://rickandmortyapi.com/api/episode/7"),
            Some(7)
        );
        assert_eq!(episode_id_from_locator("/episode/28"), Some(28));
    }

    #[test]
    fn trailing_slash_uses_last_non_empty_segment() {
        assert_eq!(episode_id_from_locator("/api/episode/12/"), Some(12));
    }

    #[test]
    fn locator_without_id_is_dropped() {
        assert_eq!(episode_id_from_locator(".../episode/"), None);
        assert_eq!(episode_id_from_locator("/episode/pilot"), None);
        assert_eq!(episode_id_from_locator("/episode/0"), None);
        assert_eq!(episode_id_from_locator("/episode/-4"), None);
        assert_eq!(episode_id_from_locator(""), None);
    }

    #[test]
    fn ids_skip_unparseable_locators() {
        let locators = ["/episode/1", "/episode/", "/episode/x", "/episode/3"];
        assert_eq!(episode_ids(&locators), vec![1, 3]);
    }

    #[test]
    fn episode_number_reads_digits_after_e() {
        assert_eq!(episode_number("S01E07"), Some(7));
        assert_eq!(episode_number("S04E10"), Some(10));
        assert_eq!(episode_number("S01"), None);
        assert_eq!(episode_number("S01E"), None);
    }

    #[test]
    fn sorts_by_number_after_e_only() {
        let mut episodes = vec![ep(10, "S01E10"), ep(2, "S01E02"), ep(12, "S02E01")];
        sort_episodes(&mut episodes);
        let codes: Vec<_> = episodes.iter().map(|e| e.episode.as_str()).collect();
        assert_eq!(codes, vec!["S02E01", "S01E02", "S01E10"]);
    }

    #[test]
    fn sort_keeps_input_order_on_ties() {
        let mut episodes = vec![ep(22, "S02E03"), ep(3, "S01E03"), ep(1, "S01E01")];
        sort_episodes(&mut episodes);
        let ids: Vec<_> = episodes.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 22, 3]);
    }

    #[test]
    fn completion_percentage_uses_fixed_denominator() {
        assert_eq!(completion_percentage(0), 0);
        assert_eq!(completion_percentage(51), 100);
        assert_eq!(completion_percentage(26), 51);
        assert_eq!(completion_percentage(1), 2);
    }
}
