//! Episode file matcher
//!
//! Picks the file for one episode out of a directory listing. Precise
//! patterns are anchored on delimiters so that episode 1 never matches
//! inside episode 11; the loose pattern is only used when no precise
//! pattern matched any file.

/// Delimiter-anchored patterns, compared against the lowercased file name
fn precise_patterns(season: u32, episode: u32) -> [String; 5] {
    [
        format!("s{season:02}e{episode:02}"),
        format!(".e{episode:02}."),
        format!("_e{episode:02}_"),
        format!("-e{episode:02}-"),
        format!("({season:02}x{episode:02})"),
    ]
}

/// Finds the file for `season`/`episode` among `candidates`
///
/// Candidates are scanned in order. The first one containing any precise
/// pattern wins immediately. Otherwise the first candidate containing
/// `E{episode:02}` or `S{season:02}E{episode:02}` (case-sensitive) is
/// returned.
///
/// # Returns
/// The matching candidate, or `None` when neither tier matches
///
/// # Example
/// ```
/// use donyaye_core::find_episode_file;
/// let files = ["Show.S01E01.mkv", "Show.S01E11.mkv"];
/// assert_eq!(find_episode_file(1, 1, &files), Some("Show.S01E01.mkv"));
/// ```
pub fn find_episode_file<S: AsRef<str>>(
    season: u32,
    episode: u32,
    candidates: &[S],
) -> Option<&str> {
    let patterns = precise_patterns(season, episode);
    let loose = format!("E{episode:02}");
    let loose_full = format!("S{season:02}E{episode:02}");

    tracing::debug!(?patterns, %loose, "searching for episode file");

    let mut potential: Option<&str> = None;

    for candidate in candidates {
        let file = candidate.as_ref();
        let lower = file.to_lowercase();

        if patterns.iter().any(|p| lower.contains(p.as_str())) {
            tracing::debug!(%file, "found precise match");
            return Some(file);
        }

        if potential.is_none() && (file.contains(&loose) || file.contains(&loose_full)) {
            tracing::debug!(%file, "found potential fallback match");
            potential = Some(file);
        }
    }

    if potential.is_none() {
        tracing::warn!(
            season,
            episode,
            candidates = candidates.len(),
            "no episode file matched"
        );
    }

    potential
}
