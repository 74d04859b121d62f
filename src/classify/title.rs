//! Title detection over early-page, large-font fragments.

use super::config::ClassifierConfig;
use super::filter::{normalize, word_count};
use crate::model::Fragment;

/// Largest font size among fragments on the title pages, 0 when there are none.
///
/// Also serves as the global scale reference for stylistic headings.
pub fn max_title_font_size(fragments: &[Fragment], title_pages: u32) -> f32 {
    fragments
        .iter()
        .filter(|f| f.page <= title_pages)
        .map(|f| f.font_size)
        .fold(0.0, f32::max)
}

/// Detect the document title. Returns an empty string when nothing qualifies.
pub fn detect_title(
    fragments: &[Fragment],
    max_size: f32,
    config: &ClassifierConfig,
    rejected: &[String],
) -> String {
    let threshold = max_size * config.title_size_ratio;
    let mut large: Vec<&Fragment> = fragments
        .iter()
        .filter(|f| f.page <= config.title_pages)
        .filter(|f| f.font_size > 0.0 && f.font_size >= threshold)
        .collect();
    large.sort_by(|a, b| a.page.cmp(&b.page).then(a.y.total_cmp(&b.y)));

    let groups = group_title_lines(&large, config.title_line_gap);
    let Some(best) = longest_group(&groups) else {
        return String::new();
    };

    let title = best
        .iter()
        .map(|f| f.trimmed())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    if word_count(&title) <= config.max_rejected_title_words
        && rejected.contains(&normalize(&title))
    {
        log::debug!("Rejected boilerplate title {:?}", title);
        return String::new();
    }

    title
}

/// Split sorted large-text fragments into runs of wrapped title lines.
///
/// Two neighbors join a run when they share font size and weight, sit on the
/// same page, and are closer than `max_gap` vertically. Fragments that join
/// nothing are dropped; if no run forms at all, every fragment is returned as
/// one pool.
pub fn group_title_lines<'a>(candidates: &[&'a Fragment], max_gap: f32) -> Vec<Vec<&'a Fragment>> {
    let mut groups: Vec<Vec<&Fragment>> = Vec::new();
    let mut current: Vec<&Fragment> = Vec::new();

    for pair in candidates.windows(2) {
        let (curr, next) = (pair[0], pair[1]);
        let same_style = curr.font_size == next.font_size && curr.bold == next.bold;
        let close = curr.page == next.page && (next.y - curr.y).abs() < max_gap;

        if same_style && close {
            if current.is_empty() {
                current.push(curr);
            }
            current.push(next);
        } else if !current.is_empty() {
            groups.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        groups.push(current);
    }

    if groups.is_empty() {
        log::debug!("No title runs formed, pooling {} candidates", candidates.len());
        return vec![candidates.to_vec()];
    }

    log::debug!("Formed {} title runs", groups.len());
    groups
}

/// The group with the most characters; the earliest one wins a tie.
fn longest_group<'a, 'b>(groups: &'b [Vec<&'a Fragment>]) -> Option<&'b [&'a Fragment]> {
    let mut best: Option<&'b [&'a Fragment]> = None;
    let mut best_len = 0;
    for group in groups {
        let len = group_char_len(group);
        if best.is_none() || len > best_len {
            best = Some(group.as_slice());
            best_len = len;
        }
    }
    best
}

fn group_char_len(group: &[&Fragment]) -> usize {
    group.iter().map(|f| f.trimmed().chars().count()).sum()
}
