//! Rule-based question parser.
//!
//! The parser tries an explicit, ordered list of pattern matchers and stops
//! at the first one that succeeds. Each matcher is a pure function of the
//! lowercased question text plus the entity names known from the loaded
//! tables; if none match, the result is `Intent::ParseFailure`.

use regex::Regex;
use tracing::debug;

use super::intent::{Intent, KnownEntities};

type Matcher = fn(&str, &KnownEntities) -> Option<Intent>;

/// Matchers in priority order. First success wins.
const MATCHERS: [Matcher; 2] = [match_monthly_aggregate, match_weekly_compare];

/// Classify a question into one of the supported intents.
///
/// Matching is case-insensitive. Entity names absent from the data still
/// parse (via the literal `district .../state ...` phrasing); distinguishing
/// "not understood" from "understood but no data" is the planner's job.
pub fn parse(question: &str, entities: &KnownEntities) -> Intent {
    let q = question.to_lowercase();

    for matcher in MATCHERS {
        if let Some(intent) = matcher(&q, entities) {
            return intent;
        }
    }

    debug!("No pattern matched question: {:?}", question);
    Intent::ParseFailure {
        raw_text: question.to_string(),
    }
}

/// Pattern 1: district + month names + "from year Y1 to Y2".
///
/// Example: "What is the total precipitation amount of district Pune in each
/// August and September from year 2001 to 2005?"
fn match_monthly_aggregate(q: &str, entities: &KnownEntities) -> Option<Intent> {
    let range_re = Regex::new(r"from\s+(?:year\s+)?(\d{4})\s+to\s+(?:year\s+)?(\d{4})").ok()?;
    let caps = range_re.captures(q)?;
    let mut start_year: i32 = caps[1].parse().ok()?;
    let mut end_year: i32 = caps[2].parse().ok()?;
    // A reversed range is accepted and swapped rather than rejected
    if start_year > end_year {
        std::mem::swap(&mut start_year, &mut end_year);
    }

    let months = find_month_mentions(q);
    if months.is_empty() {
        return None;
    }

    let district = find_best_entity(q, &entities.districts)
        .or_else(|| extract_phrased_entity(q, "district"))?;

    Some(Intent::MonthlyAggregateByDistrict {
        district,
        months,
        start_year,
        end_year,
    })
}

/// Pattern 2: two states + ordinal week phrase + a comparison verb.
///
/// Example: "Compare the precipitation amount of state Uttar Pradesh and
/// state Maharashtra in the second week of Nov 2025 in a table format."
fn match_weekly_compare(q: &str, entities: &KnownEntities) -> Option<Intent> {
    if !q.contains("compar") {
        return None;
    }

    let week_re = Regex::new(
        r"\b(first|second|third|fourth|fifth|1st|2nd|3rd|4th|5th)\s+week\s+of\s+([a-z]+)\.?\s+(\d{4})",
    )
    .ok()?;
    let caps = week_re.captures(q)?;
    let week_index = ordinal_week_index(&caps[1])?;
    let month = month_from_name(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;

    let states = find_state_pair(q, entities)?;

    Some(Intent::WeeklyCompareByState {
        states,
        year,
        month,
        week_index,
    })
}

/// Month names mentioned in the question, in phrasing order, deduplicated.
/// Accepts full names plus the usual three-letter abbreviations.
fn find_month_mentions(q: &str) -> Vec<u32> {
    // Full names first so "september" is not consumed as "sep"
    let Ok(month_re) = Regex::new(
        r"\b(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\b",
    ) else {
        return Vec::new();
    };

    let mut months = Vec::new();
    for caps in month_re.captures_iter(q) {
        if let Some(m) = month_from_name(&caps[1]) {
            if !months.contains(&m) {
                months.push(m);
            }
        }
    }
    months
}

/// Resolve a month name or abbreviation to its 1-based number.
pub fn month_from_name(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sept" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn ordinal_week_index(word: &str) -> Option<u32> {
    let index = match word {
        "first" | "1st" => 1,
        "second" | "2nd" => 2,
        "third" | "3rd" => 3,
        "fourth" | "4th" => 4,
        "fifth" | "5th" => 5,
        _ => return None,
    };
    Some(index)
}

/// Best known-entity match in the question: longest matching name wins,
/// ties broken by earliest occurrence. Returns the table's spelling.
fn find_best_entity(q: &str, names: &[String]) -> Option<String> {
    let mut best: Option<(usize, usize, &String)> = None; // (len, pos, name)

    for name in names {
        let needle = name.to_lowercase();
        if needle.is_empty() {
            continue;
        }
        if let Some(pos) = q.find(&needle) {
            let candidate = (needle.len(), pos, name);
            best = Some(match best {
                None => candidate,
                Some(current) => {
                    if candidate.0 > current.0 || (candidate.0 == current.0 && candidate.1 < current.1)
                    {
                        candidate
                    } else {
                        current
                    }
                }
            });
        }
    }

    best.map(|(_, _, name)| name.clone())
}

/// All known-entity matches in question order, longer names shadowing any
/// shorter name they overlap with.
fn find_entities_ordered(q: &str, names: &[String]) -> Vec<String> {
    let mut occurrences: Vec<(usize, usize, &String)> = Vec::new(); // (pos, len, name)
    for name in names {
        let needle = name.to_lowercase();
        if needle.is_empty() {
            continue;
        }
        if let Some(pos) = q.find(&needle) {
            occurrences.push((pos, needle.len(), name));
        }
    }

    // Position order; at overlapping positions prefer the longer match
    occurrences.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut kept: Vec<(usize, usize, &String)> = Vec::new();
    for (pos, len, name) in occurrences {
        let overlaps = kept
            .iter()
            .any(|&(kpos, klen, _)| pos < kpos + klen && kpos < pos + len);
        if !overlaps {
            kept.push((pos, len, name));
        }
    }

    kept.into_iter().map(|(_, _, name)| name.clone()).collect()
}

/// The two compared states, in the order they appear in the question.
/// Falls back to the literal "state A and state B" phrasing when the names
/// are not present in the loaded tables.
fn find_state_pair(q: &str, entities: &KnownEntities) -> Option<[String; 2]> {
    let known = find_entities_ordered(q, &entities.states);
    if known.len() >= 2 {
        return Some([known[0].clone(), known[1].clone()]);
    }

    let phrased_re =
        Regex::new(r"state\s+([a-z][a-z\s]*?)\s+and\s+state\s+([a-z][a-z\s]*?)(?:\s+in\b|\s*[.?]|\s*$)")
            .ok()?;
    let caps = phrased_re.captures(q)?;
    Some([title_case(&caps[1]), title_case(&caps[2])])
}

/// Extract an entity from its literal phrasing ("district Pune in ..."),
/// used when the named entity is absent from the loaded tables.
fn extract_phrased_entity(q: &str, keyword: &str) -> Option<String> {
    let pattern = format!(r"{keyword}\s+([a-z][a-z\s]*?)\s+in\b");
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(q)?;
    Some(title_case(&caps[1]))
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
