//! Tolerant parsing of participation record lines.
//!
//! Line layout:
//!   field0, field1, field2, ..., participation
//!   participation = seg[/seg...]
//!   seg           = matchId:schoolId:score:rank:regionId[:extra]
//!
//! Only matchId (token 0) and regionId (token 4) of a segment are read.
//! The name and score columns are probed in a fixed, configured order;
//! the first column that yields a value wins.

use crate::{
    config::{NamePoolConfig, ScoreParsing},
    types::{MatchId, RegionKey},
};

/// One decoded (matchId, regionId) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipationFact {
    pub match_id:  MatchId,
    pub region_id: Option<RegionKey>,
}

/// A line that carried at least one participation fact.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRow {
    pub fields: Vec<String>,
    pub facts:  Vec<ParticipationFact>,
    /// Empty when no name column held text.
    pub name:   String,
    /// `None` when no probed column parsed as a number.
    pub score:  Option<f64>,
}

impl CandidateRow {
    pub fn max_match_id(&self) -> Option<MatchId> {
        self.facts.iter().map(|f| f.match_id).max()
    }
}

pub struct RecordParser {
    name_columns:  Vec<usize>,
    score_columns: Vec<usize>,
    parsing:       ScoreParsing,
}

impl RecordParser {
    pub fn new(config: &NamePoolConfig) -> Self {
        Self {
            name_columns:  config.name_columns.clone(),
            score_columns: config.score_columns.clone(),
            parsing:       config.score_parsing,
        }
    }

    /// Parse every non-blank line of `text`, keeping rows with facts.
    pub fn parse_text(&self, text: &str) -> Vec<CandidateRow> {
        text.lines().filter_map(|line| self.parse_line(line)).collect()
    }

    /// Parse one line. Returns `None` for blank lines and for lines
    /// whose participation field holds no valid segment.
    pub fn parse_line(&self, line: &str) -> Option<CandidateRow> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let fields: Vec<&str> = line.split(',').collect();
        let participation = fields.last()?;

        let facts: Vec<ParticipationFact> = participation
            .split('/')
            .filter_map(|seg| self.parse_fact(seg))
            .collect();
        if facts.is_empty() {
            return None;
        }

        let name = first_match(&fields, &self.name_columns, non_empty_text).unwrap_or_default();
        let score = first_match(&fields, &self.score_columns, |raw| {
            parse_number(raw, self.parsing)
        });

        Some(CandidateRow {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            facts,
            name,
            score,
        })
    }

    fn parse_fact(&self, segment: &str) -> Option<ParticipationFact> {
        let tokens: Vec<&str> = segment.split(':').collect();
        let match_id = parse_integer(tokens.first()?, self.parsing)?;
        let region_id = tokens
            .get(4)
            .and_then(|raw| parse_integer(raw, self.parsing));
        Some(ParticipationFact { match_id, region_id })
    }
}

/// Try each column in `probes` order; return the first extracted value.
fn first_match<T>(
    fields: &[&str],
    probes: &[usize],
    extract: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    probes
        .iter()
        .find_map(|&index| fields.get(index).and_then(|raw| extract(*raw)))
}

fn non_empty_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Read a finite float from `raw` under the given parsing mode.
pub fn parse_number(raw: &str, mode: ScoreParsing) -> Option<f64> {
    let value = match mode {
        ScoreParsing::Strict => raw.trim().parse::<f64>().ok(),
        ScoreParsing::Lenient => {
            let s = raw.trim_start();
            s[..float_prefix_len(s.as_bytes())?].parse::<f64>().ok()
        }
    };
    value.filter(|v| v.is_finite())
}

/// Read an integer from `raw` under the given parsing mode.
pub fn parse_integer(raw: &str, mode: ScoreParsing) -> Option<i64> {
    match mode {
        ScoreParsing::Strict => raw.trim().parse::<i64>().ok(),
        ScoreParsing::Lenient => {
            let s = raw.trim_start();
            let bytes = s.as_bytes();
            let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
            let digits = count_digits(&bytes[sign..]);
            if digits == 0 {
                return None;
            }
            s[..sign + digits].parse::<i64>().ok()
        }
    }
}

/// Length of the longest prefix of `bytes` that reads as a decimal float.
fn float_prefix_len(bytes: &[u8]) -> Option<usize> {
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    Some(end)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
