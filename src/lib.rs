use chrono::NaiveDate;
use thiserror::Error;

pub mod fetch;
pub mod milestones;
pub mod plot;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// one petabase-pair is 1e15 bases
pub const PBP_PER_BASE: f64 = 1e-15;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("request for {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("csv contained no data")]
    Empty,
    #[error("series has no positive volumes to plot on a log axis")]
    NoPositiveValues,
    #[error("csv header is missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("csv line {line}: missing field '{column}'")]
    MissingField { line: usize, column: &'static str },
    #[error("csv line {line}: invalid date '{value}': {source}")]
    BadDate {
        line: usize,
        value: String,
        source: chrono::ParseError,
    },
    #[error("csv line {line}: invalid count '{value}': {source}")]
    BadNumber {
        line: usize,
        value: String,
        source: std::num::ParseFloatError,
    },
}

/// The main struct for the archive growth time series:
/// one date per row, total and open-access volumes in petabase-pairs.
#[derive(Debug, Clone)]
pub struct TimeVolume {
    pub date: Vec<NaiveDate>,
    pub pbp: Vec<f64>,
    pub open_pbp: Vec<f64>,
}

impl TimeVolume {
    pub fn new(capacity: usize) -> TimeVolume {
        TimeVolume {
            date: Vec::with_capacity(capacity),
            pbp: Vec::with_capacity(capacity),
            open_pbp: Vec::with_capacity(capacity),
        }
    }

    /// Init a TimeVolume from the csv text of the stats endpoint.
    /// The `date`, `bases` and `open_access_bases` columns are found by header
    /// name, any other column is ignored. Base counts are scaled to Pbp on the
    /// way in. Any unparsable date or count aborts with the offending line.
    pub fn from_csv(text: &str) -> Result<TimeVolume, DataError> {
        let mut lines = text.lines();
        let header = lines.next().ok_or(DataError::Empty)?;
        let idx_date = column_index(header, "date")?;
        let idx_bases = column_index(header, "bases")?;
        let idx_open = column_index(header, "open_access_bases")?;
        let mut tv = TimeVolume::new(1000);
        for (n, l) in lines.enumerate() {
            // 1-based line number, the header is line 1
            let line = n + 2;
            if l.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = l.split(',').collect();
            let raw_date = fields
                .get(idx_date)
                .copied()
                .ok_or(DataError::MissingField { line, column: "date" })?;
            let date = NaiveDate::parse_from_str(raw_date.trim(), DATE_FORMAT).map_err(|source| {
                DataError::BadDate {
                    line,
                    value: raw_date.trim().to_string(),
                    source,
                }
            })?;
            let bases = parse_count(&fields, idx_bases, line, "bases")?;
            let open_bases = parse_count(&fields, idx_open, line, "open_access_bases")?;
            tv.date.push(date);
            tv.pbp.push(bases * PBP_PER_BASE);
            tv.open_pbp.push(open_bases * PBP_PER_BASE);
        }
        Ok(tv)
    }

    pub fn len(&self) -> usize {
        self.date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    /// sorts the rows chronologically, keeping the columns aligned
    pub fn sort_by_date(&mut self) {
        let mut idx: Vec<usize> = (0..self.date.len()).collect();
        idx.sort_by_key(|&i| self.date[i]);
        self.date = idx.iter().map(|&i| self.date[i]).collect();
        self.pbp = idx.iter().map(|&i| self.pbp[i]).collect();
        self.open_pbp = idx.iter().map(|&i| self.open_pbp[i]).collect();
    }

    /// most recent row as (date, total Pbp, open-access Pbp)
    pub fn last(&self) -> Option<(NaiveDate, f64, f64)> {
        match (self.date.last(), self.pbp.last(), self.open_pbp.last()) {
            (Some(&d), Some(&t), Some(&o)) => Some((d, t, o)),
            _ => None,
        }
    }
}

fn column_index(header: &str, name: &'static str) -> Result<usize, DataError> {
    header
        .split(',')
        .position(|c| c.trim() == name)
        .ok_or(DataError::MissingColumn(name))
}

fn parse_count(
    fields: &[&str],
    idx: usize,
    line: usize,
    column: &'static str,
) -> Result<f64, DataError> {
    let raw = fields
        .get(idx)
        .copied()
        .ok_or(DataError::MissingField { line, column })?;
    raw.trim()
        .parse::<f64>()
        .map_err(|source| DataError::BadNumber {
            line,
            value: raw.trim().to_string(),
            source,
        })
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut iter = s.iter();
    let (mut min, mut max) = match iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for e in iter {
        if *e > max {
            max = *e
        }
        if *e < min {
            min = *e
        }
    }
    Some((min, max))
}

/// smallest value > 0, for the lower bound of a log axis
pub fn positive_min(s: &[f64]) -> Option<f64> {
    s.iter()
        .copied()
        .filter(|v| *v > 0.0)
        .fold(None, |acc, v| match acc {
            Some(m) if m <= v => Some(m),
            _ => Some(v),
        })
}
