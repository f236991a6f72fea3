use crate::TimeVolume;
use chrono::{Datelike, NaiveDate};

/// A point where the total volume at least doubled over the previous
/// milestone after at least 5 calendar years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Milestone {
    pub date: NaiveDate,
    pub pbp: f64,
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:.1} Pbp", self.date.format("%Y-%m-%d"), self.pbp)
    }
}

/// Scans the total-volume series in date order and collects the doubling
/// milestones. The earliest row is always the first milestone (the baseline);
/// after that a row qualifies when it is at least twice the previous milestone
/// AND at least 5 calendar years later. The year condition subtracts calendar
/// years, not elapsed days, so it counts year-boundary crossings.
/// An empty series yields no milestones.
pub fn compute_milestones(tv: &TimeVolume) -> Vec<Milestone> {
    let mut rows: Vec<(NaiveDate, f64)> = tv
        .date
        .iter()
        .copied()
        .zip(tv.pbp.iter().copied())
        .collect();
    rows.sort_by_key(|&(d, _)| d);
    let mut rows = rows.into_iter();
    let (first_date, first_pbp) = match rows.next() {
        Some(r) => r,
        None => return Vec::new(),
    };
    let baseline = Milestone {
        date: first_date,
        pbp: first_pbp,
    };
    let (_, _, milestones) = rows.fold(
        (first_date, first_pbp, vec![baseline]),
        |(prev_date, prev_pbp, mut out), (date, pbp)| {
            if pbp >= prev_pbp * 2.0 && date.year() - prev_date.year() >= 5 {
                out.push(Milestone { date, pbp });
                (date, pbp, out)
            } else {
                (prev_date, prev_pbp, out)
            }
        },
    );
    milestones
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(rows: &[(i32, u32, u32, f64)]) -> TimeVolume {
        let mut tv = TimeVolume::new(rows.len());
        for &(y, m, d, pbp) in rows {
            tv.date.push(NaiveDate::from_ymd(y, m, d));
            tv.pbp.push(pbp);
            tv.open_pbp.push(pbp / 2.0);
        }
        tv
    }

    #[test]
    fn first_row_is_always_a_milestone() {
        let tv = series(&[(2000, 1, 1, 1.0), (2001, 1, 1, 1.1), (2002, 1, 1, 1.2)]);
        let ms = compute_milestones(&tv);
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].date, NaiveDate::from_ymd(2000, 1, 1));
        assert!((ms[0].pbp - 1.0).abs() < 1e-12);
    }

    #[test]
    fn doubling_every_five_years_chains() {
        let tv = series(&[(2000, 1, 1, 1.0), (2005, 1, 1, 2.0), (2010, 1, 1, 4.0)]);
        let ms = compute_milestones(&tv);
        let expect = [
            (NaiveDate::from_ymd(2000, 1, 1), 1.0),
            (NaiveDate::from_ymd(2005, 1, 1), 2.0),
            (NaiveDate::from_ymd(2010, 1, 1), 4.0),
        ];
        assert_eq!(ms.len(), 3);
        for (m, &(d, v)) in ms.iter().zip(expect.iter()) {
            assert_eq!(m.date, d);
            assert!((m.pbp - v).abs() < 1e-12);
        }
    }

    #[test]
    fn doubling_after_only_three_years_is_skipped() {
        let tv = series(&[(2000, 1, 1, 1.0), (2003, 1, 1, 2.5)]);
        let ms = compute_milestones(&tv);
        assert_eq!(ms.len(), 1);
    }

    #[test]
    fn six_years_without_doubling_is_skipped() {
        let tv = series(&[(2000, 1, 1, 1.0), (2006, 1, 1, 1.9)]);
        let ms = compute_milestones(&tv);
        assert_eq!(ms.len(), 1);
    }

    #[test]
    fn year_condition_counts_calendar_boundaries() {
        // 4 years and ~364 days apart, but 5 calendar-year boundaries crossed
        let tv = series(&[(2000, 12, 31, 1.0), (2005, 12, 30, 2.0)]);
        let ms = compute_milestones(&tv);
        assert_eq!(ms.len(), 2);
    }

    #[test]
    fn unsorted_input_is_sorted_before_scanning() {
        let tv = series(&[(2010, 1, 1, 4.0), (2000, 1, 1, 1.0), (2005, 1, 1, 2.0)]);
        let ms = compute_milestones(&tv);
        assert_eq!(ms.len(), 3);
        assert_eq!(ms[0].date, NaiveDate::from_ymd(2000, 1, 1));
    }

    #[test]
    fn empty_series_yields_no_milestones() {
        let tv = TimeVolume::new(0);
        assert!(compute_milestones(&tv).is_empty());
    }

    #[test]
    fn display_formats_one_decimal_pbp() {
        let m = Milestone {
            date: NaiveDate::from_ymd(2005, 6, 15),
            pbp: 2.345,
        };
        assert_eq!(m.to_string(), "2005-06-15 2.3 Pbp");
    }
}
