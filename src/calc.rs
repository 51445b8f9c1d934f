use serde::Serialize;

/// Sum, count and zero-guarded mean of a numeric selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub sum: f64,
    pub count: usize,
    pub mean: f64,
}

impl Aggregate {
    fn from_parts(sum: f64, count: usize) -> Self {
        let mean = if count > 0 { sum / (count as f64) } else { 0.0 };
        Self { sum, count, mean }
    }
}

pub fn aggregate<'a, T, I, F>(records: I, selector: F) -> Aggregate
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> f64,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for r in records {
        sum += selector(r);
        count += 1;
    }
    Aggregate::from_parts(sum, count)
}

/// Like [`aggregate`], but records whose selector yields `None` are left out
/// of both the sum and the count (e.g. ungraded homework).
pub fn aggregate_present<'a, T, I, F>(records: I, selector: F) -> Aggregate
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> Option<f64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in records.into_iter().filter_map(|r| selector(r)) {
        if v.is_finite() {
            sum += v;
            count += 1;
        }
    }
    Aggregate::from_parts(sum, count)
}

pub fn count_where<'a, T, I, P>(records: I, pred: P) -> usize
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> bool,
{
    records.into_iter().filter(|r| pred(*r)).count()
}

/// `num / den`, or 0 when the denominator is zero or either side is not finite.
pub fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 || !num.is_finite() || !den.is_finite() {
        return 0.0;
    }
    num / den
}

pub fn percent(num: f64, den: f64) -> f64 {
    100.0 * ratio(num, den)
}

/// Whole-percent rounding for stat cards (half away from zero).
pub fn round_percent(x: f64) -> i64 {
    if !x.is_finite() {
        return 0;
    }
    x.round() as i64
}

/// One-decimal rounding for per-row figures.
pub fn round_1(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    (x * 10.0).round() / 10.0
}

/// Mean of per-record `num/den` ratios, as a rounded percentage.
pub fn mean_ratio_percent<'a, T, I, N, D>(records: I, num: N, den: D) -> i64
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    N: Fn(&T) -> f64,
    D: Fn(&T) -> f64,
{
    let agg = aggregate(records, |r| ratio(num(r), den(r)));
    round_percent(agg.mean * 100.0)
}
