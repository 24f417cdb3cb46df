//! # Daily Analytics
//!
//! Shapes the daily-stats series into stacked per-day bars and a category
//! breakdown. Bar widths are percentages of the busiest displayed day, so the
//! longest bar always spans the full track.

use chrono::NaiveDate;

use crate::models::DailyStat;

/// How many of the most recent days get a bar.
pub const DAILY_WINDOW: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Bans,
    Mutes,
    Warns,
    Removes,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Bans,
        Category::Mutes,
        Category::Warns,
        Category::Removes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Bans => "Баны",
            Category::Mutes => "Муты",
            Category::Warns => "Предупреждения",
            Category::Removes => "Удаления",
        }
    }

    /// Tailwind background used for both the bar segment and the legend dot.
    pub fn fill_class(&self) -> &'static str {
        match self {
            Category::Bans => "bg-destructive",
            Category::Mutes => "bg-orange-500",
            Category::Warns => "bg-yellow-500",
            Category::Removes => "bg-primary",
        }
    }

    pub fn count(&self, day: &DailyStat) -> u64 {
        match self {
            Category::Bans => day.bans,
            Category::Mutes => day.mutes,
            Category::Warns => day.warns,
            Category::Removes => day.removes,
        }
    }
}

/// One stacked segment of a day bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSegment {
    pub category: Category,
    pub count: u64,
    /// Share of the bar track, 0..=100
    pub width_pct: f64,
}

impl BarSegment {
    pub fn width(&self) -> String {
        format_pct(self.width_pct)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyBar {
    pub date_label: String,
    pub total: u64,
    pub segments: Vec<BarSegment>,
}

impl DailyBar {
    /// Sum of the segment widths; equals `total / max * 100`.
    pub fn total_width_pct(&self) -> f64 {
        self.segments.iter().map(|s| s.width_pct).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub total: u64,
    pub percent: f64,
}

impl CategoryShare {
    /// Whole-percent label for the breakdown panel.
    pub fn percent_label(&self) -> String {
        format!("{:.0}%", self.percent)
    }

    pub fn width(&self) -> String {
        format_pct(self.percent)
    }
}

/// Everything the analytics tab renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsView {
    pub bars: Vec<DailyBar>,
    pub max_total: u64,
    pub breakdown: Vec<CategoryShare>,
    pub grand_total: u64,
    /// Days in the full fetched series
    pub series_days: usize,
}

impl AnalyticsView {
    pub fn from_series(series: &[DailyStat]) -> Self {
        let bars = daily_bars(series);
        let max_total = bars.iter().map(|b| b.total).max().unwrap_or(0);
        AnalyticsView {
            bars,
            max_total,
            breakdown: category_breakdown(series),
            grand_total: series
                .iter()
                .map(DailyStat::total)
                .fold(0, u64::saturating_add),
            series_days: series.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Builds bars for the first [`DAILY_WINDOW`] entries (newest first on the
/// wire), oldest day first.
pub fn daily_bars(series: &[DailyStat]) -> Vec<DailyBar> {
    let window: Vec<&DailyStat> = series.iter().take(DAILY_WINDOW).rev().collect();
    let max = window.iter().map(|day| day.total()).max().unwrap_or(0);

    window
        .into_iter()
        .map(|day| DailyBar {
            date_label: format_day(&day.date),
            total: day.total(),
            segments: Category::ALL
                .iter()
                .map(|&category| {
                    let count = category.count(day);
                    BarSegment {
                        category,
                        count,
                        width_pct: percent_of(count, max),
                    }
                })
                .collect(),
        })
        .collect()
}

/// Category totals across the whole series as percentage shares.
pub fn category_breakdown(series: &[DailyStat]) -> Vec<CategoryShare> {
    let totals: Vec<(Category, u64)> = Category::ALL
        .iter()
        .map(|&category| {
            let total = series
                .iter()
                .map(|day| category.count(day))
                .fold(0, u64::saturating_add);
            (category, total)
        })
        .collect();
    let grand = totals
        .iter()
        .map(|(_, total)| *total)
        .fold(0, u64::saturating_add);

    totals
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category,
            total,
            percent: percent_of(total, grand),
        })
        .collect()
}

/// `DD.MM` for ISO dates; anything else is shown as-is.
pub fn format_day(date: &str) -> String {
    NaiveDate::parse_from_str(date.get(..10).unwrap_or(date), "%Y-%m-%d")
        .map(|d| d.format("%d.%m").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

fn format_pct(pct: f64) -> String {
    format!("{pct:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, bans: u64, mutes: u64, warns: u64, removes: u64) -> DailyStat {
        DailyStat {
            date: date.to_string(),
            bans,
            mutes,
            warns,
            removes,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bars_normalize_against_busiest_day() {
        // newest first, as the service sends it
        let series = vec![
            day("2026-01-16", 1, 1, 0, 0),
            day("2026-01-15", 2, 3, 4, 1),
            day("2026-01-14", 0, 0, 5, 0),
        ];
        let bars = daily_bars(&series);
        assert_eq!(
            bars.iter().map(|b| b.date_label.as_str()).collect::<Vec<_>>(),
            vec!["14.01", "15.01", "16.01"]
        );

        let max = 10.0;
        for (bar, source) in bars.iter().zip(series.iter().rev()) {
            for segment in &bar.segments {
                let expected = segment.category.count(source) as f64 / max * 100.0;
                assert!(close(segment.width_pct, expected));
            }
            assert!(close(bar.total_width_pct(), source.total() as f64 / max * 100.0));
        }
        assert!(close(bars[1].total_width_pct(), 100.0));
    }

    #[test]
    fn test_bars_take_fourteen_most_recent_days() {
        let series: Vec<_> = (1..=30)
            .rev()
            .map(|d| day(&format!("2026-01-{d:02}"), d, 0, 0, 0))
            .collect();
        let bars = daily_bars(&series);
        assert_eq!(bars.len(), DAILY_WINDOW);
        assert_eq!(bars.first().unwrap().date_label, "17.01");
        assert_eq!(bars.last().unwrap().date_label, "30.01");
    }

    #[test]
    fn test_all_zero_days_render_zero_widths() {
        let bars = daily_bars(&[day("2026-01-16", 0, 0, 0, 0), day("2026-01-15", 0, 0, 0, 0)]);
        assert!(bars
            .iter()
            .flat_map(|b| b.segments.iter())
            .all(|s| s.width_pct == 0.0));
    }

    #[test]
    fn test_breakdown_sums_to_hundred() {
        let series = vec![day("2026-01-16", 1, 2, 3, 1), day("2026-01-15", 0, 1, 1, 0)];
        let shares = category_breakdown(&series);
        let sum: f64 = shares.iter().map(|s| s.percent).sum();
        assert!(close(sum, 100.0));
        assert_eq!(shares[2].total, 4);
        assert_eq!(shares[2].percent_label(), "44%");
    }

    #[test]
    fn test_breakdown_uses_full_series_not_window() {
        let mut series: Vec<_> = (0..14).map(|_| day("2026-01-16", 0, 1, 0, 0)).collect();
        series.extend((0..16).map(|_| day("2025-12-01", 1, 0, 0, 0)));
        let view = AnalyticsView::from_series(&series);
        assert_eq!(view.bars.len(), DAILY_WINDOW);
        assert_eq!(view.breakdown[0].total, 16);
        assert_eq!(view.grand_total, 30);
        assert_eq!(view.series_days, 30);
    }

    #[test]
    fn test_breakdown_zero_total_is_zero_percent() {
        let shares = category_breakdown(&[day("2026-01-16", 0, 0, 0, 0)]);
        assert!(shares.iter().all(|s| s.percent == 0.0));
        assert!(shares.iter().all(|s| s.percent_label() == "0%"));
        assert!(category_breakdown(&[]).iter().all(|s| s.percent == 0.0));
    }

    #[test]
    fn test_huge_counters_saturate_instead_of_overflowing() {
        let series = vec![day("2026-01-16", u64::MAX, 1, 0, 0), day("2026-01-15", 5, 0, 0, 0)];
        let view = AnalyticsView::from_series(&series);
        assert_eq!(view.max_total, u64::MAX);
        assert_eq!(view.grand_total, u64::MAX);
        assert_eq!(view.breakdown[0].total, u64::MAX);
        assert!(close(view.bars[1].total_width_pct(), 100.0));
    }

    #[test]
    fn test_format_day() {
        assert_eq!(format_day("2026-01-05"), "05.01");
        assert_eq!(format_day("2026-01-05T00:00:00"), "05.01");
        assert_eq!(format_day("вчера"), "вчера");
    }

    #[test]
    fn test_empty_series() {
        let view = AnalyticsView::from_series(&[]);
        assert!(view.is_empty());
        assert_eq!(view.max_total, 0);
    }
}
