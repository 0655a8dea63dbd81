//! Side-by-side comparison of players or teams.
//!
//! One implementation backs both screens: the entity type picks the stat catalog, and the
//! chart kind decides how many entities may be selected at once.

use serde::Serialize;

use crate::stats::{self, StatCategory, StatDef, StatSubject, StatValue};

pub const PALETTE: [&str; 8] = [
    "#2563eb", "#dc2626", "#059669", "#d97706", "#7c3aed", "#db2777", "#0891b2", "#4f46e5",
];

pub const PICKER_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Radar,
    Bar,
    Scatter,
}

impl ChartKind {
    pub fn max_selected(self) -> usize {
        match self {
            ChartKind::Radar | ChartKind::Bar => 4,
            ChartKind::Scatter => 8,
        }
    }

    pub fn next(self) -> Self {
        match self {
            ChartKind::Radar => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Scatter,
            ChartKind::Scatter => ChartKind::Radar,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Radar => "Radar",
            ChartKind::Bar => "Bar",
            ChartKind::Scatter => "Scatter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    LimitReached,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarRow {
    pub stat: &'static str,
    /// (entity name, value) in selection order.
    pub values: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarRow {
    pub subject: String,
    pub stat: &'static str,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: &'static str,
    pub description: &'static str,
    pub cells: Vec<StatValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonView {
    /// Nothing selected yet; the screen shows a prompt instead of a chart.
    Placeholder(&'static str),
    Ready,
}

pub struct PickerPage<'a, T> {
    pub entries: Vec<&'a T>,
    pub total: usize,
}

impl<T> PickerPage<'_, T> {
    pub fn hint(&self) -> Option<String> {
        (self.total > self.entries.len()).then(|| {
            format!(
                "Showing {} of {}. Use the filter to narrow down results.",
                self.entries.len(),
                self.total
            )
        })
    }
}

#[derive(Debug, Clone)]
pub struct Comparison<T: StatSubject> {
    pub selected: Vec<T>,
    pub filter: Option<T::Group>,
    pub category: StatCategory,
    pub chart: ChartKind,
    pub scatter_x: &'static str,
    pub scatter_y: &'static str,
}

impl<T: StatSubject> Comparison<T> {
    pub fn new(scatter_x: &'static str, scatter_y: &'static str) -> Self {
        let category = T::categories()
            .first()
            .copied()
            .unwrap_or(StatCategory::Attacking);
        Self {
            selected: Vec::new(),
            filter: None,
            category,
            chart: ChartKind::Radar,
            scatter_x,
            scatter_y,
        }
    }

    pub fn limit(&self) -> usize {
        self.chart.max_selected()
    }

    pub fn is_selected(&self, id: u32) -> bool {
        self.selected.iter().any(|s| s.subject_id() == id)
    }

    /// Removes `subject` if it is already picked, otherwise adds it while under the limit.
    pub fn toggle(&mut self, subject: &T) -> SelectionChange {
        let id = subject.subject_id();
        if self.is_selected(id) {
            self.selected.retain(|s| s.subject_id() != id);
            return SelectionChange::Removed;
        }
        if self.selected.len() >= self.limit() {
            return SelectionChange::LimitReached;
        }
        self.selected.push(subject.clone());
        SelectionChange::Added
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Changing the filter starts a fresh selection.
    pub fn set_filter(&mut self, filter: Option<T::Group>) {
        self.filter = filter;
        self.selected.clear();
    }

    /// Switching to a chart with a smaller limit drops the most recent picks.
    pub fn set_chart(&mut self, chart: ChartKind) {
        self.chart = chart;
        self.selected.truncate(chart.max_selected());
    }

    pub fn cycle_chart(&mut self) {
        self.set_chart(self.chart.next());
    }

    pub fn cycle_category(&mut self) {
        let categories = T::categories();
        if categories.is_empty() {
            return;
        }
        let idx = categories
            .iter()
            .position(|c| *c == self.category)
            .map(|i| (i + 1) % categories.len())
            .unwrap_or(0);
        self.category = categories[idx];
    }

    pub fn cycle_scatter_x(&mut self) {
        self.scatter_x = next_stat_key::<T>(self.scatter_x);
    }

    pub fn cycle_scatter_y(&mut self) {
        self.scatter_y = next_stat_key::<T>(self.scatter_y);
    }

    pub fn filtered<'a>(&self, pool: &'a [T]) -> Vec<&'a T> {
        pool.iter()
            .filter(|s| self.filter.is_none_or(|g| s.group() == g))
            .collect()
    }

    pub fn picker<'a>(&self, pool: &'a [T]) -> PickerPage<'a, T> {
        let filtered = self.filtered(pool);
        let total = filtered.len();
        PickerPage {
            entries: filtered.into_iter().take(PICKER_PAGE_SIZE).collect(),
            total,
        }
    }

    pub fn stats(&self) -> Vec<&'static StatDef<T>> {
        stats::stats_in_category::<T>(self.category)
    }

    pub fn color_of(&self, id: u32) -> &'static str {
        let idx = self
            .selected
            .iter()
            .position(|s| s.subject_id() == id)
            .unwrap_or(0);
        PALETTE[idx % PALETTE.len()]
    }

    pub fn view(&self) -> ComparisonView {
        if self.selected.is_empty() {
            ComparisonView::Placeholder(T::PLACEHOLDER)
        } else {
            ComparisonView::Ready
        }
    }

    pub fn radar_rows(&self) -> Vec<RadarRow> {
        if self.selected.is_empty() {
            return Vec::new();
        }
        self.stats()
            .into_iter()
            .map(|stat| RadarRow {
                stat: stat.label,
                values: self
                    .selected
                    .iter()
                    .map(|s| (s.display_name().to_string(), stat.value(s).or_zero()))
                    .collect(),
            })
            .collect()
    }

    pub fn bar_rows(&self) -> Vec<BarRow> {
        if self.selected.is_empty() {
            return Vec::new();
        }
        let mut rows = Vec::new();
        for stat in self.stats() {
            for (idx, subject) in self.selected.iter().enumerate() {
                rows.push(BarRow {
                    subject: subject.display_name().to_string(),
                    stat: stat.label,
                    value: stat.value(subject).or_zero(),
                    color: PALETTE[idx % PALETTE.len()],
                });
            }
        }
        rows
    }

    pub fn scatter_points(&self) -> Vec<ScatterPoint> {
        let (Some(x_stat), Some(y_stat)) = (
            stats::find_stat::<T>(self.scatter_x),
            stats::find_stat::<T>(self.scatter_y),
        ) else {
            return Vec::new();
        };
        self.selected
            .iter()
            .enumerate()
            .map(|(idx, s)| ScatterPoint {
                name: s.display_name().to_string(),
                x: x_stat.value(s).or_zero(),
                y: y_stat.value(s).or_zero(),
                color: PALETTE[idx % PALETTE.len()],
            })
            .collect()
    }

    pub fn table_rows(&self) -> Vec<TableRow> {
        if self.selected.is_empty() {
            return Vec::new();
        }
        self.stats()
            .into_iter()
            .map(|stat| TableRow {
                label: stat.label,
                description: stat.description,
                cells: self.selected.iter().map(|s| stat.value(s)).collect(),
            })
            .collect()
    }

    pub fn axis_labels(&self) -> (&'static str, &'static str) {
        let label = |key: &'static str| stats::find_stat::<T>(key).map_or(key, |s| s.label);
        (label(self.scatter_x), label(self.scatter_y))
    }
}

fn next_stat_key<T: StatSubject>(current: &str) -> &'static str {
    let catalog = T::stat_catalog();
    let idx = catalog
        .iter()
        .position(|s| s.key == current)
        .map(|i| (i + 1) % catalog.len())
        .unwrap_or(0);
    catalog.get(idx).map_or("", |s| s.key)
}
