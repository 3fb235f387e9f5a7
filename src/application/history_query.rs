// History query pipeline - Filter, sort, group and paginate history records
use crate::domain::history::HistoryRecord;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const ALL_RECORDS_GROUP: &str = "All Records";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    None,
    Vessel,
    Date,
    SpeedRange,
}

impl GroupBy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(GroupBy::None),
            "vessel" => Some(GroupBy::Vessel),
            "date" => Some(GroupBy::Date),
            "speed-range" => Some(GroupBy::SpeedRange),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Timestamp,
    Vessel,
    Speed,
    Heading,
}

impl SortBy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "timestamp" => Some(SortBy::Timestamp),
            "vessel" => Some(SortBy::Vessel),
            "speed" => Some(SortBy::Speed),
            "heading" => Some(SortBy::Heading),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Filter input that could not be used and was treated as "no filter".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterWarning {
    #[error("ignored non-numeric {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("ignored malformed {field} '{value}', expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error("ignored unknown {field} '{value}'")]
    UnknownOption { field: &'static str, value: String },
}

/// Raw, user-supplied query options. Everything is optional text so that bad
/// input degrades to "no filter" instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQueryParams {
    /// Comma-separated vessel ids
    pub vessels: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub speed_min: Option<String>,
    pub speed_max: Option<String>,
    pub search: Option<String>,
    pub group_by: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryQuery {
    /// Empty means all vessels
    pub vessels: HashSet<String>,
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound
    pub date_to: Option<DateTime<Utc>>,
    pub speed_min: Option<f64>,
    pub speed_max: Option<f64>,
    /// Stored lowercased
    pub search_text: Option<String>,
    pub group_by: GroupBy,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Midnight of `date` in the display offset, as UTC. `None` when the bound
/// falls outside the representable range.
pub fn day_start(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let local_midnight = date.and_time(NaiveTime::MIN);
    local_midnight
        .checked_sub_signed(Duration::seconds(offset.local_minus_utc() as i64))
        .map(|utc| utc.and_utc())
}

/// Last millisecond of `date` in the display offset, as UTC.
pub fn day_end(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    day_start(date, offset)?
        .checked_add_signed(Duration::days(1))?
        .checked_sub_signed(Duration::milliseconds(1))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn parse_speed(
    field: &'static str,
    value: &Option<String>,
    warnings: &mut Vec<FilterWarning>,
) -> Option<f64> {
    let raw = non_empty(value)?;
    match raw.trim().parse::<f64>() {
        Ok(speed) if speed.is_finite() => Some(speed),
        _ => {
            warnings.push(FilterWarning::InvalidNumber {
                field,
                value: raw.to_string(),
            });
            None
        }
    }
}

/// Parse a filter day and resolve it to a UTC bound with `bound`. Input that
/// does not parse, or whose bound overflows, becomes a warning.
fn parse_day(
    field: &'static str,
    value: &Option<String>,
    offset: FixedOffset,
    bound: fn(NaiveDate, FixedOffset) -> Option<DateTime<Utc>>,
    warnings: &mut Vec<FilterWarning>,
) -> Option<DateTime<Utc>> {
    let raw = non_empty(value)?;
    let resolved = parse_date(raw).and_then(|date| bound(date, offset));
    if resolved.is_none() {
        warnings.push(FilterWarning::InvalidDate {
            field,
            value: raw.to_string(),
        });
    }
    resolved
}

fn parse_option<T: Default>(
    field: &'static str,
    value: &Option<String>,
    parse: fn(&str) -> Option<T>,
    warnings: &mut Vec<FilterWarning>,
) -> T {
    let Some(raw) = non_empty(value) else {
        return T::default();
    };
    parse(raw.trim()).unwrap_or_else(|| {
        warnings.push(FilterWarning::UnknownOption {
            field,
            value: raw.to_string(),
        });
        T::default()
    })
}

impl HistoryQueryParams {
    /// Resolve the raw options. Day boundaries are taken in `offset`.
    pub fn parse(&self, offset: FixedOffset) -> (HistoryQuery, Vec<FilterWarning>) {
        let mut warnings = Vec::new();

        let vessels = self
            .vessels
            .as_deref()
            .map(|ids| {
                ids.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let query = HistoryQuery {
            vessels,
            date_from: parse_day("date_from", &self.date_from, offset, day_start, &mut warnings),
            date_to: parse_day("date_to", &self.date_to, offset, day_end, &mut warnings),
            speed_min: parse_speed("speed_min", &self.speed_min, &mut warnings),
            speed_max: parse_speed("speed_max", &self.speed_max, &mut warnings),
            search_text: self
                .search
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase),
            group_by: parse_option("group_by", &self.group_by, GroupBy::parse, &mut warnings),
            sort_by: parse_option("sort_by", &self.sort_by, SortBy::parse, &mut warnings),
            sort_order: parse_option("sort_order", &self.sort_order, SortOrder::parse, &mut warnings),
        };

        for warning in &warnings {
            tracing::warn!("History filter: {}", warning);
        }

        (query, warnings)
    }
}

impl HistoryQuery {
    /// Every filter is AND-ed, the search text included.
    pub fn matches(&self, record: &HistoryRecord) -> bool {
        if !self.vessels.is_empty() && !self.vessels.contains(&record.vessel_id) {
            return false;
        }

        if let Some(from) = self.date_from {
            if record.timestamp < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if record.timestamp > to {
                return false;
            }
        }

        if let Some(min) = self.speed_min {
            if record.speed < min {
                return false;
            }
        }
        if let Some(max) = self.speed_max {
            if record.speed > max {
                return false;
            }
        }

        if let Some(needle) = &self.search_text {
            return record.vessel_name.to_lowercase().contains(needle)
                || record.vessel_id.to_lowercase().contains(needle);
        }

        true
    }

    /// Filtered and sorted copy of `records`.
    pub fn apply(&self, records: &[HistoryRecord]) -> Vec<HistoryRecord> {
        let mut filtered: Vec<HistoryRecord> =
            records.iter().filter(|r| self.matches(r)).cloned().collect();
        sort_records(&mut filtered, self.sort_by, self.sort_order);
        filtered
    }
}

fn compare(a: &HistoryRecord, b: &HistoryRecord, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Timestamp => a.timestamp.cmp(&b.timestamp),
        SortBy::Vessel => a.vessel_name.cmp(&b.vessel_name),
        SortBy::Speed => a.speed.total_cmp(&b.speed),
        SortBy::Heading => a.heading.total_cmp(&b.heading),
    }
}

pub fn sort_records(records: &mut [HistoryRecord], sort_by: SortBy, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = compare(a, b, sort_by);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

pub fn speed_range_label(speed: f64) -> &'static str {
    if speed < 5.0 {
        "0-5 knots"
    } else if speed < 10.0 {
        "5-10 knots"
    } else if speed < 15.0 {
        "10-15 knots"
    } else if speed < 20.0 {
        "15-20 knots"
    } else {
        "20+ knots"
    }
}

fn group_key(record: &HistoryRecord, group_by: GroupBy, offset: FixedOffset) -> String {
    match group_by {
        GroupBy::None => ALL_RECORDS_GROUP.to_string(),
        GroupBy::Vessel => record.vessel_name.clone(),
        GroupBy::Date => record
            .timestamp
            .with_timezone(&offset)
            .format("%a %b %d %Y")
            .to_string(),
        GroupBy::SpeedRange => speed_range_label(record.speed).to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordGroup {
    pub key: String,
    pub records: Vec<HistoryRecord>,
}

/// Partition records into named groups, ordered by first appearance. Record
/// order inside each group is preserved.
pub fn group_records(
    records: Vec<HistoryRecord>,
    group_by: GroupBy,
    offset: FixedOffset,
) -> Vec<RecordGroup> {
    if group_by == GroupBy::None {
        return vec![RecordGroup {
            key: ALL_RECORDS_GROUP.to_string(),
            records,
        }];
    }

    let mut groups: Vec<RecordGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = group_key(&record, group_by, offset);
        match index.get(&key) {
            Some(&i) => groups[i].records.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(RecordGroup {
                    key,
                    records: vec![record],
                });
            }
        }
    }

    groups
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<HistoryRecord>,
    /// 1-based, clamped to `[1, total_pages]`
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_records: usize,
}

pub fn paginate(records: Vec<HistoryRecord>, page: usize, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total_records = records.len();
    let total_pages = total_records.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let items = records
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        page_size,
        total_pages,
        total_records,
    }
}

/// Pagination applies only to ungrouped views.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryView {
    Paged(Page),
    Grouped {
        groups: Vec<RecordGroup>,
        total_records: usize,
    },
}

impl HistoryView {
    pub fn total_records(&self) -> usize {
        match self {
            HistoryView::Paged(page) => page.total_records,
            HistoryView::Grouped { total_records, .. } => *total_records,
        }
    }
}

pub fn build_view(
    records: &[HistoryRecord],
    query: &HistoryQuery,
    page: usize,
    page_size: usize,
    offset: FixedOffset,
) -> HistoryView {
    let filtered = query.apply(records);

    match query.group_by {
        GroupBy::None => HistoryView::Paged(paginate(filtered, page, page_size)),
        group_by => {
            let total_records = filtered.len();
            HistoryView::Grouped {
                groups: group_records(filtered, group_by, offset),
                total_records,
            }
        }
    }
}
