//! Projection of validator records into display rows.

use crate::document::{MetricsDocument, ValidatorRecord};
use crate::table::{SortKey, TableRow};

/// Index of a record in the loaded document. Stable across sorting and
/// filtering; the way back from a display row to its detail data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowHandle(pub usize);

/// Column indices of the validators table.
pub mod col {
    pub const RANK: usize = 0;
    pub const VALOPER: usize = 1;
    pub const UPTIME: usize = 2;
    pub const ACTIVE: usize = 3;
    pub const SIGNED: usize = 4;
    pub const MISSED: usize = 5;
    pub const PROPOSED: usize = 6;
    pub const JAILS: usize = 7;
    pub const DELEGATORS: usize = 8;
    pub const RECENT_JAILS: usize = 9;
    pub const CREATED: usize = 10;
    pub const COUNT: usize = 11;
}

/// Derived, display-only projection of a [`ValidatorRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub handle: RowHandle,
    /// 1-based position in the source document.
    pub rank: usize,
    pub valoper: String,
    pub moniker: String,
    pub uptime: f64,
    pub active: u64,
    pub signed: u64,
    pub missed: u64,
    pub proposed: u64,
    pub jails: usize,
    pub recent_jails: usize,
    pub creation_height: Option<u64>,
    pub delegators: u64,
}

/// Rounds to 2 decimal places, half away from zero.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Share of active blocks that were signed, in percent. Exactly `0.0` when
/// nothing was active.
pub fn uptime_pct(signed: u64, missed: u64) -> f64 {
    let active = signed.saturating_add(missed);
    if active == 0 {
        return 0.0;
    }
    round2(signed as f64 / active as f64 * 100.0)
}

impl DisplayRow {
    pub fn from_record(index: usize, v: &ValidatorRecord) -> Self {
        Self {
            handle: RowHandle(index),
            rank: index + 1,
            valoper: v.valoper.clone(),
            moniker: v.moniker.clone(),
            uptime: uptime_pct(v.total_signed_blocks, v.total_missed_blocks),
            active: v.active_blocks(),
            signed: v.total_signed_blocks,
            missed: v.total_missed_blocks,
            proposed: v.total_proposed_blocks,
            jails: v.jail_count(),
            recent_jails: v.recent_slashes().count(),
            creation_height: v.creation().map(|c| c.height),
            delegators: v.delegators_count,
        }
    }
}

/// Projects every validator, in document order.
pub fn project_rows(doc: &MetricsDocument) -> Vec<DisplayRow> {
    doc.validators
        .iter()
        .enumerate()
        .map(|(i, v)| DisplayRow::from_record(i, v))
        .collect()
}

fn int(v: u64) -> SortKey {
    SortKey::Integer(i64::try_from(v).unwrap_or(i64::MAX))
}

impl TableRow for DisplayRow {
    type Id = RowHandle;

    fn id(&self) -> RowHandle {
        self.handle
    }

    fn column_count() -> usize {
        col::COUNT
    }

    fn is_sortable(column: usize) -> bool {
        column != col::RANK && column < col::COUNT
    }

    fn sort_key(&self, column: usize) -> SortKey {
        match column {
            col::VALOPER => SortKey::String(self.valoper.to_lowercase()),
            col::UPTIME => SortKey::Float(self.uptime),
            col::ACTIVE => int(self.active),
            col::SIGNED => int(self.signed),
            col::MISSED => int(self.missed),
            col::PROPOSED => int(self.proposed),
            col::JAILS => int(self.jails as u64),
            col::DELEGATORS => int(self.delegators),
            col::RECENT_JAILS => int(self.recent_jails as u64),
            // absent creation info sorts below height 0
            col::CREATED => SortKey::Integer(self.creation_height.map_or(-1, |h| {
                i64::try_from(h).unwrap_or(i64::MAX)
            })),
            _ => SortKey::Integer(self.rank as i64),
        }
    }

    fn matches_filter(&self, filter: &str) -> bool {
        let f = filter.to_lowercase();
        self.valoper.to_lowercase().contains(&f) || self.moniker.to_lowercase().contains(&f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> MetricsDocument {
        MetricsDocument::from_slice(json.as_bytes()).unwrap()
    }

    #[test]
    fn worked_example_row() {
        let rows = project_rows(&doc(
            r#"{"validators":[{"valoper":"v1","total_signed_blocks":90,
                "total_missed_blocks":10,"total_proposed_blocks":5,"delegators_count":3,
                "slashes":[{"height":"500000","time":"t1"}]}]}"#,
        ));
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.rank, 1);
        assert_eq!(r.valoper, "v1");
        assert_eq!(r.uptime, 90.0);
        assert_eq!(r.active, 100);
        assert_eq!((r.signed, r.missed, r.proposed), (90, 10, 5));
        assert_eq!(r.jails, 1);
        assert_eq!(r.recent_jails, 0);
        assert_eq!(r.delegators, 3);
        assert_eq!(r.creation_height, None);
    }

    #[test]
    fn zero_active_is_zero_uptime() {
        assert_eq!(uptime_pct(0, 0), 0.0);
        let rows = project_rows(&doc(r#"{"validators":[{"valoper":"idle"}]}"#));
        assert_eq!(rows[0].uptime, 0.0);
        assert!(!rows[0].uptime.is_nan());
    }

    #[test]
    fn uptime_bounds_and_rounding() {
        assert_eq!(uptime_pct(1, 2), 33.33);
        assert_eq!(uptime_pct(2, 1), 66.67);
        assert_eq!(uptime_pct(5, 0), 100.0);
        assert_eq!(uptime_pct(0, 5), 0.0);
        for (s, m) in [(1, 999_999), (7, 3), (999_999, 1), (u64::MAX, 1)] {
            let u = uptime_pct(s, m);
            assert!((0.0..=100.0).contains(&u), "{s}/{m} -> {u}");
            assert_eq!(round2(u), u);
        }
    }

    #[test]
    fn rank_follows_document_order() {
        let rows = project_rows(&doc(
            r#"{"validators":[{"valoper":"a"},{"valoper":"b"},{"valoper":"c"}]}"#,
        ));
        let ranks: Vec<_> = rows.iter().map(|r| (r.rank, r.handle)).collect();
        assert_eq!(
            ranks,
            vec![(1, RowHandle(0)), (2, RowHandle(1)), (3, RowHandle(2))]
        );
    }

    #[test]
    fn filter_matches_valoper_or_moniker() {
        let rows = project_rows(&doc(
            r#"{"validators":[{"valoper":"osmovaloper1xyz","moniker":"Alpha Node"}]}"#,
        ));
        assert!(rows[0].matches_filter("XYZ"));
        assert!(rows[0].matches_filter("alpha"));
        assert!(!rows[0].matches_filter("beta"));
    }

    #[test]
    fn rank_is_not_sortable() {
        assert!(!DisplayRow::is_sortable(col::RANK));
        assert!((1..col::COUNT).all(DisplayRow::is_sortable));
    }
}
