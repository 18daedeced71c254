//! Validators table view model.

use crate::expand::Trigger;
use crate::fmt;
use crate::rows::{DisplayRow, RowHandle};
use crate::table::TableState;
use crate::view::common::{ColumnSpec, RowStyleClass, TableViewModel, ViewCell, ViewRow};

const fn column(title: &'static str, width: u16, sortable: bool, trigger: Option<Trigger>) -> ColumnSpec {
    ColumnSpec {
        title,
        width,
        sortable,
        trigger,
    }
}

/// Fixed column order of the validators table.
pub const VALIDATOR_COLUMNS: &[ColumnSpec] = &[
    column("#", 5, false, None),
    column("VALOPER", 52, true, Some(Trigger::Identity)),
    column("UPTIME%", 8, true, None),
    column("ACTIVE", 10, true, None),
    column("SIGNED", 10, true, None),
    column("MISSED", 9, true, None),
    column("PROPOSED", 9, true, None),
    column("JAILS", 6, true, Some(Trigger::Jails)),
    column("DELEGS", 7, true, None),
    column("JAILS>1M", 9, true, Some(Trigger::RecentJails)),
    column("CREATED", 10, true, Some(Trigger::Creation)),
];

/// Green for a clean record, red for any jail.
pub fn jail_style(jails: usize) -> RowStyleClass {
    if jails == 0 {
        RowStyleClass::Positive
    } else {
        RowStyleClass::Negative
    }
}

fn cells(row: &DisplayRow, rank: usize) -> Vec<ViewCell> {
    vec![
        ViewCell::plain(rank.to_string()),
        ViewCell::plain(row.valoper.clone()),
        ViewCell::plain(fmt::format_uptime(row.uptime)),
        ViewCell::plain(row.active.to_string()),
        ViewCell::plain(row.signed.to_string()),
        ViewCell::plain(row.missed.to_string()),
        ViewCell::plain(row.proposed.to_string()),
        ViewCell::styled(row.jails.to_string(), jail_style(row.jails)),
        ViewCell::plain(row.delegators.to_string()),
        ViewCell::plain(row.recent_jails.to_string()),
        match row.creation_height {
            Some(h) => ViewCell::plain(h.to_string()),
            None => ViewCell::styled("-".to_string(), RowStyleClass::Dimmed),
        },
    ]
}

/// Builds the current page of the validators table.
///
/// Filtering and sorting come from `state`. The rank cell and the jail color
/// are stamped here, per visible row, so they always reflect the arrangement
/// being displayed: rank is the 1-based visual position including the page
/// offset.
pub fn build_validators_view(
    rows: &[DisplayRow],
    state: &TableState<RowHandle>,
) -> TableViewModel<RowHandle> {
    let arranged = state.arrange(rows);
    let range = state.page_range(arranged.len());
    let offset = range.start;

    let view_rows = arranged[range]
        .iter()
        .enumerate()
        .map(|(i, row)| ViewRow {
            id: row.handle,
            cells: cells(row, offset + i + 1),
            style: RowStyleClass::Normal,
        })
        .collect();

    let title = match state.filter.as_deref() {
        Some(f) => format!("Validators ({}/{}) filter: {}", arranged.len(), rows.len(), f),
        None => format!("Validators ({})", rows.len()),
    };

    TableViewModel {
        title,
        columns: VALIDATOR_COLUMNS,
        rows: view_rows,
        sort: state.sort,
        matched: arranged.len(),
        total: rows.len(),
        page: state.page,
        page_count: state.page_count(arranged.len()),
    }
}
