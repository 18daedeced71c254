//! Row detail expansion.
//!
//! At most one row shows a detail panel at a time. The state lives in a single
//! [`Expansion`] slot and only changes through [`transition`] and [`collapse`],
//! which return the render commands a frontend applies to its panel slot.

use crate::document::{CreationInfo, SlashEvent, ValidatorRecord};
use crate::rows::{RowHandle, col};

/// A clickable column that opens a detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Operator cell: key material summary.
    Identity,
    /// Jail count cell: full slash history.
    Jails,
    /// Filtered jail count cell: slashes above the recent height.
    RecentJails,
    /// Creation cell: creation block and transaction.
    Creation,
}

impl Trigger {
    /// Triggers in column order.
    pub const ALL: [Trigger; 4] = [
        Trigger::Identity,
        Trigger::Jails,
        Trigger::RecentJails,
        Trigger::Creation,
    ];

    pub fn column(self) -> usize {
        match self {
            Trigger::Identity => col::VALOPER,
            Trigger::Jails => col::JAILS,
            Trigger::RecentJails => col::RECENT_JAILS,
            Trigger::Creation => col::CREATED,
        }
    }

    /// Trigger bound to a table column; `None` for plain data columns.
    pub fn from_column(column: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.column() == column)
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Trigger::Identity => "identity",
            Trigger::Jails => "jails",
            Trigger::RecentJails => "recent jails",
            Trigger::Creation => "creation",
        }
    }
}

/// Detail payload rendered beneath a row.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPanel {
    /// Height/time table in source order. `recent` marks the filtered view,
    /// which may be empty.
    Slashes { events: Vec<SlashEvent>, recent: bool },
    Creation(CreationInfo),
    Identity {
        moniker: String,
        valoper: String,
        consensus_pubkey: String,
        wallet: String,
        /// Transaction count of the wallet, when the indexer fetched it.
        wallet_transactions: Option<u64>,
        valcons: String,
        hex: String,
    },
}

/// Detail payload for `trigger`, or `None` when the record has nothing to show.
pub fn detail_for(record: &ValidatorRecord, trigger: Trigger) -> Option<DetailPanel> {
    match trigger {
        Trigger::Jails => {
            let events = record.slash_events().filter(|e| !e.is_empty())?;
            Some(DetailPanel::Slashes {
                events: events.to_vec(),
                recent: false,
            })
        }
        Trigger::RecentJails => {
            record.slash_events().filter(|e| !e.is_empty())?;
            Some(DetailPanel::Slashes {
                events: record.recent_slashes().cloned().collect(),
                recent: true,
            })
        }
        Trigger::Creation => record.creation().cloned().map(DetailPanel::Creation),
        Trigger::Identity => Some(DetailPanel::Identity {
            moniker: record.moniker.clone(),
            valoper: record.valoper.clone(),
            consensus_pubkey: record.consensus_pubkey.clone(),
            wallet: record.wallet.clone(),
            wallet_transactions: record.transactions,
            valcons: record.valcons.clone(),
            hex: record.hex.clone(),
        }),
    }
}

/// Single-slot expansion state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Expansion {
    #[default]
    Collapsed,
    Expanded {
        row: RowHandle,
        trigger: Trigger,
        panel: DetailPanel,
    },
}

impl Expansion {
    pub fn expanded_row(&self) -> Option<RowHandle> {
        match self {
            Expansion::Collapsed => None,
            Expansion::Expanded { row, .. } => Some(*row),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self, Expansion::Collapsed)
    }
}

/// Instruction for the frontend's panel slot.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Hide(RowHandle),
    Show(RowHandle, DetailPanel),
}

/// Applies a click on `trigger` of `row`.
///
/// Clicking the expanded row again (any trigger) collapses it. Clicking
/// another row hides the open panel first, then opens the new one if it has
/// detail data; an empty detail leaves the view collapsed.
pub fn transition(
    state: &Expansion,
    row: RowHandle,
    trigger: Trigger,
    record: &ValidatorRecord,
) -> (Expansion, Vec<RenderCommand>) {
    let mut commands = Vec::new();
    if let Some(open) = state.expanded_row() {
        commands.push(RenderCommand::Hide(open));
        if open == row {
            return (Expansion::Collapsed, commands);
        }
    }

    match detail_for(record, trigger) {
        Some(panel) => {
            commands.push(RenderCommand::Show(row, panel.clone()));
            (
                Expansion::Expanded {
                    row,
                    trigger,
                    panel,
                },
                commands,
            )
        }
        None => (Expansion::Collapsed, commands),
    }
}

/// Closes whatever is open.
pub fn collapse(state: &Expansion) -> (Expansion, Vec<RenderCommand>) {
    let commands = state
        .expanded_row()
        .map(RenderCommand::Hide)
        .into_iter()
        .collect();
    (Expansion::Collapsed, commands)
}

/// The one place a detail panel can be mounted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelSlot {
    mounted: Option<(RowHandle, DetailPanel)>,
}

impl PanelSlot {
    pub fn apply(&mut self, commands: Vec<RenderCommand>) {
        for cmd in commands {
            match cmd {
                RenderCommand::Hide(row) => {
                    if self.row() == Some(row) {
                        self.mounted = None;
                    }
                }
                RenderCommand::Show(row, panel) => self.mounted = Some((row, panel)),
            }
        }
    }

    pub fn row(&self) -> Option<RowHandle> {
        self.mounted.as_ref().map(|(row, _)| *row)
    }

    pub fn panel(&self) -> Option<&DetailPanel> {
        self.mounted.as_ref().map(|(_, panel)| panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MetricsDocument;

    fn records() -> Vec<ValidatorRecord> {
        MetricsDocument::from_slice(
            br#"{"validators":[
                {"valoper":"v1","moniker":"one","slashes":[{"height":"500000","time":"t1"}]},
                {"valoper":"v2","slashes":[{"height":1500000,"time":"a"},{"height":10,"time":"b"}],
                 "validator_creation_info":{"height":77,"tx_hash":"FF"}},
                {"valoper":"v3"}
            ]}"#,
        )
        .unwrap()
        .validators
    }

    #[test]
    fn worked_example_panels() {
        let recs = records();
        assert_eq!(
            detail_for(&recs[0], Trigger::Jails),
            Some(DetailPanel::Slashes {
                events: vec![SlashEvent {
                    height: 500_000,
                    time: "t1".to_string()
                }],
                recent: false
            })
        );
        assert_eq!(
            detail_for(&recs[0], Trigger::RecentJails),
            Some(DetailPanel::Slashes {
                events: vec![],
                recent: true
            })
        );
    }

    #[test]
    fn recent_jails_keep_source_order() {
        let recs = records();
        match detail_for(&recs[1], Trigger::RecentJails) {
            Some(DetailPanel::Slashes { events, recent }) => {
                assert!(recent);
                assert_eq!(events.len(), 1);
                assert_eq!(events[0].height, 1_500_000);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn identity_carries_wallet_transactions() {
        let rec = ValidatorRecord {
            valoper: "v".to_string(),
            transactions: Some(7),
            ..Default::default()
        };
        match detail_for(&rec, Trigger::Identity) {
            Some(DetailPanel::Identity {
                wallet_transactions,
                ..
            }) => assert_eq!(wallet_transactions, Some(7)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_detail_is_a_noop() {
        let recs = records();
        for trigger in [Trigger::Jails, Trigger::RecentJails, Trigger::Creation] {
            let (state, cmds) = transition(&Expansion::Collapsed, RowHandle(2), trigger, &recs[2]);
            assert_eq!(state, Expansion::Collapsed);
            assert!(cmds.is_empty());
        }
        assert!(detail_for(&recs[2], Trigger::Identity).is_some());
    }

    #[test]
    fn same_cell_twice_collapses() {
        let recs = records();
        let (s1, c1) = transition(&Expansion::Collapsed, RowHandle(0), Trigger::Jails, &recs[0]);
        assert_eq!(s1.expanded_row(), Some(RowHandle(0)));
        assert_eq!(c1.len(), 1);
        let (s2, c2) = transition(&s1, RowHandle(0), Trigger::Jails, &recs[0]);
        assert!(s2.is_collapsed());
        assert_eq!(c2, vec![RenderCommand::Hide(RowHandle(0))]);
    }

    #[test]
    fn same_row_other_trigger_collapses() {
        let recs = records();
        let (s1, _) = transition(&Expansion::Collapsed, RowHandle(1), Trigger::Jails, &recs[1]);
        let (s2, _) = transition(&s1, RowHandle(1), Trigger::Creation, &recs[1]);
        assert!(s2.is_collapsed());
    }

    #[test]
    fn other_row_hides_then_shows() {
        let recs = records();
        let (s1, _) = transition(&Expansion::Collapsed, RowHandle(0), Trigger::Identity, &recs[0]);
        let (s2, cmds) = transition(&s1, RowHandle(1), Trigger::Creation, &recs[1]);
        assert_eq!(s2.expanded_row(), Some(RowHandle(1)));
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0], RenderCommand::Hide(RowHandle(0)));
        assert!(matches!(
            &cmds[1],
            RenderCommand::Show(RowHandle(1), DetailPanel::Creation(c)) if c.height == 77
        ));

        // empty detail on the new row still hides the old panel
        let (s3, cmds) = transition(&s2, RowHandle(2), Trigger::Jails, &recs[2]);
        assert!(s3.is_collapsed());
        assert_eq!(cmds, vec![RenderCommand::Hide(RowHandle(1))]);
    }

    #[test]
    fn collapse_hides_open_panel() {
        let recs = records();
        assert!(collapse(&Expansion::Collapsed).1.is_empty());
        let (s1, _) = transition(&Expansion::Collapsed, RowHandle(0), Trigger::Jails, &recs[0]);
        let (s2, cmds) = collapse(&s1);
        assert!(s2.is_collapsed());
        assert_eq!(cmds, vec![RenderCommand::Hide(RowHandle(0))]);
    }

    #[test]
    fn slot_tracks_state_for_any_click_sequence() {
        let recs = records();
        let mut state = Expansion::Collapsed;
        let mut slot = PanelSlot::default();
        // small LCG keeps the sequence deterministic
        let mut seed: u64 = 0x5eed;
        for _ in 0..500 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let row = ((seed >> 33) % 3) as usize;
            let trigger = Trigger::ALL[((seed >> 40) % 4) as usize];
            let (next, cmds) = transition(&state, RowHandle(row), trigger, &recs[row]);
            let shows = cmds
                .iter()
                .filter(|c| matches!(c, RenderCommand::Show(..)))
                .count();
            assert!(shows <= 1);
            slot.apply(cmds);
            state = next;
            assert_eq!(slot.row(), state.expanded_row());
            if let Expansion::Expanded { panel, .. } = &state {
                assert_eq!(slot.panel(), Some(panel));
            }
        }
    }

    #[test]
    fn trigger_columns_round_trip() {
        for t in Trigger::ALL {
            assert_eq!(Trigger::from_column(t.column()), Some(t));
            assert_eq!(t.next().prev(), t);
        }
        assert_eq!(Trigger::from_column(col::UPTIME), None);
        assert_eq!(Trigger::Creation.next(), Trigger::Identity);
    }
}
