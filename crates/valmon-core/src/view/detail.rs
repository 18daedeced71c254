//! Detail panel view model.

use crate::document::RECENT_SLASH_HEIGHT;
use crate::expand::DetailPanel;
use crate::fmt;

/// Rendered content of a detail panel.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailBody {
    /// Header row plus data rows. May have zero data rows.
    Table {
        headers: Vec<&'static str>,
        rows: Vec<Vec<String>>,
    },
    /// Label/value pairs.
    Fields(Vec<(&'static str, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub body: DetailBody,
}

impl DetailView {
    /// Content lines, without borders.
    pub fn content_height(&self) -> u16 {
        let lines = match &self.body {
            DetailBody::Table { rows, .. } => rows.len() + 1,
            DetailBody::Fields(fields) => fields.len(),
        };
        u16::try_from(lines).unwrap_or(u16::MAX)
    }
}

/// Builds the panel for `valoper`'s expanded row.
pub fn build_detail_view(panel: &DetailPanel, valoper: &str) -> DetailView {
    match panel {
        DetailPanel::Slashes { events, recent } => DetailView {
            title: if *recent {
                format!("Jails above height {} · {}", RECENT_SLASH_HEIGHT, valoper)
            } else {
                format!("Jails · {}", valoper)
            },
            body: DetailBody::Table {
                headers: vec!["HEIGHT", "TIME"],
                rows: events
                    .iter()
                    .map(|e| vec![e.height.to_string(), fmt::format_slash_time(&e.time)])
                    .collect(),
            },
        },
        DetailPanel::Creation(info) => DetailView {
            title: format!("Creation · {}", valoper),
            body: DetailBody::Table {
                headers: vec!["HEIGHT", "TX HASH"],
                rows: vec![vec![info.height.to_string(), info.tx_hash.clone()]],
            },
        },
        DetailPanel::Identity {
            moniker,
            valoper,
            consensus_pubkey,
            wallet,
            wallet_transactions,
            valcons,
            hex,
        } => DetailView {
            title: format!("Identity · {}", valoper),
            body: DetailBody::Fields(vec![
                ("Moniker", moniker.clone()),
                ("Valoper", valoper.clone()),
                ("Consensus pubkey", consensus_pubkey.clone()),
                ("Wallet", wallet.clone()),
                (
                    "Wallet txs",
                    wallet_transactions.map_or_else(|| "-".to_string(), |n| n.to_string()),
                ),
                ("Valcons", valcons.clone()),
                ("Hex", hex.clone()),
            ]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CreationInfo, SlashEvent};

    #[test]
    fn jail_panel_lists_events() {
        let panel = DetailPanel::Slashes {
            events: vec![SlashEvent {
                height: 500_000,
                time: "t1".to_string(),
            }],
            recent: false,
        };
        let view = build_detail_view(&panel, "v1");
        assert_eq!(view.title, "Jails · v1");
        assert_eq!(
            view.body,
            DetailBody::Table {
                headers: vec!["HEIGHT", "TIME"],
                rows: vec![vec!["500000".to_string(), "t1".to_string()]],
            }
        );
        assert_eq!(view.content_height(), 2);
    }

    #[test]
    fn empty_recent_panel_has_header_only() {
        let panel = DetailPanel::Slashes {
            events: vec![],
            recent: true,
        };
        let view = build_detail_view(&panel, "v1");
        assert!(view.title.starts_with("Jails above height 1000000"));
        assert_eq!(view.content_height(), 1);
    }

    #[test]
    fn creation_and_identity() {
        let view = build_detail_view(
            &DetailPanel::Creation(CreationInfo {
                height: 12,
                tx_hash: "ABC".to_string(),
            }),
            "v1",
        );
        assert_eq!(view.content_height(), 2);

        let view = build_detail_view(
            &DetailPanel::Identity {
                moniker: "m".to_string(),
                valoper: "v1".to_string(),
                consensus_pubkey: "pk".to_string(),
                wallet: "w".to_string(),
                wallet_transactions: Some(42),
                valcons: "vc".to_string(),
                hex: "AA".to_string(),
            },
            "v1",
        );
        match view.body {
            DetailBody::Fields(fields) => {
                assert_eq!(fields.len(), 7);
                assert_eq!(fields[3], ("Wallet txs", "42".to_string()));
                assert_eq!(fields[6], ("Hex", "AA".to_string()));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
