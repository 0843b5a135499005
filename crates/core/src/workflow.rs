//! Contract status workflow.
//!
//! A single forward chain with one side exit:
//!
//! ```text
//! CREATED ─► APPROVED ─► SENT ─► SIGNED ─► LOCKED
//!    │                    │
//!    └──────► REVOKED ◄───┘
//! ```
//!
//! LOCKED and REVOKED are terminal. Only CREATED and SENT may be revoked;
//! APPROVED is deliberately not revocable. Field values may be edited in
//! every non-terminal status.

use serde::Serialize;

use crate::types::ContractStatus;

/// Display color for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusColor {
    /// Palette name (slate, blue, ...).
    pub name: &'static str,
    /// CSS hex value.
    pub hex: &'static str,
}

/// Something a user may do with a contract in its current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    View,
    Edit,
    Advance { to: ContractStatus },
    Revoke,
}

impl ContractStatus {
    /// The single successor in the forward chain, or `None` when terminal.
    pub fn next(self) -> Option<ContractStatus> {
        match self {
            ContractStatus::Created => Some(ContractStatus::Approved),
            ContractStatus::Approved => Some(ContractStatus::Sent),
            ContractStatus::Sent => Some(ContractStatus::Signed),
            ContractStatus::Signed => Some(ContractStatus::Locked),
            ContractStatus::Locked | ContractStatus::Revoked => None,
        }
    }

    pub fn can_revoke(self) -> bool {
        matches!(self, ContractStatus::Created | ContractStatus::Sent)
    }

    pub fn can_edit(self) -> bool {
        !matches!(self, ContractStatus::Locked | ContractStatus::Revoked)
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Whether moving from `self` to `to` is a legal single step:
    /// the forward successor, or REVOKED from a revocable status.
    pub fn permits(self, to: ContractStatus) -> bool {
        self.next() == Some(to) || (to == ContractStatus::Revoked && self.can_revoke())
    }

    pub fn color(self) -> StatusColor {
        let (name, hex) = match self {
            ContractStatus::Created => ("slate", "#64748b"),
            ContractStatus::Approved => ("blue", "#2563eb"),
            ContractStatus::Sent => ("amber", "#d97706"),
            ContractStatus::Signed => ("green", "#16a34a"),
            ContractStatus::Locked => ("near-black", "#020617"),
            ContractStatus::Revoked => ("red", "#dc2626"),
        };
        StatusColor { name, hex }
    }

    /// Actions offered for a contract in this status, in display order.
    pub fn actions(self) -> Vec<Action> {
        let mut actions = vec![Action::View];
        if self.can_edit() {
            actions.push(Action::Edit);
        }
        if let Some(to) = self.next() {
            actions.push(Action::Advance { to });
        }
        if self.can_revoke() {
            actions.push(Action::Revoke);
        }
        actions
    }
}

pub fn next_status(status: ContractStatus) -> Option<ContractStatus> {
    status.next()
}

pub fn can_revoke(status: ContractStatus) -> bool {
    status.can_revoke()
}

pub fn can_edit(status: ContractStatus) -> bool {
    status.can_edit()
}

pub fn status_color(status: ContractStatus) -> StatusColor {
    status.color()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::types::ContractStatus::*;

    #[test]
    fn forward_chain_reaches_locked_in_four_steps() {
        let mut status = Created;
        for _ in 0..4 {
            status = next_status(status).unwrap();
        }
        assert_eq!(status, Locked);
        assert_eq!(next_status(status), None);
    }

    #[test]
    fn terminal_states_have_no_successor() {
        let terminal: Vec<_> = ContractStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, vec![Locked, Revoked]);
    }

    #[test]
    fn revoke_only_from_created_or_sent() {
        for status in ContractStatus::ALL {
            assert_eq!(
                can_revoke(status),
                matches!(status, Created | Sent),
                "{status}"
            );
        }
        assert!(!can_revoke(Approved));
    }

    #[test]
    fn edit_allowed_until_terminal() {
        for status in ContractStatus::ALL {
            assert_eq!(can_edit(status), !matches!(status, Locked | Revoked), "{status}");
        }
    }

    #[test]
    fn permits_matches_successor_or_revoke() {
        assert!(Created.permits(Approved));
        assert!(Created.permits(Revoked));
        assert!(!Created.permits(Sent));
        assert!(Approved.permits(Sent));
        assert!(!Approved.permits(Revoked));
        assert!(Sent.permits(Revoked));
        assert!(!Locked.permits(Revoked));
        assert!(!Revoked.permits(Created));
        assert!(!Signed.permits(Signed));
    }

    #[test]
    fn colors_are_distinct() {
        let hexes: HashSet<_> = ContractStatus::ALL.iter().map(|s| s.color().hex).collect();
        assert_eq!(hexes.len(), ContractStatus::ALL.len());
        assert_eq!(status_color(Locked).name, "near-black");
        assert_eq!(status_color(Revoked).hex, "#dc2626");
    }

    #[test]
    fn actions_per_status() {
        assert_eq!(
            Created.actions(),
            vec![Action::View, Action::Edit, Action::Advance { to: Approved }, Action::Revoke]
        );
        assert_eq!(
            Approved.actions(),
            vec![Action::View, Action::Edit, Action::Advance { to: Sent }]
        );
        assert_eq!(Locked.actions(), vec![Action::View]);
        assert_eq!(Revoked.actions(), vec![Action::View]);
    }

    #[test]
    fn action_json_is_tagged() {
        let encoded = serde_json::to_value(Action::Advance { to: Signed }).unwrap();
        assert_eq!(encoded, serde_json::json!({"action": "ADVANCE", "to": "SIGNED"}));
        assert_eq!(
            serde_json::to_value(Action::View).unwrap(),
            serde_json::json!({"action": "VIEW"})
        );
    }
}
