//! # Action Kinds
//!
//! The skill an action records. Stored values are the Spanish scouting labels
//! (`saque`, `recepción`, ...); anything else is kept verbatim as [`ActionKind::Other`].

use std::fmt;

use serde::{Serialize, Serializer};

/// Kind of a scouted action.
///
/// The derived ordering is the canonical display order: serve, reception, set, attack,
/// block, dig, then unknown kinds alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    Serve,
    Reception,
    Set,
    Attack,
    Block,
    Dig,
    Other(String),
}

impl ActionKind {
    /// Known kinds in canonical order.
    pub const KNOWN: [ActionKind; 6] = [
        ActionKind::Serve,
        ActionKind::Reception,
        ActionKind::Set,
        ActionKind::Attack,
        ActionKind::Block,
        ActionKind::Dig,
    ];

    /// Parse a stored `tipo_accion` value. Accent-less spellings are accepted.
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "saque" => ActionKind::Serve,
            "recepción" | "recepcion" => ActionKind::Reception,
            "colocación" | "colocacion" => ActionKind::Set,
            "atacar" | "ataque" => ActionKind::Attack,
            "bloqueo" => ActionKind::Block,
            "defensa" => ActionKind::Dig,
            _ => ActionKind::Other(normalized),
        }
    }

    /// Value as stored in the database.
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::Serve => "saque",
            ActionKind::Reception => "recepción",
            ActionKind::Set => "colocación",
            ActionKind::Attack => "atacar",
            ActionKind::Block => "bloqueo",
            ActionKind::Dig => "defensa",
            ActionKind::Other(raw) => raw,
        }
    }

    /// English label for charts.
    pub fn label(&self) -> &str {
        match self {
            ActionKind::Serve => "Serve",
            ActionKind::Reception => "Reception",
            ActionKind::Set => "Set",
            ActionKind::Attack => "Attack",
            ActionKind::Block => "Block",
            ActionKind::Dig => "Dig",
            ActionKind::Other(raw) => raw,
        }
    }

    /// Whether a `#` on this kind wins the rally directly.
    pub fn scores_directly(&self) -> bool {
        matches!(self, ActionKind::Attack | ActionKind::Serve | ActionKind::Block)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl Serialize for ActionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> { serializer.serialize_str(self.as_str()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        for kind in ActionKind::KNOWN {
            assert_eq!(ActionKind::parse(kind.as_str()), kind);
        }
        assert_eq!(ActionKind::parse("Recepcion"), ActionKind::Reception);
        assert_eq!(ActionKind::parse(" atacar "), ActionKind::Attack);
    }

    #[test]
    fn test_unknown_kind_kept() {
        assert_eq!(ActionKind::parse("Falta"), ActionKind::Other("falta".to_string()));
        assert_eq!(ActionKind::parse("falta").as_str(), "falta");
    }

    #[test]
    fn test_canonical_order() {
        let mut kinds = vec![
            ActionKind::Other("b".to_string()),
            ActionKind::Dig,
            ActionKind::Other("a".to_string()),
            ActionKind::Attack,
            ActionKind::Serve,
        ];
        kinds.sort();
        assert_eq!(kinds, vec![
            ActionKind::Serve,
            ActionKind::Attack,
            ActionKind::Dig,
            ActionKind::Other("a".to_string()),
            ActionKind::Other("b".to_string()),
        ]);
    }

    #[test]
    fn test_direct_point_kinds() {
        assert!(ActionKind::Attack.scores_directly());
        assert!(ActionKind::Block.scores_directly());
        assert!(!ActionKind::Reception.scores_directly());
    }

    #[test]
    fn test_serializes_as_stored_value() {
        assert_eq!(serde_json::to_string(&ActionKind::Set).unwrap(), "\"colocación\"");
    }
}
