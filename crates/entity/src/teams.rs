//! Teams Entity
//!
//! A club squad. Several squads of the same club share a name and are told apart
//! by their letter code.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "equipos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:     i32,
    #[sea_orm(column_name = "nombre")]
    pub name:   String,
    #[sea_orm(column_name = "equipo_letra")]
    pub letter: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::players::Entity")]
    Players,
    #[sea_orm(has_many = "super::matches::Entity")]
    Matches,
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef { Relation::Players.def() }
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef { Relation::Matches.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Name shown in selectors: `"{name} {letter}"`, or just the name without a letter.
    pub fn display_name(&self) -> String {
        match self.letter.as_deref().map(str::trim) {
            Some(letter) if !letter.is_empty() => format!("{} {}", self.name, letter),
            _ => self.name.clone(),
        }
    }
}
