//! Players Entity
//!
//! Players belong to one team. Inactive players are hidden from selectors but their
//! logged actions still count.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "jugadores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:         i32,
    #[sea_orm(column_name = "apellido")]
    pub surname:    String,
    #[sea_orm(column_name = "nombre")]
    pub first_name: Option<String>,
    #[sea_orm(column_name = "dorsal")]
    pub number:     Option<i32>,
    #[sea_orm(column_name = "posicion")]
    pub position:   Option<String>,
    #[sea_orm(column_name = "equipo_id")]
    pub team_id:    i32,
    #[sea_orm(column_name = "activo")]
    pub active:     bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::TeamId",
        to = "super::teams::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Team,
    #[sea_orm(has_many = "super::actions::Entity")]
    Actions,
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef { Relation::Team.def() }
}

impl Related<super::actions::Entity> for Entity {
    fn to() -> RelationDef { Relation::Actions.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Surname followed by the first name when known.
    pub fn display_name(&self) -> String {
        match self.first_name.as_deref().map(str::trim) {
            Some(first) if !first.is_empty() => format!("{} {}", self.surname, first),
            _ => self.surname.clone(),
        }
    }

    /// Selector label, e.g. `"Garcia Laia (#7)"` or `"Garcia (#-)"`.
    pub fn label(&self) -> String {
        let number = self
            .number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!("{} (#{})", self.display_name(), number)
    }
}
