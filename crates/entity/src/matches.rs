//! Matches Entity
//!
//! One played match of a team in a season, optionally tagged with a phase.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "partidos_new")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:          i32,
    #[sea_orm(column_name = "rival")]
    pub opponent:    String,
    #[sea_orm(column_name = "local")]
    pub home:        bool,
    #[sea_orm(column_name = "fecha")]
    pub date:        Date,
    #[sea_orm(column_name = "resultado")]
    pub result:      Option<String>,
    #[sea_orm(column_name = "nombre_archivo")]
    pub source_file: Option<String>,
    #[sea_orm(column_name = "equipo_id")]
    pub team_id:     i32,
    #[sea_orm(column_name = "temporada_id")]
    pub season_id:   i32,
    #[sea_orm(column_name = "fase_id")]
    pub phase_id:    Option<i32>,
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
    #[sea_orm(
        belongs_to = "super::seasons::Entity",
        from = "Column::SeasonId",
        to = "super::seasons::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Season,
    #[sea_orm(
        belongs_to = "super::phases::Entity",
        from = "Column::PhaseId",
        to = "super::phases::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Phase,
    #[sea_orm(has_many = "super::actions::Entity")]
    Actions,
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef { Relation::Team.def() }
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef { Relation::Season.def() }
}

impl Related<super::phases::Entity> for Entity {
    fn to() -> RelationDef { Relation::Phase.def() }
}

impl Related<super::actions::Entity> for Entity {
    fn to() -> RelationDef { Relation::Actions.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Selector label, e.g. `"vs Sant Cugat (home)"`.
    pub fn label(&self) -> String { format!("vs {} ({})", self.opponent, self.venue()) }

    /// `"home"` or `"away"`.
    pub fn venue(&self) -> &'static str {
        if self.home {
            "home"
        }
        else {
            "away"
        }
    }
}
