//! Phases Entity
//!
//! A stage of a season (league, play-offs). Always owned by exactly one season.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:        i32,
    #[sea_orm(column_name = "nombre")]
    pub name:      String,
    #[sea_orm(column_name = "temporada_id")]
    pub season_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seasons::Entity",
        from = "Column::SeasonId",
        to = "super::seasons::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Season,
    #[sea_orm(has_many = "super::matches::Entity")]
    Matches,
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef { Relation::Season.def() }
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef { Relation::Matches.def() }
}

impl ActiveModelBehavior for ActiveModel {}
