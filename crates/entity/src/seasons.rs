//! Seasons Entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "temporadas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:     i32,
    #[sea_orm(column_name = "nombre")]
    pub name:   String,
    #[sea_orm(column_name = "activa")]
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::phases::Entity")]
    Phases,
    #[sea_orm(has_many = "super::matches::Entity")]
    Matches,
}

impl Related<super::phases::Entity> for Entity {
    fn to() -> RelationDef { Relation::Phases.def() }
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef { Relation::Matches.def() }
}

impl ActiveModelBehavior for ActiveModel {}
