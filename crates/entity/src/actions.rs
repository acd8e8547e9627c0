//! Actions Entity
//!
//! Point-level events. `tipo_accion` and `marca` are free text in the database and
//! may be NULL; the `stats` crate gives them meaning.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "acciones_new")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:        i32,
    #[sea_orm(column_name = "partido_id")]
    pub match_id:  i32,
    #[sea_orm(column_name = "jugador_id")]
    pub player_id: i32,
    #[sea_orm(column_name = "set_numero")]
    pub set_no:    i32,
    #[sea_orm(column_name = "tipo_accion")]
    pub kind:      Option<String>,
    #[sea_orm(column_name = "marca")]
    pub mark:      Option<String>,
    #[sea_orm(column_name = "zona")]
    pub zone:      Option<String>,
    #[sea_orm(column_name = "rotacion")]
    pub rotation:  Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Match,
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::PlayerId",
        to = "super::players::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Player,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef { Relation::Match.def() }
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef { Relation::Player.def() }
}

impl ActiveModelBehavior for ActiveModel {}
