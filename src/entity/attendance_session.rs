//! Attendance session: one per group and date.
//!
//! No endpoint writes these rows yet; they are read by the history listing
//! and the printable attendance sheet.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub group_id: i32,
    pub date: Date,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::academic_group::Entity",
        from = "Column::GroupId",
        to = "super::academic_group::Column::Id"
    )]
    Group,
    #[sea_orm(has_many = "super::attendance_detail::Entity")]
    Details,
}

impl Related<super::academic_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::attendance_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Details.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
