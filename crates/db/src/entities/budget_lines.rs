//! `SeaORM` Entity for the budget lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub job_id: Uuid,
    pub cost_code_id: Option<Uuid>,
    pub description: String,
    pub phase: Option<String>,
    pub notes: Option<String>,
    pub estimated_amount: Decimal,
    pub committed_amount: Decimal,
    pub actual_amount: Decimal,
    pub projected_amount: Decimal,
    pub variance_amount: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Companies,
    #[sea_orm(
        belongs_to = "super::jobs::Entity",
        from = "Column::JobId",
        to = "super::jobs::Column::Id"
    )]
    Jobs,
    #[sea_orm(
        belongs_to = "super::cost_codes::Entity",
        from = "Column::CostCodeId",
        to = "super::cost_codes::Column::Id"
    )]
    CostCodes,
    #[sea_orm(has_many = "super::change_orders::Entity")]
    ChangeOrders,
}

impl Related<super::jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Jobs.def()
    }
}

impl Related<super::change_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChangeOrders.def()
    }
}

impl Related<super::cost_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CostCodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
