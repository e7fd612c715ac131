use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Add thread_id to campaign_creators. The assistant-based WhatsApp flow
/// stores its conversation thread handle here; the outreach pipeline never
/// writes this column.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(CampaignCreator::Table)
                    .add_column(ColumnDef::new(CampaignCreator::ThreadId).string().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(CampaignCreator::Table)
                    .drop_column(CampaignCreator::ThreadId)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum CampaignCreator {
    Table,
    ThreadId,
}
