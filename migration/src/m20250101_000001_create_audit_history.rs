use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create audit_history table
        manager
            .create_table(
                Table::create()
                    .table(AuditHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuditHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuditHistory::Url).string().not_null())
                    .col(
                        ColumnDef::new(AuditHistory::PerformanceScore)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AuditHistory::SeoTitle).string())
                    .col(ColumnDef::new(AuditHistory::SeoMetaDescription).text())
                    .col(
                        ColumnDef::new(AuditHistory::AccessibilityIssues)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(AuditHistory::ReportPath).string().not_null())
                    .col(
                        ColumnDef::new(AuditHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_history_url")
                    .table(AuditHistory::Table)
                    .col(AuditHistory::Url)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuditHistory {
    Table,
    Id,
    Url,
    PerformanceScore,
    SeoTitle,
    SeoMetaDescription,
    AccessibilityIssues,
    ReportPath,
    CreatedAt,
}
