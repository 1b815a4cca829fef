use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::ProfileName).string().null())
                    .col(ColumnDef::new(Users::AvatarUrl).string().null())
                    .col(
                        ColumnDef::new(Users::DaysRemaining)
                            .integer()
                            .not_null()
                            .default(90),
                    )
                    .col(ColumnDef::new(Users::Level).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Users::TotalProjectsCompleted)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建项目模板表
        manager
            .create_table(
                Table::create()
                    .table(ProjectTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectTemplates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectTemplates::Title).string().not_null())
                    .col(
                        ColumnDef::new(ProjectTemplates::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectTemplates::Objectives)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectTemplates::Specifications)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectTemplates::Exercises).text().not_null())
                    .col(
                        ColumnDef::new(ProjectTemplates::ResourceLinks)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectTemplates::DemoVideoUrl)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(ProjectTemplates::Size).string().not_null())
                    .col(
                        ColumnDef::new(ProjectTemplates::SequenceOrder)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ProjectTemplates::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectTemplates::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectTemplates::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProjectTemplates::Table, ProjectTemplates::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建任务表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::TemplateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Status).string().not_null())
                    .col(ColumnDef::new(Assignments::RepoUrl).string().null())
                    .col(ColumnDef::new(Assignments::SubmittedAt).big_integer().null())
                    .col(
                        ColumnDef::new(Assignments::StaffValidatorId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Assignments::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::TemplateId)
                            .to(ProjectTemplates::Table, ProjectTemplates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一学员对同一模板只能有一个任务，保证晋级幂等
        manager
            .create_index(
                Index::create()
                    .name("idx-assignments-template-student")
                    .table(Assignments::Table)
                    .col(Assignments::TemplateId)
                    .col(Assignments::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建可用时段表
        manager
            .create_table(
                Table::create()
                    .table(AvailabilitySlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AvailabilitySlots::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AvailabilitySlots::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilitySlots::StartAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilitySlots::EndAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilitySlots::Booked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(AvailabilitySlots::BookedBy).big_integer().null())
                    .col(ColumnDef::new(AvailabilitySlots::ProjectId).big_integer().null())
                    .col(
                        ColumnDef::new(AvailabilitySlots::AssignmentId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilitySlots::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AvailabilitySlots::Table, AvailabilitySlots::EvaluatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-availability-slots-evaluator-start")
                    .table(AvailabilitySlots::Table)
                    .col(AvailabilitySlots::EvaluatorId)
                    .col(AvailabilitySlots::StartAt)
                    .to_owned(),
            )
            .await?;

        // 创建评审记录表
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::StudentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Evaluations::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::SlotId).big_integer().not_null())
                    .col(ColumnDef::new(Evaluations::Status).string().not_null())
                    .col(ColumnDef::new(Evaluations::Assiduity).text().null())
                    .col(ColumnDef::new(Evaluations::Comprehension).text().null())
                    .col(ColumnDef::new(Evaluations::SpecAdherence).text().null())
                    .col(ColumnDef::new(Evaluations::ConceptMastery).text().null())
                    .col(ColumnDef::new(Evaluations::Explanation).text().null())
                    .col(ColumnDef::new(Evaluations::SubmittedAt).big_integer().null())
                    .col(ColumnDef::new(Evaluations::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::EvaluatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 每个 (任务, 评审人) 只允许一条评审记录
        manager
            .create_index(
                Index::create()
                    .name("idx-evaluations-assignment-evaluator")
                    .table(Evaluations::Table)
                    .col(Evaluations::AssignmentId)
                    .col(Evaluations::EvaluatorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建徽章目录表
        manager
            .create_table(
                Table::create()
                    .table(Badges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Badges::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Badges::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Badges::Description).text().not_null())
                    .col(ColumnDef::new(Badges::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建用户徽章关联表
        manager
            .create_table(
                Table::create()
                    .table(UserBadges::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserBadges::UserId).big_integer().not_null())
                    .col(ColumnDef::new(UserBadges::BadgeId).big_integer().not_null())
                    .col(ColumnDef::new(UserBadges::AwardedAt).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserBadges::UserId)
                            .col(UserBadges::BadgeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserBadges::Table, UserBadges::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserBadges::Table, UserBadges::BadgeId)
                            .to(Badges::Table, Badges::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建通知表
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Notifications::NotificationType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Content).text().not_null())
                    .col(ColumnDef::new(Notifications::ReferenceType).string().null())
                    .col(ColumnDef::new(Notifications::ReferenceId).big_integer().null())
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserBadges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Badges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AvailabilitySlots::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectTemplates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    ProfileName,
    AvatarUrl,
    DaysRemaining,
    Level,
    TotalProjectsCompleted,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProjectTemplates {
    Table,
    Id,
    Title,
    Description,
    Objectives,
    Specifications,
    Exercises,
    ResourceLinks,
    DemoVideoUrl,
    Size,
    SequenceOrder,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    Table,
    Id,
    TemplateId,
    StudentId,
    Status,
    RepoUrl,
    SubmittedAt,
    StaffValidatorId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AvailabilitySlots {
    Table,
    Id,
    EvaluatorId,
    StartAt,
    EndAt,
    Booked,
    BookedBy,
    ProjectId,
    AssignmentId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Evaluations {
    Table,
    Id,
    AssignmentId,
    StudentId,
    EvaluatorId,
    SlotId,
    Status,
    Assiduity,
    Comprehension,
    SpecAdherence,
    ConceptMastery,
    Explanation,
    SubmittedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Badges {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserBadges {
    Table,
    UserId,
    BadgeId,
    AwardedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    UserId,
    Id,
    NotificationType,
    Title,
    Content,
    ReferenceType,
    ReferenceId,
    IsRead,
    CreatedAt,
}
