use sea_orm::sea_query::{Index, IndexCreateStatement, OnConflict, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{category, key_result, roadmap_category, roadmap_item, trail_step};

/// The three fixed categories: (id, name, description).
pub const DEFAULT_CATEGORIES: &[(i32, &str, &str)] = &[
    (
        1,
        "Pessoal",
        "Objetivos relacionados ao seu desenvolvimento pessoal e bem-estar",
    ),
    (
        2,
        "Profissional",
        "Objetivos relacionados à sua carreira e impacto profissional",
    ),
    (
        3,
        "Social",
        "Objetivos relacionados aos seus relacionamentos e conexões sociais",
    ),
];

/// Seed the `category` table. Existing rows (possibly renamed) are left alone.
pub async fn seed_categories(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now();
    let mut inserted = 0u32;
    for &(id, name, description) in DEFAULT_CATEGORIES {
        let model = category::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = category::Entity::insert(model)
            .on_conflict(
                OnConflict::column(category::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} categories", inserted);
    }

    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let indexes: [(&str, IndexCreateStatement); 4] = [
        // Key Results of an Objective in creation order.
        (
            "idx_key_result_objective_created",
            Index::create()
                .if_not_exists()
                .name("idx_key_result_objective_created")
                .table(key_result::Entity)
                .col(key_result::Column::ObjectiveId)
                .col(key_result::Column::CreatedAt)
                .to_owned(),
        ),
        (
            "idx_roadmap_category_roadmap_position",
            Index::create()
                .if_not_exists()
                .name("idx_roadmap_category_roadmap_position")
                .table(roadmap_category::Entity)
                .col(roadmap_category::Column::RoadmapId)
                .col(roadmap_category::Column::Position)
                .to_owned(),
        ),
        (
            "idx_roadmap_item_category_position",
            Index::create()
                .if_not_exists()
                .name("idx_roadmap_item_category_position")
                .table(roadmap_item::Entity)
                .col(roadmap_item::Column::CategoryId)
                .col(roadmap_item::Column::Position)
                .to_owned(),
        ),
        (
            "idx_trail_step_trail_day",
            Index::create()
                .if_not_exists()
                .name("idx_trail_step_trail_day")
                .table(trail_step::Entity)
                .col(trail_step::Column::TrailId)
                .col(trail_step::Column::Day)
                .to_owned(),
        ),
    ];

    for (name, stmt) in indexes {
        match db
            .execute_unprepared(&stmt.to_string(PostgresQueryBuilder))
            .await
        {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}
