use sea_orm_migration::prelude::*;

mod m20260401_000001_create_parent_auth;
mod m20260401_000002_create_parent_phone_certify;
mod m20260401_000003_create_children;
mod m20260401_000004_create_expenditure;
mod m20260401_000005_create_expenditure_child_tag;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_parent_auth::Migration),
            Box::new(m20260401_000002_create_parent_phone_certify::Migration),
            Box::new(m20260401_000003_create_children::Migration),
            Box::new(m20260401_000004_create_expenditure::Migration),
            Box::new(m20260401_000005_create_expenditure_child_tag::Migration),
        ]
    }
}
