pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_course_tables;

/// 课程数据表迁移（单元、班级、作业、测试、提交、成绩）
///
/// 单独导出以便重置数据库时只重建课程数据，保留用户账号。
pub use m20250301_000002_create_course_tables::Migration as CourseTables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_course_tables::Migration),
        ]
    }
}
