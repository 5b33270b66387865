mod assignments;
mod auth;
mod classes;
mod results;
mod submissions;
mod system;
mod units;

use async_graphql::MergedObject;

#[derive(Default, MergedObject)]
pub struct Mutation(
    pub units::UnitMutation,
    pub classes::ClassMutation,
    pub assignments::AssignmentMutation,
    pub tests::TestMutation,
    pub submissions::SubmissionMutation,
    pub results::ResultMutation,
    pub auth::AuthMutation,
    pub system::SystemMutation,
);
