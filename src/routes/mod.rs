pub mod graphql;

pub use graphql::configure_graphql_routes;
