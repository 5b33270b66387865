use async_graphql::{EmptySubscription, Schema};

use super::GraphQLContext;
use super::mutations::Mutation;
use super::queries::Query;

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

pub fn build_schema(context: GraphQLContext) -> AppSchema {
    Schema::build(Query, Mutation::default(), EmptySubscription)
        .data(context)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{Identity, UserRole};
    use crate::services::auth::test_auth_service;
    use crate::services::test_runner::RunTestPayload;
    use crate::services::test_runner::mock::RecordingExecutor;
    use crate::storage::StoreHandle;
    use crate::storage::sea_orm_storage::memory_storage;
    use async_graphql::{Request, Response, Value};
    use serde_json::json;
    use std::sync::Arc;

    struct Harness {
        schema: AppSchema,
        context: GraphQLContext,
        executor: Arc<RecordingExecutor>,
    }

    impl Harness {
        async fn new() -> Self {
            let storage = memory_storage().await;
            let executor = Arc::new(RecordingExecutor::default());
            let context = GraphQLContext::new(
                Arc::new(StoreHandle::new(Arc::new(storage))),
                executor.clone(),
                Arc::new(test_auth_service()),
            );
            Self {
                schema: build_schema(context.clone()),
                context,
                executor,
            }
        }

        async fn run(&self, query: &str, identity: Option<Identity>) -> Response {
            let request = self
                .context
                .prepare_request(Request::new(query), identity)
                .await;
            self.schema.execute(request).await
        }

        async fn run_ok(&self, query: &str, identity: Option<Identity>) -> serde_json::Value {
            let response = self.run(query, identity).await;
            assert!(response.errors.is_empty(), "{:?}", response.errors);
            response.data.into_json().unwrap()
        }

        async fn seed_course(&self) -> serde_json::Value {
            self.run_ok(
                r#"mutation { createUnit(input: { name: "COMP1000" }) { id } }"#,
                Some(admin()),
            )
            .await;
            self.run_ok(
                r#"mutation { createClass(input: { name: "Lab1", unitID: "1" }) { id } }"#,
                Some(admin()),
            )
            .await;
            self.run_ok(
                r#"mutation {
                    createAssignment(input: { name: "A1", dueDate: 1767225600, classID: "1" }) {
                        id name dueDate
                    }
                }"#,
                Some(admin()),
            )
            .await
        }
    }

    fn admin() -> Identity {
        Identity {
            user_id: 1,
            email: "admin@uni.edu".to_string(),
            role: UserRole::Admin,
        }
    }

    fn tutor() -> Identity {
        Identity {
            user_id: 2,
            email: "tutor@uni.edu".to_string(),
            role: UserRole::Tutor,
        }
    }

    fn error_code(response: &Response) -> Option<Value> {
        response
            .errors
            .first()
            .and_then(|e| e.extensions.as_ref())
            .and_then(|ext| ext.get("code"))
            .cloned()
    }

    #[tokio::test]
    async fn test_assignment_resolves_to_its_unit() {
        let harness = Harness::new().await;
        let created = harness.seed_course().await;
        assert_eq!(
            created,
            json!({ "createAssignment": { "id": "1", "name": "A1", "dueDate": 1767225600 } })
        );

        let data = harness
            .run_ok(
                r#"{ assignment(id: "1") { name unit { name } class { name unit { name } } } }"#,
                None,
            )
            .await;
        assert_eq!(
            data,
            json!({ "assignment": {
                "name": "A1",
                "unit": { "name": "COMP1000" },
                "class": { "name": "Lab1", "unit": { "name": "COMP1000" } }
            } })
        );
    }

    #[tokio::test]
    async fn test_unit_lists_its_classes() {
        let harness = Harness::new().await;
        harness.seed_course().await;

        let data = harness
            .run_ok(r#"{ unit(id: "1") { name classes { name assignments { name } } } }"#, None)
            .await;
        assert_eq!(
            data,
            json!({ "unit": {
                "name": "COMP1000",
                "classes": [{ "name": "Lab1", "assignments": [{ "name": "A1" }] }]
            } })
        );
    }

    #[tokio::test]
    async fn test_duplicate_unit_is_rejected() {
        let harness = Harness::new().await;
        harness.seed_course().await;

        let response = harness
            .run(
                r#"mutation { createUnit(input: { name: "COMP1000" }) { id } }"#,
                Some(admin()),
            )
            .await;
        assert_eq!(response.errors[0].message, "unit already exists");
        assert_eq!(error_code(&response), Some(Value::from("ALREADY_EXISTS")));
    }

    #[tokio::test]
    async fn test_mutations_require_identity() {
        let harness = Harness::new().await;
        let response = harness
            .run(r#"mutation { createUnit(input: { name: "COMP1000" }) { id } }"#, None)
            .await;
        assert_eq!(response.errors[0].message, "user not authenticated");
        assert_eq!(error_code(&response), Some(Value::from("UNAUTHENTICATED")));

        let data = harness.run_ok("{ units { id } }", None).await;
        assert_eq!(data, json!({ "units": [] }));
    }

    #[tokio::test]
    async fn test_missing_record_is_null_with_error() {
        let harness = Harness::new().await;
        let response = harness.run(r#"{ unit(id: "99") { name } }"#, None).await;
        assert_eq!(response.errors[0].message, "unit not found");
        assert_eq!(error_code(&response), Some(Value::from("NOT_FOUND")));
        assert_eq!(response.data.into_json().unwrap(), json!({ "unit": null }));

        let response = harness.run(r#"{ result(id: "99") { score } }"#, None).await;
        assert_eq!(response.errors[0].message, "result not found");
        assert_eq!(response.data.into_json().unwrap(), json!({ "result": null }));
    }

    #[tokio::test]
    async fn test_missing_record_keeps_sibling_fields() {
        let harness = Harness::new().await;
        harness.seed_course().await;

        let response = harness
            .run(
                r#"{ units { name } unit(id: "99") { name } assignment(id: "1") { name } }"#,
                None,
            )
            .await;
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "unit not found");
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({
                "units": [{ "name": "COMP1000" }],
                "unit": null,
                "assignment": { "name": "A1" }
            })
        );

        let response = harness
            .run(r#"{ classes { name } test(id: "5") { name } }"#, None)
            .await;
        assert_eq!(response.errors[0].message, "test not found");
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({ "classes": [{ "name": "Lab1" }], "test": null })
        );
    }

    #[tokio::test]
    async fn test_parent_must_exist() {
        let harness = Harness::new().await;
        let response = harness
            .run(
                r#"mutation { createClass(input: { name: "Lab1", unitID: "7" }) { id } }"#,
                Some(admin()),
            )
            .await;
        assert_eq!(response.errors[0].message, "unit not found");

        let response = harness
            .run(
                r#"mutation { createClass(input: { name: "Lab1", unitID: "seven" }) { id } }"#,
                Some(admin()),
            )
            .await;
        assert_eq!(error_code(&response), Some(Value::from("VALIDATION_ERROR")));
    }

    #[tokio::test]
    async fn test_test_requires_name() {
        let harness = Harness::new().await;
        harness.seed_course().await;
        let response = harness
            .run(
                r#"mutation { createTest(input: { name: "", assignmentID: "1" }) { id } }"#,
                Some(admin()),
            )
            .await;
        assert_eq!(response.errors[0].message, "name is required");
    }

    #[tokio::test]
    async fn test_units_page_from_normalized_offset() {
        let harness = Harness::new().await;
        for name in ["COMP1000", "COMP2000", "COMP3000"] {
            harness
                .run_ok(
                    &format!(r#"mutation {{ createUnit(input: {{ name: "{name}" }}) {{ id }} }}"#),
                    Some(admin()),
                )
                .await;
        }

        let data = harness.run_ok("{ units(from: -5) { id name } }", None).await;
        assert_eq!(
            data,
            json!({ "units": [
                { "id": "1", "name": "COMP1000" },
                { "id": "2", "name": "COMP2000" },
                { "id": "3", "name": "COMP3000" }
            ] })
        );

        let data = harness.run_ok("{ units(from: 3) { name } }", None).await;
        assert_eq!(data, json!({ "units": [{ "name": "COMP3000" }] }));
    }

    #[tokio::test]
    async fn test_register_login_and_me() {
        let harness = Harness::new().await;

        let response = harness
            .run(
                r#"mutation { register(email: "admin@uni.edu", password: "hunter22") }"#,
                None,
            )
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let cookie = response
            .http_headers
            .get("set-cookie")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(cookie.starts_with("token="));
        assert!(cookie.contains("HttpOnly"));

        let response = harness
            .run(
                r#"mutation { register(email: "admin@uni.edu", password: "other") }"#,
                None,
            )
            .await;
        assert_eq!(response.errors[0].message, "user already exists");

        let data = harness
            .run_ok(
                r#"mutation { login(email: "admin@uni.edu", password: "hunter22") }"#,
                None,
            )
            .await;
        let token = data["login"].as_str().unwrap_or_default();
        assert!(!token.is_empty());

        let response = harness
            .run(
                r#"mutation { login(email: "admin@uni.edu", password: "wrong") }"#,
                None,
            )
            .await;
        assert_eq!(error_code(&response), Some(Value::from("UNAUTHENTICATED")));
        assert_eq!(response.data.into_json().unwrap(), serde_json::Value::Null);

        let data = harness.run_ok("{ me { email role } }", Some(tutor())).await;
        assert_eq!(
            data,
            json!({ "me": { "email": "tutor@uni.edu", "role": "TUTOR" } })
        );
        let data = harness.run_ok("{ me { email } }", None).await;
        assert_eq!(data, json!({ "me": null }));
    }

    #[tokio::test]
    async fn test_reset_db_requires_admin() {
        let harness = Harness::new().await;
        harness.seed_course().await;

        let response = harness.run("mutation { resetDb }", Some(tutor())).await;
        assert_eq!(
            response.errors[0].message,
            "you must be an admin to reset the database"
        );
        assert_eq!(error_code(&response), Some(Value::from("UNAUTHORIZED")));
        let data = harness.run_ok("{ units { name } }", None).await;
        assert_eq!(data, json!({ "units": [{ "name": "COMP1000" }] }));

        let data = harness.run_ok("mutation { resetDb }", Some(admin())).await;
        assert_eq!(data, json!({ "resetDb": true }));
        let data = harness
            .run_ok(
                "{ units { id } classes { id } assignments { id } tests { id } submissions { id } results { id } }",
                None,
            )
            .await;
        assert_eq!(
            data,
            json!({
                "units": [], "classes": [], "assignments": [],
                "tests": [], "submissions": [], "results": []
            })
        );
    }

    #[tokio::test]
    async fn test_run_test_posts_storage_keys() {
        let harness = Harness::new().await;
        harness.seed_course().await;
        let data = harness
            .run_ok(
                r#"mutation { createTest(input: { name: "compiles", assignmentID: "1" }) { id unit { name } } }"#,
                Some(admin()),
            )
            .await;
        assert_eq!(
            data,
            json!({ "createTest": { "id": "1", "unit": { "name": "COMP1000" } } })
        );

        let data = harness
            .run_ok(r#"mutation { runTest(testID: "1") }"#, Some(admin()))
            .await;
        assert_eq!(data, json!({ "runTest": true }));
        assert_eq!(
            harness.executor.received.lock().unwrap().as_slice(),
            &[RunTestPayload::new("COMP1000", "A1", 1)]
        );
    }

    #[tokio::test]
    async fn test_submission_result_lifecycle() {
        let harness = Harness::new().await;
        harness.seed_course().await;

        let data = harness
            .run_ok(
                r#"mutation {
                    createSubmission(input: { studentID: "s1", assignmentID: "1" }) {
                        id studentID result { score }
                    }
                }"#,
                Some(admin()),
            )
            .await;
        assert_eq!(
            data,
            json!({ "createSubmission": { "id": "1", "studentID": "s1", "result": null } })
        );

        let data = harness
            .run_ok(
                r#"mutation { createResult(input: { score: 65.5, submissionID: "1" }) { score submissionID submission { studentID } } }"#,
                Some(admin()),
            )
            .await;
        assert_eq!(
            data,
            json!({ "createResult": {
                "score": 65.5, "submissionID": "1", "submission": { "studentID": "s1" }
            } })
        );

        let response = harness
            .run(
                r#"mutation { createResult(input: { score: 1.0, submissionID: "1" }) { id } }"#,
                Some(admin()),
            )
            .await;
        assert_eq!(response.errors[0].message, "result already exists");

        let data = harness
            .run_ok(
                r#"mutation {
                    createSubmission(input: { studentID: "s2", assignmentID: "1", score: 90.0 }) {
                        result { score } unit { name }
                    }
                }"#,
                Some(admin()),
            )
            .await;
        assert_eq!(
            data,
            json!({ "createSubmission": { "result": { "score": 90.0 }, "unit": { "name": "COMP1000" } } })
        );
    }

    #[tokio::test]
    async fn test_multi_hop_relations_resolve_to_ancestors() {
        let harness = Harness::new().await;
        harness.seed_course().await;
        harness
            .run_ok(
                r#"mutation {
                    createTest(input: { name: "compiles", assignmentID: "1" }) { id }
                    createSubmission(input: { studentID: "s1", assignmentID: "1" }) { id }
                }"#,
                Some(admin()),
            )
            .await;

        let data = harness
            .run_ok(
                r#"{
                    test(id: "1") { assignment { name } class { name } unit { name } }
                    submission(id: "1") { assignment { name } class { name } unit { name } }
                }"#,
                None,
            )
            .await;
        let ancestors = json!({
            "assignment": { "name": "A1" },
            "class": { "name": "Lab1" },
            "unit": { "name": "COMP1000" }
        });
        assert_eq!(data, json!({ "test": ancestors, "submission": ancestors }));
    }

    #[tokio::test]
    async fn test_anonymous_register_cannot_claim_admin() {
        let harness = Harness::new().await;
        harness
            .run_ok(
                r#"mutation { register(email: "admin@uni.edu", password: "hunter22") }"#,
                None,
            )
            .await;

        let response = harness
            .run(
                r#"mutation { register(email: "mallory@uni.edu", password: "pw", role: ADMIN) }"#,
                None,
            )
            .await;
        assert_eq!(
            response.errors[0].message,
            "you must be an admin to register an admin"
        );
        assert_eq!(error_code(&response), Some(Value::from("UNAUTHORIZED")));

        let response = harness
            .run(
                r#"mutation { register(email: "mallory@uni.edu", password: "pw", role: ADMIN) }"#,
                Some(tutor()),
            )
            .await;
        assert_eq!(error_code(&response), Some(Value::from("UNAUTHORIZED")));

        harness
            .run_ok(
                r#"mutation { register(email: "second@uni.edu", password: "pw", role: ADMIN) }"#,
                Some(admin()),
            )
            .await;
    }
}
