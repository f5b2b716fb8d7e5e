//! # Borrow/Return Flows
//!
//! The lending workflow end to end: counters, ledger records and the error
//! statuses a client sees.

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use crate::harness::{TestApp, ADMIN_EMAIL};

    struct Library {
        app: TestApp,
        admin: String,
    }

    /// Admin, three members and `Dune` with two copies.
    async fn dune_library() -> Library {
        let app = TestApp::new();
        let admin = app.admin_token().await;
        for email in ["u1@library.test", "u2@library.test", "u3@library.test"] {
            app.token_for(email, false).await;
        }
        let created = app.create_book(&admin, "Dune", 2).await;
        assert_eq!(created.status, StatusCode::CREATED, "{}", created.text);
        Library { app, admin }
    }

    fn user_id(app: &TestApp, email: &str) -> String {
        app.container
            .snapshot()
            .users
            .into_iter()
            .find(|u| u.email == email)
            .map(|u| u.id.to_string())
            .expect("user exists")
    }

    fn available(book: &Value) -> u64 {
        book["available_copies"].as_u64().expect("available_copies")
    }

    // =============================================================================
    // SCENARIO
    // =============================================================================

    #[tokio::test]
    async fn test_dune_scenario() {
        let Library { app, admin } = dune_library().await;

        let first = app.borrow(&admin, "u1@library.test", "Dune").await;
        assert_eq!(first.status, StatusCode::CREATED, "{}", first.text);
        assert!(first.body["returned_at"].is_null());
        assert_eq!(available(&app.book(&admin, "Dune").await), 1);

        let second = app.borrow(&admin, "u2@library.test", "Dune").await;
        assert_eq!(second.status, StatusCode::CREATED);
        assert_eq!(available(&app.book(&admin, "Dune").await), 0);

        let third = app.borrow(&admin, "u3@library.test", "Dune").await;
        assert_eq!(third.status, StatusCode::CONFLICT);
        assert_eq!(third.error_kind(), "unavailable");
        assert_eq!(
            third.error_message(),
            "No available copies of the book so unable to borrow"
        );
        assert_eq!(app.container.ledger.len(), 2);

        let returned = app.return_book(&admin, "u1@library.test", "Dune").await;
        assert_eq!(returned.status, StatusCode::OK, "{}", returned.text);
        assert_eq!(returned.body["id"], first.body["id"]);
        assert!(returned.body["returned_at"].is_string());
        assert_eq!(available(&app.book(&admin, "Dune").await), 1);

        let u1 = user_id(&app, "u1@library.test");
        let history = app.get(&format!("/library/{u1}"), Some(&admin)).await;
        assert_eq!(history.status, StatusCode::OK);
        let history = history.body.as_array().expect("array").clone();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["state"], "returned");
        assert_eq!(history[0]["book"]["name"], "Dune");
    }

    // =============================================================================
    // BUSINESS RULES
    // =============================================================================

    #[tokio::test]
    async fn test_round_trip_restores_availability() {
        let Library { app, admin } = dune_library().await;

        app.borrow(&admin, "u1@library.test", "Dune").await;
        let returned = app.return_book(&admin, "u1@library.test", "Dune").await;
        assert_eq!(returned.status, StatusCode::OK);

        assert_eq!(available(&app.book(&admin, "Dune").await), 2);
        let ledger = app.container.ledger.snapshot();
        assert_eq!(ledger.len(), 1);
        assert!(ledger[0].returned_at.is_some());
    }

    #[tokio::test]
    async fn test_return_with_every_copy_home() {
        let Library { app, admin } = dune_library().await;

        let response = app.return_book(&admin, "u1@library.test", "Dune").await;
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error_kind(), "nothing_to_return");
        assert_eq!(response.error_message(), "Unable to return");
        assert!(app.container.ledger.is_empty());
    }

    #[tokio::test]
    async fn test_return_without_matching_loan_changes_nothing() {
        let Library { app, admin } = dune_library().await;
        app.borrow(&admin, "u1@library.test", "Dune").await;

        let response = app.return_book(&admin, "u2@library.test", "Dune").await;
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error_kind(), "inconsistent");
        assert_eq!(available(&app.book(&admin, "Dune").await), 1);
        assert_eq!(
            app.container
                .ledger
                .snapshot()
                .iter()
                .filter(|t| t.is_open())
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_member_cannot_borrow() {
        let Library { app, admin } = dune_library().await;
        let member = app.token_for("u1@library.test", false).await;

        let response = app.borrow(&member, "u1@library.test", "Dune").await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.error_kind(), "forbidden");
        assert_eq!(available(&app.book(&admin, "Dune").await), 2);
        assert!(app.container.ledger.is_empty());
    }

    #[tokio::test]
    async fn test_member_can_return() {
        let Library { app, admin } = dune_library().await;
        let member = app.token_for("u1@library.test", false).await;
        app.borrow(&admin, "u1@library.test", "Dune").await;

        let response = app.return_book(&member, "u1@library.test", "Dune").await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        assert_eq!(available(&app.book(&admin, "Dune").await), 2);
    }

    #[tokio::test]
    async fn test_unknown_user_and_book() {
        let Library { app, admin } = dune_library().await;

        let no_user = app.borrow(&admin, "ghost@library.test", "Dune").await;
        assert_eq!(no_user.status, StatusCode::NOT_FOUND);
        assert_eq!(no_user.error_message(), "User not found");

        let no_book = app.borrow(&admin, "u1@library.test", "Emma").await;
        assert_eq!(no_book.status, StatusCode::NOT_FOUND);
        assert_eq!(no_book.error_message(), "Book not found");

        let no_book = app.return_book(&admin, "u1@library.test", "Emma").await;
        assert_eq!(no_book.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_fields_are_validation_errors() {
        let Library { app, admin } = dune_library().await;

        let response = app
            .post(
                "/library/borrow",
                Some(&admin),
                serde_json::json!({ "name": "Dune" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_kind(), "validation");
    }

    #[tokio::test]
    async fn test_earliest_open_loan_is_closed_first() {
        let Library { app, admin } = dune_library().await;

        let first = app.borrow(&admin, "u1@library.test", "Dune").await;
        let second = app.borrow(&admin, "u1@library.test", "Dune").await;
        assert_eq!(second.status, StatusCode::CREATED);

        let returned = app.return_book(&admin, "u1@library.test", "Dune").await;
        assert_eq!(returned.body["id"], first.body["id"]);

        let u1 = user_id(&app, "u1@library.test");
        let history = app.get(&format!("/library/{u1}"), Some(&admin)).await;
        let history = history.body.as_array().expect("array").clone();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["id"], first.body["id"]);
        assert_eq!(history[0]["state"], "returned");
        assert_eq!(history[1]["id"], second.body["id"]);
        assert_eq!(history[1]["state"], "open");
    }

    #[tokio::test]
    async fn test_due_date_follows_loan_period() {
        let Library { app, admin } = dune_library().await;
        app.borrow(&admin, "u1@library.test", "Dune").await;

        let loan = app.container.ledger.snapshot().remove(0);
        assert_eq!(loan.due_date - loan.borrowed_at, chrono::Duration::days(10));
    }

    // =============================================================================
    // LEDGER REPORTS
    // =============================================================================

    #[tokio::test]
    async fn test_all_transactions_are_joined() {
        let Library { app, admin } = dune_library().await;
        app.borrow(&admin, "u1@library.test", "Dune").await;
        app.borrow(&admin, "u2@library.test", "Dune").await;

        let response = app.get("/library", Some(&admin)).await;
        assert_eq!(response.status, StatusCode::OK);
        let all = response.body.as_array().expect("array").clone();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["user"]["email"], "u1@library.test");
        assert_eq!(all[1]["user"]["email"], "u2@library.test");
        for entry in &all {
            assert_eq!(entry["book"]["name"], "Dune");
            assert_eq!(entry["state"], "open");
            assert!(entry["user"].get("password_hash").is_none());
        }
    }

    #[tokio::test]
    async fn test_user_without_loans_has_empty_history() {
        let Library { app, admin } = dune_library().await;
        let u3 = user_id(&app, "u3@library.test");

        let response = app.get(&format!("/library/{u3}"), Some(&admin)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, serde_json::json!([]));

        let admin_id = user_id(&app, ADMIN_EMAIL);
        let response = app.get(&format!("/library/{admin_id}"), Some(&admin)).await;
        assert_eq!(response.body, serde_json::json!([]));
    }
}
