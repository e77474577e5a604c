//! Integration tests per gli endpoints delle transazioni
//!
//! Test per:
//! - GET/POST /transactions
//! - PUT/DELETE /transactions/{id}
//! - GET /transactions/summary
//! - POST /transactions/import

mod common;

#[cfg(test)]
mod transaction_tests {
    use super::common::*;
    use axum::body::Bytes;
    use axum_test::TestServer;
    use axum_test::http::HeaderName;
    use serde_json::{Value, json};
    use sqlx::SqlitePool;

    fn authorization() -> HeaderName {
        HeaderName::from_static("authorization")
    }

    async fn create(server: &TestServer, token: &str, body: Value) -> Value {
        let response = server
            .post("/transactions")
            .add_header(authorization(), bearer(token))
            .json(&body)
            .await;
        response.assert_status_ok();
        response.json()
    }

    async fn list(server: &TestServer, token: &str) -> Vec<Value> {
        let response = server
            .get("/transactions")
            .add_header(authorization(), bearer(token))
            .await;
        response.assert_status_ok();
        response.json()
    }

    // ============================================================
    // Test per GET/POST /transactions
    // ============================================================

    #[sqlx::test]
    async fn test_new_user_scenario(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let registered = register(&server, "alice2", "secret1").await;
        let token = registered["token"].as_str().unwrap().to_string();

        assert!(list(&server, &token).await.is_empty());

        let first = create(
            &server,
            &token,
            json!({ "date": "2024-03-01", "amount": 45.5, "category": "Fuel", "description": "Shell" }),
        )
        .await;
        assert_eq!(first["userId"], registered["user"]["id"]);
        assert_eq!(first["amount"], 45.5);
        assert_eq!(first["category"], "Fuel");
        assert_eq!(first["description"], "Shell");
        assert!(first["id"].is_i64());
        assert!(first["createdAt"].is_string());

        create(
            &server,
            &token,
            json!({ "date": "2024-03-05", "amount": 1200, "category": "Maintenance" }),
        )
        .await;

        let transactions = list(&server, &token).await;
        let dates: Vec<&str> = transactions.iter().map(|t| t["date"].as_str().unwrap()).collect();
        assert_eq!(dates, vec!["2024-03-05", "2024-03-01"]);
        assert_eq!(transactions[0]["description"], "");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "transactions")))]
    async fn test_list_only_own_transactions(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let alice = list(&server, &create_test_jwt(1, TEST_JWT_SECRET)).await;
        let ids: Vec<i64> = alice.iter().map(|t| t["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![2, 1]);

        let bob = list(&server, &create_test_jwt(2, TEST_JWT_SECRET)).await;
        assert_eq!(bob.len(), 1);
        assert_eq!(bob[0]["userId"], 2);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_create_invalid_body(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let token = create_test_jwt(1, TEST_JWT_SECRET);

        for body in [
            json!({ "date": "2024-03-01", "amount": 0, "category": "Fuel" }),
            json!({ "date": "2024-03-01", "amount": -3, "category": "Fuel" }),
            json!({ "date": "2024-03-01", "amount": 10, "category": "   " }),
            json!({ "date": "2024-03-01", "amount": 10, "category": "x".repeat(51) }),
        ] {
            let response = server
                .post("/transactions")
                .add_header(authorization(), bearer(&token))
                .json(&body)
                .await;
            response.assert_status_bad_request();
        }

        assert!(list(&server, &token).await.is_empty());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_create_for_vanished_user(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/transactions")
            .add_header(authorization(), bearer(&create_test_jwt(999, TEST_JWT_SECRET)))
            .json(&json!({ "date": "2024-03-01", "amount": 10.0, "category": "Fuel" }))
            .await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["error"], "User not found");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_create_rejects_client_owner(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let token = create_test_jwt(1, TEST_JWT_SECRET);

        let response = server
            .post("/transactions")
            .add_header(authorization(), bearer(&token))
            .json(&json!({ "date": "2024-03-01", "amount": 10, "category": "Fuel", "userId": 2 }))
            .await;

        response.assert_status_unprocessable_entity();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "transactions")))]
    async fn test_transactions_require_token(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server.get("/transactions").await.assert_status_unauthorized();
        server.get("/transactions/summary").await.assert_status_unauthorized();
        server
            .post("/transactions")
            .json(&json!({ "date": "2024-03-01", "amount": 10, "category": "Fuel" }))
            .await
            .assert_status_unauthorized();
        server
            .delete("/transactions/1")
            .add_header(authorization(), bearer("not-a-token"))
            .await
            .assert_status_unauthorized();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "transactions")))]
    async fn test_legacy_token_header(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/transactions")
            .add_header(
                HeaderName::from_static("x-auth-token"),
                create_test_jwt(2, TEST_JWT_SECRET),
            )
            .await;

        response.assert_status_ok();
        let transactions: Vec<Value> = response.json();
        assert_eq!(transactions.len(), 1);
        Ok(())
    }

    // ============================================================
    // Test per PUT /transactions/{id} - update_transaction
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "transactions")))]
    async fn test_update_partial(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let token = create_test_jwt(1, TEST_JWT_SECRET);

        let response = server
            .put("/transactions/1")
            .add_header(authorization(), bearer(&token))
            .json(&json!({ "amount": 150 }))
            .await;

        response.assert_status_ok();
        let updated: Value = response.json();
        assert_eq!(updated["id"], 1);
        assert_eq!(updated["amount"], 150.0);
        assert_eq!(updated["date"], "2024-01-01");
        assert_eq!(updated["category"], "Fuel");
        assert_eq!(updated["description"], "x");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "transactions")))]
    async fn test_update_empty_body_is_noop(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let token = create_test_jwt(1, TEST_JWT_SECRET);
        let before = list(&server, &token).await;

        let response = server
            .put("/transactions/2")
            .add_header(authorization(), bearer(&token))
            .json(&json!({}))
            .await;

        response.assert_status_ok();
        let unchanged: Value = response.json();
        assert_eq!(unchanged, before[0]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "transactions")))]
    async fn test_update_foreign_transaction(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let bob = create_test_jwt(2, TEST_JWT_SECRET);

        let response = server
            .put("/transactions/1")
            .add_header(authorization(), bearer(&bob))
            .json(&json!({ "amount": 1 }))
            .await;

        response.assert_status_forbidden();

        let alice = list(&server, &create_test_jwt(1, TEST_JWT_SECRET)).await;
        let first = alice.iter().find(|t| t["id"] == 1).unwrap();
        assert_eq!(first["amount"], 100.0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "transactions")))]
    async fn test_update_missing_and_invalid(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let token = create_test_jwt(1, TEST_JWT_SECRET);

        server
            .put("/transactions/999")
            .add_header(authorization(), bearer(&token))
            .json(&json!({ "amount": 10 }))
            .await
            .assert_status_not_found();

        server
            .put("/transactions/1")
            .add_header(authorization(), bearer(&token))
            .json(&json!({ "amount": 0 }))
            .await
            .assert_status_bad_request();
        Ok(())
    }

    // ============================================================
    // Test per DELETE /transactions/{id} - delete_transaction
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "transactions")))]
    async fn test_delete_then_delete_again(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let token = create_test_jwt(1, TEST_JWT_SECRET);

        let response = server
            .delete("/transactions/1")
            .add_header(authorization(), bearer(&token))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "msg": "Transaction removed" }));

        let remaining = list(&server, &token).await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["id"], 2);

        server
            .delete("/transactions/1")
            .add_header(authorization(), bearer(&token))
            .await
            .assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "transactions")))]
    async fn test_delete_foreign_transaction(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let alice = create_test_jwt(1, TEST_JWT_SECRET);

        server
            .delete("/transactions/3")
            .add_header(authorization(), bearer(&alice))
            .await
            .assert_status_forbidden();

        let bob = list(&server, &create_test_jwt(2, TEST_JWT_SECRET)).await;
        assert_eq!(bob.len(), 1);
        Ok(())
    }

    // ============================================================
    // Test per GET /transactions/summary - get_summary
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "transactions")))]
    async fn test_summary(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let token = create_test_jwt(1, TEST_JWT_SECRET);

        let response = server
            .get("/transactions/summary")
            .add_header(authorization(), bearer(&token))
            .await;

        response.assert_status_ok();
        let summary: Value = response.json();
        assert_eq!(summary["currency"], "CZK");
        assert_eq!(summary["totalExpenses"], 350.0);
        assert_eq!(summary["topExpenses"][0]["id"], 2);
        assert_eq!(summary["monthly"].as_array().unwrap().len(), 12);

        let months = summary["monthsActive"].as_f64().unwrap();
        assert_eq!(summary["totalAllowance"], months * 500.0);
        assert_eq!(summary["balance"], months * 500.0 - 350.0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_summary_user_vanished(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .get("/transactions/summary")
            .add_header(authorization(), bearer(&create_test_jwt(999, TEST_JWT_SECRET)))
            .await
            .assert_status_not_found();
        Ok(())
    }

    // ============================================================
    // Test per POST /transactions/import - import_transactions
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_import_csv(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let token = create_test_jwt(2, TEST_JWT_SECRET);

        let csv = "Date,Amount,Category,Description\n\
                   2024-03-01,45.5,Fuel,Shell\n\
                   45358,30,,\n\
                   2024-03-09,0,Fuel,dropped\n";

        let response = server
            .post("/transactions/import")
            .add_header(authorization(), bearer(&token))
            .text(csv)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["imported"], 2);
        assert_eq!(body["transactions"][1]["date"], "2024-03-07");
        assert_eq!(body["transactions"][1]["category"], "Other");
        assert_eq!(body["transactions"][1]["description"], "Imported Expense");

        let stored = list(&server, &token).await;
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|t| t["userId"] == 2));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_import_missing_columns(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let token = create_test_jwt(1, TEST_JWT_SECRET);

        let response = server
            .post("/transactions/import")
            .add_header(authorization(), bearer(&token))
            .text("when,total\n2024-03-01,10\n")
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["error"], "Import failed");
        assert!(body["details"].as_str().unwrap().contains("date, amount"));

        assert!(list(&server, &token).await.is_empty());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_import_empty_file(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let token = create_test_jwt(1, TEST_JWT_SECRET);

        server
            .post("/transactions/import")
            .add_header(authorization(), bearer(&token))
            .text("")
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_import_european_amounts(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let token = create_test_jwt(1, TEST_JWT_SECRET);

        let response = server
            .post("/transactions/import")
            .add_header(authorization(), bearer(&token))
            .text("date;amount\n2024-03-01;1.234,50\n")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["transactions"][0]["amount"], 1234.5);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_import_xlsx(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let token = create_test_jwt(1, TEST_JWT_SECRET);
        let workbook = Bytes::from_static(include_bytes!("../fixtures/import/expenses.xlsx"));

        let response = server
            .post("/transactions/import")
            .add_header(authorization(), bearer(&token))
            .bytes(workbook)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["imported"], 2);
        assert_eq!(body["transactions"][0]["date"], "2024-03-01");
        assert_eq!(body["transactions"][0]["amount"], 1200.0);
        assert_eq!(body["transactions"][1]["category"], "Parking");

        assert_eq!(list(&server, &token).await.len(), 2);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_import_for_vanished_user(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .post("/transactions/import")
            .add_header(authorization(), bearer(&create_test_jwt(999, TEST_JWT_SECRET)))
            .text("date,amount\n2024-03-01,10\n")
            .await
            .assert_status_not_found();
        Ok(())
    }
}
