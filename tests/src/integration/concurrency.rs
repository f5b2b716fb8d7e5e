//! # Concurrent Lending
//!
//! Many borrows racing for the last copies must hand out exactly as many
//! loans as there are copies.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use futures::future::join_all;

    use crate::harness::TestApp;

    const READERS: usize = 20;

    async fn setup(copies: u32) -> (Arc<TestApp>, String, Vec<String>) {
        let app = TestApp::new();
        let admin = app.admin_token().await;
        app.create_book(&admin, "Dune", copies).await;

        let mut readers = Vec::with_capacity(READERS);
        for i in 0..READERS {
            let email = format!("reader{i}@library.test");
            app.register(&email, crate::harness::PASSWORD, false).await;
            readers.push(email);
        }
        (Arc::new(app), admin, readers)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_borrows_never_oversell() {
        let (app, admin, readers) = setup(3).await;

        let tasks = readers.iter().cloned().map(|email| {
            let app = Arc::clone(&app);
            let admin = admin.clone();
            tokio::spawn(async move { app.borrow(&admin, &email, "Dune").await.status })
        });
        let statuses: Vec<StatusCode> = join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.expect("task completes"))
            .collect();

        let granted = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
        let refused = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
        assert_eq!(granted, 3);
        assert_eq!(refused, READERS - 3);

        let book = app.book(&admin, "Dune").await;
        assert_eq!(book["available_copies"], 0);
        assert_eq!(book["total_copies"], 3);
        assert_eq!(app.container.open_loans(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_returns_restore_every_copy() {
        let (app, admin, readers) = setup(READERS as u32).await;
        for email in &readers {
            let response = app.borrow(&admin, email, "Dune").await;
            assert_eq!(response.status, StatusCode::CREATED);
        }
        assert_eq!(app.book(&admin, "Dune").await["available_copies"], 0);

        let tasks = readers.iter().cloned().map(|email| {
            let app = Arc::clone(&app);
            let admin = admin.clone();
            tokio::spawn(async move { app.return_book(&admin, &email, "Dune").await.status })
        });
        for joined in join_all(tasks).await {
            assert_eq!(joined.expect("task completes"), StatusCode::OK);
        }

        let book = app.book(&admin, "Dune").await;
        assert_eq!(book["available_copies"], READERS);
        assert_eq!(app.container.open_loans(), 0);

        // Everything is home again.
        let extra = app.return_book(&admin, &readers[0], "Dune").await;
        assert_eq!(extra.status, StatusCode::CONFLICT);
        assert_eq!(extra.error_kind(), "nothing_to_return");
    }
}
