use serde_json::json;

use crate::common::{TestApp, days_before_today, days_from_today, routes};

mod key_results {
    use super::*;

    #[tokio::test]
    async fn created_key_result_keeps_only_its_explicit_date() {
        let app = TestApp::spawn().await;
        let id = app
            .create_objective("Ship v2", Some(days_from_today(30)))
            .await;

        let res = app
            .post(
                routes::KEY_RESULTS,
                &json!({"objective_id": id, "title": "  Beta  "}),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"], "Beta");
        assert!(res.body["expected_completion_date"].is_null());
        assert_eq!(res.body["completed"], false);
    }

    #[tokio::test]
    async fn unknown_objective_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::KEY_RESULTS, &json!({"objective_id": 7, "title": "Beta"}))
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn patch_updates_fields_and_clears_date() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Ship v2", None).await;
        let kr_id = app
            .create_key_result(id, "Beta", Some(days_from_today(10)))
            .await;

        let res = app
            .patch(
                &routes::key_result(kr_id),
                &json!({"completed": true, "title": "Public beta"}),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["completed"], true);
        assert_eq!(res.body["title"], "Public beta");
        assert!(res.body["expected_completion_date"].is_string());

        let cleared = app
            .patch(
                &routes::key_result(kr_id),
                &json!({"expected_completion_date": null}),
            )
            .await;
        assert!(cleared.body["expected_completion_date"].is_null());
    }

    #[tokio::test]
    async fn list_returns_every_key_result() {
        let app = TestApp::spawn().await;
        let first = app.create_objective("One", None).await;
        let second = app.create_objective("Two", None).await;
        app.create_key_result(first, "A", None).await;
        app.create_key_result(second, "B", None).await;

        let res = app.get(routes::KEY_RESULTS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_removes_the_roadmap() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Ship v2", None).await;
        let kr_id = app.create_key_result(id, "Beta", None).await;
        app.generate_roadmap(kr_id).await;

        let res = app.delete(&routes::key_result(kr_id)).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(&routes::key_result(kr_id)).await.status, 404);
        assert_eq!(app.get(&routes::roadmap(kr_id)).await.status, 404);
    }
}

mod budget {
    use super::*;

    #[tokio::test]
    async fn undated_chain_uses_the_thirty_day_fallback() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Learn Rust", None).await;
        let kr_id = app.create_key_result(id, "Ownership", None).await;

        let res = app.generate_roadmap(kr_id).await;

        assert_eq!(res.body["available_days"], 30);
        assert_eq!(res.body["requested_item_count"], 6);
        assert_eq!(res.body["topic"], "Ownership");
        assert_eq!(res.item_ids().len(), 6);

        let request = app.generator.last_roadmap_request();
        assert_eq!(request.topic, "Ownership");
        assert_eq!(request.available_days, Some(30));
        assert_eq!(request.exact_item_count, Some(6));
    }

    #[tokio::test]
    async fn far_explicit_date_is_capped_at_twenty_items() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Learn Rust", None).await;
        let kr_id = app
            .create_key_result(id, "Compilers", Some(days_from_today(400)))
            .await;

        let res = app.generate_roadmap(kr_id).await;

        let days = res.body["available_days"].as_i64().unwrap();
        assert!((399..=400).contains(&days), "got {days}");
        assert_eq!(res.body["requested_item_count"], 20);
    }

    #[tokio::test]
    async fn past_explicit_date_gets_the_floor() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Learn Rust", None).await;
        let kr_id = app
            .create_key_result(id, "Overdue", Some(days_before_today(5)))
            .await;

        let res = app.generate_roadmap(kr_id).await;

        assert_eq!(res.body["available_days"], 3);
        assert_eq!(res.body["requested_item_count"], 3);
    }

    #[tokio::test]
    async fn objective_deadline_is_split_across_key_results() {
        let app = TestApp::spawn().await;
        let id = app
            .create_objective("Learn Rust", Some(days_from_today(41)))
            .await;
        app.create_key_result(id, "First", None).await;
        let second = app.create_key_result(id, "Second", None).await;

        let res = app.generate_roadmap(second).await;

        assert_eq!(res.body["available_days"], 20);
        assert_eq!(res.body["requested_item_count"], 4);
    }

    #[tokio::test]
    async fn past_objective_deadline_falls_back() {
        let app = TestApp::spawn().await;
        let id = app
            .create_objective("Learn Rust", Some(days_before_today(1)))
            .await;
        let kr_id = app.create_key_result(id, "Late", None).await;

        let res = app.generate_roadmap(kr_id).await;

        assert_eq!(res.body["available_days"], 30);
    }
}

mod get_or_generate {
    use super::*;
    use crate::common::StubFailure;

    #[tokio::test]
    async fn second_request_returns_the_stored_roadmap() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Learn Rust", None).await;
        let kr_id = app.create_key_result(id, "Traits", None).await;
        let first = app.generate_roadmap(kr_id).await;

        let second = app.post(&routes::roadmap(kr_id), &json!({})).await;

        assert_eq!(second.status, 200);
        assert_eq!(second.id(), first.id());
        assert_eq!(app.generator.roadmap_requests.lock().unwrap().len(), 1);

        let fetched = app.get(&routes::roadmap(kr_id)).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.item_ids(), first.item_ids());
    }

    #[tokio::test]
    async fn concurrent_requests_yield_one_roadmap() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Learn Rust", None).await;
        let kr_id = app.create_key_result(id, "Macros", None).await;
        let path = routes::roadmap(kr_id);

        let (body_a, body_b) = (json!({}), json!({}));
        let (a, b) = tokio::join!(app.post(&path, &body_a), app.post(&path, &body_b));

        let mut statuses = vec![a.status, b.status];
        statuses.sort();
        assert_eq!(statuses, vec![200, 201], "{} / {}", a.text, b.text);
        assert_eq!(a.id(), b.id());
    }

    #[tokio::test]
    async fn item_count_mismatch_is_accepted() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Learn Rust", None).await;
        let kr_id = app.create_key_result(id, "Lifetimes", None).await;
        *app.generator.roadmap_item_override.lock().unwrap() = Some(5);

        let res = app.generate_roadmap(kr_id).await;

        assert_eq!(res.body["requested_item_count"], 6);
        assert_eq!(res.item_ids().len(), 5);
    }

    #[tokio::test]
    async fn failed_generation_persists_nothing() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Learn Rust", None).await;
        let kr_id = app.create_key_result(id, "Unsafe", None).await;
        app.generator.fail_with(StubFailure::Status(500));

        let res = app.post(&routes::roadmap(kr_id), &json!({})).await;
        assert_eq!(res.status, 502);
        assert_eq!(app.get(&routes::roadmap(kr_id)).await.status, 404);

        app.generator.recover();
        app.generate_roadmap(kr_id).await;
    }

    #[tokio::test]
    async fn deleted_roadmap_can_be_regenerated() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Learn Rust", None).await;
        let kr_id = app.create_key_result(id, "Async", None).await;
        let first = app.generate_roadmap(kr_id).await;

        let deleted = app.delete(&routes::roadmap(kr_id)).await;
        assert_eq!(deleted.status, 204);
        assert_eq!(app.delete(&routes::roadmap(kr_id)).await.status, 404);

        let second = app.generate_roadmap(kr_id).await;
        assert_ne!(second.id(), first.id());
    }

    #[tokio::test]
    async fn unknown_key_result_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.post(&routes::roadmap(999), &json!({})).await;

        assert_eq!(res.status, 404);
        assert!(app.generator.roadmap_requests.lock().unwrap().is_empty());
    }
}

mod items {
    use super::*;

    #[tokio::test]
    async fn roadmap_item_can_be_completed() {
        let app = TestApp::spawn().await;
        let item_id = app.create_roadmap_item().await;

        let res = app
            .patch(&routes::roadmap_item(item_id), &json!({"completed": true}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["completed"], true);
        assert_eq!(res.body["id"], item_id);
    }

    #[tokio::test]
    async fn items_keep_generated_order() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Learn Rust", None).await;
        let kr_id = app.create_key_result(id, "Iterators", None).await;

        let res = app.generate_roadmap(kr_id).await;

        let categories = res.body["categories"].as_array().unwrap();
        assert_eq!(categories[0]["name"], "Foundations");
        assert_eq!(categories[1]["name"], "Practice");
        assert_eq!(categories[0]["items"][0]["title"], "Iterators part 1");
        assert_eq!(categories[1]["items"][0]["title"], "Iterators part 4");
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .patch(&routes::roadmap_item(12345), &json!({"completed": true}))
            .await;

        assert_eq!(res.status, 404);
    }
}
