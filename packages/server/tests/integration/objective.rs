use serde_json::json;

use crate::common::{TestApp, days_before_today, days_from_today, routes};

mod crud {
    use super::*;

    #[tokio::test]
    async fn objective_is_created_with_trimmed_text() {
        let app = TestApp::spawn().await;
        let deadline = days_from_today(60);

        let res = app
            .post(
                routes::OBJECTIVES,
                &json!({
                    "objective": "  Run a marathon  ",
                    "category_id": 1,
                    "completion_date": deadline,
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["objective"], "Run a marathon");
        assert_eq!(res.body["completion_date"], deadline.to_string());
    }

    #[tokio::test]
    async fn blank_or_overlong_text_is_rejected() {
        let app = TestApp::spawn().await;

        let blank = app
            .post(routes::OBJECTIVES, &json!({"objective": "   ", "category_id": 1}))
            .await;
        assert_eq!(blank.status, 400);
        assert_eq!(blank.body["code"], "VALIDATION_ERROR");

        let long = app
            .post(
                routes::OBJECTIVES,
                &json!({"objective": "x".repeat(501), "category_id": 1}),
            )
            .await;
        assert_eq!(long.status, 400);
    }

    #[tokio::test]
    async fn malformed_date_or_json_is_rejected() {
        let app = TestApp::spawn().await;

        let bad_date = app
            .post(
                routes::OBJECTIVES,
                &json!({"objective": "Ship", "category_id": 1, "completion_date": "31/12/2026"}),
            )
            .await;
        assert_eq!(bad_date.status, 400);
        assert_eq!(bad_date.body["code"], "VALIDATION_ERROR");

        let bad_json = app.post_raw(routes::OBJECTIVES, "{not json").await;
        assert_eq!(bad_json.status, 400);
        assert_eq!(bad_json.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::OBJECTIVES, &json!({"objective": "Ship", "category_id": 42}))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn list_filters_by_category() {
        let app = TestApp::spawn().await;
        app.create_objective("Personal goal", None).await;
        let res = app
            .post(
                routes::OBJECTIVES,
                &json!({"objective": "Work goal", "category_id": 2}),
            )
            .await;
        assert_eq!(res.status, 201);

        let all = app.get(routes::OBJECTIVES).await;
        assert_eq!(all.body.as_array().unwrap().len(), 2);

        let work = app
            .get(&format!("{}?category_id=2", routes::OBJECTIVES))
            .await;
        let work = work.body.as_array().unwrap();
        assert_eq!(work.len(), 1);
        assert_eq!(work[0]["objective"], "Work goal");
    }

    #[tokio::test]
    async fn patch_can_clear_the_completion_date() {
        let app = TestApp::spawn().await;
        let id = app
            .create_objective("Write a book", Some(days_from_today(90)))
            .await;

        let renamed = app
            .patch(&routes::objective(id), &json!({"objective": "Write two books"}))
            .await;
        assert_eq!(renamed.status, 200, "{}", renamed.text);
        assert!(renamed.body["completion_date"].is_string());

        let cleared = app
            .patch(&routes::objective(id), &json!({"completion_date": null}))
            .await;
        assert_eq!(cleared.status, 200);
        assert!(cleared.body["completion_date"].is_null());
        assert_eq!(cleared.body["objective"], "Write two books");
    }

    #[tokio::test]
    async fn empty_patch_returns_current_state() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Stay the same", None).await;

        let res = app.patch(&routes::objective(id), &json!({})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["objective"], "Stay the same");
    }

    #[tokio::test]
    async fn delete_cascades_to_key_results_and_roadmaps() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Learn Go", None).await;
        let kr_id = app.create_key_result(id, "Goroutines", None).await;
        let roadmap = app.generate_roadmap(kr_id).await;
        let item_id = roadmap.first_item_id();
        let trail = app
            .post(
                routes::EDUCATIONAL_TRAIL,
                &json!({"roadmap_item_id": item_id, "item_title": "Channels"}),
            )
            .await;
        assert_eq!(trail.status, 201, "{}", trail.text);

        let res = app.delete(&routes::objective(id)).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(&routes::objective(id)).await.status, 404);
        assert_eq!(app.get(&routes::key_result(kr_id)).await.status, 404);
        assert_eq!(app.get(&routes::roadmap(kr_id)).await.status, 404);
        assert_eq!(
            app.get(&routes::item_educational_trail(item_id)).await.status,
            404
        );
    }
}

mod key_result_schedule {
    use super::*;

    #[tokio::test]
    async fn undated_key_results_are_spread_up_to_the_deadline() {
        let app = TestApp::spawn().await;
        let deadline = days_from_today(31);
        let id = app.create_objective("Run a marathon", Some(deadline)).await;
        for title in ["5k", "10k", "Half"] {
            app.create_key_result(id, title, None).await;
        }

        let res = app.get(&routes::objective_key_results(id)).await;

        assert_eq!(res.status, 200);
        let krs = res.body.as_array().unwrap();
        assert_eq!(krs.len(), 3);
        let dates: Vec<&str> = krs
            .iter()
            .map(|kr| kr["expected_completion_date"].as_str().unwrap())
            .collect();
        assert!(krs.iter().all(|kr| kr["is_estimated"] == true));
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        assert!(dates.iter().all(|d| *d <= deadline.to_string().as_str()));
        assert!(dates[0] > days_from_today(5).to_string().as_str());
    }

    #[tokio::test]
    async fn explicit_dates_are_kept_and_excluded_from_the_split() {
        let app = TestApp::spawn().await;
        let deadline = days_from_today(40);
        let pinned = days_from_today(3);
        let id = app.create_objective("Ship v2", Some(deadline)).await;
        app.create_key_result(id, "Beta", Some(pinned)).await;
        app.create_key_result(id, "GA", None).await;

        let res = app.get(&routes::objective_key_results(id)).await;

        let krs = res.body.as_array().unwrap();
        assert_eq!(krs[0]["expected_completion_date"], pinned.to_string());
        assert_eq!(krs[0]["is_estimated"], false);
        assert_eq!(krs[1]["is_estimated"], true);
        let estimated = krs[1]["expected_completion_date"].as_str().unwrap();
        assert!(estimated >= days_from_today(38).to_string().as_str());
        assert!(estimated <= deadline.to_string().as_str());
    }

    #[tokio::test]
    async fn past_deadline_reports_the_objective_date() {
        let app = TestApp::spawn().await;
        let deadline = days_before_today(2);
        let id = app.create_objective("Late goal", Some(deadline)).await;
        app.create_key_result(id, "One", None).await;
        app.create_key_result(id, "Two", None).await;

        let res = app.get(&routes::objective_key_results(id)).await;

        for kr in res.body.as_array().unwrap() {
            assert_eq!(kr["expected_completion_date"], deadline.to_string());
            assert_eq!(kr["is_estimated"], true);
        }
    }

    #[tokio::test]
    async fn without_a_deadline_key_results_stay_undated() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Someday", None).await;
        app.create_key_result(id, "Start", None).await;

        let res = app.get(&routes::objective_key_results(id)).await;

        let kr = &res.body[0];
        assert!(kr["expected_completion_date"].is_null());
        assert_eq!(kr["is_estimated"], false);
    }

    #[tokio::test]
    async fn unknown_objective_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::objective_key_results(404)).await;

        assert_eq!(res.status, 404);
    }
}

mod generation {
    use super::*;
    use crate::common::StubFailure;

    #[tokio::test]
    async fn generated_batch_is_stored_undated() {
        let app = TestApp::spawn().await;
        let deadline = days_from_today(50);
        let id = app.create_objective("Learn piano", Some(deadline)).await;

        let res = app
            .post(&routes::generate_key_results(id), &json!({}))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let created = res.body.as_array().unwrap();
        assert_eq!(created.len(), 4, "blank titles are dropped");
        assert_eq!(created[0]["title"], "Learn piano - step 1");
        let dates: Vec<&str> = created
            .iter()
            .map(|kr| kr["expected_completion_date"].as_str().unwrap())
            .collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*dates.last().unwrap(), deadline.to_string());
        assert!(created.iter().all(|kr| kr["is_estimated"] == true));

        let request = app.generator.key_result_requests.lock().unwrap()[0].clone();
        assert_eq!(request.count, 4);
        assert_eq!(request.completion_date, Some(deadline));

        let first_id = created[0]["id"].as_i64().unwrap() as i32;
        let stored = app.get(&routes::key_result(first_id)).await;
        assert!(stored.body["expected_completion_date"].is_null());
    }

    #[tokio::test]
    async fn batch_after_manual_key_result_stays_ordered() {
        let app = TestApp::spawn().await;
        let deadline = days_from_today(90);
        let id = app.create_objective("Learn piano", Some(deadline)).await;
        app.create_key_result(id, "Scales", None).await;

        let res = app
            .post(&routes::generate_key_results(id), &json!({}))
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let listed = app.get(&routes::objective_key_results(id)).await;
        let listed = listed.body.as_array().unwrap();
        assert_eq!(listed.len(), 5);
        let dates: Vec<&str> = listed
            .iter()
            .map(|kr| kr["expected_completion_date"].as_str().unwrap())
            .collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]), "{dates:?}");
        assert_eq!(*dates.last().unwrap(), deadline.to_string());
        assert!(listed.iter().all(|kr| kr["is_estimated"] == true));

        // The batch response agrees with the listing.
        let created = res.body.as_array().unwrap();
        assert_eq!(created[0]["expected_completion_date"], listed[1]["expected_completion_date"]);
    }

    #[tokio::test]
    async fn batch_without_deadline_is_undated() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Read more", None).await;

        let res = app
            .post(&routes::generate_key_results(id), &json!({}))
            .await;

        assert_eq!(res.status, 201);
        for kr in res.body.as_array().unwrap() {
            assert!(kr["expected_completion_date"].is_null());
        }
    }

    #[tokio::test]
    async fn generation_failure_maps_to_bad_gateway() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Read more", None).await;
        app.generator.fail_with(StubFailure::Status(503));

        let res = app
            .post(&routes::generate_key_results(id), &json!({}))
            .await;

        assert_eq!(res.status, 502);
        assert_eq!(res.body["code"], "GENERATION_FAILED");
        let listed = app.get(&routes::objective_key_results(id)).await;
        assert!(listed.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn generation_timeout_maps_to_gateway_timeout() {
        let app = TestApp::spawn().await;
        let id = app.create_objective("Read more", None).await;
        app.generator.fail_with(StubFailure::Timeout);

        let res = app
            .post(&routes::generate_key_results(id), &json!({}))
            .await;

        assert_eq!(res.status, 504);
        assert_eq!(res.body["code"], "GENERATION_TIMEOUT");
    }
}
