use petnamer_core::{
    Category, Clipboard, Command, Coordinator, CoordinatorSettings, CountDirection,
    HttpResponse, MemoryClipboard, MockHttpClient, NotificationDurations, OperationState,
    Presentation, Resolution, ServiceError, ServiceStatus, Severity,
};
use serde_json::json;
use std::time::Duration;

fn setup() -> (Coordinator<MockHttpClient>, MockHttpClient, MemoryClipboard) {
    let mock = MockHttpClient::new();
    let (clipboard, memory) = Clipboard::in_memory();
    let coordinator = Coordinator::new(
        mock.clone(),
        CoordinatorSettings {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(10),
            initial_count: 1,
            durations: NotificationDurations::default(),
        },
        clipboard,
    );
    (coordinator, mock, memory)
}

fn names_body(names: &[&str]) -> HttpResponse {
    HttpResponse::json(json!({ "names": names, "count": names.len() }))
}

fn fact_body(fact: &str) -> HttpResponse {
    HttpResponse::json(json!({ "fact": fact }))
}

async fn select(c: &mut Coordinator<MockHttpClient>, mock: &MockHttpClient, category: Category) {
    mock.add_response(
        &format!("GET /pets/{}/facts/random", category.as_str()),
        Ok(fact_body("A fact.")),
    );
    c.dispatch(Command::SelectCategory(category));
    assert_eq!(c.settle_next().await, Some(Resolution::Applied));
}

#[tokio::test]
async fn random_name_shows_single_name_and_leaves_fact_alone() {
    let (mut c, mock, _) = setup();
    select(&mut c, &mock, Category::Dog).await;
    assert_eq!(c.reconciler().fact(), "A fact.");

    mock.add_response(
        "GET /pets/dog/random",
        Ok(HttpResponse::json(json!({ "pet_type": "dog", "name": "Rex" }))),
    );
    c.dispatch(Command::RandomName);
    assert!(!c.controls_enabled());
    assert_eq!(c.settle_next().await, Some(Resolution::Applied));

    assert_eq!(c.reconciler().presentation(), Presentation::Single("Rex"));
    assert_eq!(c.reconciler().fact(), "A fact.");
    assert!(c.controls_enabled());
    assert!(c.feedback().notifications().is_empty());
}

#[tokio::test]
async fn generate_renders_requested_count_in_order() {
    let (mut c, mock, _) = setup();
    select(&mut c, &mock, Category::Cat).await;
    c.dispatch(Command::SetCount(4));
    c.dispatch(Command::AdjustCount(CountDirection::Increase));
    assert_eq!(c.selection().count().get(), 5);

    mock.add_response(
        "GET /pets/cat/names?count=5&random_selection=true",
        Ok(names_body(&["Luna", "Milo", "Nala", "Oliver", "Kitty"])),
    );
    c.dispatch(Command::GenerateNames);
    assert_eq!(c.names_state(), OperationState::InFlight);
    c.settle_next().await;

    match c.reconciler().presentation() {
        Presentation::Tags(names) => {
            assert_eq!(names, ["Luna", "Milo", "Nala", "Oliver", "Kitty"])
        }
        other => panic!("expected tags, got {:?}", other),
    }
    assert_eq!(c.names_state(), OperationState::Succeeded);
    assert!(!c.is_loading());
}

#[tokio::test]
async fn server_error_notifies_and_keeps_previous_results() {
    let (mut c, mock, _) = setup();
    select(&mut c, &mock, Category::Dog).await;

    mock.add_response(
        "GET /pets/dog/names?count=1&random_selection=true",
        Ok(names_body(&["Buddy"])),
    );
    c.dispatch(Command::GenerateNames);
    c.settle_next().await;

    mock.add_response(
        "GET /pets/dog/random",
        Ok(HttpResponse::status(500, "Internal Server Error")),
    );
    c.dispatch(Command::RandomName);
    assert_eq!(c.settle_next().await, Some(Resolution::Failed));

    let error = c.feedback().latest(Severity::Error).expect("error notification");
    assert!(error.message.contains("500"));
    assert_eq!(c.reconciler().names(), ["Buddy"]);
    assert_eq!(c.names_state(), OperationState::Failed);
    assert!(c.controls_enabled());
    assert_eq!(c.service_status(), &ServiceStatus::Online);
}

#[tokio::test]
async fn late_response_from_superseded_generate_is_ignored() {
    let (mut c, mock, _) = setup();
    select(&mut c, &mock, Category::Bird).await;

    let key = "GET /pets/bird/names?count=1&random_selection=true";
    let first = mock.add_response_with_trigger(key, Ok(names_body(&["Tweety"])));
    let second = mock.add_response_with_trigger(key, Ok(names_body(&["Kiwi"])));

    c.dispatch(Command::GenerateNames);
    c.dispatch(Command::GenerateNames);
    while mock.call_count() < 3 {
        tokio::task::yield_now().await;
    }
    c.pump(std::time::Instant::now());
    assert!(c.is_loading());

    second.send(()).unwrap();
    assert_eq!(c.settle_next().await, Some(Resolution::Applied));
    assert_eq!(c.reconciler().names(), ["Kiwi"]);

    first.send(()).unwrap();
    assert_eq!(c.settle_next().await, Some(Resolution::Stale));
    assert_eq!(c.reconciler().names(), ["Kiwi"]);
    assert!(c.controls_enabled());
    assert!(!c.is_loading());
}

#[tokio::test]
async fn triggers_without_category_send_nothing() {
    let (mut c, mock, _) = setup();
    c.dispatch(Command::GenerateNames);
    c.dispatch(Command::RandomName);
    tokio::task::yield_now().await;

    assert_eq!(mock.call_count(), 0);
    assert!(!c.reconciler().has_results());
    assert!(c.feedback().notifications().is_empty());
}

#[tokio::test]
async fn fact_failure_falls_back_without_notification() {
    let (mut c, mock, _) = setup();
    mock.add_response(
        "GET /pets/fish/facts/random",
        Ok(HttpResponse::status(503, "Service Unavailable")),
    );
    c.dispatch(Command::SelectCategory(Category::Fish));
    assert_eq!(c.settle_next().await, Some(Resolution::Failed));

    assert_eq!(c.reconciler().fact(), "Learning about pets is fun! 🐾");
    assert!(c.feedback().notifications().is_empty());
    assert!(c.controls_enabled());
}

#[tokio::test]
async fn global_fact_without_text_uses_global_fallback() {
    let (mut c, mock, _) = setup();
    mock.add_response("GET /facts/random", Ok(HttpResponse::json(json!({ "pet_type": "cat" }))));
    c.dispatch(Command::LoadGlobalFact);
    c.settle_next().await;

    assert_eq!(
        c.reconciler().fact(),
        "Press Space to generate names and discover fun pet facts!"
    );
}

#[tokio::test]
async fn fact_for_previous_category_is_discarded() {
    let (mut c, mock, _) = setup();
    let dog = mock.add_response_with_trigger("GET /pets/dog/facts/random", Ok(fact_body("Dogs!")));
    let cat = mock.add_response_with_trigger("GET /pets/cat/facts/random", Ok(fact_body("Cats!")));

    c.dispatch(Command::SelectCategory(Category::Dog));
    c.dispatch(Command::SelectCategory(Category::Cat));
    while mock.call_count() < 2 {
        tokio::task::yield_now().await;
    }

    cat.send(()).unwrap();
    assert_eq!(c.settle_next().await, Some(Resolution::Applied));
    dog.send(()).unwrap();
    assert_eq!(c.settle_next().await, Some(Resolution::Stale));

    assert_eq!(c.reconciler().fact(), "Cats!");
    assert_eq!(c.selection().category(), Some(Category::Cat));
}

#[tokio::test]
async fn copy_places_joined_names_and_single_names_on_clipboard() {
    let (mut c, mock, memory) = setup();
    c.dispatch(Command::CopyResults);
    assert_eq!(memory.contents(), None);
    assert!(c.feedback().notifications().is_empty());

    select(&mut c, &mock, Category::Rabbit).await;
    c.dispatch(Command::SetCount(2));
    mock.add_response(
        "GET /pets/rabbit/names?count=2&random_selection=true",
        Ok(names_body(&["Thumper", "Clover"])),
    );
    c.dispatch(Command::GenerateNames);
    c.settle_next().await;

    c.dispatch(Command::CopyResults);
    assert_eq!(memory.contents().as_deref(), Some("Thumper, Clover"));
    assert_eq!(
        c.feedback().latest(Severity::Success).map(|n| n.message.as_str()),
        Some("Names copied to clipboard! 🎉")
    );

    c.dispatch(Command::CopyName(1));
    assert_eq!(memory.contents().as_deref(), Some("Clover"));
    assert_eq!(
        c.feedback().latest(Severity::Success).map(|n| n.message.as_str()),
        Some("Copied \"Clover\" to clipboard!")
    );

    c.dispatch(Command::CopyName(7));
    assert_eq!(memory.contents().as_deref(), Some("Clover"));
}

#[tokio::test]
async fn unreachable_service_goes_offline_then_recovers() {
    let (mut c, mock, _) = setup();
    mock.add_response(
        "GET /health",
        Err(ServiceError::connectivity("Failed to connect to the API. Please try again.")),
    );
    c.dispatch(Command::CheckHealth);
    assert_eq!(c.settle_next().await, Some(Resolution::Failed));
    assert!(matches!(c.service_status(), ServiceStatus::Offline(_)));
    let error = c.feedback().latest(Severity::Error).expect("offline notice");
    assert!(error.message.contains("http://localhost:8000"));

    mock.add_response("GET /health", Ok(HttpResponse::json(json!({ "status": "healthy" }))));
    c.dispatch(Command::CheckHealth);
    assert_eq!(c.settle_next().await, Some(Resolution::Applied));

    assert_eq!(c.service_status(), &ServiceStatus::Online);
    assert!(c.feedback().latest(Severity::Error).is_none());
    assert_eq!(
        c.feedback().latest(Severity::Success).map(|n| n.message.as_str()),
        Some("Back online! 🌐")
    );
}

#[tokio::test]
async fn health_http_error_does_not_mark_service_offline() {
    let (mut c, mock, _) = setup();
    mock.add_response("GET /health", Ok(HttpResponse::status(500, "Internal Server Error")));
    c.dispatch(Command::CheckHealth);
    assert_eq!(c.settle_next().await, Some(Resolution::Failed));
    assert!(!matches!(c.service_status(), ServiceStatus::Offline(_)));
    let error = c.feedback().latest(Severity::Error).expect("unreachable notice");
    assert!(error.message.contains("500"));

    select(&mut c, &mock, Category::Dog).await;

    assert_eq!(c.service_status(), &ServiceStatus::Online);
    let messages: Vec<_> = c
        .feedback()
        .notifications()
        .iter()
        .map(|n| (n.severity, n.message.as_str()))
        .collect();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, Severity::Error);
    assert!(c.feedback().latest(Severity::Success).is_none());
}

#[tokio::test]
async fn dismissing_errors_clears_them() {
    let (mut c, mock, _) = setup();
    select(&mut c, &mock, Category::Dog).await;
    mock.add_response("GET /pets/dog/random", Ok(HttpResponse::status(500, "Internal Server Error")));
    c.dispatch(Command::RandomName);
    c.settle_next().await;

    let id = c.feedback().notifications()[0].id;
    c.dispatch(Command::Dismiss(id));
    assert!(c.feedback().notifications().is_empty());
}

#[tokio::test(start_paused = true)]
async fn stalled_generate_times_out_with_notification() {
    let (mut c, mock, _) = setup();
    select(&mut c, &mock, Category::Cat).await;
    let _held = mock.add_response_with_trigger(
        "GET /pets/cat/names?count=1&random_selection=true",
        Ok(names_body(&["Late"])),
    );

    c.dispatch(Command::GenerateNames);
    assert_eq!(c.settle_next().await, Some(Resolution::Failed));

    let error = c.feedback().latest(Severity::Error).expect("timeout notice");
    assert!(error.message.contains("timed out"));
    assert!(matches!(c.service_status(), ServiceStatus::Offline(_)));
    assert!(c.controls_enabled());
}
