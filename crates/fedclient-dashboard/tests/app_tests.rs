use crossterm::event::{KeyCode, KeyModifiers};
use serde_json::json;

use fedclient_api::{ApiError, FetchOutcome, FetchResult};
use fedclient_dashboard::{App, FetchRequest, Route};
use fedclient_protocol::{DetailPayload, SessionSummary};
use fedclient_results::{DetailOptions, ResultsListView, SessionDetailScreen};
use fedclient_state::{ClientIdentity, LoadState, ViewToken};

fn app() -> App {
    let identity = ClientIdentity {
        client_id: "client-1".into(),
        client_name: "St. Mary Clinic".into(),
        data_path: None,
    };
    App::new(identity, DetailOptions::default(), "http://localhost:8000/".into())
}

fn summaries() -> Vec<SessionSummary> {
    vec![
        SessionSummary {
            session_id: "s-1".into(),
            org_name: "Acme".into(),
        },
        SessionSummary {
            session_id: "s-2".into(),
            org_name: "Globex".into(),
        },
    ]
}

fn detail_payload() -> DetailPayload {
    DetailPayload::from_value(json!({
        "session_data": {
            "organisation_name": "Acme",
            "model_name": "cnn",
            "model_info": {"layers": [1, 2]},
            "dataset_info": {}
        },
        "test_results": {
            "round 1": {"loss": 0.5, "accuracy": 0.8},
            "round 2": {"loss": 0.4, "accuracy": 0.85}
        }
    }))
    .unwrap()
}

fn list_token(request: Option<FetchRequest>) -> ViewToken {
    match request {
        Some(FetchRequest::CompletedTrainings(token)) => token,
        other => panic!("expected list fetch, got {other:?}"),
    }
}

fn detail_token(request: Option<FetchRequest>) -> (String, ViewToken) {
    match request {
        Some(FetchRequest::TrainingResult { session_id, token }) => (session_id, token),
        other => panic!("expected detail fetch, got {other:?}"),
    }
}

fn press(app: &mut App, code: KeyCode) -> Option<FetchRequest> {
    app.handle_key(code, KeyModifiers::NONE)
}

#[test]
fn results_route_requests_list_and_renders_cards() {
    let mut app = app();
    let token = list_token(app.navigate(Route::Results));
    assert!(app.list().is_loading());

    assert!(app.apply(FetchOutcome {
        token,
        result: FetchResult::Trainings(Ok(summaries())),
    }));
    let list = app.list().ready().unwrap();
    assert_eq!(list.cards().len(), 2);
    assert!(app.last_update().is_some());
}

#[test]
fn list_error_degrades_to_empty_notice() {
    let mut app = app();
    let token = list_token(app.navigate(Route::Results));
    assert!(app.apply(FetchOutcome {
        token,
        result: FetchResult::Trainings(Err(ApiError::Status { code: 503 })),
    }));
    assert_eq!(app.list(), &LoadState::Ready(ResultsListView::Empty));
}

#[test]
fn outcome_for_unmounted_view_is_discarded() {
    let mut app = app();
    let (_, stale) = detail_token(app.navigate(Route::SessionDetail("s-1".into())));
    let _fresh = detail_token(app.navigate(Route::SessionDetail("s-2".into())));

    assert!(!app.apply(FetchOutcome {
        token: stale,
        result: FetchResult::Detail(Ok(detail_payload())),
    }));
    assert!(app.detail().is_loading());
}

#[test]
fn outcome_after_leaving_view_is_discarded() {
    let mut app = app();
    let token = list_token(app.navigate(Route::Results));
    assert_eq!(app.navigate(Route::About), None);

    assert!(!app.apply(FetchOutcome {
        token,
        result: FetchResult::Trainings(Ok(summaries())),
    }));
    assert!(app.list().is_loading());
}

#[test]
fn enter_opens_selected_card() {
    let mut app = app();
    let token = list_token(app.navigate(Route::Results));
    app.apply(FetchOutcome {
        token,
        result: FetchResult::Trainings(Ok(summaries())),
    });

    assert_eq!(press(&mut app, KeyCode::Down), None);
    assert_eq!(press(&mut app, KeyCode::Down), None);
    assert_eq!(app.list_cursor(), 1);

    let (session_id, _) = detail_token(press(&mut app, KeyCode::Enter));
    assert_eq!(session_id, "s-2");
    assert_eq!(app.route(), &Route::SessionDetail("s-2".into()));
}

#[test]
fn detail_keys_toggle_details_and_cycle_metrics() {
    let mut app = app();
    let (_, token) = detail_token(app.navigate(Route::SessionDetail("s-1".into())));
    app.apply(FetchOutcome {
        token,
        result: FetchResult::Detail(Ok(detail_payload())),
    });

    press(&mut app, KeyCode::Char('m'));
    press(&mut app, KeyCode::Char('d'));
    let view = app.detail().ready().and_then(SessionDetailScreen::view).unwrap();
    assert_eq!(view.chart.selected(), Some("loss"));
    assert!(view.details().is_some());

    press(&mut app, KeyCode::Char('M'));
    let view = app.detail().ready().and_then(SessionDetailScreen::view).unwrap();
    assert_eq!(view.chart.selected(), None);
}

#[test]
fn missing_session_shows_not_found() {
    let mut app = app();
    let (_, token) = detail_token(app.navigate(Route::SessionDetail("nope".into())));
    app.apply(FetchOutcome {
        token,
        result: FetchResult::Detail(Ok(DetailPayload::Missing)),
    });
    assert!(matches!(
        app.detail().ready(),
        Some(SessionDetailScreen::NotFound)
    ));
}

#[test]
fn unknown_session_message_body_shows_not_found() {
    let mut app = app();
    let (_, token) = detail_token(app.navigate(Route::SessionDetail("nope".into())));
    let payload =
        DetailPayload::from_value(json!({"message": "No training results with this session_id"}))
            .unwrap();
    assert!(app.apply(FetchOutcome {
        token,
        result: FetchResult::Detail(Ok(payload)),
    }));
    assert!(matches!(
        app.detail().ready(),
        Some(SessionDetailScreen::NotFound)
    ));
}

#[test]
fn repeated_navigation_to_same_route_adds_no_history() {
    let mut app = app();
    list_token(press(&mut app, KeyCode::Char('r')));
    list_token(press(&mut app, KeyCode::Char('r')));
    list_token(press(&mut app, KeyCode::Char('r')));

    assert_eq!(press(&mut app, KeyCode::Esc), None);
    assert_eq!(app.route(), &Route::Home);
    assert_eq!(press(&mut app, KeyCode::Esc), None);
    assert_eq!(app.route(), &Route::Home);
}

#[test]
fn history_keeps_only_recent_routes() {
    let mut app = app();
    for _ in 0..100 {
        app.navigate(Route::Results);
        app.navigate(Route::About);
    }

    let mut steps = 0;
    loop {
        let before = app.route().clone();
        app.back();
        if app.route() == &before {
            break;
        }
        steps += 1;
    }
    assert_eq!(steps, 64);
}

#[test]
fn back_remounts_previous_view() {
    let mut app = app();
    list_token(app.navigate(Route::Results));
    detail_token(app.navigate(Route::SessionDetail("s-1".into())));

    let token = list_token(press(&mut app, KeyCode::Esc));
    assert_eq!(app.route(), &Route::Results);
    assert!(app.apply(FetchOutcome {
        token,
        result: FetchResult::Trainings(Ok(Vec::new())),
    }));
}

#[test]
fn quit_and_shutdown_release_identity() {
    let mut app = app();
    assert_eq!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL), None);
    assert!(app.should_quit());

    let identity = app.shutdown().unwrap();
    assert_eq!(identity.client_id, "client-1");
    assert!(app.identity().is_none());
}
