//! Seller workflow: sign in, fill the listing form, post it.

mod common;

use chrono::{Duration as ChronoDuration, Local};
use common::{id_token_for, Call, FakeMarketplace, TestEnv};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bidmart::app::App;
use bidmart::config::Config;
use bidmart::flow::{NoticeKind, Route};
use bidmart::forms::SellerForm;
use bidmart::location::DEFAULT_LOCATION;
use bidmart::media::{FsMediaSource, MediaSource};
use bidmart::services::{Task, TaskOutcome};
use bidmart::session::{save_session, Session, SessionStore};

fn key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    app.handle_event(Event::Key(KeyEvent::new(code, modifiers)))
        .unwrap();
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        key(app, KeyCode::Char(c), KeyModifiers::NONE);
    }
}

fn ctrl(app: &mut App, c: char) {
    key(app, KeyCode::Char(c), KeyModifiers::CONTROL);
}

fn wait_idle(app: &mut App) {
    for _ in 0..500 {
        app.tick();
        if !app.is_busy() {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("task did not finish");
}

fn signed_in_store(env: &TestEnv) -> Arc<dyn SessionStore> {
    let store = env.store();
    save_session(
        store.as_ref(),
        &Session::new("access", id_token_for("seller-7"), "refresh"),
    )
    .unwrap();
    store
}

fn valid_form() -> SellerForm {
    let mut form = SellerForm::starting_at(Local::now() + ChronoDuration::hours(1));
    form.name.set_text("Brass lamp");
    form.description.set_text("A vintage brass lamp in working order");
    form.price.set_text("1500");
    form
}

#[test]
fn test_sign_in_then_post_listing_from_seller_view() {
    let env = TestEnv::new();
    env.add_photo("lamp.jpg", 2048);
    env.add_photo("lamp-side.jpg", 4096);

    let api = Arc::new(FakeMarketplace::new());
    let runner = env.runner(api.clone(), env.store());
    let mut app = App::with_runner(Config::default(), PathBuf::from("config.toml"), runner).unwrap();

    type_text(&mut app, "9876543210");
    key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
    wait_idle(&mut app);
    type_text(&mut app, "123456");
    key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
    wait_idle(&mut app);
    assert_eq!(app.route(), &Route::RoleToggle);

    // Dismiss the sign-in notice and switch to selling
    key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
    ctrl(&mut app, 'r');

    type_text(&mut app, "Brass lamp");
    key(&mut app, KeyCode::Tab, KeyModifiers::NONE); // email
    key(&mut app, KeyCode::Tab, KeyModifiers::NONE); // photos
    type_text(&mut app, "lamp.jpg, lamp-side.jpg");
    ctrl(&mut app, 'o');
    key(&mut app, KeyCode::Tab, KeyModifiers::NONE); // description
    type_text(&mut app, "A vintage brass lamp");
    key(&mut app, KeyCode::Tab, KeyModifiers::NONE); // location
    key(&mut app, KeyCode::Tab, KeyModifiers::NONE); // price
    type_text(&mut app, "1500");
    ctrl(&mut app, 's');
    wait_idle(&mut app);

    let notice = app.notice().expect("post notice");
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, "Product added! ID: prod-1");

    let posted = api
        .calls()
        .into_iter()
        .find_map(|call| match call {
            Call::AddProduct(input) => Some(input),
            _ => None,
        })
        .expect("addProduct called");
    assert_eq!(posted.name, "Brass lamp");
    assert_eq!(posted.expected_price, 1500.0);
    assert_eq!(posted.user_id, "user-42");
    assert_eq!(posted.location, DEFAULT_LOCATION);
    assert_eq!(posted.location_name, "Unknown");
    assert_eq!(posted.image_urls.len(), 2);
    assert!(posted.image_urls[0].ends_with("lamp.jpg"));
    assert!(posted.bid_end_date > posted.bid_start_date);
}

#[tokio::test]
async fn test_listing_uses_session_user_and_photos() {
    let env = TestEnv::new();
    let photo = env.add_photo("chair.png", 1024);
    let api = Arc::new(FakeMarketplace::new());
    let runner = env.runner(api.clone(), signed_in_store(&env));

    let media = FsMediaSource::new(&env.library_dir.to_string_lossy(), &[]);
    let mut form = valid_form();
    form.location.set_text("Indiranagar");
    let refused = form
        .photos
        .add_all(media.pick_from_library(&photo.to_string_lossy()).unwrap());
    assert!(refused.is_empty());

    let draft = form.validate().unwrap();
    match runner.run(Task::SubmitListing { draft }).await {
        TaskOutcome::Posted(Ok(notice)) => assert_eq!(notice.title, "Success"),
        other => panic!("expected a posted listing, got {other:?}"),
    }

    match &api.calls()[0] {
        Call::AddProduct(input) => {
            assert_eq!(input.user_id, "seller-7");
            assert_eq!(input.location_name, "Indiranagar");
            assert_eq!(input.image_urls.len(), 1);
        }
        other => panic!("expected addProduct, got {other:?}"),
    }
}

#[tokio::test]
async fn test_listing_without_session_is_refused_locally() {
    let env = TestEnv::new();
    let api = Arc::new(FakeMarketplace::new());
    let runner = env.runner(api.clone(), env.store());

    let draft = valid_form().validate().unwrap();
    match runner.run(Task::SubmitListing { draft }).await {
        TaskOutcome::Posted(Err(e)) => assert_eq!(e.title(), "Sign in required"),
        other => panic!("expected refusal, got {other:?}"),
    }
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_taken_listing_email_stops_before_posting() {
    let env = TestEnv::new();
    let api = Arc::new(FakeMarketplace::new().with_taken_email("shop@example.com"));
    let runner = env.runner(api.clone(), signed_in_store(&env));

    let mut form = valid_form();
    form.email.set_text("shop@example.com");
    let draft = form.validate().unwrap();

    match runner.run(Task::SubmitListing { draft }).await {
        TaskOutcome::Posted(Err(e)) => {
            assert_eq!(e.title(), "Email already used");
            assert_eq!(e.message(), "Email already registered");
        }
        other => panic!("expected email refusal, got {other:?}"),
    }
    assert_eq!(
        api.calls(),
        vec![Call::VerifyEmail("shop@example.com".to_string())]
    );
}

#[tokio::test]
async fn test_offline_post_reports_network_message() {
    let env = TestEnv::new();
    let api = Arc::new(FakeMarketplace::new().offline("Network request failed"));
    let runner = env.runner(api, signed_in_store(&env));

    let draft = valid_form().validate().unwrap();
    match runner.run(Task::SubmitListing { draft }).await {
        TaskOutcome::Posted(Err(e)) => assert_eq!(e.message(), "Network request failed"),
        other => panic!("expected transport failure, got {other:?}"),
    }
}
