//! Sign-in workflows: phone entry through to the role screen.

mod common;

use common::{id_token_for, Call, FakeMarketplace, TestEnv};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bidmart::app::App;
use bidmart::config::Config;
use bidmart::flow::{FlowError, NoticeKind, Route, Transition};
use bidmart::services::{Registration, Task, TaskOutcome};
use bidmart::session::{load_session, MemorySessionStore, SessionStore};

fn press(app: &mut App, code: KeyCode) {
    app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
        .unwrap();
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Tick until the running task has reported
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

fn app_with(env: &TestEnv, api: Arc<FakeMarketplace>, store: Arc<dyn SessionStore>) -> App {
    let runner = env.runner(api, store);
    App::with_runner(Config::default(), PathBuf::from("config.toml"), runner).unwrap()
}

#[test]
fn test_returning_user_signs_in() {
    let env = TestEnv::new();
    let api = Arc::new(FakeMarketplace::new());
    let mut app = app_with(&env, api.clone(), env.store());

    type_text(&mut app, "9876543210");
    press(&mut app, KeyCode::Enter);
    wait_idle(&mut app);

    assert_eq!(
        app.route(),
        &Route::VerifyOtp {
            phone: "+919876543210".to_string()
        }
    );
    assert!(app.notice().is_none());

    type_text(&mut app, "123456");
    press(&mut app, KeyCode::Enter);
    wait_idle(&mut app);

    assert_eq!(app.route(), &Route::RoleToggle);
    // Verification replaces the OTP route rather than stacking on it
    assert_eq!(app.navigator().history(), &[Route::Login, Route::RoleToggle]);

    let notice = app.notice().expect("success notice");
    assert_eq!(notice.title, "Success");
    assert_eq!(notice.message, "OTP verified successfully!");
    assert_eq!(notice.kind, NoticeKind::Success);

    // Tokens survive on disk
    let session = load_session(env.store().as_ref()).unwrap().expect("stored session");
    assert_eq!(session.access_token, "access-token-value");
    assert_eq!(session.user_id().as_deref(), Some("user-42"));

    assert_eq!(
        api.calls()[0],
        Call::SendOtp("+919876543210".to_string())
    );
}

#[test]
fn test_new_user_registers_and_lands_on_roles() {
    let env = TestEnv::new();
    let api = Arc::new(FakeMarketplace::new().new_user());
    let mut app = app_with(&env, api.clone(), env.store());

    type_text(&mut app, "+447700900123");
    press(&mut app, KeyCode::Enter);
    wait_idle(&mut app);
    assert_eq!(
        app.route(),
        &Route::RegisterAndOtp {
            phone: "+447700900123".to_string()
        }
    );

    type_text(&mut app, "Asha");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "asha@example.com");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "123456");
    press(&mut app, KeyCode::Enter);
    wait_idle(&mut app);

    assert_eq!(app.route(), &Route::RoleToggle);
    // The registration path lands without a notice
    assert!(app.notice().is_none());

    let calls = api.calls();
    assert_eq!(calls[1], Call::VerifyEmail("asha@example.com".to_string()));
    match &calls[2] {
        Call::VerifyOtp(input) => {
            assert_eq!(input.phone_number, "+447700900123");
            assert_eq!(input.first_name.as_deref(), Some("Asha"));
        }
        other => panic!("expected verifyOTP, got {other:?}"),
    }

    assert!(load_session(env.store().as_ref()).unwrap().is_some());
}

#[test]
fn test_wrong_code_keeps_user_on_otp_screen() {
    let env = TestEnv::new();
    let api = Arc::new(FakeMarketplace::new());
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let mut app = app_with(&env, api, store.clone());

    type_text(&mut app, "9876543210");
    press(&mut app, KeyCode::Enter);
    wait_idle(&mut app);

    type_text(&mut app, "654321");
    press(&mut app, KeyCode::Enter);
    wait_idle(&mut app);

    assert!(matches!(app.route(), Route::VerifyOtp { .. }));
    let notice = app.notice().expect("failure notice");
    assert_eq!(notice.title, "Failed");
    assert_eq!(notice.message, "Invalid OTP");
    assert!(load_session(store.as_ref()).unwrap().is_none());

    // Dismiss, then go back to the phone screen
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.route(), &Route::Login);
}

#[tokio::test]
async fn test_invalid_phone_makes_no_call() {
    let env = TestEnv::new();
    let api = Arc::new(FakeMarketplace::new());
    let runner = env.runner(api.clone(), env.store());

    let outcome = runner
        .run(Task::RequestOtp {
            phone: "12345".to_string(),
        })
        .await;

    match outcome {
        TaskOutcome::Navigated(Err(e)) => {
            assert!(e.is_local_validation());
            assert_eq!(e.title(), "Invalid Phone");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_registration_requires_name_before_any_call() {
    let env = TestEnv::new();
    let api = Arc::new(FakeMarketplace::new().new_user());
    let runner = env.runner(api.clone(), env.store());

    let outcome = runner
        .run(Task::RegisterAndVerify {
            phone: "+919876543210".to_string(),
            registration: Registration {
                first_name: "  ".to_string(),
                email: String::new(),
                otp: "123456".to_string(),
            },
        })
        .await;

    assert!(matches!(
        outcome,
        TaskOutcome::Navigated(Err(FlowError::Invalid { .. }))
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_taken_email_blocks_registration() {
    let env = TestEnv::new();
    let api = Arc::new(FakeMarketplace::new().new_user().with_taken_email("taken@example.com"));
    let store = env.store();
    let runner = env.runner(api.clone(), store.clone());

    let outcome = runner
        .run(Task::RegisterAndVerify {
            phone: "+919876543210".to_string(),
            registration: Registration {
                first_name: "Ravi".to_string(),
                email: "taken@example.com".to_string(),
                otp: "123456".to_string(),
            },
        })
        .await;

    match outcome {
        TaskOutcome::Navigated(Err(e)) => {
            assert_eq!(e.title(), "Email Unavailable");
            assert_eq!(e.message(), "Email already registered");
        }
        other => panic!("expected email refusal, got {other:?}"),
    }
    // verifyOTP never ran
    assert_eq!(api.calls().len(), 1);
    assert!(load_session(store.as_ref()).unwrap().is_none());
}

#[tokio::test]
async fn test_network_failure_surfaces_transport_message() {
    let env = TestEnv::new();
    let api = Arc::new(FakeMarketplace::new().offline("connection refused"));
    let runner = env.runner(api, env.store());

    let outcome = runner
        .run(Task::VerifyOtp {
            phone: "+919876543210".to_string(),
            code: "123456".to_string(),
        })
        .await;

    match outcome {
        TaskOutcome::Navigated(Err(e)) => assert_eq!(e.message(), "connection refused"),
        other => panic!("expected transport failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_both_paths_store_the_same_token_set() {
    for new_user in [false, true] {
        let env = TestEnv::new();
        let api = if new_user {
            Arc::new(FakeMarketplace::new().new_user())
        } else {
            Arc::new(FakeMarketplace::new())
        };
        let store = env.store();
        let runner = env.runner(api, store.clone());

        let task = if new_user {
            Task::RegisterAndVerify {
                phone: "+919876543210".to_string(),
                registration: Registration {
                    first_name: "Asha".to_string(),
                    email: String::new(),
                    otp: "123456".to_string(),
                },
            }
        } else {
            Task::VerifyOtp {
                phone: "+919876543210".to_string(),
                code: "123456".to_string(),
            }
        };

        match runner.run(task).await {
            TaskOutcome::Navigated(Ok(nav)) => {
                assert_eq!(nav.transition, Transition::Replace(Route::RoleToggle));
            }
            other => panic!("expected sign-in, got {other:?}"),
        }

        let session = load_session(store.as_ref()).unwrap().expect("stored session");
        assert_eq!(session.id_token, id_token_for("user-42"));
        assert_eq!(session.refresh_token, "refresh-token-value");
    }
}

#[test]
fn test_escape_during_verification_waits_for_the_result() {
    let env = TestEnv::new();
    let api = Arc::new(FakeMarketplace::new());
    let mut app = app_with(&env, api, env.store());

    type_text(&mut app, "9876543210");
    press(&mut app, KeyCode::Enter);
    wait_idle(&mut app);

    type_text(&mut app, "123456");
    press(&mut app, KeyCode::Enter);
    assert!(app.is_busy());
    press(&mut app, KeyCode::Esc);
    assert!(matches!(app.route(), Route::VerifyOtp { .. }));

    wait_idle(&mut app);
    assert_eq!(app.route(), &Route::RoleToggle);
    assert_eq!(app.navigator().history(), &[Route::Login, Route::RoleToggle]);
}

#[test]
fn test_four_digit_code_signs_in() {
    let env = TestEnv::new();
    let mut fake = FakeMarketplace::new();
    fake.valid_otp = "1234".to_string();
    let api = Arc::new(fake);
    let mut app = app_with(&env, api.clone(), env.store());

    type_text(&mut app, "9876543210");
    press(&mut app, KeyCode::Enter);
    wait_idle(&mut app);

    type_text(&mut app, "1234");
    press(&mut app, KeyCode::Enter);
    wait_idle(&mut app);

    assert_eq!(app.route(), &Route::RoleToggle);
    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    match &calls[1] {
        Call::VerifyOtp(input) => {
            assert_eq!(input.phone_number, "+919876543210");
            assert_eq!(input.otp, "1234");
        }
        other => panic!("expected verifyOTP, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_email_blocks_registration_before_any_call() {
    let env = TestEnv::new();
    let api = Arc::new(FakeMarketplace::new().new_user());
    let runner = env.runner(api.clone(), env.store());

    let outcome = runner
        .run(Task::RegisterAndVerify {
            phone: "+919876543210".to_string(),
            registration: Registration {
                first_name: "Ravi".to_string(),
                email: "not-an-email".to_string(),
                otp: "123456".to_string(),
            },
        })
        .await;

    match outcome {
        TaskOutcome::Navigated(Err(e)) => {
            assert!(e.is_local_validation());
            assert_eq!(e.title(), "Invalid Email");
        }
        other => panic!("expected email validation failure, got {other:?}"),
    }
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_short_code_never_reaches_verification() {
    let env = TestEnv::new();
    let api = Arc::new(FakeMarketplace::new().new_user());
    let runner = env.runner(api.clone(), env.store());

    let tasks = [
        Task::VerifyOtp {
            phone: "+919876543210".to_string(),
            code: "123".to_string(),
        },
        Task::RegisterAndVerify {
            phone: "+919876543210".to_string(),
            registration: Registration {
                first_name: "Ravi".to_string(),
                email: String::new(),
                otp: "123".to_string(),
            },
        },
    ];

    for task in tasks {
        match runner.run(task).await {
            TaskOutcome::Navigated(Err(e)) => {
                assert!(e.is_local_validation());
                assert_eq!(e.title(), "Invalid OTP");
            }
            other => panic!("expected OTP validation failure, got {other:?}"),
        }
    }
    assert!(api.calls().is_empty());
}
