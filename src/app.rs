use crate::api;
use crate::components::HelpOverlay;
use crate::config::Config;
use crate::flow::{Navigator, Notice, Route, Transition};
use crate::keymap::{Action, ParsedKey};
use crate::location::ConfiguredLocation;
use crate::media::FsMediaSource;
use crate::screens::{screen_for, RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{TaskHandle, TaskRunner};
use crate::session::{FileSessionStore, SessionStore, StoredSession};
use crate::styles::{init_theme, ThemeType};
use crate::tui::Tui;
use crate::utils::path::format_path_for_display;
use crate::utils::{get_config_path, get_session_path};
use crate::widgets::Dialog;
use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

/// How often terminal events and background tasks are polled
const TICK: Duration = Duration::from_millis(250);

/// Command-line overrides for the interactive app
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub api_url: Option<String>,
    pub theme: Option<String>,
}

/// A running task and the depth of the screen that spawned it
struct PendingTask {
    depth: usize,
    handle: TaskHandle,
}

/// Main application state
pub struct App {
    config: Config,
    config_path: PathBuf,
    runtime: Runtime,
    runner: TaskRunner,
    navigator: Navigator,
    /// One controller per route in the navigator's history
    screens: Vec<Box<dyn Screen>>,
    notice: Option<Notice>,
    show_help: bool,
    pending: Option<PendingTask>,
    should_quit: bool,
}

impl App {
    /// Load the config, open the session store and connect to the API
    pub fn new(options: AppOptions) -> Result<Self> {
        let config_path = get_config_path();
        let config = Config::load_or_create(&config_path)?;

        let theme = options.theme.as_deref().unwrap_or(&config.theme);
        let theme_type = if std::env::var_os("NO_COLOR").is_some() {
            ThemeType::NoColor
        } else {
            theme.parse::<ThemeType>().unwrap_or_default()
        };
        init_theme(theme_type);

        for binding in config.keymap.invalid_overrides() {
            warn!("Ignoring keymap override with invalid key '{}'", binding.key);
        }

        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::open(&get_session_path())?);
        let endpoint = config.api_url_with_env(options.api_url.as_deref());
        info!("Using GraphQL endpoint {}", endpoint);

        let api = api::connect(&endpoint, Arc::new(StoredSession::new(store.clone())));
        let runner = TaskRunner::new(
            Arc::new(api),
            store,
            Arc::new(FsMediaSource::new(
                &config.media.library_dir,
                &config.media.camera_command,
            )),
            Arc::new(ConfiguredLocation::new(config.location.clone())),
            config.country_code.clone(),
        );

        Self::with_runner(config, config_path, runner)
    }

    /// Build the app around an existing runner
    pub fn with_runner(config: Config, config_path: PathBuf, runner: TaskRunner) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let navigator = Navigator::new();
        let screens = vec![screen_for(navigator.current())];

        Ok(Self {
            config,
            config_path,
            runtime,
            runner,
            navigator,
            screens,
            notice: None,
            show_help: false,
            pending: None,
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let result = self.event_loop(&mut tui);
        if let Err(e) = &result {
            error!("UI loop failed: {:#}", e);
        }

        tui.exit()?;
        result
    }

    fn event_loop(&mut self, tui: &mut Tui) -> Result<()> {
        loop {
            self.draw(tui)?;

            if self.should_quit {
                info!("Quitting");
                return Ok(());
            }

            if let Some(event) = tui.poll_event(TICK)? {
                self.handle_event(event)?;
            }
            self.tick();
        }
    }

    pub fn route(&self) -> &Route {
        self.navigator.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_help_shown(&self) -> bool {
        self.show_help
    }

    fn draw(&mut self, tui: &mut Tui) -> Result<()> {
        let config = &self.config;
        let config_path = &self.config_path;
        let notice = &self.notice;
        let show_help = self.show_help;
        let screens = &mut self.screens;

        let ctx = RenderContext::new(config, self.pending.is_some());
        let mut render_result = Ok(());

        tui.draw(|frame| {
            let area = frame.area();
            if let Some(screen) = screens.last_mut() {
                render_result = screen.render(frame, area, &ctx);
            }
            if show_help {
                let path = format_path_for_display(config_path);
                if let Err(e) = HelpOverlay::render(frame, area, &config.keymap, &path) {
                    render_result = Err(e);
                }
            }
            if let Some(notice) = notice.as_ref() {
                let hint = config.keymap.hint(Action::Confirm, "OK");
                frame.render_widget(Dialog::from_notice(notice).footer(&hint), area);
            }
        })?;

        render_result
    }

    /// Route one terminal event: open notice or help first, then global
    /// chords, then the current screen.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = &event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        let action = self.config.keymap.get_action(key.code, key.modifiers);

        if self.notice.is_some() {
            if matches!(action, Some(Action::Confirm | Action::Cancel)) {
                self.notice = None;
            }
            return Ok(());
        }

        if self.show_help {
            self.show_help = false;
            return Ok(());
        }

        // Plain keys belong to the focused field
        if !ParsedKey::normalized(key.code, key.modifiers).is_text() {
            match action {
                Some(Action::Quit) => {
                    self.should_quit = true;
                    return Ok(());
                }
                Some(Action::Help) => {
                    self.show_help = true;
                    return Ok(());
                }
                _ => {}
            }
        }

        let Some(screen) = self.screens.last_mut() else {
            return Ok(());
        };
        let ctx = ScreenContext::new(&self.config, self.runner.media(), self.pending.is_some());
        let action = screen.handle_event(event, &ctx)?;
        self.apply(action);
        Ok(())
    }

    /// Deliver a finished task to the screen that spawned it
    pub fn tick(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let Some(outcome) = pending.handle.try_recv() else {
            return;
        };
        let name = pending.handle.name();
        let depth = pending.depth;
        debug!("Task {} finished", name);
        self.pending = None;

        if self.screens.len() != depth {
            warn!("Dropping result of {}: its screen is gone", name);
            return;
        }
        if let Some(screen) = self.screens.last_mut() {
            let action = screen.on_outcome(outcome);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Spawn(task) => {
                if let Some(pending) = &self.pending {
                    debug!(
                        "Ignoring {} while {} runs",
                        task.name(),
                        pending.handle.name()
                    );
                    return;
                }
                self.pending = Some(PendingTask {
                    depth: self.screens.len(),
                    handle: self.runner.spawn(self.runtime.handle(), task),
                });
            }
            ScreenAction::Notify(notice) => self.notice = Some(notice),
            ScreenAction::Navigate(navigation) => {
                self.navigate(navigation.transition);
                if let Some(notice) = navigation.notice {
                    self.notice = Some(notice);
                }
            }
            ScreenAction::ShowHelp => self.show_help = true,
            ScreenAction::Quit => self.should_quit = true,
        }
    }

    fn navigate(&mut self, transition: Transition) {
        let from = self.navigator.current().name();
        if !self.navigator.apply(transition.clone()) {
            debug!("{:?} refused on {}", transition, from);
            return;
        }

        let route = self.navigator.current();
        match transition {
            Transition::Push(_) => self.screens.push(screen_for(route)),
            Transition::Replace(_) => {
                self.screens.pop();
                self.screens.push(screen_for(route));
            }
            Transition::Back => {
                self.screens.pop();
            }
        }
        info!("Route {} -> {}", from, route.name());
    }
}
