use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use vacancy_core::{
    update, update_industry, ChangeCounts, Effect, Industry, IndustryEffect, IndustryMsg,
    IndustryState, Msg, ResponseMapper, SearchState, VacancySummary,
};
use vacancy_engine::{EngineError, EngineHandle};
use vacancy_logging::{vacancy_debug, vacancy_info};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::input::{parse_line, Command, HELP};
use super::logging;
use super::render::{notification_text, render_industries, render_search, ListMirror};

const POLL_INTERVAL: Duration = Duration::from_millis(75);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMsg {
    Search(Msg),
    Industry(IndustryMsg),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Search,
    Industries,
}

pub fn run_app() -> Result<(), EngineError> {
    let config = AppConfig::from_env();
    logging::initialize(config.log_destination, config.log_level);
    vacancy_info!("Starting vacancy_app against {}", config.api.base_url);

    let engine = EngineHandle::new(config.api.clone())?;
    let input_rx = spawn_stdin_reader();
    let mut app = App::new(&config, EffectRunner::new(engine));

    println!("{HELP}");
    app.render(true);

    'main: loop {
        loop {
            match input_rx.try_recv() {
                Ok(Command::Quit) | Err(mpsc::TryRecvError::Disconnected) => break 'main,
                Ok(command) => app.handle_command(command, Instant::now()),
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        for msg in app.runner.drain(POLL_INTERVAL) {
            app.dispatch(msg);
        }
        let now = Instant::now();
        app.dispatch(AppMsg::Search(Msg::Tick { now }));
        app.dispatch(AppMsg::Industry(IndustryMsg::Tick { now }));
        app.render(false);
    }

    app.dispatch(AppMsg::Search(Msg::ScreenLeft));
    vacancy_info!("vacancy_app exiting");
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::Receiver<Command> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if let Some(command) = parse_line(&line) {
                if tx.send(command).is_err() {
                    break;
                }
            }
        }
        vacancy_debug!("stdin closed");
    });
    rx
}

struct App {
    screen: Screen,
    search: SearchState,
    industry: IndustryState,
    vacancies: ListMirror<VacancySummary>,
    industries: ListMirror<Industry>,
    runner: EffectRunner,
    screen_changed: bool,
}

impl App {
    fn new(config: &AppConfig, runner: EffectRunner) -> Self {
        Self {
            screen: Screen::Search,
            search: SearchState::with_settings(&config.search, ResponseMapper::default()),
            industry: IndustryState::with_settings(&config.industry),
            vacancies: ListMirror::default(),
            industries: ListMirror::default(),
            runner,
            screen_changed: false,
        }
    }

    fn handle_command(&mut self, command: Command, now: Instant) {
        let msg = match (self.screen, command) {
            (_, Command::Help) => {
                println!("{HELP}");
                return;
            }
            (_, Command::Unknown(text)) => {
                println!("unknown command {text:?}; :help lists commands");
                return;
            }
            (_, Command::Quit) => return,
            (Screen::Search, Command::Text(text)) => {
                AppMsg::Search(Msg::QueryChanged { text, at: now })
            }
            (Screen::Search, Command::Clear) => AppMsg::Search(Msg::QueryCleared),
            (Screen::Search, Command::More) => AppMsg::Search(Msg::LastItemReached),
            (Screen::Search, Command::Open(id)) => {
                AppMsg::Search(Msg::VacancyClicked { id, at: now })
            }
            (Screen::Search, Command::Retry) => AppMsg::Search(Msg::RetryClicked),
            (Screen::Search, Command::ResetIndustry) => {
                AppMsg::Search(Msg::IndustryFilterApplied(None))
            }
            (Screen::Search, Command::Industries) => {
                self.dispatch(AppMsg::Search(Msg::ScreenLeft));
                self.switch_to(Screen::Industries);
                AppMsg::Industry(IndustryMsg::Opened {
                    selected: self.search.industry().cloned(),
                })
            }
            (Screen::Industries, Command::Text(text)) => {
                AppMsg::Industry(IndustryMsg::FilterChanged { text, at: now })
            }
            (Screen::Industries, Command::Clear) => AppMsg::Industry(IndustryMsg::FilterCleared),
            (Screen::Industries, Command::Pick(id)) => {
                AppMsg::Industry(IndustryMsg::IndustryClicked { id })
            }
            (Screen::Industries, Command::Apply) => AppMsg::Industry(IndustryMsg::ApplyClicked),
            (Screen::Industries, Command::Back) => AppMsg::Industry(IndustryMsg::BackClicked),
            (Screen::Industries, Command::Retry) => AppMsg::Industry(IndustryMsg::RetryClicked),
            (screen, command) => {
                println!("{command:?} is not available on the {screen:?} screen");
                return;
            }
        };
        self.dispatch(msg);
    }

    fn dispatch(&mut self, msg: AppMsg) {
        match msg {
            AppMsg::Search(msg) => {
                let state = std::mem::take(&mut self.search);
                let (state, effects) = update(state, msg);
                self.search = state;
                for effect in effects {
                    self.run_search_effect(effect);
                }
            }
            AppMsg::Industry(msg) => {
                let state = std::mem::take(&mut self.industry);
                let (state, effects) = update_industry(state, msg);
                self.industry = state;
                for effect in effects {
                    self.run_industry_effect(effect);
                }
            }
        }
    }

    fn run_search_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchPage {
                generation,
                request,
            } => self.runner.fetch_page(generation, request),
            Effect::CancelOutstanding => self.runner.cancel_search(),
            Effect::OpenVacancy { id } => {
                vacancy_info!("OpenVacancy id={}", id);
                println!("-> opening vacancy {id}");
            }
            Effect::Notify(notification) => println!("! {}", notification_text(notification)),
        }
    }

    fn run_industry_effect(&mut self, effect: IndustryEffect) {
        match effect {
            IndustryEffect::FetchIndustries { generation } => {
                self.runner.fetch_industries(generation)
            }
            IndustryEffect::ReturnIndustry(industry) => {
                vacancy_info!("Industry filter applied: {}", industry.id);
                self.switch_to(Screen::Search);
                self.dispatch(AppMsg::Search(Msg::IndustryFilterApplied(Some(industry))));
            }
            IndustryEffect::Close => self.switch_to(Screen::Search),
            IndustryEffect::Notify(notification) => {
                println!("! {}", notification_text(notification))
            }
        }
    }

    fn switch_to(&mut self, screen: Screen) {
        if self.screen != screen {
            self.screen = screen;
            self.screen_changed = true;
        }
    }

    fn render(&mut self, force: bool) {
        let search_dirty = self.search.consume_dirty();
        let industry_dirty = self.industry.consume_dirty();
        log_delta("vacancy", self.vacancies.apply(self.search.take_changes()));
        log_delta("industry", self.industries.apply(self.industry.take_changes()));

        let force = force || std::mem::take(&mut self.screen_changed);
        let lines = match self.screen {
            Screen::Search if force || search_dirty => {
                render_search(&self.search.view(), self.vacancies.items())
            }
            Screen::Industries if force || industry_dirty => {
                render_industries(&self.industry.view(), self.industries.items())
            }
            _ => return,
        };
        println!();
        for line in lines {
            println!("{line}");
        }
    }
}

fn log_delta(list: &str, delta: ChangeCounts) {
    if delta == ChangeCounts::default() {
        return;
    }
    vacancy_debug!(
        "{} list delta: +{} -{} ~{} moved {}",
        list,
        delta.inserted,
        delta.removed,
        delta.changed,
        delta.moved
    );
}
