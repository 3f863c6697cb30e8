pub mod bank;
pub mod quiz;
pub mod runtime;
pub mod share;
pub mod sign;
pub mod ui;

use crate::{
    bank::QuestionBank,
    quiz::{DisplayedQuestion, Progress, Quiz},
    runtime::{CrosstermEventSource, Runner, UiEvent},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// zodiac personality quiz tui with shuffled questions and shareable results
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal personality quiz: answer a handful of shuffled questions and find out which zodiac sign fits you, then share the result."
)]
pub struct Cli {
    /// seed for the session shuffle (reproducible question order)
    #[clap(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Answering,
    Results,
}

#[derive(Debug)]
pub struct App {
    pub cli: Option<Cli>,
    pub quiz: Quiz,
    pub view: Option<DisplayedQuestion>,
    pub selected: usize,
    pub state: AppState,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        let bank = QuestionBank::builtin();
        let quiz = match cli.seed {
            Some(seed) => Quiz::with_rng(bank, StdRng::seed_from_u64(seed)),
            None => Quiz::new(bank),
        };

        let mut app = Self {
            cli: Some(cli),
            quiz,
            view: None,
            selected: 0,
            state: AppState::Answering,
        };
        app.show_current_question();
        app
    }

    /// Captures a fresh snapshot of the current question. Re-renders reuse
    /// the snapshot, so the on-screen choice order only changes when a new
    /// question comes up.
    fn show_current_question(&mut self) {
        self.view = self.quiz.current_question().ok();
        self.selected = 0;
    }

    fn choice_count(&self) -> usize {
        self.view.as_ref().map_or(0, |v| v.choices.len())
    }

    pub fn select_previous(&mut self) {
        let len = self.choice_count();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }

    pub fn select_next(&mut self) {
        let len = self.choice_count();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Submits the highlighted choice and moves to the next question or the
    /// result screen.
    pub fn answer_selected(&mut self) {
        let Some(sign) = self.view.as_ref().map(|v| v.choices[self.selected].sign) else {
            return;
        };

        match self.quiz.submit_answer(sign) {
            Ok(Progress::Next) => self.show_current_question(),
            Ok(Progress::Complete(_)) => {
                self.view = None;
                self.state = AppState::Results;
            }
            // unreachable while the captured view and the quiz stay in step
            Err(_) => {}
        }
    }

    pub fn retake(&mut self) {
        self.quiz.restart();
        self.state = AppState::Answering;
        self.show_current_question();
    }

    /// Returns true when the app should exit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc {
            return true;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.state {
            AppState::Answering => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
                KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                KeyCode::Enter => self.answer_selected(),
                _ => {}
            },
            AppState::Results => match key.code {
                KeyCode::Char('r') => self.retake(),
                KeyCode::Char('s') => {
                    if let Some(sign) = self.quiz.result() {
                        share::open(sign);
                    }
                }
                _ => {}
            },
        }

        false
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            UiEvent::Tick => {}
            UiEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            UiEvent::Key(key) => {
                if app.on_key(key) {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sign::ZodiacSign;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["zodiq"]);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_cli_seed() {
        let cli = Cli::parse_from(["zodiq", "-s", "7"]);
        assert_eq!(cli.seed, Some(7));

        let cli = Cli::parse_from(["zodiq", "--seed", "99"]);
        assert_eq!(cli.seed, Some(99));
    }

    #[test]
    fn test_app_new_shows_first_question() {
        let app = App::new(Cli { seed: Some(1) });

        assert_eq!(app.state, AppState::Answering);
        assert_eq!(app.selected, 0);
        assert!(app.cli.is_some());

        let view = app.view.as_ref().unwrap();
        assert_eq!(view.number, 1);
        assert_eq!(view.total, 5);
        assert_eq!(view.choices.len(), 12);
    }

    #[test]
    fn test_seeded_apps_agree_on_question_order() {
        let order = |seed| {
            let mut app = App::new(Cli { seed: Some(seed) });
            let mut texts = Vec::new();
            while app.state == AppState::Answering {
                texts.push(app.view.as_ref().unwrap().text.clone());
                app.answer_selected();
            }
            texts
        };

        assert_eq!(order(42), order(42));
    }

    #[test]
    fn test_selection_wraps_both_ways() {
        let mut app = App::new(Cli { seed: Some(2) });

        app.select_previous();
        assert_eq!(app.selected, 11);

        app.select_next();
        assert_eq!(app.selected, 0);

        app.select_next();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_answering_advances_to_next_question() {
        let mut app = App::new(Cli { seed: Some(3) });
        app.select_next();
        app.select_next();

        app.answer_selected();

        assert_eq!(app.state, AppState::Answering);
        assert_eq!(app.quiz.current_index(), 1);
        assert_eq!(app.view.as_ref().unwrap().number, 2);
        // highlight resets for the newly displayed question
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_full_playthrough_lands_on_results() {
        let mut app = App::new(Cli { seed: Some(4) });

        for _ in 0..5 {
            app.answer_selected();
        }

        assert_eq!(app.state, AppState::Results);
        assert!(app.view.is_none());
        assert!(app.quiz.result().is_some());
    }

    #[test]
    fn test_retake_starts_a_fresh_session() {
        let mut app = App::new(Cli { seed: Some(5) });
        for _ in 0..5 {
            app.answer_selected();
        }
        assert_eq!(app.state, AppState::Results);

        app.retake();

        assert_eq!(app.state, AppState::Answering);
        assert_eq!(app.quiz.current_index(), 0);
        assert!(app.quiz.answers().is_empty());
        assert_eq!(app.quiz.result(), None);
        assert_eq!(app.view.as_ref().unwrap().number, 1);
    }

    #[test]
    fn test_escape_exits_from_both_screens() {
        let mut app = App::new(Cli { seed: Some(6) });
        assert!(app.on_key(key(KeyCode::Esc)));

        for _ in 0..5 {
            app.answer_selected();
        }
        assert!(app.on_key(key(KeyCode::Esc)));
    }

    #[test]
    fn test_ctrl_c_exits() {
        let mut app = App::new(Cli { seed: Some(7) });
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert!(app.on_key(ctrl_c));
    }

    #[test]
    fn test_enter_key_answers_the_highlighted_choice() {
        let mut app = App::new(Cli { seed: Some(8) });
        let expected = app.view.as_ref().unwrap().choices[0].sign;

        assert!(!app.on_key(key(KeyCode::Enter)));

        assert_eq!(app.quiz.answers(), &[expected]);
        assert_eq!(app.quiz.current_index(), 1);
    }

    #[test]
    fn test_arrow_keys_move_the_highlight() {
        let mut app = App::new(Cli { seed: Some(9) });

        assert!(!app.on_key(key(KeyCode::Down)));
        assert_eq!(app.selected, 1);

        assert!(!app.on_key(key(KeyCode::Up)));
        assert_eq!(app.selected, 0);

        assert!(!app.on_key(key(KeyCode::Char('j'))));
        assert_eq!(app.selected, 1);

        assert!(!app.on_key(key(KeyCode::Char('k'))));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_r_key_retakes_from_results() {
        let mut app = App::new(Cli { seed: Some(10) });
        for _ in 0..5 {
            app.answer_selected();
        }
        assert_eq!(app.state, AppState::Results);

        assert!(!app.on_key(key(KeyCode::Char('r'))));
        assert_eq!(app.state, AppState::Answering);
    }

    #[test]
    fn test_answer_keys_are_inert_on_results_screen() {
        let mut app = App::new(Cli { seed: Some(11) });
        for _ in 0..5 {
            app.answer_selected();
        }
        let result = app.quiz.result();

        assert!(!app.on_key(key(KeyCode::Enter)));
        assert!(!app.on_key(key(KeyCode::Down)));

        assert_eq!(app.state, AppState::Results);
        assert_eq!(app.quiz.result(), result);
    }

    #[test]
    fn test_result_comes_from_the_answered_signs() {
        let mut app = App::new(Cli { seed: Some(12) });

        let mut answered: Vec<ZodiacSign> = Vec::new();
        while app.state == AppState::Answering {
            let view = app.view.as_ref().unwrap();
            answered.push(view.choices[app.selected].sign);
            app.answer_selected();
        }

        assert_eq!(app.quiz.answers(), answered.as_slice());

        let winner = app.quiz.result().unwrap();
        let max = app.quiz.tally().iter().map(|&(_, n)| n).max().unwrap();
        let winner_count = answered.iter().filter(|&&s| s == winner).count();
        assert_eq!(winner_count, max);
    }

    #[test]
    fn test_tick_rate_constant() {
        assert_eq!(TICK_RATE_MS, 100);

        const _: () = assert!(TICK_RATE_MS > 0);
        const _: () = assert!(TICK_RATE_MS <= 1000);
    }
}
