//! Command loop
//!
//! Reads one line at a time, turns it into a `Command`, applies it to the
//! engine and the acting player, and reports status. Every line is fully
//! handled, errors included, before the next one is read.

/// Turn narration that compiles away when the feature is disabled
macro_rules! log_if_verbose {
    ($self:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.logger.verbose(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self.logger;
        }
    };
}

use crate::config::Config;
use crate::core::{CardFace, CardFactory, Color, Knowledge, Player, Rank};
use crate::error::GameErrorKind;
use crate::game::command::HELP_LINES;
use crate::game::{
    Command, GameEngine, GameLogger, OutputFormat, PlayOutcome, StatusSnapshot, TurnRotation,
};
use crate::{HanabiError, Result};
use std::io::BufRead;

const GENERIC_ERROR: &str = "There is error! Please check your input data and try again";

/// How one input line was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Applied without error
    Handled,
    /// Not a command; help was printed and the turn did not pass
    Unrecognized,
    /// A rule violation or invalid turn ended the game; the turn passed
    GameError(GameErrorKind),
    /// Some other failure ended the game; the turn did not pass
    Failed,
}

/// Totals for one `run` over an input stream
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub lines: usize,
    pub unrecognized: usize,
    pub game_errors: usize,
    pub failures: usize,
    pub games_started: u32,
    pub last_status: Option<StatusSnapshot>,
}

/// A hint about to be given
#[derive(Debug, Clone, Copy)]
enum Hint {
    Color(Color),
    Rank(Knowledge<Rank>),
}

impl std::fmt::Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hint::Color(color) => write!(f, "color {color}"),
            Hint::Rank(Knowledge::Known(rank)) => write!(f, "rank {rank}"),
            Hint::Rank(Knowledge::Unknown) => write!(f, "no rank"),
        }
    }
}

pub struct CommandProcessor {
    engine: GameEngine,
    /// Seating for the current game; `None` until a game has been started
    rotation: Option<TurnRotation>,
    cards: CardFactory,
    config: Config,
    logger: GameLogger,
    games_started: u32,
    last_status: Option<StatusSnapshot>,
}

impl CommandProcessor {
    /// Processor writing to stdout with the configured verbosity and format
    pub fn new(config: Config) -> Self {
        let logger = GameLogger::new(config.verbosity, config.output_format);
        Self::with_logger(config, logger)
    }

    /// Processor that keeps all output in memory
    pub fn capturing(config: Config) -> Self {
        let logger = GameLogger::new(config.verbosity, config.output_format).in_memory();
        Self::with_logger(config, logger)
    }

    fn with_logger(config: Config, logger: GameLogger) -> Self {
        CommandProcessor {
            engine: GameEngine::new(),
            rotation: None,
            cards: CardFactory::new(),
            config,
            logger,
            games_started: 0,
            last_status: None,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn rotation(&self) -> Option<&TurnRotation> {
        self.rotation.as_ref()
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process lines until end of input or the first empty line
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD; such a line
    /// is handled like any other. Only a failing reader stops the loop early.
    pub fn run<R: BufRead>(&mut self, mut reader: R) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let raw = String::from_utf8_lossy(&buf);
            let line = raw.trim_end_matches('\n').trim_end_matches('\r');
            if line.is_empty() {
                break;
            }
            summary.lines += 1;
            match self.process_line(line) {
                LineOutcome::Handled => {}
                LineOutcome::Unrecognized => summary.unrecognized += 1,
                LineOutcome::GameError(_) => summary.game_errors += 1,
                LineOutcome::Failed => summary.failures += 1,
            }
        }
        summary.games_started = self.games_started;
        summary.last_status = self.last_status.clone();
        Ok(summary)
    }

    /// Handle one input line; never fails
    pub fn process_line(&mut self, line: &str) -> LineOutcome {
        self.echo(line);

        let Some(command) = Command::parse(line) else {
            self.print_help();
            self.report_status();
            return LineOutcome::Unrecognized;
        };

        let passes_turn = !matches!(command, Command::StartGame(_));
        match self.dispatch(command) {
            Ok(()) => {
                if passes_turn {
                    self.advance_turn();
                }
                self.report_status();
                LineOutcome::Handled
            }
            Err(err) => match err.kind() {
                kind @ (GameErrorKind::RuleViolation | GameErrorKind::InvalidTurn) => {
                    self.logger.normal(&format!("Game over: {err}"));
                    self.engine.end_game();
                    self.advance_turn();
                    self.report_status();
                    LineOutcome::GameError(kind)
                }
                GameErrorKind::Unexpected => {
                    self.report_failure(&err);
                    self.engine.end_game();
                    LineOutcome::Failed
                }
            },
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::StartGame(faces) => self.start_game(&faces),
            Command::PlayCard(position) => self.play_card(position),
            Command::DropCard(position) => self.drop_card(position),
            Command::TellColor { color, positions } => self.tell(Hint::Color(color), &positions),
            Command::TellRank { rank, positions } => {
                self.tell(Hint::Rank(rank_knowledge(rank)?), &positions)
            }
        }
    }

    fn start_game(&mut self, faces: &[CardFace]) -> Result<()> {
        self.rotation = None;
        let deck = self.cards.make_deck(faces);
        let mut players = Player::seat_all(self.config.players);
        self.engine
            .start_game(deck, &mut players, self.config.difficulty)?;
        self.rotation = Some(TurnRotation::new(players)?);
        self.games_started += 1;
        self.logger.normal(&format!(
            "Game {} started: {} players, {} cards left in deck{}",
            self.games_started,
            self.config.players,
            self.engine.deck_len(),
            if self.config.is_novice() { ", all cards known" } else { "" }
        ));
        Ok(())
    }

    /// `true` when a turn action should be skipped because the game is over
    ///
    /// Before the first game there is nothing to skip: plays, drops and hints
    /// all fail with `NoGameInProgress` and print the generic error.
    fn turn_skipped(&self) -> Result<bool> {
        if self.rotation.is_none() {
            return Err(HanabiError::NoGameInProgress);
        }
        if self.engine.is_finished() {
            log_if_verbose!(self, "Game is finished, nothing to do");
            return Ok(true);
        }
        Ok(false)
    }

    /// Draw first, then swap the drawn card in, then play what came out
    ///
    /// The draw stands even if the play turns out to be illegal.
    fn play_card(&mut self, position: usize) -> Result<()> {
        if self.turn_skipped()? {
            return Ok(());
        }
        let rotation = self.rotation.as_mut().ok_or(HanabiError::NoGameInProgress)?;
        let drawn = self.engine.draw_card()?;
        if self.engine.is_finished() {
            self.logger.normal("Game over: last card drawn from the deck");
        }
        let played = rotation.current_mut().replace_card(position, drawn)?;
        let player = rotation.current().id;
        log_if_verbose!(
            self,
            "{player} plays {played} from position {position} and draws {drawn}"
        );

        let outcome = self.engine.play_card(played)?;
        if outcome == PlayOutcome::Risky {
            log_if_verbose!(self, "{played} was played without full information");
        }
        Ok(())
    }

    fn drop_card(&mut self, position: usize) -> Result<()> {
        if self.turn_skipped()? {
            return Ok(());
        }
        let rotation = self.rotation.as_mut().ok_or(HanabiError::NoGameInProgress)?;
        let drawn = self.engine.draw_card()?;
        if self.engine.is_finished() {
            self.logger.normal("Game over: last card drawn from the deck");
        }
        let dropped = rotation.current_mut().replace_card(position, drawn)?;
        let player = rotation.current().id;
        log_if_verbose!(
            self,
            "{player} drops {dropped} from position {position} and draws {drawn}"
        );

        self.engine.drop_card(dropped);
        Ok(())
    }

    /// Hints go to the player who acts next; stops at the first bad reveal
    fn tell(&mut self, hint: Hint, positions: &[usize]) -> Result<()> {
        if self.turn_skipped()? {
            return Ok(());
        }
        let rotation = self.rotation.as_ref().ok_or(HanabiError::NoGameInProgress)?;
        let target = rotation.next();
        for &position in positions {
            let card = target.card_at(position)?;
            match hint {
                Hint::Color(color) => self.engine.tell_color(card, Knowledge::Known(color))?,
                Hint::Rank(rank) => self.engine.tell_rank(card, rank)?,
            }
        }
        log_if_verbose!(
            self,
            "{} is told {} about positions {:?}",
            rotation.next().id,
            hint,
            positions
        );
        Ok(())
    }

    fn advance_turn(&mut self) {
        if let Some(rotation) = self.rotation.as_mut() {
            rotation.advance();
        }
    }

    fn echo(&self, line: &str) {
        if self.logger.output_format() == OutputFormat::Text {
            self.logger.minimal(&format!("> {line}"));
        }
    }

    fn print_help(&self) {
        if self.logger.output_format() == OutputFormat::Text {
            for line in HELP_LINES {
                self.logger.minimal(line);
            }
        }
    }

    fn report_failure(&self, err: &HanabiError) {
        match self.logger.output_format() {
            OutputFormat::Text => {
                self.logger.minimal(GENERIC_ERROR);
                self.logger.minimal(&err.to_string());
            }
            OutputFormat::Json => {
                let line = serde_json::json!({ "error": GENERIC_ERROR, "message": err.to_string() });
                self.logger.minimal(&line.to_string());
            }
        }
    }

    /// Print the status block; nothing before the first game
    fn report_status(&mut self) {
        let Some(rotation) = self.rotation.as_ref() else {
            return;
        };
        let snapshot = StatusSnapshot::capture(&self.engine, rotation);
        match self.logger.output_format() {
            OutputFormat::Text => {
                for line in snapshot.text_lines() {
                    self.logger.minimal(&line);
                }
            }
            OutputFormat::Json => match snapshot.to_json() {
                Ok(line) => self.logger.minimal(&line),
                Err(err) => self.report_failure(&err),
            },
        }
        self.last_status = Some(snapshot);
    }
}

/// Raw hinted digit to rank knowledge; 0 means "no rank given"
fn rank_knowledge(digit: u8) -> Result<Knowledge<Rank>> {
    if digit == 0 {
        return Ok(Knowledge::Unknown);
    }
    Rank::from_value(digit)
        .map(Knowledge::Known)
        .ok_or_else(|| HanabiError::InvalidTurn(format!("Rank {digit} does not exist")))
}
