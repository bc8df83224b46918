use std::fmt;
use std::io::Write;
use std::thread;
use std::time::Duration;

use rolling_common::games::SessionRng;
use rolling_common::games::rolling::{Agent, MoveResult, Player, RollingGameState, WinningLine};
use rolling_common::log;

use crate::config::{Config, GameMode};
use crate::display::{render_board, render_counter, render_line};
use crate::input::{HumanInput, InputCommand, parse_command};

#[derive(Debug, Clone)]
pub enum Participant {
    Human { name: String },
    Bot { name: String, agent: Agent },
}

impl Participant {
    pub fn name(&self) -> &str {
        match self {
            Participant::Human { name } | Participant::Bot { name, .. } => name,
        }
    }

    fn bot(player: Player, config: &Config) -> Self {
        Participant::Bot {
            name: format!("Bot ({})", config.difficulty),
            agent: Agent::new(player, config.difficulty),
        }
    }

    fn human(player: Player, config: &Config) -> Self {
        Participant::Human {
            name: config.player_names.name_of(player).trim().to_string(),
        }
    }

    pub fn for_mode(player: Player, config: &Config) -> Self {
        match config.mode {
            GameMode::Pvp => Self::human(player, config),
            GameMode::VsBot if player == config.bot_symbol => Self::bot(player, config),
            GameMode::VsBot => Self::human(player, config),
            GameMode::BotVsBot => Self::bot(player, config),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Won {
        player: Player,
        line: WinningLine,
        turns: u32,
    },
    TurnLimit {
        turns: u32,
    },
    NoMove {
        turns: u32,
    },
    Quit {
        turns: u32,
    },
}

impl MatchOutcome {
    pub fn turns(&self) -> u32 {
        match self {
            MatchOutcome::Won { turns, .. }
            | MatchOutcome::TurnLimit { turns }
            | MatchOutcome::NoMove { turns }
            | MatchOutcome::Quit { turns } => *turns,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::Won { player, line, turns } => write!(
                f,
                "{} won on line {} after {} turns",
                player,
                render_line(line),
                turns
            ),
            MatchOutcome::TurnLimit { turns } => write!(f, "stopped after {} turns without a winner", turns),
            MatchOutcome::NoMove { turns } => write!(f, "no free cell left after {} turns", turns),
            MatchOutcome::Quit { turns } => write!(f, "quit after {} turns", turns),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeriesTally {
    pub x_wins: u32,
    pub o_wins: u32,
    pub unfinished: u32,
    pub turns: u32,
}

impl SeriesTally {
    pub fn record(&mut self, outcome: &MatchOutcome) {
        self.turns += outcome.turns();
        match outcome {
            MatchOutcome::Won { player: Player::X, .. } => self.x_wins += 1,
            MatchOutcome::Won { player: Player::O, .. } => self.o_wins += 1,
            _ => self.unfinished += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.unfinished
    }
}

impl fmt::Display for SeriesTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: X won {}, O won {}, {} unfinished ({} turns)",
            self.games(),
            self.x_wins,
            self.o_wins,
            self.unfinished,
            self.turns
        )
    }
}

/// Humans always need the board; only a series of bot games runs headless.
pub fn shows_board(mode: GameMode, games: u32) -> bool {
    mode != GameMode::BotVsBot || games <= 1
}

enum Turn {
    Cell(usize),
    Quit,
    NoMove,
}

/// Drives one game at a time: asks the participant on turn for a cell, feeds it to the
/// engine, and stops on a win, a quit or the turn limit.
pub struct MatchRunner<I: HumanInput, W: Write> {
    state: RollingGameState,
    participants: [Participant; 2],
    rng: SessionRng,
    input: I,
    output: W,
    bot_delay: Duration,
    max_turns: u32,
    show_board: bool,
}

impl<I: HumanInput, W: Write> MatchRunner<I, W> {
    pub fn new(config: &Config, rng: SessionRng, input: I, output: W) -> Self {
        Self {
            state: RollingGameState::new(),
            participants: [
                Participant::for_mode(Player::X, config),
                Participant::for_mode(Player::O, config),
            ],
            rng,
            input,
            output,
            bot_delay: Duration::from_millis(config.bot_delay_ms),
            max_turns: config.max_turns,
            show_board: true,
        }
    }

    pub fn with_board_rendering(mut self, show_board: bool) -> Self {
        self.show_board = show_board;
        self
    }

    pub fn state(&self) -> &RollingGameState {
        &self.state
    }

    pub fn participant(&self, player: Player) -> &Participant {
        match player {
            Player::X => &self.participants[0],
            Player::O => &self.participants[1],
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn write_line(&mut self, text: &str) -> Result<(), String> {
        writeln!(self.output, "{}", text).map_err(|e| format!("Failed to write output: {}", e))
    }

    fn show_state(&mut self) -> Result<(), String> {
        if !self.show_board {
            return Ok(());
        }
        let board = render_board(&self.state);
        let counter = render_counter(&self.state);
        self.write_line(&format!("\n{}\n{}", board, counter))
    }

    pub fn play_game(&mut self) -> Result<MatchOutcome, String> {
        self.state.reset();
        log!(
            "Game started: {} (X) vs {} (O)",
            self.participant(Player::X).name(),
            self.participant(Player::O).name()
        );

        let mut turns = 0;
        loop {
            if turns >= self.max_turns {
                log!("Turn limit of {} reached", self.max_turns);
                return Ok(MatchOutcome::TurnLimit { turns });
            }

            self.show_state()?;
            let player = self.state.current_player();

            let cell = match self.next_turn(player)? {
                Turn::Cell(cell) => cell,
                Turn::Quit => {
                    log!("{} quit the game", self.participant(player).name());
                    return Ok(MatchOutcome::Quit { turns });
                }
                Turn::NoMove => {
                    log!("No free cell for {}", player);
                    return Ok(MatchOutcome::NoMove { turns });
                }
            };

            match self.state.apply_move(cell) {
                MoveResult::Rejected => {
                    if let Participant::Bot { name, .. } = self.participant(player) {
                        return Err(format!("{} chose occupied cell {}", name, cell + 1));
                    }
                    self.write_line(&format!("Cell {} is already taken.", cell + 1))?;
                    continue;
                }
                MoveResult::Placed { evicted } => {
                    turns += 1;
                    log!("{} placed {} on cell {}", self.participant(player).name(), player, cell + 1);
                    if let Some(evicted) = evicted {
                        log!("{} lost their oldest mark on cell {}", player, evicted + 1);
                    }
                }
            }

            if let Some(line) = self.state.check_winner(player) {
                self.show_state()?;
                if self.show_board {
                    let name = self.participant(player).name().to_string();
                    self.write_line(&format!("{} ({}) wins on {}!", name, player, render_line(&line)))?;
                }
                log!("{} won with line {}", player, render_line(&line));
                return Ok(MatchOutcome::Won { player, line, turns });
            }

            self.state.advance_turn();
        }
    }

    fn next_turn(&mut self, player: Player) -> Result<Turn, String> {
        match self.participant(player).clone() {
            Participant::Bot { agent, .. } => {
                if !self.bot_delay.is_zero() {
                    thread::sleep(self.bot_delay);
                }
                Ok(match agent.choose_move(&self.state, &mut self.rng) {
                    Some(cell) => Turn::Cell(cell),
                    None => Turn::NoMove,
                })
            }
            Participant::Human { name } => loop {
                self.write_line(&format!("{} ({}), pick a cell 1-9 or q to quit:", name, player))?;
                let Some(line) = self.input.read_line()? else {
                    return Ok(Turn::Quit);
                };
                match parse_command(&line) {
                    Ok(InputCommand::Cell(cell)) => return Ok(Turn::Cell(cell)),
                    Ok(InputCommand::Quit) => return Ok(Turn::Quit),
                    Err(message) => self.write_line(&message)?,
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::LineInput;
    use rolling_common::games::rolling::{Difficulty, Mark};

    fn config(mode: GameMode) -> Config {
        Config {
            mode,
            bot_delay_ms: 0,
            ..Config::default()
        }
    }

    fn runner(config: &Config, script: &'static str) -> MatchRunner<LineInput<&'static [u8]>, Vec<u8>> {
        MatchRunner::new(config, SessionRng::new(11), LineInput::new(script.as_bytes()), Vec::new())
    }

    fn output_of(runner: MatchRunner<LineInput<&'static [u8]>, Vec<u8>>) -> String {
        String::from_utf8(runner.into_output()).unwrap()
    }

    #[test]
    fn test_participants_follow_mode() {
        let cfg = config(GameMode::VsBot);
        let runner = runner(&cfg, "");
        assert!(matches!(runner.participant(Player::X), Participant::Human { .. }));
        assert!(matches!(runner.participant(Player::O), Participant::Bot { .. }));
        assert_eq!(runner.participant(Player::X).name(), "Player X");
        assert_eq!(runner.participant(Player::O).name(), "Bot (medium)");
    }

    #[test]
    fn test_pvp_top_row_wins() {
        let cfg = config(GameMode::Pvp);
        let mut runner = runner(&cfg, "1\n4\n2\n5\n3\n");
        let outcome = runner.play_game().unwrap();
        assert_eq!(
            outcome,
            MatchOutcome::Won {
                player: Player::X,
                line: [0, 1, 2],
                turns: 5
            }
        );
        assert!(output_of(runner).contains("Player X (X) wins on 1-2-3!"));
    }

    #[test]
    fn test_quit_and_end_of_input() {
        let cfg = config(GameMode::Pvp);
        let mut quitting = runner(&cfg, "5\nq\n");
        assert_eq!(quitting.play_game().unwrap(), MatchOutcome::Quit { turns: 1 });

        let mut exhausted = runner(&cfg, "");
        assert_eq!(exhausted.play_game().unwrap(), MatchOutcome::Quit { turns: 0 });
    }

    #[test]
    fn test_bad_input_and_taken_cell_reprompt() {
        let cfg = config(GameMode::Pvp);
        let mut runner = runner(&cfg, "abc\n10\n1\n1\n2\nq\n");
        let outcome = runner.play_game().unwrap();
        assert_eq!(outcome, MatchOutcome::Quit { turns: 2 });
        assert_eq!(runner.state().board()[1], Mark::O);

        let output = output_of(runner);
        assert!(output.contains("'abc' is not a cell number"));
        assert!(output.contains("Cell must be between 1 and 9"));
        assert!(output.contains("Cell 1 is already taken."));
    }

    #[test]
    fn test_rolling_evicts_during_play() {
        let cfg = config(GameMode::Pvp);
        // X: 1, 4, 9, 2 / O: 5, 6, 8 ; X's fourth mark removes cell 1
        let mut runner = runner(&cfg, "1\n5\n4\n6\n9\n8\n2\nq\n");
        let outcome = runner.play_game().unwrap();
        assert_eq!(outcome, MatchOutcome::Quit { turns: 7 });
        assert_eq!(runner.state().board()[0], Mark::Empty);
        assert_eq!(runner.state().move_counts(), (3, 3));
    }

    #[test]
    fn test_bot_blocks_human_line() {
        let cfg = config(GameMode::VsBot);
        let mut runner = runner(&cfg, "1\n2\nq\n");
        let outcome = runner.play_game().unwrap();
        assert_eq!(outcome, MatchOutcome::Quit { turns: 4 });
        assert_eq!(runner.state().board()[4], Mark::O);
        assert_eq!(runner.state().board()[2], Mark::O);
    }

    #[test]
    fn test_bot_vs_bot_respects_turn_limit() {
        let cfg = Config {
            difficulty: Difficulty::Hard,
            max_turns: 12,
            ..config(GameMode::BotVsBot)
        };
        let mut runner = runner(&cfg, "").with_board_rendering(false);
        let outcome = runner.play_game().unwrap();
        assert!(outcome.turns() <= 12);
        if let MatchOutcome::Won { player, line, .. } = outcome {
            assert!(line.iter().all(|&cell| runner.state().board()[cell] == player.mark()));
        } else {
            assert_eq!(outcome, MatchOutcome::TurnLimit { turns: 12 });
        }
        assert!(output_of(runner).is_empty());
    }

    #[test]
    fn test_play_game_starts_fresh_each_time() {
        let cfg = Config {
            difficulty: Difficulty::Easy,
            max_turns: 20,
            ..config(GameMode::BotVsBot)
        };
        let mut runner = runner(&cfg, "").with_board_rendering(false);
        let mut tally = SeriesTally::default();
        for _ in 0..5 {
            let outcome = runner.play_game().unwrap();
            tally.record(&outcome);
        }
        assert_eq!(tally.games(), 5);
    }

    #[test]
    fn test_board_shown_to_humans_in_a_series() {
        assert!(shows_board(GameMode::Pvp, 3));
        assert!(shows_board(GameMode::VsBot, 3));
        assert!(shows_board(GameMode::BotVsBot, 1));
        assert!(!shows_board(GameMode::BotVsBot, 3));

        let cfg = config(GameMode::Pvp);
        // X takes the top row, then the bottom row
        let script = "1\n4\n2\n5\n3\n7\n1\n8\n2\n9\n";
        let mut runner = runner(&cfg, script).with_board_rendering(shows_board(cfg.mode, 2));
        let mut tally = SeriesTally::default();
        for _ in 0..2 {
            tally.record(&runner.play_game().unwrap());
        }
        assert_eq!(tally.x_wins, 2);

        let output = output_of(runner);
        assert_eq!(output.matches("X: 0/3  |  O: 0/3").count(), 2);
        assert_eq!(output.matches("wins on").count(), 2);
    }

    #[test]
    fn test_tally_display() {
        let mut tally = SeriesTally::default();
        tally.record(&MatchOutcome::Won {
            player: Player::O,
            line: [2, 4, 6],
            turns: 6,
        });
        tally.record(&MatchOutcome::TurnLimit { turns: 20 });
        assert_eq!(tally.to_string(), "2 games: X won 0, O won 1, 1 unfinished (26 turns)");
    }
}
