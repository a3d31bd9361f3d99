//! Text command grammar
//!
//! One command per line. Keywords are case-sensitive and must start the
//! line; trailing whitespace is ignored, anything else trailing is not.
//!
//! ```text
//! Start new game with deck R1 G2 B3 ...   (at least 11 cards)
//! Play card 0..4
//! Tell color Red for cards 0 2
//! Tell rank 3 for cards 1 4
//! Drop card 0..4
//! ```

use crate::core::{CardFace, Color, Rank};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alphanumeric0, one_of, satisfy, space0, space1},
    combinator::{eof, map, map_opt, verify},
    multi::many1,
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};

/// Fewest cards the start command accepts
pub const MIN_START_DECK: usize = 11;

/// Usage text printed for lines that are not commands
pub const HELP_LINES: [&str; 8] = [
    "Start new game with deck {card1} {card2}...",
    "Play card {card position}",
    "Tell {rank|color} {value} for cards {card position 1} {card position 2} ...",
    "Drop card {card position 1}",
    "  card position is a number in [0..4]",
    "  color any of R[ed] G[reen] B[lue] W[hite] Y[ellow]",
    "  rank is a number in [1..5]",
    "  card is a string {color}{rank}",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartGame(Vec<CardFace>),
    PlayCard(usize),
    /// Hint a color to the next player about the cards at `positions`
    TellColor { color: Color, positions: Vec<usize> },
    /// Hint a rank; `rank` is the raw digit and may be 0 or above 5
    TellRank { rank: u8, positions: Vec<usize> },
    DropCard(usize),
}

impl Command {
    /// Parse one input line; `None` for anything outside the grammar
    pub fn parse(line: &str) -> Option<Command> {
        terminated(command, pair(space0, eof))(line)
            .ok()
            .map(|(_, cmd)| cmd)
    }
}

fn command(input: &str) -> IResult<&str, Command> {
    alt((start_game, play_card, tell_color, tell_rank, drop_card))(input)
}

fn card_face(input: &str) -> IResult<&str, CardFace> {
    map_opt(pair(one_of("RGBWY"), one_of("12345")), |(c, r)| {
        let color = Color::from_letter(c)?;
        let rank = Rank::from_value(r.to_digit(10)? as u8)?;
        Some(CardFace::new(color, rank))
    })(input)
}

fn hand_position(input: &str) -> IResult<&str, usize> {
    map(one_of("01234"), digit_value)(input)
}

fn digit(input: &str) -> IResult<&str, usize> {
    map(satisfy(|c| c.is_ascii_digit()), digit_value)(input)
}

fn digit_value(c: char) -> usize {
    c.to_digit(10).map_or(0, |d| d as usize)
}

fn positions(input: &str) -> IResult<&str, Vec<usize>> {
    preceded(tag(" for cards"), many1(preceded(space1, digit)))(input)
}

fn start_game(input: &str) -> IResult<&str, Command> {
    map(
        preceded(
            tag("Start new game with deck"),
            verify(
                many1(preceded(space1, card_face)),
                |cards: &Vec<CardFace>| cards.len() >= MIN_START_DECK,
            ),
        ),
        Command::StartGame,
    )(input)
}

fn play_card(input: &str) -> IResult<&str, Command> {
    map(preceded(tag("Play card "), hand_position), Command::PlayCard)(input)
}

fn drop_card(input: &str) -> IResult<&str, Command> {
    map(preceded(tag("Drop card "), hand_position), Command::DropCard)(input)
}

fn tell_color(input: &str) -> IResult<&str, Command> {
    map(
        tuple((
            tag("Tell color "),
            map_opt(one_of("RGBWY"), Color::from_letter),
            alphanumeric0,
            positions,
        )),
        |(_, color, _, positions)| Command::TellColor { color, positions },
    )(input)
}

fn tell_rank(input: &str) -> IResult<&str, Command> {
    map(
        tuple((tag("Tell rank "), digit, positions)),
        |(_, rank, positions)| Command::TellRank {
            rank: rank as u8,
            positions,
        },
    )(input)
}
