//! The text format of a saved game.
//!
//! ```text
//! 001
//! --------
//! --------
//! --------
//! ---ox---
//! ---xo---
//! --------
//! --------
//! --------
//! ```
//!
//! The header holds the active color (`0` dark, `1` light), followed by the mode of the
//! dark and the light slot (`0` manual, `1` automated). A finished game has no active
//! color, so its header is only the two mode digits. Then follows one line per board
//! row, top to bottom, with `x` for dark, `o` for light and `-` for an empty cell.

use crate::{
    Board, CorruptData, Disk, GameState, PlayerMode, PlayerSlot, BOARD_HEIGHT, BOARD_WIDTH,
};

const EMPTY_SYMBOL: char = '-';

/// Encodes a snapshot. Every line, including the last, ends with `\n`.
pub fn encode(state: &GameState) -> String {
    let mut output = String::with_capacity(4 + (BOARD_WIDTH as usize + 1) * BOARD_HEIGHT as usize);
    if let Some(active) = state.active {
        output.push(digit(active.index()));
    }
    for slot in &state.players {
        output.push(digit(slot.mode.index()));
    }
    output.push('\n');

    for row in encode_rows(&state.board) {
        output += &row;
        output.push('\n');
    }
    output
}

/// Decodes a snapshot produced by [`encode()`].
///
/// Anything that deviates from the format is rejected as a whole, there is no
/// best-effort recovery.
pub fn decode(input: &str) -> Result<GameState, CorruptData> {
    if input.is_empty() {
        return Err(CorruptData::MissingHeader);
    }
    // Lines end with a bare `\n`, a `\r` is just an unexpected symbol
    let mut lines = input
        .strip_suffix('\n')
        .ok_or(CorruptData::MissingFinalNewline)?
        .split('\n');
    let header: Vec<char> = lines
        .next()
        .filter(|line| !line.is_empty())
        .ok_or(CorruptData::MissingHeader)?
        .chars()
        .collect();

    let (active, mode_symbols) = match header.as_slice() {
        [active, modes @ ..] if modes.len() == 2 => {
            let disk = parse_digit(*active)
                .and_then(Disk::from_index)
                .ok_or(CorruptData::InvalidActiveColor { symbol: *active })?;
            (Some(disk), modes)
        }
        modes if modes.len() == 2 => (None, modes),
        _ => {
            return Err(CorruptData::InvalidHeaderLength {
                length: header.len(),
            })
        }
    };

    let mut players = [PlayerSlot {
        disk: Disk::Dark,
        mode: PlayerMode::Manual,
    }; 2];
    for (slot, (&symbol, disk)) in players
        .iter_mut()
        .zip(mode_symbols.iter().zip(Disk::SIDES))
    {
        let mode = parse_digit(symbol)
            .and_then(PlayerMode::from_index)
            .ok_or(CorruptData::InvalidPlayerMode { slot: disk, symbol })?;
        *slot = PlayerSlot { disk, mode };
    }

    let rows: Vec<&str> = lines.collect();
    let board = decode_rows(&rows)?;

    Ok(GameState {
        board,
        players,
        active,
    })
}

/// One string per row, top to bottom.
pub fn encode_rows(board: &Board) -> Vec<String> {
    (0..BOARD_HEIGHT)
        .map(|y| {
            (0..BOARD_WIDTH)
                .map(|x| board.disk_at(x, y).map_or(EMPTY_SYMBOL, Disk::symbol))
                .collect()
        })
        .collect()
}

/// The inverse of [`encode_rows()`].
pub fn decode_rows<S: AsRef<str>>(rows: &[S]) -> Result<Board, CorruptData> {
    if rows.len() != BOARD_HEIGHT as usize {
        return Err(CorruptData::WrongRowCount {
            expected: BOARD_HEIGHT as usize,
            found: rows.len(),
        });
    }

    let mut board = Board::new();
    for (y, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let found = row.chars().count();
        if found != BOARD_WIDTH as usize {
            return Err(CorruptData::WrongRowLength {
                row: y,
                expected: BOARD_WIDTH as usize,
                found,
            });
        }
        for (x, symbol) in row.chars().enumerate() {
            let disk = match symbol {
                'x' => Disk::Dark,
                'o' => Disk::Light,
                EMPTY_SYMBOL => continue,
                _ => {
                    return Err(CorruptData::UnknownSymbol {
                        row: y,
                        column: x,
                        symbol,
                    })
                }
            };
            // Can't fail, the row and its length were checked above
            board
                .set_disk(disk, x as i8, y as i8)
                .expect("cell lies on the board");
        }
    }
    Ok(board)
}

fn digit(value: usize) -> char {
    char::from_digit(value as u32, 10).unwrap_or('?')
}

fn parse_digit(symbol: char) -> Option<usize> {
    symbol.to_digit(10).map(|d| d as usize)
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        encode_rows(&board)
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = CorruptData;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        decode_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    const INITIAL: &str = "000\n--------\n--------\n--------\n---ox---\n---xo---\n--------\n--------\n--------\n";

    #[test]
    fn encode_initial_state() {
        assert_eq!(encode(&GameState::initial()), INITIAL);
    }

    #[test]
    fn decode_initial_state() {
        assert_eq!(decode(INITIAL), Ok(GameState::initial()));
    }

    #[test]
    fn header_holds_active_color_and_modes() {
        let mut state = GameState::initial();
        state.active = Some(Disk::Light);
        state.players[Disk::Light.index()].mode = PlayerMode::Automated;
        let encoded = encode(&state);
        assert!(encoded.starts_with("101\n"));
        assert_eq!(decode(&encoded), Ok(state));
    }

    #[test]
    fn round_trip_empty_board() {
        let state = GameState {
            board: Board::new(),
            ..GameState::initial()
        };
        let encoded = encode(&state);
        assert_eq!(encoded.lines().nth(1), Some("--------"));
        assert_eq!(decode(&encoded), Ok(state));
    }

    #[test]
    fn round_trip_full_board() {
        let mut board = Board::new();
        for (i, pos) in Board::positions().enumerate() {
            let disk = if i % 3 == 0 { Disk::Light } else { Disk::Dark };
            board.set_disk(disk, pos.x, pos.y).unwrap();
        }
        let state = GameState {
            board,
            active: Some(Disk::Dark),
            ..GameState::initial()
        };
        assert_eq!(decode(&encode(&state)), Ok(state));
    }

    #[test]
    fn round_trip_finished_game() {
        let mut state = GameState::initial();
        state.active = None;
        state.players[Disk::Dark.index()].mode = PlayerMode::Automated;
        let encoded = encode(&state);
        assert!(encoded.starts_with("10\n"));
        assert_eq!(decode(&encoded), Ok(state));
    }

    #[test]
    fn decode_rejects_missing_header() {
        assert_eq!(decode(""), Err(CorruptData::MissingHeader));
        assert_eq!(decode("\n--------\n"), Err(CorruptData::MissingHeader));
    }

    #[test]
    fn decode_rejects_bad_header() {
        let body = &INITIAL[3..];
        assert_eq!(
            decode(&format!("0{}", body)),
            Err(CorruptData::InvalidHeaderLength { length: 1 })
        );
        assert_eq!(
            decode(&format!("0000{}", body)),
            Err(CorruptData::InvalidHeaderLength { length: 4 })
        );
        assert_eq!(
            decode(&format!("200{}", body)),
            Err(CorruptData::InvalidActiveColor { symbol: '2' })
        );
        assert_eq!(
            decode(&format!("00a{}", body)),
            Err(CorruptData::InvalidPlayerMode {
                slot: Disk::Light,
                symbol: 'a'
            })
        );
    }

    #[test]
    fn decode_rejects_wrong_row_count() {
        let mut truncated: Vec<&str> = INITIAL.lines().collect();
        truncated.pop();
        assert_eq!(
            decode(&format!("{}\n", truncated.join("\n"))),
            Err(CorruptData::WrongRowCount {
                expected: 8,
                found: 7
            })
        );

        let extended = format!("{}--------\n", INITIAL);
        assert_eq!(
            decode(&extended),
            Err(CorruptData::WrongRowCount {
                expected: 8,
                found: 9
            })
        );
    }

    #[test]
    fn decode_rejects_wrong_row_length() {
        let input = INITIAL.replacen("---ox---", "---ox--", 1);
        assert_eq!(
            decode(&input),
            Err(CorruptData::WrongRowLength {
                row: 3,
                expected: 8,
                found: 7
            })
        );
    }

    #[test]
    fn decode_rejects_unknown_symbol() {
        let input = INITIAL.replacen("---xo---", "---xO---", 1);
        assert_eq!(
            decode(&input),
            Err(CorruptData::UnknownSymbol {
                row: 4,
                column: 4,
                symbol: 'O'
            })
        );
    }

    #[test]
    fn decode_rejects_missing_final_newline() {
        assert_eq!(
            decode(INITIAL.trim_end()),
            Err(CorruptData::MissingFinalNewline)
        );
    }

    #[test]
    fn decode_rejects_crlf_line_endings() {
        assert_eq!(
            decode(&INITIAL.replace('\n', "\r\n")),
            Err(CorruptData::InvalidHeaderLength { length: 4 })
        );
        assert_eq!(
            decode(&INITIAL.replacen("---ox---\n", "---ox---\r\n", 1)),
            Err(CorruptData::WrongRowLength {
                row: 3,
                expected: 8,
                found: 9
            })
        );
    }

    quickcheck! {
        fn decode_inverts_encode(state: GameState) -> bool {
            decode(&encode(&state)) == Ok(state)
        }
    }
}
