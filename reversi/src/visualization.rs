use crate::{Board, Disk, BOARD_HEIGHT, BOARD_WIDTH};

/// Draws the board in a box, with column labels on top and row labels on the left.
pub fn visualize_board(board: &Board) -> String {
    // Draw the top of the box
    let mut result = String::from("   ");
    for x in 0..BOARD_WIDTH {
        result += &format!(" {}", x);
    }
    result += "\n   ╭";
    for _ in 0..BOARD_WIDTH {
        result += "──";
    }
    result += "─╮\n";

    for y in 0..BOARD_HEIGHT {
        result += &format!("{:>2} │", y);
        for x in 0..BOARD_WIDTH {
            result += match board.disk_at(x, y) {
                Some(Disk::Dark) => " ●",
                Some(Disk::Light) => " ○",
                None => " ·",
            };
        }
        result += " │\n";
    }

    // Draw the bottom of the box
    result += "   ╰";
    for _ in 0..BOARD_WIDTH {
        result += "──";
    }
    result += "─╯";
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_board() {
        let drawing = visualize_board(&Board::initial());
        let lines: Vec<&str> = drawing.lines().collect();
        assert_eq!(lines.len(), 2 + BOARD_HEIGHT as usize + 1);
        assert_eq!(lines[0], "    0 1 2 3 4 5 6 7");
        assert_eq!(lines[5], " 3 │ · · · ○ ● · · · │");
        assert_eq!(lines[6], " 4 │ · · · ● ○ · · · │");
        assert_eq!(Board::initial().to_string(), drawing);
    }
}
