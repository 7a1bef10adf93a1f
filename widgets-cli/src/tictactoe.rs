use anyhow::Result;
use inquire::{Confirm, CustomType, CustomUserError, InquireError, validator::Validation};
use widgets_core::{Game, MoveOutcome, winning_line};

use crate::render;

pub fn run() -> Result<()> {
    println!("Tic Tac Toe\n");
    let mut game = Game::new();

    loop {
        print_board(&game);

        if game.status().is_over() {
            match Confirm::new("Play again?").with_default(true).prompt() {
                Ok(true) => {
                    game = Game::new();
                    continue;
                }
                Ok(false) => return Ok(()),
                Err(err) => return quiet_cancel(err),
            }
        }

        let cell = CustomType::<usize>::new(&format!("{} >", game.next_marker()))
            .with_help_message("cell number 1-9")
            .with_error_message("Please type a number")
            .with_validator(validate_cell)
            .prompt();

        let cell = match cell {
            Ok(cell) => cell,
            Err(err) => return quiet_cancel(err),
        };

        // Occupied cells and moves after a win are ignored.
        if game.apply_move(cell - 1) != MoveOutcome::Accepted {
            tracing::debug!(cell, "move rejected");
        }
    }
}

fn print_board(game: &Game) {
    println!("{}", game.board());
    if let Some(line) = winning_line(game.board()) {
        let cells: Vec<String> = line.iter().map(|i| (i + 1).to_string()).collect();
        println!("line: {}", cells.join("-"));
    }
    println!("{}\n", render::game_status(game.status()));
}

fn validate_cell(cell: &usize) -> Result<Validation, CustomUserError> {
    if (1..=9).contains(cell) {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid("Cells are numbered 1 to 9".into()))
    }
}

fn quiet_cancel(err: InquireError) -> Result<()> {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => Ok(()),
        other => Err(other.into()),
    }
}
