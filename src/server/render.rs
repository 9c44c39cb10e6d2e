//! HTML pages. Player names are user input and always go through
//! [`escape_html`].

use std::fmt::Write;

use super::difficulty::Difficulty;
use super::store::GameId;
use crate::game::{Cell, GameState, GameStatus, Player};

const STYLE: &str = r#"
body { font-family: sans-serif; background: #f4f4f8; color: #222; text-align: center; }
a.button, button { padding: 0.4em 0.9em; border-radius: 4px; border: 1px solid #335; background: #fff; cursor: pointer; }
button:disabled { opacity: 0.35; cursor: default; }
table.board { margin: 1em auto; background: #1f4fbf; border-radius: 8px; padding: 6px; }
table.board td { width: 44px; height: 44px; }
.cell { width: 40px; height: 40px; border-radius: 50%; margin: auto; background: #fff; }
.token { display: inline-block; width: 1em; height: 1em; border-radius: 50%; }
.p1 { background: #d62828; }
.p2 { background: #f6c90e; }
.status { font-size: 1.3em; margin: 0.6em; }
form.inline { display: inline; }
label { display: block; margin: 0.5em; }
"#;

/// Minimal escaping for text and attribute contexts.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

pub fn home_page() -> String {
    page(
        "Connect Four",
        "<h1>Connect Four</h1>\n\
         <p>Two players take turns dropping tokens. Four in a row wins.</p>\n\
         <p><a class=\"button\" href=\"/start\">Start a game</a></p>",
    )
}

pub fn start_page() -> String {
    let mut options = String::new();
    for difficulty in Difficulty::ALL {
        let dims = difficulty.dimensions();
        let _ = write!(
            options,
            "<option value=\"{value}\">{value} ({rows}x{cols})</option>",
            value = difficulty.as_str(),
            rows = dims.rows(),
            cols = dims.cols(),
        );
    }

    let body = format!(
        "<h1>New game</h1>\n\
         <form method=\"post\" action=\"/start\">\n\
         <label>Player 1 <input name=\"player1\" placeholder=\"{p1}\"></label>\n\
         <label>Player 2 <input name=\"player2\" placeholder=\"{p2}\"></label>\n\
         <label>Difficulty <select name=\"difficulty\">{options}</select></label>\n\
         <button type=\"submit\">Play</button>\n\
         </form>",
        p1 = Player::One.label(),
        p2 = Player::Two.label(),
    );
    page("New game", &body)
}

fn status_line(state: &GameState) -> String {
    let name = |player: Player| escape_html(state.player_name(player));
    match state.status() {
        GameStatus::InProgress => {
            let player = state.current_player();
            format!(
                "<span class=\"token p{}\"></span> {}'s turn",
                player.number(),
                name(player)
            )
        }
        GameStatus::Won(player) => format!("{} wins!", name(player)),
        GameStatus::Draw => "It's a draw!".to_string(),
    }
}

pub fn game_page(id: &GameId, state: &GameState) -> String {
    let board = state.board();
    let legal = state.legal_columns();
    let mut body = String::new();

    let _ = write!(
        body,
        "<h1>{} vs {}</h1>\n<div class=\"status\">{}</div>\n<p>Turn {}</p>\n",
        escape_html(state.player_name(Player::One)),
        escape_html(state.player_name(Player::Two)),
        status_line(state),
        state.turn_count(),
    );

    body.push_str("<table class=\"board\">\n<tr>");
    for col in 0..board.cols() {
        let disabled = if legal.contains(&col) { "" } else { " disabled" };
        let _ = write!(
            body,
            "<td><form class=\"inline\" method=\"post\" action=\"/game/{id}/play\">\
             <input type=\"hidden\" name=\"column\" value=\"{col}\">\
             <button type=\"submit\"{disabled}>&#x25BC;</button></form></td>"
        );
    }
    body.push_str("</tr>\n");

    for row in 0..board.rows() {
        body.push_str("<tr>");
        for cell in board.row(row) {
            let class = match cell {
                Cell::Empty => "cell",
                Cell::Occupied(Player::One) => "cell p1",
                Cell::Occupied(Player::Two) => "cell p2",
            };
            let _ = write!(body, "<td><div class=\"{class}\"></div></td>");
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</table>\n");

    let _ = write!(
        body,
        "<form class=\"inline\" method=\"post\" action=\"/game/{id}/reset\">\
         <button type=\"submit\">Reset</button></form> \
         <a class=\"button\" href=\"/start\">New game</a>"
    );

    page("Connect Four", &body)
}
