// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interactive prompt.
//!
//! Each input line is split with shell quoting rules and mapped to one
//! session handler. Handler failures are already in the activity log, so the
//! prompt reports them and carries on.

use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use kurbo::{Point, Vec2};
use unifilar_client::StateAuthority;
use unifilar_interaction::{BulkAction, Gesture, Outcome, PanelAction, UiEvent, status_text};
use unifilar_session::Session;

const HELP: &str = "\
select <line>              target a line (ctx <line> for the context menu)
click <x> <y>              click at a view position
open | close | fault | clear
                           panel actions on the target
cancel | esc | dismiss     close the panel
switch <line> open|close   bulk switching
faultline <line> apply|clear
                           bulk fault
reset                      restore the authority's defaults
refresh                    re-read state and redraw
panel                      show the action panel
state <line>               show one line's state
log [n]                    show the newest activity log entries
svg <path>                 write the drawing
fit                        fit and centre the view
zoom <factor> [<x> <y>]    zoom about a view point
pan <dx> <dy>              pan the view
help | quit";

/// A parsed prompt line.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ShellCommand {
    Event(UiEvent),
    Click(Point),
    Bulk {
        line: Option<String>,
        action: BulkAction,
    },
    Refresh,
    Panel,
    State(String),
    Log(usize),
    Svg(PathBuf),
    Fit,
    Zoom { factor: f64, anchor: Option<Point> },
    Pan(Vec2),
    Help,
    Quit,
}

/// Parses one prompt line. Blank lines yield `None`.
pub(crate) fn parse(input: &str) -> Result<Option<ShellCommand>, String> {
    let words = shell_words::split(input).map_err(|e| e.to_string())?;
    let Some((head, args)) = words.split_first() else {
        return Ok(None);
    };
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let cmd = match (head.as_str(), args.as_slice()) {
        ("select", [line]) => ShellCommand::Event(UiEvent::click(line)),
        ("ctx", [line]) => ShellCommand::Event(UiEvent::Select {
            line: (*line).to_owned(),
            gesture: Gesture::ContextMenu,
        }),
        ("click", [x, y]) => ShellCommand::Click(Point::new(number(x)?, number(y)?)),
        ("open", []) => ShellCommand::Event(UiEvent::Action(PanelAction::Open)),
        ("close", []) => ShellCommand::Event(UiEvent::Action(PanelAction::Close)),
        ("fault", []) => ShellCommand::Event(UiEvent::Action(PanelAction::ApplyFault)),
        ("clear", []) => ShellCommand::Event(UiEvent::Action(PanelAction::ClearFault)),
        ("cancel", []) => ShellCommand::Event(UiEvent::Cancel),
        ("esc", []) => ShellCommand::Event(UiEvent::Escape),
        ("dismiss", []) => ShellCommand::Event(UiEvent::DismissOverlay),
        ("switch", [line, action]) => ShellCommand::Bulk {
            line: Some((*line).to_owned()),
            action: match *action {
                "open" => BulkAction::Open,
                "close" => BulkAction::Close,
                other => return Err(format!("expected open or close, got `{other}`")),
            },
        },
        ("faultline", [line, action]) => ShellCommand::Bulk {
            line: Some((*line).to_owned()),
            action: match *action {
                "apply" => BulkAction::ApplyFault,
                "clear" => BulkAction::ClearFault,
                other => return Err(format!("expected apply or clear, got `{other}`")),
            },
        },
        ("reset", []) => ShellCommand::Bulk {
            line: None,
            action: BulkAction::Reset,
        },
        ("refresh", []) => ShellCommand::Refresh,
        ("panel", []) => ShellCommand::Panel,
        ("state", [line]) => ShellCommand::State((*line).to_owned()),
        ("log", []) => ShellCommand::Log(10),
        ("log", [n]) => ShellCommand::Log(n.parse().map_err(|_| format!("bad count `{n}`"))?),
        ("svg", [path]) => ShellCommand::Svg(PathBuf::from(path)),
        ("fit", []) => ShellCommand::Fit,
        ("zoom", [factor]) => ShellCommand::Zoom {
            factor: number(factor)?,
            anchor: None,
        },
        ("zoom", [factor, x, y]) => ShellCommand::Zoom {
            factor: number(factor)?,
            anchor: Some(Point::new(number(x)?, number(y)?)),
        },
        ("pan", [dx, dy]) => ShellCommand::Pan(Vec2::new(number(dx)?, number(dy)?)),
        ("help" | "?", []) => ShellCommand::Help,
        ("quit" | "exit", []) => ShellCommand::Quit,
        (other, _) => return Err(format!("unknown or malformed command `{other}`; try `help`")),
    };
    Ok(Some(cmd))
}

fn number(word: &str) -> Result<f64, String> {
    word.parse().map_err(|_| format!("not a number: `{word}`"))
}

/// Runs commands from `input` until `quit` or end of input.
pub(crate) fn run<A, R, W>(
    session: &mut Session<A>,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    A: StateAuthority,
    R: BufRead,
    W: Write,
{
    write!(out, "> ")?;
    out.flush()?;
    for line in input.lines() {
        match parse(&line?) {
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(cmd)) => execute(session, cmd, out)?,
            Ok(None) => {}
            Err(msg) => writeln!(out, "error: {msg}")?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

/// Carries out one command. Only output errors are returned.
pub(crate) fn execute<A, W>(
    session: &mut Session<A>,
    cmd: ShellCommand,
    out: &mut W,
) -> anyhow::Result<()>
where
    A: StateAuthority,
    W: Write,
{
    let result = match cmd {
        ShellCommand::Event(event) => session.handle_event(&event).map(|o| report(&o)),
        ShellCommand::Click(pt) => session.click(pt, Gesture::Click).map(|o| report(&o)),
        ShellCommand::Bulk { line, action } => {
            let selected = match (&line, action) {
                (None, _) => Ok(()),
                (Some(l), BulkAction::Open | BulkAction::Close) => {
                    session.select_switching_line(l)
                }
                (Some(l), _) => session.select_fault_line(l),
            };
            selected.and_then(|()| session.bulk_action(action)).map(|sent| {
                sent.map_or_else(|| "nothing to send".to_owned(), |c| c.describe())
            })
        }
        ShellCommand::Refresh => session.refresh().map(|()| "refreshed".to_owned()),
        ShellCommand::Panel => Ok(match session.panel() {
            Some(panel) => {
                let buttons: Vec<String> = PanelAction::ALL
                    .iter()
                    .map(|&a| {
                        if panel.is_enabled(a) {
                            format!("[{}]", a.label())
                        } else {
                            format!("({})", a.label())
                        }
                    })
                    .collect();
                format!("{}\n{}\n{}", panel.title, panel.status, buttons.join(" "))
            }
            None => "no panel open".to_owned(),
        }),
        ShellCommand::State(line) => Ok(match session.topology() {
            Some(topo) if topo.contains_line(&line) => {
                status_text(session.state().line(&line))
            }
            _ => format!("unknown line `{line}`"),
        }),
        ShellCommand::Log(n) => Ok(session
            .log()
            .entries()
            .take(n)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        ShellCommand::Svg(path) => Ok(match fs::write(&path, session.to_svg()) {
            Ok(()) => format!("wrote {}", path.display()),
            Err(err) => format!("error: writing {}: {err}", path.display()),
        }),
        ShellCommand::Fit => {
            session.fit_view();
            Ok("view fitted".to_owned())
        }
        ShellCommand::Zoom { factor, anchor } => {
            let anchor = anchor.unwrap_or_else(|| session.config().canvas().rect().center());
            if let Some(vp) = session.viewport_mut() {
                vp.zoom_about(anchor, factor);
            }
            Ok(format!("view {:?}", session.view_transform().as_coeffs()))
        }
        ShellCommand::Pan(delta) => {
            if let Some(vp) = session.viewport_mut() {
                vp.pan_by(delta);
            }
            Ok(format!("view {:?}", session.view_transform().as_coeffs()))
        }
        ShellCommand::Help => Ok(HELP.to_owned()),
        ShellCommand::Quit => Ok(String::new()),
    };
    match result {
        Ok(text) if text.is_empty() => {}
        Ok(text) => writeln!(out, "{text}")?,
        Err(err) => writeln!(out, "error: {err}")?,
    }
    Ok(())
}

fn report(outcome: &Outcome) -> String {
    match outcome {
        Outcome::PanelOpened(line) => format!("panel opened for {line}"),
        Outcome::PanelClosed => "panel closed".to_owned(),
        Outcome::Dispatch(command) => command.describe(),
        Outcome::Ignored => "ignored".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_panel_and_dismissal_words() {
        assert_eq!(
            parse("open").unwrap(),
            Some(ShellCommand::Event(UiEvent::Action(PanelAction::Open)))
        );
        assert_eq!(
            parse("esc").unwrap(),
            Some(ShellCommand::Event(UiEvent::Escape))
        );
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn quoted_line_names_survive() {
        assert_eq!(
            parse(r#"select "R4B-B2 (tie)""#).unwrap(),
            Some(ShellCommand::Event(UiEvent::click("R4B-B2 (tie)")))
        );
    }

    #[test]
    fn bulk_words_carry_their_line() {
        assert_eq!(
            parse("switch RCL-04 close").unwrap(),
            Some(ShellCommand::Bulk {
                line: Some("RCL-04".into()),
                action: BulkAction::Close,
            })
        );
        assert_eq!(
            parse("reset").unwrap(),
            Some(ShellCommand::Bulk {
                line: None,
                action: BulkAction::Reset,
            })
        );
        assert!(parse("switch RCL-04 sideways").is_err());
    }

    #[test]
    fn view_commands_take_numbers() {
        assert_eq!(
            parse("zoom 2 100 50").unwrap(),
            Some(ShellCommand::Zoom {
                factor: 2.0,
                anchor: Some(Point::new(100.0, 50.0)),
            })
        );
        assert_eq!(
            parse("pan -10 5").unwrap(),
            Some(ShellCommand::Pan(Vec2::new(-10.0, 5.0)))
        );
        assert!(parse("click x 1").is_err());
    }

    #[test]
    fn prompt_reports_errors_and_stops_at_quit() {
        use unifilar_client::HttpAuthority;
        use unifilar_session::SessionConfig;

        let authority = HttpAuthority::new("http://127.0.0.1:9", None);
        let mut session = Session::new(authority, SessionConfig::default());
        let input = "help\nselect L1\nbogus\nquit\npanel\n";
        let mut out = Vec::new();
        run(&mut session, input.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("select <line>"), "help text missing: {text}");
        assert!(text.contains("error: session is not loaded"), "{text}");
        assert!(text.contains("error: unknown or malformed command `bogus`"), "{text}");
        assert!(!text.contains("no panel open"), "input after quit was run: {text}");
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(parse("select").is_err());
        assert!(parse("frobnicate").is_err());
        assert!(parse("select \"unterminated").is_err());
    }
}
