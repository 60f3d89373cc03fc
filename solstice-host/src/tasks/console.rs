//! Console control
//!
//! Lines typed on stdin become `Command`s. A plain thread reads stdin and
//! hands parsed commands to `console_task` over the `CONSOLE` channel; the
//! task plays the host's part (visibility, ambient, taps, time zone) and
//! the companion's (publish, delete, online).

use std::io::BufRead;

use log::{error, info, warn};
use thiserror::Error;

use solstice_core::state::{HostEvent, TapKind};
use solstice_protocol::DataPath;

use crate::channels::{CONSOLE, PUBLISH_NOW};
use crate::sync::DataLayer;
use crate::tasks::HostCoordinator;

/// Console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Show,
    Hide,
    Ambient(bool),
    LowBit(bool),
    Tap { kind: TapKind, x: i32, y: i32 },
    TimeZone,
    Publish,
    Delete,
    Online(bool),
    Status,
    Help,
    Quit,
}

/// Console input errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty line")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
}

const HELP: &str = "\
commands:
  show | hide             face visibility
  ambient on|off          ambient mode
  lowbit on|off           low-bit ambient display property
  tap|touch|cancel [x y]  touch gesture
  tz                      switch to the next time zone
  publish                 companion publishes its next forecast
  delete                  companion deletes the weather item
  online on|off           take the data layer on- or offline
  status                  print face state
  quit";

impl Command {
    /// Parse one console line
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Err(ParseError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let cmd = match word.to_ascii_lowercase().as_str() {
            "show" => Command::Show,
            "hide" => Command::Hide,
            "ambient" => Command::Ambient(switch("ambient", &args)?),
            "lowbit" => Command::LowBit(switch("lowbit", &args)?),
            "tap" => tap("tap", TapKind::Tap, &args)?,
            "touch" => tap("touch", TapKind::Touch, &args)?,
            "cancel" => tap("cancel", TapKind::TouchCancel, &args)?,
            "tz" => Command::TimeZone,
            "publish" => Command::Publish,
            "delete" => Command::Delete,
            "online" => Command::Online(switch("online", &args)?),
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.into())),
        };
        Ok(cmd)
    }
}

fn switch(command: &'static str, args: &[&str]) -> Result<bool, ParseError> {
    match args {
        ["on"] => Ok(true),
        ["off"] => Ok(false),
        _ => Err(ParseError::BadArgument {
            command,
            expected: "'on' or 'off'",
        }),
    }
}

fn tap(command: &'static str, kind: TapKind, args: &[&str]) -> Result<Command, ParseError> {
    let bad = ParseError::BadArgument {
        command,
        expected: "no arguments or 'x y'",
    };
    let (x, y) = match args {
        [] => (0, 0),
        [x, y] => match (x.parse(), y.parse()) {
            (Ok(x), Ok(y)) => (x, y),
            _ => return Err(bad),
        },
        _ => return Err(bad),
    };
    Ok(Command::Tap { kind, x, y })
}

/// Read stdin on a plain thread and queue parsed commands
pub fn spawn_stdin_reader() -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("console".into())
        .spawn(|| {
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        error!("Console read failed: {}", e);
                        break;
                    }
                };
                match Command::parse(&line) {
                    Ok(cmd) => embassy_futures::block_on(CONSOLE.send(cmd)),
                    Err(ParseError::Empty) => {}
                    Err(e) => warn!("{}", e),
                }
            }
            info!("Console closed");
        })?;
    Ok(())
}

#[embassy_executor::task]
pub async fn console_task(
    coordinator: &'static HostCoordinator,
    layer: &'static DataLayer<'static>,
    path: DataPath,
) {
    info!("Console ready, type 'help' for commands");

    loop {
        let cmd = CONSOLE.receive().await;
        match cmd {
            Command::Show => coordinator.host_event(HostEvent::VisibilityChanged(true)),
            Command::Hide => coordinator.host_event(HostEvent::VisibilityChanged(false)),
            Command::Ambient(on) => coordinator.host_event(HostEvent::AmbientModeChanged(on)),
            Command::LowBit(on) => coordinator.host_event(HostEvent::PropertiesChanged {
                low_bit_ambient: on,
            }),
            Command::Tap { kind, x, y } => {
                let time_ms = coordinator.now_ms().max(0) as u64;
                coordinator.host_event(HostEvent::Tap {
                    kind,
                    x,
                    y,
                    time_ms,
                });
            }
            Command::TimeZone => {
                let name = coordinator.with_engine(|e| e.clock_mut().cycle_zone());
                info!("Time zone: {}", name);
                coordinator.host_event(HostEvent::TimeZoneChanged);
            }
            Command::Publish => PUBLISH_NOW.signal(()),
            Command::Delete => layer.delete(&path),
            Command::Online(on) => layer.set_online(on),
            Command::Status => coordinator.with_engine(|e| {
                let display = e.display();
                info!(
                    "Face: {:?} (taps {}, low-bit {}), sync {:?}, tick {:?}",
                    display.mode(),
                    display.tap_count,
                    display.low_bit_ambient,
                    e.pipeline().link(),
                    e.pending_tick()
                );
                info!(
                    "Data layer: {}",
                    if layer.is_connected() {
                        "connected"
                    } else {
                        "idle"
                    }
                );
                match e.weather() {
                    Some(w) => info!(
                        "Weather: {} {} ({})",
                        w.condition_id,
                        w.temperature_text(),
                        w.short_desc
                    ),
                    None => info!("Weather: none"),
                }
            }),
            Command::Help => info!("{}", HELP),
            Command::Quit => {
                info!("Quitting");
                std::process::exit(0);
            }
        }
    }
}
