//! Display-list scripts.
//!
//! One command per line, whitespace separated, `#` starts a comment:
//!
//! ```text
//! clear
//! clip 0 0 320 240
//! segment 10 10 ffffff 0      # blank move
//! segment 200 120 ff8000 200
//! frame
//! ```
//!
//! Coordinates are whole pixels, converted to 16.16 device units while
//! parsing. Pixels outside `MIN_PIXEL..=MAX_PIXEL` are rejected.

use std::fmt;

use vector_crt::{DevicePoint, Rgb};

/// One parsed script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new display list.
    Clear,
    /// Move the beam to `end`.
    Segment {
        end: DevicePoint,
        color: Rgb,
        intensity: i32,
    },
    /// Set the clip rectangle.
    Clip { from: DevicePoint, to: DevicePoint },
    /// Render the display list as it stands.
    Frame,
}

/// A script line that could not be parsed. Line numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    UnknownCommand {
        line: usize,
        name: String,
    },
    MissingArgument {
        line: usize,
        command: &'static str,
        argument: &'static str,
    },
    InvalidArgument {
        line: usize,
        argument: &'static str,
        value: String,
    },
    TrailingInput {
        line: usize,
        value: String,
    },
}

impl ScriptError {
    /// The line the error was found on.
    pub fn line(&self) -> usize {
        match self {
            ScriptError::UnknownCommand { line, .. }
            | ScriptError::MissingArgument { line, .. }
            | ScriptError::InvalidArgument { line, .. }
            | ScriptError::TrailingInput { line, .. } => *line,
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::UnknownCommand { line, name } => {
                write!(f, "line {}: unknown command '{}'", line, name)
            }
            ScriptError::MissingArgument {
                line,
                command,
                argument,
            } => write!(f, "line {}: '{}' is missing {}", line, command, argument),
            ScriptError::InvalidArgument {
                line,
                argument,
                value,
            } => write!(f, "line {}: invalid {} '{}'", line, argument, value),
            ScriptError::TrailingInput { line, value } => {
                write!(f, "line {}: unexpected '{}'", line, value)
            }
        }
    }
}

impl std::error::Error for ScriptError {}

/// Parses a whole script.
pub fn parse(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        if let Some(command) = parse_line(index + 1, raw)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

fn parse_line(line: usize, raw: &str) -> Result<Option<Command>, ScriptError> {
    let text = match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let mut args = Args {
        line,
        command: "",
        tokens: text.split_whitespace(),
    };
    let Some(name) = args.tokens.next() else {
        return Ok(None);
    };

    let command = match name {
        "clear" => Command::Clear,
        "frame" => Command::Frame,
        "segment" => {
            args.command = "segment";
            Command::Segment {
                end: args.point("x", "y")?,
                color: args.color()?,
                intensity: args.int("intensity")?,
            }
        }
        "clip" => {
            args.command = "clip";
            Command::Clip {
                from: args.point("x1", "y1")?,
                to: args.point("x2", "y2")?,
            }
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                name: other.to_string(),
            })
        }
    };

    match args.tokens.next() {
        Some(extra) => Err(ScriptError::TrailingInput {
            line,
            value: extra.to_string(),
        }),
        None => Ok(Some(command)),
    }
}

struct Args<'a> {
    line: usize,
    command: &'static str,
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn next(&mut self, argument: &'static str) -> Result<&'a str, ScriptError> {
        self.tokens.next().ok_or(ScriptError::MissingArgument {
            line: self.line,
            command: self.command,
            argument,
        })
    }

    fn int(&mut self, argument: &'static str) -> Result<i32, ScriptError> {
        let token = self.next(argument)?;
        token.parse().map_err(|_| self.invalid(argument, token))
    }

    /// A pixel coordinate pair, converted to device units.
    fn point(&mut self, x: &'static str, y: &'static str) -> Result<DevicePoint, ScriptError> {
        Ok(DevicePoint::new(self.coord(x)?, self.coord(y)?))
    }

    fn coord(&mut self, argument: &'static str) -> Result<i32, ScriptError> {
        let token = self.next(argument)?;
        token
            .parse()
            .ok()
            .and_then(|pixel| DevicePoint::from_pixel(pixel, 0))
            .map(|p| p.x)
            .ok_or_else(|| self.invalid(argument, token))
    }

    /// `rrggbb`, optionally prefixed with `0x`.
    fn color(&mut self) -> Result<Rgb, ScriptError> {
        let token = self.next("color")?;
        let hex = token.strip_prefix("0x").unwrap_or(token);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(self.invalid("color", token));
        }
        u32::from_str_radix(hex, 16)
            .map(Rgb::from_u32)
            .map_err(|_| self.invalid("color", token))
    }

    fn invalid(&self, argument: &'static str, value: &str) -> ScriptError {
        ScriptError::InvalidArgument {
            line: self.line,
            argument,
            value: value.to_string(),
        }
    }
}
