//! Line based command interpreter driving a [`Sequence`].
//!
//! Each line holds one command followed by its whitespace separated arguments.
//! The first line may hold nothing but a number, in which case only that many lines are read after it.
//! Blank lines are skipped, but still count toward that number.

use core::{fmt, str::FromStr};
use std::io::{self, BufRead, Write};

use vecta_common::collections::{DynArrError, Sequence};
use vecta_logging::{log_debug, log_error, LogCategory};

const LOG_CAT: LogCategory = LogCategory::new("Driver");

/// Element type of the container driven by the interpreter
pub type Value = i64;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Push(Value),
    Pop,
    Clear,
    Size,
    Get(usize),
    Insert(usize, Value),
    Print,
    Iterator,
    Foreach,
    Capacity,
    Front,
    Back,
    Erase(usize),
    EraseRange(usize, usize),
    Reserve(usize),
    Shrink,
    Reset(usize),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CommandError {
    Unknown(String),
    MissingArgument { command: String, argument: &'static str },
    InvalidArgument { command: String, value: String },
    UnexpectedArgument { command: String, value: String },
    Container(DynArrError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(command) => write!(f, "unknown command '{command}'"),
            CommandError::MissingArgument { command, argument } => write!(f, "'{command}' is missing its {argument}"),
            CommandError::InvalidArgument { command, value } => write!(f, "'{value}' is not a valid argument for '{command}'"),
            CommandError::UnexpectedArgument { command, value } => write!(f, "unexpected argument '{value}' for '{command}'"),
            CommandError::Container(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Container(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DynArrError> for CommandError {
    fn from(value: DynArrError) -> Self {
        CommandError::Container(value)
    }
}

/// Pulls typed arguments from the remainder of a command line
struct ArgReader<'a, I> {
    command: &'a str,
    tokens: I,
}

impl<'a, I: Iterator<Item = &'a str>> ArgReader<'a, I> {
    fn required<T: FromStr>(&mut self, argument: &'static str) -> Result<T, CommandError> {
        match self.optional()? {
            Some(value) => Ok(value),
            None => Err(CommandError::MissingArgument { command: self.command.to_string(), argument }),
        }
    }

    fn optional<T: FromStr>(&mut self) -> Result<Option<T>, CommandError> {
        self.tokens.next()
            .map(|token| token.parse().map_err(|_| CommandError::InvalidArgument { command: self.command.to_string(), value: token.to_string() }))
            .transpose()
    }

    fn finish(mut self) -> Result<(), CommandError> {
        match self.tokens.next() {
            Some(value) => Err(CommandError::UnexpectedArgument { command: self.command.to_string(), value: value.to_string() }),
            None => Ok(()),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let command = tokens.next().unwrap_or_default();
        let mut args = ArgReader { command, tokens };

        let parsed = match command {
            "push"     => Command::Push(args.required("value")?),
            "pop"      => Command::Pop,
            "clear"    => Command::Clear,
            "size"     => Command::Size,
            "get"      => Command::Get(args.required("index")?),
            "insert"   => {
                let index = args.required("index")?;
                Command::Insert(index, args.required("value")?)
            },
            "print"    => Command::Print,
            "iterator" => Command::Iterator,
            "foreach"  => Command::Foreach,
            "capacity" => Command::Capacity,
            "front"    => Command::Front,
            "back"     => Command::Back,
            "erase"    => {
                let start = args.required("index")?;
                match args.optional()? {
                    Some(end) => Command::EraseRange(start, end),
                    None => Command::Erase(start),
                }
            },
            "reserve"  => Command::Reserve(args.required("capacity")?),
            "shrink"   => Command::Shrink,
            "reset"    => Command::Reset(args.optional()?.unwrap_or(0)),
            _          => return Err(CommandError::Unknown(command.to_string())),
        };
        args.finish()?;
        Ok(parsed)
    }
}

/// Writes the elements, each followed by a space, or `empty` when there are none.
fn write_elements<'a, W, I>(out: &mut W, elems: I) -> io::Result<()> where
    W: Write,
    I: IntoIterator<Item = &'a Value>,
{
    let mut any = false;
    for elem in elems {
        write!(out, "{elem} ")?;
        any = true;
    }
    if !any {
        out.write_all(b"empty")?;
    }
    writeln!(out)
}

/// Bails out of [`execute`] with a failed command, leaving the output untouched.
macro_rules! try_cmd {
    ($res:expr) => {
        match $res {
            Ok(value) => value,
            Err(err) => return Ok(Err(err.into())),
        }
    };
}

/// Executes a single command against `seq`, writing any result to `out`.
///
/// The outer `Result` reports output failures, the inner one failures of the command itself.
pub fn execute<S, W>(seq: &mut S, command: Command, out: &mut W) -> io::Result<Result<(), CommandError>> where
    S: Sequence<Value>,
    W: Write,
{
    match command {
        Command::Push(value) => seq.push(value),
        // Popping an empty container does nothing
        Command::Pop => {
            let _ = seq.pop();
        },
        Command::Clear => seq.clear(),
        Command::Size => writeln!(out, "{}", seq.len())?,
        Command::Capacity => writeln!(out, "{}", seq.capacity())?,
        Command::Get(index) => writeln!(out, "{}", try_cmd!(seq.at(index)))?,
        Command::Front => writeln!(out, "{}", try_cmd!(seq.front()))?,
        Command::Back => writeln!(out, "{}", try_cmd!(seq.back()))?,
        Command::Insert(index, value) => try_cmd!(seq.insert(index, value)),
        Command::Print => write_elements(out, seq.to_dynarr().as_slice())?,
        Command::Iterator => write_elements(out, seq.to_dynarr().iter())?,
        Command::Foreach => write_elements(out, &seq.to_dynarr())?,
        Command::Erase(index) => {
            try_cmd!(seq.remove(index));
        },
        Command::EraseRange(start, end) => try_cmd!(seq.remove_range(start, end)),
        Command::Reserve(capacity) => seq.reserve(capacity),
        Command::Shrink => seq.shrink_to_fit(),
        Command::Reset(capacity) => seq.destroy_and_recover(capacity),
    }
    Ok(Ok(()))
}

/// Totals of a [`run`]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Reads commands from `input` and executes them against `seq`.
///
/// Results go to `out`, failed commands are reported to `err` and logged, after which execution continues.
pub fn run<S, R, W, E>(seq: &mut S, input: R, out: &mut W, err: &mut E) -> io::Result<RunSummary> where
    S: Sequence<Value>,
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut summary = RunSummary::default();
    let mut limit = None;
    // Lines read after the leading count, blank ones included
    let mut consumed = 0;

    for (line_idx, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if consumed == 0 && limit.is_none() {
            if line.is_empty() {
                continue;
            }
            if let Ok(count) = line.parse::<usize>() {
                log_debug!(LOG_CAT, "reading {count} commands");
                limit = Some(count);
                continue;
            }
        }
        if limit.is_some_and(|limit| consumed >= limit) {
            break;
        }
        consumed += 1;
        if line.is_empty() {
            continue;
        }

        let res = match line.parse::<Command>() {
            Ok(command) => execute(seq, command, out)?,
            Err(parse_err) => Err(parse_err),
        };
        match res {
            Ok(()) => summary.executed += 1,
            Err(cmd_err) => {
                summary.failed += 1;
                log_error!(LOG_CAT, "line {}: {cmd_err}", line_idx + 1);
                writeln!(err, "error: {cmd_err}")?;
            },
        }
    }

    out.flush()?;
    Ok(summary)
}
