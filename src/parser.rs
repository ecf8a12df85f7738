//! Line to [`Command`] parsing.
//!
//! A line is `<verb>[ <args>]\n`. The verb is matched case-insensitively
//! against [`VERBS`]; the arguments are scanned with the same rules as C's
//! `sscanf("%d %d ... %c")`, which means a malformed number reads exactly
//! like a missing one:
//!
//! - numbers skip leading whitespace, take an optional sign and at least one
//!   digit, and stop at the first non-digit (`12ab` scans as `12`)
//! - the color skips whitespace and takes the next byte, whatever it is
//! - scanning stops at the first conversion that fails
//!
//! A known verb with too few numbers is invalid but carries no diagnostic.

use crate::color::DEFAULT_TAG;
use crate::command::{Command, CommandError, CommandKind};
use crate::{LINE_CAPACITY, LINE_TERMINATOR};

/// Numeric argument positions a grammar can fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// [`Command::x`]
    X,
    /// [`Command::y`]
    Y,
    /// [`Command::radius`]
    Radius,
    /// [`Command::level`]
    Level,
}

impl Slot {
    fn field(self, command: &mut Command) -> &mut i32 {
        match self {
            Self::X => &mut command.x,
            Self::Y => &mut command.y,
            Self::Radius => &mut command.radius,
            Self::Level => &mut command.level,
        }
    }
}

/// Argument grammar for one verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// The verb takes no arguments and is always valid
    Bare,
    /// Required integers in order, followed by an optional color tag
    Numbers(&'static [Slot]),
}

const POINT_ARGS: &[Slot] = &[Slot::X, Slot::Y, Slot::Level];
const LEVEL_ARGS: &[Slot] = &[Slot::Level];
const FIELD_ARGS: &[Slot] = &[Slot::X, Slot::Y, Slot::Radius, Slot::Level];

/// Verb table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verb {
    /// Spelling on the wire, matched ignoring ASCII case
    pub name: &'static str,
    /// Command the verb selects
    pub kind: CommandKind,
    /// How the arguments are read
    pub grammar: Grammar,
}

/// Recognized verbs in matching order
pub static VERBS: [Verb; 9] = [
    Verb::numbers(CommandKind::Draw, POINT_ARGS),
    Verb::numbers(CommandKind::Fill, LEVEL_ARGS),
    Verb::numbers(CommandKind::Brightfield, FIELD_ARGS),
    Verb::numbers(CommandKind::Darkfield, FIELD_ARGS),
    Verb::numbers(CommandKind::PhaseTop, FIELD_ARGS),
    Verb::numbers(CommandKind::PhaseBottom, FIELD_ARGS),
    Verb::numbers(CommandKind::PhaseRight, FIELD_ARGS),
    Verb::numbers(CommandKind::PhaseLeft, FIELD_ARGS),
    Verb {
        name: CommandKind::Help.verb(),
        kind: CommandKind::Help,
        grammar: Grammar::Bare,
    },
];

impl Verb {
    const fn numbers(kind: CommandKind, slots: &'static [Slot]) -> Self {
        Self {
            name: kind.verb(),
            kind,
            grammar: Grammar::Numbers(slots),
        }
    }

    /// Number of integers the verb needs to be valid
    #[must_use]
    pub const fn required(&self) -> usize {
        match self.grammar {
            Grammar::Bare => 0,
            Grammar::Numbers(slots) => slots.len(),
        }
    }
}

/// Look up a verb, ignoring ASCII case.
#[must_use]
pub fn lookup(verb: &[u8]) -> Option<&'static Verb> {
    VERBS
        .iter()
        .find(|entry| entry.name.as_bytes().eq_ignore_ascii_case(verb))
}

/// Parse a line into a fresh [`Command`].
#[must_use]
pub fn parse(line: &[u8]) -> Command {
    Command::parse(line)
}

/// Parse a line into an existing record, resetting it first.
///
/// The line must still carry its terminator; anything else is rejected with
/// [`CommandError::NoTerminator`]. This is also how a line completed by the
/// reader's idle timeout ends up being dropped.
pub fn parse_into(line: &[u8], command: &mut Command) {
    command.reset();

    let Some((&LINE_TERMINATOR, body)) = line.split_last() else {
        command.error = Some(CommandError::NoTerminator);
        return;
    };

    let (verb, args) = match line.iter().position(|&b| b == b' ') {
        Some(space) => (&line[..space], &line[space + 1..]),
        None => (body, &[][..]),
    };

    command.is_valid = true;

    let Some(entry) = lookup(verb) else {
        command.is_valid = false;
        command.error = Some(CommandError::Unrecognized(echo(verb)));
        return;
    };

    command.kind = entry.kind;
    if let Grammar::Numbers(slots) = entry.grammar {
        scan_arguments(args, slots, command);
    }
}

/// Fill `slots` then the color from `args`, invalidating the command when a
/// required number is missing.
fn scan_arguments(args: &[u8], slots: &[Slot], command: &mut Command) {
    let mut scanner = Scanner::new(args);

    for &slot in slots {
        match scanner.int() {
            Some(value) => *slot.field(command) = value,
            None => {
                command.is_valid = false;
                return;
            }
        }
    }

    command.color = scanner.byte().map_or(DEFAULT_TAG, char::from);
}

/// The verb for the diagnostic, each byte read as a Latin-1 character.
///
/// ASCII verbs are copied as-is. Bytes above `0x7F` take two bytes of UTF-8,
/// so the text stops at the first character that no longer fits in
/// [`LINE_CAPACITY`] bytes.
fn echo(verb: &[u8]) -> heapless::String<LINE_CAPACITY> {
    let mut text = heapless::String::new();
    for &b in verb {
        if text.push(char::from(b)).is_err() {
            break;
        }
    }
    text
}

/// Whitespace as C's `isspace` sees it
const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// `sscanf`-style conversion cursor
#[derive(Debug)]
struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_space(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.pos += 1;
        }
    }

    /// `%d`: saturates at the `i32` bounds like `strtol` on a 32-bit target
    fn int(&mut self) -> Option<i32> {
        self.skip_space();

        let mut pos = self.pos;
        let negative = match self.input.get(pos) {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };

        let digits_start = pos;
        let mut magnitude: i64 = 0;
        while let Some(&b) = self.input.get(pos) {
            if !b.is_ascii_digit() {
                break;
            }
            magnitude = (magnitude * 10 + i64::from(b - b'0')).min(i64::from(u32::MAX));
            pos += 1;
        }
        if pos == digits_start {
            return None;
        }
        self.pos = pos;

        let value = if negative { -magnitude } else { magnitude };
        Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }

    /// ` %c`
    fn byte(&mut self) -> Option<u8> {
        self.skip_space();
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }
}
