//! Scan-state machine shared by every Neha rewrite pass.
//!
//! The engine never tokenizes fully. All it needs to know at any byte is
//! whether that byte is live code or belongs to a comment, a quoted string,
//! or the literal text of a template. [`Lexer`] walks the source once and
//! hands each byte of live code to the caller; everything else is consumed
//! silently.
//!
//! Template holes (`${ ... }`) are live code and may contain their own
//! strings, comments and nested templates, so suspended states are kept on a
//! stack and restored when the inner region closes.

/// Lexical context at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Normal,
    LineComment,
    BlockComment,
    SingleQuoted,
    DoubleQuoted,
    /// Literal text between `` ` `` and `${`, or between `}` and `` ` ``.
    TemplateLiteral,
    /// Code inside a template hole, with its open brace depth (`${` counts as 1).
    TemplateExpression(u32),
}

enum Step {
    Code(usize),
    Skipped,
}

/// Forward-only walker over a source buffer.
///
/// ```
/// use nh_lexer::Lexer;
///
/// let mut lexer = Lexer::new("a 'b' c");
/// let mut code = String::new();
/// while let Some(at) = lexer.next_code() {
///     code.push(lexer.source()[at] as char);
/// }
/// assert_eq!(code, "a  c");
/// ```
pub struct Lexer<'a> {
    text: &'a str,
    src: &'a [u8],
    pos: usize,
    state: ScanState,
    suspended: Vec<ScanState>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            src: text.as_bytes(),
            pos: 0,
            state: ScanState::Normal,
            suspended: Vec::new(),
        }
    }

    pub fn source(&self) -> &'a [u8] {
        self.src
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Jump forward to `pos`, treating everything skipped as code that the
    /// caller has already classified.
    ///
    /// Only ever used to step over identifier runs, whitespace, and markup
    /// tags, none of which change the scan state.
    pub fn seek(&mut self, pos: usize) {
        debug_assert!(pos >= self.pos, "lexer cannot move backwards");
        self.pos = pos.min(self.src.len());
    }

    /// Consume input up to and including the next byte of live code and
    /// return its offset, or `None` at end of input.
    pub fn next_code(&mut self) -> Option<usize> {
        while self.pos < self.src.len() {
            if let Step::Code(at) = self.step() {
                return Some(at);
            }
        }
        None
    }

    fn step(&mut self) -> Step {
        let i = self.pos;
        let b = self.src[i];

        match self.state {
            ScanState::LineComment => {
                if b == b'\n' {
                    self.resume();
                }
                self.pos += 1;
            }
            ScanState::BlockComment => {
                if self.starts_with(i, b"*/") {
                    self.pos += 2;
                    self.resume();
                } else {
                    self.pos += 1;
                }
            }
            ScanState::SingleQuoted | ScanState::DoubleQuoted => {
                let quote = if self.state == ScanState::SingleQuoted {
                    b'\''
                } else {
                    b'"'
                };
                if b == b'\\' {
                    self.skip_escape();
                } else {
                    self.pos += 1;
                    // An unescaped line break cannot occur inside a quoted
                    // string, so treat it as the end of a malformed one.
                    if b == quote || b == b'\n' {
                        self.resume();
                    }
                }
            }
            ScanState::TemplateLiteral => {
                if b == b'\\' {
                    self.skip_escape();
                } else if b == b'`' {
                    self.pos += 1;
                    self.resume();
                } else if self.starts_with(i, b"${") {
                    self.pos += 2;
                    self.enter(ScanState::TemplateExpression(1));
                } else {
                    self.pos += 1;
                }
            }
            ScanState::Normal | ScanState::TemplateExpression(_) => return self.code_step(),
        }

        Step::Skipped
    }

    fn code_step(&mut self) -> Step {
        let i = self.pos;
        let opened = match self.src[i] {
            b'/' if self.starts_with(i, b"//") => Some((ScanState::LineComment, 2)),
            b'/' if self.starts_with(i, b"/*") => Some((ScanState::BlockComment, 2)),
            b'\'' => Some((ScanState::SingleQuoted, 1)),
            b'"' => Some((ScanState::DoubleQuoted, 1)),
            b'`' => Some((ScanState::TemplateLiteral, 1)),
            _ => None,
        };
        if let Some((state, width)) = opened {
            self.pos += width;
            self.enter(state);
            return Step::Skipped;
        }

        self.pos += 1;
        if let ScanState::TemplateExpression(depth) = self.state {
            match self.src[i] {
                b'{' => self.state = ScanState::TemplateExpression(depth + 1),
                b'}' if depth == 1 => {
                    self.resume();
                    return Step::Skipped;
                }
                b'}' => self.state = ScanState::TemplateExpression(depth - 1),
                _ => {}
            }
        }
        Step::Code(i)
    }

    fn enter(&mut self, state: ScanState) {
        self.suspended.push(self.state);
        self.state = state;
    }

    fn resume(&mut self) {
        self.state = self.suspended.pop().unwrap_or(ScanState::Normal);
    }

    /// Consume a backslash and exactly one following character.
    fn skip_escape(&mut self) {
        self.pos += 1;
        let escaped = self.text[self.pos..].chars().next().map_or(0, char::len_utf8);
        self.pos += escaped;
    }

    fn starts_with(&self, i: usize, pat: &[u8]) -> bool {
        self.src[i..].starts_with(pat)
    }
}

/// Bytes that can begin an identifier. Non-ASCII bytes are accepted so that
/// multi-byte characters are never split from the word they belong to.
pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

pub fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// End of the identifier-like run starting at `start`.
pub fn word_end(src: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < src.len() && is_ident_continue(src[i]) {
        i += 1;
    }
    i
}

/// First offset at or after `i` that is not ASCII whitespace.
pub fn skip_whitespace(src: &[u8], i: usize) -> usize {
    let mut j = i;
    while j < src.len() && src[j].is_ascii_whitespace() {
        j += 1;
    }
    j
}

/// Whether the `.` at `i` is a member access rather than part of a spread.
pub fn is_member_dot(src: &[u8], i: usize) -> bool {
    src.get(i) == Some(&b'.')
        && !(i > 0 && src[i - 1] == b'.')
        && src.get(i + 1) != Some(&b'.')
}

/// Whether the word at `start` is the property of a member access, i.e. the
/// nearest non-whitespace byte before it is a member `.`.
pub fn follows_member_dot(src: &[u8], start: usize) -> bool {
    let mut k = start;
    while k > 0 && src[k - 1].is_ascii_whitespace() {
        k -= 1;
    }
    k > 0 && is_member_dot(src, k - 1)
}

/// Whether only spaces and tabs separate `i` from the start of its line.
pub fn at_line_start(src: &[u8], i: usize) -> bool {
    src[..i]
        .iter()
        .rev()
        .take_while(|&&b| b != b'\n' && b != b'\r')
        .all(|&b| b == b' ' || b == b'\t')
}
