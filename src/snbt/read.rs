use crate::{Compound, Error, List, Result, TagID, Value, snbt::MAX_DEPTH};

pub(crate) struct Reader<'s> {
    input: &'s str,
    bytes: &'s [u8],
    pos: usize,
    depth: usize,
}

#[inline]
fn is_unquoted(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b'+')
}

impl<'s> Reader<'s> {
    pub(crate) fn new(input: &'s str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    #[cold]
    fn error_at(&self, pos: usize, reason: &'static str) -> Error {
        Error::malformed_text(self.input, pos, reason)
    }

    #[cold]
    fn error(&self, reason: &'static str) -> Error {
        self.error_at(self.pos, reason)
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    #[inline]
    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8, reason: &'static str) -> Result<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(reason))
        }
    }

    pub(crate) fn finish(&mut self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.error("trailing data after end of input")),
        }
    }

    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        Ok(())
    }

    pub(crate) fn read_root_compound(&mut self) -> Result<Compound> {
        match self.peek() {
            Some(b'{') => self.read_compound(),
            None => Err(self.error("unexpected end of input")),
            Some(_) => Err(self.error("expected compound")),
        }
    }

    pub(crate) fn read_value(&mut self) -> Result<Value> {
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'{') => self.read_compound().map(Value::Compound),
            Some(b'[') => self.read_list_or_array(),
            Some(b'"' | b'\'') => self.read_quoted().map(Value::String),
            Some(_) => self.read_unquoted_value(),
        }
    }

    fn read_compound(&mut self) -> Result<Compound> {
        self.descend()?;
        self.expect(b'{', "expected '{'")?;
        let mut compound = Compound::new();

        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(compound);
        }

        loop {
            let key = self.read_key()?;
            self.expect(b':', "expected ':' after key")?;
            let value = self.read_value()?;
            compound.insert(key, value);

            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(self.error("unexpected end of input")),
                Some(_) => return Err(self.error("expected ',' or '}'")),
            }
        }

        self.depth -= 1;
        Ok(compound)
    }

    fn read_key(&mut self) -> Result<String> {
        match self.peek() {
            Some(b'"' | b'\'') => self.read_quoted(),
            None => Err(self.error("unexpected end of input")),
            Some(_) => {
                let token = self.read_token();
                if token.is_empty() {
                    return Err(self.error("expected key"));
                }
                Ok(token.to_owned())
            }
        }
    }

    fn read_token(&mut self) -> &'s str {
        let start = self.pos;
        while self.pos < self.bytes.len() && is_unquoted(self.bytes[self.pos]) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn read_quoted(&mut self) -> Result<String> {
        let quote = self.bytes[self.pos];
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        let mut run = self.pos;

        loop {
            match self.bytes.get(self.pos) {
                None => return Err(self.error_at(start, "unterminated string")),
                Some(&b) if b == quote => {
                    out.push_str(&self.input[run..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.input[run..self.pos]);
                    match self.bytes.get(self.pos + 1) {
                        Some(&escaped @ (b'\\' | b'"' | b'\'')) => out.push(escaped as char),
                        None => return Err(self.error_at(start, "unterminated string")),
                        Some(_) => return Err(self.error("invalid escape sequence")),
                    }
                    self.pos += 2;
                    run = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn read_unquoted_value(&mut self) -> Result<Value> {
        let start = self.pos;
        let token = self.read_token();
        if token.is_empty() {
            return Err(self.error("expected value"));
        }
        match classify(token) {
            Some(Ok(value)) => Ok(value),
            Some(Err(reason)) => Err(self.error_at(start, reason)),
            None => Ok(Value::String(token.to_owned())),
        }
    }

    fn read_list_or_array(&mut self) -> Result<Value> {
        self.descend()?;
        self.expect(b'[', "expected '['")?;

        let element = match (self.bytes.get(self.pos), self.bytes.get(self.pos + 1)) {
            (Some(b'B'), Some(b';')) => Some(TagID::ByteArray),
            (Some(b'I'), Some(b';')) => Some(TagID::IntArray),
            (Some(b'L'), Some(b';')) => Some(TagID::LongArray),
            _ => None,
        };

        let value = match element {
            Some(array) => {
                self.pos += 2;
                self.read_array(array)?
            }
            None => self.read_list()?,
        };

        self.depth -= 1;
        Ok(value)
    }

    fn read_elements(&mut self, mut each: impl FnMut(&mut Self) -> Result<()>) -> Result<()> {
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(());
        }
        loop {
            each(self)?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(());
                }
                None => return Err(self.error("unexpected end of input")),
                Some(_) => return Err(self.error("expected ',' or ']'")),
            }
        }
    }

    fn read_list(&mut self) -> Result<Value> {
        let mut list = List::new();
        self.read_elements(|reader| {
            reader.skip_whitespace();
            let start = reader.pos;
            let value = reader.read_value()?;
            list.push(value)
                .map_err(|_| reader.error_at(start, "list elements must share one type"))
        })?;
        Ok(Value::List(list))
    }

    fn read_array(&mut self, array: TagID) -> Result<Value> {
        let mut values: Vec<i64> = Vec::new();
        self.read_elements(|reader| {
            reader.skip_whitespace();
            let start = reader.pos;
            let value = match reader.read_value()? {
                Value::Byte(v) if array == TagID::ByteArray => v as i64,
                Value::Int(v) if array != TagID::ByteArray || i8::try_from(v).is_ok() => {
                    v as i64
                }
                Value::Long(v) if array == TagID::LongArray => v,
                _ => return Err(reader.error_at(start, "invalid array element")),
            };
            values.push(value);
            Ok(())
        })?;

        // Every element was range-checked above.
        Ok(match array {
            TagID::ByteArray => Value::ByteArray(values.into_iter().map(|v| v as i8).collect()),
            TagID::IntArray => Value::IntArray(values.into_iter().map(|v| v as i32).collect()),
            _ => Value::LongArray(values),
        })
    }
}

/// Interprets an unquoted token.
///
/// `None` means the token is a plain string; `Some(Err)` is a number that
/// does not fit its kind.
fn classify(token: &str) -> Option<std::result::Result<Value, &'static str>> {
    match token {
        "true" => return Some(Ok(Value::Byte(1))),
        "false" => return Some(Ok(Value::Byte(0))),
        _ => {}
    }

    let (body, suffix) = match token.as_bytes()[token.len() - 1].to_ascii_lowercase() {
        suffix @ (b'b' | b's' | b'l' | b'f' | b'd') => (&token[..token.len() - 1], Some(suffix)),
        _ => (token, None),
    };

    if let Some(float) = non_finite(body) {
        return match suffix {
            Some(b'f') => Some(Ok(Value::Float(float as f32))),
            Some(b'd') => Some(Ok(Value::Double(float))),
            _ => None,
        };
    }

    let shape = shape(body)?;
    let out_of_range = Some(Err("number out of range"));
    match (suffix, shape) {
        (Some(b'b'), Shape::Integer) => match body.parse::<i8>() {
            Ok(v) => Some(Ok(Value::Byte(v))),
            Err(_) => out_of_range,
        },
        (Some(b's'), Shape::Integer) => match body.parse::<i16>() {
            Ok(v) => Some(Ok(Value::Short(v))),
            Err(_) => out_of_range,
        },
        (Some(b'l'), Shape::Integer) => match body.parse::<i64>() {
            Ok(v) => Some(Ok(Value::Long(v))),
            Err(_) => out_of_range,
        },
        (None, Shape::Integer) => match body.parse::<i32>() {
            Ok(v) => Some(Ok(Value::Int(v))),
            Err(_) => out_of_range,
        },
        (Some(b'f'), _) => body.parse::<f32>().ok().map(|v| Ok(Value::Float(v))),
        (Some(b'd'), _) => body.parse::<f64>().ok().map(|v| Ok(Value::Double(v))),
        (None, Shape::Decimal) => body.parse::<f64>().ok().map(|v| Ok(Value::Double(v))),
        _ => None,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Shape {
    Integer,
    Decimal,
}

fn shape(body: &str) -> Option<Shape> {
    let bytes = body.as_bytes();
    let mut i = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    let mut digits = 0;
    let mut dot = false;
    let mut exponent = false;

    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => digits += 1,
            b'.' if !dot && !exponent => dot = true,
            b'e' | b'E' if !exponent && digits > 0 => {
                exponent = true;
                if matches!(bytes.get(i + 1), Some(b'-' | b'+')) {
                    i += 1;
                }
                if !matches!(bytes.get(i + 1), Some(b'0'..=b'9')) {
                    return None;
                }
            }
            _ => return None,
        }
        i += 1;
    }

    match (digits, dot, exponent) {
        (0, _, _) => None,
        (_, false, false) => Some(Shape::Integer),
        _ => Some(Shape::Decimal),
    }
}

fn non_finite(body: &str) -> Option<f64> {
    match body {
        "NaN" => Some(f64::NAN),
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}
