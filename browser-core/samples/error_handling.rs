use std::fmt;
use std::num::ParseIntError;

#[derive(Debug)]
enum AgeError {
    Parse(ParseIntError),
    OutOfRange(i64),
}

impl fmt::Display for AgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeError::Parse(e) => write!(f, "not a number: {e}"),
            AgeError::OutOfRange(n) => write!(f, "{n} is not a plausible age"),
        }
    }
}

impl From<ParseIntError> for AgeError {
    fn from(e: ParseIntError) -> Self {
        AgeError::Parse(e)
    }
}

fn parse_age(input: &str) -> Result<u8, AgeError> {
    let n: i64 = input.trim().parse()?;
    u8::try_from(n)
        .ok()
        .filter(|age| *age <= 150)
        .ok_or(AgeError::OutOfRange(n))
}

fn main() {
    for input in ["42", "abc", "900"] {
        match parse_age(input) {
            Ok(age) => println!("age: {age}"),
            Err(e) => println!("error: {e}"),
        }
    }
}
