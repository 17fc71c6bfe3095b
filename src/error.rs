use crate::nbt::TagKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("unexpected data after end of stream at offset {offset}")]
    TrailingData { offset: usize },

    #[error("malformed file: {0}")]
    MalformedFile(String),

    #[error("unknown tag kind: {0}")]
    UnknownTagKind(u8),

    #[error("list element {index} is {actual}, list holds {expected}")]
    TypeMismatch {
        index: usize,
        expected: TagKind,
        actual: TagKind,
    },

    #[error("invalid UTF-8 string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("no tag named {0:?}")]
    NotFound(String),

    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid {what} length: {len}")]
    InvalidLength { what: &'static str, len: i64 },

    #[error("{what} too long: {len} bytes (max {max})")]
    TooLong {
        what: &'static str,
        len: usize,
        max: usize,
    },

    #[error("containers nested deeper than {max} levels")]
    NestingTooDeep { max: usize },

    #[error("run data for row {y} exhausted at column {x}")]
    RunExhausted { y: u8, x: usize },

    #[error("tile at column {x} of row {y} is outside the map")]
    TileOutOfRange { x: usize, y: u8 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
