use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Blob size out of range: {0} bytes")]
    SizeOutOfRange(u64),
}

pub type Result<T> = std::result::Result<T, Error>;
