use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no face pose available; snapshot rejected")]
    NoFacePose,

    #[error("landmark frame has {got} points, detector contract expects {expected}")]
    FrameLength { expected: usize, got: usize },

    #[error("accessory index {index} outside range {start}..={end} for type {type_id}")]
    IndexOutOfRange {
        type_id: String,
        index: u32,
        start: u32,
        end: u32,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
