use thiserror::Error;

use crate::surface::RegionId;

#[derive(Error, Debug, PartialEq)]
pub enum PageError {
    #[error("Region {0} is not displayed on the page")]
    RegionNotFound(RegionId),

    #[error("Region {0} already fired")]
    AlreadyFired(RegionId),

    #[error("Post {post} has an invalid date: {source}")]
    InvalidDate {
        post: String,
        #[source]
        source: chrono::ParseError,
    },
}
